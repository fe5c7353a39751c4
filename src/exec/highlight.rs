// src/exec/highlight.rs

//! Task label styling for the console line. Purely cosmetic.

/// Renders a task name for display.
pub trait Highlighter: Send + Sync {
    fn task_label(&self, task: &str) -> String;
}

/// Leaves the label untouched. Default.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn task_label(&self, task: &str) -> String {
        task.to_string()
    }
}

/// Wraps the label in ANSI cyan.
#[derive(Debug, Clone, Copy, Default)]
pub struct CyanHighlighter;

impl Highlighter for CyanHighlighter {
    fn task_label(&self, task: &str) -> String {
        format!("\x1b[36m{task}\x1b[39m")
    }
}
