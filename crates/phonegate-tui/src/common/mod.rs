//! Shared building blocks for the TUI.

pub mod layout;
pub mod task;

pub use layout::{centered_rect, render_card};
pub use task::{TaskCompleted, TaskId, TaskSeq, TaskState};
