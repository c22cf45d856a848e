//! Domain models for Stepwise.
//!
//! # Core Concepts
//!
//! - [`Task`]: A unit of work read from a task header line of the model's answer.
//! - [`Subtask`]: A checkable step under a task, read from a numbered line.
//! - [`Checklist`]: One answered question with its tasks and UI state
//!   (subtask completion, expanded tasks). Lives in memory only.

mod checklist;
mod task;

pub use checklist::*;
pub use task::*;
