//! Data models for lanes.
//!
//! This module defines the board model, leaf first:
//!
//! - [`Task`]: A unit of work with an append-only movement history
//! - [`Column`]: An ordered, optionally WIP-limited list of task ids
//! - [`Project`]: Columns plus the tasks that live in them; owns persistence
//! - [`Board`]: The open projects and which one is current

mod board;
mod column;
mod project;
mod task;
mod types;

pub use board::Board;
pub use column::Column;
pub use project::Project;
pub use task::{Task, TaskDraft};
pub use types::{
    BoardEvent, ColumnEvent, ColumnSpec, MoveOutcome, Movement, ProjectEvent, TASK_ID_LENGTH,
    TaskEvent, TaskId,
};
