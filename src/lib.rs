//! # Lanes - a kanban task board with XML project files
//!
//! Lanes models projects made of ordered, optionally WIP-limited columns and
//! the tasks that move between them. Every task keeps an append-only history
//! of its moves, and a project bound to a file rewrites that file whenever a
//! task's history changes.
//!
//! ## Features
//!
//! - **Board model**: `Board` → `Project` → `Column` / `Task`
//! - **WIP limits**: columns refuse tasks past their limit; failed moves roll back
//! - **Change notification**: synchronous `on_changed` subscriptions on every entity
//! - **XML persistence**: one self-describing document per project, auto-saved
//!
//! ## Quick Start
//!
//! ```no_run
//! use lanes::model::{Project, TaskDraft};
//!
//! # fn main() -> lanes::error::Result<()> {
//! let mut project = Project::new("Website");
//! let id = project.create_task(TaskDraft::new("Write spec")).id().clone();
//! project.save_to_xml("website.xml")?;
//!
//! // Auto-saved: the move is on disk when this returns
//! project.move_task(&id, 0, 1)?;
//!
//! let reloaded = Project::load_from_xml("website.xml")?;
//! assert_eq!(reloaded.column_of(&id), Some(1));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`model`]: Data models (Board, Project, Column, Task)
//! - [`notify`]: Subscription primitive behind `on_changed`
//! - [`storage`]: XML document format and atomic file writes

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.lanes.toml` discovery and the initial column layout.
pub mod config;

/// Error types and result aliases.
///
/// Defines `LanesError` enum and `Result<T>` type alias.
pub mod error;

pub mod logging;

/// Data models for the board.
pub mod model;

pub mod notify;

/// File-based storage layer.
///
/// Reads and writes projects as XML documents.
pub mod storage;
