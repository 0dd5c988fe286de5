mod create;
mod history;
mod init;
mod mv;
mod show;
mod utils;

pub use create::handle_create;
pub use history::handle_history;
pub use init::handle_init;
pub use mv::handle_move;
pub use show::handle_show;

use crate::config::LanesConfig;
use crate::model::{Board, Project};
use anyhow::{Context, Result};
use std::path::Path;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: LanesConfig,
    pub board: Board,
}

impl CommandContext {
    pub fn new(config: LanesConfig) -> Result<Self> {
        let board = config.board().context("Invalid board configuration")?;
        Ok(Self { config, board })
    }

    /// Opens a project file on the board and makes it current.
    pub fn open(&mut self, file: &Path) -> Result<&mut Project> {
        self.board
            .open_project(file)
            .with_context(|| format!("Failed to open project {}", file.display()))
    }
}
