use crate::error::{LanesError, Result};
use crate::model::{Board, ColumnSpec};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file searched for from the working directory upward.
pub const CONFIG_FILE: &str = ".lanes.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanesConfig {
    #[serde(default)]
    pub board: BoardSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSettings {
    /// Initial columns of every new project. The first is the landing column.
    #[serde(default = "default_columns")]
    pub columns: Vec<ColumnSpec>,

    #[serde(default = "default_project_name")]
    pub default_project_name: String,
}

fn default_columns() -> Vec<ColumnSpec> {
    ColumnSpec::defaults()
}

fn default_project_name() -> String {
    "New Project".to_string()
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            default_project_name: default_project_name(),
        }
    }
}

impl LanesConfig {
    /// Loads the nearest `.lanes.toml` above `start_path`, or defaults when
    /// there is none.
    pub fn discover(start_path: &Path) -> Result<(Self, Option<PathBuf>)> {
        match Self::find_config_file(start_path) {
            Some(path) => Ok((Self::load(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: LanesConfig = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.board.columns.is_empty() {
            return Err(LanesError::Config(
                "board.columns must list at least one column".to_string(),
            ));
        }
        if let Some(column) = self.board.columns.iter().find(|c| c.name.trim().is_empty()) {
            return Err(LanesError::Config(format!(
                "column names cannot be blank (wip_limit {})",
                column.wip_limit
            )));
        }
        Ok(())
    }

    /// A fresh board whose new projects use the configured columns.
    pub fn board(&self) -> Result<Board> {
        Board::with_columns(self.board.columns.clone())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
