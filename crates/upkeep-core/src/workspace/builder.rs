//! Builder for opening SQLite-backed workspaces.

use std::path::{Path, PathBuf};

use super::Workspace;
use crate::{
    db::Database,
    error::{Result, UpkeepError},
};

/// Builder for creating and configuring Workspace instances.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceBuilder {
    database_path: Option<PathBuf>,
}

impl WorkspaceBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/upkeep/upkeep.db` or `~/.local/share/upkeep/upkeep.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Opens the database, creating it and its parent directories if needed,
    /// and loads the stored catalog.
    ///
    /// # Errors
    ///
    /// Returns `UpkeepError::FileSystem` if the parent directory cannot be created
    /// Returns `UpkeepError::Database` if database initialization fails
    pub fn build(self) -> Result<Workspace<Database>> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| UpkeepError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        log::debug!("Opening database at {}", db_path.display());
        Workspace::open(Database::new(&db_path)?)
    }

    /// Returns the default database path following the XDG Base Directory
    /// specification.
    pub fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("upkeep")
            .place_data_file("upkeep.db")
            .map_err(|e| UpkeepError::XdgDirectory(e.to_string()))
    }
}
