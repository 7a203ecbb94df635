//! Error types for the maintenance catalog.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Kind of record a key belongs to, used to qualify duplicate-key failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Equipment,
    Plan,
    Task,
    PreventiveSchedule,
    PlannedWork,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Equipment => "equipment",
            EntityKind::Plan => "maintenance plan",
            EntityKind::Task => "task",
            EntityKind::PreventiveSchedule => "preventive schedule",
            EntityKind::PlannedWork => "planned work",
        };
        f.write_str(name)
    }
}

/// Error type for all catalog operations.
///
/// The first group of variants are validation rejections: the request was
/// refused and nothing was mutated. The remaining variants come from the
/// storage and configuration layers.
#[derive(Error, Debug)]
pub enum UpkeepError {
    /// A record with the same key already exists
    #[error("A {entity} with key '{key}' already exists")]
    DuplicateKey { entity: EntityKind, key: String },
    /// Equipment key does not resolve
    #[error("Equipment '{key}' not found")]
    UnknownEquipment { key: String },
    /// Plan key does not resolve
    #[error("Maintenance plan '{key}' not found")]
    UnknownPlan { key: String },
    /// Preventive schedule id does not resolve
    #[error("Preventive schedule with ID {id} not found")]
    UnknownSchedule { id: u64 },
    /// A plan needs at least one task
    #[error("Maintenance plan '{plan_key}' must contain at least one task")]
    EmptyTaskList { plan_key: String },
    /// A preventive schedule needs at least one plan
    #[error("At least one maintenance plan must be selected for '{asset}'")]
    EmptyPlanSelection { asset: String },
    /// Frequency override is incomplete or out of range
    #[error("Invalid frequency for plan '{plan_key}': {reason}")]
    InvalidFrequencyConfig { plan_key: String, reason: String },
    /// Equipment key cannot change while plans or schedules reference it
    #[error("Equipment key '{key}' is referenced by plans or preventive schedules and cannot be changed")]
    KeyInUse { key: String },
    /// Plan is referenced by preventive planned work
    #[error("Maintenance plan '{plan_key}' is used by preventive schedules for: {}", assets.join(", "))]
    PlanInUseByPreventive { plan_key: String, assets: Vec<String> },
    /// Equipment cannot be deleted while referenced
    #[error("Equipment '{key}' is used by maintenance plans or preventive schedules")]
    ReferencedByPlanOrSchedule { key: String },
    /// Imported snapshot does not have the expected shape
    #[error("Invalid import format: {reason}")]
    InvalidImportFormat { reason: String },
    /// Plan exists but is not linked to the equipment
    #[error("Maintenance plan '{plan_key}' is not linked to equipment '{equipment_key}'")]
    PlanNotLinked {
        plan_key: String,
        equipment_key: String,
    },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> UpkeepError {
        UpkeepError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> UpkeepError {
        UpkeepError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl UpkeepError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    pub(crate) fn duplicate(entity: EntityKind, key: impl Into<String>) -> Self {
        UpkeepError::DuplicateKey {
            entity,
            key: key.into(),
        }
    }

    pub(crate) fn import_format(reason: impl Into<String>) -> Self {
        UpkeepError::InvalidImportFormat {
            reason: reason.into(),
        }
    }

    /// Whether this error is a rejected request rather than an
    /// infrastructure failure. Rejections never leave partial mutations.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            UpkeepError::Database { .. }
                | UpkeepError::FileSystem { .. }
                | UpkeepError::XdgDirectory(_)
                | UpkeepError::Serialization { .. }
                | UpkeepError::Configuration { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| UpkeepError::database(message).with_source(e))
    }
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, UpkeepError>;
