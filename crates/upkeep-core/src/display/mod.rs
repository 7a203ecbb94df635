//! Display formatting functions and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly; collections and
//! operation outcomes are formatted through newtype wrappers so the same data
//! can be shown differently in a list, after a create, or after an update.
//! Every formatter produces markdown for the CLI's terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Formatted     │
//! │ (Equipment,     │───▶│ Result Types    │───▶│    Output       │
//! │  Plan, Prev.)   │    │                 │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (EquipmentList, Plans, Preventives)
//! - [`results`]: Operation result types (CreateResult, UpdateResult, DeleteResult)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//! - [`export`]: Markdown tables for exported rows
//!
//! ## Usage Examples
//!
//! ```rust
//! use upkeep_core::display::OperationStatus;
//!
//! let success = OperationStatus::success("Snapshot written".to_string());
//! assert_eq!(success.to_string(), "Success: Snapshot written\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod export;
pub mod models;
pub mod results;
pub mod status;

// Re-export commonly used types for convenience
pub use collections::{EquipmentList, Plans, Preventives};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
