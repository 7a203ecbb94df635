//! Record registries.
//!
//! Each registry exclusively owns one kind of record and keeps it in
//! insertion order, which is the canonical order for listing, exporting and
//! bulk reconciliation. Registries enforce their own key uniqueness; rules
//! that span registries go through [`crate::guard::RelationshipGuard`].

pub mod equipment;
pub mod plans;
pub mod preventive;

pub use equipment::{EquipmentImport, EquipmentRegistry};
pub use plans::PlanRegistry;
pub use preventive::PreventiveRegistry;
