//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format collections of domain objects
//! with consistent structure and empty collection handling.

use std::{fmt, ops::Index};

use crate::models::{Equipment, MaintenancePlan, PreventiveSchedule};

/// Newtype wrapper for displaying a list of equipment.
///
/// # Examples
///
/// ```rust
/// use upkeep_core::{display::EquipmentList, Catalog};
///
/// let mut catalog = Catalog::new();
/// let pump = catalog.add_equipment("PUMP", "01", "Main Pump").unwrap();
///
/// let output = EquipmentList(vec![pump]).to_string();
/// assert!(output.contains("PUMP-01"));
/// assert_eq!(EquipmentList(vec![]).to_string(), "No equipment found.\n");
/// ```
pub struct EquipmentList(pub Vec<Equipment>);

/// Newtype wrapper for displaying a list of maintenance plans.
pub struct Plans(pub Vec<MaintenancePlan>);

/// Newtype wrapper for displaying a list of preventive schedules.
pub struct Preventives(pub Vec<PreventiveSchedule>);

macro_rules! collection_wrapper {
    ($wrapper:ident, $item:ty, $empty:literal) => {
        impl $wrapper {
            /// Check if the collection is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Get the number of items in the collection.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Get a reference to the item at the given index.
            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            /// Get an iterator over the items.
            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $wrapper {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $wrapper {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $wrapper {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl fmt::Display for $wrapper {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.0.is_empty() {
                    writeln!(f, $empty)
                } else {
                    for item in &self.0 {
                        write!(f, "{item}")?;
                    }
                    Ok(())
                }
            }
        }
    };
}

collection_wrapper!(EquipmentList, Equipment, "No equipment found.");
collection_wrapper!(Plans, MaintenancePlan, "No maintenance plans found.");
collection_wrapper!(Preventives, PreventiveSchedule, "No preventive schedules found.");
