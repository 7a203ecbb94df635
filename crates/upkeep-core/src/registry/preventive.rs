//! Preventive schedule registry.

use crate::{
    error::{EntityKind, Result, UpkeepError},
    models::PreventiveSchedule,
};

pub(crate) fn ids_exhausted() -> UpkeepError {
    UpkeepError::invalid_input("id_seed").with_reason("no preventive ids are left above the highest one")
}

/// Owns every preventive schedule, in insertion order.
///
/// Ids are unique and each asset has at most one schedule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreventiveRegistry {
    schedules: Vec<PreventiveSchedule>,
}

impl PreventiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from stored schedules, rejecting repeated ids or
    /// assets.
    pub fn from_records(records: Vec<PreventiveSchedule>) -> Result<Self> {
        let mut registry = Self::new();
        for schedule in records {
            if registry.get(schedule.id).is_some() {
                return Err(UpkeepError::import_format(format!(
                    "preventive id {} appears more than once",
                    schedule.id
                )));
            }
            if registry.for_asset(&schedule.asset).is_some() {
                return Err(UpkeepError::import_format(format!(
                    "asset '{}' has more than one preventive schedule",
                    schedule.asset
                )));
            }
            registry.schedules.push(schedule);
        }
        Ok(registry)
    }

    pub fn get(&self, id: u64) -> Option<&PreventiveSchedule> {
        self.schedules.iter().find(|s| s.id == id)
    }

    /// Looks up a schedule, failing with `UnknownSchedule`.
    pub fn require(&self, id: u64) -> Result<&PreventiveSchedule> {
        self.get(id).ok_or(UpkeepError::UnknownSchedule { id })
    }

    /// The schedule of an asset, if it is in the scheduled state.
    pub fn for_asset(&self, asset: &str) -> Option<&PreventiveSchedule> {
        self.schedules.iter().find(|s| s.asset == asset)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PreventiveSchedule> {
        self.schedules.iter()
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    pub fn max_id(&self) -> Option<u64> {
        self.schedules.iter().map(|s| s.id).max()
    }

    /// Next id to hand out: never below `seed` and always above every
    /// existing id. Fails once the highest id is `u64::MAX`.
    pub fn next_id(&self, seed: u64) -> Result<u64> {
        match self.max_id() {
            Some(max) => max
                .checked_add(1)
                .map(|next| seed.max(next))
                .ok_or_else(ids_exhausted),
            None => Ok(seed),
        }
    }

    pub(crate) fn insert(&mut self, schedule: PreventiveSchedule) -> Result<&PreventiveSchedule> {
        if self.for_asset(&schedule.asset).is_some() {
            return Err(UpkeepError::duplicate(
                EntityKind::PreventiveSchedule,
                schedule.asset,
            ));
        }
        if self.get(schedule.id).is_some() {
            return Err(UpkeepError::duplicate(
                EntityKind::PreventiveSchedule,
                schedule.preventive_maintenance_id,
            ));
        }
        self.schedules.push(schedule);
        Ok(&self.schedules[self.schedules.len() - 1])
    }

    pub(crate) fn get_mut(&mut self, id: u64) -> Result<&mut PreventiveSchedule> {
        self.schedules
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(UpkeepError::UnknownSchedule { id })
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, PreventiveSchedule> {
        self.schedules.iter_mut()
    }

    pub(crate) fn remove(&mut self, id: u64) -> Result<PreventiveSchedule> {
        let index = self
            .schedules
            .iter()
            .position(|s| s.id == id)
            .ok_or(UpkeepError::UnknownSchedule { id })?;
        Ok(self.schedules.remove(index))
    }

    pub(crate) fn into_schedules(self) -> Vec<PreventiveSchedule> {
        self.schedules
    }
}

impl<'a> IntoIterator for &'a PreventiveRegistry {
    type Item = &'a PreventiveSchedule;
    type IntoIter = std::slice::Iter<'a, PreventiveSchedule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
