//! Equipment registry.

use jiff::Timestamp;

use crate::{
    error::{EntityKind, Result, UpkeepError},
    guard::RelationshipGuard,
    models::Equipment,
    validators::{require, truncate_text, EquipmentLine, DESCRIPTION_MAX},
};

/// Outcome of a bulk equipment import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EquipmentImport {
    pub added: usize,
    /// Lines whose key already existed (in the registry or earlier in the batch)
    pub skipped: usize,
}

/// Owns every equipment record, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentRegistry {
    records: Vec<Equipment>,
}

impl EquipmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from stored records, rejecting repeated keys.
    pub fn from_records(records: Vec<Equipment>) -> Result<Self> {
        let mut registry = Self::new();
        for record in records {
            if registry.contains(&record.key) {
                return Err(UpkeepError::import_format(format!(
                    "equipment key '{}' appears more than once",
                    record.key
                )));
            }
            registry.records.push(record);
        }
        Ok(registry)
    }

    pub fn get(&self, key: &str) -> Option<&Equipment> {
        self.records.iter().find(|e| e.key == key)
    }

    /// Looks up an equipment, failing with `UnknownEquipment`.
    pub fn require(&self, key: &str) -> Result<&Equipment> {
        self.get(key).ok_or_else(|| UpkeepError::UnknownEquipment {
            key: key.to_string(),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Equipment> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Adds a new equipment keyed `<prefix>-<code>`.
    pub fn add(&mut self, prefix: &str, code: &str, description: &str) -> Result<&Equipment> {
        require("prefix", prefix)?;
        require("code", code)?;
        require("description", description)?;

        let equipment = Equipment::new(
            prefix.trim(),
            code.trim(),
            description.trim(),
            Timestamp::now(),
        );
        if self.contains(&equipment.key) {
            return Err(UpkeepError::duplicate(EntityKind::Equipment, equipment.key));
        }

        self.records.push(equipment);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Edits an equipment's prefix, code and description.
    ///
    /// The key may only change while nothing references the equipment;
    /// description-only edits are always allowed. Either way the record's
    /// `last_modified` is bumped.
    pub fn rename(
        &mut self,
        old_key: &str,
        new_prefix: &str,
        new_code: &str,
        new_description: &str,
        guard: &RelationshipGuard<'_>,
    ) -> Result<&Equipment> {
        require("prefix", new_prefix)?;
        require("code", new_code)?;
        require("description", new_description)?;

        let index = self.position(old_key)?;
        let new_key = Equipment::key_for(new_prefix.trim(), new_code.trim());

        if new_key != old_key {
            if self.contains(&new_key) {
                return Err(UpkeepError::duplicate(EntityKind::Equipment, new_key));
            }
            guard.check_equipment_rekey(old_key)?;
        }

        let record = &mut self.records[index];
        record.key = new_key;
        record.prefix = new_prefix.trim().to_string();
        record.code = new_code.trim().to_string();
        record.description = truncate_text(new_description.trim(), DESCRIPTION_MAX);
        record.last_modified = Timestamp::now();
        Ok(&self.records[index])
    }

    /// Removes an unreferenced equipment.
    pub fn remove(&mut self, key: &str, guard: &RelationshipGuard<'_>) -> Result<Equipment> {
        let index = self.position(key)?;
        guard.check_equipment_removal(key)?;
        Ok(self.records.remove(index))
    }

    /// Bumps `last_modified`. Returns false when the key is unknown, which
    /// happens for stale references and is not an error.
    pub fn touch_modified(&mut self, key: &str) -> bool {
        match self.records.iter_mut().find(|e| e.key == key) {
            Some(record) => {
                record.last_modified = Timestamp::now();
                true
            }
            None => false,
        }
    }

    /// Adds parsed import lines, skipping keys that already exist.
    pub fn import_lines(&mut self, lines: &[EquipmentLine]) -> EquipmentImport {
        let now = Timestamp::now();
        let mut outcome = EquipmentImport::default();
        for line in lines {
            let equipment = Equipment::new(&line.prefix, &line.code, &line.description, now);
            if self.contains(&equipment.key) {
                outcome.skipped += 1;
            } else {
                self.records.push(equipment);
                outcome.added += 1;
            }
        }
        outcome
    }

    pub(crate) fn into_records(self) -> Vec<Equipment> {
        self.records
    }

    fn position(&self, key: &str) -> Result<usize> {
        self.records
            .iter()
            .position(|e| e.key == key)
            .ok_or_else(|| UpkeepError::UnknownEquipment {
                key: key.to_string(),
            })
    }
}

impl<'a> IntoIterator for &'a EquipmentRegistry {
    type Item = &'a Equipment;
    type IntoIter = std::slice::Iter<'a, Equipment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
