//! Equipment operations for the Catalog.

use super::Catalog;
use crate::{
    error::Result,
    guard::RelationshipGuard,
    models::Equipment,
    registry::EquipmentImport,
    validators::parse_equipment_lines,
};

impl Catalog {
    /// Adds an equipment keyed `<prefix>-<code>`.
    pub fn add_equipment(&mut self, prefix: &str, code: &str, description: &str) -> Result<Equipment> {
        self.equipment.add(prefix, code, description).cloned()
    }

    /// Edits an equipment. The key (prefix and code) can only change while no
    /// plan or schedule references the equipment.
    pub fn rename_equipment(
        &mut self,
        old_key: &str,
        new_prefix: &str,
        new_code: &str,
        new_description: &str,
    ) -> Result<Equipment> {
        let guard = RelationshipGuard::new(&self.plans, &self.preventives);
        self.equipment
            .rename(old_key, new_prefix, new_code, new_description, &guard)
            .cloned()
    }

    /// Deletes an equipment that no plan or schedule references.
    pub fn remove_equipment(&mut self, key: &str) -> Result<Equipment> {
        let guard = RelationshipGuard::new(&self.plans, &self.preventives);
        self.equipment.remove(key, &guard)
    }

    /// Bumps an equipment's last-modified timestamp.
    pub fn touch_modified(&mut self, key: &str) -> bool {
        self.equipment.touch_modified(key)
    }

    /// Bulk-adds equipment from `prefix<TAB>code<TAB>description` lines.
    ///
    /// A malformed line rejects the whole batch; keys that already exist are
    /// skipped and counted.
    pub fn import_equipment(&mut self, text: &str) -> Result<EquipmentImport> {
        let lines = parse_equipment_lines(text)?;
        Ok(self.equipment.import_lines(&lines))
    }
}
