//! Maintenance plan registry.

use log::warn;

use crate::{
    error::{EntityKind, Result, UpkeepError},
    models::{MaintenancePlan, PlanRecord},
};

/// Owns every maintenance plan, in insertion order.
///
/// Plan keys are unique across the registry and every stored plan is linked
/// to at least one equipment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanRegistry {
    plans: Vec<MaintenancePlan>,
}

impl PlanRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from stored records, normalizing legacy shapes.
    pub fn from_records(records: Vec<PlanRecord>) -> Self {
        Self {
            plans: Self::normalize(records),
        }
    }

    /// Converts raw plan records into the linked-set form.
    ///
    /// Legacy records carrying a single `equipment_key` become one-element
    /// sets. Records sharing a plan key are merged into the first one seen:
    /// its scalar fields and tasks win and the equipment sets are unioned in
    /// order of appearance without duplicates. Plans left without any linked
    /// equipment are dropped. Applying this to its own output changes
    /// nothing.
    pub fn normalize(records: Vec<PlanRecord>) -> Vec<MaintenancePlan> {
        let mut plans: Vec<MaintenancePlan> = Vec::with_capacity(records.len());

        for record in records {
            let links = record
                .equipments
                .into_iter()
                .flatten()
                .chain(record.equipment_key)
                .filter(|key| !key.is_empty());

            match plans.iter_mut().find(|p| p.plan_key == record.plan_key) {
                Some(existing) => {
                    for key in links {
                        existing.link(&key);
                    }
                }
                None => {
                    let mut plan = MaintenancePlan {
                        plan_key: record.plan_key,
                        description: record.description,
                        periodicity: record.periodicity,
                        tasks: record.tasks,
                        equipments: Vec::new(),
                    };
                    for key in links {
                        plan.link(&key);
                    }
                    plans.push(plan);
                }
            }
        }

        plans.retain(|plan| {
            if plan.equipments.is_empty() {
                warn!("Dropping plan '{}' with no linked equipment", plan.plan_key);
            }
            !plan.equipments.is_empty()
        });
        plans
    }

    pub fn get(&self, plan_key: &str) -> Option<&MaintenancePlan> {
        self.plans.iter().find(|p| p.plan_key == plan_key)
    }

    /// Looks up a plan, failing with `UnknownPlan`.
    pub fn require(&self, plan_key: &str) -> Result<&MaintenancePlan> {
        self.get(plan_key).ok_or_else(|| UpkeepError::UnknownPlan {
            key: plan_key.to_string(),
        })
    }

    pub fn contains(&self, plan_key: &str) -> bool {
        self.get(plan_key).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MaintenancePlan> {
        self.plans.iter()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Plans linked to an equipment, in registry order.
    pub fn linked_to<'a, 'k>(
        &'a self,
        equipment_key: &'k str,
    ) -> impl Iterator<Item = &'a MaintenancePlan> + 'k
    where
        'a: 'k,
    {
        self.plans
            .iter()
            .filter(move |plan| plan.is_linked_to(equipment_key))
    }

    /// Whether any plan links the equipment.
    pub fn links_equipment(&self, equipment_key: &str) -> bool {
        self.linked_to(equipment_key).next().is_some()
    }

    pub(crate) fn insert(&mut self, plan: MaintenancePlan) -> Result<&MaintenancePlan> {
        if self.contains(&plan.plan_key) {
            return Err(UpkeepError::duplicate(EntityKind::Plan, plan.plan_key));
        }
        self.plans.push(plan);
        Ok(&self.plans[self.plans.len() - 1])
    }

    pub(crate) fn get_mut(&mut self, plan_key: &str) -> Result<&mut MaintenancePlan> {
        self.plans
            .iter_mut()
            .find(|p| p.plan_key == plan_key)
            .ok_or_else(|| UpkeepError::UnknownPlan {
                key: plan_key.to_string(),
            })
    }

    pub(crate) fn remove(&mut self, plan_key: &str) -> Option<MaintenancePlan> {
        let index = self.plans.iter().position(|p| p.plan_key == plan_key)?;
        Some(self.plans.remove(index))
    }

    pub(crate) fn into_plans(self) -> Vec<MaintenancePlan> {
        self.plans
    }
}

impl<'a> IntoIterator for &'a PlanRegistry {
    type Item = &'a MaintenancePlan;
    type IntoIter = std::slice::Iter<'a, MaintenancePlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
