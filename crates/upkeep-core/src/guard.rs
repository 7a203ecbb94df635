//! Relationship guard.
//!
//! Decides whether a rename, unlink or delete is allowed given the current
//! references from plans and preventive schedules. The guard only reads; the
//! caller performs the mutation after every check has passed, so a rejected
//! request never leaves a partial change behind.

use crate::{
    error::{Result, UpkeepError},
    models::{MaintenancePlan, PreventiveSchedule},
    registry::{PlanRegistry, PreventiveRegistry},
};

/// Read-only view over the records that can reference equipment and plans.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipGuard<'a> {
    plans: &'a PlanRegistry,
    preventives: &'a PreventiveRegistry,
}

impl<'a> RelationshipGuard<'a> {
    pub fn new(plans: &'a PlanRegistry, preventives: &'a PreventiveRegistry) -> Self {
        Self { plans, preventives }
    }

    /// Whether any plan links the equipment or any schedule uses it as asset.
    pub fn equipment_referenced(&self, equipment_key: &str) -> bool {
        self.plans.links_equipment(equipment_key)
            || self.preventives.for_asset(equipment_key).is_some()
    }

    /// An equipment key may only change while nothing references it.
    pub fn check_equipment_rekey(&self, equipment_key: &str) -> Result<()> {
        if self.equipment_referenced(equipment_key) {
            return Err(UpkeepError::KeyInUse {
                key: equipment_key.to_string(),
            });
        }
        Ok(())
    }

    pub fn check_equipment_removal(&self, equipment_key: &str) -> Result<()> {
        if self.equipment_referenced(equipment_key) {
            return Err(UpkeepError::ReferencedByPlanOrSchedule {
                key: equipment_key.to_string(),
            });
        }
        Ok(())
    }

    /// Schedules whose planned work uses the plan, in registry order.
    pub fn schedules_using_plan<'k>(
        &self,
        plan_key: &'k str,
    ) -> impl Iterator<Item = &'a PreventiveSchedule> + 'k
    where
        'a: 'k,
    {
        self.preventives
            .iter()
            .filter(move |schedule| schedule.references_plan(plan_key))
    }

    /// A plan key may not change while a schedule of one of its linked
    /// assets uses it.
    pub fn check_plan_rekey(&self, plan: &MaintenancePlan) -> Result<()> {
        let assets: Vec<String> = self
            .schedules_using_plan(&plan.plan_key)
            .filter(|schedule| plan.is_linked_to(&schedule.asset))
            .map(|schedule| schedule.asset.clone())
            .collect();
        Self::in_use(&plan.plan_key, assets)
    }

    /// Detaching a plan from one asset is blocked only by that asset's own
    /// schedule.
    pub fn check_unlink(&self, plan_key: &str, equipment_key: &str) -> Result<()> {
        let assets = self
            .preventives
            .for_asset(equipment_key)
            .filter(|schedule| schedule.references_plan(plan_key))
            .map(|schedule| vec![schedule.asset.clone()])
            .unwrap_or_default();
        Self::in_use(plan_key, assets)
    }

    /// A plan may only be deleted once no schedule uses it.
    pub fn check_plan_deletion(&self, plan_key: &str) -> Result<()> {
        let assets = self
            .schedules_using_plan(plan_key)
            .map(|schedule| schedule.asset.clone())
            .collect();
        Self::in_use(plan_key, assets)
    }

    fn in_use(plan_key: &str, assets: Vec<String>) -> Result<()> {
        if assets.is_empty() {
            return Ok(());
        }
        Err(UpkeepError::PlanInUseByPreventive {
            plan_key: plan_key.to_string(),
            assets,
        })
    }
}
