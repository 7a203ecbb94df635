//! Preventive schedule operations for the Catalog.
//!
//! An asset is either unscheduled (no schedule row) or scheduled (exactly
//! one row). `create_schedule` moves it to scheduled, `remove_schedule` back
//! to unscheduled; `update_schedule` rewrites a row in place.

use super::Catalog;
use crate::{
    error::{EntityKind, Result, UpkeepError},
    models::{format_preventive_id, Equipment, PlannedWork, PreventiveSchedule},
    params::{CreateSchedule, PlanSelection, UpdateSchedule},
    periodicity,
    validators::{truncate_text, DESCRIPTION_MAX},
};

/// Seed used when the caller has no preference for the first preventive id.
pub const DEFAULT_ID_SEED: u64 = 1;

/// Description written on a schedule for its asset.
pub fn preventive_description(equipment: &Equipment) -> String {
    truncate_text(
        &format!("Prev. {} ({})", equipment.description, equipment.prefix),
        DESCRIPTION_MAX,
    )
}

pub(crate) fn check_id_seed(id_seed: u64) -> Result<()> {
    if id_seed == 0 {
        return Err(UpkeepError::invalid_input("id_seed").with_reason("must be at least 1"));
    }
    Ok(())
}

impl Catalog {
    /// Validates a plan selection for an asset and turns it into planned work.
    fn planned_work_for(
        &self,
        asset: &str,
        selections: &[PlanSelection],
        preventive_maintenance_id: &str,
    ) -> Result<Vec<PlannedWork>> {
        if selections.is_empty() {
            return Err(UpkeepError::EmptyPlanSelection {
                asset: asset.to_string(),
            });
        }

        let mut planned_work: Vec<PlannedWork> = Vec::with_capacity(selections.len());
        for selection in selections {
            let plan_key = selection.plan_key.as_str();
            if planned_work.iter().any(|w| w.maintenance_plan == plan_key) {
                return Err(UpkeepError::duplicate(EntityKind::PlannedWork, plan_key));
            }

            let plan = self.plans.require(plan_key)?;
            if !plan.is_linked_to(asset) {
                return Err(UpkeepError::PlanNotLinked {
                    plan_key: plan_key.to_string(),
                    equipment_key: asset.to_string(),
                });
            }

            let spec = match selection.frequency {
                Some(frequency) => frequency.to_spec(plan_key)?,
                None => periodicity::resolve(&plan.periodicity),
            };
            planned_work.push(PlannedWork::new(preventive_maintenance_id, plan_key, spec));
        }
        Ok(planned_work)
    }

    /// Schedules an unscheduled asset.
    ///
    /// The id is the lowest value that is at least `id_seed` and above every
    /// existing schedule id.
    pub fn create_schedule(&mut self, params: &CreateSchedule) -> Result<PreventiveSchedule> {
        check_id_seed(params.id_seed)?;
        let equipment = self.equipment.require(&params.asset)?;
        if params.plans.is_empty() {
            return Err(UpkeepError::EmptyPlanSelection {
                asset: params.asset.clone(),
            });
        }
        if self.preventives.for_asset(&equipment.key).is_some() {
            return Err(UpkeepError::duplicate(
                EntityKind::PreventiveSchedule,
                equipment.key.as_str(),
            ));
        }

        let id = self.preventives.next_id(params.id_seed)?;
        let preventive_maintenance_id = format_preventive_id(id);
        let schedule = PreventiveSchedule {
            id,
            planned_work: self.planned_work_for(
                &equipment.key,
                &params.plans,
                &preventive_maintenance_id,
            )?,
            preventive_maintenance_id,
            description: preventive_description(equipment),
            asset: equipment.key.clone(),
        };

        let created = self.preventives.insert(schedule)?.clone();
        self.equipment.touch_modified(&created.asset);
        Ok(created)
    }

    /// Replaces the asset, description and whole planned-work list of an
    /// existing schedule.
    pub fn update_schedule(&mut self, params: &UpdateSchedule) -> Result<PreventiveSchedule> {
        let existing = self.preventives.require(params.id)?;
        let previous_asset = existing.asset.clone();
        let preventive_maintenance_id = existing.preventive_maintenance_id.clone();

        let equipment = self.equipment.require(&params.asset)?;
        if self
            .preventives
            .for_asset(&equipment.key)
            .is_some_and(|other| other.id != params.id)
        {
            return Err(UpkeepError::duplicate(
                EntityKind::PreventiveSchedule,
                equipment.key.as_str(),
            ));
        }
        let planned_work =
            self.planned_work_for(&equipment.key, &params.plans, &preventive_maintenance_id)?;
        let description = preventive_description(equipment);
        let asset = equipment.key.clone();

        let schedule = self.preventives.get_mut(params.id)?;
        schedule.asset = asset;
        schedule.description = description;
        schedule.planned_work = planned_work;
        let updated = schedule.clone();

        self.equipment.touch_modified(&previous_asset);
        if previous_asset != updated.asset {
            self.equipment.touch_modified(&updated.asset);
        }
        Ok(updated)
    }

    /// Deletes a schedule, returning its asset to the unscheduled state.
    pub fn remove_schedule(&mut self, id: u64) -> Result<PreventiveSchedule> {
        let removed = self.preventives.remove(id)?;
        self.equipment.touch_modified(&removed.asset);
        Ok(removed)
    }
}
