//! Maintenance plan operations for the Catalog.

use super::Catalog;
use crate::{
    editing::{EditingContext, PendingTasks},
    error::{EntityKind, Result, UpkeepError},
    models::{MaintenancePlan, Task},
    params::{CreatePlan, FrequencyOverride, PlanSelection, UpdatePlan},
    periodicity::{self, Periodicity},
    validators::require,
};

/// Result of detaching a plan from one equipment.
#[derive(Debug, Clone, PartialEq)]
pub enum UnlinkOutcome {
    /// The plan remains, linked to its other equipment
    Detached(MaintenancePlan),
    /// That was the plan's last equipment, so the plan was deleted
    PlanDeleted(MaintenancePlan),
}

impl UnlinkOutcome {
    pub fn plan(&self) -> &MaintenancePlan {
        match self {
            UnlinkOutcome::Detached(plan) | UnlinkOutcome::PlanDeleted(plan) => plan,
        }
    }

    pub fn plan_deleted(&self) -> bool {
        matches!(self, UnlinkOutcome::PlanDeleted(_))
    }
}

/// Rejects an empty task list or repeated task keys.
fn checked_tasks(plan_key: &str, tasks: &[Task]) -> Result<Vec<Task>> {
    if tasks.is_empty() {
        return Err(UpkeepError::EmptyTaskList {
            plan_key: plan_key.to_string(),
        });
    }
    Ok(PendingTasks::try_from(tasks.to_vec())?.into_tasks())
}

impl Catalog {
    /// Creates a plan linked to a single equipment.
    pub fn create_plan(&mut self, params: &CreatePlan) -> Result<MaintenancePlan> {
        require("plan_key", &params.plan_key)?;
        let plan_key = params.plan_key.trim();

        if self.plans.contains(plan_key) {
            return Err(UpkeepError::duplicate(EntityKind::Plan, plan_key));
        }
        let tasks = checked_tasks(plan_key, &params.tasks)?;
        let equipment = self.equipment.require(&params.equipment_key)?;

        let plan = MaintenancePlan {
            plan_key: plan_key.to_string(),
            description: MaintenancePlan::derive_description(
                &equipment.description,
                &params.periodicity,
            ),
            periodicity: params.periodicity.clone(),
            tasks,
            equipments: vec![equipment.key.clone()],
        };

        let created = self.plans.insert(plan)?.clone();
        self.equipment.touch_modified(&params.equipment_key);
        Ok(created)
    }

    /// Links an existing plan to one more equipment.
    ///
    /// Returns false, without touching anything, when the link already exists.
    pub fn link_existing_plan(&mut self, plan_key: &str, equipment_key: &str) -> Result<bool> {
        self.plans.require(plan_key)?;
        self.equipment.require(equipment_key)?;

        let linked = self.plans.get_mut(plan_key)?.link(equipment_key);
        if linked {
            self.equipment.touch_modified(equipment_key);
        }
        Ok(linked)
    }

    /// Rewrites a plan's key, periodicity and tasks.
    ///
    /// Renaming is refused while a schedule of one of the plan's linked assets
    /// uses it. Planned work elsewhere that still names the old key (left
    /// behind after an unlink) follows the rename. The description is derived
    /// again from the first linked equipment.
    pub fn update_plan(&mut self, params: &UpdatePlan) -> Result<MaintenancePlan> {
        require("plan_key", &params.new_plan_key)?;
        let old_key = params.plan_key.as_str();
        let new_key = params.new_plan_key.trim();

        let plan = self.plans.require(old_key)?;
        let tasks = checked_tasks(new_key, &params.tasks)?;
        let renaming = new_key != old_key;
        if renaming {
            if self.plans.contains(new_key) {
                return Err(UpkeepError::duplicate(EntityKind::Plan, new_key));
            }
            self.guard().check_plan_rekey(plan)?;
        }

        let first_equipment = plan.equipments.first().ok_or_else(|| {
            UpkeepError::invalid_input("equipments")
                .with_reason(format!("plan '{old_key}' has no linked equipment"))
        })?;
        let description = MaintenancePlan::derive_description(
            &self.equipment.require(first_equipment)?.description,
            &params.periodicity,
        );

        let plan = self.plans.get_mut(old_key)?;
        plan.plan_key = new_key.to_string();
        plan.description = description;
        plan.periodicity = params.periodicity.clone();
        plan.tasks = tasks;
        let updated = plan.clone();

        if renaming {
            for work in self
                .preventives
                .iter_mut()
                .flat_map(|schedule| schedule.planned_work.iter_mut())
                .filter(|work| work.maintenance_plan == old_key)
            {
                work.maintenance_plan = new_key.to_string();
            }
        }
        for key in &updated.equipments {
            self.equipment.touch_modified(key);
        }
        Ok(updated)
    }

    /// Detaches a plan from one equipment, deleting the plan when it was the
    /// last one.
    pub fn unlink_plan_from_equipment(
        &mut self,
        plan_key: &str,
        equipment_key: &str,
    ) -> Result<UnlinkOutcome> {
        let plan = self.plans.require(plan_key)?;
        if !plan.is_linked_to(equipment_key) {
            return Err(UpkeepError::PlanNotLinked {
                plan_key: plan_key.to_string(),
                equipment_key: equipment_key.to_string(),
            });
        }
        self.guard().check_unlink(plan_key, equipment_key)?;

        let plan = self.plans.get_mut(plan_key)?;
        plan.unlink(equipment_key);
        let outcome = if plan.equipments.is_empty() {
            let removed = self.plans.remove(plan_key).ok_or_else(|| UpkeepError::UnknownPlan {
                key: plan_key.to_string(),
            })?;
            UnlinkOutcome::PlanDeleted(removed)
        } else {
            UnlinkOutcome::Detached(plan.clone())
        };

        self.equipment.touch_modified(equipment_key);
        Ok(outcome)
    }

    /// Deletes a plan outright, detaching it from every equipment.
    ///
    /// Refused while any schedule's planned work still uses the plan.
    pub fn delete_plan(&mut self, plan_key: &str) -> Result<MaintenancePlan> {
        self.plans.require(plan_key)?;
        self.guard().check_plan_deletion(plan_key)?;

        let removed = self.plans.remove(plan_key).ok_or_else(|| UpkeepError::UnknownPlan {
            key: plan_key.to_string(),
        })?;
        for key in &removed.equipments {
            self.equipment.touch_modified(key);
        }
        Ok(removed)
    }

    /// Saves an authoring session: creates a new plan on the context's
    /// equipment, or updates the plan being edited.
    pub fn save_plan(
        &mut self,
        ctx: &EditingContext,
        plan_key: &str,
        periodicity: Periodicity,
        pending: PendingTasks,
    ) -> Result<MaintenancePlan> {
        match &ctx.plan_key {
            None => self.create_plan(&CreatePlan {
                plan_key: plan_key.to_string(),
                equipment_key: ctx.equipment_key.clone(),
                periodicity,
                tasks: pending.into_tasks(),
            }),
            Some(editing) => {
                if !self.plans.require(editing)?.is_linked_to(&ctx.equipment_key) {
                    return Err(UpkeepError::PlanNotLinked {
                        plan_key: editing.clone(),
                        equipment_key: ctx.equipment_key.clone(),
                    });
                }
                self.update_plan(&UpdatePlan {
                    plan_key: editing.clone(),
                    new_plan_key: plan_key.to_string(),
                    periodicity,
                    tasks: pending.into_tasks(),
                })
            }
        }
    }

    /// Plans linked to an equipment, in registry order.
    pub fn plans_for_equipment(&self, equipment_key: &str) -> Vec<&MaintenancePlan> {
        self.plans.linked_to(equipment_key).collect()
    }

    /// One selection per linked plan, pre-filled with the catalog default
    /// recurrence of the plan's periodicity.
    pub fn default_selections(&self, equipment_key: &str) -> Result<Vec<PlanSelection>> {
        self.equipment.require(equipment_key)?;
        Ok(self
            .plans
            .linked_to(equipment_key)
            .map(|plan| {
                let spec = periodicity::resolve(&plan.periodicity);
                PlanSelection::with_override(
                    plan.plan_key.clone(),
                    FrequencyOverride::new(spec.frequency, i64::from(spec.occurs_every)),
                )
            })
            .collect())
    }
}
