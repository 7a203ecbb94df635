//! Bulk reconciliation of preventive schedules against the plan links.

use std::{fmt, str::FromStr};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{scheduler::check_id_seed, scheduler::preventive_description, Catalog};
use crate::{
    error::{Result, UpkeepError},
    models::{format_preventive_id, PlannedWork, PreventiveSchedule},
    periodicity,
    registry::preventive::ids_exhausted,
};

/// What to do with an asset that already has a preventive schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Leave the existing schedule untouched
    #[default]
    Skip,
    /// Append planned work for linked plans the schedule does not cover yet
    Merge,
    /// Rebuild the planned work from every linked plan
    Replace,
}

impl ConflictPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictPolicy::Skip => "skip",
            ConflictPolicy::Merge => "merge",
            ConflictPolicy::Replace => "replace",
        }
    }

    /// Picks a policy by asking the caller. A "no" always keeps the more
    /// conservative branch: skip over merge, merge over replace.
    ///
    /// Nothing is asked when `existing` is zero.
    pub fn choose(existing: usize, confirm: &mut dyn Confirm) -> Self {
        if existing == 0 {
            return ConflictPolicy::Skip;
        }
        if !confirm.confirm(&format!(
            "{existing} equipment already have a preventive schedule. Update them?"
        )) {
            return ConflictPolicy::Skip;
        }
        if confirm.confirm("Replace their planned work instead of merging new plans in?") {
            ConflictPolicy::Replace
        } else {
            ConflictPolicy::Merge
        }
    }
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictPolicy {
    type Err = UpkeepError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(ConflictPolicy::Skip),
            "merge" => Ok(ConflictPolicy::Merge),
            "replace" => Ok(ConflictPolicy::Replace),
            other => Err(UpkeepError::invalid_input("policy")
                .with_reason(format!("'{other}' is not one of skip, merge, replace"))),
        }
    }
}

/// Synchronous yes/no decision supplied by the caller.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Aggregate counts of a reconciliation run, one per asset considered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileStats {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl ReconcileStats {
    pub fn total(&self) -> usize {
        self.created + self.updated + self.skipped
    }
}

impl Catalog {
    /// Planned work for every plan linked to `asset`, at each plan's default
    /// recurrence.
    fn linked_planned_work(&self, asset: &str, preventive_maintenance_id: &str) -> Vec<PlannedWork> {
        self.plans
            .linked_to(asset)
            .map(|plan| {
                PlannedWork::new(
                    preventive_maintenance_id,
                    &plan.plan_key,
                    periodicity::resolve(&plan.periodicity),
                )
            })
            .collect()
    }

    /// Number of assets with linked plans that already have a schedule.
    pub fn schedules_in_conflict(&self) -> usize {
        self.equipment
            .iter()
            .filter(|eq| self.plans.links_equipment(&eq.key))
            .filter(|eq| self.preventives.for_asset(&eq.key).is_some())
            .count()
    }

    /// Derives preventive schedules from the current plan links.
    ///
    /// Equipment is visited in registry order. Assets without a schedule get
    /// a new one covering all their linked plans, with sequential ids starting
    /// at `max(id_seed, 1 + highest existing id)`. Assets that already have a
    /// schedule follow `policy`. Equipment with no linked plan is ignored.
    pub fn reconcile_bulk(&mut self, id_seed: u64, policy: ConflictPolicy) -> Result<ReconcileStats> {
        check_id_seed(id_seed)?;

        let assets: Vec<String> = self
            .equipment
            .iter()
            .filter(|eq| self.plans.links_equipment(&eq.key))
            .map(|eq| eq.key.clone())
            .collect();

        // Every new schedule needs an id; check the range before creating any
        let unscheduled = assets
            .iter()
            .filter(|asset| self.preventives.for_asset(asset).is_none())
            .count();
        if let Some(extra) = unscheduled.checked_sub(1) {
            self.preventives
                .next_id(id_seed)?
                .checked_add(extra as u64)
                .ok_or_else(ids_exhausted)?;
        }

        let mut stats = ReconcileStats::default();
        for asset in &assets {
            let changed = match self.preventives.for_asset(asset).map(|s| s.id) {
                None => {
                    self.create_linked_schedule(asset, id_seed)?;
                    stats.created += 1;
                    true
                }
                Some(id) => match policy {
                    ConflictPolicy::Skip => {
                        stats.skipped += 1;
                        false
                    }
                    ConflictPolicy::Merge => {
                        let appended = self.merge_linked_plans(asset, id)?;
                        if appended == 0 {
                            stats.skipped += 1;
                        } else {
                            stats.updated += 1;
                        }
                        appended > 0
                    }
                    ConflictPolicy::Replace => {
                        self.replace_linked_plans(asset, id)?;
                        stats.updated += 1;
                        true
                    }
                },
            };
            if changed {
                self.equipment.touch_modified(asset);
            }
        }

        info!(
            "Reconciled preventives with policy {policy}: {} created, {} updated, {} skipped",
            stats.created, stats.updated, stats.skipped
        );
        Ok(stats)
    }

    /// Runs [`Catalog::reconcile_bulk`] with a policy picked through
    /// `confirm`.
    pub fn reconcile_bulk_interactive(
        &mut self,
        id_seed: u64,
        confirm: &mut dyn Confirm,
    ) -> Result<ReconcileStats> {
        let policy = ConflictPolicy::choose(self.schedules_in_conflict(), confirm);
        self.reconcile_bulk(id_seed, policy)
    }

    fn create_linked_schedule(&mut self, asset: &str, id_seed: u64) -> Result<()> {
        let equipment = self.equipment.require(asset)?;
        let id = self.preventives.next_id(id_seed)?;
        let preventive_maintenance_id = format_preventive_id(id);
        let schedule = PreventiveSchedule {
            id,
            planned_work: self.linked_planned_work(asset, &preventive_maintenance_id),
            description: preventive_description(equipment),
            preventive_maintenance_id,
            asset: asset.to_string(),
        };
        debug!("Creating {} for {asset}", schedule.preventive_maintenance_id);
        self.preventives.insert(schedule)?;
        Ok(())
    }

    /// Appends planned work for linked plans missing from the schedule.
    /// Returns how many entries were appended.
    fn merge_linked_plans(&mut self, asset: &str, id: u64) -> Result<usize> {
        let existing = self.preventives.require(id)?;
        let missing: Vec<PlannedWork> = self
            .linked_planned_work(asset, &existing.preventive_maintenance_id)
            .into_iter()
            .filter(|work| !existing.references_plan(&work.maintenance_plan))
            .collect();

        let appended = missing.len();
        if appended > 0 {
            self.preventives.get_mut(id)?.planned_work.extend(missing);
        }
        Ok(appended)
    }

    fn replace_linked_plans(&mut self, asset: &str, id: u64) -> Result<()> {
        let existing = self.preventives.require(id)?;
        let planned_work = self.linked_planned_work(asset, &existing.preventive_maintenance_id);
        self.preventives.get_mut(id)?.planned_work = planned_work;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Merge".parse::<ConflictPolicy>().unwrap(), ConflictPolicy::Merge);
        assert_eq!(" replace ".parse::<ConflictPolicy>().unwrap(), ConflictPolicy::Replace);
        assert!(matches!(
            "overwrite".parse::<ConflictPolicy>(),
            Err(UpkeepError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_choose_without_conflicts_asks_nothing() {
        let mut asked = 0;
        let mut confirm = |_: &str| {
            asked += 1;
            true
        };
        assert_eq!(ConflictPolicy::choose(0, &mut confirm), ConflictPolicy::Skip);
        assert_eq!(asked, 0);
    }

    #[test]
    fn test_choose_prefers_conservative_branch_on_no() {
        assert_eq!(
            ConflictPolicy::choose(2, &mut |_: &str| false),
            ConflictPolicy::Skip
        );

        let mut answers = vec![true, false].into_iter();
        let mut confirm = move |_: &str| answers.next().unwrap_or(false);
        assert_eq!(ConflictPolicy::choose(2, &mut confirm), ConflictPolicy::Merge);

        assert_eq!(
            ConflictPolicy::choose(2, &mut |_: &str| true),
            ConflictPolicy::Replace
        );
    }
}
