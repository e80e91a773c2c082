//! Aggregate statistics over a plan snapshot.

use serde::{Deserialize, Serialize};

use super::{OperationPlan, OperationStatus};

/// Totals shown at the top of the summary report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperationSummary {
    /// Number of plans in the snapshot
    pub total: usize,

    /// Plans still in the planning stage
    pub planned: usize,

    /// Plans currently deployed
    pub in_progress: usize,

    /// Plans already closed
    pub completed: usize,

    /// Sum of declared agents
    pub total_agents: u64,

    /// Sum of declared vehicles
    pub total_vehicles: u64,

    /// Vehicles checked in across all plans
    pub vehicles_arrived: u64,
}

impl From<&[OperationPlan]> for OperationSummary {
    fn from(plans: &[OperationPlan]) -> Self {
        plans.iter().fold(Self::default(), |mut acc, plan| {
            acc.total += 1;
            match plan.status {
                OperationStatus::Planned => acc.planned += 1,
                OperationStatus::InProgress => acc.in_progress += 1,
                OperationStatus::Completed => acc.completed += 1,
            }
            acc.total_agents += u64::from(plan.agents_count);
            acc.total_vehicles += u64::from(plan.vehicles_count);
            acc.vehicles_arrived += plan.arrived_count() as u64;
            acc
        })
    }
}
