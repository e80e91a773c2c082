//! Collection wrapper types for displaying plan lists.

use std::fmt;

use crate::models::OperationPlan;

/// Newtype wrapper rendering a compact dashboard listing.
///
/// # Examples
///
/// ```rust
/// use vigil_core::{display::PlanList, seed::sample_operations};
///
/// let output = PlanList(sample_operations()).to_string();
/// assert!(output.contains("Final do Campeonato Mineiro"));
/// assert!(PlanList(Vec::new()).to_string().contains("No operations"));
/// ```
pub struct PlanList(pub Vec<OperationPlan>);

impl PlanList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OperationPlan> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a PlanList {
    type Item = &'a OperationPlan;
    type IntoIter = std::slice::Iter<'a, OperationPlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No operations registered.");
        }

        for plan in &self.0 {
            writeln!(f, "## {} ({})", plan.name, plan.status.with_icon())?;
            writeln!(f)?;
            writeln!(f, "- **ID**: {}", plan.id)?;
            writeln!(f, "- **Location**: {}", plan.location)?;
            writeln!(f, "- **Schedule**: {} {}", plan.date, plan.start_time)?;
            writeln!(
                f,
                "- **Resources**: {} agents, {} vehicles ({} checked in)",
                plan.agents_count,
                plan.vehicles_count,
                plan.arrived_count()
            )?;
            writeln!(f)?;
        }
        Ok(())
    }
}
