//! Operation result types for displaying the outcome of mutations.

use std::fmt;

use crate::models::{OperationPlan, Vehicle};

/// Result of creating a plan.
pub struct CreateResult {
    pub plan: OperationPlan,
}

impl CreateResult {
    pub fn new(plan: OperationPlan) -> Self {
        Self { plan }
    }
}

impl fmt::Display for CreateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created operation with ID: {}", self.plan.id)?;
        writeln!(f)?;
        write!(f, "{}", self.plan)
    }
}

/// Result of editing a plan, listing the fields that changed.
pub struct UpdateResult {
    pub plan: OperationPlan,
    pub changes: Vec<String>,
}

impl UpdateResult {
    pub fn new(plan: OperationPlan) -> Self {
        Self {
            plan,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(plan: OperationPlan, changes: Vec<String>) -> Self {
        Self { plan, changes }
    }
}

impl fmt::Display for UpdateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated operation with ID: {}", self.plan.id)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.plan)
    }
}

/// Result of deleting a plan.
pub struct DeleteResult {
    pub plan: OperationPlan,
}

impl DeleteResult {
    pub fn new(plan: OperationPlan) -> Self {
        Self { plan }
    }
}

impl fmt::Display for DeleteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted operation '{}' (ID: {})",
            self.plan.name, self.plan.id
        )
    }
}

/// Result of a vehicle check-in toggle.
pub struct CheckInResult<'a> {
    pub plan: &'a OperationPlan,
    pub vehicle: &'a Vehicle,
}

impl fmt::Display for CheckInResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.vehicle.arrived {
            "checked in"
        } else {
            "awaiting arrival"
        };
        writeln!(
            f,
            "{} is {state} for '{}' ({}/{} arrived)",
            self.vehicle.id,
            self.plan.name,
            self.plan.arrived_count(),
            self.plan.vehicles.len()
        )
    }
}

/// One-line success or failure message.
pub struct Outcome {
    pub message: String,
    pub success: bool,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{label} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_operations;

    #[test]
    fn test_update_result_lists_changes() {
        let plan = sample_operations().remove(0);
        let output = UpdateResult::with_changes(plan, vec!["radio".to_string()]).to_string();
        assert!(output.starts_with("Updated operation with ID: 1"));
        assert!(output.contains("Changes made:\n- radio"));
    }

    #[test]
    fn test_check_in_result() {
        let plan = sample_operations().remove(2);
        let output = CheckInResult {
            plan: &plan,
            vehicle: &plan.vehicles[0],
        }
        .to_string();
        assert_eq!(
            output,
            "VT-1 is checked in for 'Feira de Artesanato da Afonso Pena' (3/8 arrived)\n"
        );
    }

    #[test]
    fn test_outcome_labels() {
        assert!(Outcome::success("done").to_string().starts_with("Success:"));
        assert!(Outcome::failure("nope").to_string().starts_with("Error:"));
    }
}
