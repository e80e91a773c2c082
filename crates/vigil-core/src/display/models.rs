//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so the data types carry no
//! presentation logic. All output is markdown for the terminal renderer.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    models::{OperationPlan, OperationStatus, OperationSummary, Vehicle},
    sync::{Notice, NoticeSource, SyncStatus},
};

/// Placeholder for descriptive fields left blank.
pub(crate) const NOT_SET: &str = "N/A";

pub(crate) fn or_not_set(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_SET
    } else {
        value
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.arrived { "x" } else { " " };
        if self.name == self.id {
            writeln!(f, "- [{mark}] {}", self.id)
        } else {
            writeln!(f, "- [{mark}] {} ({})", self.name, self.id)
        }
    }
}

impl fmt::Display for OperationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;

        writeln!(f, "- **ID**: {}", self.id)?;
        writeln!(f, "- **Status**: {}", self.status.with_icon())?;
        writeln!(f, "- **Location**: {}", self.location)?;
        writeln!(f, "- **Schedule**: {} {}", self.date, self.start_time)?;
        writeln!(f, "- **Inspectorate**: {}", or_not_set(&self.inspectorate))?;
        writeln!(f, "- **Macro region**: {}", or_not_set(&self.macro_region))?;
        writeln!(f, "- **Responsible**: {}", or_not_set(&self.responsible))?;
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;

        writeln!(f, "\n## Resources")?;
        writeln!(f)?;
        writeln!(f, "- **Agents**: {}", self.agents_count)?;
        writeln!(f, "- **Vehicles**: {}", self.vehicles_count)?;
        writeln!(f, "- **Uniform**: {}", or_not_set(&self.uniform))?;
        writeln!(f, "- **Radio**: {}", or_not_set(&self.radio))?;
        writeln!(f, "- **Equipment**: {}", or_not_set(&self.equipment))?;
        writeln!(f, "- **Meeting point**: {}", or_not_set(&self.meeting_point))?;
        if self.has_photo() {
            writeln!(f, "- **Photo**: attached")?;
        }

        for (heading, text) in [
            ("Objective", &self.objective),
            ("Scenario", &self.scenario),
            ("Deployed team", &self.deployed_team),
        ] {
            if !text.trim().is_empty() {
                writeln!(f, "\n## {heading}")?;
                writeln!(f)?;
                writeln!(f, "{text}")?;
            }
        }

        if self.vehicles.is_empty() {
            writeln!(f, "\nNo vehicles assigned to this operation.")?;
        } else {
            writeln!(
                f,
                "\n## Vehicle check-in ({}/{})",
                self.arrived_count(),
                self.vehicles.len()
            )?;
            writeln!(f)?;
            for vehicle in &self.vehicles {
                write!(f, "{vehicle}")?;
            }
            if !self.status.allows_check_in() {
                writeln!(f, "\nCheck-in is closed for completed operations.")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for OperationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} operations: {} planned, {} in progress, {} completed",
            self.total, self.planned, self.in_progress, self.completed
        )?;
        writeln!(
            f,
            "{} agents, {} vehicles ({} checked in)",
            self.total_agents, self.total_vehicles, self.vehicles_arrived
        )
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStatus::Idle => f.write_str("Synchronized"),
            SyncStatus::Syncing => f.write_str("Syncing"),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            NoticeSource::LocalCache => "local cache",
            NoticeSource::Remote => "remote",
        };
        write!(f, "[{source}] {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use crate::{models::OperationStatus, seed::sample_operations};

    #[test]
    fn test_plan_display_lists_vehicles() {
        let plan = sample_operations().remove(2);
        let output = plan.to_string();

        assert!(output.starts_with("# Feira de Artesanato da Afonso Pena"));
        assert!(output.contains("➤ Em Andamento"));
        assert!(output.contains("## Vehicle check-in (3/8)"));
        assert!(output.contains("- [x] VT-1"));
        assert!(output.contains("- [ ] VT-8"));
        assert!(output.contains("- **Schedule**: Todo Domingo 08:00"));
    }

    #[test]
    fn test_completed_plan_mentions_locked_check_in() {
        let mut plan = sample_operations().remove(0);
        plan.status = OperationStatus::Completed;
        assert!(plan.to_string().contains("Check-in is closed"));
    }

    #[test]
    fn test_blank_fields_show_placeholder() {
        let mut plan = sample_operations().remove(0);
        plan.meeting_point.clear();
        assert!(plan.to_string().contains("- **Meeting point**: N/A"));
    }
}
