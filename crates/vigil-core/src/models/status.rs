//! Lifecycle status of an operation plan.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of operation statuses.
///
/// Serialized with the labels used on printed documents and in the shared
/// store, so payloads written by older clients keep loading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum OperationStatus {
    /// Scheduled but not started
    #[default]
    #[serde(rename = "Planejado")]
    Planned,

    /// Deployment is under way
    #[serde(rename = "Em Andamento")]
    InProgress,

    /// Deployment finished; vehicle check-in is locked
    #[serde(rename = "Concluído")]
    Completed,
}

impl FromStr for OperationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "planejado" | "planned" => Ok(OperationStatus::Planned),
            "em andamento" | "in-progress" | "in_progress" | "inprogress" => {
                Ok(OperationStatus::InProgress)
            }
            "concluído" | "concluido" | "completed" | "done" => Ok(OperationStatus::Completed),
            _ => Err(format!("Invalid operation status: {s}")),
        }
    }
}

impl OperationStatus {
    /// Label shown to users and stored in payloads.
    pub fn label(&self) -> &'static str {
        match self {
            OperationStatus::Planned => "Planejado",
            OperationStatus::InProgress => "Em Andamento",
            OperationStatus::Completed => "Concluído",
        }
    }

    /// Whether a plan in this status may move to `next`.
    ///
    /// Status only moves forward. Skipping `InProgress` is allowed and
    /// re-applying the current status is accepted as a no-op.
    ///
    /// ```rust
    /// use vigil_core::models::OperationStatus;
    ///
    /// assert!(OperationStatus::Planned.can_transition_to(OperationStatus::Completed));
    /// assert!(OperationStatus::InProgress.can_transition_to(OperationStatus::InProgress));
    /// assert!(!OperationStatus::Completed.can_transition_to(OperationStatus::Planned));
    /// ```
    pub fn can_transition_to(&self, next: OperationStatus) -> bool {
        next >= *self
    }

    /// Whether vehicle check-in toggles are still accepted.
    pub fn allows_check_in(&self) -> bool {
        *self != OperationStatus::Completed
    }

    /// Get status with a consistent marker for list display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            OperationStatus::Planned => "○ Planejado",
            OperationStatus::InProgress => "➤ Em Andamento",
            OperationStatus::Completed => "✓ Concluído",
        }
    }
}
