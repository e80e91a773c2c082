//! Operation plan model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{OperationStatus, Vehicle};

/// One planned, ongoing or finished deployment.
///
/// Field names serialize in camelCase; this is the shape stored in the local
/// cache, the shared remote store and exported backups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperationPlan {
    /// Opaque identifier assigned at creation, never changed
    pub id: String,

    /// Event or operation name
    pub name: String,

    /// Inspectorate in charge
    #[serde(default)]
    pub inspectorate: String,

    /// Macro region of the city
    #[serde(default)]
    pub macro_region: String,

    /// Where the deployment happens
    pub location: String,

    /// Event date, `YYYY-MM-DD` for plans created through validation
    pub date: String,

    /// Start time, `HH:MM` for plans created through validation
    pub start_time: String,

    /// General mission objective
    #[serde(default)]
    pub objective: String,

    /// Expected scenario at the location
    #[serde(default)]
    pub scenario: String,

    /// Uniform to be worn
    #[serde(default)]
    pub uniform: String,

    /// Radio channel
    #[serde(default)]
    pub radio: String,

    /// Equipment carried by the team
    #[serde(default)]
    pub equipment: String,

    /// Meeting point before deployment
    #[serde(default)]
    pub meeting_point: String,

    /// Number of agents declared for the operation
    pub agents_count: u32,

    /// Number of vehicles declared; mirrors `vehicles.len()`
    pub vehicles_count: u32,

    /// Free-text list of deployed team members
    #[serde(default)]
    pub deployed_team: String,

    /// Optional photo as an image data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    /// Lifecycle status
    #[serde(default)]
    pub status: OperationStatus,

    /// Name of the responsible party
    #[serde(default)]
    pub responsible: String,

    /// Ordered vehicle checklist
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,

    /// Timestamp when the plan was created (UTC)
    #[serde(default = "Timestamp::now")]
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    #[serde(default = "Timestamp::now")]
    pub updated_at: Timestamp,
}

impl OperationPlan {
    /// Looks up a vehicle by id.
    pub fn vehicle(&self, vehicle_id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == vehicle_id)
    }

    /// Number of vehicles already checked in.
    pub fn arrived_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.arrived).count()
    }

    /// Whether the photo slot is filled.
    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }
}
