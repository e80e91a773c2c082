//! Parameter structures for vigil operations
//!
//! This module contains the raw input structures that presentation layers
//! (the CLI today) fill from user input. They carry free-form values exactly
//! as typed: counts, dates and times are strings. Each structure validates
//! itself into a typed value before anything reaches the plan store, so
//! malformed input is rejected synchronously and never reaches persistence.
//!
//! ## Architecture: Parameter Wrapper Pattern
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │ Validated Types │
//! │  (clap derives) │───▶│  (raw strings)  │───▶│ (PlanDraft, ..) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Interface layers convert their framework-specific argument structs into
//! these params via `From`, and the core converts params into validated types
//! via `TryFrom` (or the equivalent `validate()` methods).

use std::str::FromStr;

use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, VigilError},
    models::{OperationStatus, PlanDraft, PlanPatch},
    photo::validate_photo,
};

/// Upper bound on vehicles tracked by a single plan.
pub const MAX_VEHICLES: u32 = 500;

/// Default uniform suggested for new plans.
pub const DEFAULT_UNIFORM: &str = "Uniforme Operacional";
/// Default radio channel suggested for new plans.
pub const DEFAULT_RADIO: &str = "Rede Operacional (153)";
/// Default equipment suggested for new plans.
pub const DEFAULT_EQUIPMENT: &str = "HT, Colete Balístico, Espargidor";
/// Default macro region suggested for new plans.
pub const DEFAULT_MACRO_REGION: &str = "Macro 1";

/// Generic parameters for operations requiring just a plan ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanId {
    /// The ID of the plan to operate on
    pub id: String,
}

/// Parameters for creating a new plan.
///
/// Counts, date and time are kept as the raw strings a form provides and are
/// parsed by [`CreatePlan::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlan {
    pub name: String,
    pub inspectorate: String,
    pub macro_region: String,
    pub location: String,
    pub date: String,
    pub start_time: String,
    pub objective: String,
    pub scenario: String,
    pub uniform: String,
    pub radio: String,
    pub equipment: String,
    pub meeting_point: String,
    pub agents_count: String,
    pub vehicles_count: String,
    pub deployed_team: String,
    pub responsible: String,
    /// Optional photo as an image data URL
    pub photo: Option<String>,
}

impl Default for CreatePlan {
    fn default() -> Self {
        Self {
            name: String::new(),
            inspectorate: String::new(),
            macro_region: DEFAULT_MACRO_REGION.to_string(),
            location: String::new(),
            date: String::new(),
            start_time: String::new(),
            objective: String::new(),
            scenario: String::new(),
            uniform: DEFAULT_UNIFORM.to_string(),
            radio: DEFAULT_RADIO.to_string(),
            equipment: DEFAULT_EQUIPMENT.to_string(),
            meeting_point: String::new(),
            agents_count: "10".to_string(),
            vehicles_count: "2".to_string(),
            deployed_team: String::new(),
            responsible: String::new(),
            photo: None,
        }
    }
}

impl CreatePlan {
    /// Validate creation input and produce a typed draft.
    ///
    /// # Errors
    ///
    /// * `VigilError::InvalidInput` - When name or location is blank
    /// * `VigilError::InvalidInput` - When date or start time is malformed
    /// * `VigilError::InvalidInput` - When a count is not a non-negative
    ///   integer, or the vehicle count exceeds [`MAX_VEHICLES`]
    /// * `VigilError::InvalidInput` - When the photo is not a bounded image
    ///   data URL
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vigil_core::params::CreatePlan;
    ///
    /// let params = CreatePlan {
    ///     name: "Blitz".to_string(),
    ///     location: "Praça Sete".to_string(),
    ///     date: "2024-09-01".to_string(),
    ///     start_time: "7:30".to_string(),
    ///     agents_count: "10".to_string(),
    ///     vehicles_count: "2".to_string(),
    ///     ..Default::default()
    /// };
    /// let draft = params.validate()?;
    /// assert_eq!(draft.vehicles_count, 2);
    /// assert_eq!(draft.start_time, "07:30");
    ///
    /// let bad = CreatePlan {
    ///     vehicles_count: "-1".to_string(),
    ///     ..params
    /// };
    /// assert!(bad.validate().is_err());
    /// # Ok::<(), vigil_core::VigilError>(())
    /// ```
    pub fn validate(&self) -> Result<PlanDraft> {
        if let Some(photo) = &self.photo {
            validate_photo(photo)?;
        }

        Ok(PlanDraft {
            name: required_text("name", &self.name)?,
            inspectorate: self.inspectorate.trim().to_string(),
            macro_region: self.macro_region.trim().to_string(),
            location: required_text("location", &self.location)?,
            date: parse_date(&self.date)?,
            start_time: parse_time(&self.start_time)?,
            objective: self.objective.trim().to_string(),
            scenario: self.scenario.trim().to_string(),
            uniform: self.uniform.trim().to_string(),
            radio: self.radio.trim().to_string(),
            equipment: self.equipment.trim().to_string(),
            meeting_point: self.meeting_point.trim().to_string(),
            agents_count: parse_count("agentsCount", &self.agents_count)?,
            vehicles_count: parse_vehicle_count(&self.vehicles_count)?,
            deployed_team: self.deployed_team.trim().to_string(),
            responsible: self.responsible.trim().to_string(),
            photo: self.photo.clone(),
        })
    }
}

impl TryFrom<&CreatePlan> for PlanDraft {
    type Error = VigilError;

    fn try_from(params: &CreatePlan) -> Result<Self> {
        params.validate()
    }
}

/// Parameters for a partial update of a plan's editable fields.
///
/// Only fields that are `Some` are validated and applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlan {
    /// Plan ID to update (required)
    pub id: String,
    pub name: Option<String>,
    pub inspectorate: Option<String>,
    pub macro_region: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub objective: Option<String>,
    pub scenario: Option<String>,
    pub uniform: Option<String>,
    pub radio: Option<String>,
    pub equipment: Option<String>,
    pub meeting_point: Option<String>,
    pub agents_count: Option<String>,
    pub vehicles_count: Option<String>,
    pub deployed_team: Option<String>,
    pub responsible: Option<String>,
    /// New photo as an image data URL
    pub photo: Option<String>,
    /// Remove the current photo; ignored when `photo` is set
    #[serde(default)]
    pub clear_photo: bool,
}

impl UpdatePlan {
    /// Validate update input and produce a typed patch.
    ///
    /// # Errors
    ///
    /// * `VigilError::InvalidInput` - When any provided field fails the same
    ///   checks applied at creation
    /// * `VigilError::InvalidInput` - When the update changes nothing
    pub fn validate(&self) -> Result<PlanPatch> {
        let photo = match (&self.photo, self.clear_photo) {
            (Some(photo), _) => {
                validate_photo(photo)?;
                Some(Some(photo.clone()))
            }
            (None, true) => Some(None),
            (None, false) => None,
        };

        let patch = PlanPatch {
            name: self
                .name
                .as_deref()
                .map(|v| required_text("name", v))
                .transpose()?,
            inspectorate: trimmed(&self.inspectorate),
            macro_region: trimmed(&self.macro_region),
            location: self
                .location
                .as_deref()
                .map(|v| required_text("location", v))
                .transpose()?,
            date: self.date.as_deref().map(parse_date).transpose()?,
            start_time: self.start_time.as_deref().map(parse_time).transpose()?,
            objective: trimmed(&self.objective),
            scenario: trimmed(&self.scenario),
            uniform: trimmed(&self.uniform),
            radio: trimmed(&self.radio),
            equipment: trimmed(&self.equipment),
            meeting_point: trimmed(&self.meeting_point),
            agents_count: self
                .agents_count
                .as_deref()
                .map(|v| parse_count("agentsCount", v))
                .transpose()?,
            vehicles_count: self
                .vehicles_count
                .as_deref()
                .map(parse_vehicle_count)
                .transpose()?,
            deployed_team: trimmed(&self.deployed_team),
            responsible: trimmed(&self.responsible),
            photo,
        };

        if patch.is_empty() {
            return Err(VigilError::invalid_input("update")
                .with_reason("No fields to update. Provide at least one field to change."));
        }

        Ok(patch)
    }
}

impl TryFrom<&UpdatePlan> for PlanPatch {
    type Error = VigilError;

    fn try_from(params: &UpdatePlan) -> Result<Self> {
        params.validate()
    }
}

/// Parameters for changing a plan's lifecycle status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetStatus {
    /// Plan ID to update
    pub id: String,
    /// Status label or alias ('Planejado', 'in-progress', 'completed', ...)
    pub status: String,
}

impl SetStatus {
    /// Parse the requested status.
    ///
    /// # Errors
    ///
    /// * `VigilError::InvalidInput` - When the status string is not recognized
    pub fn validate(&self) -> Result<OperationStatus> {
        OperationStatus::from_str(&self.status).map_err(|_| {
            VigilError::invalid_input("status").with_reason(format!(
                "Invalid status: {}. Must be 'planned', 'in-progress' or 'completed'",
                self.status
            ))
        })
    }
}

/// Parameters for flipping a vehicle's check-in flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToggleVehicle {
    /// Plan owning the vehicle
    pub plan_id: String,
    /// Vehicle identifier within the plan (e.g. `VT-1`)
    pub vehicle_id: String,
}

/// Parameters for permanently deleting a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletePlan {
    /// Plan ID to delete
    pub id: String,
    /// Explicit confirmation; deletion is refused without it
    #[serde(default)]
    pub confirmed: bool,
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value.as_deref().map(|v| v.trim().to_string())
}

fn required_text(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(VigilError::invalid_input(field).with_reason("Value is required"));
    }
    Ok(value.to_string())
}

/// Parse a non-negative integer count.
pub fn parse_count(field: &str, raw: &str) -> Result<u32> {
    let raw = raw.trim();
    raw.parse::<u32>().map_err(|_| {
        VigilError::invalid_input(field)
            .with_reason(format!("'{raw}' is not a non-negative integer"))
    })
}

fn parse_vehicle_count(raw: &str) -> Result<u32> {
    let count = parse_count("vehiclesCount", raw)?;
    if count > MAX_VEHICLES {
        return Err(VigilError::invalid_input("vehiclesCount")
            .with_reason(format!("At most {MAX_VEHICLES} vehicles can be tracked per plan")));
    }
    Ok(count)
}

/// Parse a calendar date and normalize it to `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Result<String> {
    let raw = raw.trim();
    raw.parse::<Date>()
        .map(|date| date.to_string())
        .map_err(|e| {
            VigilError::invalid_input("date")
                .with_reason(format!("'{raw}' is not a valid date (YYYY-MM-DD): {e}"))
        })
}

/// Parse a time of day and normalize it to `HH:MM`.
pub fn parse_time(raw: &str) -> Result<String> {
    let raw = raw.trim();
    // Accept the single-digit hours a time picker may omit padding for.
    let padded = match raw.split_once(':') {
        Some((hour, _)) if hour.len() == 1 => format!("0{raw}"),
        _ => raw.to_string(),
    };
    padded
        .parse::<Time>()
        .map(|time| time.strftime("%H:%M").to_string())
        .map_err(|e| {
            VigilError::invalid_input("startTime")
                .with_reason(format!("'{raw}' is not a valid time (HH:MM): {e}"))
        })
}
