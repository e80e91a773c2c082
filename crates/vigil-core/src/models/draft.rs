//! Validated inputs accepted by the plan store transitions.
//!
//! These types are only produced by the validation in [`crate::params`], so
//! a [`PlanDraft`] or [`PlanPatch`] in hand means counts, date, time and
//! photo have already been checked.

/// Validated data for a new plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanDraft {
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
    pub agents_count: u32,
    pub vehicles_count: u32,
    pub deployed_team: String,
    pub responsible: String,
    pub photo: Option<String>,
}

/// Validated partial update of a plan's editable fields.
///
/// `None` leaves a field untouched. For `photo`, `Some(None)` clears the
/// current photo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanPatch {
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
    pub agents_count: Option<u32>,
    pub vehicles_count: Option<u32>,
    pub deployed_team: Option<String>,
    pub responsible: Option<String>,
    pub photo: Option<Option<String>>,
}

impl PlanPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Names of the fields this patch changes, in declaration order.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        let mut mark = |set: bool, name: &'static str| {
            if set {
                fields.push(name);
            }
        };
        mark(self.name.is_some(), "name");
        mark(self.inspectorate.is_some(), "inspectorate");
        mark(self.macro_region.is_some(), "macroRegion");
        mark(self.location.is_some(), "location");
        mark(self.date.is_some(), "date");
        mark(self.start_time.is_some(), "startTime");
        mark(self.objective.is_some(), "objective");
        mark(self.scenario.is_some(), "scenario");
        mark(self.uniform.is_some(), "uniform");
        mark(self.radio.is_some(), "radio");
        mark(self.equipment.is_some(), "equipment");
        mark(self.meeting_point.is_some(), "meetingPoint");
        mark(self.agents_count.is_some(), "agentsCount");
        mark(self.vehicles_count.is_some(), "vehiclesCount");
        mark(self.deployed_team.is_some(), "deployedTeam");
        mark(self.responsible.is_some(), "responsible");
        mark(self.photo.is_some(), "photo");
        fields
    }
}
