//! Pure plan store transitions.
//!
//! Every function here takes a plan (or a plan list) by reference and
//! returns the next value, leaving the input untouched. The sync controller
//! applies them to its in-memory snapshot; nothing in this module performs
//! I/O.

use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    error::{Result, VigilError},
    models::{OperationPlan, OperationStatus, PlanDraft, PlanPatch, Vehicle},
};

/// Generates a fresh opaque plan identifier.
fn new_plan_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builds a new plan from a validated draft.
///
/// The plan gets a fresh id, starts as [`OperationStatus::Planned`] and
/// carries `draft.vehicles_count` vehicles `VT-1..=VT-N`, none arrived.
///
/// ```rust
/// use vigil_core::{models::{OperationStatus, PlanDraft}, store};
///
/// let draft = PlanDraft {
///     name: "Blitz".to_string(),
///     agents_count: 10,
///     vehicles_count: 2,
///     ..Default::default()
/// };
/// let plan = store::create_plan(&draft);
/// assert_eq!(plan.status, OperationStatus::Planned);
/// assert_eq!(plan.vehicles.len(), 2);
/// assert_eq!(plan.vehicles[1].id, "VT-2");
/// ```
pub fn create_plan(draft: &PlanDraft) -> OperationPlan {
    let now = Timestamp::now();
    OperationPlan {
        id: new_plan_id(),
        name: draft.name.clone(),
        inspectorate: draft.inspectorate.clone(),
        macro_region: draft.macro_region.clone(),
        location: draft.location.clone(),
        date: draft.date.clone(),
        start_time: draft.start_time.clone(),
        objective: draft.objective.clone(),
        scenario: draft.scenario.clone(),
        uniform: draft.uniform.clone(),
        radio: draft.radio.clone(),
        equipment: draft.equipment.clone(),
        meeting_point: draft.meeting_point.clone(),
        agents_count: draft.agents_count,
        vehicles_count: draft.vehicles_count,
        deployed_team: draft.deployed_team.clone(),
        photo: draft.photo.clone(),
        status: OperationStatus::Planned,
        responsible: draft.responsible.clone(),
        vehicles: Vehicle::fleet(draft.vehicles_count),
        created_at: now,
        updated_at: now,
    }
}

/// Returns the plan with its status replaced.
///
/// Re-applying the current status returns the plan unchanged.
///
/// # Errors
///
/// * `VigilError::InvalidTransition` - When the change would move the plan
///   backwards in its lifecycle
pub fn set_status(plan: &OperationPlan, status: OperationStatus) -> Result<OperationPlan> {
    if plan.status == status {
        return Ok(plan.clone());
    }
    if !plan.status.can_transition_to(status) {
        return Err(VigilError::InvalidTransition {
            from: plan.status,
            to: status,
        });
    }

    let mut next = plan.clone();
    next.status = status;
    next.updated_at = Timestamp::now();
    Ok(next)
}

/// Returns the plan with one vehicle's `arrived` flag flipped.
///
/// # Errors
///
/// * `VigilError::CheckInLocked` - When the plan is completed
/// * `VigilError::VehicleNotFound` - When no vehicle has `vehicle_id`
pub fn toggle_vehicle(plan: &OperationPlan, vehicle_id: &str) -> Result<OperationPlan> {
    if !plan.status.allows_check_in() {
        return Err(VigilError::CheckInLocked {
            plan_id: plan.id.clone(),
        });
    }

    let mut next = plan.clone();
    let vehicle = next
        .vehicles
        .iter_mut()
        .find(|v| v.id == vehicle_id)
        .ok_or_else(|| VigilError::VehicleNotFound {
            plan_id: plan.id.clone(),
            vehicle_id: vehicle_id.to_string(),
        })?;
    vehicle.arrived = !vehicle.arrived;
    next.updated_at = Timestamp::now();
    Ok(next)
}

/// Returns the plan with the patch's descriptive fields merged in.
///
/// `id` and `status` are never touched. A new `vehicles_count` resizes the
/// checklist: growing appends fresh `VT-n` entries, shrinking drops entries
/// from the end; surviving vehicles keep their check-in state.
pub fn update_fields(plan: &OperationPlan, patch: &PlanPatch) -> OperationPlan {
    let mut next = plan.clone();

    fn merge(slot: &mut String, value: &Option<String>) {
        if let Some(value) = value {
            slot.clone_from(value);
        }
    }

    merge(&mut next.name, &patch.name);
    merge(&mut next.inspectorate, &patch.inspectorate);
    merge(&mut next.macro_region, &patch.macro_region);
    merge(&mut next.location, &patch.location);
    merge(&mut next.date, &patch.date);
    merge(&mut next.start_time, &patch.start_time);
    merge(&mut next.objective, &patch.objective);
    merge(&mut next.scenario, &patch.scenario);
    merge(&mut next.uniform, &patch.uniform);
    merge(&mut next.radio, &patch.radio);
    merge(&mut next.equipment, &patch.equipment);
    merge(&mut next.meeting_point, &patch.meeting_point);
    merge(&mut next.deployed_team, &patch.deployed_team);
    merge(&mut next.responsible, &patch.responsible);

    if let Some(agents) = patch.agents_count {
        next.agents_count = agents;
    }
    if let Some(photo) = &patch.photo {
        next.photo.clone_from(photo);
    }
    if let Some(count) = patch.vehicles_count {
        resize_vehicles(&mut next, count);
    }

    next.updated_at = Timestamp::now();
    next
}

/// Keeps `vehicles.len() == vehicles_count` after a count edit.
fn resize_vehicles(plan: &mut OperationPlan, count: u32) {
    let target = count as usize;
    if plan.vehicles.len() > target {
        plan.vehicles.truncate(target);
    } else {
        let start = plan.vehicles.len() + 1;
        plan.vehicles
            .extend((start..=target).map(Vehicle::numbered));
    }
    plan.vehicles_count = count;
}

/// Finds the position of a plan in a snapshot.
pub fn position(plans: &[OperationPlan], id: &str) -> Result<usize> {
    plans
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| VigilError::plan_not_found(id))
}

/// Prepends a new plan so the newest plans list first.
pub fn insert_plan(plans: &mut Vec<OperationPlan>, plan: OperationPlan) {
    plans.insert(0, plan);
}

/// Applies `transition` to the plan with `id` in place.
///
/// # Errors
///
/// * `VigilError::PlanNotFound` - When no plan has `id`
/// * Any error returned by `transition`; the snapshot is left unchanged
pub fn replace_plan<F>(plans: &mut [OperationPlan], id: &str, transition: F) -> Result<OperationPlan>
where
    F: FnOnce(&OperationPlan) -> Result<OperationPlan>,
{
    let index = position(plans, id)?;
    let next = transition(&plans[index])?;
    plans[index] = next.clone();
    Ok(next)
}

/// Removes exactly the plan with `id`, preserving the order of the rest.
///
/// # Errors
///
/// * `VigilError::PlanNotFound` - When no plan has `id`
pub fn remove_plan(plans: &mut Vec<OperationPlan>, id: &str) -> Result<OperationPlan> {
    let index = position(plans, id)?;
    Ok(plans.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(vehicles: u32) -> PlanDraft {
        PlanDraft {
            name: "Blitz".to_string(),
            location: "Praça Sete".to_string(),
            date: "2024-09-01".to_string(),
            start_time: "16:00".to_string(),
            agents_count: 10,
            vehicles_count: vehicles,
            ..Default::default()
        }
    }

    #[test]
    fn test_create_plan_synthesizes_vehicles() {
        for n in [0u32, 1, 2, 15] {
            let plan = create_plan(&draft(n));
            assert_eq!(plan.status, OperationStatus::Planned);
            assert_eq!(plan.vehicles.len(), n as usize);
            assert_eq!(plan.vehicles_count, n);
            for (i, vehicle) in plan.vehicles.iter().enumerate() {
                assert_eq!(vehicle.id, format!("VT-{}", i + 1));
                assert_eq!(vehicle.name, vehicle.id);
                assert!(!vehicle.arrived);
            }
        }
    }

    #[test]
    fn test_create_plan_assigns_unique_ids() {
        let a = create_plan(&draft(1));
        let b = create_plan(&draft(1));
        assert_ne!(a.id, b.id);
        assert!(!a.id.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_value() {
        let plan = create_plan(&draft(2));
        let once = toggle_vehicle(&plan, "VT-1").unwrap();
        assert!(once.vehicle("VT-1").unwrap().arrived);
        assert!(!once.vehicle("VT-2").unwrap().arrived);

        let twice = toggle_vehicle(&once, "VT-1").unwrap();
        assert_eq!(twice.vehicles, plan.vehicles);
    }

    #[test]
    fn test_toggle_locked_when_completed() {
        let plan = create_plan(&draft(2));
        let arrived = toggle_vehicle(&plan, "VT-2").unwrap();
        let done = set_status(&arrived, OperationStatus::Completed).unwrap();

        let err = toggle_vehicle(&done, "VT-2").unwrap_err();
        assert!(matches!(err, VigilError::CheckInLocked { .. }));
        assert!(done.vehicle("VT-2").unwrap().arrived);
    }

    #[test]
    fn test_toggle_unknown_vehicle() {
        let plan = create_plan(&draft(2));
        let err = toggle_vehicle(&plan, "VT-3").unwrap_err();
        assert!(matches!(
            err,
            VigilError::VehicleNotFound { ref vehicle_id, .. } if vehicle_id == "VT-3"
        ));
    }

    #[test]
    fn test_set_status_forward_and_idempotent() {
        let plan = create_plan(&draft(0));
        let running = set_status(&plan, OperationStatus::InProgress).unwrap();
        assert_eq!(running.status, OperationStatus::InProgress);

        let same = set_status(&running, OperationStatus::InProgress).unwrap();
        assert_eq!(same, running);

        let skipped = set_status(&plan, OperationStatus::Completed).unwrap();
        assert_eq!(skipped.status, OperationStatus::Completed);
    }

    #[test]
    fn test_set_status_rejects_backwards() {
        let plan = create_plan(&draft(0));
        let done = set_status(&plan, OperationStatus::Completed).unwrap();
        let err = set_status(&done, OperationStatus::Planned).unwrap_err();
        assert!(matches!(
            err,
            VigilError::InvalidTransition {
                from: OperationStatus::Completed,
                to: OperationStatus::Planned
            }
        ));
    }

    #[test]
    fn test_update_fields_merges_without_touching_identity() {
        let plan = create_plan(&draft(2));
        let patch = PlanPatch {
            name: Some("Blitz Noturna".to_string()),
            radio: Some("Canal 4".to_string()),
            photo: Some(Some("data:image/png;base64,AA==".to_string())),
            ..Default::default()
        };

        let next = update_fields(&plan, &patch);
        assert_eq!(next.name, "Blitz Noturna");
        assert_eq!(next.radio, "Canal 4");
        assert!(next.has_photo());
        assert_eq!(next.id, plan.id);
        assert_eq!(next.status, plan.status);
        assert_eq!(next.vehicles, plan.vehicles);
        assert_eq!(next.location, plan.location);

        let cleared = update_fields(
            &next,
            &PlanPatch {
                photo: Some(None),
                ..Default::default()
            },
        );
        assert!(!cleared.has_photo());
    }

    #[test]
    fn test_update_fields_resizes_vehicle_list() {
        let plan = create_plan(&draft(2));
        let plan = toggle_vehicle(&plan, "VT-2").unwrap();

        let grown = update_fields(
            &plan,
            &PlanPatch {
                vehicles_count: Some(4),
                ..Default::default()
            },
        );
        assert_eq!(grown.vehicles_count, 4);
        let ids: Vec<&str> = grown.vehicles.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["VT-1", "VT-2", "VT-3", "VT-4"]);
        assert!(grown.vehicle("VT-2").unwrap().arrived);
        assert!(!grown.vehicle("VT-4").unwrap().arrived);

        let shrunk = update_fields(
            &grown,
            &PlanPatch {
                vehicles_count: Some(1),
                ..Default::default()
            },
        );
        assert_eq!(shrunk.vehicles_count, 1);
        assert_eq!(shrunk.vehicles.len(), 1);
        assert_eq!(shrunk.vehicles[0].id, "VT-1");
    }

    #[test]
    fn test_remove_plan_leaves_others_untouched() {
        let a = create_plan(&draft(1));
        let b = toggle_vehicle(&create_plan(&draft(2)), "VT-1").unwrap();
        let c = create_plan(&draft(3));
        let mut plans = vec![a.clone(), b.clone(), c.clone()];

        let removed = remove_plan(&mut plans, &b.id).unwrap();
        assert_eq!(removed, b);
        assert_eq!(plans, vec![a, c]);

        assert!(matches!(
            remove_plan(&mut plans, &b.id),
            Err(VigilError::PlanNotFound { .. })
        ));
    }

    #[test]
    fn test_replace_plan_keeps_snapshot_on_error() {
        let plan = set_status(&create_plan(&draft(1)), OperationStatus::Completed).unwrap();
        let mut plans = vec![plan.clone()];

        let result = replace_plan(&mut plans, &plan.id, |p| toggle_vehicle(p, "VT-1"));
        assert!(result.is_err());
        assert_eq!(plans, vec![plan]);
    }

    #[test]
    fn test_insert_plan_prepends() {
        let a = create_plan(&draft(0));
        let b = create_plan(&draft(0));
        let mut plans = vec![a.clone()];
        insert_plan(&mut plans, b.clone());
        assert_eq!(plans, vec![b, a]);
    }
}
