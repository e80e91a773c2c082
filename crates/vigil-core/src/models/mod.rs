//! Data models for operation plans and their vehicles.
//!
//! This module contains the entity shapes shared by every layer: the plan
//! store transitions in [`crate::store`], the persistence backends in
//! [`crate::persistence`] and the sync controller in [`crate::sync`]. Display
//! implementations live in [`crate::display`] to keep presentation out of the
//! data definitions.
//!
//! # Shapes
//!
//! - [`OperationPlan`]: one deployment with schedule, staffing, logistics
//!   fields, a lifecycle [`OperationStatus`] and an ordered [`Vehicle`]
//!   checklist
//! - [`PlanDraft`] / [`PlanPatch`]: validated inputs for creating and editing
//!   plans
//! - [`OperationSummary`]: totals computed over a snapshot
//!
//! # Examples
//!
//! ```rust
//! use vigil_core::models::{OperationStatus, Vehicle};
//!
//! let fleet = Vehicle::fleet(2);
//! assert_eq!(fleet[1].id, "VT-2");
//! assert_eq!(OperationStatus::default(), OperationStatus::Planned);
//! ```

pub mod draft;
pub mod plan;
pub mod status;
pub mod summary;
pub mod vehicle;


pub use draft::{PlanDraft, PlanPatch};
pub use plan::OperationPlan;
pub use status::OperationStatus;
pub use summary::OperationSummary;
pub use vehicle::{Vehicle, VEHICLE_ID_PREFIX};
