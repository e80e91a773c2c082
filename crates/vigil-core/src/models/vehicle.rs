//! Vehicle model tracked within an operation plan.

use serde::{Deserialize, Serialize};

/// Prefix used for generated vehicle identifiers.
pub const VEHICLE_ID_PREFIX: &str = "VT-";

/// One tracked unit within a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vehicle {
    /// Identifier unique within the owning plan (`VT-1`, `VT-2`, ...)
    pub id: String,

    /// Display label, defaults to the id
    pub name: String,

    /// Whether the vehicle has checked in at the meeting point
    #[serde(default)]
    pub arrived: bool,
}

impl Vehicle {
    /// Creates the vehicle at 1-based position `number`, not yet arrived.
    ///
    /// ```rust
    /// use vigil_core::models::Vehicle;
    ///
    /// let vehicle = Vehicle::numbered(3);
    /// assert_eq!(vehicle.id, "VT-3");
    /// assert_eq!(vehicle.name, "VT-3");
    /// assert!(!vehicle.arrived);
    /// ```
    pub fn numbered(number: usize) -> Self {
        let id = format!("{VEHICLE_ID_PREFIX}{number}");
        Self {
            name: id.clone(),
            id,
            arrived: false,
        }
    }

    /// Builds the ordered fleet `VT-1..=VT-count`.
    pub fn fleet(count: u32) -> Vec<Self> {
        (1..=count as usize).map(Self::numbered).collect()
    }
}
