//! Core value types: parameters, physical state and snapshots.

pub mod params;
pub mod state;
pub mod types;

pub use params::{FormulationKind, ModelParameters};
pub use state::{PhysicalState, StateSnapshot};
pub use types::{ActuatorForces, AxisLimits};
