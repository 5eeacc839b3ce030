//! crane3d – dynamics core of a 3-DOF gantry crane.
//!
//! A rail moves along X, a cart moves along the rail in Y and a payload
//! hangs from the cart on a lift-line of variable length. [`CraneModel`]
//! integrates the crane under actuator forces using one of five
//! [`FormulationKind`]s, clamps it to its mechanical limits and reports a
//! [`StateSnapshot`] of the geometry and payload swing.
//!
//! ```
//! use crane3d::{CraneModel, FormulationKind};
//!
//! let mut model = CraneModel::new();
//! model.params.formulation = FormulationKind::NonLinearConstantLine;
//! let state = model.update_fixed(0.01, 1.0 / 60.0, 20.0, 0.0, 0.0).unwrap();
//! assert!(state.rail_offset > 0.0);
//! ```

pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod fleet;
pub mod model;
pub mod utils;

pub use glam::DVec3;

pub use crate::core::{
    params::{FormulationKind, ModelParameters},
    state::{PhysicalState, StateSnapshot},
    types::{ActuatorForces, AxisLimits},
};
pub use dynamics::{friction::AxisAcceleration, integrator::Integrator, kinematics::SwingFrame};
pub use error::{ConfigurationError, CraneError, CraneResult, DivergedError};
pub use fleet::update_fleet;
pub use model::CraneModel;
