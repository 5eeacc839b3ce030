//! Crane dynamics: actuator friction, swing kinematics, the five
//! formulations, fixed-step integration and limit enforcement.

pub mod formulation;
pub mod friction;
pub mod integrator;
pub mod kinematics;
pub mod limits;

pub use formulation::{Accelerations, AxisInputs, WallStops};
pub use friction::{AxisAcceleration, DryFriction, SurfaceLoad};
pub use integrator::{Integrator, TimeBank};
pub use kinematics::SwingFrame;
