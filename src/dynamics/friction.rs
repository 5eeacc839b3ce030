//! Per-axis actuator accelerations with viscous and dry friction.
//!
//! Every actuated axis reduces to three scalars each sub-step: the driving
//! acceleration from the applied force, the friction acceleration opposing
//! motion and their difference. Friction is never allowed to push a slow
//! axis through zero velocity on its own.

use crate::config::STICTION_VELOCITY;

/// Driving, friction and net acceleration of one actuated axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisAcceleration {
    pub driving: f64,
    pub friction: f64,
    pub net: f64,
}

impl AxisAcceleration {
    pub const ZERO: Self = Self {
        driving: 0.0,
        friction: 0.0,
        net: 0.0,
    };

    fn from_parts(driving: f64, friction: f64) -> Self {
        Self {
            driving,
            friction,
            net: driving - friction,
        }
    }

    /// Applied force against viscous friction `coefficient · velocity`.
    pub fn viscous(force: f64, inertia: f64, coefficient: f64, velocity: f64, dt: f64) -> Self {
        let driving = force / inertia;
        let friction = limit_to_velocity(coefficient * velocity / inertia, velocity, dt);
        Self::from_parts(driving, friction)
    }

    /// Applied force against viscous plus Coulomb dry friction with static
    /// breakaway.
    ///
    /// Only `force` is turned into driving acceleration; the tangential part
    /// of `load` is accelerated by the formulation itself. A stuck axis still
    /// holds both until their sum exceeds the breakaway force.
    pub fn with_dry_friction(
        force: f64,
        inertia: f64,
        coefficient: f64,
        velocity: f64,
        dt: f64,
        dry: DryFriction,
        load: SurfaceLoad,
    ) -> Self {
        let driving = force / inertia;
        let viscous = coefficient * velocity / inertia;
        let normal_load = load.normal.max(0.0);

        let friction = if velocity.abs() < STICTION_VELOCITY {
            let dry_force = dry.static_force(force + load.tangential, normal_load);
            dry_force / inertia + limit_to_velocity(viscous, velocity, dt)
        } else {
            let kinetic = dry.kinetic_coefficient * normal_load * velocity.signum() / inertia;
            limit_to_velocity(kinetic + viscous, velocity, dt)
        };
        Self::from_parts(driving, friction)
    }
}

/// Forces the lift-line adds on a running surface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceLoad {
    /// Presses the surfaces together: own weight plus the vertical pull of the line.
    pub normal: f64,
    /// Pull of the line along the axis.
    pub tangential: f64,
}

impl SurfaceLoad {
    pub fn new(normal: f64, tangential: f64) -> Self {
        Self { normal, tangential }
    }
}

/// Static and kinetic Coulomb coefficients of a sliding contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DryFriction {
    pub static_coefficient: f64,
    pub kinetic_coefficient: f64,
}

impl DryFriction {
    pub fn new(static_coefficient: f64, kinetic_coefficient: f64) -> Self {
        Self {
            static_coefficient,
            kinetic_coefficient,
        }
    }

    /// Friction force of a stuck axis. Cancels the applied force while it
    /// stays under the breakaway threshold, then drops to the kinetic level.
    pub fn static_force(&self, applied: f64, normal_load: f64) -> f64 {
        if applied.abs() <= self.static_coefficient * normal_load {
            applied
        } else {
            self.kinetic_coefficient * normal_load * applied.signum()
        }
    }
}

/// Caps a friction acceleration so that over `dt` it can at most bring
/// `velocity` to rest.
fn limit_to_velocity(friction: f64, velocity: f64, dt: f64) -> f64 {
    let max = velocity.abs() / dt;
    if friction > max {
        max
    } else if friction < -max {
        -max
    } else {
        friction
    }
}
