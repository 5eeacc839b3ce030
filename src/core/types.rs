use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` travel range of one actuated axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLimits {
    pub min: f64,
    pub max: f64,
}

impl AxisLimits {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub const fn from_array(limits: [f64; 2]) -> Self {
        Self::new(limits[0], limits[1])
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamps a position into the range and removes the velocity component
    /// pushing it through the wall it hit.
    pub fn clamp(&self, position: f64, velocity: f64) -> (f64, f64) {
        if position < self.min {
            (self.min, velocity.max(0.0))
        } else if position > self.max {
            (self.max, velocity.min(0.0))
        } else {
            (position, velocity)
        }
    }

    /// True when an axis resting on a wall is being pushed into it, i.e. the
    /// wall absorbs `acceleration` and the axis does not move.
    pub fn blocks(&self, position: f64, velocity: f64, acceleration: f64) -> bool {
        (position >= self.max && velocity >= 0.0 && acceleration > 0.0)
            || (position <= self.min && velocity <= 0.0 && acceleration < 0.0)
    }
}

/// Forces applied by the three actuators during an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActuatorForces {
    /// Drives the rail (with the cart) along X.
    pub rail: f64,
    /// Drives the cart along the rail (Y).
    pub cart: f64,
    /// Winds the lift-line in. Negative values pay it out.
    pub line: f64,
}

impl ActuatorForces {
    pub const fn new(rail: f64, cart: f64, line: f64) -> Self {
        Self { rail, cart, line }
    }

    pub fn is_finite(&self) -> bool {
        self.rail.is_finite() && self.cart.is_finite() && self.line.is_finite()
    }
}
