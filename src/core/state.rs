use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::{config::DEFAULT_LINE_LENGTH, dynamics::kinematics::SwingFrame};

/// Positions and velocities of every degree of freedom of the crane.
///
/// Pure value state: hosts may copy it out, store it and put it back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalState {
    /// X: distance of the rail from the centre of the frame.
    pub rail_offset: f64,
    pub rail_velocity: f64,
    /// Y: distance of the cart from the centre of the rail.
    pub cart_offset: f64,
    pub cart_velocity: f64,
    /// R: lift-line length.
    pub line_length: f64,
    pub line_velocity: f64,
    /// Swing in the cart (Y) plane, zero when hanging straight down.
    pub alfa: f64,
    pub alfa_velocity: f64,
    /// Swing in the rail (X) plane, zero when hanging straight down.
    pub beta: f64,
    pub beta_velocity: f64,
}

impl Default for PhysicalState {
    fn default() -> Self {
        Self {
            rail_offset: 0.0,
            rail_velocity: 0.0,
            cart_offset: 0.0,
            cart_velocity: 0.0,
            line_length: DEFAULT_LINE_LENGTH,
            line_velocity: 0.0,
            alfa: 0.0,
            alfa_velocity: 0.0,
            beta: 0.0,
            beta_velocity: 0.0,
        }
    }
}

impl PhysicalState {
    pub fn is_finite(&self) -> bool {
        [
            self.rail_offset,
            self.rail_velocity,
            self.cart_offset,
            self.cart_velocity,
            self.line_length,
            self.line_velocity,
            self.alfa,
            self.alfa_velocity,
            self.beta,
            self.beta_velocity,
        ]
        .iter()
        .all(|value| value.is_finite())
    }

    /// Suspension point of the lift-line on the cart.
    pub fn suspension_point(&self) -> DVec3 {
        DVec3::new(self.rail_offset, self.cart_offset, 0.0)
    }

    /// Forward kinematics of the payload.
    pub fn payload_position(&self) -> DVec3 {
        let frame = SwingFrame::new(self.alfa, self.beta);
        self.suspension_point() + frame.line * self.line_length
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            alfa: self.alfa,
            beta: self.beta,
            rail_offset: self.rail_offset,
            cart_offset: self.cart_offset,
            line_length: self.line_length,
            payload: self.payload_position(),
        }
    }
}

/// Immutable copy of the observable crane geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub alfa: f64,
    pub beta: f64,
    pub rail_offset: f64,
    pub cart_offset: f64,
    pub line_length: f64,
    /// Payload position in frame coordinates (Z up).
    pub payload: DVec3,
}

impl fmt::Display for StateSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "alfa={:.4} beta={:.4} rail={:.4} cart={:.4} line={:.4} payload=({:.4}, {:.4}, {:.4})",
            self.alfa,
            self.beta,
            self.rail_offset,
            self.cart_offset,
            self.line_length,
            self.payload.x,
            self.payload.y,
            self.payload.z
        )
    }
}
