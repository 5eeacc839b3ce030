use serde::{Deserialize, Serialize};

use crate::{
    config::{
        DEFAULT_CART_FRICTION, DEFAULT_CART_LIMITS, DEFAULT_CART_MASS, DEFAULT_GRAVITY,
        DEFAULT_KINETIC_DRY_FRICTION, DEFAULT_LINE_LIMITS, DEFAULT_PAYLOAD_MASS,
        DEFAULT_RAIL_FRICTION, DEFAULT_RAIL_LIMITS, DEFAULT_RAIL_MASS, DEFAULT_REST_THRESHOLD,
        DEFAULT_STATIC_DRY_FRICTION, DEFAULT_SWING_DAMPING, DEFAULT_WINDING_FRICTION,
    },
    core::types::AxisLimits,
    error::ConfigurationError,
};

/// Selects the governing equations used to integrate the crane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FormulationKind {
    /// Small-angle pendulum driven by the cart accelerations. Line held.
    #[default]
    Linear,
    /// Linear model with the payload reaction fed back into the carts.
    Linear2,
    /// Non-linear coupling of rail, cart and swing. Line length held.
    NonLinearConstantLine,
    /// Non-linear coupling of all three actuated axes and both swing angles.
    NonLinearComplete,
    /// `NonLinearComplete` with static/kinetic dry friction on rail and cart.
    NonLinearOriginal,
}

impl FormulationKind {
    pub const ALL: [FormulationKind; 5] = [
        FormulationKind::Linear,
        FormulationKind::Linear2,
        FormulationKind::NonLinearConstantLine,
        FormulationKind::NonLinearComplete,
        FormulationKind::NonLinearOriginal,
    ];

    /// Whether the lift-line length is a dynamic coordinate of this formulation.
    pub fn models_line(self) -> bool {
        matches!(
            self,
            FormulationKind::NonLinearComplete | FormulationKind::NonLinearOriginal
        )
    }
}

/// Tunable physical parameters of the crane.
///
/// Fields are plain public values; hosts may change them between updates.
/// They are validated at the start of every update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    pub formulation: FormulationKind,
    pub payload_mass: f64,
    pub cart_mass: f64,
    pub rail_mass: f64,
    pub gravity: f64,
    pub rail_friction: f64,
    pub cart_friction: f64,
    pub winding_friction: f64,
    /// Static dry friction coefficient of the rail/cart running surfaces.
    pub static_dry_friction: f64,
    /// Kinetic dry friction coefficient of the rail/cart running surfaces.
    pub kinetic_dry_friction: f64,
    pub rail_limits: AxisLimits,
    pub cart_limits: AxisLimits,
    pub line_limits: AxisLimits,
    /// Angular damping of the linear formulations (1/s).
    pub swing_damping: f64,
    pub rest_threshold: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            formulation: FormulationKind::default(),
            payload_mass: DEFAULT_PAYLOAD_MASS,
            cart_mass: DEFAULT_CART_MASS,
            rail_mass: DEFAULT_RAIL_MASS,
            gravity: DEFAULT_GRAVITY,
            rail_friction: DEFAULT_RAIL_FRICTION,
            cart_friction: DEFAULT_CART_FRICTION,
            winding_friction: DEFAULT_WINDING_FRICTION,
            static_dry_friction: DEFAULT_STATIC_DRY_FRICTION,
            kinetic_dry_friction: DEFAULT_KINETIC_DRY_FRICTION,
            rail_limits: AxisLimits::from_array(DEFAULT_RAIL_LIMITS),
            cart_limits: AxisLimits::from_array(DEFAULT_CART_LIMITS),
            line_limits: AxisLimits::from_array(DEFAULT_LINE_LIMITS),
            swing_damping: DEFAULT_SWING_DAMPING,
            rest_threshold: DEFAULT_REST_THRESHOLD,
        }
    }
}

impl ModelParameters {
    pub fn with_formulation(mut self, formulation: FormulationKind) -> Self {
        self.formulation = formulation;
        self
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_rail_limits(mut self, min: f64, max: f64) -> Self {
        self.rail_limits = AxisLimits::new(min, max);
        self
    }

    pub fn with_cart_limits(mut self, min: f64, max: f64) -> Self {
        self.cart_limits = AxisLimits::new(min, max);
        self
    }

    pub fn with_line_limits(mut self, min: f64, max: f64) -> Self {
        self.line_limits = AxisLimits::new(min, max);
        self
    }

    /// Mass moved by the rail actuator: the rail carries the cart.
    pub fn rail_inertia(&self) -> f64 {
        self.rail_mass + self.cart_mass
    }

    /// μ1: payload to cart mass ratio.
    pub fn cart_payload_ratio(&self) -> f64 {
        self.payload_mass / self.cart_mass
    }

    /// μ2: payload to rail-with-cart mass ratio.
    pub fn rail_payload_ratio(&self) -> f64 {
        self.payload_mass / self.rail_inertia()
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (name, value) in [
            ("payload_mass", self.payload_mass),
            ("cart_mass", self.cart_mass),
            ("rail_mass", self.rail_mass),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigurationError::InvalidMass { name, value });
            }
        }

        if !self.gravity.is_finite() {
            return Err(ConfigurationError::InvalidGravity(self.gravity));
        }

        for (name, value) in [
            ("rail_friction", self.rail_friction),
            ("cart_friction", self.cart_friction),
            ("winding_friction", self.winding_friction),
            ("static_dry_friction", self.static_dry_friction),
            ("kinetic_dry_friction", self.kinetic_dry_friction),
            ("swing_damping", self.swing_damping),
            ("rest_threshold", self.rest_threshold),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigurationError::InvalidCoefficient { name, value });
            }
        }

        for (axis, limits) in [
            ("rail", self.rail_limits),
            ("cart", self.cart_limits),
            ("line", self.line_limits),
        ] {
            if !(limits.min.is_finite() && limits.max.is_finite() && limits.min <= limits.max) {
                return Err(ConfigurationError::InvalidLimits {
                    axis,
                    min: limits.min,
                    max: limits.max,
                });
            }
        }

        if self.line_limits.min <= 0.0 {
            return Err(ConfigurationError::NonPositiveLineLimit(
                self.line_limits.min,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ModelParameters::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_mass() {
        let mut params = ModelParameters::default();
        params.rail_mass = 0.0;
        assert_eq!(
            params.validate(),
            Err(ConfigurationError::InvalidMass {
                name: "rail_mass",
                value: 0.0
            })
        );
    }

    #[test]
    fn rejects_inverted_limits() {
        let params = ModelParameters::default().with_cart_limits(2.0, -2.0);
        assert!(matches!(
            params.validate(),
            Err(ConfigurationError::InvalidLimits { axis: "cart", .. })
        ));
    }

    #[test]
    fn rejects_line_limit_touching_zero() {
        let params = ModelParameters::default().with_line_limits(0.0, 10.0);
        assert_eq!(
            params.validate(),
            Err(ConfigurationError::NonPositiveLineLimit(0.0))
        );
    }

    #[test]
    fn rejects_nan_friction() {
        let mut params = ModelParameters::default();
        params.winding_friction = f64::NAN;
        assert!(matches!(
            params.validate(),
            Err(ConfigurationError::InvalidCoefficient {
                name: "winding_friction",
                ..
            })
        ));
    }

    #[test]
    fn mass_ratios_follow_masses() {
        let params = ModelParameters::default();
        assert!((params.cart_payload_ratio() - 1.0 / 1.155).abs() < 1e-12);
        assert!((params.rail_payload_ratio() - 1.0 / 3.355).abs() < 1e-12);
    }

    #[test]
    fn only_complete_models_drive_the_line() {
        let driven: Vec<_> = FormulationKind::ALL
            .into_iter()
            .filter(|kind| kind.models_line())
            .collect();
        assert_eq!(
            driven,
            vec![
                FormulationKind::NonLinearComplete,
                FormulationKind::NonLinearOriginal
            ]
        );
    }
}
