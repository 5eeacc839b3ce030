//! Mechanical limits and rest settling applied after every sub-step.

use crate::core::{ModelParameters, PhysicalState};

/// Clamps rail, cart and line into their travel ranges. An axis stopped by
/// a wall loses the velocity component that pushed it there.
pub fn apply_limits(state: &mut PhysicalState, params: &ModelParameters) {
    (state.rail_offset, state.rail_velocity) = params
        .rail_limits
        .clamp(state.rail_offset, state.rail_velocity);
    (state.cart_offset, state.cart_velocity) = params
        .cart_limits
        .clamp(state.cart_offset, state.cart_velocity);
    (state.line_length, state.line_velocity) = params
        .line_limits
        .clamp(state.line_length, state.line_velocity);
}

/// Snaps residual motion below `threshold` to exact rest so a resting
/// crane does not drift through rounding noise.
pub fn settle(state: &mut PhysicalState, threshold: f64) {
    for velocity in [
        &mut state.rail_velocity,
        &mut state.cart_velocity,
        &mut state.line_velocity,
        &mut state.alfa_velocity,
        &mut state.beta_velocity,
    ] {
        if velocity.abs() < threshold {
            *velocity = 0.0;
        }
    }

    if state.alfa_velocity == 0.0 && state.alfa.abs() < threshold {
        state.alfa = 0.0;
    }
    if state.beta_velocity == 0.0 && state.beta.abs() < threshold {
        state.beta = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_clamp_every_axis() {
        let params = ModelParameters::default()
            .with_rail_limits(-1.0, 1.0)
            .with_cart_limits(-2.0, 2.0)
            .with_line_limits(1.0, 3.0);
        let mut state = PhysicalState {
            rail_offset: 1.5,
            rail_velocity: 4.0,
            cart_offset: -2.5,
            cart_velocity: -1.0,
            line_length: 0.5,
            line_velocity: -0.3,
            ..PhysicalState::default()
        };
        apply_limits(&mut state, &params);

        assert_eq!((state.rail_offset, state.rail_velocity), (1.0, 0.0));
        assert_eq!((state.cart_offset, state.cart_velocity), (-2.0, 0.0));
        assert_eq!((state.line_length, state.line_velocity), (1.0, 0.0));
    }

    #[test]
    fn settle_snaps_tiny_motion_only() {
        let mut state = PhysicalState {
            rail_velocity: 1e-12,
            cart_velocity: 0.5,
            alfa: 1e-12,
            alfa_velocity: -1e-13,
            beta: 1e-12,
            beta_velocity: 0.1,
            ..PhysicalState::default()
        };
        settle(&mut state, 1e-9);

        assert_eq!(state.rail_velocity, 0.0);
        assert_eq!(state.cart_velocity, 0.5);
        assert_eq!(state.alfa, 0.0);
        assert_eq!(state.alfa_velocity, 0.0);
        assert_eq!(state.beta, 1e-12);
    }
}
