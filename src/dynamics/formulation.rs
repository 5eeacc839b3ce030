//! The five governing-equation sets of the crane.
//!
//! All formulations share one contract: given the current state and the
//! per-axis accelerations of the actuators they return the second
//! derivatives of every coordinate. The non-linear ones follow from
//! Newton's law for a point-mass payload hanging from a moving suspension
//! point, resolved in the [`SwingFrame`]:
//!
//! ```text
//! α̈ = −(g sin α cos β + c̈·e_α + 2 Ṙ α̇) / R − β̇² sin α cos α
//! β̈ = −(g sin β + c̈·e_β + 2 Ṙ β̇ cos α) / (R cos α) + 2 α̇ β̇ tan α
//! R̈ = g cos α cos β + R (α̇² + β̇² cos² α) − c̈·u − S / m
//! ```
//!
//! where `c̈ = (Ẍ, Ÿ, 0)` is the cart acceleration and `S` the line tension,
//! which in turn pulls the rail and cart: `Ẍ = N_rail + S u_x / (M_rail + M_cart)`,
//! `Ÿ = N_cart + S u_y / M_cart`.
//!
//! A rail or cart pressed against one of its walls does not move, so its
//! acceleration is zero for the swing equations as well.

use glam::DVec3;

use crate::{
    core::{FormulationKind, ModelParameters, PhysicalState},
    dynamics::{friction::AxisAcceleration, kinematics::SwingFrame},
};

/// Net actuator accelerations of the three axes for one sub-step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisInputs {
    pub rail: AxisAcceleration,
    pub cart: AxisAcceleration,
    /// Acceleration of the winch in the winding direction (`−Ṙ` positive).
    pub line: AxisAcceleration,
}

/// Second time derivatives of every coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accelerations {
    pub rail: f64,
    pub cart: f64,
    pub line: f64,
    pub alfa: f64,
    pub beta: f64,
}

/// Axes held still by a wall during the current sub-step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallStops {
    pub rail: bool,
    pub cart: bool,
}

impl WallStops {
    /// Axes sitting on a wall whose acceleration would push them into it.
    pub fn detect(state: &PhysicalState, params: &ModelParameters, rail: f64, cart: f64) -> Self {
        Self {
            rail: params
                .rail_limits
                .blocks(state.rail_offset, state.rail_velocity, rail),
            cart: params
                .cart_limits
                .blocks(state.cart_offset, state.cart_velocity, cart),
        }
    }

    pub fn any(&self) -> bool {
        self.rail || self.cart
    }

    fn apply(&self, rail: f64, cart: f64) -> (f64, f64) {
        (
            if self.rail { 0.0 } else { rail },
            if self.cart { 0.0 } else { cart },
        )
    }
}

/// Evaluates the selected formulation.
pub fn accelerations(
    kind: FormulationKind,
    state: &PhysicalState,
    params: &ModelParameters,
    inputs: &AxisInputs,
) -> Accelerations {
    match kind {
        FormulationKind::Linear => linear(state, params, inputs),
        FormulationKind::Linear2 => linear_coupled(state, params, inputs),
        FormulationKind::NonLinearConstantLine => non_linear_constant_line(state, params, inputs),
        // Original differs only in its rail/cart friction, already folded into `inputs`.
        FormulationKind::NonLinearComplete | FormulationKind::NonLinearOriginal => {
            non_linear_complete(state, params, inputs)
        }
    }
}

/// Line tension per unit payload mass at the current state, as used by
/// the selected formulation. Drives the normal load of dry friction.
pub fn specific_tension(
    kind: FormulationKind,
    state: &PhysicalState,
    params: &ModelParameters,
    inputs: &AxisInputs,
) -> f64 {
    match kind {
        FormulationKind::Linear | FormulationKind::Linear2 => params.gravity,
        FormulationKind::NonLinearConstantLine => {
            let frame = SwingFrame::new(state.alfa, state.beta);
            solve_constant_line(&frame, state, params, inputs).0
        }
        FormulationKind::NonLinearComplete | FormulationKind::NonLinearOriginal => {
            inputs.line.net
        }
    }
}

fn linear(state: &PhysicalState, params: &ModelParameters, inputs: &AxisInputs) -> Accelerations {
    let (rail, cart) = stop_at_walls(state, params, inputs.rail.net, inputs.cart.net);
    linear_swing(state, params, rail, cart)
}

/// Linearized tension `S ≈ m g` acting along `u ≈ (β, α, −1)`.
fn linear_coupled(
    state: &PhysicalState,
    params: &ModelParameters,
    inputs: &AxisInputs,
) -> Accelerations {
    let g = params.gravity;
    let rail = inputs.rail.net + params.rail_payload_ratio() * g * state.beta;
    let cart = inputs.cart.net + params.cart_payload_ratio() * g * state.alfa;
    let (rail, cart) = stop_at_walls(state, params, rail, cart);
    linear_swing(state, params, rail, cart)
}

fn linear_swing(
    state: &PhysicalState,
    params: &ModelParameters,
    rail: f64,
    cart: f64,
) -> Accelerations {
    let g = params.gravity;
    let r = state.line_length;
    let damping = params.swing_damping;
    Accelerations {
        rail,
        cart,
        line: 0.0,
        alfa: -(g * state.alfa + cart) / r - damping * state.alfa_velocity,
        beta: -(g * state.beta + rail) / r - damping * state.beta_velocity,
    }
}

fn non_linear_constant_line(
    state: &PhysicalState,
    params: &ModelParameters,
    inputs: &AxisInputs,
) -> Accelerations {
    let frame = SwingFrame::new(state.alfa, state.beta);
    let (_, rail, cart) = solve_constant_line(&frame, state, params, inputs);
    let (alfa, beta) = swing(&frame, state, params.gravity, rail, cart, 0.0);
    Accelerations {
        rail,
        cart,
        line: 0.0,
        alfa,
        beta,
    }
}

fn non_linear_complete(
    state: &PhysicalState,
    params: &ModelParameters,
    inputs: &AxisInputs,
) -> Accelerations {
    let frame = SwingFrame::new(state.alfa, state.beta);
    let tension = inputs.line.net;
    let rail = inputs.rail.net + params.rail_payload_ratio() * tension * frame.line.x;
    let cart = inputs.cart.net + params.cart_payload_ratio() * tension * frame.line.y;
    let (rail, cart) = stop_at_walls(state, params, rail, cart);
    let cart_accel = DVec3::new(rail, cart, 0.0);
    let line = radial_load(&frame, state, params.gravity) - cart_accel.dot(frame.line) - tension;
    let (alfa, beta) = swing(
        &frame,
        state,
        params.gravity,
        rail,
        cart,
        state.line_velocity,
    );
    Accelerations {
        rail,
        cart,
        line,
        alfa,
        beta,
    }
}

/// Gravity plus centripetal acceleration along the line, `Λ`.
fn radial_load(frame: &SwingFrame, state: &PhysicalState, g: f64) -> f64 {
    let beta_rate = state.beta_velocity * frame.cos_alfa;
    g * frame.vertical_load_factor()
        + state.line_length * (state.alfa_velocity.powi(2) + beta_rate.powi(2))
}

fn stop_at_walls(
    state: &PhysicalState,
    params: &ModelParameters,
    rail: f64,
    cart: f64,
) -> (f64, f64) {
    WallStops::detect(state, params, rail, cart).apply(rail, cart)
}

/// Tension per unit payload mass and the rail and cart accelerations of a
/// fixed-length line. Axes that would run into a wall are re-solved as
/// fixed.
fn solve_constant_line(
    frame: &SwingFrame,
    state: &PhysicalState,
    params: &ModelParameters,
    inputs: &AxisInputs,
) -> (f64, f64, f64) {
    let free = constant_line_reaction(frame, state, params, inputs, WallStops::default());
    let stops = WallStops::detect(state, params, free.1, free.2);
    if stops.any() {
        constant_line_reaction(frame, state, params, inputs, stops)
    } else {
        free
    }
}

/// Reaction tension that keeps the line taut, solved together with the
/// accelerations it causes on the axes that are free to move.
fn constant_line_reaction(
    frame: &SwingFrame,
    state: &PhysicalState,
    params: &ModelParameters,
    inputs: &AxisInputs,
    stops: WallStops,
) -> (f64, f64, f64) {
    let u = frame.line;
    let (mu_rail, rail_input) = if stops.rail {
        (0.0, 0.0)
    } else {
        (params.rail_payload_ratio(), inputs.rail.net)
    };
    let (mu_cart, cart_input) = if stops.cart {
        (0.0, 0.0)
    } else {
        (params.cart_payload_ratio(), inputs.cart.net)
    };
    let numerator =
        radial_load(frame, state, params.gravity) - u.x * rail_input - u.y * cart_input;
    let tension = numerator / (1.0 + mu_rail * u.x * u.x + mu_cart * u.y * u.y);
    (
        tension,
        rail_input + mu_rail * tension * u.x,
        cart_input + mu_cart * tension * u.y,
    )
}

fn swing(
    frame: &SwingFrame,
    state: &PhysicalState,
    g: f64,
    rail: f64,
    cart: f64,
    line_rate: f64,
) -> (f64, f64) {
    let r = state.line_length;
    let cart_accel = DVec3::new(rail, cart, 0.0);
    let (alfa_rate, beta_rate) = (state.alfa_velocity, state.beta_velocity);
    let cos_alfa = frame.guarded_cos_alfa();

    let alfa = -(g * frame.sin_alfa * frame.cos_beta
        + cart_accel.dot(frame.alfa_axis)
        + 2.0 * line_rate * alfa_rate)
        / r
        - beta_rate * beta_rate * frame.sin_alfa * frame.cos_alfa;

    let beta = -(g * frame.sin_beta
        + cart_accel.dot(frame.beta_axis)
        + 2.0 * line_rate * beta_rate * frame.cos_alfa)
        / (r * cos_alfa)
        + 2.0 * alfa_rate * beta_rate * frame.sin_alfa / cos_alfa;

    (alfa, beta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::friction::AxisAcceleration;

    fn net(value: f64) -> AxisAcceleration {
        AxisAcceleration {
            driving: value,
            friction: 0.0,
            net: value,
        }
    }

    #[test]
    fn hanging_payload_is_in_equilibrium_with_constant_line() {
        let state = PhysicalState::default();
        let params = ModelParameters::default();
        let accel = accelerations(
            FormulationKind::NonLinearConstantLine,
            &state,
            &params,
            &AxisInputs::default(),
        );
        assert_eq!(accel, Accelerations::default());
        let tension = specific_tension(
            FormulationKind::NonLinearConstantLine,
            &state,
            &params,
            &AxisInputs::default(),
        );
        assert!((tension - params.gravity).abs() < 1e-12);
    }

    #[test]
    fn winch_holding_weight_keeps_line_still() {
        let state = PhysicalState::default();
        let params = ModelParameters::default();
        let inputs = AxisInputs {
            line: net(params.gravity),
            ..AxisInputs::default()
        };
        let accel = accelerations(FormulationKind::NonLinearComplete, &state, &params, &inputs);
        assert!(accel.line.abs() < 1e-12);
    }

    #[test]
    fn slack_winch_lets_payload_fall() {
        let state = PhysicalState::default();
        let params = ModelParameters::default();
        let accel = accelerations(
            FormulationKind::NonLinearComplete,
            &state,
            &params,
            &AxisInputs::default(),
        );
        assert!((accel.line - params.gravity).abs() < 1e-12);
    }

    #[test]
    fn accelerating_cart_swings_payload_backwards() {
        let state = PhysicalState::default();
        let params = ModelParameters::default();
        let inputs = AxisInputs {
            cart: net(2.0),
            rail: net(1.0),
            ..AxisInputs::default()
        };
        for kind in FormulationKind::ALL {
            let accel = accelerations(kind, &state, &params, &inputs);
            assert!(accel.alfa < 0.0, "{kind:?} alfa {}", accel.alfa);
            assert!(accel.beta < 0.0, "{kind:?} beta {}", accel.beta);
        }
    }

    #[test]
    fn rail_pushed_into_wall_does_not_swing_payload() {
        let params = ModelParameters::default().with_rail_limits(-30.0, 1.0);
        let state = PhysicalState {
            rail_offset: 1.0,
            ..PhysicalState::default()
        };
        let inputs = AxisInputs {
            rail: net(3000.0),
            line: net(params.gravity),
            ..AxisInputs::default()
        };
        for kind in FormulationKind::ALL {
            let accel = accelerations(kind, &state, &params, &inputs);
            assert_eq!(accel.rail, 0.0, "{kind:?}");
            assert_eq!(accel.beta, 0.0, "{kind:?}");
        }
    }

    #[test]
    fn rail_pulled_off_wall_moves_freely() {
        let params = ModelParameters::default().with_rail_limits(-30.0, 1.0);
        let state = PhysicalState {
            rail_offset: 1.0,
            ..PhysicalState::default()
        };
        let inputs = AxisInputs {
            rail: net(-3.0),
            ..AxisInputs::default()
        };
        let accel = accelerations(FormulationKind::Linear, &state, &params, &inputs);
        assert_eq!(accel.rail, -3.0);
        assert!(accel.beta > 0.0);
    }

    #[test]
    fn non_linear_matches_linear_for_small_angles() {
        let state = PhysicalState {
            alfa: 1e-4,
            beta: -2e-4,
            ..PhysicalState::default()
        };
        let params = ModelParameters {
            swing_damping: 0.0,
            ..ModelParameters::default()
        };
        let inputs = AxisInputs::default();
        let linear = accelerations(FormulationKind::Linear2, &state, &params, &inputs);
        let full = accelerations(
            FormulationKind::NonLinearConstantLine,
            &state,
            &params,
            &inputs,
        );
        assert!((linear.alfa - full.alfa).abs() < 1e-6);
        assert!((linear.beta - full.beta).abs() < 1e-6);
        assert!((linear.rail - full.rail).abs() < 1e-6);
        assert!((linear.cart - full.cart).abs() < 1e-6);
    }

    #[test]
    fn linear_ignores_payload_reaction_on_carts() {
        let state = PhysicalState {
            alfa: 0.1,
            beta: 0.1,
            ..PhysicalState::default()
        };
        let params = ModelParameters::default();
        let inputs = AxisInputs::default();
        let plain = accelerations(FormulationKind::Linear, &state, &params, &inputs);
        let coupled = accelerations(FormulationKind::Linear2, &state, &params, &inputs);
        assert_eq!(plain.rail, 0.0);
        assert_eq!(plain.cart, 0.0);
        assert!(coupled.rail > 0.0);
        assert!(coupled.cart > 0.0);
    }
}
