use crate::{
    config::{MAX_SUBSTEPS_PER_UPDATE, STEP_TOLERANCE},
    core::{ActuatorForces, FormulationKind, ModelParameters, PhysicalState},
    dynamics::{
        formulation::{self, AxisInputs},
        friction::{AxisAcceleration, DryFriction, SurfaceLoad},
        kinematics::SwingFrame,
        limits,
    },
    error::{ConfigurationError, DivergedError},
};

/// Advances the crane one fixed sub-step at a time.
///
/// The formulation is captured on construction, so every sub-step driven
/// by one integrator uses the same equations.
#[derive(Debug, Clone, Copy)]
pub struct Integrator<'a> {
    params: &'a ModelParameters,
    forces: ActuatorForces,
    formulation: FormulationKind,
}

impl<'a> Integrator<'a> {
    pub fn new(params: &'a ModelParameters, forces: ActuatorForces) -> Self {
        Self {
            params,
            forces,
            formulation: params.formulation,
        }
    }

    pub fn formulation(&self) -> FormulationKind {
        self.formulation
    }

    /// Explicit semi-implicit Euler step followed by limit enforcement and
    /// rest settling.
    ///
    /// Fails before the limits are applied if the step left any value
    /// non-finite; `substep` only labels the error.
    pub fn step(
        &self,
        state: &mut PhysicalState,
        dt: f64,
        substep: u64,
    ) -> Result<(), DivergedError> {
        let inputs = self.axis_inputs(state, dt);
        let accel = formulation::accelerations(self.formulation, state, self.params, &inputs);

        state.rail_velocity += accel.rail * dt;
        state.cart_velocity += accel.cart * dt;
        state.alfa_velocity += accel.alfa * dt;
        state.beta_velocity += accel.beta * dt;
        if self.formulation.models_line() {
            state.line_velocity += accel.line * dt;
        } else {
            state.line_velocity = 0.0;
        }

        state.rail_offset += state.rail_velocity * dt;
        state.cart_offset += state.cart_velocity * dt;
        state.line_length += state.line_velocity * dt;
        state.alfa += state.alfa_velocity * dt;
        state.beta += state.beta_velocity * dt;

        if !state.is_finite() {
            return Err(DivergedError {
                substep,
                formulation: self.formulation,
            });
        }
        limits::apply_limits(state, self.params);
        limits::settle(state, self.params.rest_threshold);
        Ok(())
    }

    fn axis_inputs(&self, state: &PhysicalState, dt: f64) -> AxisInputs {
        let params = self.params;

        let line = if self.formulation.models_line() {
            AxisAcceleration::viscous(
                self.forces.line,
                params.payload_mass,
                params.winding_friction,
                -state.line_velocity,
                dt,
            )
        } else {
            AxisAcceleration::ZERO
        };

        if self.formulation != FormulationKind::NonLinearOriginal {
            return AxisInputs {
                rail: AxisAcceleration::viscous(
                    self.forces.rail,
                    params.rail_inertia(),
                    params.rail_friction,
                    state.rail_velocity,
                    dt,
                ),
                cart: AxisAcceleration::viscous(
                    self.forces.cart,
                    params.cart_mass,
                    params.cart_friction,
                    state.cart_velocity,
                    dt,
                ),
                line,
            };
        }

        // Running surfaces carry their own weight plus the vertical pull of
        // the line; the horizontal pull has to be held by static friction too.
        let partial = AxisInputs {
            line,
            ..AxisInputs::default()
        };
        let tension = formulation::specific_tension(self.formulation, state, params, &partial)
            * params.payload_mass;
        let frame = SwingFrame::new(state.alfa, state.beta);
        let line_load = tension * frame.vertical_load_factor();
        let dry = DryFriction::new(params.static_dry_friction, params.kinetic_dry_friction);

        AxisInputs {
            rail: AxisAcceleration::with_dry_friction(
                self.forces.rail,
                params.rail_inertia(),
                params.rail_friction,
                state.rail_velocity,
                dt,
                dry,
                SurfaceLoad::new(
                    params.rail_inertia() * params.gravity + line_load,
                    tension * frame.line.x,
                ),
            ),
            cart: AxisAcceleration::with_dry_friction(
                self.forces.cart,
                params.cart_mass,
                params.cart_friction,
                state.cart_velocity,
                dt,
                dry,
                SurfaceLoad::new(
                    params.cart_mass * params.gravity + line_load,
                    tension * frame.line.y,
                ),
            ),
            line,
        }
    }
}

/// Simulation-time accumulator realising fixed steps under variable
/// wall-clock updates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeBank {
    pending: f64,
    substeps: u64,
}

impl TimeBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deposit(&mut self, elapsed: f64) {
        self.pending += elapsed;
    }

    /// Takes every whole `step` out of the bank and returns how many.
    ///
    /// Banked time within `STEP_TOLERANCE` of a whole step counts as one, so
    /// `0.3 / 0.1` yields three steps despite rounding.
    pub fn withdraw(&mut self, step: f64) -> Result<u64, ConfigurationError> {
        let steps = ((self.pending + step * STEP_TOLERANCE) / step).floor();
        if !steps.is_finite() || steps >= MAX_SUBSTEPS_PER_UPDATE as f64 {
            return Err(ConfigurationError::TooManySubsteps {
                pending: self.pending,
                fixed_step: step,
            });
        }
        let steps = steps as u64;
        self.pending = (self.pending - steps as f64 * step).max(0.0);
        self.substeps += steps;
        Ok(steps)
    }

    /// Time carried over to the next update.
    pub fn pending(&self) -> f64 {
        self.pending
    }

    /// Total sub-steps taken through this bank.
    pub fn substeps(&self) -> u64 {
        self.substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_carries_remainder() {
        let mut bank = TimeBank::new();
        bank.deposit(0.25);
        assert_eq!(bank.withdraw(0.1), Ok(2));
        assert_eq!(bank.substeps(), 2);
        assert!((bank.pending() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn rounding_does_not_lose_a_step() {
        let mut bank = TimeBank::new();
        bank.deposit(0.3);
        assert_eq!(bank.withdraw(0.1), Ok(3));
        assert!(bank.pending() < 1e-12);
    }

    #[test]
    fn empty_bank_takes_no_step() {
        let mut bank = TimeBank::new();
        bank.deposit(0.0);
        assert_eq!(bank.withdraw(0.01), Ok(0));
        assert_eq!(bank.substeps(), 0);
    }

    #[test]
    fn unreachable_step_count_is_rejected() {
        let mut bank = TimeBank::new();
        bank.deposit(1e18);
        assert!(matches!(
            bank.withdraw(0.01),
            Err(ConfigurationError::TooManySubsteps { .. })
        ));
        assert_eq!(bank.pending(), 1e18);
        assert_eq!(bank.substeps(), 0);
    }

    #[test]
    fn overflowing_velocity_is_reported_before_the_wall_hides_it() {
        let params = ModelParameters::default().with_rail_limits(-1.0, 1.0);
        let mut state = PhysicalState::default();
        // Rail velocity overflows while the swing angle is still finite.
        let result = Integrator::new(&params, ActuatorForces::new(1.6e308, 0.0, 0.0))
            .step(&mut state, 4.0, 4);
        assert!(state.beta.is_finite());
        assert!(state.rail_velocity.is_infinite());
        assert_eq!(
            result,
            Err(DivergedError {
                substep: 4,
                formulation: FormulationKind::Linear,
            })
        );
    }

    #[test]
    fn formulation_is_captured_at_construction() {
        let mut params = ModelParameters::default();
        params.formulation = FormulationKind::Linear2;
        let integrator = Integrator::new(&params, ActuatorForces::default());
        assert_eq!(integrator.formulation(), FormulationKind::Linear2);
    }

    #[test]
    fn constant_line_models_hold_line_length() {
        let params = ModelParameters::default().with_formulation(FormulationKind::Linear);
        let mut state = PhysicalState {
            line_length: 10.0,
            line_velocity: 3.0,
            ..PhysicalState::default()
        };
        Integrator::new(&params, ActuatorForces::new(0.0, 0.0, 50.0))
            .step(&mut state, 0.01, 0)
            .unwrap();
        assert_eq!(state.line_length, 10.0);
        assert_eq!(state.line_velocity, 0.0);
    }

    #[test]
    fn original_friction_holds_cart_against_small_force() {
        let params = ModelParameters {
            rest_threshold: 0.0,
            ..ModelParameters::default().with_formulation(FormulationKind::NonLinearOriginal)
        };
        let mut state = PhysicalState::default();
        let weight_line = params.payload_mass * params.gravity;
        let forces = ActuatorForces::new(0.0, 1.0, weight_line);
        Integrator::new(&params, forces)
            .step(&mut state, 0.01, 0)
            .unwrap();
        assert_eq!(state.cart_velocity, 0.0);
        assert_eq!(state.cart_offset, 0.0);
    }

    #[test]
    fn original_model_breaks_away_under_large_force() {
        let params =
            ModelParameters::default().with_formulation(FormulationKind::NonLinearOriginal);
        let mut state = PhysicalState::default();
        Integrator::new(&params, ActuatorForces::new(500.0, 0.0, 0.0))
            .step(&mut state, 0.01, 0)
            .unwrap();
        assert!(state.rail_velocity > 0.0);
        assert!(state.rail_offset > 0.0);
    }
}
