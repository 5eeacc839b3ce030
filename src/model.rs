use log::{debug, warn};

use crate::{
    config::DEFAULT_SUBSTEP_WARN_THRESHOLD,
    core::{ActuatorForces, FormulationKind, ModelParameters, PhysicalState, StateSnapshot},
    dynamics::{Integrator, TimeBank},
    error::{ConfigurationError, CraneResult},
    utils::{
        logging::{warn_if_substep_budget_exceeded, StepTimer},
        profiling::UpdateProfile,
    },
};

/// Owns the physical state of one crane and advances it in time.
///
/// `params` may be changed freely between updates; each update validates
/// them first. A failed update leaves the model untouched.
#[derive(Debug, Clone, Default)]
pub struct CraneModel {
    pub params: ModelParameters,
    state: PhysicalState,
    clock: TimeBank,
    profile: UpdateProfile,
    last_formulation: Option<FormulationKind>,
}

impl CraneModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameters(params: ModelParameters) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Advances the simulation by `elapsed_time` in sub-steps of exactly
    /// `fixed_step` seconds. Time left over is banked for the next call.
    ///
    /// Banked time within a billionth of a step of a whole step is run as
    /// that step. Requests of 2^53 sub-steps or more are rejected.
    pub fn update_fixed(
        &mut self,
        fixed_step: f64,
        elapsed_time: f64,
        rail_force: f64,
        cart_force: f64,
        line_force: f64,
    ) -> CraneResult<StateSnapshot> {
        self.params.validate()?;
        if !(fixed_step.is_finite() && fixed_step > 0.0) {
            return Err(ConfigurationError::InvalidFixedStep(fixed_step).into());
        }
        validate_elapsed(elapsed_time)?;
        let forces = validate_forces(rail_force, cart_force, line_force)?;

        let mut clock = self.clock;
        clock.deposit(elapsed_time);
        let steps = clock.withdraw(fixed_step)?;
        let (state, profile) = self.integrate("crane::update_fixed", forces, fixed_step, steps)?;

        warn_if_substep_budget_exceeded(
            profile.substeps,
            fixed_step,
            DEFAULT_SUBSTEP_WARN_THRESHOLD,
        );
        self.clock = clock;
        Ok(self.commit(state, profile))
    }

    /// Advances the simulation by one step of `delta_time`.
    ///
    /// The formulations are explicit integrators: large or irregular
    /// `delta_time` values can go unstable. Prefer [`Self::update_fixed`].
    pub fn update(
        &mut self,
        delta_time: f64,
        rail_force: f64,
        cart_force: f64,
        line_force: f64,
    ) -> CraneResult<StateSnapshot> {
        self.params.validate()?;
        validate_elapsed(delta_time)?;
        let forces = validate_forces(rail_force, cart_force, line_force)?;
        if delta_time == 0.0 {
            return Ok(self.state());
        }

        let (state, profile) = self.integrate("crane::update", forces, delta_time, 1)?;
        Ok(self.commit(state, profile))
    }

    /// Snapshot of the current state. Does not advance time.
    pub fn state(&self) -> StateSnapshot {
        self.state.snapshot()
    }

    pub fn physical_state(&self) -> &PhysicalState {
        &self.state
    }

    /// Replaces the physical state, e.g. to restore a saved scenario.
    /// Banked time is kept.
    pub fn set_physical_state(&mut self, state: PhysicalState) {
        self.state = state;
    }

    /// Returns to the default rest state and empties the time bank.
    pub fn reset(&mut self) {
        self.state = PhysicalState::default();
        self.clock = TimeBank::new();
        self.profile.reset();
        self.last_formulation = None;
    }

    /// Sub-steps taken by [`Self::update_fixed`] since construction or reset.
    pub fn substeps_performed(&self) -> u64 {
        self.clock.substeps()
    }

    /// Banked time not yet integrated.
    pub fn pending_time(&self) -> f64 {
        self.clock.pending()
    }

    pub fn profile(&self) -> &UpdateProfile {
        &self.profile
    }

    /// Runs `steps` sub-steps on a copy of the state.
    fn integrate(
        &self,
        label: &str,
        forces: ActuatorForces,
        dt: f64,
        steps: u64,
    ) -> CraneResult<(PhysicalState, UpdateProfile)> {
        let mut timer = StepTimer::new(label);
        let integrator = Integrator::new(&self.params, forces);
        let mut state = self.state;

        for substep in 0..steps {
            if let Err(err) = integrator.step(&mut state, dt, substep) {
                warn!("{err}; update discarded");
                return Err(err.into());
            }
            timer.count_substep();
        }

        Ok((state, timer.profile()))
    }

    fn commit(&mut self, state: PhysicalState, profile: UpdateProfile) -> StateSnapshot {
        let formulation = self.params.formulation;
        if let Some(previous) = self.last_formulation.filter(|kind| *kind != formulation) {
            debug!("formulation switched from {previous:?} to {formulation:?}");
        }
        self.last_formulation = Some(formulation);
        self.state = state;
        self.profile = profile;
        self.profile.report();
        self.state.snapshot()
    }
}

fn validate_elapsed(elapsed: f64) -> Result<(), ConfigurationError> {
    if elapsed.is_finite() && elapsed >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidElapsedTime(elapsed))
    }
}

fn validate_forces(rail: f64, cart: f64, line: f64) -> Result<ActuatorForces, ConfigurationError> {
    for (name, value) in [("rail", rail), ("cart", cart), ("line", line)] {
        if !value.is_finite() {
            return Err(ConfigurationError::InvalidForce { name, value });
        }
    }
    Ok(ActuatorForces::new(rail, cart, line))
}
