//! Error types for the crane dynamics core.
//!
//! Every fallible update returns `CraneResult<T>`. A failed call leaves the
//! model exactly as it was before the call.

use thiserror::Error;

use crate::core::params::FormulationKind;

/// Top-level error type returned by model updates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CraneError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Simulation diverged: {0}")]
    Diverged(#[from] DivergedError),
}

/// Invalid parameters or step arguments, detected before any integration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("{name} must be a positive finite mass, got {value}")]
    InvalidMass { name: &'static str, value: f64 },

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidCoefficient { name: &'static str, value: f64 },

    #[error("gravity must be finite, got {0}")]
    InvalidGravity(f64),

    #[error("{axis} limits are invalid: min={min}, max={max}")]
    InvalidLimits {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("line lower limit must be positive, got {0}")]
    NonPositiveLineLimit(f64),

    #[error("fixed step must be positive and finite, got {0}")]
    InvalidFixedStep(f64),

    #[error("elapsed time must be non-negative and finite, got {0}")]
    InvalidElapsedTime(f64),

    #[error("{name} force must be finite, got {value}")]
    InvalidForce { name: &'static str, value: f64 },

    #[error("{pending} s of banked time needs too many sub-steps of {fixed_step} s")]
    TooManySubsteps { pending: f64, fixed_step: f64 },
}

/// Non-finite values appeared in the state during integration.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("non-finite state after sub-step {substep} using {formulation:?}")]
pub struct DivergedError {
    /// Index of the failing sub-step within the update call, starting at 0.
    pub substep: u64,
    pub formulation: FormulationKind,
}

/// Convenience alias for `Result<T, CraneError>`.
pub type CraneResult<T> = Result<T, CraneError>;
