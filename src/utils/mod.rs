//! Utility helpers: update logging and profiling.

pub mod logging;
pub mod profiling;

pub use logging::{warn_if_substep_budget_exceeded, StepTimer};
pub use profiling::UpdateProfile;
