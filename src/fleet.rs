//! Stepping many independent cranes together.
//!
//! Models share nothing, so with the `parallel` feature each one is
//! advanced on the rayon pool without any locking.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    core::{ActuatorForces, StateSnapshot},
    error::CraneResult,
    model::CraneModel,
};

/// Calls [`CraneModel::update_fixed`] on every model with its own forces.
///
/// `forces` is matched to `models` by index; models without a matching
/// entry get zero forces. Results come back in model order.
pub fn update_fleet(
    models: &mut [CraneModel],
    forces: &[ActuatorForces],
    fixed_step: f64,
    elapsed_time: f64,
) -> Vec<CraneResult<StateSnapshot>> {
    let step = |(index, model): (usize, &mut CraneModel)| {
        let applied = forces.get(index).copied().unwrap_or_default();
        model.update_fixed(
            fixed_step,
            elapsed_time,
            applied.rail,
            applied.cart,
            applied.line,
        )
    };

    #[cfg(feature = "parallel")]
    let results = models.par_iter_mut().enumerate().map(step).collect();
    #[cfg(not(feature = "parallel"))]
    let results = models.iter_mut().enumerate().map(step).collect();

    results
}
