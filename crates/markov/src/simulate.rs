//! Random walks drawn from a transition model.

use pathorder_paths::Symbol;

use crate::error::MarkovError;
use crate::transition::TransitionModel;

/// Simulates a path by repeatedly sampling from `model`.
///
/// # Arguments
///
/// * `model` - Transition model to draw from.
/// * `start` - Initial context; must have exactly `model.order()` symbols.
/// * `steps` - Maximum number of symbols to draw.
/// * `rng` - Random number generator.
///
/// # Returns
///
/// The start context followed by up to `steps` drawn symbols. The walk
/// stops early when it reaches a context without a distribution.
///
/// # Errors
///
/// Returns [`MarkovError::ContextLength`] if `start.len() != model.order()`.
pub fn simulate_walk(
    model: &TransitionModel,
    start: &[Symbol],
    steps: usize,
    rng: &mut impl rand::Rng,
) -> Result<Vec<Symbol>, MarkovError> {
    let k = model.order();
    if start.len() != k {
        return Err(MarkovError::ContextLength {
            expected: k,
            got: start.len(),
        });
    }
    let mut walk = Vec::with_capacity(k + steps);
    walk.extend_from_slice(start);
    for _ in 0..steps {
        let context = &walk[walk.len() - k..];
        match model.sample(context, rng) {
            Some(next) => walk.push(next),
            None => break,
        }
    }
    Ok(walk)
}
