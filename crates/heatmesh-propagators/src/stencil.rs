//! The [`Stencil`] trait.

use heatmesh_arena::StepGuard;

/// A per-step update rule for one node's subgrid.
///
/// # Contract
///
/// - `apply()` MUST write every cell of `guard.next`.
/// - `apply()` MUST write every sample of the four outgoing edges with
///   the new values along the matching side of the subgrid, so they can
///   be sent as soon as it returns.
/// - `apply()` MUST be deterministic: reads come only from
///   `guard.current` and `guard.incoming`.
pub trait Stencil: Send + 'static {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Compute the next step from the current one.
    fn apply(&self, guard: StepGuard<'_>);
}
