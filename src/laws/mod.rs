use glam::DVec2;

use crate::core::state::Charge;

pub mod classical;

pub use classical::Coulomb;

/// A pairwise interaction between point charges.
///
/// Laws describe a single source term. Superposition (summing over the charge
/// set) is done by the solver and the probes, so a law never sees more than
/// one source at a time.
pub trait Law: Send + Sync {
    /// Force exerted on `target` by `source`.
    ///
    /// Implementations return zero when the two charges coincide.
    fn pair_force(&self, target: &Charge, source: &Charge) -> DVec2;

    /// Field vector at `point` produced by `source`.
    fn field(&self, source: &Charge, point: DVec2) -> DVec2;

    /// Scalar potential at `point` produced by `source`.
    fn potential(&self, source: &Charge, point: DVec2) -> f64;
}
