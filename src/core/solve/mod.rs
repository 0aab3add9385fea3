use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::math::{finite_or_zero, finite_scalar_or_zero};
use crate::core::state::{Charge, ChargeId};
use crate::laws::{Coulomb, Law};

/// Net force on one charge for the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceSample {
    pub id: ChargeId,
    pub position: DVec2,
    /// (Fx, Fy) in newtons.
    pub force: DVec2,
    /// |F|, the Euclidean norm of `force`.
    pub magnitude: f64,
}

/// Net-force solver by direct superposition.
///
/// Stateless: every call recomputes all n(n-1) pair terms from the snapshot
/// it is given. Quadratic, which is fine for a handful of charges.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForceSolver<L: Law = Coulomb> {
    pub law: L,
}

impl<L: Law> ForceSolver<L> {
    pub fn new(law: L) -> Self {
        Self { law }
    }

    /// One sample per charge, in input order. A net force that overflows is
    /// reported as zero.
    ///
    /// Other charges are excluded by id rather than by index, so two distinct
    /// charges stacked on the same point still see each other (and the law
    /// then zeroes that coincident pair).
    pub fn compute_forces(&self, charges: &[Charge]) -> Vec<ForceSample> {
        let samples: Vec<ForceSample> = charges
            .iter()
            .map(|target| {
                let force = finite_or_zero(
                    charges
                        .iter()
                        .filter(|source| source.id != target.id)
                        .fold(DVec2::ZERO, |acc, source| {
                            acc + self.law.pair_force(target, source)
                        }),
                );
                ForceSample {
                    id: target.id,
                    position: target.position,
                    force,
                    magnitude: finite_scalar_or_zero(force.length()),
                }
            })
            .collect();

        tracing::trace!(charges = charges.len(), "forces recomputed");
        samples
    }

    /// The isolated contribution of `source` to the force on `target`.
    pub fn pair_force(&self, target: &Charge, source: &Charge) -> DVec2 {
        self.law.pair_force(target, source)
    }
}

/// Net Coulomb force on every charge.
pub fn compute_forces(charges: &[Charge]) -> Vec<ForceSample> {
    ForceSolver::<Coulomb>::default().compute_forces(charges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_yields_no_samples() {
        assert!(compute_forces(&[]).is_empty());
    }

    #[test]
    fn samples_follow_input_order() {
        let charges = [
            Charge::new(ChargeId(7), DVec2::new(0.0, 0.0), 1.0),
            Charge::new(ChargeId(2), DVec2::new(1.0, 0.0), 1.0),
            Charge::new(ChargeId(5), DVec2::new(0.0, 1.0), 1.0),
        ];
        let ids: Vec<_> = compute_forces(&charges).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![ChargeId(7), ChargeId(2), ChargeId(5)]);
    }
}
