use glam::DVec2;

use crate::core::math::{COULOMB_K, finite_or_zero, finite_scalar_or_zero, nano_to_coulomb, separation};
use crate::core::state::Charge;
use crate::laws::Law;

/// Electrostatics of point charges: $F = k q_1 q_2 / r^2$.
///
/// Charges are read in nC and converted to C; distances are taken as-is, so
/// the result is in newtons per whatever length unit the canvas uses.
/// Coincident points (r = 0) contribute nothing, and so does any term that
/// overflows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coulomb {
    pub k: f64,
}

impl Default for Coulomb {
    fn default() -> Self {
        Self::new(COULOMB_K)
    }
}

impl Coulomb {
    pub fn new(k: f64) -> Self {
        Self { k }
    }
}

impl Law for Coulomb {
    fn pair_force(&self, target: &Charge, source: &Charge) -> DVec2 {
        // Points from source to target: positive q1*q2 pushes target away.
        let d = target.position - source.position;
        let Some(r) = separation(d) else {
            return DVec2::ZERO;
        };

        let q1 = nano_to_coulomb(target.q);
        let q2 = nano_to_coulomb(source.q);
        let f = self.k * q1 * q2 / (r * r);
        finite_or_zero(d * (f / r))
    }

    fn field(&self, source: &Charge, point: DVec2) -> DVec2 {
        let d = point - source.position;
        let Some(r) = separation(d) else {
            return DVec2::ZERO;
        };

        let e = self.k * nano_to_coulomb(source.q) / (r * r);
        finite_or_zero(d * (e / r))
    }

    fn potential(&self, source: &Charge, point: DVec2) -> f64 {
        let d = point - source.position;
        match separation(d) {
            Some(r) => finite_scalar_or_zero(self.k * nano_to_coulomb(source.q) / r),
            None => 0.0,
        }
    }
}
