use glam::DVec2;

use crate::core::math::{finite_or_zero, finite_scalar_or_zero};
use crate::core::state::Charge;
use crate::laws::{Coulomb, Law};

/// A read-only measurement of the charge set at an arbitrary point.
///
/// Probes hold no state between calls, so the same probe can be evaluated
/// for different points from several threads at once.
pub trait Probe: Send + Sync {
    type Output: Copy + Send;

    fn name(&self) -> &str;
    fn measure(&self, charges: &[Charge], point: DVec2) -> Self::Output;
}

/// Electric field vector (Ex, Ey) by superposition over all sources.
///
/// A total that overflows reads as zero, like a coincident source.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldProbe<L: Law = Coulomb> {
    pub law: L,
}

impl<L: Law> FieldProbe<L> {
    pub fn new(law: L) -> Self {
        Self { law }
    }
}

impl<L: Law> Probe for FieldProbe<L> {
    type Output = DVec2;

    fn name(&self) -> &str {
        "Electric Field"
    }

    fn measure(&self, charges: &[Charge], point: DVec2) -> DVec2 {
        finite_or_zero(
            charges
                .iter()
                .fold(DVec2::ZERO, |acc, c| acc + self.law.field(c, point)),
        )
    }
}

/// Scalar potential V by superposition over all sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct PotentialProbe<L: Law = Coulomb> {
    pub law: L,
}

impl<L: Law> PotentialProbe<L> {
    pub fn new(law: L) -> Self {
        Self { law }
    }
}

impl<L: Law> Probe for PotentialProbe<L> {
    type Output = f64;

    fn name(&self) -> &str {
        "Potential Field"
    }

    fn measure(&self, charges: &[Charge], point: DVec2) -> f64 {
        finite_scalar_or_zero(charges.iter().map(|c| self.law.potential(c, point)).sum())
    }
}

/// Coulomb field at `(x, y)`.
pub fn electric_field_at(charges: &[Charge], x: f64, y: f64) -> DVec2 {
    FieldProbe::<Coulomb>::default().measure(charges, DVec2::new(x, y))
}

/// Coulomb potential at `(x, y)`.
pub fn potential_at(charges: &[Charge], x: f64, y: f64) -> f64 {
    PotentialProbe::<Coulomb>::default().measure(charges, DVec2::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::ChargeId;

    #[test]
    fn empty_set_measures_zero() {
        assert_eq!(electric_field_at(&[], 10.0, 10.0), DVec2::ZERO);
        assert_eq!(potential_at(&[], 10.0, 10.0), 0.0);
    }

    #[test]
    fn probes_are_named() {
        assert_eq!(FieldProbe::<Coulomb>::default().name(), "Electric Field");
        assert_eq!(PotentialProbe::<Coulomb>::default().name(), "Potential Field");
    }

    #[test]
    fn fields_superpose() {
        let a = Charge::new(ChargeId(1), DVec2::new(0.0, 0.0), 4.0);
        let b = Charge::new(ChargeId(2), DVec2::new(10.0, 3.0), -6.0);
        let p = DVec2::new(4.0, 7.0);
        let law = Coulomb::default();

        let both = electric_field_at(&[a, b], p.x, p.y);
        let sum = law.field(&a, p) + law.field(&b, p);
        assert_eq!(both, sum);

        let v = potential_at(&[a, b], p.x, p.y);
        assert_eq!(v, law.potential(&a, p) + law.potential(&b, p));
    }
}
