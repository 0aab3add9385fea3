/// Coulomb's constant $k = 1 / (4 \pi \varepsilon_0)$ in N·m²/C².
pub const COULOMB_K: f64 = 8.987_551_792_3e9;

/// Charges are entered in nanocoulombs.
pub const NANO: f64 = 1e-9;

/// Converts a charge in nanocoulombs to coulombs.
#[inline]
pub fn nano_to_coulomb(q_nc: f64) -> f64 {
    q_nc * NANO
}

/// Length of `d`, or `None` when the two points coincide.
///
/// Every inverse-square term in the engine goes through this so that the
/// r = 0 singularity is skipped the same way everywhere. Points so close that
/// r² is zero or subnormal count as coincident, since 1/r² would overflow.
#[inline]
pub fn separation(d: glam::DVec2) -> Option<f64> {
    let r2 = d.length_squared();
    if r2.is_normal() {
        Some(r2.sqrt())
    } else {
        None
    }
}

/// `v`, or zero if any component overflowed.
#[inline]
pub fn finite_or_zero(v: glam::DVec2) -> glam::DVec2 {
    if v.is_finite() { v } else { glam::DVec2::ZERO }
}

/// `v`, or zero if it overflowed.
#[inline]
pub fn finite_scalar_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
