//! Regular sampling grids over a viewport.
//!
//! Points sit at `0, step, 2·step, …` strictly below the viewport width and
//! height, visited column by column (outer x, inner y). Every call samples
//! the whole grid from scratch.

use glam::DVec2;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::LabConfig;
use crate::core::state::Charge;
use crate::investigation::probe::{FieldProbe, PotentialProbe, Probe};
use crate::laws::Coulomb;

/// Grid step of the electric field arrows.
pub const FIELD_STEP: f64 = 30.0;
/// Grid step of the potential heatmap.
pub const POTENTIAL_STEP: f64 = 12.0;
/// Default arrow length multiplier.
pub const FIELD_SCALE: f64 = 200.0;
/// Default |V| at which the heatmap saturates.
pub const POTENTIAL_NORM: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub width: f64,
    pub height: f64,
    pub step: f64,
}

impl Grid {
    pub fn new(width: f64, height: f64, step: f64) -> Self {
        Self {
            width,
            height,
            step,
        }
    }

    pub fn columns(&self) -> usize {
        Self::count(self.width, self.step)
    }

    pub fn rows(&self) -> usize {
        Self::count(self.height, self.step)
    }

    /// Number of sample points. Saturates on absurd viewports.
    pub fn len(&self) -> usize {
        self.columns().saturating_mul(self.rows())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn point(&self, column: usize, row: usize) -> DVec2 {
        DVec2::new(column as f64 * self.step, row as f64 * self.step)
    }

    /// All grid points, column-major.
    pub fn points(&self) -> impl Iterator<Item = DVec2> + '_ {
        let rows = self.rows();
        (0..self.columns()).flat_map(move |i| (0..rows).map(move |j| self.point(i, j)))
    }

    // Number of multiples of `step` in [0, extent). Degenerate input gives an empty axis.
    fn count(extent: f64, step: f64) -> usize {
        if !step.is_finite() || !extent.is_finite() || step <= 0.0 || extent <= 0.0 {
            return 0;
        }
        (extent / step).ceil() as usize
    }
}

/// One probe reading at a grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSample<T> {
    pub position: DVec2,
    pub value: T,
}

/// Raw (Ex, Ey) at a grid point.
pub type FieldSample = GridSample<DVec2>;
/// Raw V at a grid point.
pub type PotentialSample = GridSample<f64>;

impl GridSample<DVec2> {
    /// Tip of the arrow drawn for this sample: `origin + E · scale`.
    pub fn endpoint(&self, scale: f64) -> DVec2 {
        self.position + self.value * scale
    }
}

impl GridSample<f64> {
    /// Heatmap opacity: `min(1, |V| / norm)`.
    pub fn intensity(&self, norm: f64) -> f64 {
        (self.value.abs() / norm).min(1.0)
    }
}

/// Evaluates `probe` at every point of `grid`.
pub fn sample_grid<P: Probe>(probe: &P, charges: &[Charge], grid: &Grid) -> Vec<GridSample<P::Output>> {
    let samples = sample_points(probe, charges, grid);
    tracing::trace!(
        probe = probe.name(),
        points = samples.len(),
        step = grid.step,
        "grid sampled"
    );
    samples
}

#[cfg(not(feature = "parallel"))]
fn sample_points<P: Probe>(probe: &P, charges: &[Charge], grid: &Grid) -> Vec<GridSample<P::Output>> {
    grid.points()
        .map(|position| GridSample {
            position,
            value: probe.measure(charges, position),
        })
        .collect()
}

// Cells are independent, so columns can be filled on any thread; collect keeps the order.
#[cfg(feature = "parallel")]
fn sample_points<P: Probe>(probe: &P, charges: &[Charge], grid: &Grid) -> Vec<GridSample<P::Output>> {
    let rows = grid.rows();
    (0..grid.columns())
        .into_par_iter()
        .flat_map_iter(|i| {
            (0..rows).map(move |j| {
                let position = grid.point(i, j);
                GridSample {
                    position,
                    value: probe.measure(charges, position),
                }
            })
        })
        .collect()
}

/// Coulomb field on the standard 30-unit arrow grid.
pub fn sample_field_grid(charges: &[Charge], width: f64, height: f64) -> Vec<FieldSample> {
    sample_grid(
        &FieldProbe::<Coulomb>::default(),
        charges,
        &Grid::new(width, height, FIELD_STEP),
    )
}

/// Coulomb potential on the standard 12-unit heatmap grid.
pub fn sample_potential_grid(charges: &[Charge], width: f64, height: f64) -> Vec<PotentialSample> {
    sample_grid(
        &PotentialProbe::<Coulomb>::default(),
        charges,
        &Grid::new(width, height, POTENTIAL_STEP),
    )
}

/// Grid sampler bound to a [`LabConfig`]'s steps and Coulomb constant.
#[derive(Debug, Clone, Copy)]
pub struct FieldSampler {
    field: FieldProbe<Coulomb>,
    potential: PotentialProbe<Coulomb>,
    field_step: f64,
    potential_step: f64,
}

impl Default for FieldSampler {
    fn default() -> Self {
        Self::new(&LabConfig::default())
    }
}

impl FieldSampler {
    pub fn new(config: &LabConfig) -> Self {
        let law = Coulomb::new(config.coulomb_k);
        Self {
            field: FieldProbe::new(law),
            potential: PotentialProbe::new(law),
            field_step: config.field_step,
            potential_step: config.potential_step,
        }
    }

    pub fn field_grid(&self, charges: &[Charge], width: f64, height: f64) -> Vec<FieldSample> {
        sample_grid(&self.field, charges, &Grid::new(width, height, self.field_step))
    }

    pub fn potential_grid(&self, charges: &[Charge], width: f64, height: f64) -> Vec<PotentialSample> {
        sample_grid(
            &self.potential,
            charges,
            &Grid::new(width, height, self.potential_step),
        )
    }
}
