//! Lab configuration, loadable from a RON file.
//!
//! Every field has a default matching the classroom lab, so a config file only
//! needs to name what it overrides:
//!
//! ```ron
//! (
//!     capacity: 5,
//!     canvas: (width: 300.0, height: 320.0),
//!     field_step: 30.0,
//! )
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::geometry::Canvas;
use crate::core::math::COULOMB_K;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Maximum number of charges on the canvas at once.
    pub capacity: usize,
    /// Charge given to a freshly added particle, in nC.
    pub default_charge: f64,
    /// Where a freshly added particle is placed.
    pub default_position: DVec2,
    /// Edge length of a charge's sprite; positions are clamped so it stays visible.
    pub charge_size: f64,
    /// Initial drag canvas. Replaced by the first layout pass.
    pub canvas: Canvas,
    /// Height of the field and potential plots. Their width follows the canvas.
    pub plot_height: f64,
    /// Grid spacing of the electric field arrows.
    pub field_step: f64,
    /// Grid spacing of the potential heatmap.
    pub potential_step: f64,
    /// Multiplier from raw field to drawn arrow length.
    pub field_scale: f64,
    /// |V| at which the heatmap saturates.
    pub potential_norm: f64,
    /// Coulomb's constant in N·m²/C².
    pub coulomb_k: f64,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            capacity: 5,
            default_charge: 10.0,
            default_position: DVec2::new(50.0, 50.0),
            charge_size: 20.0,
            canvas: Canvas::new(300.0, 320.0),
            plot_height: 320.0,
            field_step: 30.0,
            potential_step: 12.0,
            field_scale: 200.0,
            potential_norm: 10.0,
            coulomb_k: COULOMB_K,
        }
    }
}

impl LabConfig {
    /// Reads a RON config file, filling unspecified fields from [`Default`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_ron(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_ron(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text).context("failed to parse RON")?;
        tracing::debug!(?config, "lab config loaded");
        Ok(config)
    }
}
