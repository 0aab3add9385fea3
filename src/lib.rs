//! Physics engine of an interactive Coulomb's-law lab.
//!
//! Up to five point charges live on a 2D canvas. From any snapshot of them the
//! engine computes the net force on every charge, and samples the electric
//! field and the electric potential on regular grids for display.

pub mod core {
    pub mod geometry;
    pub mod math;
    pub mod solve;
    pub mod state;
}

pub mod laws;

pub mod investigation;

pub mod config;
pub mod control;
pub mod error;
pub mod input;
pub mod record;
pub mod session;

pub use crate::config::LabConfig;
pub use crate::core::solve::{ForceSample, ForceSolver, compute_forces};
pub use crate::core::state::{Charge, ChargeId, ChargeSet};
pub use crate::error::LabError;
pub use crate::investigation::grid::{sample_field_grid, sample_potential_grid};
pub use crate::investigation::probe::{electric_field_at, potential_at};
pub use crate::session::{LabFrame, LabSession};
