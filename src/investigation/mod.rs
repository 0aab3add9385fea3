pub mod grid;
pub mod probe;

pub use grid::{FieldSample, FieldSampler, Grid, GridSample, PotentialSample};
pub use probe::{FieldProbe, PotentialProbe, Probe};
