//! Error type shared by the charge set, the session and snapshot capture.

use crate::core::state::ChargeId;

/// Recoverable failures of the lab engine.
///
/// The physics itself never fails; these only cover bookkeeping on the
/// charge set and the experiment snapshot.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LabError {
    /// No charge with this id is present.
    #[error("no charge with id {0}")]
    UnknownCharge(ChargeId),
    /// An index-based action pointed past the end of the set.
    #[error("charge index {index} out of range for {len} charges")]
    IndexOutOfRange { index: usize, len: usize },
    /// Charge values must be finite real numbers.
    #[error("charge value {0} is not finite")]
    NonFiniteCharge(f64),
    /// Positions must be finite coordinates.
    #[error("position ({x}, {y}) is not finite")]
    NonFinitePosition { x: f64, y: f64 },
    /// A snapshot was requested with no charges placed.
    #[error("experiment has no charges to record")]
    EmptyExperiment,
}

pub type Result<T> = std::result::Result<T, LabError>;
