//! Numeric rows handed to the history store when an experiment is saved.
//!
//! The store owns the schema and the grouping of rows into sessions; this
//! module only supplies the values and a serde representation of them.

use serde::{Deserialize, Serialize};

use crate::core::solve::ForceSample;
use crate::core::state::Charge;
use crate::error::{LabError, Result};

/// One saved row per charge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    /// Charge value in nC.
    pub charge: f64,
    /// Second-charge column of the history table. The lab saves single
    /// charges, so this is always 0.
    pub partner_charge: f64,
    /// Distance of the charge from the canvas origin.
    pub distance: f64,
    /// Magnitude of the net force on the charge, in N.
    pub force: f64,
}

/// Builds one record per charge, pairing each with its force sample by id.
///
/// A charge without a matching sample is recorded with zero force.
pub fn experiment_records(charges: &[Charge], forces: &[ForceSample]) -> Vec<ExperimentRecord> {
    charges
        .iter()
        .map(|c| ExperimentRecord {
            charge: c.q,
            partner_charge: 0.0,
            distance: c.position.length(),
            force: forces
                .iter()
                .find(|f| f.id == c.id)
                .map_or(0.0, |f| f.magnitude),
        })
        .collect()
}

/// All records of one save action, keyed by the caller's session grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSnapshot {
    pub session: String,
    pub records: Vec<ExperimentRecord>,
}

impl ExperimentSnapshot {
    pub fn capture(
        session: impl Into<String>,
        charges: &[Charge],
        forces: &[ForceSample],
    ) -> Result<Self> {
        if charges.is_empty() {
            return Err(LabError::EmptyExperiment);
        }
        let snapshot = Self {
            session: session.into(),
            records: experiment_records(charges, forces),
        };
        tracing::debug!(
            session = %snapshot.session,
            records = snapshot.records.len(),
            "experiment captured"
        );
        Ok(snapshot)
    }

    pub fn to_ron(&self) -> std::result::Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}
