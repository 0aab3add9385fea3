use std::collections::HashMap;

use glam::DVec2;

use crate::config::LabConfig;
use crate::control::{CommandQueue, LabCommand};
use crate::core::solve::{ForceSample, ForceSolver};
use crate::core::state::{ChargeId, ChargeSet};
use crate::error::{LabError, Result};
use crate::input::ChargeInput;
use crate::investigation::{FieldSample, FieldSampler, PotentialSample};
use crate::laws::Coulomb;
use crate::record::ExperimentSnapshot;

/// Everything the display needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LabFrame {
    pub forces: Vec<ForceSample>,
    /// Present only while the field layer is switched on.
    pub field: Option<Vec<FieldSample>>,
    /// Present only while the potential layer is switched on.
    pub potential: Option<Vec<PotentialSample>>,
}

/// A row of the "Object Measurements" panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub id: ChargeId,
    /// Position with the origin moved to the bottom-left of the canvas.
    pub display_position: DVec2,
    pub force: DVec2,
    pub magnitude: f64,
}

/// An interactive lab: the charge set plus the UI state that drives recomputation.
///
/// Nothing derived is cached. [`LabSession::frame`] recomputes forces and any
/// enabled field layer from the current charges on every call.
pub struct LabSession {
    charges: ChargeSet,
    solver: ForceSolver<Coulomb>,
    sampler: FieldSampler,
    /// Unparsed text of charge fields mid-edit, by charge.
    pending: HashMap<ChargeId, String>,
    show_field: bool,
    show_potential: bool,
    plot_height: f64,
}

impl Default for LabSession {
    fn default() -> Self {
        Self::new(LabConfig::default())
    }
}

impl LabSession {
    pub fn new(config: LabConfig) -> Self {
        Self {
            charges: ChargeSet::new(&config),
            solver: ForceSolver::new(Coulomb::new(config.coulomb_k)),
            sampler: FieldSampler::new(&config),
            pending: HashMap::new(),
            show_field: false,
            show_potential: false,
            plot_height: config.plot_height,
        }
    }

    pub fn charges(&self) -> &ChargeSet {
        &self.charges
    }

    pub fn show_field(&self) -> bool {
        self.show_field
    }

    pub fn show_potential(&self) -> bool {
        self.show_potential
    }

    /// What the charge text field should show: pending text if the user is mid-edit,
    /// otherwise the committed value.
    pub fn charge_input(&self, id: ChargeId) -> Result<ChargeInput> {
        if let Some(text) = self.pending.get(&id) {
            return Ok(ChargeInput::Pending(text.clone()));
        }
        self.charges
            .get(id)
            .map(|c| ChargeInput::Committed(c.q))
            .ok_or(LabError::UnknownCharge(id))
    }

    pub fn apply(&mut self, cmd: LabCommand) -> Result<()> {
        tracing::trace!(?cmd, "applying command");
        match cmd {
            LabCommand::AddCharge => {
                self.charges.add();
            }
            LabCommand::RemoveCharge(index) => {
                let removed = self.charges.remove(index)?;
                self.pending.remove(&removed.id);
            }
            LabCommand::ClearCharges => {
                self.charges.clear();
                self.pending.clear();
            }
            LabCommand::SetPosition { id, x, y } => {
                self.charges.set_position(id, x, y)?;
            }
            LabCommand::SetChargeText { id, text } => self.set_charge_text(id, &text)?,
            LabCommand::SetChargeValue { id, q } => {
                self.charges.set_charge(id, q)?;
                self.pending.remove(&id);
            }
            LabCommand::TogglePolarity(id) => {
                self.charges.toggle_polarity(id)?;
                self.pending.remove(&id);
            }
            LabCommand::ResizeCanvas { width, height } => {
                self.charges.resize_canvas(width, height);
            }
            LabCommand::ShowElectricField(on) => self.show_field = on,
            LabCommand::ShowPotentialField(on) => self.show_potential = on,
        }
        Ok(())
    }

    /// Applies every queued command in arrival order, with drag runs
    /// collapsed by [`CommandQueue::drain`]. A command that fails (a stale id,
    /// say) is logged and skipped. Returns how many were applied.
    pub fn drain(&mut self, queue: &CommandQueue) -> usize {
        let mut applied = 0;
        for cmd in queue.drain() {
            match self.apply(cmd) {
                Ok(()) => applied += 1,
                Err(err) => tracing::warn!(%err, "lab command rejected"),
            }
        }
        applied
    }

    fn set_charge_text(&mut self, id: ChargeId, text: &str) -> Result<()> {
        if self.charges.get(id).is_none() {
            return Err(LabError::UnknownCharge(id));
        }
        match ChargeInput::parse(text) {
            ChargeInput::Committed(q) => {
                self.charges.set_charge(id, q)?;
                self.pending.remove(&id);
            }
            ChargeInput::Pending(text) => {
                tracing::trace!(%id, %text, "charge text pending");
                self.pending.insert(id, text);
            }
        }
        Ok(())
    }

    pub fn forces(&self) -> Vec<ForceSample> {
        self.solver.compute_forces(self.charges.charges())
    }

    /// Viewport of the field plots: as wide as the canvas, fixed height.
    pub fn plot_size(&self) -> (f64, f64) {
        (self.charges.canvas().width, self.plot_height)
    }

    pub fn field_grid(&self) -> Vec<FieldSample> {
        let (w, h) = self.plot_size();
        self.sampler.field_grid(self.charges.charges(), w, h)
    }

    pub fn potential_grid(&self) -> Vec<PotentialSample> {
        let (w, h) = self.plot_size();
        self.sampler.potential_grid(self.charges.charges(), w, h)
    }

    pub fn frame(&self) -> LabFrame {
        LabFrame {
            forces: self.forces(),
            field: self.show_field.then(|| self.field_grid()),
            potential: self.show_potential.then(|| self.potential_grid()),
        }
    }

    pub fn measurements(&self) -> Vec<Measurement> {
        let canvas = self.charges.canvas();
        let size = self.charges.charge_size();
        self.forces()
            .into_iter()
            .map(|f| Measurement {
                id: f.id,
                display_position: canvas.to_display(f.position, size),
                force: f.force,
                magnitude: f.magnitude,
            })
            .collect()
    }

    /// Records of the current charges and their forces, for the history store.
    pub fn snapshot(&self, session: impl Into<String>) -> Result<ExperimentSnapshot> {
        ExperimentSnapshot::capture(session, self.charges.charges(), &self.forces())
    }
}
