use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::LabConfig;
use crate::core::geometry::Canvas;
use crate::error::{LabError, Result};

/// Stable identity of a charge.
///
/// Ids are handed out by a monotonic counter and never reused, so an id held
/// by the UI keeps pointing at the same particle after other particles are
/// removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChargeId(pub u32);

impl fmt::Display for ChargeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point charge on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub id: ChargeId,
    /// Top-left corner of the sprite, in canvas units.
    pub position: DVec2,
    /// Signed charge in nanocoulombs. Always finite.
    pub q: f64,
}

impl Charge {
    pub fn new(id: ChargeId, position: DVec2, q: f64) -> Self {
        Self { id, position, q }
    }

    pub fn is_positive(&self) -> bool {
        self.q > 0.0
    }
}

/// The authoritative, ordered collection of charges in a lab session.
///
/// Order is insertion order and is the order every derived quantity is
/// reported in. Index-based UI actions resolve to ids through [`ChargeSet::id_at`].
#[derive(Debug, Clone)]
pub struct ChargeSet {
    charges: Vec<Charge>,
    next_id: u32,
    capacity: usize,
    canvas: Canvas,
    charge_size: f64,
    default_charge: f64,
    default_position: DVec2,
}

impl Default for ChargeSet {
    fn default() -> Self {
        Self::new(&LabConfig::default())
    }
}

impl ChargeSet {
    pub fn new(config: &LabConfig) -> Self {
        Self {
            charges: Vec::with_capacity(config.capacity),
            next_id: 1,
            capacity: config.capacity,
            canvas: config.canvas,
            charge_size: config.charge_size,
            default_charge: config.default_charge,
            default_position: config.default_position,
        }
    }

    pub fn charges(&self) -> &[Charge] {
        &self.charges
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.charges.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn charge_size(&self) -> f64 {
        self.charge_size
    }

    pub fn get(&self, id: ChargeId) -> Option<&Charge> {
        self.charges.iter().find(|c| c.id == id)
    }

    pub fn id_at(&self, index: usize) -> Option<ChargeId> {
        self.charges.get(index).map(|c| c.id)
    }

    /// Adds a charge with the default value at the default position.
    ///
    /// Returns `None` without touching the set once capacity is reached.
    pub fn add(&mut self) -> Option<ChargeId> {
        self.add_at(self.default_position, self.default_charge)
    }

    /// Adds a charge at `position` (clamped to the canvas) with charge `q` nC.
    ///
    /// Non-finite `q` or position is treated like a full set: nothing is added.
    pub fn add_at(&mut self, position: DVec2, q: f64) -> Option<ChargeId> {
        if self.is_full() {
            tracing::debug!(capacity = self.capacity, "charge set full, add ignored");
            return None;
        }
        if !q.is_finite() || !position.is_finite() {
            tracing::debug!(q, ?position, "non-finite charge, add ignored");
            return None;
        }

        let id = ChargeId(self.next_id);
        self.next_id += 1;
        let position = self.canvas.clamp(position, self.charge_size);
        self.charges.push(Charge::new(id, position, q));
        tracing::debug!(%id, x = position.x, y = position.y, q, "charge added");
        Some(id)
    }

    /// Removes the charge at `index`; later charges shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<Charge> {
        if index >= self.charges.len() {
            return Err(LabError::IndexOutOfRange {
                index,
                len: self.charges.len(),
            });
        }
        let removed = self.charges.remove(index);
        tracing::debug!(id = %removed.id, index, "charge removed");
        Ok(removed)
    }

    pub fn remove_id(&mut self, id: ChargeId) -> Result<Charge> {
        let index = self.index_of(id)?;
        self.remove(index)
    }

    pub fn clear(&mut self) {
        tracing::debug!(count = self.charges.len(), "charges cleared");
        self.charges.clear();
    }

    /// Moves a charge, keeping its sprite inside the canvas. Returns the
    /// position actually applied.
    pub fn set_position(&mut self, id: ChargeId, x: f64, y: f64) -> Result<DVec2> {
        if !x.is_finite() || !y.is_finite() {
            return Err(LabError::NonFinitePosition { x, y });
        }
        let clamped = self.canvas.clamp(DVec2::new(x, y), self.charge_size);
        let charge = self.get_mut(id)?;
        charge.position = clamped;
        tracing::trace!(%id, x = clamped.x, y = clamped.y, "charge moved");
        Ok(clamped)
    }

    /// Overwrites the charge value. Zero and negative values are valid.
    pub fn set_charge(&mut self, id: ChargeId, q: f64) -> Result<()> {
        if !q.is_finite() {
            return Err(LabError::NonFiniteCharge(q));
        }
        self.get_mut(id)?.q = q;
        tracing::debug!(%id, q, "charge value set");
        Ok(())
    }

    /// Flips the sign of a charge. Returns the new value.
    pub fn toggle_polarity(&mut self, id: ChargeId) -> Result<f64> {
        let charge = self.get_mut(id)?;
        charge.q = -charge.q;
        tracing::debug!(%id, q = charge.q, "polarity toggled");
        Ok(charge.q)
    }

    /// Applies new canvas bounds and pulls every charge back inside them.
    pub fn resize_canvas(&mut self, width: f64, height: f64) {
        self.canvas = Canvas::new(width, height);
        for charge in &mut self.charges {
            charge.position = self.canvas.clamp(charge.position, self.charge_size);
        }
        tracing::debug!(width, height, "canvas resized");
    }

    fn index_of(&self, id: ChargeId) -> Result<usize> {
        self.charges
            .iter()
            .position(|c| c.id == id)
            .ok_or(LabError::UnknownCharge(id))
    }

    fn get_mut(&mut self, id: ChargeId) -> Result<&mut Charge> {
        self.charges
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(LabError::UnknownCharge(id))
    }
}
