use std::sync::mpsc::{Receiver, Sender, channel};

use crate::core::state::ChargeId;

/// A user action on the lab, already resolved from the gesture or widget that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum LabCommand {
    AddCharge,
    /// Remove the n-th charge card.
    RemoveCharge(usize),
    ClearCharges,
    SetPosition { id: ChargeId, x: f64, y: f64 },
    /// Raw contents of the charge text field.
    SetChargeText { id: ChargeId, text: String },
    SetChargeValue { id: ChargeId, q: f64 },
    TogglePolarity(ChargeId),
    ResizeCanvas { width: f64, height: f64 },
    ShowElectricField(bool),
    ShowPotentialField(bool),
}

/// Receiving end of the UI command channel, owned by the session thread.
pub struct CommandQueue {
    receiver: Receiver<LabCommand>,
}

/// Sending end handed to the UI. Cheap to clone, one per widget if needed.
#[derive(Clone)]
pub struct CommandSender {
    sender: Sender<LabCommand>,
}

impl CommandQueue {
    pub fn new() -> (Self, CommandSender) {
        let (sender, receiver) = channel();
        (Self { receiver }, CommandSender { sender })
    }

    pub fn try_recv(&self) -> Option<LabCommand> {
        self.receiver.try_recv().ok()
    }

    /// Takes everything queued so far, in arrival order.
    ///
    /// Drag ticks carry absolute positions, so a run of back-to-back
    /// `SetPosition` for the same charge collapses to its last entry.
    pub fn drain(&self) -> impl Iterator<Item = LabCommand> {
        let mut batch: Vec<LabCommand> = Vec::new();
        for cmd in self.receiver.try_iter() {
            if let (
                Some(LabCommand::SetPosition { id: last, .. }),
                LabCommand::SetPosition { id, .. },
            ) = (batch.last(), &cmd)
            {
                if last == id {
                    batch.pop();
                }
            }
            batch.push(cmd);
        }
        batch.into_iter()
    }
}

impl CommandSender {
    /// Queues a command. Returns `false` once the session has hung up, in
    /// which case the command is dropped.
    pub fn send(&self, cmd: LabCommand) -> bool {
        self.sender.send(cmd).is_ok()
    }
}
