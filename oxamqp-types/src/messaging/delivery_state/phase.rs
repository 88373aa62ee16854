use super::{DeliveryState, Outcome};

/// Where a guaranteed delivery stands from the sender's point of view
///
/// A delivery starts [`Sent`](DeliveryPhase::Sent), waits for the peer and
/// ends in one of the four outcomes. `received` progress reports are
/// observed without moving the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryPhase {
    /// The transfer has been handed to the transport
    Sent,

    /// Waiting for a terminal disposition
    AwaitingDisposition,

    /// Ended with `accepted`
    Accepted,

    /// Ended with `rejected`
    Rejected,

    /// Ended with `released`
    Released,

    /// Ended with `modified`
    Modified,
}

impl DeliveryPhase {
    /// The transfer was written and the sender now waits on the peer
    pub fn await_disposition(self) -> Self {
        match self {
            DeliveryPhase::Sent => DeliveryPhase::AwaitingDisposition,
            other => other,
        }
    }

    /// Applies a state reported by the peer. Terminal phases never change.
    pub fn observe(self, state: &DeliveryState) -> Self {
        if self.is_terminal() {
            return self;
        }
        match state {
            DeliveryState::Received(_) => self,
            DeliveryState::Accepted(_) => DeliveryPhase::Accepted,
            DeliveryState::Rejected(_) => DeliveryPhase::Rejected,
            DeliveryState::Released(_) => DeliveryPhase::Released,
            DeliveryState::Modified(_) => DeliveryPhase::Modified,
        }
    }

    /// Whether an outcome has been reached
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            DeliveryPhase::Sent | DeliveryPhase::AwaitingDisposition
        )
    }
}

impl From<&Outcome> for DeliveryPhase {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Accepted(_) => DeliveryPhase::Accepted,
            Outcome::Rejected(_) => DeliveryPhase::Rejected,
            Outcome::Released(_) => DeliveryPhase::Released,
            Outcome::Modified(_) => DeliveryPhase::Modified,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::messaging::{Accepted, DeliveryState, Received, Released};

    use super::DeliveryPhase;

    #[test]
    fn progress_does_not_change_phase() {
        let phase = DeliveryPhase::Sent.await_disposition();
        let received = DeliveryState::Received(Received {
            section_number: 0,
            section_offset: 100,
        });
        let phase = phase.observe(&received).observe(&received);
        assert_eq!(phase, DeliveryPhase::AwaitingDisposition);

        let phase = phase.observe(&DeliveryState::Accepted(Accepted {}));
        assert_eq!(phase, DeliveryPhase::Accepted);
        assert!(phase.is_terminal());
    }

    #[test]
    fn terminal_phase_is_final() {
        let phase = DeliveryPhase::AwaitingDisposition
            .observe(&DeliveryState::Released(Released {}))
            .observe(&DeliveryState::Accepted(Accepted {}));
        assert_eq!(phase, DeliveryPhase::Released);
    }
}
