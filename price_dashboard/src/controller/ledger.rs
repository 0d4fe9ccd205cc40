//! Bookkeeping that keeps late responses from overwriting fresher ones.

use std::collections::HashMap;

use crate::api::request::RequestKind;

/// Identity of one dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub kind: RequestKind,
}

/// What to do with a response once it arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Apply,
    /// A newer request of the same kind was issued after this one.
    Superseded,
    /// A status report requested before the latest applied state change.
    Outdated,
}

#[derive(Debug, Default)]
pub struct RequestLedger {
    next_seq: u64,
    in_flight: HashMap<RequestKind, u64>,
    // Tickets below this sequence predate the last applied state change.
    state_epoch: u64,
}

impl RequestLedger {
    pub fn issue(&mut self, kind: RequestKind) -> Ticket {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight.insert(kind, seq);
        Ticket { seq, kind }
    }

    /// Decides whether `ticket`'s response may be applied. A ticket is
    /// settled at most once; settling it again reports it as superseded.
    pub fn settle(&mut self, ticket: Ticket) -> Verdict {
        if self.in_flight.get(&ticket.kind) != Some(&ticket.seq) {
            return Verdict::Superseded;
        }
        self.in_flight.remove(&ticket.kind);

        if ticket.kind == RequestKind::Status && ticket.seq < self.state_epoch {
            Verdict::Outdated
        } else {
            Verdict::Apply
        }
    }

    /// Records that a state-changing response was just applied: every status
    /// request issued so far may describe the world before it.
    pub fn mark_state_change(&mut self) {
        self.state_epoch = self.next_seq;
    }

    pub fn is_in_flight(&self, kind: RequestKind) -> bool {
        self.in_flight.contains_key(&kind)
    }
}
