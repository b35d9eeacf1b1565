//! Per-panel request generations.

use super::Panel;

/// Identifies one issued load. Only the latest ticket of a panel may apply
/// its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub panel: Panel,
    pub generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestGate {
    generations: [u64; Panel::COUNT],
}

impl RequestGate {
    /// Bump the panel's generation and hand out the new ticket. Every ticket
    /// issued earlier for the same panel becomes stale.
    pub fn issue(&mut self, panel: Panel) -> Ticket {
        let slot = &mut self.generations[panel.index()];
        *slot += 1;
        Ticket {
            panel,
            generation: *slot,
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.generations[ticket.panel.index()] == ticket.generation
    }
}
