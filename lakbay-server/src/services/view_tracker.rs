//! Latest-view-wins bookkeeping
//!
//! Each display slot holds a generation counter. Starting a resolution bumps
//! it; a result whose generation is no longer current belongs to a
//! superseded view and is discarded. Slots are a closed set, so the tracker
//! never grows with client input.

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Named display position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewSlot {
    Current,
    Next,
}

impl ViewSlot {
    pub const ALL: [ViewSlot; 2] = [ViewSlot::Current, ViewSlot::Next];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewSlot::Current => "current",
            ViewSlot::Next => "next",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown view slot '{0}' (expected current or next)")]
pub struct UnknownViewSlot(pub String);

impl FromStr for ViewSlot {
    type Err = UnknownViewSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" => Ok(ViewSlot::Current),
            "next" => Ok(ViewSlot::Next),
            _ => Err(UnknownViewSlot(s.to_string())),
        }
    }
}

/// Proof of which view a resolution was started for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTicket {
    slot: ViewSlot,
    generation: u64,
}

impl ViewTicket {
    pub fn slot(&self) -> ViewSlot {
        self.slot
    }
}

#[derive(Debug, Default)]
pub struct ViewTracker {
    generations: [AtomicU64; ViewSlot::ALL.len()],
}

impl ViewTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new view for `slot`, superseding any in flight
    pub fn begin(&self, slot: ViewSlot) -> ViewTicket {
        let generation = self.generations[slot.index()].fetch_add(1, Ordering::SeqCst) + 1;
        ViewTicket { slot, generation }
    }

    pub fn is_current(&self, ticket: &ViewTicket) -> bool {
        self.generations[ticket.slot.index()].load(Ordering::SeqCst) == ticket.generation
    }

    /// Number of slots tracked
    pub fn slot_count(&self) -> usize {
        self.generations.len()
    }
}
