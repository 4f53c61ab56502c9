//! Bounded marker discovery
//!
//! Map markers can show up well after the document is parsed, and no
//! mutation is guaranteed to announce them in time. The binding ticks this
//! state machine on a fixed interval until it leaves `Searching`.

/// State of the marker search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Searching { attempts: u32 },
    Found,
    TimedOut,
}

impl PollState {
    pub fn is_searching(&self) -> bool {
        matches!(self, Self::Searching { .. })
    }
}

/// `Searching -> Found | TimedOut`, capped at `max_attempts` ticks.
#[derive(Debug, Clone)]
pub struct MarkerPoll {
    state: PollState,
    max_attempts: u32,
}

impl MarkerPoll {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            state: PollState::Searching { attempts: 0 },
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    /// Record one check. Terminal states are sticky; ticking them again
    /// changes nothing.
    pub fn tick(&mut self, found: bool) -> PollState {
        if let PollState::Searching { attempts } = self.state {
            self.state = if found {
                PollState::Found
            } else if attempts + 1 >= self.max_attempts {
                PollState::TimedOut
            } else {
                PollState::Searching { attempts: attempts + 1 }
            };
        }
        self.state
    }
}
