//! Prior-state tracking for change highlighting.

use std::collections::HashMap;

use super::PortState;

/// How a port's state relates to what was seen on the previous tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// First time this port is observed in the session.
    Initial(PortState),
    /// Same state as last tick.
    Unchanged(PortState),
    /// Port was free and is now busy.
    BecameBusy,
    /// Port was busy and is now free.
    BecameFree,
}

/// Last observed state per port for one monitoring session.
///
/// Owned by a single render loop; never shared between modes.
#[derive(Debug, Default, Clone)]
pub struct PriorStates {
    states: HashMap<u16, PortState>,
}

impl PriorStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `state` for `port` and classify it against the previous value.
    ///
    /// The stored state is always replaced, changed or not.
    pub fn observe(&mut self, port: u16, state: PortState) -> Transition {
        match self.states.insert(port, state) {
            None => Transition::Initial(state),
            Some(prev) if prev == state => Transition::Unchanged(state),
            Some(_) => match state {
                PortState::Busy => Transition::BecameBusy,
                PortState::Free => Transition::BecameFree,
            },
        }
    }
}
