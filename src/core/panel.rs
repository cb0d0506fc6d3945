//! Open/close state of the console panel.
//!
//! Only the states live here. How long a transition takes belongs to
//! whatever animates the panel, which calls
//! [`PanelState::finish_transition`] when it is done.

/// Visibility of the console panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum PanelState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl PanelState {
    /// Start opening. Returns `true` if the state changed.
    pub fn open(&mut self) -> bool {
        match self {
            PanelState::Closed | PanelState::Closing => {
                *self = PanelState::Opening;
                true
            }
            PanelState::Opening | PanelState::Open => false,
        }
    }

    /// Start closing. Returns `true` if the state changed.
    pub fn close(&mut self) -> bool {
        match self {
            PanelState::Open | PanelState::Opening => {
                *self = PanelState::Closing;
                true
            }
            PanelState::Closing | PanelState::Closed => false,
        }
    }

    /// Complete a pending transition.
    pub fn finish_transition(&mut self) {
        *self = match *self {
            PanelState::Opening => PanelState::Open,
            PanelState::Closing => PanelState::Closed,
            settled => settled,
        };
    }

    /// Close if open or opening, otherwise open.
    pub fn toggle(&mut self) {
        if self.is_open() || self.is_opening() {
            self.close();
        } else {
            self.open();
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        *self == PanelState::Open
    }

    #[inline]
    pub fn is_opening(&self) -> bool {
        *self == PanelState::Opening
    }

    #[inline]
    pub fn is_closing(&self) -> bool {
        *self == PanelState::Closing
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        *self == PanelState::Closed
    }
}
