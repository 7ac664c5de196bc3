//! Edge toggles for boolean inputs
//!
//! A [`Toggle`] remembers the last value it was fed and reports `true` for
//! exactly one update when the input crosses the edge it watches.

/// Which transition a [`Toggle`] reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEvent {
    /// false -> true
    OnRise,
    /// true -> false
    OnFall,
    /// Either direction
    OnChange,
}

#[derive(Debug, Clone)]
pub struct Toggle {
    event: ToggleEvent,
    last_state: bool,
}

impl Toggle {
    pub fn new(event: ToggleEvent) -> Self {
        Self::with_initial(event, false)
    }

    /// Creates a toggle that treats `state` as the previous input
    pub fn with_initial(event: ToggleEvent, state: bool) -> Self {
        Self {
            event,
            last_state: state,
        }
    }

    /// Feeds the current input and reports whether the watched edge occurred
    pub fn update(&mut self, value: bool) -> bool {
        let fired = value != self.last_state
            && match self.event {
                ToggleEvent::OnRise => value,
                ToggleEvent::OnFall => !value,
                ToggleEvent::OnChange => true,
            };
        self.last_state = value;
        fired
    }

    /// Last input passed to [`Toggle::update`]
    pub fn state(&self) -> bool {
        self.last_state
    }

    pub fn event(&self) -> ToggleEvent {
        self.event
    }
}
