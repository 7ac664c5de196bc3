//! Several borrowed controllers addressed by (controller, index) pairs
//!
//! A [`ControllerGroup`] does not own its controllers; it borrows them for as
//! long as it lives, so toggle state stays with the controller and survives
//! rebuilding the group every cycle.

use tracing::warn;

use super::controller::{ControllerAxis, ControllerButton, HidController};

#[derive(Default)]
pub struct ControllerGroup<'a> {
    controllers: Vec<&'a mut dyn HidController>,
}

impl<'a> ControllerGroup<'a> {
    pub fn new() -> Self {
        Self {
            controllers: Vec::new(),
        }
    }

    /// Adds `controller` as the next index (the first one added is 1)
    pub fn with(mut self, controller: &'a mut dyn HidController) -> Self {
        self.push(controller);
        self
    }

    pub fn push(&mut self, controller: &'a mut dyn HidController) {
        self.controllers.push(controller);
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// The controller at 1-based index `cont`
    pub fn controller(&mut self, cont: i32) -> Option<&mut (dyn HidController + 'a)> {
        let idx = usize::try_from(cont)
            .ok()
            .and_then(|c| c.checked_sub(1))
            .filter(|idx| *idx < self.controllers.len());
        match idx {
            Some(idx) => Some(&mut *self.controllers[idx]),
            None => {
                warn!(
                    "No controller {} in group of {}",
                    cont,
                    self.controllers.len()
                );
                None
            }
        }
    }

    pub fn raw_axis(&mut self, cont: i32, axis: i32) -> f64 {
        self.controller(cont).map_or(0.0, |c| c.axis(axis))
    }

    pub fn axis(&mut self, pair: ControllerAxis) -> f64 {
        if pair.is_none() {
            return 0.0;
        }
        self.raw_axis(pair.controller, pair.axis)
    }

    pub fn raw_circularised_axis_against(&mut self, cont: i32, primary: i32, compare: i32) -> f64 {
        self.controller(cont)
            .map_or(0.0, |c| c.circularised_axis_against(primary, compare))
    }

    /// Circularises `primary` against `compare`
    ///
    /// Both axes must live on the same controller. When they don't, the
    /// comparison is dropped and `primary` is circularised on its own.
    pub fn circularised_axis_against(
        &mut self,
        primary: ControllerAxis,
        compare: ControllerAxis,
    ) -> f64 {
        if primary.is_none() {
            return 0.0;
        }
        if compare.is_none() || compare.controller != primary.controller {
            if !compare.is_none() {
                warn!(
                    "Cannot circularise {} against {} on another controller",
                    primary, compare
                );
            }
            return self.circularised_axis(primary);
        }
        self.raw_circularised_axis_against(primary.controller, primary.axis, compare.axis)
    }

    pub fn raw_circularised_axis(&mut self, cont: i32, axis: i32) -> f64 {
        self.controller(cont)
            .map_or(0.0, |c| c.circularised_axis(axis))
    }

    pub fn circularised_axis(&mut self, pair: ControllerAxis) -> f64 {
        if pair.is_none() {
            return 0.0;
        }
        self.raw_circularised_axis(pair.controller, pair.axis)
    }

    pub fn raw_button(&mut self, cont: i32, button: i32) -> bool {
        self.controller(cont).is_some_and(|c| c.button(button))
    }

    pub fn raw_button_rise(&mut self, cont: i32, button: i32) -> bool {
        self.controller(cont).is_some_and(|c| c.button_rise(button))
    }

    pub fn raw_button_fall(&mut self, cont: i32, button: i32) -> bool {
        self.controller(cont).is_some_and(|c| c.button_fall(button))
    }

    pub fn button(&mut self, pair: ControllerButton) -> bool {
        !pair.is_none() && self.raw_button(pair.controller, pair.button)
    }

    pub fn button_rise(&mut self, pair: ControllerButton) -> bool {
        !pair.is_none() && self.raw_button_rise(pair.controller, pair.button)
    }

    pub fn button_fall(&mut self, pair: ControllerButton) -> bool {
        !pair.is_none() && self.raw_button_fall(pair.controller, pair.button)
    }

    /// True when any button in `map` is held
    pub fn any_button(&mut self, map: &[ControllerButton]) -> bool {
        map.iter().fold(false, |any, pair| self.button(*pair) || any)
    }

    /// True when any button in `map` was pressed this poll
    ///
    /// Every entry is updated, so no toggle misses a cycle because an earlier
    /// entry already fired.
    pub fn any_button_rise(&mut self, map: &[ControllerButton]) -> bool {
        map.iter()
            .fold(false, |any, pair| self.button_rise(*pair) || any)
    }

    /// True when any button in `map` was released this poll
    pub fn any_button_fall(&mut self, map: &[ControllerButton]) -> bool {
        map.iter()
            .fold(false, |any, pair| self.button_fall(*pair) || any)
    }
}
