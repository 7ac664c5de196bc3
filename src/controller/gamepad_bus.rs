//! gilrs-backed controller access
//!
//! One [`GamepadBus`] owns the gilrs context; every [`GilrsHid`] it opens reads
//! through a shared handle to it. The bus must be pumped once per cycle so the
//! cached gamepad state gilrs keeps is current.

use gilrs::{Axis, Button, Event, EventType, GamepadId, Gilrs};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, error, info, warn};

use super::hid::{GenericHid, HidBackend, HidError};

/// Raw axis index -> gilrs axis
const RAW_AXES: [Axis; 6] = [
    Axis::LeftStickX,
    Axis::LeftStickY,
    Axis::LeftZ,
    Axis::RightZ,
    Axis::RightStickX,
    Axis::RightStickY,
];

/// 1-based button number -> gilrs button (slot 0 is button 1)
const RAW_BUTTONS: [Button; 12] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::Select,
    Button::Start,
    Button::LeftThumb,
    Button::RightThumb,
    Button::LeftTrigger2,
    Button::RightTrigger2,
];

pub struct GamepadBus {
    gilrs: Rc<RefCell<Gilrs>>,
}

impl GamepadBus {
    pub fn new() -> Result<Self, HidError> {
        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(HidError::Initialization(e.to_string()));
            }
        };

        {
            let connected: Vec<_> = gilrs.gamepads().collect();
            if connected.is_empty() {
                warn!("No gamepad connected yet");
            }
            for (id, gamepad) in connected {
                info!("  [{}] Name: {}, UUID: {:?}", id, gamepad.name(), gamepad.uuid());
            }
        }

        Ok(Self {
            gilrs: Rc::new(RefCell::new(gilrs)),
        })
    }

    /// Binds the gamepad whose gilrs id is `port`
    pub fn open(&self, port: u32, deadzone: f32) -> Result<GilrsHid, HidError> {
        let gilrs = self.gilrs.borrow();
        let (id, gamepad) = gilrs
            .gamepads()
            .find(|(id, _)| usize::from(*id) == port as usize)
            .ok_or(HidError::PortNotConnected(port))?;

        info!("Bound port {} to gamepad {} ({})", port, gamepad.name(), id);
        Ok(GilrsHid {
            gilrs: Rc::clone(&self.gilrs),
            id,
            port,
            deadzone,
        })
    }

    /// Drains pending gilrs events, updating the cached gamepad state
    pub fn pump(&self) {
        let mut gilrs = self.gilrs.borrow_mut();
        let mut drained = 0usize;
        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            drained += 1;
            match event {
                EventType::Connected => {
                    info!("Controller connected: {} ({})", gilrs.gamepad(id).name(), id)
                }
                EventType::Disconnected => warn!("Controller disconnected: {}", id),
                _ => {}
            }
        }
        if drained > 0 {
            debug!("Drained {} gilrs events", drained);
        }
    }
}

impl HidBackend for GamepadBus {
    fn pump(&mut self) {
        GamepadBus::pump(self);
    }

    fn open(&mut self, port: u32, deadzone: f32) -> Result<Box<dyn GenericHid>, HidError> {
        GamepadBus::open(self, port, deadzone).map(|hid| Box::new(hid) as Box<dyn GenericHid>)
    }
}

/// One gamepad read through the shared gilrs context
pub struct GilrsHid {
    gilrs: Rc<RefCell<Gilrs>>,
    id: GamepadId,
    port: u32,
    deadzone: f32,
}

impl GenericHid for GilrsHid {
    fn port(&self) -> u32 {
        self.port
    }

    fn raw_axis(&self, axis: i32) -> f64 {
        let Some(axis) = map_axis(axis) else {
            return 0.0;
        };
        let gilrs = self.gilrs.borrow();
        gilrs
            .connected_gamepad(self.id)
            .map_or(0.0, |gamepad| {
                apply_deadzone(gamepad.value(axis), self.deadzone) as f64
            })
    }

    fn raw_button(&self, button: i32) -> bool {
        let Some(button) = map_button(button) else {
            return false;
        };
        let gilrs = self.gilrs.borrow();
        gilrs
            .connected_gamepad(self.id)
            .is_some_and(|gamepad| gamepad.is_pressed(button))
    }
}

pub fn map_axis(axis: i32) -> Option<Axis> {
    usize::try_from(axis)
        .ok()
        .and_then(|idx| RAW_AXES.get(idx).copied())
}

pub fn map_button(button: i32) -> Option<Button> {
    usize::try_from(button)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| RAW_BUTTONS.get(idx).copied())
}

/// Zeroes values inside the deadzone and rescales the rest to the full range
pub fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    if value.abs() < deadzone {
        0.0
    } else {
        value.signum() * (value.abs() - deadzone) / (1.0 - deadzone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_indices_follow_hid_layout() {
        assert_eq!(map_axis(0), Some(Axis::LeftStickX));
        assert_eq!(map_axis(1), Some(Axis::LeftStickY));
        assert_eq!(map_axis(2), Some(Axis::LeftZ));
        assert_eq!(map_axis(3), Some(Axis::RightZ));
        assert_eq!(map_axis(4), Some(Axis::RightStickX));
        assert_eq!(map_axis(5), Some(Axis::RightStickY));
        assert_eq!(map_axis(6), None);
        assert_eq!(map_axis(-1), None);
    }

    #[test]
    fn buttons_are_one_based() {
        assert_eq!(map_button(0), None);
        assert_eq!(map_button(1), Some(Button::South));
        assert_eq!(map_button(3), Some(Button::West));
        assert_eq!(map_button(4), Some(Button::North));
        assert_eq!(map_button(8), Some(Button::Start));
        assert_eq!(map_button(12), Some(Button::RightTrigger2));
        assert_eq!(map_button(13), None);
        assert_eq!(map_button(-1), None);
    }

    #[test]
    fn deadzone_rescales_outside_band() {
        assert_eq!(apply_deadzone(0.04, 0.05), 0.0);
        assert_eq!(apply_deadzone(-0.04, 0.05), 0.0);
        assert!((apply_deadzone(1.0, 0.05) - 1.0).abs() < 1e-6);
        assert!((apply_deadzone(-1.0, 0.05) + 1.0).abs() < 1e-6);
        assert!((apply_deadzone(0.525, 0.05) - 0.5).abs() < 1e-6);
        assert_eq!(apply_deadzone(0.3, 0.0), 0.3);
    }
}
