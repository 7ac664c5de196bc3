//! Hardware seam for human interface devices
//!
//! Everything above this module talks to a controller through [`GenericHid`],
//! so the same controller code runs against gilrs hardware
//! ([`super::gamepad_bus`]) or the in-memory [`SimulatedHid`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, info};

/// Errors raised while binding a device
#[derive(Debug, thiserror::Error)]
pub enum HidError {
    #[error("Failed to initialize input backend: {0}")]
    Initialization(String),

    #[error("No controller connected on port {0}")]
    PortNotConnected(u32),
}

/// Raw access to one input device
///
/// Axes are 0-based and buttons 1-based. Indices the device does not have
/// read as neutral (`0.0` / `false`).
pub trait GenericHid {
    fn port(&self) -> u32;

    fn raw_axis(&self, axis: i32) -> f64;

    fn raw_button(&self, button: i32) -> bool;
}

impl GenericHid for Box<dyn GenericHid> {
    fn port(&self) -> u32 {
        (**self).port()
    }

    fn raw_axis(&self, axis: i32) -> f64 {
        (**self).raw_axis(axis)
    }

    fn raw_button(&self, button: i32) -> bool {
        (**self).raw_button(button)
    }
}

/// Source of devices for the driver station
pub trait HidBackend {
    /// Refreshes device state; called once at the start of every cycle
    fn pump(&mut self);

    /// Binds the device on `port`
    fn open(&mut self, port: u32, deadzone: f32) -> Result<Box<dyn GenericHid>, HidError>;
}

#[derive(Debug, Default)]
struct SimulatedState {
    axes: HashMap<i32, f64>,
    buttons: HashMap<i32, bool>,
}

/// In-memory device whose values are set by hand
///
/// Clones share state, so a test can keep one clone and drive the device
/// while a controller owns the other.
#[derive(Debug, Clone)]
pub struct SimulatedHid {
    port: u32,
    state: Rc<RefCell<SimulatedState>>,
}

impl SimulatedHid {
    pub fn new(port: u32) -> Self {
        Self {
            port,
            state: Rc::new(RefCell::new(SimulatedState::default())),
        }
    }

    pub fn set_axis(&self, axis: i32, value: f64) {
        self.state.borrow_mut().axes.insert(axis, value);
    }

    pub fn set_button(&self, button: i32, pressed: bool) {
        self.state.borrow_mut().buttons.insert(button, pressed);
    }

    /// Returns every axis to centre and releases every button
    pub fn reset(&self) {
        let mut state = self.state.borrow_mut();
        state.axes.clear();
        state.buttons.clear();
    }
}

impl GenericHid for SimulatedHid {
    fn port(&self) -> u32 {
        self.port
    }

    fn raw_axis(&self, axis: i32) -> f64 {
        self.state.borrow().axes.get(&axis).copied().unwrap_or(0.0)
    }

    fn raw_button(&self, button: i32) -> bool {
        self.state
            .borrow()
            .buttons
            .get(&button)
            .copied()
            .unwrap_or(false)
    }
}

/// Backend handing out [`SimulatedHid`] devices
///
/// Only ports registered with [`SimulatedBus::attach`] can be opened.
#[derive(Debug, Default)]
pub struct SimulatedBus {
    devices: HashMap<u32, SimulatedHid>,
    pumps: u64,
}

impl SimulatedBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plugs a device into `port` and returns a handle for driving it
    pub fn attach(&mut self, port: u32) -> SimulatedHid {
        info!("Attaching simulated controller on port {}", port);
        self.devices
            .entry(port)
            .or_insert_with(|| SimulatedHid::new(port))
            .clone()
    }

    /// Number of cycles pumped so far
    pub fn pumps(&self) -> u64 {
        self.pumps
    }
}

impl HidBackend for SimulatedBus {
    fn pump(&mut self) {
        self.pumps += 1;
    }

    fn open(&mut self, port: u32, deadzone: f32) -> Result<Box<dyn GenericHid>, HidError> {
        debug!(
            "Opening simulated controller on port {} (deadzone {} ignored)",
            port, deadzone
        );
        self.devices
            .get(&port)
            .cloned()
            .map(|hid| Box::new(hid) as Box<dyn GenericHid>)
            .ok_or(HidError::PortNotConnected(port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let hid = SimulatedHid::new(2);
        let driver = hid.clone();
        driver.set_axis(1, -0.5);
        driver.set_button(3, true);

        assert_eq!(hid.port(), 2);
        assert_eq!(hid.raw_axis(1), -0.5);
        assert!(hid.raw_button(3));
        assert!(!hid.raw_button(4));
        assert_eq!(hid.raw_axis(7), 0.0);

        driver.reset();
        assert_eq!(hid.raw_axis(1), 0.0);
        assert!(!hid.raw_button(3));
    }

    #[test]
    fn bus_opens_only_attached_ports() {
        let mut bus = SimulatedBus::new();
        let driver = bus.attach(0);
        driver.set_button(1, true);

        let opened = bus.open(0, 0.05).expect("port 0 is attached");
        assert!(opened.raw_button(1));

        match bus.open(1, 0.05) {
            Err(HidError::PortNotConnected(1)) => {}
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("port 1 should not open"),
        }

        bus.pump();
        bus.pump();
        assert_eq!(bus.pumps(), 2);
    }
}
