//! Driver station - opens the configured controllers and polls the bindings
//!
//! The station is a two-state machine: it is created in `Connecting`, opens
//! every configured controller through a [`HidBackend`], and moves to
//! `Polling`, where each [`DriverStation::poll`] is one control cycle.

use chrono::{DateTime, Local};
use statum::{machine, state};
use std::collections::BTreeMap;
use tracing::{debug, error, info};

use crate::config::{ConfigError, ControllerKind, StationConfig};
use crate::controller::{
    ControllerGroup, HidBackend, HidController, HidError, Joystick, XboxController,
};

#[derive(Debug, thiserror::Error)]
pub enum StationError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Controller error: {0}")]
    Hid(#[from] HidError),
}

/// One binding's button state for a cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonReading {
    /// Any bound button is down
    pub held: bool,
    /// A bound button went down this cycle
    pub pressed: bool,
    /// A bound button came up this cycle
    pub released: bool,
}

/// Everything the bindings read in one cycle
#[derive(Debug, Clone)]
pub struct StationSnapshot {
    pub cycle: u64,
    pub timestamp: DateTime<Local>,
    pub buttons: BTreeMap<String, ButtonReading>,
    pub axes: BTreeMap<String, f64>,
}

impl StationSnapshot {
    /// Bindings that were pressed or released this cycle
    pub fn edges(&self) -> impl Iterator<Item = (&str, &ButtonReading)> {
        self.buttons
            .iter()
            .filter(|(_, reading)| reading.pressed || reading.released)
            .map(|(name, reading)| (name.as_str(), reading))
    }
}

#[state]
#[derive(Debug, Clone)]
pub enum StationState {
    Connecting,
    Polling,
}

#[machine]
pub struct DriverStation<S: StationState> {
    config: StationConfig,
    backend: Box<dyn HidBackend>,
    controllers: Vec<Box<dyn HidController>>,
    cycles: u64,
}

impl<S: StationState> DriverStation<S> {
    pub fn config(&self) -> &StationConfig {
        &self.config
    }
}

impl DriverStation<Connecting> {
    pub fn create(
        config: StationConfig,
        backend: Box<dyn HidBackend>,
    ) -> Result<Self, StationError> {
        config.validate()?;
        debug!(
            "Creating driver station for {} controllers",
            config.controllers.len()
        );
        Ok(Self::new(config, backend, Vec::new(), 0))
    }

    /// Opens every configured controller and transitions to `Polling`
    pub fn connect(mut self) -> Result<DriverStation<Polling>, StationError> {
        for (idx, spec) in self.config.controllers.iter().enumerate() {
            let hid = match self.backend.open(spec.port, spec.deadzone) {
                Ok(hid) => hid,
                Err(e) => {
                    error!("Failed to open controller {}: {}", idx + 1, e);
                    return Err(e.into());
                }
            };
            let controller: Box<dyn HidController> = match spec.kind {
                ControllerKind::Joystick => Box::new(Joystick::with_buttons(hid, spec.buttons)),
                ControllerKind::Xbox => Box::new(XboxController::with_buttons(hid, spec.buttons)),
            };
            info!(
                "Controller {}: {:?} on port {} ({} buttons, deadzone {})",
                idx + 1,
                spec.kind,
                spec.port,
                spec.buttons,
                spec.deadzone
            );
            self.controllers.push(controller);
        }

        info!("Driver station connected, transitioning to Polling state");
        Ok(self.transition())
    }
}

impl DriverStation<Polling> {
    /// Borrows every controller as a group, indexed in config order
    pub fn group(&mut self) -> ControllerGroup<'_> {
        group_of(&mut self.controllers)
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Runs one control cycle
    pub fn poll(&mut self) -> StationSnapshot {
        self.backend.pump();
        self.cycles += 1;

        let mut group = group_of(&mut self.controllers);

        let buttons: BTreeMap<String, ButtonReading> = self
            .config
            .buttons
            .iter()
            .map(|(name, map)| {
                let reading = ButtonReading {
                    held: group.any_button(map),
                    pressed: group.any_button_rise(map),
                    released: group.any_button_fall(map),
                };
                (name.clone(), reading)
            })
            .collect();

        let axes: BTreeMap<String, f64> = self
            .config
            .axes
            .iter()
            .map(|(name, axis)| (name.clone(), group.circularised_axis(*axis)))
            .collect();

        let snapshot = StationSnapshot {
            cycle: self.cycles,
            timestamp: Local::now(),
            buttons,
            axes,
        };

        for (name, reading) in snapshot.edges() {
            if reading.pressed {
                info!("'{}' pressed at {}", name, snapshot.timestamp.format("%H:%M:%S.%3f"));
            }
            if reading.released {
                info!("'{}' released at {}", name, snapshot.timestamp.format("%H:%M:%S.%3f"));
            }
        }
        debug!("Cycle {} axes: {:?}", snapshot.cycle, snapshot.axes);

        snapshot
    }
}

fn group_of(controllers: &mut [Box<dyn HidController>]) -> ControllerGroup<'_> {
    let mut group = ControllerGroup::new();
    for controller in controllers.iter_mut() {
        group.push(controller.as_mut());
    }
    group
}
