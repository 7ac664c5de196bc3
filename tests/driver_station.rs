use fieldpad::controller::{
    ControllerButton, HidController, JoyAxis, SimulatedBus, XboxButton,
};
use fieldpad::{DriverStation, StationConfig, StationError};

const CONFIG: &str = r#"
    poll_interval_ms = 5

    [[controllers]]
    port = 0
    kind = "joystick"

    [[controllers]]
    port = 1
    kind = "xbox"

    [buttons]
    shoot = [{ controller = 1, button = 1 }, { controller = 2, button = 6 }]
    intake = [{ controller = 2, button = 1 }]

    [axes]
    forward = { controller = 1, axis = 1 }
    strafe = { controller = 1, axis = 0 }
    lift = { controller = 2, axis = 5 }
"#;

#[test]
fn edges_are_reported_once() {
    let mut bus = SimulatedBus::new();
    let joystick = bus.attach(0);
    let pad = bus.attach(1);

    let config = StationConfig::from_toml_str(CONFIG).expect("valid config");
    let mut station = DriverStation::create(config, Box::new(bus))
        .expect("config validates")
        .connect()
        .expect("both ports attached");

    let idle = station.poll();
    assert_eq!(idle.cycle, 1);
    assert_eq!(idle.edges().count(), 0);
    assert!(!idle.buttons["shoot"].held);

    joystick.set_button(1, true);
    let pressed = station.poll();
    let shoot = pressed.buttons["shoot"];
    assert!(shoot.held && shoot.pressed && !shoot.released);
    assert!(!pressed.buttons["intake"].held);

    let held = station.poll();
    assert!(held.buttons["shoot"].held);
    assert!(!held.buttons["shoot"].pressed);

    // second button in the same map keeps the binding held
    pad.set_button(XboxButton::RightBumper.into(), true);
    joystick.set_button(1, false);
    let swapped = station.poll();
    let shoot = swapped.buttons["shoot"];
    assert!(shoot.held && shoot.pressed && shoot.released);

    pad.set_button(XboxButton::RightBumper.into(), false);
    let released = station.poll();
    let shoot = released.buttons["shoot"];
    assert!(!shoot.held && !shoot.pressed && shoot.released);
    assert_eq!(released.edges().map(|(name, _)| name).collect::<Vec<_>>(), vec!["shoot"]);

    assert_eq!(station.cycles(), 5);
}

#[test]
fn axes_use_controller_circularisation() {
    let mut bus = SimulatedBus::new();
    let joystick = bus.attach(0);
    let pad = bus.attach(1);

    let config = StationConfig::from_toml_str(CONFIG).expect("valid config");
    let mut station = DriverStation::create(config, Box::new(bus))
        .expect("config validates")
        .connect()
        .expect("both ports attached");

    joystick.set_axis(JoyAxis::X.into(), 1.0);
    joystick.set_axis(JoyAxis::Y.into(), 1.0);
    pad.set_axis(5, 1.0);
    pad.set_axis(4, 1.0);

    let snapshot = station.poll();
    let forward = snapshot.axes["forward"];
    let strafe = snapshot.axes["strafe"];
    assert!((forward * forward + strafe * strafe - 1.0).abs() < 1e-9);
    assert_eq!(snapshot.axes["lift"], 1.0);
}

#[test]
fn group_exposes_configured_controllers() {
    let mut bus = SimulatedBus::new();
    let _joystick = bus.attach(0);
    let pad = bus.attach(1);

    let config = StationConfig::from_toml_str(CONFIG).expect("valid config");
    let mut station = DriverStation::create(config, Box::new(bus))
        .expect("config validates")
        .connect()
        .expect("both ports attached");

    pad.set_button(XboxButton::Start.into(), true);
    let mut group = station.group();
    assert_eq!(group.len(), 2);
    assert_eq!(group.controller(2).map(|c| c.current_port()), Some(1));
    assert!(group.button(ControllerButton::new(2, XboxButton::Start.into())));
    assert!(group.button_rise(ControllerButton::new(2, XboxButton::Start.into())));
}

#[test]
fn missing_port_fails_connect() {
    let mut bus = SimulatedBus::new();
    bus.attach(0);

    let config = StationConfig::from_toml_str(CONFIG).expect("valid config");
    let result = DriverStation::create(config, Box::new(bus))
        .expect("config validates")
        .connect();
    assert!(matches!(result, Err(StationError::Hid(_))));
}

#[test]
fn invalid_config_is_rejected_on_create() {
    let mut config = StationConfig::default();
    config.poll_interval_ms = 0;
    let result = DriverStation::create(config, Box::new(SimulatedBus::new()));
    assert!(matches!(result, Err(StationError::Config(_))));
}
