//! Two-axis flight-style joystick with circularised X/Y

use super::controller::{Controller, HidController, DEFAULT_BUTTON_COUNT};
use super::hid::GenericHid;

/// Raw axis indices of a joystick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum JoyAxis {
    X = 0,
    Y = 1,
    Z = 2,
    Throttle = 3,
}

impl JoyAxis {
    pub const TWIST: JoyAxis = JoyAxis::Z;
}

impl From<JoyAxis> for i32 {
    fn from(axis: JoyAxis) -> Self {
        axis as i32
    }
}

pub struct Joystick<H: GenericHid> {
    inner: Controller<H>,
}

impl<H: GenericHid> Joystick<H> {
    pub fn new(hid: H) -> Self {
        Self::with_buttons(hid, DEFAULT_BUTTON_COUNT)
    }

    pub fn with_buttons(hid: H, button_count: usize) -> Self {
        Self {
            inner: Controller::with_buttons(hid, button_count),
        }
    }

    pub fn hid(&self) -> &H {
        self.inner.hid()
    }
}

impl<H: GenericHid> HidController for Joystick<H> {
    fn button_count(&self) -> usize {
        self.inner.button_count()
    }

    fn current_port(&self) -> u32 {
        self.inner.current_port()
    }

    fn raw_axis(&self, axis: i32) -> f64 {
        self.inner.raw_axis(axis)
    }

    fn raw_button(&self, button: i32) -> bool {
        self.inner.raw_button(button)
    }

    fn button_rise(&mut self, button: i32) -> bool {
        self.inner.button_rise(button)
    }

    fn button_fall(&mut self, button: i32) -> bool {
        self.inner.button_fall(button)
    }

    fn circularised_axis_against(&self, primary: i32, compare: i32) -> f64 {
        circularise(self.axis(primary), self.axis(compare))
    }

    fn circularised_axis(&self, axis: i32) -> f64 {
        match axis {
            a if a == JoyAxis::X as i32 => self.circularised_axis_against(a, JoyAxis::Y.into()),
            a if a == JoyAxis::Y as i32 => self.circularised_axis_against(a, JoyAxis::X.into()),
            _ => self.axis(axis),
        }
    }
}

/// Maps `primary` from the unit square onto the unit disc given the other axis
///
/// Applied to both axes of a pair, `x * sqrt(1 - y^2/2)` keeps the resulting
/// vector inside the unit circle for every input in the square.
pub fn circularise(primary: f64, compare: f64) -> f64 {
    let primary = primary.clamp(-1.0, 1.0);
    let compare = compare.clamp(-1.0, 1.0);
    primary * (1.0 - compare * compare / 2.0).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::hid::SimulatedHid;

    const EPS: f64 = 1e-9;

    #[test]
    fn single_axis_is_unchanged() {
        assert!((circularise(1.0, 0.0) - 1.0).abs() < EPS);
        assert!((circularise(-0.4, 0.0) + 0.4).abs() < EPS);
        assert_eq!(circularise(0.0, 1.0), 0.0);
    }

    #[test]
    fn corner_lands_on_unit_circle() {
        let x = circularise(1.0, 1.0);
        let y = circularise(1.0, 1.0);
        assert!((x * x + y * y - 1.0).abs() < EPS);
        assert!((x - std::f64::consts::FRAC_1_SQRT_2).abs() < EPS);
    }

    #[test]
    fn magnitude_stays_within_unit_range() {
        let steps = 40;
        for i in 0..=steps {
            for j in 0..=steps {
                let x = -1.0 + 2.0 * i as f64 / steps as f64;
                let y = -1.0 + 2.0 * j as f64 / steps as f64;
                let cx = circularise(x, y);
                let cy = circularise(y, x);
                assert!(cx * cx + cy * cy <= 1.0 + EPS, "({x}, {y}) -> ({cx}, {cy})");
            }
        }
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        assert!((circularise(1.2, 0.0) - 1.0).abs() < EPS);
        assert!(circularise(0.5, 3.0).is_finite());
    }

    #[test]
    fn joystick_circularises_x_against_y() {
        let hid = SimulatedHid::new(0);
        let joystick = Joystick::new(hid.clone());
        hid.set_axis(JoyAxis::X as i32, 1.0);
        hid.set_axis(JoyAxis::Y as i32, -1.0);
        hid.set_axis(JoyAxis::Throttle as i32, 0.6);

        let cx = joystick.circularised_axis(JoyAxis::X.into());
        let cy = joystick.circularised_axis(JoyAxis::Y.into());
        assert!((cx - std::f64::consts::FRAC_1_SQRT_2).abs() < EPS);
        assert!((cy + std::f64::consts::FRAC_1_SQRT_2).abs() < EPS);

        // axes outside the stick pass straight through
        assert_eq!(joystick.circularised_axis(JoyAxis::Throttle.into()), 0.6);
        assert_eq!(JoyAxis::TWIST, JoyAxis::Z);
    }

    #[test]
    fn explicit_compare_axis() {
        let hid = SimulatedHid::new(0);
        let joystick = Joystick::new(hid.clone());
        hid.set_axis(JoyAxis::X as i32, 0.5);
        hid.set_axis(JoyAxis::Z as i32, 1.0);

        let expected = 0.5 * 0.5f64.sqrt();
        let got = joystick.circularised_axis_against(JoyAxis::X.into(), JoyAxis::Z.into());
        assert!((got - expected).abs() < EPS);
    }

    #[test]
    fn joystick_keeps_button_edges() {
        let hid = SimulatedHid::new(3);
        let mut joystick = Joystick::new(hid.clone());
        assert_eq!(joystick.button_count(), 12);
        assert_eq!(joystick.current_port(), 3);

        hid.set_button(2, true);
        assert!(joystick.button_rise(2));
        assert!(!joystick.button_rise(2));
        assert!(!joystick.button_fall(2));
        hid.set_button(2, false);
        assert!(joystick.button_fall(2));
    }
}
