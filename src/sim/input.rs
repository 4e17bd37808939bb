//! Per-tick input snapshot
//!
//! The host decodes its keyboard (or any other device) into logical
//! controls once per tick and hands the result to the round controller as
//! a plain value.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A logical control, keyed by roster slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    SteerLeft(u32),
    SteerRight(u32),
}

/// The two controls a participant listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlBindings {
    pub left: Control,
    pub right: Control,
}

impl ControlBindings {
    /// Standard bindings for roster slot `slot`
    pub fn for_slot(slot: u32) -> Self {
        Self {
            left: Control::SteerLeft(slot),
            right: Control::SteerRight(slot),
        }
    }
}

/// Steering direction applied for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    /// Counter-clockwise on screen (heading decreases)
    Left,
    /// Clockwise on screen (heading increases)
    Right,
}

impl Steer {
    /// Sign applied to the turn rate
    pub fn sign(self) -> f64 {
        match self {
            Steer::Left => -1.0,
            Steer::Right => 1.0,
        }
    }
}

/// Pressed/released state of every logical control for one tick.
/// Controls with no entry are released.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: HashMap<Control, bool>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, control: Control, pressed: bool) {
        self.held.insert(control, pressed);
    }

    pub fn press(&mut self, control: Control) {
        self.set(control, true);
    }

    pub fn release(&mut self, control: Control) {
        self.set(control, false);
    }

    /// Builder form of `press`
    pub fn with(mut self, control: Control) -> Self {
        self.press(control);
        self
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held.get(&control).copied().unwrap_or(false)
    }

    /// Resolve the steer direction for a set of bindings.
    /// Left wins when both are held.
    pub fn steer_for(&self, bindings: &ControlBindings) -> Option<Steer> {
        if self.is_held(bindings.left) {
            Some(Steer::Left)
        } else if self.is_held(bindings.right) {
            Some(Steer::Right)
        } else {
            None
        }
    }

    /// Hold exactly the control matching `steer` (or neither)
    pub fn apply_steer(&mut self, bindings: &ControlBindings, steer: Option<Steer>) {
        self.set(bindings.left, steer == Some(Steer::Left));
        self.set(bindings.right, steer == Some(Steer::Right));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_released_by_default() {
        let input = InputSnapshot::new();
        assert!(!input.is_held(Control::SteerLeft(0)));
        assert_eq!(input.steer_for(&ControlBindings::for_slot(0)), None);
    }

    #[test]
    fn test_left_wins_over_right() {
        let bindings = ControlBindings::for_slot(1);
        let input = InputSnapshot::new()
            .with(Control::SteerLeft(1))
            .with(Control::SteerRight(1));
        assert_eq!(input.steer_for(&bindings), Some(Steer::Left));
    }

    #[test]
    fn test_slots_are_independent() {
        let input = InputSnapshot::new().with(Control::SteerRight(0));
        assert_eq!(input.steer_for(&ControlBindings::for_slot(0)), Some(Steer::Right));
        assert_eq!(input.steer_for(&ControlBindings::for_slot(1)), None);
    }

    #[test]
    fn test_high_slots_do_not_alias() {
        let input = InputSnapshot::new().with(Control::SteerLeft(256));
        assert_eq!(input.steer_for(&ControlBindings::for_slot(0)), None);
        assert_eq!(input.steer_for(&ControlBindings::for_slot(256)), Some(Steer::Left));
    }

    #[test]
    fn test_release_and_apply_steer() {
        let bindings = ControlBindings::for_slot(0);
        let mut input = InputSnapshot::new().with(bindings.left);
        input.release(bindings.left);
        assert_eq!(input.steer_for(&bindings), None);

        input.apply_steer(&bindings, Some(Steer::Right));
        assert_eq!(input.steer_for(&bindings), Some(Steer::Right));
        input.apply_steer(&bindings, None);
        assert_eq!(input.steer_for(&bindings), None);
    }
}
