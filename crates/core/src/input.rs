//! Logical input contract.
//!
//! The scheduler never sees devices, only two questions per action: was it
//! pressed this tick (edge) and is it held (level).

use crate::types::InputAction;

pub trait InputSource {
    /// Went down during this tick.
    fn pressed(&self, action: InputAction) -> bool;
    /// Currently down.
    fn held(&self, action: InputAction) -> bool;
}

/// One tick's worth of input as two bitsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct InputFrame {
    pressed: u8,
    held: u8,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pressed this tick (and therefore held).
    pub fn press(mut self, action: InputAction) -> Self {
        self.set_pressed(action);
        self
    }

    /// Held from an earlier tick, no edge.
    pub fn hold(mut self, action: InputAction) -> Self {
        self.set_held(action, true);
        self
    }

    pub fn set_pressed(&mut self, action: InputAction) {
        self.pressed |= action.bit();
        self.held |= action.bit();
    }

    pub fn set_held(&mut self, action: InputAction, held: bool) {
        if held {
            self.held |= action.bit();
        } else {
            self.held &= !action.bit();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pressed == 0 && self.held == 0
    }
}

impl InputSource for InputFrame {
    fn pressed(&self, action: InputAction) -> bool {
        self.pressed & action.bit() != 0
    }

    fn held(&self, action: InputAction) -> bool {
        self.held & action.bit() != 0
    }
}
