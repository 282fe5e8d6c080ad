//! Drawer toggle indicator
//!
//! The trigger's plus icon turns into a cross while the drawer is open and
//! its caption swaps between "Menu" and "Close".

use navkit_animation::{Easing, ValueTransition};
use serde::Serialize;

const OPEN_ROTATION: f32 = 225.0;
const OPEN_SPIN_MS: f32 = 800.0;
const CLOSE_SPIN_MS: f32 = 350.0;

#[derive(Clone, Copy, Debug)]
pub struct ToggleIndicator {
    open: bool,
    icon: ValueTransition,
}

/// What the host paints for the toggle
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToggleView {
    pub text: &'static str,
    pub icon_rotate: f32,
    pub color: String,
    pub aria_expanded: bool,
}

impl ToggleIndicator {
    pub fn new() -> Self {
        Self {
            open: false,
            icon: ValueTransition::at_rest(0.0),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        if open == self.open {
            return;
        }
        self.open = open;
        if open {
            self.icon.retarget(OPEN_ROTATION, OPEN_SPIN_MS, Easing::Power4Out);
        } else {
            self.icon.retarget(0.0, CLOSE_SPIN_MS, Easing::Power3InOut);
        }
    }

    pub fn step(&mut self, dt_ms: f32) {
        self.icon.step(dt_ms);
    }

    pub fn text(&self) -> &'static str {
        if self.open {
            "Close"
        } else {
            "Menu"
        }
    }

    pub fn icon_rotate(&self) -> f32 {
        self.icon.value()
    }

    /// Snap back to the closed look
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ToggleIndicator {
    fn default() -> Self {
        Self::new()
    }
}
