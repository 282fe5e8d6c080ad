//! Shared pointer signal
//!
//! The dock keeps exactly one pointer value. Every slot reads the same
//! [`PointerSample`] in a frame; the panel samples once and hands the copy
//! to each slot rather than letting slots read the signal on their own.

use std::cell::Cell;
use std::rc::Rc;

use crate::events::PointerEvent;

/// One reading of the pointer's horizontal position
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerSample {
    /// Pointer is not over the panel (treated as infinitely far away)
    #[default]
    Absent,
    /// Page-space horizontal position
    At(f32),
}

impl PointerSample {
    /// Position, if the pointer is present and the value is usable
    pub fn x(&self) -> Option<f32> {
        match *self {
            PointerSample::At(x) if x.is_finite() => Some(x),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.x().is_none()
    }
}

/// Single-threaded shared pointer value
///
/// Clones share the same cell; writes from the event handler are visible
/// to every reader on the next sample.
#[derive(Clone, Debug, Default)]
pub struct PointerSignal {
    value: Rc<Cell<PointerSample>>,
}

impl PointerSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, x: f32) {
        self.value.set(PointerSample::At(x));
    }

    pub fn clear(&self) {
        self.value.set(PointerSample::Absent);
    }

    /// Read the current value
    pub fn sample(&self) -> PointerSample {
        self.value.get()
    }

    /// Apply a pointer event
    pub fn apply(&self, event: PointerEvent) {
        match event.x() {
            Some(x) => self.set(x),
            None => self.clear(),
        }
    }
}
