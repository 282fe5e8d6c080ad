//! Input events
//!
//! Platform-agnostic input consumed by the dock and drawer. The host
//! translates its native pointer/keyboard events into these.

/// Pointer input over the dock panel
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved; `x` is the page-space horizontal position
    Move { x: f32, y: f32 },
    /// Pointer left the panel
    Leave,
}

impl PointerEvent {
    /// Horizontal position carried by the event, if any
    pub fn x(&self) -> Option<f32> {
        match self {
            PointerEvent::Move { x, .. } => Some(*x),
            PointerEvent::Leave => None,
        }
    }
}

/// Per-item hover input
///
/// Keyboard focus counts as hover so labels show for keyboard users too.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverEvent {
    Enter,
    Leave,
    Focus,
    Blur,
}

impl HoverEvent {
    /// Whether the item is hovered after this event
    pub fn is_hovered(&self) -> bool {
        matches!(self, HoverEvent::Enter | HoverEvent::Focus)
    }
}

/// Virtual key codes (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const SPACE: KeyCode = KeyCode(0x20);

    /// Keys that activate a focused button-like element
    pub fn is_activation(&self) -> bool {
        *self == KeyCode::ENTER || *self == KeyCode::SPACE
    }
}
