use std::sync::Arc;

use serde::Serialize;

/// Activation callback supplied by the navigation collaborator
pub type ActivateFn = Arc<dyn Fn() + Send + Sync>;

/// Text shown in place of an empty menu
pub const EMPTY_PLACEHOLDER: &str = "No items";

/// Per-item animation state of a dock slot
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ItemAnimationState {
    pub target_magnitude: f32,
    pub rendered_magnitude: f32,
    pub velocity: f32,
    pub hovered: bool,
}
