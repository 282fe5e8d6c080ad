//! Navkit Animation System
//!
//! Spring smoothing, proximity curves, and cancelable timeline orchestration.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Proximity Curves**: pointer distance to target magnitude
//! - **Timelines**: tweens on keyed elements at time offsets, with stage labels
//! - **Orchestration**: one live open/close sequence per drawer, canceled and
//!   rebuilt from the current transforms when interrupted

pub mod easing;
pub mod orchestrator;
pub mod proximity;
pub mod scheduler;
pub mod spring;
pub mod timeline;
pub mod transform;
pub mod transition;

pub use easing::Easing;
pub use orchestrator::{
    DrawerState, SequenceState, TimelineOrchestrator, TransitionError, TransitionPlan,
    TransitionToken,
};
pub use proximity::ProximityCurve;
pub use scheduler::{AnimationScheduler, SpringId};
pub use spring::{Spring, SpringConfig};
pub use timeline::{Timeline, TimelineEntryId};
pub use transform::{ElementKey, Property, Transform, TransformArena};
pub use transition::ValueTransition;
