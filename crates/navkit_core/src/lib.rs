//! Navkit Core
//!
//! Foundational primitives shared by the navigation animation engine:
//!
//! - **Pointer Signal**: one shared pointer sample read by every dock slot
//! - **Events**: pointer, hover and key input from the host
//! - **Geometry**: measured item rectangles
//! - **Routes**: active-item matching against the current route
//!
//! # Example
//!
//! ```rust
//! use navkit_core::{PointerSample, PointerSignal};
//!
//! let signal = PointerSignal::new();
//! let reader = signal.clone();
//!
//! signal.set(120.0);
//! assert_eq!(reader.sample(), PointerSample::At(120.0));
//!
//! signal.clear();
//! assert_eq!(reader.sample(), PointerSample::Absent);
//! ```

pub mod error;
pub mod events;
pub mod geometry;
pub mod pointer;
pub mod route;

pub use error::{NavError, Result};
pub use events::{HoverEvent, KeyCode, PointerEvent};
pub use geometry::Rect;
pub use pointer::{PointerSample, PointerSignal};
pub use route::{active_index, is_active};
