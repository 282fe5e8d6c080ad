//! Navkit Widgets
//!
//! Navigation widgets built on `navkit_animation`:
//!
//! - [`DockPanel`]: toolbar whose icons magnify with pointer proximity
//! - [`StaggeredDrawer`]: slide-in menu with layered, staggered open/close
//!
//! Widgets are headless. The host feeds input events and layout rectangles,
//! calls `frame` once per rendering tick, and paints the returned view.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use navkit_widgets::{DockConfig, DockItem, DockPanel};
//! use navkit_core::{PointerEvent, Rect};
//!
//! let mut dock = DockPanel::new(DockConfig::default()).unwrap();
//! dock.set_items(vec![DockItem::new("Home").route("/customer")]);
//! dock.set_layout("Home", Rect::new(0.0, 0.0, 50.0, 50.0)).unwrap();
//!
//! dock.handle_pointer(PointerEvent::Move { x: 25.0, y: 10.0 });
//! let view = dock.frame(Duration::from_millis(16));
//! assert!(view.items[0].size > 50.0);
//! ```

pub mod dock;
pub mod drawer;
pub mod shared;
pub mod theme;
pub mod toggle;

pub use dock::{DockConfig, DockItem, DockItemView, DockPanel, DockView};
pub use drawer::{
    DrawerConfig, DrawerElement, DrawerPosition, DrawerView, LayerView, MenuEntry, MenuItemView,
    StaggeredDrawer,
};
pub use shared::{ActivateFn, ItemAnimationState, EMPTY_PLACEHOLDER};
pub use theme::NavTheme;
pub use toggle::{ToggleIndicator, ToggleView};
