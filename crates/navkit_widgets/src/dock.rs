//! Magnifying dock
//!
//! A fixed toolbar whose icons grow as the pointer approaches them. Each
//! frame the panel reads the shared pointer signal once, resolves every
//! slot's target size through the proximity curve, and lets the slot's
//! spring chase it.
//!
//! # Example
//!
//! ```ignore
//! let mut dock = DockPanel::new(DockConfig::default())?;
//! dock.set_items(vec![
//!     DockItem::new("Home").icon("home").route("/customer"),
//!     DockItem::new("Discounts").icon("percent").route("/customer/discounts"),
//! ]);
//! dock.set_current_route(Some("/customer/discounts"));
//!
//! // host event loop
//! dock.handle_pointer(PointerEvent::Move { x, y });
//! let view = dock.frame(dt);
//! ```

use std::fmt;
use std::time::Duration;

use navkit_animation::{
    AnimationScheduler, Easing, ProximityCurve, Spring, SpringConfig, SpringId, ValueTransition,
};
use navkit_core::{
    active_index, HoverEvent, KeyCode, NavError, PointerEvent, PointerSignal, Rect, Result,
};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::shared::{ActivateFn, ItemAnimationState};

/// Dock tuning values
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    /// Icon size with the pointer far away
    pub base_size: f32,
    /// Icon size with the pointer on its center
    pub magnification: f32,
    /// Pointer distance at which magnification stops
    pub distance: f32,
    /// Panel height while idle
    pub panel_height: f32,
    /// Minimum panel height while hovered
    pub dock_height: f32,
    /// Tooltip fade duration
    pub label_fade_ms: f32,
    /// Tooltip vertical travel while fading in
    pub label_rise: f32,
    pub spring: SpringConfig,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            base_size: 50.0,
            magnification: 70.0,
            distance: 200.0,
            panel_height: 68.0,
            dock_height: 256.0,
            label_fade_ms: 200.0,
            label_rise: 10.0,
            spring: SpringConfig::dock(),
        }
    }
}

impl DockConfig {
    pub fn validate(&self) -> Result<()> {
        self.curve()?;
        self.spring.validate()?;
        if self.magnification < self.base_size {
            return Err(NavError::InvalidConfig(format!(
                "magnification ({}) must not be smaller than base_size ({})",
                self.magnification, self.base_size
            )));
        }
        if !(self.label_fade_ms.is_finite() && self.label_fade_ms >= 0.0) {
            return Err(NavError::InvalidConfig(format!(
                "label_fade_ms must not be negative, got {}",
                self.label_fade_ms
            )));
        }
        Ok(())
    }

    pub fn curve(&self) -> Result<ProximityCurve> {
        ProximityCurve::new(self.base_size, self.magnification, self.distance)
    }

    /// Panel height while the pointer is over it
    ///
    /// Tall enough for a fully magnified icon plus its tooltip.
    pub fn hovered_height(&self) -> f32 {
        self.dock_height.max(self.magnification * 1.5 + 4.0)
    }
}

/// One dock entry, supplied by the navigation collaborator
#[derive(Clone)]
pub struct DockItem {
    key: String,
    icon: String,
    label: String,
    route_path: Option<String>,
    on_activate: Option<ActivateFn>,
}

impl DockItem {
    /// Create an item; its key defaults to the label
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            key: label.clone(),
            icon: String::new(),
            label,
            route_path: None,
            on_activate: None,
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn route(mut self, path: impl Into<String>) -> Self {
        self.route_path = Some(path.into());
        self
    }

    pub fn on_activate<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_activate = Some(std::sync::Arc::new(callback));
        self
    }

    pub fn item_key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn route_path(&self) -> Option<&str> {
        self.route_path.as_deref()
    }
}

impl fmt::Debug for DockItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DockItem")
            .field("key", &self.key)
            .field("icon", &self.icon)
            .field("label", &self.label)
            .field("route_path", &self.route_path)
            .finish_non_exhaustive()
    }
}

/// Animation state owned by one slot
struct DockSlot {
    size: SpringId,
    hovered: bool,
    layout: Option<Rect>,
    label: ValueTransition,
}

/// Per-frame output for one item
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DockItemView {
    pub key: String,
    pub icon: String,
    pub label: String,
    pub size: f32,
    pub active: bool,
    /// Hover state of this item
    pub label_visible: bool,
    /// Tooltip fade progress; keeps easing out after the hover ends
    pub label_opacity: f32,
    pub label_offset_y: f32,
}

/// Per-frame output for the dock
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DockView {
    pub panel_height: f32,
    pub items: Vec<DockItemView>,
}

impl DockView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the highlighted item
    pub fn active(&self) -> Option<usize> {
        self.items.iter().position(|item| item.active)
    }
}

/// The magnifying dock
pub struct DockPanel {
    config: DockConfig,
    curve: ProximityCurve,
    items: Vec<DockItem>,
    slots: FxHashMap<String, DockSlot>,
    scheduler: AnimationScheduler,
    pointer: PointerSignal,
    panel_height: Spring,
    current_route: Option<String>,
}

impl DockPanel {
    pub fn new(config: DockConfig) -> Result<Self> {
        config.validate()?;
        let curve = config.curve()?;
        let panel_height = Spring::new(config.spring, config.panel_height);
        Ok(Self {
            config,
            curve,
            items: Vec::new(),
            slots: FxHashMap::default(),
            scheduler: AnimationScheduler::new(),
            pointer: PointerSignal::new(),
            panel_height,
            current_route: None,
        })
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn items(&self) -> &[DockItem] {
        &self.items
    }

    /// Shared pointer handle for hosts that write pointer position directly
    pub fn pointer(&self) -> PointerSignal {
        self.pointer.clone()
    }

    /// Replace the item list
    ///
    /// Slots are matched by key: surviving keys keep their animation state,
    /// removed keys drop it, new keys start at the base size.
    pub fn set_items(&mut self, items: Vec<DockItem>) {
        let keys: FxHashSet<&str> = items.iter().map(|item| item.key.as_str()).collect();
        if keys.len() != items.len() {
            tracing::warn!("dock items contain duplicate keys; duplicates share one slot");
        }

        let scheduler = &mut self.scheduler;
        self.slots.retain(|key, slot| {
            let keep = keys.contains(key.as_str());
            if !keep {
                scheduler.remove_spring(slot.size);
            }
            keep
        });

        for item in &items {
            if self.slots.contains_key(&item.key) {
                continue;
            }
            let size = self
                .scheduler
                .add_spring(Spring::new(self.config.spring, self.config.base_size));
            self.slots.insert(
                item.key.clone(),
                DockSlot {
                    size,
                    hovered: false,
                    layout: None,
                    label: ValueTransition::at_rest(0.0),
                },
            );
        }

        tracing::debug!(count = items.len(), "dock items updated");
        self.items = items;
    }

    pub fn set_current_route(&mut self, route: Option<&str>) {
        self.current_route = route.map(str::to_string);
    }

    /// Apply a pointer event to the shared signal
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.pointer.apply(event);
    }

    /// Record where the host laid out an item
    pub fn set_layout(&mut self, key: &str, rect: Rect) -> Result<()> {
        self.slot_mut(key)?.layout = Some(rect);
        Ok(())
    }

    /// Forget an item's layout (e.g. it was scrolled out or hidden)
    pub fn clear_layout(&mut self, key: &str) -> Result<()> {
        self.slot_mut(key)?.layout = None;
        Ok(())
    }

    pub fn handle_hover(&mut self, key: &str, event: HoverEvent) -> Result<()> {
        self.slot_mut(key)?.hovered = event.is_hovered();
        Ok(())
    }

    /// Invoke an item's activation callback (click)
    pub fn activate(&self, key: &str) -> Result<()> {
        let item = self
            .items
            .iter()
            .find(|item| item.key == key)
            .ok_or_else(|| unknown_item(key))?;
        tracing::debug!(key, "dock item activated");
        if let Some(callback) = &item.on_activate {
            callback();
        }
        Ok(())
    }

    /// Keyboard activation; returns whether the key activated the item
    pub fn handle_key(&self, key: &str, code: KeyCode) -> Result<bool> {
        if !code.is_activation() {
            return Ok(false);
        }
        self.activate(key).map(|_| true)
    }

    /// Advance all animations by `dt` and return the view to paint
    pub fn frame(&mut self, dt: Duration) -> DockView {
        let dt_secs = dt.as_secs_f32();
        // One sample for every slot in this frame
        let sample = self.pointer.sample();

        for slot in self.slots.values_mut() {
            let center = slot.layout.and_then(|rect| rect.center_x());
            let target = self.curve.target(sample, center);
            self.scheduler
                .with_spring_mut(slot.size, |spring| spring.set_target(target));

            let fade_to = if slot.hovered { 1.0 } else { 0.0 };
            slot.label.retarget(fade_to, self.config.label_fade_ms, Easing::Linear);
            slot.label.step(dt_secs * 1000.0);
        }
        self.scheduler.tick(dt_secs);

        let height = if sample.is_absent() {
            self.config.panel_height
        } else {
            self.config.hovered_height()
        };
        self.panel_height.step_toward(height, dt_secs);

        tracing::trace!(?sample, slots = self.slots.len(), "dock frame");
        self.view()
    }

    /// The view as of the last frame
    pub fn view(&self) -> DockView {
        let active = active_index(
            self.items.iter().map(DockItem::route_path),
            self.current_route.as_deref(),
        );

        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let slot = self.slots.get(&item.key);
                let size = slot
                    .and_then(|slot| self.scheduler.get_spring(slot.size))
                    .map(Spring::value)
                    .unwrap_or(self.config.base_size);
                let label_opacity = slot.map(|slot| slot.label.value()).unwrap_or(0.0);
                DockItemView {
                    key: item.key.clone(),
                    icon: item.icon.clone(),
                    label: item.label.clone(),
                    size,
                    active: active == Some(index),
                    label_visible: slot.is_some_and(|slot| slot.hovered),
                    label_opacity,
                    label_offset_y: -self.config.label_rise * label_opacity,
                }
            })
            .collect();

        DockView {
            panel_height: self.panel_height.value(),
            items,
        }
    }

    pub fn animation_state(&self, key: &str) -> Option<ItemAnimationState> {
        let slot = self.slots.get(key)?;
        let spring = self.scheduler.get_spring(slot.size)?;
        Some(ItemAnimationState {
            target_magnitude: spring.target(),
            rendered_magnitude: spring.value(),
            velocity: spring.velocity(),
            hovered: slot.hovered,
        })
    }

    /// Whether another frame would change anything
    pub fn is_animating(&self) -> bool {
        self.scheduler.has_active_animations()
            || !self.panel_height.is_settled()
            || self.slots.values().any(|slot| !slot.label.is_finished())
    }

    fn slot_mut(&mut self, key: &str) -> Result<&mut DockSlot> {
        self.slots.get_mut(key).ok_or_else(|| unknown_item(key))
    }
}

fn unknown_item(key: &str) -> NavError {
    tracing::warn!(key, "unknown dock item");
    NavError::UnknownItem(key.to_string())
}
