//! Staggered drawer menu
//!
//! A navigation panel that slides in from the left or right edge behind a
//! cascade of decorative color layers, then reveals its entries one by one.
//!
//! Open sequence, all on one timeline:
//!
//! 1. layers slide in, each `layer_stagger_ms` after the previous
//! 2. the panel slides in `panel_gap_ms` after the last layer starts
//! 3. entry labels rise and un-rotate once the panel is partly in,
//!    `item_stagger_ms` apart
//!
//! Close is a single simultaneous slide of layers and panel back off-screen.
//! When it completes the labels are put back to their hidden transform so the
//! next open starts from the same place as the first.
//!
//! # Example
//!
//! ```ignore
//! let mut drawer = StaggeredDrawer::new(DrawerConfig::default(), NavTheme::default())?;
//! drawer.set_entries(vec![
//!     MenuEntry::new("Home", "/customer"),
//!     MenuEntry::new("History", "/customer/history"),
//! ]);
//! drawer.mount();
//! drawer.set_open(true);
//!
//! // host frame loop
//! let view = drawer.frame(dt);
//! ```

use std::time::Duration;

use navkit_animation::{
    DrawerState, Easing, Property, SequenceState, Timeline, TimelineOrchestrator,
    TransformArena, TransitionPlan, TransitionToken, Transform,
};
use navkit_core::{active_index, NavError, Result};
use serde::{Deserialize, Serialize};

use crate::shared::EMPTY_PLACEHOLDER;
use crate::theme::NavTheme;
use crate::toggle::{ToggleIndicator, ToggleView};

/// Edge the drawer slides in from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawerPosition {
    Left,
    #[default]
    Right,
}

impl DrawerPosition {
    /// Horizontal translation that puts an element fully off-screen
    pub fn offscreen_x(&self) -> f32 {
        match self {
            DrawerPosition::Left => -100.0,
            DrawerPosition::Right => 100.0,
        }
    }
}

/// Drawer timing values
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerConfig {
    pub position: DrawerPosition,
    pub layer_stagger_ms: f32,
    pub layer_duration_ms: f32,
    /// Delay between the last layer and the panel
    pub panel_gap_ms: f32,
    pub panel_duration_ms: f32,
    /// Fraction of the panel slide after which labels start
    pub items_start_ratio: f32,
    pub item_duration_ms: f32,
    pub item_stagger_ms: f32,
    pub close_duration_ms: f32,
    /// Label offset while hidden, in percent of its height
    pub hidden_label_y_percent: f32,
    /// Label tilt while hidden, in degrees
    pub hidden_label_rotate: f32,
    /// Show "01", "02", ... next to entries
    pub numbering: bool,
    /// Request close after an entry is activated
    pub close_on_select: bool,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            position: DrawerPosition::Right,
            layer_stagger_ms: 70.0,
            layer_duration_ms: 500.0,
            panel_gap_ms: 80.0,
            panel_duration_ms: 650.0,
            items_start_ratio: 0.15,
            item_duration_ms: 1000.0,
            item_stagger_ms: 100.0,
            close_duration_ms: 320.0,
            hidden_label_y_percent: 140.0,
            hidden_label_rotate: 10.0,
            numbering: true,
            close_on_select: false,
        }
    }
}

impl DrawerConfig {
    pub fn validate(&self) -> Result<()> {
        let durations = [
            ("layer_stagger_ms", self.layer_stagger_ms),
            ("layer_duration_ms", self.layer_duration_ms),
            ("panel_gap_ms", self.panel_gap_ms),
            ("panel_duration_ms", self.panel_duration_ms),
            ("item_duration_ms", self.item_duration_ms),
            ("item_stagger_ms", self.item_stagger_ms),
            ("close_duration_ms", self.close_duration_ms),
        ];
        for (name, value) in durations {
            if !(value.is_finite() && value >= 0.0) {
                return Err(NavError::InvalidConfig(format!(
                    "{name} must be a non-negative duration, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.items_start_ratio) {
            return Err(NavError::InvalidConfig(format!(
                "items_start_ratio must be within 0..=1, got {}",
                self.items_start_ratio
            )));
        }
        Ok(())
    }

    fn hidden_label(&self) -> Transform {
        Transform::IDENTITY
            .with_y_percent(self.hidden_label_y_percent)
            .with_rotate(self.hidden_label_rotate)
    }
}

/// One menu entry, supplied by the layout collaborator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub label: String,
    pub aria_label: String,
    pub link: String,
}

impl MenuEntry {
    /// Entry whose accessible label matches its visible label
    pub fn new(label: impl Into<String>, link: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            aria_label: label.clone(),
            label,
            link: link.into(),
        }
    }

    pub fn aria_label(mut self, aria_label: impl Into<String>) -> Self {
        self.aria_label = aria_label.into();
        self
    }
}

/// Animated parts of the drawer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawerElement {
    Layer(usize),
    Panel,
    Label(usize),
    Number(usize),
}

/// Timeline builder for one drawer's current shape
struct StaggerPlan<'a> {
    config: &'a DrawerConfig,
    layers: usize,
    entries: usize,
}

impl<'a> StaggerPlan<'a> {
    fn new(config: &'a DrawerConfig, theme: &NavTheme, entries: &[MenuEntry]) -> Self {
        Self {
            config,
            layers: theme.layer_colors.len(),
            entries: entries.len(),
        }
    }

    fn offscreen(&self) -> f32 {
        self.config.position.offscreen_x()
    }

    /// Put layers and panel off-screen on the configured edge
    fn park(&self, arena: &mut TransformArena<DrawerElement>) {
        let x = self.offscreen();
        for i in 0..self.layers {
            arena.set(DrawerElement::Layer(i), Property::XPercent, x);
        }
        arena.set(DrawerElement::Panel, Property::XPercent, x);
    }

    fn panel_offset_ms(&self) -> f32 {
        if self.layers == 0 {
            return 0.0;
        }
        (self.layers - 1) as f32 * self.config.layer_stagger_ms + self.config.panel_gap_ms
    }
}

impl TransitionPlan<DrawerElement> for StaggerPlan<'_> {
    fn is_mounted(&self, arena: &TransformArena<DrawerElement>) -> bool {
        arena.contains(DrawerElement::Panel)
            && (0..self.layers).all(|i| arena.contains(DrawerElement::Layer(i)))
    }

    fn forward(&self, arena: &TransformArena<DrawerElement>) -> Timeline<DrawerElement> {
        let config = self.config;
        let mut tl = Timeline::new();
        let current = |key, property, fallback| arena.value(key, property).unwrap_or(fallback);

        if self.layers > 0 {
            tl.add_label("layers", 0.0);
        }
        for i in 0..self.layers {
            let key = DrawerElement::Layer(i);
            tl.add(
                key,
                Property::XPercent,
                i as f32 * config.layer_stagger_ms,
                config.layer_duration_ms,
                current(key, Property::XPercent, self.offscreen()),
                0.0,
                Easing::Power4Out,
            );
        }

        let panel_at = self.panel_offset_ms();
        tl.add_label("panel", panel_at);
        tl.add(
            DrawerElement::Panel,
            Property::XPercent,
            panel_at,
            config.panel_duration_ms,
            current(DrawerElement::Panel, Property::XPercent, self.offscreen()),
            0.0,
            Easing::Power4Out,
        );

        if self.entries == 0 {
            return tl;
        }

        let items_at = panel_at + config.panel_duration_ms * config.items_start_ratio;
        tl.add_label("labels", items_at);
        for i in 0..self.entries {
            let at = items_at + i as f32 * config.item_stagger_ms;
            let label = DrawerElement::Label(i);
            tl.add(
                label,
                Property::YPercent,
                at,
                config.item_duration_ms,
                current(label, Property::YPercent, config.hidden_label_y_percent),
                0.0,
                Easing::Power4Out,
            );
            tl.add(
                label,
                Property::Rotate,
                at,
                config.item_duration_ms,
                current(label, Property::Rotate, config.hidden_label_rotate),
                0.0,
                Easing::Power4Out,
            );

            let number = DrawerElement::Number(i);
            if arena.contains(number) {
                tl.add(
                    number,
                    Property::Opacity,
                    at,
                    config.item_duration_ms,
                    current(number, Property::Opacity, 0.0),
                    1.0,
                    Easing::Power2Out,
                );
            }
        }
        tl
    }

    fn reverse(&self, arena: &TransformArena<DrawerElement>) -> Timeline<DrawerElement> {
        let mut tl = Timeline::new();
        let targets = (0..self.layers)
            .map(DrawerElement::Layer)
            .chain(std::iter::once(DrawerElement::Panel));
        for key in targets {
            tl.add(
                key,
                Property::XPercent,
                0.0,
                self.config.close_duration_ms,
                arena.value(key, Property::XPercent).unwrap_or(0.0),
                self.offscreen(),
                Easing::Power3In,
            );
        }
        tl
    }

    fn settle_closed(&self, arena: &mut TransformArena<DrawerElement>) {
        // The edge may have changed while the reverse was running
        self.park(arena);
        let hidden = self.config.hidden_label();
        for i in 0..self.entries {
            let label = DrawerElement::Label(i);
            if arena.contains(label) {
                arena.insert(label, hidden);
            }
            arena.set(DrawerElement::Number(i), Property::Opacity, 0.0);
        }
    }
}

/// Background layer as painted
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayerView {
    pub color: String,
    pub transform: Transform,
}

/// Menu entry as painted
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MenuItemView {
    pub label: String,
    pub aria_label: String,
    pub link: String,
    pub active: bool,
    /// Theme accent, set on the active entry only
    pub accent: Option<String>,
    pub number: Option<String>,
    pub number_opacity: f32,
    pub transform: Transform,
}

/// Per-frame output for the drawer
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DrawerView {
    pub state: DrawerState,
    pub position: DrawerPosition,
    pub layers: Vec<LayerView>,
    pub panel: Transform,
    pub items: Vec<MenuItemView>,
    /// Set when there are no entries to show
    pub placeholder: Option<&'static str>,
    pub toggle: ToggleView,
}

/// The staggered drawer
pub struct StaggeredDrawer {
    config: DrawerConfig,
    theme: NavTheme,
    entries: Vec<MenuEntry>,
    current_route: Option<String>,
    arena: TransformArena<DrawerElement>,
    orchestrator: TimelineOrchestrator<DrawerElement>,
    toggle: ToggleIndicator,
    mounted: bool,
}

impl StaggeredDrawer {
    pub fn new(config: DrawerConfig, theme: NavTheme) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            theme,
            entries: Vec::new(),
            current_route: None,
            arena: TransformArena::new(),
            orchestrator: TimelineOrchestrator::new(),
            toggle: ToggleIndicator::new(),
            mounted: false,
        })
    }

    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn state(&self) -> DrawerState {
        self.orchestrator.state()
    }

    pub fn sequence_state(&self) -> SequenceState {
        self.orchestrator.sequence_state()
    }

    pub fn live_token(&self) -> Option<TransitionToken> {
        self.orchestrator.live_token()
    }

    /// Number of transition tokens issued since creation
    pub fn tokens_issued(&self) -> u64 {
        self.orchestrator.issued()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Current transform of one element, if mounted
    pub fn transform(&self, element: DrawerElement) -> Option<Transform> {
        self.arena.get(element)
    }

    /// Create every element in its closed position
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.arena.clear();
        let offscreen = Transform::IDENTITY.with_x_percent(self.config.position.offscreen_x());
        for i in 0..self.theme.layer_colors.len() {
            self.arena.insert(DrawerElement::Layer(i), offscreen);
        }
        self.arena.insert(DrawerElement::Panel, offscreen);
        self.mount_entries(0);
        self.mounted = true;
        tracing::debug!(
            layers = self.theme.layer_colors.len(),
            entries = self.entries.len(),
            "drawer mounted"
        );
    }

    /// Cancel any in-flight sequence and drop all elements
    pub fn unmount(&mut self) {
        self.orchestrator.unmount();
        self.arena.clear();
        self.toggle.reset();
        self.mounted = false;
        tracing::debug!("drawer unmounted");
    }

    /// Replace the menu entries
    ///
    /// Labels at surviving indices keep their transforms. Added labels appear
    /// revealed if the drawer is fully open and hidden otherwise; while
    /// opening, the sequence is rebuilt so they join the stagger.
    pub fn set_entries(&mut self, entries: Vec<MenuEntry>) {
        let previous = self.entries.len();
        self.entries = entries;
        if !self.mounted {
            return;
        }

        for i in self.entries.len()..previous {
            self.arena.remove(DrawerElement::Label(i));
            self.arena.remove(DrawerElement::Number(i));
        }
        self.mount_entries(previous);

        let plan = StaggerPlan::new(&self.config, &self.theme, &self.entries);
        match self.orchestrator.rebuild_open(&mut self.arena, &plan) {
            Ok(Some(token)) => {
                tracing::debug!(token = token.generation(), "open rebuilt for new entries")
            }
            Ok(None) => {}
            Err(err) => tracing::debug!(error = %err, "open rebuild skipped"),
        }
    }

    /// Mount labels and numbers from index `from` on
    fn mount_entries(&mut self, from: usize) {
        let open = self.orchestrator.state() == DrawerState::Open;
        let (label, number) = if open {
            (Transform::IDENTITY, Transform::IDENTITY)
        } else {
            (
                self.config.hidden_label(),
                Transform::IDENTITY.with_opacity(0.0),
            )
        };
        for i in from..self.entries.len() {
            self.arena.insert(DrawerElement::Label(i), label);
            if self.config.numbering {
                self.arena.insert(DrawerElement::Number(i), number);
            }
        }
    }

    pub fn set_current_route(&mut self, route: Option<&str>) {
        self.current_route = route.map(str::to_string);
    }

    /// Change the slide-in edge
    ///
    /// Closed elements move immediately. A sequence in flight keeps the edge
    /// it was built with and the drawer parks on the new edge once closed.
    pub fn set_position(&mut self, position: DrawerPosition) {
        if position == self.config.position {
            return;
        }
        self.config.position = position;
        if self.mounted && self.orchestrator.state() == DrawerState::Closed {
            StaggerPlan::new(&self.config, &self.theme, &self.entries).park(&mut self.arena);
        }
    }

    /// Drive the drawer from the external `is_open` input
    ///
    /// Returns the token of the sequence this call started, or `None` if the
    /// request was a no-op (already there, or not mounted).
    pub fn set_open(&mut self, open: bool) -> Option<TransitionToken> {
        let plan = StaggerPlan::new(&self.config, &self.theme, &self.entries);
        let result = if open {
            self.orchestrator.request_open(&mut self.arena, &plan)
        } else {
            self.orchestrator.request_close(&mut self.arena, &plan)
        };

        match result {
            Ok(Some(token)) => {
                self.toggle.set_open(open);
                Some(token)
            }
            Ok(None) => None,
            Err(err) => {
                tracing::debug!(open, error = %err, "drawer transition ignored");
                None
            }
        }
    }

    pub fn toggle(&mut self) -> Option<TransitionToken> {
        let open = !self.orchestrator.state().is_opening_or_open();
        self.set_open(open)
    }

    /// Activate an entry by index, returning its link
    pub fn activate(&mut self, index: usize) -> Result<String> {
        let link = self
            .entries
            .get(index)
            .map(|entry| entry.link.clone())
            .ok_or_else(|| NavError::UnknownItem(format!("menu entry {index}")))?;
        tracing::debug!(%link, "menu entry activated");
        if self.config.close_on_select {
            self.set_open(false);
        }
        Ok(link)
    }

    /// Advance the live sequence by `dt` and return the view to paint
    pub fn frame(&mut self, dt: Duration) -> DrawerView {
        let dt_ms = dt.as_secs_f32() * 1000.0;
        let plan = StaggerPlan::new(&self.config, &self.theme, &self.entries);
        self.orchestrator.tick(dt_ms, &mut self.arena, &plan);
        self.toggle.step(dt_ms);
        self.view()
    }

    /// Whether another frame would change anything
    pub fn is_animating(&self) -> bool {
        self.orchestrator.state().is_transitioning()
    }

    pub fn view(&self) -> DrawerView {
        let offscreen = Transform::IDENTITY.with_x_percent(self.config.position.offscreen_x());
        let element = |key| self.arena.get(key).unwrap_or(offscreen);

        let layers = self
            .theme
            .layer_colors
            .iter()
            .enumerate()
            .map(|(i, color)| LayerView {
                color: color.clone(),
                transform: element(DrawerElement::Layer(i)),
            })
            .collect();

        let active = active_index(
            self.entries.iter().map(|entry| Some(entry.link.as_str())),
            self.current_route.as_deref(),
        );
        let hidden = self.config.hidden_label();
        let items = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| MenuItemView {
                label: entry.label.clone(),
                aria_label: entry.aria_label.clone(),
                link: entry.link.clone(),
                active: active == Some(i),
                accent: (active == Some(i)).then(|| self.theme.accent_color.clone()),
                number: self.config.numbering.then(|| format!("{:02}", i + 1)),
                number_opacity: self
                    .arena
                    .value(DrawerElement::Number(i), Property::Opacity)
                    .unwrap_or(0.0),
                transform: self.arena.get(DrawerElement::Label(i)).unwrap_or(hidden),
            })
            .collect::<Vec<_>>();

        let open = self.toggle.is_open();
        DrawerView {
            state: self.orchestrator.state(),
            position: self.config.position,
            layers,
            panel: element(DrawerElement::Panel),
            placeholder: items.is_empty().then_some(EMPTY_PLACEHOLDER),
            items,
            toggle: ToggleView {
                text: self.toggle.text(),
                icon_rotate: self.toggle.icon_rotate(),
                color: self.theme.toggle_color(open).to_string(),
                aria_expanded: open,
            },
        }
    }
}
