//! Headless dock and drawer simulation
//!
//! Drives the widgets with a fixed 60 fps clock so animation curves can be
//! inspected without a renderer.

use std::time::Duration;

use anyhow::{Context, Result};
use navkit_core::{PointerEvent, Rect};
use navkit_widgets::{DockItem, DockPanel, DockView, DrawerView, MenuEntry, StaggeredDrawer};
use serde::Serialize;

use crate::config::NavkitConfig;

/// Simulated frame length
pub const FRAME: Duration = Duration::from_micros(16_667);

/// Gap between simulated dock slots
const SLOT_GAP: f32 = 10.0;

/// One pointer step of a dock simulation
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerStep {
    At(f32),
    Leave,
}

impl PointerStep {
    fn event(self) -> PointerEvent {
        match self {
            PointerStep::At(x) => PointerEvent::Move { x, y: 0.0 },
            PointerStep::Leave => PointerEvent::Leave,
        }
    }
}

/// Parse `"25,85,leave"`
pub fn parse_pointer(input: &str) -> Result<Vec<PointerStep>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(|step| {
            if step.eq_ignore_ascii_case("leave") {
                Ok(PointerStep::Leave)
            } else {
                step.parse::<f32>()
                    .map(PointerStep::At)
                    .with_context(|| format!("Invalid pointer position '{step}'"))
            }
        })
        .collect()
}

/// One scripted drawer request
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawerCommand {
    pub open: bool,
    pub at_ms: f32,
}

/// Parse `"open@0,close@120,open@200"`, sorted by time
pub fn parse_script(input: &str) -> Result<Vec<DrawerCommand>> {
    let mut commands = input
        .split(',')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(|step| {
            let (action, at) = step
                .split_once('@')
                .with_context(|| format!("Expected <open|close>@<ms>, got '{step}'"))?;
            let open = match action {
                "open" => true,
                "close" => false,
                other => anyhow::bail!("Unknown drawer action '{other}'"),
            };
            let at_ms: f32 = at
                .parse()
                .with_context(|| format!("Invalid time '{at}' in '{step}'"))?;
            if !(at_ms.is_finite() && at_ms >= 0.0) {
                anyhow::bail!("Time must be non-negative in '{step}'");
            }
            Ok(DrawerCommand { open, at_ms })
        })
        .collect::<Result<Vec<_>>>()?;
    commands.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
    Ok(commands)
}

/// Dock view after one pointer step
#[derive(Debug, Serialize)]
pub struct DockSnapshot {
    pub pointer: Option<f32>,
    pub view: DockView,
}

/// Hold each pointer step for `frames` frames over `items` evenly spaced slots
pub fn run_dock(
    config: &NavkitConfig,
    steps: &[PointerStep],
    items: usize,
    frames: usize,
) -> Result<Vec<DockSnapshot>> {
    let mut dock = DockPanel::new(config.dock.clone())?;
    dock.set_items(
        (1..=items)
            .map(|i| DockItem::new(format!("Item {i}")).route(format!("/item/{i}")))
            .collect(),
    );
    let size = config.dock.base_size;
    for i in 0..items {
        let rect = Rect::new(i as f32 * (size + SLOT_GAP), 0.0, size, size);
        dock.set_layout(&format!("Item {}", i + 1), rect)?;
    }

    let mut snapshots = Vec::with_capacity(steps.len());
    for step in steps {
        dock.handle_pointer(step.event());
        let mut view = dock.view();
        for _ in 0..frames {
            view = dock.frame(FRAME);
        }
        tracing::debug!(?step, animating = dock.is_animating(), "pointer step done");
        snapshots.push(DockSnapshot {
            pointer: match step {
                PointerStep::At(x) => Some(*x),
                PointerStep::Leave => None,
            },
            view,
        });
    }
    Ok(snapshots)
}

/// Drawer view at one simulated time
#[derive(Debug, Serialize)]
pub struct DrawerSnapshot {
    pub time_ms: f32,
    pub view: DrawerView,
}

/// Run a drawer script for `duration_ms`
///
/// Returns every frame when `every_frame` is set, otherwise only the last.
pub fn run_drawer(
    config: &NavkitConfig,
    script: &[DrawerCommand],
    entries: Vec<MenuEntry>,
    duration_ms: f32,
    every_frame: bool,
) -> Result<Vec<DrawerSnapshot>> {
    if !(duration_ms.is_finite() && duration_ms >= 0.0) {
        anyhow::bail!(
            "Duration must be a non-negative number of milliseconds, got {duration_ms}"
        );
    }
    let mut drawer = StaggeredDrawer::new(config.drawer.clone(), config.theme.clone())?;
    drawer.set_entries(entries);
    drawer.mount();

    let frame_ms = FRAME.as_secs_f32() * 1000.0;
    let mut pending = script.iter().peekable();
    let mut time_ms = 0.0;
    let mut snapshots = Vec::new();
    let mut view = drawer.view();

    loop {
        while let Some(command) = pending.next_if(|command| command.at_ms <= time_ms) {
            match drawer.set_open(command.open) {
                Some(token) => tracing::info!(
                    time_ms,
                    open = command.open,
                    token = token.generation(),
                    "transition started"
                ),
                None => tracing::info!(time_ms, open = command.open, "request had no effect"),
            }
        }
        if every_frame {
            snapshots.push(DrawerSnapshot {
                time_ms,
                view: view.clone(),
            });
        }
        if time_ms >= duration_ms {
            break;
        }
        view = drawer.frame(FRAME);
        time_ms += frame_ms;
    }

    if !every_frame {
        snapshots.push(DrawerSnapshot { time_ms, view });
    }
    Ok(snapshots)
}

/// Sample menu used by the drawer simulation
pub fn sample_entries() -> Vec<MenuEntry> {
    vec![
        MenuEntry::new("Home", "/"),
        MenuEntry::new("About", "/about"),
        MenuEntry::new("Services", "/services"),
        MenuEntry::new("Contact", "/contact"),
    ]
}
