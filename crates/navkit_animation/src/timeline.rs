//! Timeline orchestration for multiple tweens
//!
//! A timeline is a set of property tweens on keyed elements, each starting at
//! an offset from the timeline start. Stage labels mark named points in time
//! so callers can tell which part of a sequence is playing.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::easing::Easing;
use crate::transform::{ElementKey, Property, TransformArena};

new_key_type! {
    pub struct TimelineEntryId;
}

/// An entry in a timeline
#[derive(Clone, Debug)]
struct TimelineEntry<K> {
    target: K,
    property: Property,
    /// Offset in milliseconds from timeline start
    offset_ms: f32,
    duration_ms: f32,
    from: f32,
    to: f32,
    easing: Easing,
}

impl<K> TimelineEntry<K> {
    /// Value at timeline time `time_ms`, or `None` before the entry starts
    fn sample(&self, time_ms: f32) -> Option<f32> {
        let local = time_ms - self.offset_ms;
        if local < 0.0 {
            return None;
        }
        if local >= self.duration_ms {
            return Some(self.to);
        }
        let t = self.easing.apply(local / self.duration_ms);
        Some(self.from + (self.to - self.from) * t)
    }
}

/// A timeline that orchestrates tweens on keyed elements
#[derive(Clone, Debug)]
pub struct Timeline<K: ElementKey> {
    entries: SlotMap<TimelineEntryId, TimelineEntry<K>>,
    labels: SmallVec<[(f32, &'static str); 4]>,
    current_time: f32,
    duration_ms: f32,
    playing: bool,
}

impl<K: ElementKey> Timeline<K> {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            labels: SmallVec::new(),
            current_time: 0.0,
            duration_ms: 0.0,
            playing: false,
        }
    }

    /// Add a tween of one property at a given offset
    #[allow(clippy::too_many_arguments)]
    pub fn add(
        &mut self,
        target: K,
        property: Property,
        offset_ms: f32,
        duration_ms: f32,
        from: f32,
        to: f32,
        easing: Easing,
    ) -> TimelineEntryId {
        let offset_ms = offset_ms.max(0.0);
        let duration_ms = duration_ms.max(0.0);
        let id = self.entries.insert(TimelineEntry {
            target,
            property,
            offset_ms,
            duration_ms,
            from,
            to,
            easing,
        });

        self.duration_ms = self.duration_ms.max(offset_ms + duration_ms);
        id
    }

    /// Mark a named stage beginning at `offset_ms`
    pub fn add_label(&mut self, label: &'static str, offset_ms: f32) {
        let offset_ms = offset_ms.max(0.0);
        let at = self
            .labels
            .iter()
            .position(|(t, _)| *t > offset_ms)
            .unwrap_or(self.labels.len());
        self.labels.insert(at, (offset_ms, label));
    }

    /// The latest label whose offset has been reached
    pub fn current_label(&self) -> Option<&'static str> {
        self.labels
            .iter()
            .take_while(|(t, _)| *t <= self.current_time)
            .last()
            .map(|(_, name)| *name)
    }

    pub fn start(&mut self) {
        self.current_time = 0.0;
        self.playing = true;
    }

    /// Whether the playhead has reached the end
    pub fn is_complete(&self) -> bool {
        self.current_time >= self.duration_ms
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.current_time
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance the timeline
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        if dt_ms.is_finite() {
            self.current_time += dt_ms.max(0.0);
        }

        if self.current_time >= self.duration_ms {
            self.current_time = self.duration_ms;
            self.playing = false;
        }
    }

    /// Get the current value for an entry (its `from` value before it starts)
    pub fn value(&self, id: TimelineEntryId) -> Option<f32> {
        let entry = self.entries.get(id)?;
        Some(entry.sample(self.current_time).unwrap_or(entry.from))
    }

    /// Write every started entry's current value into the arena
    ///
    /// Entries that have not reached their offset leave their element
    /// untouched. Writes to unmounted elements are dropped.
    pub fn apply(&self, arena: &mut TransformArena<K>) {
        for (_, entry) in self.entries.iter() {
            if let Some(value) = entry.sample(self.current_time) {
                arena.set(entry.target, entry.property, value);
            }
        }
    }
}

impl<K: ElementKey> Default for Timeline<K> {
    fn default() -> Self {
        Self::new()
    }
}
