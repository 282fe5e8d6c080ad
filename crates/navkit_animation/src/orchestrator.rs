//! Open/close sequence orchestration
//!
//! One orchestrator per drawer instance. It owns at most one live timeline
//! and the token that identifies it. Any new request first drops the live
//! timeline and invalidates its token, then builds the next timeline from the
//! arena's current transforms, so an interrupted sequence hands over without
//! a jump.
//!
//! ```text
//!   Closed --open--> Opening --done--> Open
//!     ^               |    ^            |
//!    done          close  open        close
//!     |               v    |            |
//!   Closing <---------+----+------------+
//! ```

use serde::Serialize;
use thiserror::Error;

use crate::timeline::Timeline;
use crate::transform::{ElementKey, TransformArena};

/// Externally visible drawer state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawerState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl DrawerState {
    /// Whether a timeline is in flight
    pub fn is_transitioning(&self) -> bool {
        matches!(self, DrawerState::Opening | DrawerState::Closing)
    }

    /// Whether the drawer is open or heading there
    pub fn is_opening_or_open(&self) -> bool {
        matches!(self, DrawerState::Opening | DrawerState::Open)
    }
}

/// Handle identifying one started sequence
///
/// Tokens are never reused; a token stays live until its sequence completes
/// or a newer request supersedes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionToken(u64);

impl TransitionToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// What the live timeline is doing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceState {
    Idle,
    /// Forward sequence; `stage` is the latest stage label reached
    Forward { stage: &'static str },
    Reverse,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("transition requested before elements were mounted")]
    NotMounted,
}

/// Builds the timelines for one widget
///
/// Both builders read the arena as it is right now, which is the snapshot of
/// wherever an interrupted sequence left each element.
pub trait TransitionPlan<K: ElementKey> {
    /// Whether every element the plan animates is mounted
    fn is_mounted(&self, arena: &TransformArena<K>) -> bool;

    fn forward(&self, arena: &TransformArena<K>) -> Timeline<K>;

    fn reverse(&self, arena: &TransformArena<K>) -> Timeline<K>;

    /// Restore pre-open values after a reverse sequence completes
    fn settle_closed(&self, arena: &mut TransformArena<K>);
}

struct LiveSequence<K: ElementKey> {
    token: TransitionToken,
    timeline: Timeline<K>,
}

/// Drives the open/close state machine for one drawer
pub struct TimelineOrchestrator<K: ElementKey> {
    state: DrawerState,
    live: Option<LiveSequence<K>>,
    next_generation: u64,
}

impl<K: ElementKey> TimelineOrchestrator<K> {
    pub fn new() -> Self {
        Self {
            state: DrawerState::Closed,
            live: None,
            next_generation: 1,
        }
    }

    pub fn state(&self) -> DrawerState {
        self.state
    }

    pub fn sequence_state(&self) -> SequenceState {
        match (&self.live, self.state) {
            (Some(live), DrawerState::Opening) => SequenceState::Forward {
                stage: live.timeline.current_label().unwrap_or("start"),
            },
            (Some(_), DrawerState::Closing) => SequenceState::Reverse,
            _ => SequenceState::Idle,
        }
    }

    pub fn live_token(&self) -> Option<TransitionToken> {
        self.live.as_ref().map(|live| live.token)
    }

    pub fn is_live(&self, token: TransitionToken) -> bool {
        self.live_token() == Some(token)
    }

    /// Number of tokens issued so far
    pub fn issued(&self) -> u64 {
        self.next_generation - 1
    }

    /// Request the open state
    ///
    /// Returns the new token, or `None` when already open or opening.
    pub fn request_open<P: TransitionPlan<K>>(
        &mut self,
        arena: &mut TransformArena<K>,
        plan: &P,
    ) -> Result<Option<TransitionToken>, TransitionError> {
        if self.state.is_opening_or_open() {
            tracing::trace!(state = ?self.state, "open request ignored");
            return Ok(None);
        }
        self.begin(arena, plan, DrawerState::Opening).map(Some)
    }

    /// Request the closed state
    ///
    /// Returns the new token, or `None` when already closed or closing.
    pub fn request_close<P: TransitionPlan<K>>(
        &mut self,
        arena: &mut TransformArena<K>,
        plan: &P,
    ) -> Result<Option<TransitionToken>, TransitionError> {
        if !self.state.is_opening_or_open() {
            tracing::trace!(state = ?self.state, "close request ignored");
            return Ok(None);
        }
        self.begin(arena, plan, DrawerState::Closing).map(Some)
    }

    /// Rebuild an in-flight open from the current transforms
    ///
    /// For when the plan's elements changed mid-open. Returns `None` unless
    /// the drawer is opening.
    pub fn rebuild_open<P: TransitionPlan<K>>(
        &mut self,
        arena: &mut TransformArena<K>,
        plan: &P,
    ) -> Result<Option<TransitionToken>, TransitionError> {
        if self.state != DrawerState::Opening {
            return Ok(None);
        }
        self.begin(arena, plan, DrawerState::Opening).map(Some)
    }

    fn begin<P: TransitionPlan<K>>(
        &mut self,
        arena: &mut TransformArena<K>,
        plan: &P,
        next: DrawerState,
    ) -> Result<TransitionToken, TransitionError> {
        if !plan.is_mounted(arena) {
            return Err(TransitionError::NotMounted);
        }

        // Kill first: nothing below may run while the old token is live
        if let Some(old) = self.cancel() {
            tracing::debug!(token = old.generation(), "superseded in-flight sequence");
        }

        let mut timeline = match next {
            DrawerState::Opening => plan.forward(arena),
            _ => plan.reverse(arena),
        };
        timeline.start();
        timeline.apply(arena);

        let token = TransitionToken(self.next_generation);
        self.next_generation += 1;

        tracing::debug!(from = ?self.state, to = ?next, token = token.0, "sequence started");
        self.state = next;
        self.live = Some(LiveSequence { token, timeline });
        Ok(token)
    }

    /// Kill the live sequence where it stands
    ///
    /// Elements keep the values of the last applied frame. Callers must
    /// immediately start a new sequence or settle the state.
    fn cancel(&mut self) -> Option<TransitionToken> {
        self.live.take().map(|live| live.token)
    }

    /// Advance the live sequence by `dt_ms`
    ///
    /// Returns the terminal state when the sequence completed on this tick.
    pub fn tick<P: TransitionPlan<K>>(
        &mut self,
        dt_ms: f32,
        arena: &mut TransformArena<K>,
        plan: &P,
    ) -> Option<DrawerState> {
        let live = self.live.as_mut()?;
        live.timeline.tick(dt_ms);
        live.timeline.apply(arena);
        if !live.timeline.is_complete() {
            return None;
        }

        self.live = None;
        self.state = match self.state {
            DrawerState::Opening => DrawerState::Open,
            DrawerState::Closing => {
                plan.settle_closed(arena);
                DrawerState::Closed
            }
            settled => settled,
        };
        tracing::debug!(state = ?self.state, "sequence completed");
        Some(self.state)
    }

    /// Drop any in-flight sequence and return to `Closed`
    pub fn unmount(&mut self) {
        if let Some(token) = self.cancel() {
            tracing::debug!(token = token.generation(), "canceled on unmount");
        }
        self.state = DrawerState::Closed;
    }
}

impl<K: ElementKey> Default for TimelineOrchestrator<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::transform::{Property, Transform};

    const PANEL: u8 = 0;
    const LABEL: u8 = 1;

    /// One panel sliding over 100ms and one label revealed at 50ms
    struct SlidePlan;

    impl TransitionPlan<u8> for SlidePlan {
        fn is_mounted(&self, arena: &TransformArena<u8>) -> bool {
            arena.contains(PANEL) && arena.contains(LABEL)
        }

        fn forward(&self, arena: &TransformArena<u8>) -> Timeline<u8> {
            let mut tl = Timeline::new();
            let x = arena.value(PANEL, Property::XPercent).unwrap_or(-100.0);
            let y = arena.value(LABEL, Property::YPercent).unwrap_or(100.0);
            tl.add_label("panel", 0.0);
            tl.add(PANEL, Property::XPercent, 0.0, 100.0, x, 0.0, Easing::Linear);
            tl.add_label("labels", 50.0);
            tl.add(LABEL, Property::YPercent, 50.0, 100.0, y, 0.0, Easing::Linear);
            tl
        }

        fn reverse(&self, arena: &TransformArena<u8>) -> Timeline<u8> {
            let mut tl = Timeline::new();
            let x = arena.value(PANEL, Property::XPercent).unwrap_or(0.0);
            tl.add(PANEL, Property::XPercent, 0.0, 40.0, x, -100.0, Easing::Linear);
            tl
        }

        fn settle_closed(&self, arena: &mut TransformArena<u8>) {
            arena.set(LABEL, Property::YPercent, 100.0);
        }
    }

    fn mounted() -> TransformArena<u8> {
        let mut arena = TransformArena::new();
        arena.insert(PANEL, Transform::IDENTITY.with_x_percent(-100.0));
        arena.insert(LABEL, Transform::IDENTITY.with_y_percent(100.0));
        arena
    }

    fn run(orch: &mut TimelineOrchestrator<u8>, arena: &mut TransformArena<u8>, ms: u32) {
        for _ in 0..ms / 10 {
            orch.tick(10.0, arena, &SlidePlan);
        }
    }

    #[test]
    fn open_then_close_round_trip() {
        let mut arena = mounted();
        let mut orch = TimelineOrchestrator::new();

        let token = orch.request_open(&mut arena, &SlidePlan).unwrap();
        assert!(token.is_some());
        assert_eq!(orch.state(), DrawerState::Opening);
        run(&mut orch, &mut arena, 200);
        assert_eq!(orch.state(), DrawerState::Open);
        assert_eq!(orch.live_token(), None);
        assert_eq!(arena.value(LABEL, Property::YPercent), Some(0.0));

        orch.request_close(&mut arena, &SlidePlan).unwrap();
        run(&mut orch, &mut arena, 100);
        assert_eq!(orch.state(), DrawerState::Closed);
        assert_eq!(arena.value(PANEL, Property::XPercent), Some(-100.0));
        assert_eq!(arena.value(LABEL, Property::YPercent), Some(100.0));
    }

    #[test]
    fn terminal_requests_issue_no_token() {
        let mut arena = mounted();
        let mut orch = TimelineOrchestrator::new();
        assert_eq!(orch.request_close(&mut arena, &SlidePlan), Ok(None));
        assert_eq!(orch.issued(), 0);

        orch.request_open(&mut arena, &SlidePlan).unwrap();
        run(&mut orch, &mut arena, 200);
        let before = arena.get(PANEL);
        assert_eq!(orch.request_open(&mut arena, &SlidePlan), Ok(None));
        assert_eq!(orch.issued(), 1);
        assert_eq!(arena.get(PANEL), before);
    }

    #[test]
    fn interruption_supersedes_token_without_jump() {
        let mut arena = mounted();
        let mut orch = TimelineOrchestrator::new();

        let first = orch.request_open(&mut arena, &SlidePlan).unwrap().unwrap();
        run(&mut orch, &mut arena, 30);
        let mid = arena.value(PANEL, Property::XPercent).unwrap();
        assert!(mid > -100.0 && mid < 0.0);

        let second = orch.request_close(&mut arena, &SlidePlan).unwrap().unwrap();
        assert!(!orch.is_live(first));
        assert!(orch.is_live(second));
        assert_eq!(orch.sequence_state(), SequenceState::Reverse);
        assert_eq!(arena.value(PANEL, Property::XPercent), Some(mid));

        let third = orch.request_open(&mut arena, &SlidePlan).unwrap().unwrap();
        assert!(!orch.is_live(second));
        assert!(third.generation() > second.generation());
        run(&mut orch, &mut arena, 200);
        assert_eq!(orch.state(), DrawerState::Open);
        assert_eq!(arena.value(PANEL, Property::XPercent), Some(0.0));
        assert_eq!(arena.value(LABEL, Property::YPercent), Some(0.0));
    }

    #[test]
    fn rebuild_only_applies_while_opening() {
        let mut arena = mounted();
        let mut orch = TimelineOrchestrator::new();
        assert_eq!(orch.rebuild_open(&mut arena, &SlidePlan), Ok(None));

        let first = orch.request_open(&mut arena, &SlidePlan).unwrap().unwrap();
        run(&mut orch, &mut arena, 30);
        let mid = arena.value(PANEL, Property::XPercent);

        let rebuilt = orch.rebuild_open(&mut arena, &SlidePlan).unwrap().unwrap();
        assert!(!orch.is_live(first));
        assert!(orch.is_live(rebuilt));
        assert_eq!(orch.state(), DrawerState::Opening);
        assert_eq!(arena.value(PANEL, Property::XPercent), mid);

        run(&mut orch, &mut arena, 200);
        assert_eq!(orch.state(), DrawerState::Open);
        assert_eq!(orch.rebuild_open(&mut arena, &SlidePlan), Ok(None));
        assert_eq!(orch.issued(), 2);
    }

    #[test]
    fn forward_stage_follows_labels() {
        let mut arena = mounted();
        let mut orch = TimelineOrchestrator::new();
        assert_eq!(orch.sequence_state(), SequenceState::Idle);
        orch.request_open(&mut arena, &SlidePlan).unwrap();
        assert_eq!(orch.sequence_state(), SequenceState::Forward { stage: "panel" });
        run(&mut orch, &mut arena, 60);
        assert_eq!(orch.sequence_state(), SequenceState::Forward { stage: "labels" });
    }

    #[test]
    fn unmounted_elements_are_rejected() {
        let mut arena = TransformArena::new();
        let mut orch = TimelineOrchestrator::new();
        assert_eq!(
            orch.request_open(&mut arena, &SlidePlan),
            Err(TransitionError::NotMounted)
        );
        assert_eq!(orch.state(), DrawerState::Closed);
        assert_eq!(orch.issued(), 0);
    }

    #[test]
    fn unmount_cancels_live_sequence() {
        let mut arena = mounted();
        let mut orch = TimelineOrchestrator::new();
        let token = orch.request_open(&mut arena, &SlidePlan).unwrap().unwrap();
        orch.unmount();
        assert!(!orch.is_live(token));
        assert_eq!(orch.state(), DrawerState::Closed);
        assert_eq!(orch.tick(10.0, &mut arena, &SlidePlan), None);
    }
}
