use crate::easing::Easing;

/// A fixed-duration eased tween between two values that can be retargeted
/// mid-flight from wherever it currently is
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueTransition {
    start: f32,
    end: f32,
    duration_ms: f32,
    elapsed_ms: f32,
    easing: Easing,
    value: f32,
}

impl ValueTransition {
    pub fn new(start: f32, end: f32, duration_ms: f32, easing: Easing) -> Self {
        Self {
            start,
            end,
            duration_ms: duration_ms.max(1e-3),
            elapsed_ms: 0.0,
            easing,
            value: start,
        }
    }

    /// A finished transition resting on `value`
    pub fn at_rest(value: f32) -> Self {
        let mut t = Self::new(value, value, 1.0, Easing::Linear);
        t.elapsed_ms = t.duration_ms;
        t
    }

    /// Head for `end` starting from the current value
    pub fn retarget(&mut self, end: f32, duration_ms: f32, easing: Easing) {
        if end == self.end {
            return;
        }
        *self = Self::new(self.value, end, duration_ms, easing);
    }

    pub fn step(&mut self, dt_ms: f32) {
        if self.is_finished() {
            self.value = self.end;
            return;
        }
        self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.duration_ms);
        let t = self.easing.apply(self.elapsed_ms / self.duration_ms);
        self.value = self.start + (self.end - self.start) * t;
        if self.is_finished() {
            self.value = self.end;
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.end
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_reaches_target() {
        let mut t = ValueTransition::new(0.0, 1.0, 200.0, Easing::Linear);
        t.step(80.0);
        assert!(t.value() > 0.0 && t.value() < 1.0);
        t.step(120.0);
        assert_eq!(t.value(), 1.0);
        assert!(t.is_finished());
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let mut t = ValueTransition::new(0.0, 1.0, 100.0, Easing::Linear);
        t.step(50.0);
        let mid = t.value();
        t.retarget(0.0, 100.0, Easing::Linear);
        assert_eq!(t.value(), mid);
        t.step(100.0);
        assert_eq!(t.value(), 0.0);
    }

    #[test]
    fn retarget_to_same_end_keeps_progress() {
        let mut t = ValueTransition::new(0.0, 1.0, 100.0, Easing::Linear);
        t.step(50.0);
        t.retarget(1.0, 100.0, Easing::Linear);
        t.step(50.0);
        assert!(t.is_finished());
    }

    #[test]
    fn at_rest_is_finished() {
        let t = ValueTransition::at_rest(0.25);
        assert!(t.is_finished());
        assert_eq!(t.value(), 0.25);
    }
}
