//! Spring physics
//!
//! A damped harmonic oscillator that turns a jumpy target into continuous
//! motion. Integration uses RK4 over fixed sub-steps so light, stiff springs
//! (like the dock's) stay stable regardless of the host's frame rate.

use navkit_core::{NavError, Result};
use serde::{Deserialize, Serialize};

/// Largest integration step in seconds
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

/// Frame deltas above this are clamped (backgrounded tab, debugger pause)
const MAX_FRAME_DT: f32 = 0.1;

/// Displacement below which a slow spring is considered at rest
const REST_DELTA: f32 = 0.01;

/// Speed below which a close spring is considered at rest
const REST_SPEED: f32 = 0.01;

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Light, over-damped spring used for dock magnification
    pub fn dock() -> Self {
        Self::new(150.0, 12.0, 0.1)
    }

    /// Critically damped spring: fastest approach without overshoot
    pub fn critically_damped(stiffness: f32, mass: f32) -> Self {
        Self::new(stiffness, 2.0 * (stiffness * mass).sqrt(), mass)
    }

    /// Damping ratio (1.0 = critical, above = over-damped)
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(NavError::InvalidConfig(format!(
                "spring mass must be positive, got {}",
                self.mass
            )));
        }
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(NavError::InvalidConfig(format!(
                "spring stiffness must be positive, got {}",
                self.stiffness
            )));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(NavError::InvalidConfig(format!(
                "spring damping must not be negative, got {}",
                self.damping
            )));
        }
        Ok(())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::dock()
    }
}

/// A spring-animated scalar
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring at rest on `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Move the target; value and velocity carry over
    pub fn set_target(&mut self, target: f32) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Jump to `value` and stop
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Retarget and advance in one call, returning the new value
    pub fn step_toward(&mut self, target: f32, dt: f32) -> f32 {
        self.set_target(target);
        self.step(dt)
    }

    /// Advance by `dt` seconds, returning the new value
    pub fn step(&mut self, dt: f32) -> f32 {
        if self.is_settled() {
            return self.value;
        }

        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        if dt == 0.0 {
            return self.value;
        }

        let substeps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
        let h = dt / substeps as f32;
        for _ in 0..substeps {
            self.rk4(h);
        }

        if (self.target - self.value).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED {
            self.value = self.target;
            self.velocity = 0.0;
        }

        self.value
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        (stiffness * (self.target - x) - damping * v) / mass
    }

    fn rk4(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1x = v;
        let k1v = self.acceleration(x, v);

        let k2x = v + 0.5 * h * k1v;
        let k2v = self.acceleration(x + 0.5 * h * k1x, v + 0.5 * h * k1v);

        let k3x = v + 0.5 * h * k2v;
        let k3v = self.acceleration(x + 0.5 * h * k2x, v + 0.5 * h * k2v);

        let k4x = v + h * k3v;
        let k4v = self.acceleration(x + h * k3x, v + h * k3v);

        self.value = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn dock_spring_is_over_damped() {
        assert!(SpringConfig::dock().damping_ratio() > 1.0);
    }

    #[test]
    fn converges_monotonically_without_overshoot() {
        let mut spring = Spring::new(SpringConfig::dock(), 50.0);
        spring.set_target(70.0);

        let mut prev = spring.value();
        for _ in 0..120 {
            let v = spring.step(FRAME);
            assert!(v >= prev - 1e-4, "value went backwards: {prev} -> {v}");
            assert!(v <= 70.0 + 1e-4, "overshoot: {v}");
            prev = v;
        }

        assert!((spring.value() - 70.0).abs() < 0.05);
        assert!(spring.is_settled());
    }

    #[test]
    fn settles_within_one_second() {
        let mut spring = Spring::new(SpringConfig::dock(), 70.0);
        for _ in 0..60 {
            spring.step_toward(50.0, FRAME);
        }
        assert_eq!(spring.value(), 50.0);
    }

    #[test]
    fn retargeting_every_frame_has_no_jumps() {
        let mut spring = Spring::new(SpringConfig::dock(), 50.0);
        let mut prev = spring.value();
        for i in 0..240 {
            let target = if i % 2 == 0 { 70.0 } else { 50.0 };
            let v = spring.step_toward(target, FRAME);
            assert!((v - prev).abs() < 10.0, "jump of {} at frame {i}", v - prev);
            assert!((50.0..=70.0).contains(&v));
            prev = v;
        }
    }

    #[test]
    fn long_frames_stay_stable() {
        let mut spring = Spring::new(SpringConfig::new(3000.0, 110.0, 1.0), 0.0);
        spring.set_target(100.0);
        for _ in 0..20 {
            spring.step(0.5);
        }
        assert!((spring.value() - 100.0).abs() < 0.05);
    }

    #[test]
    fn bad_dt_does_not_move_the_spring() {
        let mut spring = Spring::new(SpringConfig::dock(), 0.0);
        spring.set_target(10.0);
        spring.step(f32::NAN);
        spring.step(-1.0);
        assert_eq!(spring.value(), 0.0);
    }

    #[test]
    fn non_finite_target_is_ignored() {
        let mut spring = Spring::new(SpringConfig::dock(), 5.0);
        spring.set_target(f32::INFINITY);
        assert_eq!(spring.target(), 5.0);
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        assert!(SpringConfig::dock().validate().is_ok());
        assert!(SpringConfig::new(150.0, 12.0, 0.0).validate().is_err());
        assert!(SpringConfig::new(-1.0, 12.0, 1.0).validate().is_err());
        assert!(SpringConfig::new(150.0, -2.0, 1.0).validate().is_err());
    }

    #[test]
    fn critically_damped_has_unit_ratio() {
        let config = SpringConfig::critically_damped(400.0, 1.0);
        assert!((config.damping_ratio() - 1.0).abs() < 1e-6);
    }
}
