//! Easing functions for timeline tweens

use serde::{Deserialize, Serialize};

/// Easing function type
///
/// The power families follow the usual naming where `power1` is quadratic,
/// so `Power4Out` is `1 - (1 - t)^5`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    Power2Out,
    Power3In,
    Power3InOut,
    Power4Out,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    ///
    /// Input is clamped, so the endpoints are always exact.
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::Power2Out => ease_out(t, 3),
            Easing::Power3In => t.powi(4),
            Easing::Power3InOut => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::Power4Out => ease_out(t, 5),
        }
    }
}

#[inline]
fn ease_out(t: f32, degree: i32) -> f32 {
    1.0 - (1.0 - t).powi(degree)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::Power2Out,
        Easing::Power3In,
        Easing::Power3InOut,
        Easing::Power4Out,
    ];

    #[test]
    fn endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn out_of_range_is_clamped() {
        for easing in ALL {
            assert_eq!(easing.apply(-3.0), 0.0);
            assert_eq!(easing.apply(7.0), 1.0);
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v >= prev, "{easing:?} decreased at {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn out_curves_lead_in_curves() {
        assert!(Easing::Power4Out.apply(0.3) > 0.8);
        assert!(Easing::Power3In.apply(0.3) < 0.01);
    }
}
