//! Pointer proximity to target magnitude
//!
//! Piecewise-linear falloff: `peak` with the pointer on the item's center,
//! `base` at `falloff` pixels away and beyond.

use navkit_core::{NavError, PointerSample, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximityCurve {
    base: f32,
    peak: f32,
    falloff: f32,
}

impl ProximityCurve {
    pub fn new(base: f32, peak: f32, falloff: f32) -> Result<Self> {
        if !(falloff.is_finite() && falloff > 0.0) {
            return Err(NavError::InvalidConfig(format!(
                "falloff distance must be positive, got {falloff}"
            )));
        }
        if !base.is_finite() || !peak.is_finite() {
            return Err(NavError::InvalidConfig(format!(
                "magnitudes must be finite, got base={base} peak={peak}"
            )));
        }
        Ok(Self {
            base,
            peak,
            falloff,
        })
    }

    pub fn base(&self) -> f32 {
        self.base
    }

    pub fn peak(&self) -> f32 {
        self.peak
    }

    pub fn falloff(&self) -> f32 {
        self.falloff
    }

    /// Target magnitude for an item centered at `center`
    ///
    /// An absent pointer or an item without a measured center resolves to
    /// `base`.
    pub fn target(&self, pointer: PointerSample, center: Option<f32>) -> f32 {
        let (Some(x), Some(center)) = (pointer.x(), center.filter(|c| c.is_finite())) else {
            return self.base;
        };

        let d = (x - center).clamp(-self.falloff, self.falloff);
        let t = 1.0 - d.abs() / self.falloff;
        // Weighted form keeps both endpoints exact
        self.peak * t + self.base * (1.0 - t)
    }
}
