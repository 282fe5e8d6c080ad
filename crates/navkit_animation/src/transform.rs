//! Animated element transforms
//!
//! Elements are identified by a stable key chosen by the widget, never by a
//! node reference. The arena holds the current transform of every mounted
//! element and is the single place timelines read from and write to.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Key type usable to address an element in a [`TransformArena`]
pub trait ElementKey: Copy + Eq + Hash + Debug {}

impl<T: Copy + Eq + Hash + Debug> ElementKey for T {}

/// A single animatable property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    /// Horizontal translation as a percentage of the element's own width
    XPercent,
    /// Vertical translation as a percentage of the element's own height
    YPercent,
    /// Rotation in degrees
    Rotate,
    /// Opacity (0.0 to 1.0)
    Opacity,
}

/// Transform state of one element
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Transform {
    pub x_percent: f32,
    pub y_percent: f32,
    pub rotate: f32,
    pub opacity: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        x_percent: 0.0,
        y_percent: 0.0,
        rotate: 0.0,
        opacity: 1.0,
    };

    pub fn with_x_percent(mut self, value: f32) -> Self {
        self.x_percent = value;
        self
    }

    pub fn with_y_percent(mut self, value: f32) -> Self {
        self.y_percent = value;
        self
    }

    pub fn with_rotate(mut self, degrees: f32) -> Self {
        self.rotate = degrees;
        self
    }

    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = value;
        self
    }

    pub fn get(&self, property: Property) -> f32 {
        match property {
            Property::XPercent => self.x_percent,
            Property::YPercent => self.y_percent,
            Property::Rotate => self.rotate,
            Property::Opacity => self.opacity,
        }
    }

    pub fn set(&mut self, property: Property, value: f32) {
        match property {
            Property::XPercent => self.x_percent = value,
            Property::YPercent => self.y_percent = value,
            Property::Rotate => self.rotate = value,
            Property::Opacity => self.opacity = value,
        }
    }
}

/// Current transforms of every mounted element, by key
#[derive(Clone, Debug)]
pub struct TransformArena<K: ElementKey> {
    elements: FxHashMap<K, Transform>,
}

impl<K: ElementKey> TransformArena<K> {
    pub fn new() -> Self {
        Self {
            elements: FxHashMap::default(),
        }
    }

    /// Mount an element (or overwrite its transform)
    pub fn insert(&mut self, key: K, transform: Transform) {
        self.elements.insert(key, transform);
    }

    pub fn remove(&mut self, key: K) -> Option<Transform> {
        self.elements.remove(&key)
    }

    pub fn get(&self, key: K) -> Option<Transform> {
        self.elements.get(&key).copied()
    }

    pub fn value(&self, key: K, property: Property) -> Option<f32> {
        self.elements.get(&key).map(|t| t.get(property))
    }

    /// Write one property; returns `false` if the element is not mounted
    pub fn set(&mut self, key: K, property: Property, value: f32) -> bool {
        match self.elements.get_mut(&key) {
            Some(transform) => {
                transform.set(property, value);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, key: K) -> bool {
        self.elements.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }
}

impl<K: ElementKey> Default for TransformArena<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_only_touches_mounted_elements() {
        let mut arena = TransformArena::new();
        arena.insert(1u8, Transform::IDENTITY.with_x_percent(-100.0));

        assert!(arena.set(1, Property::XPercent, -40.0));
        assert!(!arena.set(2, Property::XPercent, -40.0));
        assert_eq!(arena.value(1, Property::XPercent), Some(-40.0));
        assert_eq!(arena.get(2), None);
    }

    #[test]
    fn property_accessors_round_trip() {
        let mut t = Transform::default();
        t.set(Property::Rotate, 10.0);
        t.set(Property::YPercent, 140.0);
        assert_eq!(t, Transform::IDENTITY.with_rotate(10.0).with_y_percent(140.0));
        assert_eq!(t.get(Property::Opacity), 1.0);
    }
}
