//! Four-component vectors.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Four-component vector used for vector values and entity positions.
///
/// Positions are stored with `w = 0`; spatial comparisons use only the
/// `x`, `y` and `z` components.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector4 {
    /// First component.
    pub x: f64,
    /// Second component.
    pub y: f64,
    /// Third component.
    pub z: f64,
    /// Fourth component.
    pub w: f64,
}

#[allow(clippy::should_implement_trait)]
impl Vector4 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a vector from four components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a position vector (`w = 0`).
    #[must_use]
    pub const fn position(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 0.0)
    }

    /// Creates a vector with every component set to `value`.
    #[must_use]
    pub const fn splat(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Component-wise sum.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }

    /// Component-wise difference.
    #[must_use]
    pub fn sub(self, other: Self) -> Self {
        Self::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        )
    }

    /// Component-wise product.
    #[must_use]
    pub fn mul(self, other: Self) -> Self {
        Self::new(
            self.x * other.x,
            self.y * other.y,
            self.z * other.z,
            self.w * other.w,
        )
    }

    /// Component-wise quotient. Components divided by zero become zero.
    #[must_use]
    pub fn div(self, other: Self) -> Self {
        fn safe(a: f64, b: f64) -> f64 {
            if b == 0.0 { 0.0 } else { a / b }
        }
        Self::new(
            safe(self.x, other.x),
            safe(self.y, other.y),
            safe(self.z, other.z),
            safe(self.w, other.w),
        )
    }

    /// Multiplies every component by `factor`.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.z * factor,
            self.w * factor,
        )
    }

    /// Four-component dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Four-component length.
    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Squared distance between two positions, ignoring `w`.
    #[must_use]
    pub fn distance_squared_xyz(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Distance between two positions, ignoring `w`.
    #[must_use]
    pub fn distance_xyz(self, other: Self) -> f64 {
        self.distance_squared_xyz(other).sqrt()
    }

    /// Applies `f` to every component.
    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z), f(self.w))
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}
