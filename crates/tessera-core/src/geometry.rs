#![forbid(unsafe_code)]

//! Pixel geometry primitives.
//!
//! Grid units are integers; pixels are `f64`. A span with no maximum maps to
//! [`Extent::Unbounded`] instead of a floating-point infinity, so callers
//! never see `0 * inf = NaN`.

use serde::{Deserialize, Serialize};

/// Round half-up: `floor(v + 0.5)`.
///
/// Matches browser-side `Math.round`, which differs from [`f64::round`] for
/// negative halves (`-2.5` rounds to `-2`, not `-3`).
#[inline]
#[must_use]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// A pixel length that may be unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "px", rename_all = "snake_case")]
pub enum Extent {
    Finite(f64),
    Unbounded,
}

impl Extent {
    /// The finite value, if any.
    #[inline]
    #[must_use]
    pub const fn finite(self) -> Option<f64> {
        match self {
            Self::Finite(v) => Some(v),
            Self::Unbounded => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// The smaller of two extents; `Unbounded` is larger than any finite value.
    #[must_use]
    pub fn min(self, other: Extent) -> Extent {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => Self::Finite(a.min(b)),
            (Self::Finite(a), Self::Unbounded) | (Self::Unbounded, Self::Finite(a)) => {
                Self::Finite(a)
            }
            (Self::Unbounded, Self::Unbounded) => Self::Unbounded,
        }
    }

    /// Round a finite extent half-up; unbounded stays unbounded.
    #[must_use]
    pub fn rounded(self) -> Extent {
        match self {
            Self::Finite(v) => Self::Finite(round_half_up(v)),
            Self::Unbounded => Self::Unbounded,
        }
    }
}

impl From<f64> for Extent {
    fn from(v: f64) -> Self {
        Self::Finite(v)
    }
}

/// A pixel offset relative to the container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub left: f64,
    pub top: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Offset by a pointer delta.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.top + dy)
    }
}

/// A finite pixel size, as reported by a resize gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: f64,
    pub height: f64,
}

impl PixelSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A positioned pixel box for one item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelBox {
    pub left: f64,
    pub top: f64,
    pub width: Extent,
    pub height: Extent,
}

impl PixelBox {
    #[must_use]
    pub fn new(left: f64, top: f64, width: impl Into<Extent>, height: impl Into<Extent>) -> Self {
        Self {
            left,
            top,
            width: width.into(),
            height: height.into(),
        }
    }

    /// The top-left corner.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> PixelPoint {
        PixelPoint::new(self.left, self.top)
    }

    /// Snap every component to whole pixels.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            left: round_half_up(self.left),
            top: round_half_up(self.top),
            width: self.width.rounded(),
            height: self.height.rounded(),
        }
    }

    /// Replace the origin (used while dragging, where the pointer owns it).
    #[must_use]
    pub fn with_origin(self, origin: PixelPoint) -> Self {
        Self {
            left: origin.left,
            top: origin.top,
            ..self
        }
    }

    /// Replace the size (used while resizing, where the handle owns it).
    #[must_use]
    pub fn with_size(self, size: PixelSize) -> Self {
        Self {
            width: Extent::Finite(size.width),
            height: Extent::Finite(size.height),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn half_up_rounding() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(0.49), 0.0);
    }

    #[test]
    fn extent_min_prefers_finite() {
        assert_eq!(Extent::Unbounded.min(Extent::Finite(4.0)), Extent::Finite(4.0));
        assert_eq!(Extent::Finite(2.0).min(Extent::Finite(4.0)), Extent::Finite(2.0));
        assert!(Extent::Unbounded.min(Extent::Unbounded).is_unbounded());
    }

    #[test]
    fn rounded_box_keeps_unbounded() {
        let b = PixelBox::new(1.4, 2.6, Extent::Unbounded, 9.5).rounded();
        assert_eq!(b.left, 1.0);
        assert_eq!(b.top, 3.0);
        assert!(b.width.is_unbounded());
        assert_eq!(b.height, Extent::Finite(10.0));
    }

    #[test]
    fn extent_serializes_tagged() {
        let json = serde_json::to_value(Extent::Finite(5.0)).unwrap();
        assert_eq!(json["kind"], "finite");
        assert_eq!(json["px"], 5.0);
        let json = serde_json::to_value(Extent::Unbounded).unwrap();
        assert_eq!(json["kind"], "unbounded");
    }

    proptest! {
        #[test]
        fn round_half_up_is_within_half(v in -1.0e6f64..1.0e6) {
            let r = round_half_up(v);
            prop_assert!((r - v).abs() <= 0.5);
            prop_assert_eq!(r.fract(), 0.0);
        }
    }
}
