#![forbid(unsafe_code)]

//! Grid item model.
//!
//! A [`LayoutItem`] is a rectangle on an integer grid: origin `(x, y)` and
//! span `(w, h)` in grid units. A [`Layout`] is an ordered list of items with
//! unique ids. Array order carries no placement meaning; it only fixes where
//! each item appears in outputs.

use serde::{Deserialize, Serialize};

/// An ordered list of grid items keyed by id.
pub type Layout = Vec<LayoutItem>;

/// Gravity direction used by compaction and move resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompactionMode {
    /// Items fall toward row 0; processing order is `(y, x)`.
    #[default]
    Vertical,
    /// Items fall toward column 0; processing order is `(x, y)`.
    Horizontal,
    /// No gravity.
    None,
}

impl CompactionMode {
    /// The axis items travel along, if any.
    #[must_use]
    pub const fn axis(self) -> Option<Axis> {
        match self {
            Self::Vertical => Some(Axis::Y),
            Self::Horizontal => Some(Axis::X),
            Self::None => None,
        }
    }
}

/// A grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Columns.
    X,
    /// Rows.
    Y,
}

/// A bare grid rectangle, used for probes that are not part of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl GridRect {
    #[must_use]
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Whether two rectangles share any cell. Touching edges do not overlap.
    #[inline]
    #[must_use]
    pub const fn overlaps(&self, other: &GridRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// One element placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutItem {
    /// Unique key within a layout.
    #[serde(alias = "i")]
    pub id: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<u32>,
    /// `None` means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<u32>,
    /// `None` means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<u32>,
    /// Static items are never moved by compaction or by other items' moves.
    #[serde(default, alias = "static")]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_draggable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_resizable: Option<bool>,
    /// Set while a move cascade is in flight; cleared by compaction.
    #[serde(skip)]
    pub moved: bool,
}

impl LayoutItem {
    /// Create a non-static item.
    #[must_use]
    pub fn new(id: impl Into<String>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
            min_w: None,
            max_w: None,
            min_h: None,
            max_h: None,
            is_static: false,
            is_draggable: None,
            is_resizable: None,
            moved: false,
        }
    }

    /// Create a static item.
    #[must_use]
    pub fn fixed(id: impl Into<String>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            is_static: true,
            ..Self::new(id, x, y, w, h)
        }
    }

    /// Set width clamps (builder pattern).
    #[must_use]
    pub fn with_width_bounds(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_w = min;
        self.max_w = max;
        self
    }

    /// Set height clamps (builder pattern).
    #[must_use]
    pub fn with_height_bounds(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_h = min;
        self.max_h = max;
        self
    }

    /// The occupied grid rectangle.
    #[inline]
    #[must_use]
    pub const fn rect(&self) -> GridRect {
        GridRect::new(self.x, self.y, self.w, self.h)
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Origin coordinate along `axis`.
    #[inline]
    #[must_use]
    pub const fn coord(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Span along `axis`.
    #[inline]
    #[must_use]
    pub const fn span(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.w,
            Axis::Y => self.h,
        }
    }

    /// Set the origin coordinate along `axis`.
    #[inline]
    pub fn set_coord(&mut self, axis: Axis, value: u32) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }

    /// Effective minimum width (defaults to 1).
    #[inline]
    #[must_use]
    pub fn min_width(&self) -> u32 {
        self.min_w.unwrap_or(1)
    }

    /// Effective minimum height (defaults to 1).
    #[inline]
    #[must_use]
    pub fn min_height(&self) -> u32 {
        self.min_h.unwrap_or(1)
    }
}

/// Caller-supplied grid config for an item, before defaults are applied.
///
/// Every field is optional; [`ItemConfig::into_item`] fills the gaps.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemConfig {
    #[serde(default)]
    pub x: Option<u32>,
    #[serde(default)]
    pub y: Option<u32>,
    #[serde(default)]
    pub w: Option<u32>,
    #[serde(default)]
    pub h: Option<u32>,
    #[serde(default)]
    pub min_w: Option<u32>,
    #[serde(default)]
    pub max_w: Option<u32>,
    #[serde(default)]
    pub min_h: Option<u32>,
    #[serde(default)]
    pub max_h: Option<u32>,
    #[serde(default, alias = "static")]
    pub is_static: Option<bool>,
    #[serde(default)]
    pub is_draggable: Option<bool>,
    #[serde(default)]
    pub is_resizable: Option<bool>,
}

impl ItemConfig {
    /// Config with an explicit position and span.
    #[must_use]
    pub fn at(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            w: Some(w),
            h: Some(h),
            ..Self::default()
        }
    }

    /// Mark the item static (builder pattern).
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.is_static = Some(true);
        self
    }

    /// Build an item, using `default_y` for a missing row and `0`/`1` for
    /// other missing coordinates and spans.
    #[must_use]
    pub fn into_item(self, id: impl Into<String>, default_y: u32) -> LayoutItem {
        LayoutItem {
            id: id.into(),
            x: self.x.unwrap_or(0),
            y: self.y.unwrap_or(default_y),
            w: self.w.unwrap_or(1),
            h: self.h.unwrap_or(1),
            min_w: self.min_w,
            max_w: self.max_w,
            min_h: self.min_h,
            max_h: self.max_h,
            is_static: self.is_static.unwrap_or(false),
            is_draggable: self.is_draggable,
            is_resizable: self.is_resizable,
            moved: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = GridRect::new(0, 0, 2, 2);
        assert!(!a.overlaps(&GridRect::new(2, 0, 1, 1)));
        assert!(!a.overlaps(&GridRect::new(0, 2, 1, 1)));
        assert!(a.overlaps(&GridRect::new(1, 1, 1, 1)));
    }

    #[test]
    fn axis_accessors() {
        let mut item = LayoutItem::new("a", 3, 4, 5, 6);
        assert_eq!(item.coord(Axis::X), 3);
        assert_eq!(item.span(Axis::Y), 6);
        item.set_coord(Axis::Y, 9);
        assert_eq!(item.y, 9);
        assert_eq!(item.bottom(), 15);
    }

    #[test]
    fn config_defaults() {
        let item = ItemConfig::default().into_item("n", 7);
        assert_eq!((item.x, item.y, item.w, item.h), (0, 7, 1, 1));
        assert!(!item.is_static);

        let item = ItemConfig::at(1, 2, 3, 4).fixed().into_item("s", 0);
        assert_eq!((item.x, item.y, item.w, item.h), (1, 2, 3, 4));
        assert!(item.is_static);
    }

    #[test]
    fn serde_accepts_legacy_keys() {
        let item: LayoutItem =
            serde_json::from_str(r#"{"i":"a","x":1,"y":2,"w":3,"h":4,"static":true}"#).unwrap();
        assert_eq!(item.id, "a");
        assert!(item.is_static);
        assert!(!item.moved);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "a");
        assert_eq!(json["isStatic"], true);
        assert!(json.get("moved").is_none());
        assert!(json.get("maxW").is_none());
    }

    #[test]
    fn compaction_mode_axis() {
        assert_eq!(CompactionMode::Vertical.axis(), Some(Axis::Y));
        assert_eq!(CompactionMode::Horizontal.axis(), Some(Axis::X));
        assert_eq!(CompactionMode::None.axis(), None);
    }
}
