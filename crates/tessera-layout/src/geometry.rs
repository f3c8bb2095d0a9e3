#![forbid(unsafe_code)]

//! Grid <-> pixel transforms.
//!
//! A [`GridGeometry`] fixes the pixel size of one column and one row plus the
//! gutters between them. Everything here is a pure function of that value.
//!
//! ```text
//!  pad   col   m   col   m   col   pad
//! |---|-------|-|-------|-|-------|---|
//! ```
//!
//! Outputs are snapped to whole pixels with half-up rounding.

use serde::{Deserialize, Serialize};
use tessera_core::{Extent, LayoutItem, PixelBox, PixelPoint, PixelSize, round_half_up};

/// Pixel dimensions of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub col_width: f64,
    pub row_height: f64,
    /// Gutter between cells, `[x, y]`.
    pub margin: [f64; 2],
    /// Space between the container edge and the outer cells, `[x, y]`.
    pub container_padding: [f64; 2],
    pub cols: u32,
    /// Overrides `cols` for clamping, when set.
    #[serde(default)]
    pub max_cols: Option<u32>,
    /// `None` means rows are unbounded.
    #[serde(default)]
    pub max_rows: Option<u32>,
}

/// Extent of a background grid overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLines {
    pub columns: u32,
    pub rows: u32,
    pub cell: PixelSize,
    /// Full overlay width, including both paddings.
    pub width: f64,
    pub height: f64,
}

/// Pixel limits for a resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeConstraints {
    pub min: PixelSize,
    pub max_width: Extent,
    pub max_height: Extent,
}

impl GridGeometry {
    /// Derive the column width from a measured container.
    ///
    /// `col_width = (width - margin_x * (cols - 1) - 2 * padding_x) / cols`.
    /// A zero column count yields zero-width columns.
    #[must_use]
    pub fn from_container(
        container_width: f64,
        cols: u32,
        margin: [f64; 2],
        container_padding: [f64; 2],
        row_height: f64,
    ) -> Self {
        let col_width = if cols == 0 {
            0.0
        } else {
            let gutters = margin[0] * f64::from(cols - 1);
            (container_width - gutters - container_padding[0] * 2.0) / f64::from(cols)
        };
        Self {
            col_width,
            row_height,
            margin,
            container_padding,
            cols,
            max_cols: None,
            max_rows: None,
        }
    }

    /// Set the column clamp override (builder pattern).
    #[must_use]
    pub const fn with_max_cols(mut self, max_cols: Option<u32>) -> Self {
        self.max_cols = max_cols;
        self
    }

    /// Set the row limit (builder pattern).
    #[must_use]
    pub const fn with_max_rows(mut self, max_rows: Option<u32>) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Column count used for clamping.
    #[inline]
    #[must_use]
    pub fn effective_cols(&self) -> u32 {
        self.max_cols.unwrap_or(self.cols)
    }

    #[inline]
    fn col_pitch(&self) -> f64 {
        self.col_width + self.margin[0]
    }

    #[inline]
    fn row_pitch(&self) -> f64 {
        self.row_height + self.margin[1]
    }

    /// Pixel width of `w` columns including inner gutters.
    #[must_use]
    pub fn span_width(&self, w: Option<u32>) -> Extent {
        span_px(w, self.col_width, self.margin[0])
    }

    /// Pixel height of `h` rows including inner gutters.
    #[must_use]
    pub fn span_height(&self, h: Option<u32>) -> Extent {
        span_px(h, self.row_height, self.margin[1])
    }

    /// Pixel box for a grid rectangle. A `None` span is unbounded.
    #[must_use]
    pub fn cell_box(&self, x: u32, y: u32, w: Option<u32>, h: Option<u32>) -> PixelBox {
        PixelBox::new(
            round_half_up(self.col_pitch() * f64::from(x) + self.container_padding[0]),
            round_half_up(self.row_pitch() * f64::from(y) + self.container_padding[1]),
            self.span_width(w),
            self.span_height(h),
        )
    }

    /// Pixel box for a layout item.
    #[must_use]
    pub fn item_box(&self, item: &LayoutItem) -> PixelBox {
        self.cell_box(item.x, item.y, Some(item.w), Some(item.h))
    }

    /// Grid origin for a pixel origin, clamped so an item of span `(w, h)`
    /// stays inside the grid.
    #[must_use]
    pub fn position_from_pixels(&self, origin: PixelPoint, w: u32, h: u32) -> (u32, u32) {
        let x = round_half_up((origin.left - self.container_padding[0]) / self.col_pitch());
        let y = round_half_up((origin.top - self.container_padding[1]) / self.row_pitch());

        let x_max = self.effective_cols().saturating_sub(w);
        let x = to_grid(x.min(f64::from(x_max)));
        let y = match self.max_rows {
            Some(rows) => to_grid(y.min(f64::from(rows.saturating_sub(h)))),
            None => to_grid(y),
        };
        (x, y)
    }

    /// Grid span for a pixel size reported by a resize handle on `item`.
    ///
    /// The span is capped to the space left from the item's origin, floored
    /// at one column, then clamped to the item's `[min, max]`. When the
    /// bounds conflict the minimum wins.
    #[must_use]
    pub fn size_from_pixels(&self, size: PixelSize, item: &LayoutItem) -> (u32, u32) {
        let w = to_grid(round_half_up((size.width + self.margin[0]) / self.col_pitch()));
        let h = to_grid(round_half_up((size.height + self.margin[1]) / self.row_pitch()));

        let w = w.min(self.effective_cols().saturating_sub(item.x));
        let h = match self.max_rows {
            Some(rows) => h.min(rows.saturating_sub(item.y)),
            None => h,
        };
        let w = w.max(1);

        let w = w.min(item.max_w.unwrap_or(u32::MAX)).max(item.min_width());
        let h = h.min(item.max_h.unwrap_or(u32::MAX)).max(item.min_height());
        (w, h)
    }

    /// Pixel limits for resizing `item`. The maximum width never exceeds
    /// the columns remaining to the right of the item's origin.
    #[must_use]
    pub fn resize_constraints(&self, item: &LayoutItem) -> ResizeConstraints {
        let room = self.span_width(Some(self.effective_cols().saturating_sub(item.x)));
        let min = PixelSize::new(
            self.span_width(Some(item.min_width())).finite().unwrap_or(0.0),
            self.span_height(Some(item.min_height())).finite().unwrap_or(0.0),
        );
        ResizeConstraints {
            min,
            max_width: self.span_width(item.max_w).min(room),
            max_height: self.span_height(item.max_h),
        }
    }

    /// Container height for `rows` occupied rows.
    #[must_use]
    pub fn container_height(&self, rows: u32) -> f64 {
        content_extent(rows, self.row_height, self.margin[1], self.container_padding[1])
    }

    /// Overlay of `effective_cols()` columns by `rows` rows. Sizes are not
    /// rounded.
    #[must_use]
    pub fn grid_lines(&self, rows: u32) -> GridLines {
        let columns = self.effective_cols();
        GridLines {
            columns,
            rows,
            cell: PixelSize::new(self.col_width, self.row_height),
            width: content_extent(columns, self.col_width, self.margin[0], self.container_padding[0]),
            height: self.container_height(rows),
        }
    }
}

/// Pixel length of `n` tracks with gutters between them and padding on both
/// ends.
pub(crate) fn content_extent(n: u32, unit: f64, gutter: f64, padding: f64) -> f64 {
    f64::from(n) * unit + f64::from(n.saturating_sub(1)) * gutter + padding * 2.0
}

fn span_px(span: Option<u32>, unit: f64, gutter: f64) -> Extent {
    match span {
        Some(n) => Extent::Finite(round_half_up(
            unit * f64::from(n) + f64::from(n.saturating_sub(1)) * gutter,
        )),
        None => Extent::Unbounded,
    }
}

/// Float to non-negative grid units. Negative and NaN inputs become 0.
fn to_grid(v: f64) -> u32 {
    v.max(0.0) as u32
}
