#![forbid(unsafe_code)]

//! Content-sized grids.
//!
//! An adaptive grid takes its column and row counts from the layout itself
//! (`right` and `bottom`, columns capped at `max_cols`) and stretches the
//! cells over a measured container. Before the container is measured, cells
//! fall back to 100px columns and the container size is derived from the
//! content instead.
//!
//! Row height is picked in this order:
//!
//! 1. `rows_adaptable`, with a measured container and at least one row:
//!    rows share the container height.
//! 2. `square_grid`: rows are as tall as columns are wide.
//! 3. `row_height`, when set and positive.
//! 4. The column width when measured, 100px otherwise.

use serde::{Deserialize, Serialize};
use tessera_core::{LayoutItem, PixelSize, trace};

use crate::collision::{bottom, right};
use crate::geometry::{GridGeometry, GridLines, content_extent};

/// Cell size assumed before the container has been measured.
pub const UNMEASURED_CELL: f64 = 100.0;

/// What is known about the container's size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Container {
    Measured { width: f64, height: f64 },
    Unmeasured,
}

/// Sizing rules for an adaptive grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveOptions {
    /// Upper bound on columns, and the width a resize may grow the grid to.
    pub max_cols: u32,
    pub rows_adaptable: bool,
    pub square_grid: bool,
    pub row_height: Option<f64>,
    pub margin: [f64; 2],
    /// Falls back to `margin` when `None`.
    pub container_padding: Option<[f64; 2]>,
}

impl Default for AdaptiveOptions {
    fn default() -> Self {
        Self {
            max_cols: 12,
            rows_adaptable: false,
            square_grid: false,
            row_height: None,
            margin: [5.0, 5.0],
            container_padding: None,
        }
    }
}

impl AdaptiveOptions {
    #[must_use]
    pub fn with_max_cols(mut self, max_cols: u32) -> Self {
        self.max_cols = max_cols;
        self
    }

    #[must_use]
    pub fn with_rows_adaptable(mut self, rows_adaptable: bool) -> Self {
        self.rows_adaptable = rows_adaptable;
        self
    }

    #[must_use]
    pub fn with_square_grid(mut self, square_grid: bool) -> Self {
        self.square_grid = square_grid;
        self
    }

    #[must_use]
    pub fn with_row_height(mut self, row_height: Option<f64>) -> Self {
        self.row_height = row_height;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: [f64; 2]) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_container_padding(mut self, padding: Option<[f64; 2]>) -> Self {
        self.container_padding = padding;
        self
    }

    /// Effective container padding.
    #[must_use]
    pub fn padding(&self) -> [f64; 2] {
        self.container_padding.unwrap_or(self.margin)
    }
}

/// Grid dimensions derived from a layout and its container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveGrid {
    pub cols: u32,
    pub rows: u32,
    pub col_width: f64,
    pub row_height: f64,
    /// The measured container, or the size the content needs.
    pub container: PixelSize,
    pub margin: [f64; 2],
    pub container_padding: [f64; 2],
    pub max_cols: u32,
}

impl AdaptiveGrid {
    /// Size a grid to `layout`'s occupied extent.
    ///
    /// An empty layout has zero columns and rows; its cells are zero wide
    /// when measured.
    #[must_use]
    pub fn measure(layout: &[LayoutItem], container: Container, options: &AdaptiveOptions) -> Self {
        let cols = right(layout).min(options.max_cols);
        let rows = bottom(layout);
        let margin = options.margin;
        let padding = options.padding();
        let fixed_row = options.row_height.filter(|h| *h > 0.0);

        let (col_width, row_height, size) = match container {
            Container::Unmeasured => {
                let col_width = UNMEASURED_CELL;
                let row_height = if options.square_grid {
                    col_width
                } else {
                    fixed_row.unwrap_or(UNMEASURED_CELL)
                };
                let size = PixelSize::new(
                    content_extent(cols, col_width, margin[0], padding[0]),
                    content_extent(rows, row_height, margin[1], padding[1]),
                );
                (col_width, row_height, size)
            }
            Container::Measured { width, height } => {
                let col_width = fill(width, cols, margin[0], padding[0]);
                let row_height = if options.rows_adaptable && rows > 0 {
                    fill(height, rows, margin[1], padding[1])
                } else if options.square_grid {
                    col_width
                } else {
                    fixed_row.unwrap_or(col_width)
                };
                (col_width, row_height, PixelSize::new(width, height))
            }
        };

        trace!(cols, rows, col_width, row_height, "adaptive grid measured");
        Self {
            cols,
            rows,
            col_width,
            row_height,
            container: size,
            margin,
            container_padding: padding,
            max_cols: options.max_cols,
        }
    }

    /// Pixel transforms for the measured cells. Positions clamp to
    /// `max_cols`, so items may be moved into columns the content does not
    /// occupy yet.
    #[must_use]
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry {
            col_width: self.col_width,
            row_height: self.row_height,
            margin: self.margin,
            container_padding: self.container_padding,
            cols: self.cols,
            max_cols: Some(self.max_cols),
            max_rows: None,
        }
    }

    /// Background overlay spanning all `max_cols` columns.
    #[must_use]
    pub fn grid_lines(&self) -> GridLines {
        self.geometry().grid_lines(self.rows)
    }

    /// Width of the grid when grown to `max_cols` columns.
    #[must_use]
    pub fn max_width(&self) -> f64 {
        self.grid_lines().width
    }

    /// Extra container width while `item` is resized `delta_x` pixels to
    /// the right.
    ///
    /// Only an item touching the right edge grows the grid, only while
    /// `cols < max_cols`, and never past [`max_width`](Self::max_width).
    #[must_use]
    pub fn resize_growth(&self, item: &LayoutItem, delta_x: f64) -> f64 {
        if delta_x <= 0.0 || item.right() < self.cols || self.cols >= self.max_cols {
            return 0.0;
        }
        let origin = self.container.width;
        ((origin + delta_x).min(self.max_width()) - origin).max(0.0)
    }
}

/// Size of one of `n` tracks sharing `extent`.
fn fill(extent: f64, n: u32, gutter: f64, padding: f64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    (extent - padding * 2.0 - gutter * f64::from(n - 1)) / f64::from(n)
}
