#![forbid(unsafe_code)]

//! Responsive layouts: one stored layout per width breakpoint.
//!
//! [`Breakpoints<T>`] maps each [`Breakpoint`] tier to an optional value. The
//! same map type carries pixel thresholds, column counts and stored layouts.
//!
//! # Usage
//!
//! ```ignore
//! use tessera_layout::{Breakpoint, Breakpoints};
//!
//! let widths = Breakpoints::default_widths();
//! assert_eq!(widths.breakpoint_for_width(1000.0)?, Breakpoint::Md);
//! assert_eq!(Breakpoints::default_columns().cols_for(Breakpoint::Md)?, 10);
//! ```
//!
//! # Invariants
//!
//! 1. Breakpoint lookup picks the highest threshold not exceeding the width.
//! 2. A width below every threshold falls back to the smallest breakpoint.
//! 3. Switching breakpoints never loses the layout being left: it is stored
//!    under its breakpoint before the new one is generated.
//!
//! # Failure Modes
//!
//! | Condition | Error |
//! |---|---|
//! | No thresholds at all | [`BreakpointError::NoBreakpoints`] |
//! | Column count missing for the active breakpoint | [`BreakpointError::MissingColumns`] |

use std::fmt;

use serde::{Deserialize, Serialize};
use tessera_core::{CompactionMode, Layout, LayoutItem, debug};

use crate::bounds::correct_bounds;
use crate::compact::compact;

/// A named width tier, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xxs,
    Xs,
    Sm,
    Md,
    Lg,
}

impl Breakpoint {
    /// All breakpoints in ascending order.
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Xxs,
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
    ];

    /// Short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Breakpoint::Xxs => "xxs",
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Breakpoint lookup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakpointError {
    /// The threshold map is empty.
    NoBreakpoints,
    /// The column map has no entry for `breakpoint`.
    MissingColumns { breakpoint: Breakpoint },
}

impl fmt::Display for BreakpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoBreakpoints => f.write_str("no breakpoints configured"),
            Self::MissingColumns { breakpoint } => {
                write!(f, "entry for breakpoint {breakpoint} is missing")
            }
        }
    }
}

impl std::error::Error for BreakpointError {}

/// A value per breakpoint. Missing tiers are `None`; there is no inheritance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoints<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    xxs: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    xs: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sm: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    md: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lg: Option<T>,
}

impl<T> Default for Breakpoints<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Breakpoints<T> {
    /// An empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            xxs: None,
            xs: None,
            sm: None,
            md: None,
            lg: None,
        }
    }

    fn slot(&self, bp: Breakpoint) -> &Option<T> {
        match bp {
            Breakpoint::Xxs => &self.xxs,
            Breakpoint::Xs => &self.xs,
            Breakpoint::Sm => &self.sm,
            Breakpoint::Md => &self.md,
            Breakpoint::Lg => &self.lg,
        }
    }

    fn slot_mut(&mut self, bp: Breakpoint) -> &mut Option<T> {
        match bp {
            Breakpoint::Xxs => &mut self.xxs,
            Breakpoint::Xs => &mut self.xs,
            Breakpoint::Sm => &mut self.sm,
            Breakpoint::Md => &mut self.md,
            Breakpoint::Lg => &mut self.lg,
        }
    }

    /// Set the value for a breakpoint (builder pattern).
    #[must_use]
    pub fn at(mut self, bp: Breakpoint, value: T) -> Self {
        self.set(bp, value);
        self
    }

    /// Set the value for a breakpoint (mutating).
    pub fn set(&mut self, bp: Breakpoint, value: T) {
        *self.slot_mut(bp) = Some(value);
    }

    /// Remove and return the value for a breakpoint.
    pub fn remove(&mut self, bp: Breakpoint) -> Option<T> {
        self.slot_mut(bp).take()
    }

    #[must_use]
    pub fn get(&self, bp: Breakpoint) -> Option<&T> {
        self.slot(bp).as_ref()
    }

    #[must_use]
    pub fn contains(&self, bp: Breakpoint) -> bool {
        self.slot(bp).is_some()
    }

    /// Present entries in ascending breakpoint order.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, &T)> {
        Breakpoint::ALL
            .into_iter()
            .filter_map(|bp| self.get(bp).map(|v| (bp, v)))
    }
}

impl Breakpoints<u32> {
    /// Default pixel thresholds: `lg 1200, md 996, sm 768, xs 480, xxs 0`.
    #[must_use]
    pub fn default_widths() -> Self {
        Self::new()
            .at(Breakpoint::Lg, 1200)
            .at(Breakpoint::Md, 996)
            .at(Breakpoint::Sm, 768)
            .at(Breakpoint::Xs, 480)
            .at(Breakpoint::Xxs, 0)
    }

    /// Default column counts: `lg 12, md 10, sm 6, xs 4, xxs 2`.
    #[must_use]
    pub fn default_columns() -> Self {
        Self::new()
            .at(Breakpoint::Lg, 12)
            .at(Breakpoint::Md, 10)
            .at(Breakpoint::Sm, 6)
            .at(Breakpoint::Xs, 4)
            .at(Breakpoint::Xxs, 2)
    }

    /// Present breakpoints ordered by threshold, ascending. Ties keep tier
    /// order.
    #[must_use]
    pub fn sorted(&self) -> Vec<Breakpoint> {
        let mut entries: Vec<(Breakpoint, u32)> = self.iter().map(|(bp, &v)| (bp, v)).collect();
        entries.sort_by_key(|&(_, threshold)| threshold);
        entries.into_iter().map(|(bp, _)| bp).collect()
    }

    /// The breakpoint with the highest threshold not exceeding `width`.
    pub fn breakpoint_for_width(&self, width: f64) -> Result<Breakpoint, BreakpointError> {
        let sorted = self.sorted();
        let (&smallest, rest) = sorted.split_first().ok_or(BreakpointError::NoBreakpoints)?;
        let mut matching = smallest;
        for &bp in rest {
            if self.get(bp).is_some_and(|&t| f64::from(t) <= width) {
                matching = bp;
            }
        }
        Ok(matching)
    }

    /// Column count for `bp`.
    pub fn cols_for(&self, bp: Breakpoint) -> Result<u32, BreakpointError> {
        self.get(bp)
            .copied()
            .ok_or(BreakpointError::MissingColumns { breakpoint: bp })
    }
}

/// Layout to use at `breakpoint`.
///
/// A layout stored for `breakpoint` is returned as is. Otherwise the first
/// stored layout at or above `breakpoint` (in threshold order) is used, then
/// the one stored for `last_breakpoint`, then an empty layout; that fallback
/// is bounds-corrected to `cols` and compacted.
#[must_use]
pub fn find_or_generate_responsive_layout(
    layouts: &Breakpoints<Layout>,
    breakpoints: &Breakpoints<u32>,
    breakpoint: Breakpoint,
    last_breakpoint: Breakpoint,
    cols: u32,
    mode: CompactionMode,
) -> Layout {
    if let Some(stored) = layouts.get(breakpoint) {
        return stored.clone();
    }

    let sorted = breakpoints.sorted();
    let above = sorted
        .iter()
        .position(|&bp| bp == breakpoint)
        .map_or(&[][..], |start| &sorted[start..]);
    let source = above
        .iter()
        .find_map(|&bp| layouts.get(bp))
        .or_else(|| layouts.get(last_breakpoint));

    debug!(%breakpoint, %last_breakpoint, cols, found = source.is_some(), "generating responsive layout");
    let mut layout = source.cloned().unwrap_or_default();
    correct_bounds(&mut layout, cols);
    compact(&layout, mode, cols)
}

/// Emitted when a width change crosses into another breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointChange {
    pub from: Breakpoint,
    pub to: Breakpoint,
    pub cols: u32,
    pub layout: Layout,
}

/// Responsive state: the active breakpoint, its column count and layout, and
/// the layouts stored for other breakpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsiveGrid {
    breakpoints: Breakpoints<u32>,
    columns: Breakpoints<u32>,
    layouts: Breakpoints<Layout>,
    mode: CompactionMode,
    breakpoint: Breakpoint,
    cols: u32,
    layout: Layout,
}

impl ResponsiveGrid {
    /// Resolve the initial breakpoint for `width` and pick its layout.
    pub fn new(
        breakpoints: Breakpoints<u32>,
        columns: Breakpoints<u32>,
        layouts: Breakpoints<Layout>,
        mode: CompactionMode,
        width: f64,
    ) -> Result<Self, BreakpointError> {
        let breakpoint = breakpoints.breakpoint_for_width(width)?;
        let cols = columns.cols_for(breakpoint)?;
        let layout = find_or_generate_responsive_layout(
            &layouts,
            &breakpoints,
            breakpoint,
            breakpoint,
            cols,
            mode,
        );
        Ok(Self {
            breakpoints,
            columns,
            layouts,
            mode,
            breakpoint,
            cols,
            layout,
        })
    }

    #[must_use]
    pub const fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    #[must_use]
    pub fn layout(&self) -> &[LayoutItem] {
        &self.layout
    }

    #[must_use]
    pub const fn layouts(&self) -> &Breakpoints<Layout> {
        &self.layouts
    }

    /// Replace the active layout and store it under the active breakpoint.
    pub fn set_layout(&mut self, layout: Layout) {
        self.layouts.set(self.breakpoint, layout.clone());
        self.layout = layout;
    }

    /// React to a new container width.
    ///
    /// Returns `None` while the width stays inside the active breakpoint.
    pub fn on_width_change(&mut self, width: f64) -> Result<Option<BreakpointChange>, BreakpointError> {
        let next = self.breakpoints.breakpoint_for_width(width)?;
        if next == self.breakpoint {
            return Ok(None);
        }
        let cols = self.columns.cols_for(next)?;
        let last = self.breakpoint;

        if !self.layouts.contains(last) {
            self.layouts.set(last, self.layout.clone());
        }
        let layout = find_or_generate_responsive_layout(
            &self.layouts,
            &self.breakpoints,
            next,
            last,
            cols,
            self.mode,
        );
        self.layouts.set(next, layout.clone());

        debug!(from = %last, to = %next, cols, "breakpoint change");
        self.breakpoint = next;
        self.cols = cols;
        self.layout = layout.clone();
        Ok(Some(BreakpointChange {
            from: last,
            to: next,
            cols,
            layout,
        }))
    }
}
