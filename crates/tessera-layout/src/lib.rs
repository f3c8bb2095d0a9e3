#![forbid(unsafe_code)]

//! Grid layout algebra.
//!
//! Items live on an integer grid. This crate keeps them collision-free and
//! packed toward the origin, resolves moves that would overlap other items,
//! and translates between grid cells and container pixels.
//!
//! # Pipeline
//!
//! ```text
//! pixels ─► position_from_pixels ─► move_element ─► compact ─► item_box ─► pixels
//!                                         ▲
//!                 correct_bounds ─────────┘ (on column-count change)
//! ```
//!
//! The algebra ([`compact`], [`move_element`], [`correct_bounds`]) is pure
//! data-in/data-out apart from `correct_bounds`, which normalizes in place.
//! [`GridInteraction`] layers drag, resize and drop sessions on top, and
//! [`ResponsiveGrid`] keeps one layout per width breakpoint.
//! [`AdaptiveGrid`] sizes cells from the layout's own extent instead of a
//! fixed column count.

pub mod adaptive;
pub mod bounds;
pub mod collision;
pub mod compact;
pub mod geometry;
pub mod interaction;
pub mod movement;
pub mod responsive;
pub mod style;
pub mod sync;
pub mod validate;

pub use adaptive::{AdaptiveGrid, AdaptiveOptions, Container, UNMEASURED_CELL};
pub use bounds::correct_bounds;
pub use collision::{
    all_collisions, bottom, collides, find_item, find_item_mut, first_collision, first_overlap,
    position_of, right, static_items,
};
pub use compact::{compact, sort_layout_items};
pub use geometry::{GridGeometry, GridLines, ResizeConstraints};
pub use interaction::{
    DEFAULT_DROPPING_ID, DroppingItem, GridConfig, GridInteraction, InteractionError,
    ItemPosition, LayoutChange, Phase,
};
pub use movement::{MoveOptions, move_element, move_element_in_place, shrink_to_avoid_collisions};
pub use responsive::{
    Breakpoint, BreakpointChange, BreakpointError, Breakpoints, ResponsiveGrid,
    find_or_generate_responsive_layout,
};
pub use style::ItemStyle;
pub use sync::{ChildSpec, SyncOptions, synchronize};
pub use validate::{validate_item, validate_layout, validate_value};

pub use tessera_core::{
    Axis, CompactionMode, Extent, GridRect, ItemConfig, Layout, LayoutItem, PixelBox, PixelPoint,
    PixelSize, ValidationError, ValidationIssue,
};
