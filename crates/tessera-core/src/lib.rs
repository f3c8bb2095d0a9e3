#![forbid(unsafe_code)]

//! Core: grid item model, pixel geometry primitives, and logging.
//!
//! # Role in Tessera
//! `tessera-core` holds the plain data the layout algebra operates on. It has
//! no algorithms beyond rectangle overlap; everything that moves items lives
//! in `tessera-layout`.
//!
//! # Primary responsibilities
//! - **LayoutItem**: one grid-placed element with optional resize clamps.
//! - **ItemConfig**: the loose, caller-supplied form of an item.
//! - **Pixel geometry**: boxes, points and (possibly unbounded) extents.
//! - **ValidationError**: caller-input contract violations.
//! - **Logging**: `tracing` re-exports, or no-op macros without the feature.

pub mod error;
pub mod geometry;
pub mod item;
pub mod logging;

pub use error::{ValidationError, ValidationIssue};
pub use geometry::{Extent, PixelBox, PixelPoint, PixelSize, round_half_up};
pub use item::{Axis, CompactionMode, GridRect, ItemConfig, Layout, LayoutItem};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace};
