#![forbid(unsafe_code)]

//! Move resolution.
//!
//! Moving one item to new grid coordinates displaces whatever it lands on.
//! A static partner is never displaced; the moving item gives way instead.
//! For user-initiated moves a displaced partner first tries to hop *behind*
//! the moving item before being pushed forward.
//!
//! The result is not compacted and may still contain overlaps left behind by
//! one-step forward pushes; callers run [`crate::compact`] afterwards.

use serde::{Deserialize, Serialize};
use tessera_core::{CompactionMode, GridRect, Layout, LayoutItem, debug, trace};

use crate::collision::{collides, first_overlap, position_of};
use crate::compact::sort_layout_items;

/// Flags controlling one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOptions {
    /// The move comes from a drag gesture; enables the give-way hop.
    pub is_user_action: bool,
    /// Reject the move outright if the target overlaps anything.
    pub prevent_collision: bool,
    pub mode: CompactionMode,
    pub cols: u32,
}

impl MoveOptions {
    /// Options for a drag gesture.
    #[must_use]
    pub const fn user(mode: CompactionMode, cols: u32) -> Self {
        Self {
            is_user_action: true,
            prevent_collision: false,
            mode,
            cols,
        }
    }

    /// Set collision prevention (builder pattern).
    #[must_use]
    pub const fn prevent_collision(mut self, prevent: bool) -> Self {
        self.prevent_collision = prevent;
        self
    }
}

/// Move the item `id` to `(x, y)` and return the resolved layout.
///
/// `None` for an axis leaves that coordinate alone. Unknown ids, static items
/// and no-op moves return the layout unchanged.
#[must_use]
pub fn move_element(
    layout: &[LayoutItem],
    id: &str,
    x: Option<u32>,
    y: Option<u32>,
    options: MoveOptions,
) -> Layout {
    let mut working = layout.to_vec();
    if let Some(index) = position_of(&working, id) {
        move_element_in_place(&mut working, index, x, y, options);
    }
    working
}

/// In-place form of [`move_element`], addressing the item by index.
pub fn move_element_in_place(
    layout: &mut [LayoutItem],
    index: usize,
    x: Option<u32>,
    y: Option<u32>,
    options: MoveOptions,
) {
    let item = &layout[index];
    if item.is_static {
        return;
    }
    if x == Some(item.x) && y == Some(item.y) {
        return;
    }
    let (old_x, old_y, old_moved) = (item.x, item.y, item.moved);
    debug!(
        id = %item.id,
        from_x = old_x,
        from_y = old_y,
        to_x = ?x,
        to_y = ?y,
        cols = options.cols,
        "moving item"
    );

    let item = &mut layout[index];
    if let Some(x) = x {
        item.x = x;
    }
    if let Some(y) = y {
        item.y = y;
    }
    item.moved = true;

    let moving_up = match (options.mode, x, y) {
        (CompactionMode::Vertical, _, Some(y)) => old_y >= y,
        (CompactionMode::Horizontal, Some(x), _) => old_x >= x,
        _ => false,
    };
    let mut order = sort_layout_items(layout, options.mode);
    if moving_up {
        order.reverse();
    }
    let collisions: Vec<usize> = order
        .into_iter()
        .filter(|&j| collides(&layout[j], &layout[index]))
        .collect();

    if options.prevent_collision && !collisions.is_empty() {
        trace!(id = %layout[index].id, "collision prevented, reverting move");
        let item = &mut layout[index];
        item.x = old_x;
        item.y = old_y;
        item.moved = old_moved;
        return;
    }

    for partner in collisions {
        if layout[partner].moved {
            continue;
        }
        if layout[partner].is_static {
            move_element_away_from_collision(layout, partner, index, options);
        } else {
            move_element_away_from_collision(layout, index, partner, options);
        }
    }
}

/// Displace `item_to_move` so it no longer sits on `collides_with`.
///
/// With a user action, first probe the slot directly behind `collides_with`
/// on the gravity axis. The probe is a single-overlap lookahead, not an
/// exhaustive search. Otherwise (or if the slot is taken) step forward by one.
/// Nested moves never count as user actions, and they refuse to land on
/// anything when the blocker is static.
fn move_element_away_from_collision(
    layout: &mut [LayoutItem],
    collides_with: usize,
    item_to_move: usize,
    options: MoveOptions,
) {
    let horizontal = options.mode == CompactionMode::Horizontal;
    let vertical = !horizontal;
    let nested = MoveOptions {
        is_user_action: false,
        prevent_collision: layout[collides_with].is_static,
        ..options
    };

    let blocker = layout[collides_with].rect();
    let mover = layout[item_to_move].rect();

    if options.is_user_action {
        let probe = GridRect::new(
            if horizontal { blocker.x.saturating_sub(mover.w) } else { mover.x },
            if vertical { blocker.y.saturating_sub(mover.h) } else { mover.y },
            mover.w,
            mover.h,
        );
        if first_overlap(layout, &probe).is_none() {
            trace!(
                id = %layout[item_to_move].id,
                x = probe.x,
                y = probe.y,
                "reverse collision"
            );
            move_element_in_place(
                layout,
                item_to_move,
                horizontal.then_some(probe.x),
                vertical.then_some(probe.y),
                nested,
            );
            return;
        }
    }

    move_element_in_place(
        layout,
        item_to_move,
        horizontal.then_some(mover.x.saturating_add(1)),
        vertical.then_some(mover.y.saturating_add(1)),
        nested,
    );
}

/// Resize the item at `index` to `(w, h)` unless that would overlap another
/// item.
///
/// On overlap the item keeps its size, except that its width is cut back to
/// the nearest collider starting to its right and its height to the nearest
/// collider starting below it. Returns `true` when the requested size was
/// applied as is.
pub fn shrink_to_avoid_collisions(layout: &mut [LayoutItem], index: usize, w: u32, h: u32) -> bool {
    let item = &layout[index];
    let candidate = GridRect::new(item.x, item.y, w, h);
    let (mut least_x, mut least_y) = (None::<u32>, None::<u32>);
    let mut collided = false;
    for other in layout.iter().filter(|o| o.id != item.id) {
        if !other.rect().overlaps(&candidate) {
            continue;
        }
        collided = true;
        if other.x > item.x {
            least_x = Some(least_x.map_or(other.x, |v| v.min(other.x)));
        }
        if other.y > item.y {
            least_y = Some(least_y.map_or(other.y, |v| v.min(other.y)));
        }
    }

    let item = &mut layout[index];
    if !collided {
        item.w = w;
        item.h = h;
        return true;
    }
    if let Some(x) = least_x {
        item.w = x - item.x;
    }
    if let Some(y) = least_y {
        item.h = y - item.y;
    }
    trace!(id = %item.id, w = item.w, h = item.h, "resize shrunk to avoid collision");
    false
}
