#![forbid(unsafe_code)]

//! Gravity compaction.
//!
//! Items are processed in a deterministic order: `(y, x)` for vertical
//! gravity, `(x, y)` for horizontal. The placed set starts as the static
//! items; each non-static item is pulled toward the origin until it hits
//! something placed, then pushed past whatever it still overlaps. Pushing can
//! cascade into items that have not been processed yet.
//!
//! # Invariants
//!
//! 1. Output index `i` holds the compacted version of input index `i`.
//! 2. Static items keep their position.
//! 3. No two non-static items overlap in the output, and no non-static item
//!    overlaps a static one.
//! 4. Every output item has `moved == false`.
//! 5. Vertical compaction is idempotent. Horizontal compaction is not: an
//!    item wrapped to `x = cols - w` on the next row may be pulled further
//!    left by a second pass.

use tessera_core::{Axis, CompactionMode, Layout, LayoutItem, trace};

use crate::collision::{bottom, collides, first_collision, right};

/// Processing order for `mode`, as indices into `layout`.
///
/// The sort is stable, so items sharing both coordinates keep array order.
#[must_use]
pub fn sort_layout_items(layout: &[LayoutItem], mode: CompactionMode) -> Vec<usize> {
    let mut order: Vec<usize> = (0..layout.len()).collect();
    match mode {
        CompactionMode::Horizontal => order.sort_by_key(|&i| (layout[i].x, layout[i].y)),
        CompactionMode::Vertical | CompactionMode::None => {
            order.sort_by_key(|&i| (layout[i].y, layout[i].x));
        }
    }
    order
}

/// Compact a layout toward the origin along `mode`'s axis.
///
/// `cols` only matters for horizontal gravity, where an item pushed past the
/// right edge wraps to the next row.
#[must_use]
pub fn compact(layout: &[LayoutItem], mode: CompactionMode, cols: u32) -> Layout {
    let Some(axis) = mode.axis() else {
        return layout
            .iter()
            .cloned()
            .map(|mut item| {
                item.moved = false;
                item
            })
            .collect();
    };

    let order = sort_layout_items(layout, mode);
    let mut sorted: Vec<LayoutItem> = order.iter().map(|&i| layout[i].clone()).collect();
    let mut placed: Vec<LayoutItem> = layout.iter().filter(|i| i.is_static).cloned().collect();
    let mut out = layout.to_vec();

    trace!(items = layout.len(), ?mode, cols, "compacting layout");

    for (pos, &input_index) in order.iter().enumerate() {
        let mut item = sorted[pos].clone();
        if !item.is_static {
            compact_item(&placed, &mut item, axis, cols, &mut sorted[pos + 1..]);
            placed.push(item.clone());
        }
        item.moved = false;
        out[input_index] = item;
    }
    out
}

/// Tighten one item against the placed set, resolving any remaining overlap.
///
/// `pending` holds the not-yet-processed items in processing order; cascades
/// may push them further along `axis`.
fn compact_item(
    placed: &[LayoutItem],
    item: &mut LayoutItem,
    axis: Axis,
    cols: u32,
    pending: &mut [LayoutItem],
) {
    let extent = match axis {
        Axis::Y => bottom(placed),
        Axis::X => right(placed),
    };
    item.set_coord(axis, item.coord(axis).min(extent));
    while item.coord(axis) > 0 && first_collision(placed, item).is_none() {
        item.set_coord(axis, item.coord(axis) - 1);
    }

    while let Some(hit) = first_collision(placed, item) {
        let target = hit.coord(axis).saturating_add(hit.span(axis));
        resolve_compaction_collision(pending, item, target, axis);
        if axis == Axis::X && item.right() > cols {
            item.x = cols.saturating_sub(item.w);
            item.y = item.y.saturating_add(1);
        }
    }
}

/// Move `item` to `target` along `axis`, first pushing any pending item it
/// would land on.
///
/// `pending` must be sorted on `axis` (it is the tail of the processing
/// order). The scan stops at the first candidate that starts beyond the
/// bumped item's far edge; that cut-off is only sound because of the sort.
/// Coordinates only ever increase, so the recursion terminates.
pub(crate) fn resolve_compaction_collision(
    pending: &mut [LayoutItem],
    item: &mut LayoutItem,
    target: u32,
    axis: Axis,
) {
    item.set_coord(axis, item.coord(axis).saturating_add(1));
    let reach = item.coord(axis).saturating_add(item.span(axis));
    let next_target = target.saturating_add(item.span(axis));

    for idx in 0..pending.len() {
        let (head, tail) = pending.split_at_mut(idx + 1);
        let other = &mut head[idx];
        if other.is_static {
            continue;
        }
        if other.coord(axis) > reach {
            break;
        }
        if collides(item, other) {
            trace!(pushed = %other.id, by = %item.id, to = next_target, "cascade");
            resolve_compaction_collision(tail, other, next_target, axis);
        }
    }

    item.set_coord(axis, target);
}
