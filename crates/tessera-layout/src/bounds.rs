#![forbid(unsafe_code)]

//! Bounds correction after a column-count change.

use tessera_core::{LayoutItem, debug};

use crate::collision::collides;

/// Clamp every item into `cols` columns and push static items down until they
/// are clear of each other and of the non-static items before them.
///
/// Items wider than the grid are narrowed to `cols` and moved to column 0.
/// Statics are checked against every static item (seeded up front) plus each
/// non-static item seen so far in array order.
pub fn correct_bounds(layout: &mut [LayoutItem], cols: u32) {
    let mut blockers: Vec<usize> = layout
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_static)
        .map(|(i, _)| i)
        .collect();

    for index in 0..layout.len() {
        let item = &mut layout[index];
        if item.right() > cols {
            item.x = cols.saturating_sub(item.w);
        }
        if item.w > cols {
            item.x = 0;
            item.w = cols;
        }

        if !item.is_static {
            blockers.push(index);
            continue;
        }
        while blockers
            .iter()
            .any(|&other| collides(&layout[other], &layout[index]))
        {
            let item = &mut layout[index];
            item.y = item.y.saturating_add(1);
        }
        debug!(id = %layout[index].id, y = layout[index].y, "static item settled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_right_edge() {
        let mut layout = vec![LayoutItem::new("a", 3, 0, 2, 1)];
        correct_bounds(&mut layout, 4);
        assert_eq!((layout[0].x, layout[0].w), (2, 2));
    }

    #[test]
    fn narrows_oversized_items() {
        let mut layout = vec![LayoutItem::new("a", 2, 0, 6, 1)];
        correct_bounds(&mut layout, 4);
        assert_eq!((layout[0].x, layout[0].w), (0, 4));
    }

    #[test]
    fn leaves_fitting_items_alone() {
        let mut layout = vec![LayoutItem::new("a", 1, 3, 2, 1)];
        let before = layout.clone();
        correct_bounds(&mut layout, 4);
        assert_eq!(layout, before);
    }

    #[test]
    fn overlapping_statics_are_separated() {
        let mut layout = vec![
            LayoutItem::fixed("s1", 0, 0, 2, 2),
            LayoutItem::fixed("s2", 1, 1, 2, 1),
        ];
        correct_bounds(&mut layout, 4);
        assert_eq!(layout[0].y, 2);
        assert_eq!(layout[1].y, 1);
    }

    #[test]
    fn static_pushed_below_earlier_dynamic_item() {
        let mut layout = vec![LayoutItem::new("a", 0, 0, 1, 2), LayoutItem::fixed("s", 0, 1, 1, 1)];
        correct_bounds(&mut layout, 4);
        assert_eq!(layout[0].y, 0);
        assert_eq!(layout[1].y, 2);
    }

    #[test]
    fn dynamic_items_are_not_pushed() {
        let mut layout = vec![LayoutItem::fixed("s", 0, 0, 1, 1), LayoutItem::new("a", 0, 0, 1, 1)];
        correct_bounds(&mut layout, 4);
        assert_eq!(layout[0].y, 0);
        assert_eq!(layout[1].y, 0);
    }
}
