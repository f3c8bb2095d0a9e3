#![forbid(unsafe_code)]

//! Collision predicate and layout queries.
//!
//! All queries are linear scans in array order. Layouts are small (tens of
//! items), so there is no spatial index.

use tessera_core::{GridRect, LayoutItem};

/// Whether two items overlap.
///
/// An item never collides with itself (same id). Touching edges do not
/// collide.
#[inline]
#[must_use]
pub fn collides(a: &LayoutItem, b: &LayoutItem) -> bool {
    a.id != b.id && a.rect().overlaps(&b.rect())
}

/// First item in array order that collides with `item`.
#[must_use]
pub fn first_collision<'a>(layout: &'a [LayoutItem], item: &LayoutItem) -> Option<&'a LayoutItem> {
    layout.iter().find(|candidate| collides(candidate, item))
}

/// First item in array order that overlaps a bare rectangle.
///
/// Unlike [`first_collision`], no item is excluded by id.
#[must_use]
pub fn first_overlap<'a>(layout: &'a [LayoutItem], rect: &GridRect) -> Option<&'a LayoutItem> {
    layout.iter().find(|candidate| candidate.rect().overlaps(rect))
}

/// Every item that collides with `item`, in array order.
#[must_use]
pub fn all_collisions<'a>(layout: &'a [LayoutItem], item: &LayoutItem) -> Vec<&'a LayoutItem> {
    layout
        .iter()
        .filter(|candidate| collides(candidate, item))
        .collect()
}

/// Every static item, in array order.
#[must_use]
pub fn static_items(layout: &[LayoutItem]) -> Vec<&LayoutItem> {
    layout.iter().filter(|item| item.is_static).collect()
}

/// Lowest occupied row boundary (`max(y + h)`), or 0 for an empty layout.
#[must_use]
pub fn bottom(layout: &[LayoutItem]) -> u32 {
    layout.iter().map(LayoutItem::bottom).max().unwrap_or(0)
}

/// Right-most occupied column boundary (`max(x + w)`), or 0 for an empty layout.
#[must_use]
pub fn right(layout: &[LayoutItem]) -> u32 {
    layout.iter().map(LayoutItem::right).max().unwrap_or(0)
}

/// Look up an item by id.
#[must_use]
pub fn find_item<'a>(layout: &'a [LayoutItem], id: &str) -> Option<&'a LayoutItem> {
    layout.iter().find(|item| item.id == id)
}

/// Look up an item by id, mutably.
#[must_use]
pub fn find_item_mut<'a>(layout: &'a mut [LayoutItem], id: &str) -> Option<&'a mut LayoutItem> {
    layout.iter_mut().find(|item| item.id == id)
}

/// Index of an item by id.
#[must_use]
pub fn position_of(layout: &[LayoutItem], id: &str) -> Option<usize> {
    layout.iter().position(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, x: u32, y: u32, w: u32, h: u32) -> LayoutItem {
        LayoutItem::new(id, x, y, w, h)
    }

    #[test]
    fn same_id_never_collides() {
        let a = item("a", 0, 0, 2, 2);
        let mut b = a.clone();
        b.x = 1;
        assert!(!collides(&a, &b));
    }

    #[test]
    fn strict_overlap_only() {
        let a = item("a", 0, 0, 2, 2);
        assert!(collides(&a, &item("b", 1, 1, 2, 2)));
        assert!(!collides(&a, &item("b", 2, 0, 2, 2)));
        assert!(!collides(&a, &item("b", 0, 2, 2, 2)));
        assert!(collides(&item("b", 1, 1, 1, 1), &a));
    }

    #[test]
    fn collision_queries_preserve_order() {
        let layout = vec![
            item("a", 0, 0, 1, 1),
            item("b", 1, 0, 1, 1),
            item("c", 0, 1, 2, 1),
        ];
        let probe = item("p", 0, 0, 2, 2);
        assert_eq!(first_collision(&layout, &probe).map(|i| i.id.as_str()), Some("a"));
        let ids: Vec<_> = all_collisions(&layout, &probe)
            .into_iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(first_collision(&layout, &item("q", 5, 5, 1, 1)).is_none());
    }

    #[test]
    fn overlap_probe_includes_every_id() {
        let layout = vec![item("a", 0, 0, 1, 1)];
        let probe = GridRect::new(0, 0, 1, 1);
        assert!(first_overlap(&layout, &probe).is_some());
    }

    #[test]
    fn extents() {
        let layout = vec![item("a", 0, 0, 2, 3), item("b", 4, 1, 1, 1)];
        assert_eq!(bottom(&layout), 3);
        assert_eq!(right(&layout), 5);
        assert_eq!(bottom(&[]), 0);
        assert_eq!(right(&[]), 0);
    }

    #[test]
    fn statics_and_lookup() {
        let mut layout = vec![item("a", 0, 0, 1, 1), LayoutItem::fixed("s", 1, 0, 1, 1)];
        let statics = static_items(&layout);
        assert_eq!(statics.len(), 1);
        assert_eq!(statics[0].id, "s");
        assert_eq!(position_of(&layout, "s"), Some(1));
        find_item_mut(&mut layout, "a").unwrap().y = 4;
        assert_eq!(find_item(&layout, "a").unwrap().y, 4);
        assert!(find_item(&layout, "zz").is_none());
    }
}
