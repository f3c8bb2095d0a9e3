#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tessera_layout::{
    CompactionMode, LayoutItem, MoveOptions, collides, compact, correct_bounds, move_element,
};

#[derive(Debug, Arbitrary)]
struct RawItem {
    x: u8,
    y: u8,
    w: u8,
    h: u8,
    is_static: bool,
}

#[derive(Debug, Arbitrary)]
struct Input {
    cols: u8,
    horizontal: bool,
    items: Vec<RawItem>,
    moves: Vec<(u8, u8, u8)>,
}

fuzz_target!(|input: Input| {
    // 1..=16 columns, at most 32 items, spans at least 1.
    let cols = u32::from(input.cols % 16) + 1;
    let mode = if input.horizontal {
        CompactionMode::Horizontal
    } else {
        CompactionMode::Vertical
    };
    let mut layout: Vec<LayoutItem> = input
        .items
        .iter()
        .take(32)
        .enumerate()
        .map(|(i, raw)| {
            let mut item = LayoutItem::new(
                format!("f{i}"),
                u32::from(raw.x % 24),
                u32::from(raw.y % 48),
                u32::from(raw.w % 6) + 1,
                u32::from(raw.h % 4) + 1,
            );
            item.is_static = raw.is_static;
            item
        })
        .collect();
    correct_bounds(&mut layout, cols);
    let statics: Vec<_> = layout.iter().filter(|i| i.is_static).map(|i| i.rect()).collect();

    let mut layout = compact(&layout, mode, cols);
    for &(pick, x, y) in input.moves.iter().take(16) {
        if layout.is_empty() {
            break;
        }
        let id = layout[usize::from(pick) % layout.len()].id.clone();
        let moved = move_element(
            &layout,
            &id,
            Some(u32::from(x) % cols),
            Some(u32::from(y % 64)),
            MoveOptions::user(mode, cols),
        );
        layout = compact(&moved, mode, cols);
    }

    // Post-conditions that must always hold:
    for (i, a) in layout.iter().enumerate() {
        assert!(!a.moved, "moved flag survived compaction");
        for b in &layout[i + 1..] {
            assert!(!collides(a, b), "{} overlaps {}", a.id, b.id);
        }
    }
    let after: Vec<_> = layout.iter().filter(|i| i.is_static).map(|i| i.rect()).collect();
    assert_eq!(statics, after, "static item moved");
});
