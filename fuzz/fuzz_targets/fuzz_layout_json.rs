#![no_main]

use libfuzzer_sys::fuzz_target;
use tessera_layout::{
    ChildSpec, CompactionMode, Layout, SyncOptions, synchronize, validate_layout, validate_value,
};

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    // Validation must never panic, whatever the shape.
    if validate_value(&value, "fuzz").is_err() {
        return;
    }
    let Ok(layout) = serde_json::from_value::<Layout>(value) else {
        return;
    };
    if validate_layout(&layout, "fuzz").is_err() {
        return;
    }

    // Bound the work: huge coordinates are legal but make compaction slow.
    if layout.len() > 64 || layout.iter().any(|i| i.y > 4096 || i.h > 256 || i.w > 256) {
        return;
    }

    let children: Vec<ChildSpec> = layout.iter().map(|i| ChildSpec::new(i.id.clone())).collect();
    let synced = synchronize(&layout, &children, 12, CompactionMode::Vertical, SyncOptions::strict())
        .expect("validated layout synchronizes");
    assert_eq!(synced.len(), layout.len());
    for (a, b) in synced.iter().zip(&layout) {
        assert_eq!(a.id, b.id, "child order not preserved");
        assert!(a.right() <= 12, "item left outside the grid");
    }
});
