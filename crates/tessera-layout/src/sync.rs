#![forbid(unsafe_code)]

//! Reconciling a stored layout with the current set of children.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tessera_core::{CompactionMode, ItemConfig, Layout, LayoutItem, ValidationError, debug};

use crate::bounds::correct_bounds;
use crate::collision::bottom;
use crate::compact::compact;
use crate::validate::validate_item;

/// A rendered child: its key and optional grid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildSpec {
    pub key: String,
    #[serde(default)]
    pub config: Option<ItemConfig>,
}

impl ChildSpec {
    /// A child with no grid config; it will be placed at the bottom.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            config: None,
        }
    }

    /// Attach a grid config (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: ItemConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Options for [`synchronize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncOptions {
    /// Validate every child-supplied config before using it.
    pub strict: bool,
}

impl SyncOptions {
    #[must_use]
    pub const fn strict() -> Self {
        Self { strict: true }
    }
}

/// Build the layout for `children`.
///
/// The output holds exactly one item per child, in child order. A child whose
/// key is already in `layout` keeps that item. Otherwise its config is used,
/// or a 1x1 item at column 0 below everything placed so far. The result is
/// bounds-corrected to `cols` and compacted.
///
/// Validation only runs with [`SyncOptions::strict`]; it is the only source
/// of errors.
pub fn synchronize(
    layout: &[LayoutItem],
    children: &[ChildSpec],
    cols: u32,
    mode: CompactionMode,
    options: SyncOptions,
) -> Result<Layout, ValidationError> {
    // First occurrence wins for duplicate ids, matching `find_item`.
    let mut existing: FxHashMap<&str, &LayoutItem> = FxHashMap::default();
    for item in layout {
        existing.entry(item.id.as_str()).or_insert(item);
    }

    let mut out: Layout = Vec::with_capacity(children.len());
    for child in children {
        let item = if let Some(&found) = existing.get(child.key.as_str()) {
            found.clone()
        } else if let Some(config) = &child.config {
            let item = config.clone().into_item(child.key.clone(), bottom(&out));
            if options.strict {
                validate_item(&item)?;
            }
            item
        } else {
            ItemConfig::default().into_item(child.key.clone(), bottom(&out))
        };
        out.push(item);
    }

    debug!(children = children.len(), cols, ?mode, "synchronized layout");
    correct_bounds(&mut out, cols);
    Ok(compact(&out, mode, cols))
}
