#![forbid(unsafe_code)]

//! Drag, resize and drop sessions over a grid.
//!
//! [`GridInteraction`] owns a layout plus a [`GridConfig`] and turns pointer
//! deltas and handle sizes into layout updates. Each gesture is a small state
//! machine:
//!
//! ```text
//! drag_start ──► drag* ──► drag_stop
//! resize_start ──► resize* ──► resize_stop
//! drop_over* ──► drop | drag_leave (counter reaches 0)
//! ```
//!
//! Only one gesture is active at a time; starting a new one replaces it.
//! Continuations without a matching start fail with
//! [`InteractionError::NotStarted`].
//!
//! While a gesture is live the layout is re-resolved and compacted on every
//! step, and a display-only placeholder shows where the item will land.

use std::fmt;

use serde::{Deserialize, Serialize};
use tessera_core::{
    CompactionMode, Layout, LayoutItem, PixelBox, PixelPoint, PixelSize, ValidationError, debug,
    trace,
};

use crate::bounds::correct_bounds;
use crate::collision::{bottom, find_item, position_of};
use crate::compact::compact;
use crate::geometry::{GridGeometry, ResizeConstraints};
use crate::movement::{MoveOptions, move_element, shrink_to_avoid_collisions};
use crate::style::ItemStyle;
use crate::sync::{ChildSpec, SyncOptions, synchronize};

/// Id given to the item that follows an external drag over the grid.
pub const DEFAULT_DROPPING_ID: &str = "__dropping-elem__";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Template for the item created while something is dragged over the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppingItem {
    pub id: String,
    pub w: u32,
    pub h: u32,
}

impl Default for DroppingItem {
    fn default() -> Self {
        Self {
            id: DEFAULT_DROPPING_ID.to_owned(),
            w: 1,
            h: 1,
        }
    }
}

/// Grid-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cols: u32,
    /// Overrides `cols` for clamping and compaction, when set.
    pub max_cols: Option<u32>,
    pub row_height: f64,
    /// `None` means rows are unbounded.
    pub max_rows: Option<u32>,
    pub margin: [f64; 2],
    /// Falls back to `margin` when `None`.
    pub container_padding: Option<[f64; 2]>,
    pub compaction: CompactionMode,
    pub prevent_collision: bool,
    /// Measured container width in pixels.
    pub container_width: f64,
    pub is_draggable: bool,
    pub is_resizable: bool,
    pub is_droppable: bool,
    pub use_css_transforms: bool,
    pub dropping_item: DroppingItem,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: 12,
            max_cols: None,
            row_height: 150.0,
            max_rows: None,
            margin: [5.0, 5.0],
            container_padding: Some([5.0, 5.0]),
            compaction: CompactionMode::Vertical,
            prevent_collision: false,
            container_width: 1200.0,
            is_draggable: true,
            is_resizable: true,
            is_droppable: false,
            use_css_transforms: true,
            dropping_item: DroppingItem::default(),
        }
    }
}

impl GridConfig {
    #[must_use]
    pub fn with_cols(mut self, cols: u32) -> Self {
        self.cols = cols;
        self
    }

    #[must_use]
    pub fn with_max_cols(mut self, max_cols: Option<u32>) -> Self {
        self.max_cols = max_cols;
        self
    }

    #[must_use]
    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    #[must_use]
    pub fn with_max_rows(mut self, max_rows: Option<u32>) -> Self {
        self.max_rows = max_rows;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: [f64; 2]) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_container_padding(mut self, padding: Option<[f64; 2]>) -> Self {
        self.container_padding = padding;
        self
    }

    #[must_use]
    pub fn with_compaction(mut self, mode: CompactionMode) -> Self {
        self.compaction = mode;
        self
    }

    #[must_use]
    pub fn with_prevent_collision(mut self, prevent: bool) -> Self {
        self.prevent_collision = prevent;
        self
    }

    #[must_use]
    pub fn with_container_width(mut self, width: f64) -> Self {
        self.container_width = width;
        self
    }

    #[must_use]
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.is_draggable = draggable;
        self
    }

    #[must_use]
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.is_resizable = resizable;
        self
    }

    #[must_use]
    pub fn with_droppable(mut self, droppable: bool) -> Self {
        self.is_droppable = droppable;
        self
    }

    #[must_use]
    pub fn with_css_transforms(mut self, enabled: bool) -> Self {
        self.use_css_transforms = enabled;
        self
    }

    #[must_use]
    pub fn with_dropping_item(mut self, item: DroppingItem) -> Self {
        self.dropping_item = item;
        self
    }

    /// Padding in effect.
    #[must_use]
    pub fn padding(&self) -> [f64; 2] {
        self.container_padding.unwrap_or(self.margin)
    }

    /// Column count used for compaction and move resolution.
    #[must_use]
    pub fn effective_cols(&self) -> u32 {
        self.max_cols.unwrap_or(self.cols)
    }

    /// Pixel geometry for the current container width.
    #[must_use]
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::from_container(
            self.container_width,
            self.cols,
            self.margin,
            self.padding(),
            self.row_height,
        )
        .with_max_cols(self.max_cols)
        .with_max_rows(self.max_rows)
    }
}

// ---------------------------------------------------------------------------
// Errors and outputs
// ---------------------------------------------------------------------------

/// Gesture step that was called out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Drag,
    DragStop,
    Resize,
    ResizeStop,
}

impl Phase {
    const fn start(self) -> &'static str {
        match self {
            Self::Drag | Self::DragStop => "drag_start",
            Self::Resize | Self::ResizeStop => "resize_start",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::DragStop => "drag_stop",
            Self::Resize => "resize",
            Self::ResizeStop => "resize_stop",
        }
    }
}

/// Interaction failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionError {
    /// A gesture continuation arrived without its start.
    NotStarted { id: String, phase: Phase },
    /// No item with this id.
    UnknownItem { id: String },
    /// The item may not be dragged.
    NotDraggable { id: String },
    /// The item may not be resized.
    NotResizable { id: String },
    /// Dropping is disabled in the config.
    NotDroppable,
}

impl fmt::Display for InteractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted { id, phase } => write!(
                f,
                "{} called before {} for item `{id}`",
                phase.label(),
                phase.start()
            ),
            Self::UnknownItem { id } => write!(f, "no item with id `{id}`"),
            Self::NotDraggable { id } => write!(f, "item `{id}` is not draggable"),
            Self::NotResizable { id } => write!(f, "item `{id}` is not resizable"),
            Self::NotDroppable => f.write_str("dropping is disabled for this grid"),
        }
    }
}

impl std::error::Error for InteractionError {}

/// A committed layout change, reported when a gesture ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutChange {
    pub previous: Layout,
    pub layout: Layout,
}

/// Where a dropped item landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPosition {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Drag {
        id: String,
        origin: PixelPoint,
        previous: Layout,
    },
    Resize {
        id: String,
        size: Option<PixelSize>,
        previous: Layout,
    },
}

/// Interactive state for one grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridInteraction {
    config: GridConfig,
    layout: Layout,
    gesture: Option<Gesture>,
    placeholder: Option<LayoutItem>,
    dropping: bool,
    drag_enter_counter: u32,
    mounted: bool,
}

impl GridInteraction {
    /// Start from an explicit layout, bounds-corrected and compacted.
    #[must_use]
    pub fn new(config: GridConfig, layout: Layout) -> Self {
        let cols = config.effective_cols();
        let mut layout = layout;
        correct_bounds(&mut layout, cols);
        let layout = compact(&layout, config.compaction, cols);
        Self::with_layout(config, layout)
    }

    /// Start from a stored layout reconciled against `children`.
    pub fn from_children(
        config: GridConfig,
        layout: &[LayoutItem],
        children: &[ChildSpec],
        options: SyncOptions,
    ) -> Result<Self, ValidationError> {
        let layout = synchronize(
            layout,
            children,
            config.effective_cols(),
            config.compaction,
            options,
        )?;
        Ok(Self::with_layout(config, layout))
    }

    fn with_layout(config: GridConfig, layout: Layout) -> Self {
        Self {
            config,
            layout,
            gesture: None,
            placeholder: None,
            dropping: false,
            drag_enter_counter: 0,
            mounted: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> &[LayoutItem] {
        &self.layout
    }

    /// Display-only item for the active gesture, if any.
    #[must_use]
    pub fn placeholder(&self) -> Option<&LayoutItem> {
        self.placeholder.as_ref()
    }

    /// Whether a drag or resize is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Mark the grid as measured; switches styles from percentages to pixels.
    pub fn set_mounted(&mut self, mounted: bool) {
        self.mounted = mounted;
    }

    /// Update the measured container width.
    pub fn set_container_width(&mut self, width: f64) {
        self.config.container_width = width;
    }

    /// Reconcile with a new set of children. Ignored while a gesture is live.
    pub fn sync_children(
        &mut self,
        children: &[ChildSpec],
        options: SyncOptions,
    ) -> Result<Option<LayoutChange>, ValidationError> {
        if self.gesture.is_some() {
            return Ok(None);
        }
        let next = synchronize(
            &self.layout,
            children,
            self.config.effective_cols(),
            self.config.compaction,
            options,
        )?;
        Ok(self.commit(next))
    }

    fn commit(&mut self, next: Layout) -> Option<LayoutChange> {
        if next == self.layout {
            return None;
        }
        let previous = std::mem::replace(&mut self.layout, next);
        Some(LayoutChange {
            previous,
            layout: self.layout.clone(),
        })
    }

    fn item(&self, id: &str) -> Result<&LayoutItem, InteractionError> {
        find_item(&self.layout, id).ok_or_else(|| InteractionError::UnknownItem { id: id.to_owned() })
    }

    /// Whether `item` can be dragged: not static, grid allows it, and the
    /// item does not opt out.
    #[must_use]
    pub fn is_item_draggable(&self, item: &LayoutItem) -> bool {
        !item.is_static && self.config.is_draggable && item.is_draggable.unwrap_or(true)
    }

    /// Whether `item` can be resized, by the same rules as dragging.
    #[must_use]
    pub fn is_item_resizable(&self, item: &LayoutItem) -> bool {
        !item.is_static && self.config.is_resizable && item.is_resizable.unwrap_or(true)
    }

    fn settle(&self, layout: &[LayoutItem]) -> Layout {
        compact(layout, self.config.compaction, self.config.effective_cols())
    }

    fn move_options(&self) -> MoveOptions {
        MoveOptions::user(self.config.compaction, self.config.effective_cols())
            .prevent_collision(self.config.prevent_collision)
    }

    // -- drag ---------------------------------------------------------------

    /// Begin dragging `id` from the pixel `origin` of its box.
    ///
    /// Returns the grid cell under `origin`.
    pub fn drag_start(&mut self, id: &str, origin: PixelPoint) -> Result<(u32, u32), InteractionError> {
        let item = self.item(id)?;
        if !self.is_item_draggable(item) {
            return Err(InteractionError::NotDraggable { id: id.to_owned() });
        }
        let cell = self
            .config
            .geometry()
            .position_from_pixels(origin, item.w, item.h);
        debug!(id, x = cell.0, y = cell.1, "drag start");
        self.gesture = Some(Gesture::Drag {
            id: id.to_owned(),
            origin,
            previous: self.layout.clone(),
        });
        Ok(cell)
    }

    fn drag_origin(&self, id: &str, phase: Phase) -> Result<PixelPoint, InteractionError> {
        match &self.gesture {
            Some(Gesture::Drag { id: active, origin, .. }) if active == id => Ok(*origin),
            _ => Err(InteractionError::NotStarted {
                id: id.to_owned(),
                phase,
            }),
        }
    }

    fn move_to_origin(&mut self, id: &str, origin: PixelPoint) -> Result<(u32, u32), InteractionError> {
        let item = self.item(id)?;
        let (x, y) = self
            .config
            .geometry()
            .position_from_pixels(origin, item.w, item.h);
        let moved = move_element(&self.layout, id, Some(x), Some(y), self.move_options());
        self.layout = self.settle(&moved);
        Ok((x, y))
    }

    /// Move the dragged item by a pointer delta.
    ///
    /// Returns the grid cell the pointer now targets.
    pub fn drag(&mut self, id: &str, dx: f64, dy: f64) -> Result<(u32, u32), InteractionError> {
        let origin = self.drag_origin(id, Phase::Drag)?.offset(dx, dy);
        if let Some(Gesture::Drag { origin: slot, .. }) = &mut self.gesture {
            *slot = origin;
        }
        let cell = self.move_to_origin(id, origin)?;
        trace!(id, x = cell.0, y = cell.1, "drag");
        self.placeholder = find_item(&self.layout, id)
            .map(|item| LayoutItem::new(item.id.clone(), item.x, item.y, item.w, item.h));
        Ok(cell)
    }

    /// Finish dragging. Reports a change when the layout differs from the one
    /// at [`GridInteraction::drag_start`].
    pub fn drag_stop(&mut self, id: &str) -> Result<Option<LayoutChange>, InteractionError> {
        let origin = self.drag_origin(id, Phase::DragStop)?;
        self.move_to_origin(id, origin)?;
        let Some(Gesture::Drag { previous, .. }) = self.gesture.take() else {
            return Ok(None);
        };
        self.placeholder = None;
        debug!(id, "drag stop");
        Ok(self.change_since(previous))
    }

    fn change_since(&self, previous: Layout) -> Option<LayoutChange> {
        (previous != self.layout).then(|| LayoutChange {
            previous,
            layout: self.layout.clone(),
        })
    }

    // -- resize -------------------------------------------------------------

    /// Begin resizing `id`.
    pub fn resize_start(&mut self, id: &str) -> Result<(), InteractionError> {
        let item = self.item(id)?;
        if !self.is_item_resizable(item) {
            return Err(InteractionError::NotResizable { id: id.to_owned() });
        }
        debug!(id, w = item.w, h = item.h, "resize start");
        self.gesture = Some(Gesture::Resize {
            id: id.to_owned(),
            size: None,
            previous: self.layout.clone(),
        });
        Ok(())
    }

    fn check_resizing(&self, id: &str, phase: Phase) -> Result<(), InteractionError> {
        match &self.gesture {
            Some(Gesture::Resize { id: active, .. }) if active == id => Ok(()),
            _ => Err(InteractionError::NotStarted {
                id: id.to_owned(),
                phase,
            }),
        }
    }

    /// Apply a handle size in pixels. Returns the resulting grid span.
    ///
    /// With `prevent_collision` the item is shrunk rather than allowed to
    /// overlap its neighbours.
    pub fn resize(&mut self, id: &str, size: PixelSize) -> Result<(u32, u32), InteractionError> {
        self.check_resizing(id, Phase::Resize)?;
        let index = position_of(&self.layout, id)
            .ok_or_else(|| InteractionError::UnknownItem { id: id.to_owned() })?;
        let (w, h) = self
            .config
            .geometry()
            .size_from_pixels(size, &self.layout[index]);

        let mut working = self.layout.clone();
        if self.config.prevent_collision {
            shrink_to_avoid_collisions(&mut working, index, w, h);
        } else {
            working[index].w = w;
            working[index].h = h;
        }
        let resized = &working[index];
        self.placeholder = Some(LayoutItem::fixed(
            resized.id.clone(),
            resized.x,
            resized.y,
            resized.w,
            resized.h,
        ));
        let span = (resized.w, resized.h);
        trace!(id, w = span.0, h = span.1, "resize");

        self.layout = self.settle(&working);
        if let Some(Gesture::Resize { size: slot, .. }) = &mut self.gesture {
            *slot = Some(size);
        }
        Ok(span)
    }

    /// Finish resizing.
    pub fn resize_stop(&mut self, id: &str) -> Result<Option<LayoutChange>, InteractionError> {
        self.check_resizing(id, Phase::ResizeStop)?;
        self.layout = self.settle(&self.layout);
        let Some(Gesture::Resize { previous, .. }) = self.gesture.take() else {
            return Ok(None);
        };
        self.placeholder = None;
        debug!(id, "resize stop");
        Ok(self.change_since(previous))
    }

    // -- drop ---------------------------------------------------------------

    /// Track an external drag hovering at `point` (container pixels).
    ///
    /// The first call inserts the dropping item; every call moves it under
    /// the pointer. Returns the targeted grid cell.
    pub fn drop_over(&mut self, point: PixelPoint) -> Result<(u32, u32), InteractionError> {
        if !self.config.is_droppable {
            return Err(InteractionError::NotDroppable);
        }
        let id = self.config.dropping_item.id.clone();
        if !self.dropping {
            let template = &self.config.dropping_item;
            let mut item = LayoutItem::new(id.clone(), 0, 0, template.w, template.h);
            item.is_draggable = Some(true);
            self.layout.push(item);
            self.dropping = true;
            self.gesture = Some(Gesture::Drag {
                id: id.clone(),
                origin: point,
                previous: self.layout.clone(),
            });
            debug!(id = %id, "drop placeholder inserted");
        }
        let origin = self.drag_origin(&id, Phase::Drag)?;
        self.drag(&id, point.left - origin.left, point.top - origin.top)
    }

    /// Count a drag-enter event over the grid or one of its items.
    pub fn drag_enter(&mut self) {
        self.drag_enter_counter += 1;
    }

    /// Count a drag-leave event. Once enters and leaves balance out, the
    /// dropping item is removed. Returns whether it was removed.
    pub fn drag_leave(&mut self) -> bool {
        self.drag_enter_counter = self.drag_enter_counter.saturating_sub(1);
        if self.drag_enter_counter == 0 && self.dropping {
            self.remove_dropping_item();
            return true;
        }
        false
    }

    /// Complete an external drop. Returns where the dropping item landed,
    /// or `None` if nothing was hovering.
    pub fn drop(&mut self) -> Option<ItemPosition> {
        let position = find_item(&self.layout, &self.config.dropping_item.id).map(|item| ItemPosition {
            x: item.x,
            y: item.y,
            w: item.w,
            h: item.h,
        });
        self.drag_enter_counter = 0;
        self.remove_dropping_item();
        position
    }

    fn remove_dropping_item(&mut self) {
        let id = &self.config.dropping_item.id;
        let remaining: Layout = self.layout.iter().filter(|item| &item.id != id).cloned().collect();
        self.layout = self.settle(&remaining);
        self.dropping = false;
        self.gesture = None;
        self.placeholder = None;
    }

    // -- rendering ----------------------------------------------------------

    /// Pixel style for item `id`.
    ///
    /// A dragged item follows the pointer and a resized item follows the
    /// handle; everything else sits on its grid cell.
    #[must_use]
    pub fn item_style(&self, id: &str) -> Option<ItemStyle> {
        let item = find_item(&self.layout, id)?;
        let mut bounds = self.config.geometry().item_box(item);
        match &self.gesture {
            Some(Gesture::Drag { id: active, origin, .. }) if active == id => {
                bounds = bounds.with_origin(*origin).rounded();
            }
            Some(Gesture::Resize {
                id: active,
                size: Some(size),
                ..
            }) if active == id => {
                bounds = bounds.with_size(*size).rounded();
            }
            _ => {}
        }
        Some(self.style_for(bounds))
    }

    /// Pixel style for the placeholder, if a gesture is live.
    #[must_use]
    pub fn placeholder_style(&self) -> Option<ItemStyle> {
        let placeholder = self.placeholder.as_ref()?;
        Some(self.style_for(self.config.geometry().item_box(placeholder)))
    }

    fn style_for(&self, bounds: PixelBox) -> ItemStyle {
        if !self.mounted {
            ItemStyle::percent(bounds, self.config.container_width)
        } else if self.config.use_css_transforms {
            ItemStyle::transform(bounds)
        } else {
            ItemStyle::top_left(bounds)
        }
    }

    /// Resize handle limits for item `id`.
    #[must_use]
    pub fn resize_constraints(&self, id: &str) -> Option<ResizeConstraints> {
        let item = find_item(&self.layout, id)?;
        Some(self.config.geometry().resize_constraints(item))
    }

    /// Height the container needs to show every row.
    #[must_use]
    pub fn container_height(&self) -> f64 {
        self.config.geometry().container_height(bottom(&self.layout))
    }
}
