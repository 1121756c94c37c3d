//! The canvas and the ordered collection of placed items.

use serde::{Deserialize, Serialize};

use crate::item::{ItemId, ItemKind, SceneItem};

/// The bounded region items are placed and dragged within, in canvas
/// units (one unit = one terminal cell in the TUI frontend).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp a candidate top-left position so the item's full bounding
    /// box stays inside the canvas. The min-then-max order means an
    /// item wider than the canvas pins to the origin rather than
    /// escaping off the negative edge.
    pub fn clamp(&self, item: &SceneItem, x: f64, y: f64) -> (f64, f64) {
        let cx = x.min(self.width - item.width()).max(0.0);
        let cy = y.min(self.height - item.height()).max(0.0);
        (cx, cy)
    }

    /// Whether a point lies inside the canvas.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && x < self.width && y >= 0.0 && y < self.height
    }
}

/// Ordered list of placed items. Order is insertion order; it carries
/// no meaning beyond display and removal scanning.
///
/// Invariant: ids are unique within a scene, and after any mutation
/// every item's bounding box lies inside the owning canvas.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    items: Vec<SceneItem>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new item at a position already clamped by the caller.
    /// Returns the assigned id.
    pub fn place(&mut self, content: impl Into<String>, x: f64, y: f64, kind: ItemKind) -> ItemId {
        self.insert(SceneItem::new(content, x, y, kind))
    }

    /// Append an already-constructed item, preserving its id.
    pub fn insert(&mut self, item: SceneItem) -> ItemId {
        let id = item.id;
        self.items.push(item);
        id
    }

    pub fn get(&self, id: ItemId) -> Option<&SceneItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Update a stored item's position. Returns false if the id is gone
    /// (e.g. the item was removed mid-gesture).
    pub fn move_to(&mut self, id: ItemId, x: f64, y: f64) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.x = x;
                item.y = y;
                true
            }
            None => false,
        }
    }

    /// Remove an item, returning it if present.
    pub fn remove(&mut self, id: ItemId) -> Option<SceneItem> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(pos))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Topmost item under a point: the latest-placed one wins, matching
    /// display order where later items draw over earlier ones.
    pub fn item_at(&self, x: f64, y: f64) -> Option<&SceneItem> {
        self.items.iter().rev().find(|i| i.hit(x, y))
    }

    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
