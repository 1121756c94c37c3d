//! The scene editor: one object owning the canvas, the live scene, the
//! drag gesture, and the outgoing event queue.
//!
//! Everything the reference behavior kept in module-level globals lives
//! here, initialized once at startup. Frontends feed pointer and text
//! input in canvas coordinates and drain events back out; nothing in
//! this module blocks.

use std::time::Instant;

use crate::events::{EventCollector, NoticeLevel, SceneEvent};
use crate::gesture::{DragGesture, GestureError};
use crate::item::{ItemId, ItemKind, SceneItem};
use crate::scene::{Canvas, Scene};

/// User-input failures surfaced by editor operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorError {
    /// Text input was empty after trimming.
    EmptyText,
    /// A gesture transition was rejected.
    Gesture(GestureError),
}

impl std::fmt::Display for EditorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "text input is empty"),
            Self::Gesture(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EditorError {}

impl From<GestureError> for EditorError {
    fn from(e: GestureError) -> Self {
        Self::Gesture(e)
    }
}

/// What a click on the canvas did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The clicked item was removed.
    Removed(ItemId),
    /// The click was the tail of a drag and was ignored.
    Suppressed,
    /// Nothing under the pointer.
    Miss,
}

pub struct SceneEditor {
    canvas: Canvas,
    scene: Scene,
    gesture: DragGesture,
    events: EventCollector,
}

impl SceneEditor {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            scene: Scene::new(),
            gesture: DragGesture::new(),
            events: EventCollector::new(),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn gesture(&self) -> &DragGesture {
        &self.gesture
    }

    /// Take all queued events. The frontend calls this once per frame.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        self.events.drain()
    }

    #[cfg(test)]
    pub(crate) fn events(&self) -> &EventCollector {
        &self.events
    }

    /// Queue a user-facing notice.
    pub fn notice(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.events.push(SceneEvent::Notice {
            level,
            message: message.into(),
        });
    }

    /// A palette token was dropped at `(x, y)` in canvas coordinates.
    /// A missing or empty payload and a drop outside the canvas are
    /// both no-ops.
    pub fn drop_from_palette(&mut self, payload: Option<&str>, x: f64, y: f64) -> Option<ItemId> {
        let token = payload.filter(|t| !t.is_empty())?;
        if !self.canvas.contains(x, y) {
            return None;
        }
        Some(self.place_clamped(token, x, y, ItemKind::Emoji))
    }

    /// Add user text, centered on the canvas: the default position is
    /// the canvas center offset by half the item's own size, so the
    /// item's center lands on the canvas center. Empty input after
    /// trimming is rejected with a warning and no state change.
    pub fn add_text(&mut self, input: &str) -> Result<ItemId, EditorError> {
        let text = input.trim();
        if text.is_empty() {
            self.notice(NoticeLevel::Warn, "Please enter some text!");
            return Err(EditorError::EmptyText);
        }
        let probe = SceneItem::new(text, 0.0, 0.0, ItemKind::Text);
        let x = self.canvas.width / 2.0 - probe.width() / 2.0;
        let y = self.canvas.height / 2.0 - probe.height() / 2.0;
        Ok(self.place_clamped(text, x, y, ItemKind::Text))
    }

    fn place_clamped(&mut self, content: &str, x: f64, y: f64, kind: ItemKind) -> ItemId {
        let mut item = SceneItem::new(content, x, y, kind);
        let (cx, cy) = self.canvas.clamp(&item, x, y);
        item.x = cx;
        item.y = cy;
        let id = self.scene.insert(item);
        log::debug!("placed {kind:?} item {id} at ({cx}, {cy})");
        self.events.push(SceneEvent::ItemPlaced { id });
        id
    }

    /// Pointer pressed at `(x, y)`. Starts a gesture when an item is
    /// under the pointer, recording the grab offset so the item won't
    /// jump to the pointer on the first move.
    pub fn press(&mut self, x: f64, y: f64) -> Result<Option<ItemId>, EditorError> {
        let Some(item) = self.scene.item_at(x, y) else {
            return Ok(None);
        };
        let (id, grab_dx, grab_dy) = (item.id, x - item.x, y - item.y);
        self.gesture.press(id, grab_dx, grab_dy)?;
        Ok(Some(id))
    }

    /// Pointer moved to `(x, y)` with a gesture possibly live. Clamps
    /// the target so the item's box stays inside the canvas, then
    /// updates the stored position.
    pub fn drag_to(&mut self, x: f64, y: f64) -> Option<ItemId> {
        let (id, tx, ty) = self.gesture.movement(x, y)?;
        let item = self.scene.get(id)?;
        let (cx, cy) = self.canvas.clamp(item, tx, ty);
        if self.scene.move_to(id, cx, cy) {
            self.events.push(SceneEvent::ItemMoved { id, x: cx, y: cy });
        }
        Some(id)
    }

    /// Pointer released at time `now`. Ends any live gesture; a gesture
    /// that moved arms the click-suppression grace window.
    pub fn release(&mut self, now: Instant) -> Option<ItemId> {
        self.gesture.release(now).map(|(id, _moved)| id)
    }

    /// A click at `(x, y)`: removes the clicked item unless the click
    /// is the tail end of a drag that just finished.
    pub fn click(&mut self, x: f64, y: f64, now: Instant) -> ClickOutcome {
        if self.gesture.click_suppressed(now) {
            return ClickOutcome::Suppressed;
        }
        let Some(id) = self.scene.item_at(x, y).map(|i| i.id) else {
            return ClickOutcome::Miss;
        };
        self.scene.remove(id);
        log::debug!("removed item {id}");
        self.events.push(SceneEvent::ItemRemoved { id });
        ClickOutcome::Removed(id)
    }

    /// Remove every item. Load calls this first so a load is always a
    /// full replace, never a merge.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.events.push(SceneEvent::SceneCleared);
    }

    /// Replace the scene with saved entries, in stored order, through
    /// the normal placement path (ids are re-assigned, positions are
    /// re-clamped against this editor's canvas). Returns the count.
    pub fn restore<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (String, f64, f64, ItemKind)>,
    {
        self.clear();
        let mut count = 0;
        for (content, x, y, kind) in entries {
            self.place_clamped(&content, x, y, kind);
            count += 1;
        }
        count
    }

    /// Note that the scene was persisted under `creator`.
    pub fn mark_saved(&mut self, creator: impl Into<String>) {
        self.events.push(SceneEvent::SceneSaved {
            creator: creator.into(),
        });
    }

    /// `restore` plus the load notification, for frontends wiring the
    /// store to the editor.
    pub fn load_saved<I>(&mut self, creator: impl Into<String>, entries: I) -> usize
    where
        I: IntoIterator<Item = (String, f64, f64, ItemKind)>,
    {
        let count = self.restore(entries);
        self.events.push(SceneEvent::SceneLoaded {
            creator: creator.into(),
            count,
        });
        count
    }
}
