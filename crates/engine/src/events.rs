//! Event types for scene change notifications.
//!
//! The editor queues these instead of blocking on user acknowledgment;
//! the frontend drains them into its status line each frame. The test
//! suite uses the collector to verify what a user action produced.

use crate::item::ItemId;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warn,
    Error,
}

/// Events emitted by the scene editor.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// A new item landed on the canvas.
    ItemPlaced { id: ItemId },
    /// An item's stored position changed during a drag.
    ItemMoved { id: ItemId, x: f64, y: f64 },
    /// An item was removed by a click.
    ItemRemoved { id: ItemId },
    /// Every item was removed (always precedes a load).
    SceneCleared,
    /// The scene was written to the store under this creator name.
    SceneSaved { creator: String },
    /// A saved scene replaced the live one.
    SceneLoaded { creator: String, count: usize },
    /// A message for the user. Never blocks; the frontend decides how
    /// long to show it.
    Notice { level: NoticeLevel, message: String },
}

/// Simple event collector for the frontend and for testing.
#[derive(Default)]
pub struct EventCollector {
    events: Vec<SceneEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    /// Take everything collected so far, leaving the collector empty.
    pub fn drain(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Filter to only Notice events.
    pub fn notices(&self) -> Vec<(NoticeLevel, &str)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SceneEvent::Notice { level, message } => Some((*level, message.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Ids of items placed since the last drain.
    pub fn placed(&self) -> Vec<ItemId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SceneEvent::ItemPlaced { id } => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Ids of items removed since the last drain.
    pub fn removed(&self) -> Vec<ItemId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SceneEvent::ItemRemoved { id } => Some(*id),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemId;

    #[test]
    fn collector_filtering_and_drain() {
        let mut collector = EventCollector::new();
        let id = ItemId::generate();

        collector.push(SceneEvent::ItemPlaced { id });
        collector.push(SceneEvent::Notice {
            level: NoticeLevel::Warn,
            message: "Please enter some text!".into(),
        });
        collector.push(SceneEvent::ItemRemoved { id });

        assert_eq!(collector.len(), 3);
        assert_eq!(collector.placed(), vec![id]);
        assert_eq!(collector.removed(), vec![id]);
        assert_eq!(collector.notices().len(), 1);

        let drained = collector.drain();
        assert_eq!(drained.len(), 3);
        assert!(collector.is_empty());
    }
}
