//! Item identity and placed-item data.
//!
//! An `ItemId` uniquely identifies one placed item within a scene. Ids
//! combine a millisecond timestamp with a random tie-breaker so that two
//! placements landing in the same instant still get distinct ids.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

/// Unique identifier for a placed scene item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId {
    /// Milliseconds since the Unix epoch at creation time.
    millis: i64,
    /// Random tie-breaker for same-instant creations.
    nonce: u32,
}

impl ItemId {
    /// Generate a fresh id for an item created right now.
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let nonce = uuid::Uuid::new_v4().as_u128() as u32;
        Self { millis, nonce }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(millis: i64, nonce: u32) -> Self {
        Self { millis, nonce }
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:08x}", self.millis, self.nonce)
    }
}

/// What a placed item displays as, which only selects a visual style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A short emoji token dragged in from the palette.
    Emoji,
    /// Arbitrary user-entered text.
    Text,
}

/// One object placed on the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneItem {
    pub id: ItemId,
    pub content: String,
    /// Top-left offset from the canvas origin, in canvas units.
    pub x: f64,
    pub y: f64,
    pub kind: ItemKind,
}

impl SceneItem {
    pub fn new(content: impl Into<String>, x: f64, y: f64, kind: ItemKind) -> Self {
        Self {
            id: ItemId::generate(),
            content: content.into(),
            x,
            y,
            kind,
        }
    }

    /// Display width in canvas units, from Unicode display width so CJK
    /// and emoji content measures correctly. Never zero.
    pub fn width(&self) -> f64 {
        UnicodeWidthStr::width(self.content.as_str()).max(1) as f64
    }

    /// Items render one row high.
    pub fn height(&self) -> f64 {
        1.0
    }

    /// Whether a point falls inside this item's bounding box.
    pub fn hit(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.width() && py >= self.y && py < self.y + self.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_unique_under_rapid_creation() {
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(ItemId::generate()), "duplicate id generated");
        }
    }

    #[test]
    fn id_display_format() {
        let id = ItemId::from_parts(1700000000000, 0xABCD);
        assert_eq!(id.to_string(), "1700000000000-0000abcd");
    }

    #[test]
    fn width_uses_display_width() {
        let emoji = SceneItem::new("🐶", 0.0, 0.0, ItemKind::Emoji);
        assert_eq!(emoji.width(), 2.0);

        let text = SceneItem::new("hello", 0.0, 0.0, ItemKind::Text);
        assert_eq!(text.width(), 5.0);

        // Even zero-width content occupies one cell
        let empty = SceneItem::new("", 0.0, 0.0, ItemKind::Text);
        assert_eq!(empty.width(), 1.0);
    }

    #[test]
    fn hit_covers_bounding_box() {
        let item = SceneItem::new("hi", 10.0, 5.0, ItemKind::Text);
        assert!(item.hit(10.0, 5.0));
        assert!(item.hit(11.9, 5.9));
        assert!(!item.hit(12.0, 5.0));
        assert!(!item.hit(9.9, 5.0));
        assert!(!item.hit(10.0, 6.0));
    }
}
