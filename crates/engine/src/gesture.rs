//! Per-gesture drag state machine.
//!
//! One press-(move)*-release interaction on a placed item walks
//! `Idle -> Pressed -> Dragging -> Idle`. The press records where
//! inside the item's box the pointer grabbed it, so the item tracks the
//! pointer instead of jumping to it. Releasing a gesture that actually
//! moved arms a short grace window during which a click on the same
//! surface is treated as the tail of the drag, not a removal request.
//!
//! Only one gesture may be live at a time; a second press while one is
//! active is rejected rather than silently stacking.

use std::time::{Duration, Instant};

use crate::item::ItemId;

/// How long after a moved release clicks stay suppressed.
pub const CLICK_SUPPRESS_GRACE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Pressed { id: ItemId, grab_dx: f64, grab_dy: f64 },
    Dragging { id: ItemId, grab_dx: f64, grab_dy: f64 },
}

/// Errors from gesture transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureError {
    /// A press arrived while another gesture was still live.
    GestureActive,
}

impl std::fmt::Display for GestureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GestureActive => write!(f, "another drag gesture is already active"),
        }
    }
}

impl std::error::Error for GestureError {}

/// Drag gesture tracker. Time is injected so tests never sleep.
#[derive(Debug)]
pub struct DragGesture {
    phase: Phase,
    suppress_until: Option<Instant>,
}

impl Default for DragGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl DragGesture {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            suppress_until: None,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// The item currently mid-gesture, if any.
    pub fn active_item(&self) -> Option<ItemId> {
        match self.phase {
            Phase::Idle => None,
            Phase::Pressed { id, .. } | Phase::Dragging { id, .. } => Some(id),
        }
    }

    /// Begin a gesture on `id`. `grab_dx`/`grab_dy` is the pointer's
    /// offset within the item's bounding box at press time.
    pub fn press(&mut self, id: ItemId, grab_dx: f64, grab_dy: f64) -> Result<(), GestureError> {
        if self.is_active() {
            return Err(GestureError::GestureActive);
        }
        self.phase = Phase::Pressed { id, grab_dx, grab_dy };
        Ok(())
    }

    /// Pointer moved to `(px, py)` in canvas coordinates. The first
    /// move promotes the press to a drag. Returns the gestured item and
    /// its unclamped target top-left, or None when no gesture is live.
    pub fn movement(&mut self, px: f64, py: f64) -> Option<(ItemId, f64, f64)> {
        match self.phase {
            Phase::Idle => None,
            Phase::Pressed { id, grab_dx, grab_dy } | Phase::Dragging { id, grab_dx, grab_dy } => {
                self.phase = Phase::Dragging { id, grab_dx, grab_dy };
                Some((id, px - grab_dx, py - grab_dy))
            }
        }
    }

    /// End the gesture. Returns the item and whether the gesture ever
    /// moved. A moved gesture arms the click-suppression window.
    pub fn release(&mut self, now: Instant) -> Option<(ItemId, bool)> {
        let result = match self.phase {
            Phase::Idle => None,
            Phase::Pressed { id, .. } => Some((id, false)),
            Phase::Dragging { id, .. } => {
                self.suppress_until = Some(now + CLICK_SUPPRESS_GRACE);
                Some((id, true))
            }
        };
        self.phase = Phase::Idle;
        result
    }

    /// Whether a click at `now` is the tail end of a drag and must not
    /// remove the item it lands on.
    pub fn click_suppressed(&self, now: Instant) -> bool {
        matches!(self.suppress_until, Some(until) if now < until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> ItemId {
        ItemId::generate()
    }

    #[test]
    fn press_move_release_walks_phases() {
        let mut g = DragGesture::new();
        let item = id();
        assert!(!g.is_active());

        g.press(item, 1.0, 0.0).unwrap();
        assert_eq!(g.active_item(), Some(item));

        let (moved, x, y) = g.movement(10.0, 5.0).unwrap();
        assert_eq!(moved, item);
        assert_eq!((x, y), (9.0, 5.0));

        let now = Instant::now();
        assert_eq!(g.release(now), Some((item, true)));
        assert!(!g.is_active());
    }

    #[test]
    fn second_press_rejected_while_active() {
        let mut g = DragGesture::new();
        g.press(id(), 0.0, 0.0).unwrap();
        assert_eq!(g.press(id(), 0.0, 0.0), Err(GestureError::GestureActive));

        // After release the machine accepts a new press again
        g.release(Instant::now());
        g.press(id(), 0.0, 0.0).unwrap();
    }

    #[test]
    fn moved_release_suppresses_clicks_within_grace() {
        let mut g = DragGesture::new();
        let item = id();
        let now = Instant::now();

        g.press(item, 0.0, 0.0).unwrap();
        g.movement(3.0, 3.0);
        g.release(now);

        assert!(g.click_suppressed(now));
        assert!(g.click_suppressed(now + Duration::from_millis(99)));
        assert!(!g.click_suppressed(now + CLICK_SUPPRESS_GRACE));
    }

    #[test]
    fn unmoved_release_does_not_suppress() {
        let mut g = DragGesture::new();
        let now = Instant::now();

        g.press(id(), 0.0, 0.0).unwrap();
        assert_eq!(g.release(now).map(|(_, moved)| moved), Some(false));
        assert!(!g.click_suppressed(now));
    }

    #[test]
    fn movement_without_press_is_ignored() {
        let mut g = DragGesture::new();
        assert!(g.movement(5.0, 5.0).is_none());
        assert!(g.release(Instant::now()).is_none());
    }
}
