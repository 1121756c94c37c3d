pub mod editor;
pub mod events;
pub mod gesture;
pub mod item;
pub mod palette;
pub mod scene;

pub use editor::{ClickOutcome, EditorError, SceneEditor};
pub use events::{EventCollector, NoticeLevel, SceneEvent};
pub use gesture::{DragGesture, GestureError};
pub use item::{ItemId, ItemKind, SceneItem};
pub use palette::{Palette, DEFAULT_TOKENS};
pub use scene::{Canvas, Scene};
