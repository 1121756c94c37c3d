// Scene persistence

pub mod store;

pub use store::{SavedItem, SavedScene, SceneStore, StoreError};

/// Saved-scene format version
/// Increment when the schema changes in a way that old versions can't read
pub const SCENE_FORMAT_VERSION: u32 = 1;
