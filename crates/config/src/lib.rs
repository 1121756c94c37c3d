pub mod settings;

pub use settings::{CanvasSettings, Settings};
