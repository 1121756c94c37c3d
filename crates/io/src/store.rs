//! Named saved-scene store.
//!
//! One JSON file per creator name under the data directory. Re-saving
//! under a name that maps to the same slot silently overwrites it; a
//! load never merges, it hands back the full saved item list for the
//! editor to replace its scene with.
//!
//! The blob carries an explicit format version. A version this build
//! does not know fails the load loudly instead of misparsing.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dollhouse_engine::{ItemKind, SceneItem};

use crate::SCENE_FORMAT_VERSION;

/// Prefix for slot file names, shared with the legacy key format.
const SLOT_PREFIX: &str = "dollhouse_";

#[derive(Debug)]
pub enum StoreError {
    /// Creator name was empty after trimming.
    EmptyCreator,
    /// Refusing to save a scene with no items.
    EmptyScene,
    /// No saved scene exists for this creator.
    NotFound(String),
    /// The slot exists but its contents do not parse.
    Corrupt(String),
    /// The slot was written by an unknown format version.
    UnsupportedVersion { found: u32 },
    /// File system error (read, write, create dir).
    Io(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCreator => write!(f, "creator name is empty"),
            Self::EmptyScene => write!(f, "scene is empty, nothing to save"),
            Self::NotFound(creator) => write!(f, "no saved scene found for '{creator}'"),
            Self::Corrupt(msg) => write!(f, "saved scene is corrupt: {msg}"),
            Self::UnsupportedVersion { found } => {
                write!(
                    f,
                    "saved scene has format version {found}, this build reads version {SCENE_FORMAT_VERSION}"
                )
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// One persisted item. Ids are not persisted; loading re-creates items
/// through the editor's placement path with fresh ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedItem {
    pub content: String,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

impl From<&SceneItem> for SavedItem {
    fn from(item: &SceneItem) -> Self {
        Self {
            content: item.content.clone(),
            x: item.x,
            y: item.y,
            kind: item.kind,
        }
    }
}

/// The persisted blob: creator, full item list, save timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedScene {
    /// Format version; absent in pre-versioning blobs, which read as 0
    /// and are rejected as unsupported rather than misparsed.
    #[serde(default)]
    pub version: u32,
    pub creator: String,
    pub items: Vec<SavedItem>,
    pub timestamp: DateTime<Utc>,
}

impl SavedScene {
    /// Entries in stored order, shaped for `SceneEditor::restore`.
    pub fn entries(&self) -> impl Iterator<Item = (String, f64, f64, ItemKind)> + '_ {
        self.items
            .iter()
            .map(|i| (i.content.clone(), i.x, i.y, i.kind))
    }
}

/// File-backed store of named scenes.
pub struct SceneStore {
    dir: PathBuf,
}

impl SceneStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform data dir, e.g.
    /// `~/.local/share/dollhouse/scenes` on Linux.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dollhouse")
            .join("scenes")
    }

    pub fn open_default() -> Self {
        Self::new(Self::default_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, creator: &str) -> PathBuf {
        self.dir
            .join(format!("{SLOT_PREFIX}{}.json", sanitize_creator(creator)))
    }

    /// Save the full item list under `creator`. One slot per name;
    /// saving again under the same name overwrites.
    pub fn save(&self, creator: &str, items: &[SceneItem]) -> Result<SavedScene, StoreError> {
        let creator = creator.trim();
        if creator.is_empty() {
            return Err(StoreError::EmptyCreator);
        }
        if items.is_empty() {
            return Err(StoreError::EmptyScene);
        }

        let scene = SavedScene {
            version: SCENE_FORMAT_VERSION,
            creator: creator.to_string(),
            items: items.iter().map(SavedItem::from).collect(),
            timestamp: Utc::now(),
        };

        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Io(e.to_string()))?;
        let json =
            serde_json::to_string_pretty(&scene).map_err(|e| StoreError::Io(e.to_string()))?;
        let path = self.slot_path(creator);
        fs::write(&path, json).map_err(|e| StoreError::Io(e.to_string()))?;

        log::info!("saved {} item(s) for '{}' to {}", scene.items.len(), creator, path.display());
        Ok(scene)
    }

    /// Load the saved scene for `creator`. Missing slot is `NotFound`;
    /// unparseable contents fail with `Corrupt` and mutate nothing.
    pub fn load(&self, creator: &str) -> Result<SavedScene, StoreError> {
        let creator = creator.trim();
        if creator.is_empty() {
            return Err(StoreError::EmptyCreator);
        }

        let path = self.slot_path(creator);
        if !path.exists() {
            return Err(StoreError::NotFound(creator.to_string()));
        }

        let data = fs::read_to_string(&path).map_err(|e| StoreError::Io(e.to_string()))?;
        let scene: SavedScene =
            serde_json::from_str(&data).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        if scene.version != SCENE_FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion { found: scene.version });
        }
        Ok(scene)
    }

    pub fn exists(&self, creator: &str) -> bool {
        self.slot_path(creator.trim()).exists()
    }

    /// Remove the slot for `creator`.
    pub fn delete(&self, creator: &str) -> Result<(), StoreError> {
        let creator = creator.trim();
        let path = self.slot_path(creator);
        if !path.exists() {
            return Err(StoreError::NotFound(creator.to_string()));
        }
        fs::remove_file(&path).map_err(|e| StoreError::Io(e.to_string()))
    }

    /// All readable saved scenes, sorted by creator. Slots that fail to
    /// parse are skipped with a warning so one bad file can't hide the
    /// rest of the listing.
    pub fn list(&self) -> Result<Vec<SavedScene>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };

        let mut scenes = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| StoreError::Io(e.to_string()))?.path();
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(n) if n.starts_with(SLOT_PREFIX) && n.ends_with(".json") => n,
                _ => continue,
            };
            match fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|s| serde_json::from_str::<SavedScene>(&s).map_err(|e| e.to_string()))
            {
                Ok(scene) => scenes.push(scene),
                Err(e) => log::warn!("skipping unreadable slot {name}: {e}"),
            }
        }
        scenes.sort_by(|a, b| a.creator.cmp(&b.creator));
        Ok(scenes)
    }
}

/// Map a creator name to a filesystem-safe slot name. Distinct names
/// can collide after sanitizing; they then share a slot, which keeps
/// the one-slot-per-name overwrite contract.
fn sanitize_creator(creator: &str) -> String {
    creator
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
