//! Headless scene operations: list, show, delete saved scenes.

use dollhouse_engine::ItemKind;
use dollhouse_io::SceneStore;

use crate::util;

/// Print a table of all saved scenes.
pub fn list(store: &SceneStore) -> Result<(), String> {
    let scenes = store.list().map_err(|e| e.to_string())?;
    if scenes.is_empty() {
        println!("no saved scenes in {}", store.dir().display());
        return Ok(());
    }

    let name_width = scenes
        .iter()
        .map(|s| util::display_width(&s.creator))
        .max()
        .unwrap_or(0)
        .max("CREATOR".len());

    println!("{} ITEMS  SAVED", util::pad_right("CREATOR", name_width));
    for scene in &scenes {
        println!(
            "{} {:>5}  {}",
            util::pad_right(&scene.creator, name_width),
            scene.items.len(),
            scene.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        );
    }
    Ok(())
}

/// Print one saved scene, as a table or as the raw JSON blob.
pub fn show(store: &SceneStore, creator: &str, json: bool) -> Result<(), String> {
    let scene = store.load(creator).map_err(|e| e.to_string())?;

    if json {
        let blob = serde_json::to_string_pretty(&scene).map_err(|e| e.to_string())?;
        println!("{}", blob);
        return Ok(());
    }

    println!(
        "scene '{}' ({} item(s), saved {})",
        scene.creator,
        scene.items.len(),
        scene.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    let content_width = scene
        .items
        .iter()
        .map(|i| util::display_width(&i.content))
        .max()
        .unwrap_or(0)
        .max("CONTENT".len());

    println!("{} TYPE   X      Y", util::pad_right("CONTENT", content_width));
    for item in &scene.items {
        let kind = match item.kind {
            ItemKind::Emoji => "emoji",
            ItemKind::Text => "text ",
        };
        println!(
            "{} {}  {:<6} {:<6}",
            util::pad_right(&item.content, content_width),
            kind,
            item.x,
            item.y,
        );
    }
    Ok(())
}

/// Delete one saved scene slot.
pub fn delete(store: &SceneStore, creator: &str) -> Result<(), String> {
    store.delete(creator).map_err(|e| e.to_string())?;
    println!("deleted saved scene for '{}'", creator.trim());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dollhouse_engine::SceneItem;
    use tempfile::tempdir;

    #[test]
    fn show_unknown_creator_reports_not_found() {
        let dir = tempdir().unwrap();
        let store = SceneStore::new(dir.path());
        let err = show(&store, "ghost", false).unwrap_err();
        assert!(err.contains("no saved scene found"));
    }

    #[test]
    fn delete_round_trip() {
        let dir = tempdir().unwrap();
        let store = SceneStore::new(dir.path());
        let items = vec![SceneItem::new("🐶", 1.0, 1.0, ItemKind::Emoji)];
        store.save("alice", &items).unwrap();

        delete(&store, "alice").unwrap();
        assert!(delete(&store, "alice").is_err());
    }
}
