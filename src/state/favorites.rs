//! Persisted favorites collection
//!
//! The ordered list is the single source of truth; the id set is a
//! derived index rebuilt inside [`Favorites::toggle`], the only
//! mutation entry point, so the two can never diverge. Every mutation
//! re-serializes the whole list to one JSON file in the user's data
//! directory.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crate::state::data::ImageRecord;

/// File name of the persisted list inside the app data directory
const FAVORITES_FILE: &str = "favorites.json";

/// User-curated, locally persisted set of images.
#[derive(Debug)]
pub struct Favorites {
    images: Vec<ImageRecord>,
    ids: HashSet<String>,
    path: PathBuf,
}

impl Favorites {
    /// Open the store at the default location.
    ///
    /// The file lives in the user's data directory:
    /// - Linux: ~/.local/share/visual-vault/favorites.json
    /// - macOS: ~/Library/Application Support/visual-vault/favorites.json
    /// - Windows: %APPDATA%\visual-vault\favorites.json
    pub fn open_default() -> Self {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .expect("Could not determine user data directory");
        path.push("visual-vault");
        path.push(FAVORITES_FILE);
        Self::open(path)
    }

    /// Open the store backed by the given file.
    ///
    /// Missing file means an empty collection. A file that no longer
    /// parses is treated as empty and deleted, so a corrupt record
    /// cannot fail every subsequent startup.
    pub fn open(path: PathBuf) -> Self {
        let images = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<ImageRecord>>(&raw) {
                Ok(images) => images,
                Err(e) => {
                    eprintln!("⚠️  Discarding corrupt favorites data: {e}");
                    let _ = fs::remove_file(&path);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        let mut favorites = Favorites {
            images,
            ids: HashSet::new(),
            path,
        };
        favorites.rebuild_ids();
        favorites
    }

    /// Add the image if absent, remove it if present.
    ///
    /// Returns whether the image is saved after the call. The list is
    /// persisted before returning.
    pub fn toggle(&mut self, image: &ImageRecord) -> bool {
        let saved = if self.ids.contains(&image.id) {
            self.images.retain(|img| img.id != image.id);
            false
        } else {
            self.images.push(image.clone());
            true
        };
        self.rebuild_ids();
        self.persist();
        saved
    }

    /// O(1) membership check against the derived id set.
    pub fn is_saved(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Favorited images in insertion order.
    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn rebuild_ids(&mut self) {
        self.ids = self.images.iter().map(|img| img.id.clone()).collect();
    }

    /// Write the whole ordered list to disk. Failures are logged and
    /// the in-memory state stays authoritative for the session.
    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("⚠️  Could not create data directory: {e}");
                return;
            }
        }
        match serde_json::to_string(&self.images) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    eprintln!("⚠️  Could not persist favorites: {e}");
                }
            }
            Err(e) => eprintln!("⚠️  Could not serialize favorites: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(id: &str) -> ImageRecord {
        ImageRecord {
            id: id.to_string(),
            url: format!("https://images.example/{id}.jpg"),
            alt: format!("photo {id}"),
            photographer: None,
            width: 1920,
            height: 1080,
        }
    }

    fn store_path(dir: &TempDir) -> PathBuf {
        dir.path().join("favorites.json")
    }

    /// The derived set must mirror the list after every mutation.
    fn assert_in_lockstep(favorites: &Favorites) {
        let from_list: HashSet<&str> = favorites.images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(from_list.len(), favorites.images().len(), "duplicate id in list");
        for id in &from_list {
            assert!(favorites.is_saved(id));
        }
        assert_eq!(from_list.len(), favorites.ids.len());
    }

    #[test]
    fn toggle_keeps_set_and_list_in_lockstep() {
        let dir = TempDir::new().unwrap();
        let mut favorites = Favorites::open(store_path(&dir));

        for id in ["a", "b", "a", "c", "b", "b", "a"] {
            favorites.toggle(&record(id));
            assert_in_lockstep(&favorites);
        }
    }

    #[test]
    fn double_toggle_restores_prior_content_and_order() {
        let dir = TempDir::new().unwrap();
        let mut favorites = Favorites::open(store_path(&dir));
        favorites.toggle(&record("a"));
        favorites.toggle(&record("b"));
        favorites.toggle(&record("c"));

        assert!(favorites.toggle(&record("b")));
        assert!(!favorites.toggle(&record("b")));

        let ids: Vec<&str> = favorites.images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "b"]);

        favorites.toggle(&record("x"));
        favorites.toggle(&record("x"));
        let ids: Vec<&str> = favorites.images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "b"]);
    }

    #[test]
    fn reload_reconstructs_order_and_membership() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        let mut favorites = Favorites::open(path.clone());
        favorites.toggle(&record("a"));
        favorites.toggle(&record("b"));
        drop(favorites);

        let reloaded = Favorites::open(path);
        let ids: Vec<&str> = reloaded.images().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(reloaded.is_saved("a"));
        assert!(reloaded.is_saved("b"));
        assert!(!reloaded.is_saved("c"));
        assert_eq!(reloaded.images()[0], record("a"));
    }

    #[test]
    fn corrupt_data_is_discarded_and_removed() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);
        fs::write(&path, "{not json at all").unwrap();

        let favorites = Favorites::open(path.clone());
        assert!(favorites.is_empty());
        assert!(!path.exists(), "corrupt record should be removed from storage");
    }

    #[test]
    fn missing_file_means_empty_collection() {
        let dir = TempDir::new().unwrap();
        let favorites = Favorites::open(store_path(&dir));
        assert!(favorites.is_empty());
        assert!(!favorites.is_saved("a"));
    }
}
