use std::collections::HashMap;

use thiserror::Error;

use crate::asset_keys::{validate_asset_path, validate_texture_id, AssetKeyError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(u32);

impl TextureHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextureError {
    #[error("invalid texture id '{identifier}': {source}")]
    InvalidId {
        identifier: String,
        #[source]
        source: AssetKeyError,
    },
    #[error("invalid texture path '{path}': {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: AssetKeyError,
    },
    #[error("texture '{0}' was never loaded")]
    NotLoaded(String),
}

#[derive(Debug, Clone)]
struct TextureEntry {
    identifier: String,
    path: String,
    revision: u32,
}

/// Maps texture ids to asset-relative image paths. Decoding happens lazily in
/// the renderer, so registering a texture never touches the filesystem.
#[derive(Debug, Default)]
pub struct TextureStore {
    entries: Vec<TextureEntry>,
    by_identifier: HashMap<String, TextureHandle>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `path` under `identifier`. Loading the same id twice keeps its
    /// handle and points it at the new path; a changed path bumps the entry's
    /// revision so decoded copies can be refreshed.
    pub fn load(&mut self, path: &str, identifier: &str) -> Result<TextureHandle, TextureError> {
        validate_texture_id(identifier).map_err(|source| TextureError::InvalidId {
            identifier: identifier.to_string(),
            source,
        })?;
        validate_asset_path(path).map_err(|source| TextureError::InvalidPath {
            path: path.to_string(),
            source,
        })?;

        if let Some(handle) = self.by_identifier.get(identifier).copied() {
            if let Some(entry) = self.entries.get_mut(handle.index()) {
                if entry.path != path {
                    entry.path = path.to_string();
                    entry.revision = entry.revision.wrapping_add(1);
                }
            }
            return Ok(handle);
        }

        let handle = TextureHandle(self.entries.len() as u32);
        self.entries.push(TextureEntry {
            identifier: identifier.to_string(),
            path: path.to_string(),
            revision: 0,
        });
        self.by_identifier.insert(identifier.to_string(), handle);
        Ok(handle)
    }

    pub fn get(&self, identifier: &str) -> Result<TextureHandle, TextureError> {
        self.by_identifier
            .get(identifier)
            .copied()
            .ok_or_else(|| TextureError::NotLoaded(identifier.to_string()))
    }

    pub fn path(&self, handle: TextureHandle) -> Option<&str> {
        self.entries
            .get(handle.index())
            .map(|entry| entry.path.as_str())
    }

    pub fn revision(&self, handle: TextureHandle) -> Option<u32> {
        self.entries.get(handle.index()).map(|entry| entry.revision)
    }

    pub fn identifier(&self, handle: TextureHandle) -> Option<&str> {
        self.entries
            .get(handle.index())
            .map(|entry| entry.identifier.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_handle_registered_by_load() {
        let mut store = TextureStore::new();
        let ship = store.load("sprites/ship.png", "ship").expect("load ship");
        let comet = store.load("sprites/comet.png", "comet").expect("load comet");
        assert_ne!(ship, comet);
        assert_eq!(store.get("ship"), Ok(ship));
        assert_eq!(store.path(comet), Some("sprites/comet.png"));
        assert_eq!(store.identifier(ship), Some("ship"));
    }

    #[test]
    fn unknown_id_is_an_error() {
        let store = TextureStore::new();
        assert_eq!(
            store.get("saucer"),
            Err(TextureError::NotLoaded("saucer".to_string()))
        );
    }

    #[test]
    fn reloading_an_id_keeps_the_handle() {
        let mut store = TextureStore::new();
        let first = store.load("a.png", "ship").expect("first");
        let second = store.load("b.png", "ship").expect("second");
        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
        assert_eq!(store.path(first), Some("b.png"));
    }

    #[test]
    fn repointing_an_id_bumps_its_revision() {
        let mut store = TextureStore::new();
        let ship = store.load("a.png", "ship").expect("first");
        assert_eq!(store.revision(ship), Some(0));
        store.load("a.png", "ship").expect("same path");
        assert_eq!(store.revision(ship), Some(0));
        store.load("b.png", "ship").expect("new path");
        assert_eq!(store.revision(ship), Some(1));
    }

    #[test]
    fn invalid_ids_and_paths_are_rejected() {
        let mut store = TextureStore::new();
        assert!(matches!(
            store.load("ship.png", "Ship"),
            Err(TextureError::InvalidId { .. })
        ));
        assert!(matches!(
            store.load("../ship.png", "ship"),
            Err(TextureError::InvalidPath { .. })
        ));
        assert!(store.is_empty());
    }
}
