//! Filesystem-backed draft store: one pretty-printed JSON file per draft.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::draft::Draft;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("draft not found: {0}")]
    NotFound(String),

    /// Ids become file names, so they are restricted to a path-safe slug.
    #[error("invalid draft id {0:?} (use lowercase letters, digits, '-' and '_')")]
    InvalidId(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("draft file corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Draft store rooted at a local directory.
///
/// Explicitly constructed with its root; callers own the handle's lifetime.
/// Safe for concurrent readers; last write wins on concurrent saves of the
/// same id.
#[derive(Debug, Clone)]
pub struct LocalDraftStore {
    root: PathBuf,
}

impl LocalDraftStore {
    /// Open a store at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.root.join(format!("{id}.json")))
    }

    /// Write a draft, replacing any existing draft with the same id.
    pub fn save(&self, draft: &Draft) -> Result<(), StoreError> {
        let path = self.path_for(&draft.id)?;
        let json = serde_json::to_string_pretty(draft)?;
        fs::write(&path, json)?;
        info!(id = %draft.id, path = %path.display(), "draft saved");
        Ok(())
    }

    pub fn load(&self, id: &str) -> Result<Draft, StoreError> {
        let path = self.path_for(id)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    /// All drafts, sorted by id. Non-JSON files in the root are skipped.
    pub fn list(&self) -> Result<Vec<Draft>, StoreError> {
        let mut drafts: Vec<Draft> = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let text = fs::read_to_string(&path)?;
            drafts.push(serde_json::from_str(&text)?);
        }
        drafts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(drafts)
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let path = self.path_for(id)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(id = %id, "draft deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clausecraft_core::AnswerSet;

    fn store() -> (tempfile::TempDir, LocalDraftStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDraftStore::open(dir.path().join("drafts")).unwrap();
        (dir, store)
    }

    fn draft(id: &str) -> Draft {
        Draft::new(
            id,
            "hospitality",
            format!("Draft {id}"),
            "body text",
            AnswerSet::new().with("personal_licence", true),
        )
    }

    #[test]
    fn save_then_load_roundtrips() {
        let (_dir, store) = store();
        let d = draft("bar-staff");
        store.save(&d).unwrap();
        assert_eq!(store.load("bar-staff").unwrap(), d);
    }

    #[test]
    fn save_overwrites_existing_draft() {
        let (_dir, store) = store();
        let mut d = draft("bar-staff");
        store.save(&d).unwrap();
        d.body = "revised body".into();
        d.touch();
        store.save(&d).unwrap();
        assert_eq!(store.load("bar-staff").unwrap().body, "revised body");
    }

    #[test]
    fn load_missing_draft_is_not_found() {
        let (_dir, store) = store();
        assert!(matches!(
            store.load("nope").unwrap_err(),
            StoreError::NotFound(id) if id == "nope"
        ));
    }

    #[test]
    fn list_is_sorted_by_id() {
        let (_dir, store) = store();
        store.save(&draft("zulu")).unwrap();
        store.save(&draft("alpha")).unwrap();
        store.save(&draft("mike")).unwrap();
        let ids: Vec<String> = store.list().unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["alpha", "mike", "zulu"]);
    }

    #[test]
    fn delete_removes_the_draft() {
        let (_dir, store) = store();
        store.save(&draft("gone")).unwrap();
        store.delete("gone").unwrap();
        assert!(matches!(
            store.load("gone").unwrap_err(),
            StoreError::NotFound(_)
        ));
        assert!(matches!(
            store.delete("gone").unwrap_err(),
            StoreError::NotFound(_)
        ));
    }

    #[test]
    fn path_traversal_ids_are_rejected() {
        let (_dir, store) = store();
        for bad in ["", "../escape", "has space", "UPPER", "dot.dot"] {
            assert!(matches!(
                store.load(bad).unwrap_err(),
                StoreError::InvalidId(_)
            ));
        }
    }
}
