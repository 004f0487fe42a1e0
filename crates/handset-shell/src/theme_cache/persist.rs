use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use handset_common::PersistError;

use super::CacheEntry;

/// `Ok(None)` when the file does not exist.
pub(super) fn read(path: &Path) -> Result<Option<HashMap<String, CacheEntry>>, PersistError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(PersistError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| PersistError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Write through a sibling temp file and rename over the target.
pub(super) fn write(path: &Path, entries: &HashMap<String, CacheEntry>) -> Result<(), PersistError> {
    let sorted: BTreeMap<&String, &CacheEntry> = entries.iter().collect();
    let json = serde_json::to_string_pretty(&sorted).map_err(|e| PersistError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let write_err = |source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(write_err)?;
    std::fs::rename(&tmp, path).map_err(write_err)
}
