//! Listing of extracted files for the indexing collaborator.

use std::collections::BTreeMap;
use std::path::Path;

use walkdir::WalkDir;

use crate::Result;
use crate::types::DestDir;
use crate::types::ExtractedEntry;

/// Walks the destination tree and lists every regular file in it.
///
/// Each entry carries a job-scoped relative key: the path below the
/// destination, prefixed with `logical_prefix` and normalized to forward
/// slashes. Entries are deduplicated by that key and returned sorted by it.
///
/// # Errors
///
/// Returns an I/O error when a directory in the tree cannot be read.
pub fn list_extracted(dest: &DestDir, logical_prefix: &str) -> Result<Vec<ExtractedEntry>> {
    let mut by_key: BTreeMap<String, ExtractedEntry> = BTreeMap::new();

    for entry in WalkDir::new(dest.as_path()).follow_links(false) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(below_dest) = entry.path().strip_prefix(dest.as_path()) else {
            continue;
        };
        let relative_path = relative_key(logical_prefix, below_dest);
        let size = entry.metadata().map_err(std::io::Error::from)?.len();

        by_key.insert(
            relative_path.clone(),
            ExtractedEntry {
                path: entry.path().to_path_buf(),
                relative_path,
                size,
            },
        );
    }

    Ok(by_key.into_values().collect())
}

/// Joins the prefix and the path below the destination with forward slashes.
fn relative_key(logical_prefix: &str, below_dest: &Path) -> String {
    let tail = below_dest
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let prefix = logical_prefix.trim_matches('/');
    if prefix.is_empty() {
        tail
    } else {
        format!("{prefix}/{tail}")
    }
}
