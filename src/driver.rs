//! File driver: find input files, parse them, and melt them in order

use crate::error::{MeltError, Result};
use crate::melt::{AuctionMelter, MeltStats, Tables};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const JSON_SUFFIX: &str = ".json";

/// Whether a path names a JSON input: case-sensitive `.json` suffix, and
/// something in front of it.
pub fn is_json_path(path: &Path) -> bool {
    let name = path.to_string_lossy();
    name.len() > JSON_SUFFIX.len() && name.ends_with(JSON_SUFFIX)
}

/// Expand the command-line paths into the list of files to melt.
///
/// Directories contribute their immediate `.json` entries in sorted order;
/// anything that is not a `.json` file is skipped.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.is_dir() {
            let entries = std::fs::read_dir(path).map_err(|e| MeltError::io(path, e))?;
            let mut found = Vec::new();
            for entry in entries {
                let entry = entry.map_err(|e| MeltError::io(path, e))?;
                let entry_path = entry.path();
                if entry_path.is_file() && is_json_path(&entry_path) {
                    found.push(entry_path);
                }
            }
            found.sort();
            debug!("Found {} JSON files in {}", found.len(), path.display());
            inputs.extend(found);
        } else if is_json_path(path) {
            inputs.push(path.clone());
        } else {
            debug!("Skipping non-JSON path {}", path.display());
        }
    }

    Ok(inputs)
}

/// Read and parse one whole file as a single JSON document
pub fn read_document(path: &Path) -> Result<Value> {
    let mut content = std::fs::read(path).map_err(|e| MeltError::io(path, e))?;
    simd_json::serde::from_slice(&mut content).map_err(|e| MeltError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Melt every file into one set of tables.
///
/// Files are processed strictly in order and the first error stops the run;
/// `on_parsed` is called after each file has been melted.
pub fn melt_files<F>(inputs: &[PathBuf], melter: &AuctionMelter, mut on_parsed: F) -> Result<Tables>
where
    F: FnMut(&Path, &MeltStats),
{
    let mut tables = Tables::new();
    let mut total = MeltStats::default();

    for path in inputs {
        let document = read_document(path)?;
        let stats = melter.melt_document(&document, &mut tables)?;
        info!(
            "Parsed {} ({} items, {} skipped)",
            path.display(),
            stats.items_seen,
            stats.items_skipped
        );
        on_parsed(path, &stats);
        total += stats;
    }

    debug!(
        "Melted {} items from {} files ({} skipped)",
        total.items_melted,
        inputs.len(),
        total.items_skipped
    );

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_suffix() {
        assert!(is_json_path(Path::new("items-0.json")));
        assert!(is_json_path(Path::new("data/items.json")));
        assert!(!is_json_path(Path::new(".json")));
        assert!(!is_json_path(Path::new("items.JSON")));
        assert!(!is_json_path(Path::new("items.json.bak")));
        assert!(!is_json_path(Path::new("items.jsonl")));
    }

    #[test]
    fn test_collect_skips_non_json() {
        let inputs = collect_inputs(&[
            PathBuf::from("a.json"),
            PathBuf::from("notes.txt"),
            PathBuf::from("b.json"),
        ])
        .unwrap();
        assert_eq!(inputs, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
    }
}
