//! Output cache for the CLI.
//!
//! Remembers the content hash of every unit written to an output directory
//! in a manifest next to the files, and skips rewriting units whose hash is
//! unchanged so file timestamps stay stable for downstream builds. Units a
//! previous run wrote but this run did not emit are deleted on flush.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{GeneratorError, Result};
use crate::finalize::SourceUnit;

pub const MANIFEST_FILE: &str = ".bindable-cache.json";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CacheManifest {
    /// Hint name → content hash.
    pub entries: BTreeMap<String, String>,
}

pub struct OutputCache {
    out_dir: PathBuf,
    manifest: CacheManifest,
    /// Hint names emitted since `open`.
    emitted: HashSet<String>,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> GeneratorError + '_ {
    move |source| GeneratorError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl OutputCache {
    pub fn open(out_dir: &Path) -> Result<Self> {
        fs::create_dir_all(out_dir).map_err(io_error(out_dir))?;
        let manifest_path = out_dir.join(MANIFEST_FILE);
        let manifest = match fs::read_to_string(&manifest_path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(manifest) => manifest,
                Err(e) => {
                    // Corrupt manifest: rewrite everything once.
                    warn!(path = %manifest_path.display(), error = %e, "ignoring corrupt cache manifest");
                    CacheManifest::default()
                }
            },
            Err(_) => CacheManifest::default(),
        };
        Ok(Self {
            out_dir: out_dir.to_path_buf(),
            manifest,
            emitted: HashSet::new(),
        })
    }

    fn unit_path(&self, hint_name: &str) -> PathBuf {
        self.out_dir.join(hint_name)
    }

    pub fn is_fresh(&self, unit: &SourceUnit) -> bool {
        self.manifest.entries.get(&unit.hint_name) == Some(&unit.hash)
            && self.unit_path(&unit.hint_name).is_file()
    }

    /// Write `unit` unless an identical copy is already on disk. Returns
    /// whether the file was written.
    pub fn write(&mut self, unit: &SourceUnit) -> Result<bool> {
        self.emitted.insert(unit.hint_name.clone());
        if self.is_fresh(unit) {
            debug!(hint = %unit.hint_name, "unchanged, skipping");
            return Ok(false);
        }
        let path = self.unit_path(&unit.hint_name);
        fs::write(&path, &unit.text).map_err(io_error(&path))?;
        self.manifest
            .entries
            .insert(unit.hint_name.clone(), unit.hash.clone());
        debug!(hint = %unit.hint_name, "written");
        Ok(true)
    }

    /// Delete units recorded by an earlier run that were not written since
    /// `open`, then persist the manifest. Returns the number of units removed.
    pub fn flush(&mut self) -> Result<usize> {
        let stale: Vec<String> = self
            .manifest
            .entries
            .keys()
            .filter(|hint| !self.emitted.contains(*hint))
            .cloned()
            .collect();
        for hint in &stale {
            let path = self.unit_path(hint);
            match fs::remove_file(&path) {
                Ok(()) => debug!(hint = %hint, "removed stale unit"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(io_error(&path)(e)),
            }
            self.manifest.entries.remove(hint);
        }
        if !stale.is_empty() {
            info!(removed = stale.len(), "pruned stale output");
        }

        let path = self.out_dir.join(MANIFEST_FILE);
        let data = serde_json::to_string_pretty(&self.manifest).map_err(|source| {
            GeneratorError::Model {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&path, data).map_err(io_error(&path))?;
        Ok(stale.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finalize::compute_hash;

    fn unit(name: &str, text: &str) -> SourceUnit {
        SourceUnit {
            hint_name: name.to_string(),
            text: text.to_string(),
            hash: compute_hash(text),
        }
    }

    #[test]
    fn test_unchanged_units_are_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let first = unit("Demo.Label.g.cs", "// a\n");

        let mut cache = OutputCache::open(dir.path()).unwrap();
        assert!(cache.write(&first).unwrap());
        cache.flush().unwrap();

        let mut cache = OutputCache::open(dir.path()).unwrap();
        assert!(!cache.write(&first).unwrap());
        assert!(cache.write(&unit("Demo.Label.g.cs", "// b\n")).unwrap());
        assert_eq!(
            fs::read_to_string(dir.path().join("Demo.Label.g.cs")).unwrap(),
            "// b\n"
        );
    }

    #[test]
    fn test_deleted_file_is_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let first = unit("Demo.Label.g.cs", "// a\n");
        let mut cache = OutputCache::open(dir.path()).unwrap();
        cache.write(&first).unwrap();
        fs::remove_file(dir.path().join("Demo.Label.g.cs")).unwrap();
        assert!(cache.write(&first).unwrap());
    }

    #[test]
    fn test_units_missing_from_a_run_are_removed() {
        let dir = tempfile::tempdir().unwrap();
        let label = unit("Demo.Label.g.cs", "// label\n");
        let button = unit("Demo.Button.g.cs", "// button\n");

        let mut cache = OutputCache::open(dir.path()).unwrap();
        cache.write(&label).unwrap();
        cache.write(&button).unwrap();
        assert_eq!(cache.flush().unwrap(), 0);

        let mut cache = OutputCache::open(dir.path()).unwrap();
        assert!(!cache.write(&label).unwrap());
        assert_eq!(cache.flush().unwrap(), 1);
        assert!(dir.path().join("Demo.Label.g.cs").is_file());
        assert!(!dir.path().join("Demo.Button.g.cs").exists());

        let cache = OutputCache::open(dir.path()).unwrap();
        assert!(cache.is_fresh(&label));
        assert!(!cache.manifest.entries.contains_key("Demo.Button.g.cs"));
    }

    #[test]
    fn test_corrupt_manifest_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), "{ not json").unwrap();
        let mut cache = OutputCache::open(dir.path()).unwrap();
        assert!(cache.write(&unit("A.g.cs", "x")).unwrap());
    }
}
