//! The documentation store.
//!
//! Holds every module summary the process knows about: library bundles
//! (cached forever, merged by source key) and per-file project summaries
//! (replaced or removed as the host reports edits). The store itself is
//! dumb state; scope computation and indexing live in `resolve`.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

use super::model::{Import, ModuleDocs, first_paragraph};

/// Everything known about one project file: its module summary and its
/// declared imports, keyed by imported module name.
///
/// The declared imports are exactly what the file states; built-in default
/// imports and the file's self-import are synthesized later, at scope
/// computation time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileDocs {
    /// The file's module summary. Its `source` is the file path.
    pub module: ModuleDocs,
    /// Declared imports: module name → import.
    pub imports: FxHashMap<Arc<str>, Import>,
}

impl FileDocs {
    /// Create a record from a summary and its normalized imports.
    pub fn new(module: ModuleDocs, imports: FxHashMap<Arc<str>, Import>) -> Self {
        Self { module, imports }
    }
}

/// Process-wide documentation state.
#[derive(Clone, Debug, Default)]
pub struct DocStore {
    /// Library module summaries, in bundle arrival order.
    library: Vec<ModuleDocs>,
    /// Source keys of bundles already merged.
    library_sources: FxHashSet<Arc<str>>,
    /// Per-file records, keyed by file path. Insertion order is the
    /// project enumeration order seen by queries.
    files: IndexMap<Arc<str>, FileDocs>,
}

impl DocStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge library summaries into the cache.
    ///
    /// Summaries whose source key is already cached are skipped; module
    /// comments are truncated to their first paragraph on entry. Library
    /// entries are never removed for the lifetime of the process.
    pub fn add_library_docs(&mut self, docs: Vec<ModuleDocs>) {
        let mut added = 0usize;
        for mut module in docs {
            if self.library_sources.contains(&module.source) {
                continue;
            }
            module.comment = Arc::from(first_paragraph(&module.comment));
            self.library.push(module);
            added += 1;
        }
        // One bundle is many modules with a shared source key; register
        // the keys after the pass so every module of a new bundle lands.
        for module in self.library.iter().rev().take(added) {
            self.library_sources.insert(module.source.clone());
        }
        tracing::debug!(added, total = self.library.len(), "library docs merged");
    }

    /// Whether a bundle with this source key is already cached.
    pub fn has_library(&self, source: &str) -> bool {
        self.library_sources.contains(source)
    }

    /// All cached library module summaries.
    pub fn library_modules(&self) -> &[ModuleDocs] {
        &self.library
    }

    /// Insert or replace the record for a file.
    pub fn set_file(&mut self, path: impl Into<Arc<str>>, record: FileDocs) {
        let path = path.into();
        tracing::debug!(path = %path, module = %record.module.name, "file docs set");
        self.files.insert(path, record);
    }

    /// Remove the record for a file. Returns whether a record existed.
    pub fn remove_file(&mut self, path: &str) -> bool {
        let removed = self.files.shift_remove(path).is_some();
        if removed {
            tracing::debug!(path, "file docs removed");
        }
        removed
    }

    /// The record for a file, if known.
    pub fn file(&self, path: &str) -> Option<&FileDocs> {
        self.files.get(path)
    }

    /// Number of known files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// All file records whose path lies under a project directory, in
    /// enumeration order.
    pub fn files_under<'a>(
        &'a self,
        project: &'a str,
    ) -> impl Iterator<Item = (&'a Arc<str>, &'a FileDocs)> {
        self.files
            .iter()
            .filter(move |(path, _)| path.starts_with(project))
    }

    /// All project module summaries under a project directory.
    pub fn project_modules<'a>(
        &'a self,
        project: &'a str,
    ) -> impl Iterator<Item = &'a ModuleDocs> {
        self.files_under(project).map(|(_, record)| &record.module)
    }

    /// Library modules plus project modules under a project directory —
    /// the candidate set for index construction.
    pub fn visible_modules<'a>(
        &'a self,
        project: &'a str,
    ) -> impl Iterator<Item = &'a ModuleDocs> {
        self.library.iter().chain(self.project_modules(project))
    }
}
