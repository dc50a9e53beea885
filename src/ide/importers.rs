//! Importer reverse lookup: which project files can reference a token,
//! and under which local names.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::docs::DocStore;
use crate::resolve::{Hint, TokenIndex, effective_imports, has_global_cases};

/// For every project file that can reference the token's definitions, the
/// local names it would use.
///
/// A hint from a file's own module is referenced bare. A hint from an
/// imported module is referenced under its qualified form and, when the
/// file's import exposes it (or the constructor carve-out applies), bare
/// as well. Files with no way to reference any candidate are omitted.
/// Result order follows project enumeration order.
pub fn importers_for_token(
    store: &DocStore,
    index: &TokenIndex,
    project: &str,
    token: &str,
) -> Vec<(Arc<str>, Vec<Arc<str>>)> {
    let hints = index.get(token);
    if hints.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for (path, file) in store.files_under(project) {
        let names = local_names(file, hints);
        if !names.is_empty() {
            results.push((path.clone(), names));
        }
    }
    results
}

/// The deduplicated local names one file would use for any of the hints.
fn local_names(
    file: &crate::docs::FileDocs,
    hints: &[Hint],
) -> Vec<Arc<str>> {
    let imports = effective_imports(file);
    let mut seen: FxHashSet<Arc<str>> = FxHashSet::default();
    let mut names = Vec::new();
    let mut push = |name: Arc<str>, names: &mut Vec<Arc<str>>| {
        if seen.insert(name.clone()) {
            names.push(name);
        }
    };

    for hint in hints {
        let bare = hint.bare_name();

        if hint.module_name.as_ref() == file.module.name.as_ref() {
            push(Arc::from(bare), &mut names);
            continue;
        }

        let Some(import) = imports.get(&hint.module_name) else {
            continue;
        };

        let carved_out = hint
            .case_of
            .as_deref()
            .is_some_and(|union| has_global_cases(union));
        if import.exposed.exposes(bare) || carved_out {
            push(Arc::from(bare), &mut names);
        }
        let qualifier = import.local_qualifier(&hint.module_name);
        push(Arc::from(format!("{qualifier}.{bare}")), &mut names);
    }

    names
}
