//! Import suggestion search.

use std::sync::Arc;

use crate::docs::DocStore;

/// A module a file could import, matched by name prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSuggestion {
    /// Dotted module name.
    pub name: Arc<str>,
    /// Module doc comment.
    pub comment: Arc<str>,
    /// Library bundle locator; empty for project modules, which are not
    /// navigated to through this path.
    pub source: Arc<str>,
}

/// All importable modules whose name matches a prefix, sorted by name.
///
/// Candidates are the project's own modules plus every cached library
/// module. With no project directory only library modules are offered.
pub fn import_suggestions(
    store: &DocStore,
    project: Option<&str>,
    prefix: &str,
) -> Vec<ImportSuggestion> {
    let mut results: Vec<ImportSuggestion> = Vec::new();

    if let Some(project) = project {
        for module in store.project_modules(project) {
            if module.name.starts_with(prefix) {
                results.push(ImportSuggestion {
                    name: module.name.clone(),
                    comment: module.comment.clone(),
                    source: Arc::from(""),
                });
            }
        }
    }

    for module in store.library_modules() {
        if module.name.starts_with(prefix) {
            results.push(ImportSuggestion {
                name: module.name.clone(),
                comment: module.comment.clone(),
                source: module.source.clone(),
            });
        }
    }

    results.sort_by(|a, b| a.name.cmp(&b.name));
    results
}
