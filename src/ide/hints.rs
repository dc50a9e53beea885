//! Prefix hint search (autocomplete).

use std::sync::Arc;

use crate::docs::DocStore;
use crate::resolve::{
    ActiveFile, Hint, SymbolKind, TokenIndex, effective_imports, exposed_names,
};

/// Language keywords offered as pseudo-hints.
pub const KEYWORDS: [&str; 14] = [
    "as", "case", "else", "exposing", "if", "import", "in", "let", "module", "of", "port", "then",
    "type", "where",
];

/// All hints matching a prefix in the active file's scope.
///
/// Index entries match either on their literal key or on their bare name
/// when that name is exposed to the active file. Matches are displayed
/// with as little qualification as the scope allows: a hint from the
/// active module or from an exposed name shows bare, everything else
/// keeps its qualified form. Import aliases and keywords join as
/// zero-metadata pseudo-hints. The result is sorted by displayed name;
/// duplicates are the caller's to disambiguate (hints carry module and
/// source for that purpose).
pub fn hints_for_partial(
    store: &DocStore,
    index: &TokenIndex,
    active: Option<&ActiveFile>,
    prefix: &str,
) -> Vec<Hint> {
    let mut results: Vec<Hint> = Vec::new();

    let file = active.and_then(|a| store.file(&a.path));
    let exposed = match (active, file) {
        (Some(a), Some(file)) => exposed_names(store, file, &a.project),
        _ => Default::default(),
    };
    let active_module: Arc<str> = file
        .map(|f| f.module.name.clone())
        .unwrap_or_else(|| Arc::from(""));

    for (key, hints) in index.iter() {
        for hint in hints {
            let bare = hint.bare_name();
            let is_exposed = exposed.contains(&(hint.module_name.clone(), Arc::from(bare)));

            let bare_match = is_exposed && bare.starts_with(prefix);
            let literal_match = key.starts_with(prefix);
            if !bare_match && !literal_match {
                continue;
            }

            results.push(display_hint(hint, &active_module, is_exposed));
        }
    }

    // Import aliases are typeable prefixes in their own right
    if let Some(file) = file {
        for import in effective_imports(file).values() {
            if let Some(alias) = &import.alias {
                if alias.starts_with(prefix) {
                    results.push(Hint::bare(alias.clone(), SymbolKind::Module));
                }
            }
        }
    }

    for keyword in KEYWORDS {
        if keyword.starts_with(prefix) {
            results.push(Hint::bare(keyword, SymbolKind::Default));
        }
    }

    results.sort_by(|a, b| a.name.cmp(&b.name));
    results
}

/// Pick the name a hint is displayed under in the active file's scope.
fn display_hint(hint: &Hint, active_module: &str, is_exposed: bool) -> Hint {
    // A module's own dotted name is its display name; stripping the
    // qualifier would produce a name that resolves to nothing
    if hint.kind == SymbolKind::Module {
        return hint.clone();
    }

    let show_bare = hint.module_name.is_empty()
        || hint.module_name.as_ref() == active_module
        || is_exposed;

    if show_bare && hint.name.contains('.') {
        let bare = hint.bare_name().to_string();
        let mut shown = hint.clone();
        shown.name = Arc::from(bare);
        shown
    } else {
        hint.clone()
    }
}
