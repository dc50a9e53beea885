//! Name resolution: import scopes and the token index.
//!
//! A file's visible scope is its declared imports layered over the
//! language's built-in default imports, plus a synthesized self-import.
//! The token index maps every form a token could be typed as (bare,
//! qualified, alias-qualified) to the candidate declarations it could
//! refer to; ambiguity is kept as a list and resolved at query time.

mod imports;
mod index;

use std::sync::Arc;

pub use imports::{
    GLOBAL_CASE_TYPES, RawImport, default_imports, effective_imports, has_global_cases,
    normalize_imports,
};
pub use index::{Hint, SymbolKind, TokenIndex, build_index, exposed_names};

// Re-exported so scope code reads naturally from this module
pub use crate::docs::{Exposed, Import};

/// The file currently focused in the editor, with its enclosing project
/// directory. Determines whose import scope governs resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveFile {
    /// Path of the focused file.
    pub path: Arc<str>,
    /// Root directory of the project the file belongs to.
    pub project: Arc<str>,
}

impl ActiveFile {
    /// Create an active-file marker.
    pub fn new(path: impl Into<Arc<str>>, project: impl Into<Arc<str>>) -> Self {
        Self {
            path: path.into(),
            project: project.into(),
        }
    }
}
