//! Inbound and outbound events at the host boundary.
//!
//! The transport that carries these (editor IPC, LSP shim, test harness)
//! is the host's concern; the core only defines the payloads. One inbound
//! event is processed fully — state mutated, index rebuilt if needed,
//! responses produced — before the next is accepted.

use std::sync::Arc;

use crate::docs::{DocsError, DocsRequest, ModuleDocs};
use crate::resolve::{ActiveFile, Hint, RawImport};

use super::suggestions::ImportSuggestion;
use super::symbols::Symbol;

/// Everything the host can tell the core.
#[derive(Debug)]
pub enum Event {
    /// The token under the cursor changed (`None`: cursor left any token).
    ActiveTokenChanged { token: Option<String> },
    /// Focus moved to another file, or away from any file.
    ActiveFileChanged { file: Option<ActiveFile> },
    /// A file was edited or opened; its fresh summary and import list.
    FileContentsChanged {
        path: String,
        module: ModuleDocs,
        imports: Vec<RawImport>,
    },
    /// A file was closed or deleted.
    FileContentsRemoved { path: String },
    /// The project depends on these packages; fetch docs where missing.
    PackagesNeeded { packages: Vec<String> },
    /// The host finished a fetch the core requested earlier.
    DocsFetched {
        result: Result<Vec<ModuleDocs>, DocsError>,
    },
    /// Navigate to the definition of a token.
    GoToDefinition { token: Option<String> },
    /// Open interactive symbol navigation for a project.
    GoToSymbol {
        project: Option<String>,
        token: Option<String>,
    },
    /// Autocomplete a prefix.
    HintsForPartial { prefix: String },
    /// Suggest importable modules for a prefix.
    ImportSuggestions { prefix: String },
    /// Ask whether a token has any definition to go to.
    CanGoToDefinition { token: String },
    /// List the files that can reference a token, with their local names.
    ImportersForToken {
        project: Option<String>,
        token: Option<String>,
    },
}

/// Everything the core can tell the host.
#[derive(Debug)]
pub enum Response {
    /// Requested documentation is now cached.
    DocsLoaded,
    /// A documentation fetch failed; prior state is untouched.
    DocsFailed { message: String },
    /// A fetch round is starting.
    UpdatingDocs,
    /// The host should fetch these bundles and reply with
    /// [`Event::DocsFetched`].
    RequestDocs { requests: Vec<DocsRequest> },
    /// Acknowledges the focus change.
    ActiveFileAck { file: Option<ActiveFile> },
    /// The candidates for the token now under the cursor.
    ActiveHintsChanged { hints: Vec<Hint> },
    /// One navigation target for the requested token; ambiguous tokens
    /// produce one of these per candidate.
    GoToDefinitionResult { symbol: Symbol },
    /// The project symbol set for interactive navigation.
    GoToSymbolResult {
        default_name: Option<String>,
        file: Option<ActiveFile>,
        symbols: Vec<Symbol>,
    },
    /// Autocomplete results.
    HintsForPartialResult { prefix: String, hints: Vec<Hint> },
    /// Import suggestion results.
    ImportSuggestionsResult {
        prefix: String,
        suggestions: Vec<ImportSuggestion>,
    },
    /// Whether the token has at least one definition.
    CanGoToDefinitionResult { token: String, can: bool },
    /// Importer reverse-lookup results: (file path, local names) pairs.
    ImportersForTokenResult {
        token: Option<String>,
        importers: Vec<(Arc<str>, Vec<Arc<str>>)>,
    },
}
