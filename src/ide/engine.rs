//! The engine: owned state plus the event handler.
//!
//! All mutable state lives here — the documentation store, the focused
//! file and token, the token index with its dirty flag, and the in-flight
//! fetch keys. Handlers mutate, rebuild the index lazily before any read,
//! and return the outbound responses. Nothing is shared or global, so a
//! host embeds as many independent engines as it likes.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::docs::{DocStore, DocsRequest, FileDocs, ModuleDocs};
use crate::resolve::{ActiveFile, RawImport, TokenIndex, build_index, normalize_imports};

use super::events::{Event, Response};
use super::hints::hints_for_partial;
use super::importers::importers_for_token;
use super::suggestions::import_suggestions;
use super::symbols::{default_symbol_name, definition_candidates, project_symbols};

/// Owns all mutable state and processes one inbound event at a time.
#[derive(Debug, Default)]
pub struct Engine {
    store: DocStore,
    active_file: Option<ActiveFile>,
    active_token: Option<String>,
    index: TokenIndex,
    index_dirty: bool,
    /// Bundle URIs requested but not yet resolved, for fetch dedup.
    pending_docs: FxHashSet<Arc<str>>,
}

impl Engine {
    /// Create an engine with nothing cached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the documentation store.
    pub fn store(&self) -> &DocStore {
        &self.store
    }

    /// The currently focused file.
    pub fn active_file(&self) -> Option<&ActiveFile> {
        self.active_file.as_ref()
    }

    /// Process one inbound event and return the responses it produces.
    pub fn handle(&mut self, event: Event) -> Vec<Response> {
        match event {
            Event::ActiveTokenChanged { token } => self.on_token_changed(token),
            Event::ActiveFileChanged { file } => self.on_file_changed(file),
            Event::FileContentsChanged {
                path,
                module,
                imports,
            } => self.on_contents_changed(path, module, imports),
            Event::FileContentsRemoved { path } => self.on_contents_removed(&path),
            Event::PackagesNeeded { packages } => self.on_packages_needed(&packages),
            Event::DocsFetched { result } => self.on_docs_fetched(result),
            Event::GoToDefinition { token } => self.on_go_to_definition(token.as_deref()),
            Event::GoToSymbol { project, token } => {
                self.on_go_to_symbol(project.as_deref(), token.as_deref())
            }
            Event::HintsForPartial { prefix } => self.on_hints_for_partial(prefix),
            Event::ImportSuggestions { prefix } => self.on_import_suggestions(prefix),
            Event::CanGoToDefinition { token } => self.on_can_go_to_definition(token),
            Event::ImportersForToken { project, token } => {
                self.on_importers_for_token(project.as_deref(), token)
            }
        }
    }

    /// Rebuild the token index if any mutation invalidated it.
    fn ensure_index(&mut self) {
        if self.index_dirty {
            self.index = build_index(&self.store, self.active_file.as_ref());
            self.index_dirty = false;
        }
    }

    fn mark_dirty(&mut self) {
        self.index_dirty = true;
    }

    // ==================== state mutation ====================

    fn on_token_changed(&mut self, token: Option<String>) -> Vec<Response> {
        self.active_token = token;
        self.ensure_index();

        let hints = match &self.active_token {
            Some(token) => self.index.get(token).to_vec(),
            None => Vec::new(),
        };
        vec![Response::ActiveHintsChanged { hints }]
    }

    fn on_file_changed(&mut self, file: Option<ActiveFile>) -> Vec<Response> {
        if self.active_file != file {
            self.active_file = file;
            self.mark_dirty();
        }
        vec![Response::ActiveFileAck {
            file: self.active_file.clone(),
        }]
    }

    fn on_contents_changed(
        &mut self,
        path: String,
        mut module: ModuleDocs,
        imports: Vec<RawImport>,
    ) -> Vec<Response> {
        // The file path is the summary's canonical locator, whatever the
        // producer stamped it with
        module.source = Arc::from(path.as_str());
        let record = FileDocs::new(module, normalize_imports(&imports));
        self.store.set_file(path, record);
        self.mark_dirty();
        Vec::new()
    }

    fn on_contents_removed(&mut self, path: &str) -> Vec<Response> {
        if self.store.remove_file(path) {
            self.mark_dirty();
        }
        Vec::new()
    }

    fn on_packages_needed(&mut self, packages: &[String]) -> Vec<Response> {
        let mut in_flight = false;
        let requests: Vec<DocsRequest> = packages
            .iter()
            .map(|package| DocsRequest::new(package.as_str()))
            .filter(|request| {
                if self.store.has_library(&request.url) {
                    return false;
                }
                if self.pending_docs.contains(&request.url) {
                    in_flight = true;
                    return false;
                }
                true
            })
            .collect();

        if requests.is_empty() {
            // Everything cached: done. Anything still in flight: stay
            // quiet, the pending fetch will report.
            return if in_flight {
                Vec::new()
            } else {
                vec![Response::DocsLoaded]
            };
        }

        for request in &requests {
            self.pending_docs.insert(request.url.clone());
        }
        vec![Response::UpdatingDocs, Response::RequestDocs { requests }]
    }

    fn on_docs_fetched(
        &mut self,
        result: Result<Vec<ModuleDocs>, crate::docs::DocsError>,
    ) -> Vec<Response> {
        self.pending_docs.clear();
        match result {
            Ok(modules) => {
                self.store.add_library_docs(modules);
                self.mark_dirty();
                vec![Response::DocsLoaded]
            }
            Err(error) => {
                tracing::warn!(%error, "documentation fetch failed");
                vec![Response::DocsFailed {
                    message: error.to_string(),
                }]
            }
        }
    }

    // ==================== queries ====================

    fn on_go_to_definition(&mut self, token: Option<&str>) -> Vec<Response> {
        self.ensure_index();
        let Some(token) = token else {
            return Vec::new();
        };

        definition_candidates(&self.index, token)
            .into_iter()
            .map(|symbol| Response::GoToDefinitionResult { symbol })
            .collect()
    }

    fn on_go_to_symbol(&mut self, project: Option<&str>, token: Option<&str>) -> Vec<Response> {
        self.ensure_index();

        let symbols = match project {
            Some(project) => project_symbols(&self.store, project),
            None => Vec::new(),
        };
        let default_name = default_symbol_name(&self.index, self.active_file.as_ref(), token);

        vec![Response::GoToSymbolResult {
            default_name,
            file: self.active_file.clone(),
            symbols,
        }]
    }

    fn on_hints_for_partial(&mut self, prefix: String) -> Vec<Response> {
        self.ensure_index();
        let hints = hints_for_partial(
            &self.store,
            &self.index,
            self.active_file.as_ref(),
            &prefix,
        );
        vec![Response::HintsForPartialResult { prefix, hints }]
    }

    fn on_import_suggestions(&mut self, prefix: String) -> Vec<Response> {
        let project = self.active_file.as_ref().map(|a| a.project.clone());
        let suggestions = import_suggestions(&self.store, project.as_deref(), &prefix);
        vec![Response::ImportSuggestionsResult {
            prefix,
            suggestions,
        }]
    }

    fn on_can_go_to_definition(&mut self, token: String) -> Vec<Response> {
        self.ensure_index();
        let can = !self.index.get(&token).is_empty();
        vec![Response::CanGoToDefinitionResult { token, can }]
    }

    fn on_importers_for_token(
        &mut self,
        project: Option<&str>,
        token: Option<String>,
    ) -> Vec<Response> {
        self.ensure_index();

        let importers = match (project, token.as_deref()) {
            (Some(project), Some(tok)) => {
                importers_for_token(&self.store, &self.index, project, tok)
            }
            _ => Vec::new(),
        };
        vec![Response::ImportersForTokenResult { token, importers }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::{DocsError, ModuleDecls, ValueDecl};

    fn make_module(name: &str, values: &[&str]) -> ModuleDocs {
        ModuleDocs {
            source: Arc::from(""),
            name: Arc::from(name),
            comment: Arc::from(""),
            decls: ModuleDecls {
                aliases: Vec::new(),
                unions: Vec::new(),
                values: values.iter().map(|v| ValueDecl::new(*v, "", "")).collect(),
            },
        }
    }

    fn focused_engine() -> Engine {
        let mut engine = Engine::new();
        engine.handle(Event::FileContentsChanged {
            path: "/proj/src/Main.elm".to_string(),
            module: make_module("Main", &["main", "view"]),
            imports: Vec::new(),
        });
        engine.handle(Event::ActiveFileChanged {
            file: Some(ActiveFile::new("/proj/src/Main.elm", "/proj")),
        });
        engine
    }

    #[test]
    fn test_contents_changed_stamps_source() {
        let engine = focused_engine();
        let file = engine.store().file("/proj/src/Main.elm").unwrap();
        assert_eq!(file.module.source.as_ref(), "/proj/src/Main.elm");
    }

    #[test]
    fn test_active_file_ack() {
        let mut engine = Engine::new();
        let responses = engine.handle(Event::ActiveFileChanged { file: None });
        assert!(matches!(
            responses.as_slice(),
            [Response::ActiveFileAck { file: None }]
        ));
    }

    #[test]
    fn test_token_changed_reports_hints() {
        let mut engine = focused_engine();
        let responses = engine.handle(Event::ActiveTokenChanged {
            token: Some("view".to_string()),
        });

        match responses.as_slice() {
            [Response::ActiveHintsChanged { hints }] => {
                assert_eq!(hints.len(), 1);
                assert_eq!(hints[0].module_name.as_ref(), "Main");
            }
            other => panic!("unexpected responses: {other:?}"),
        }
    }

    #[test]
    fn test_can_go_to_definition() {
        let mut engine = focused_engine();

        let responses = engine.handle(Event::CanGoToDefinition {
            token: "main".to_string(),
        });
        assert!(matches!(
            responses.as_slice(),
            [Response::CanGoToDefinitionResult { can: true, .. }]
        ));

        let responses = engine.handle(Event::CanGoToDefinition {
            token: "unknown".to_string(),
        });
        assert!(matches!(
            responses.as_slice(),
            [Response::CanGoToDefinitionResult { can: false, .. }]
        ));
    }

    #[test]
    fn test_go_to_definition_fans_out_per_candidate() {
        let mut engine = focused_engine();
        engine.handle(Event::FileContentsChanged {
            path: "/proj/src/Other.elm".to_string(),
            module: make_module("Other", &["view"]),
            imports: Vec::new(),
        });

        // Only Main's `view` is in scope: one candidate
        let responses = engine.handle(Event::GoToDefinition {
            token: Some("view".to_string()),
        });
        assert_eq!(responses.len(), 1);

        // No token: nothing to navigate to
        let responses = engine.handle(Event::GoToDefinition { token: None });
        assert!(responses.is_empty());
    }

    #[test]
    fn test_go_to_symbol_requires_project() {
        let mut engine = focused_engine();

        let responses = engine.handle(Event::GoToSymbol {
            project: None,
            token: None,
        });
        match responses.as_slice() {
            [Response::GoToSymbolResult { symbols, .. }] => assert!(symbols.is_empty()),
            other => panic!("unexpected responses: {other:?}"),
        }

        let responses = engine.handle(Event::GoToSymbol {
            project: Some("/proj".to_string()),
            token: Some("main".to_string()),
        });
        match responses.as_slice() {
            [Response::GoToSymbolResult {
                default_name,
                symbols,
                ..
            }] => {
                // `main` is defined in the active file: unqualified default
                assert_eq!(default_name.as_deref(), Some("main"));
                assert!(
                    symbols
                        .iter()
                        .any(|s| s.qualified_name.as_ref() == "Main.view")
                );
            }
            other => panic!("unexpected responses: {other:?}"),
        }
    }

    #[test]
    fn test_packages_needed_requests_once() {
        let mut engine = Engine::new();

        let responses = engine.handle(Event::PackagesNeeded {
            packages: vec!["elm-lang/core/5.1.1".to_string()],
        });
        let requests = match responses.as_slice() {
            [Response::UpdatingDocs, Response::RequestDocs { requests }] => requests.clone(),
            other => panic!("unexpected responses: {other:?}"),
        };
        assert_eq!(requests.len(), 1);

        // The same packages again while the fetch is pending: no new request
        let responses = engine.handle(Event::PackagesNeeded {
            packages: vec!["elm-lang/core/5.1.1".to_string()],
        });
        assert!(responses.is_empty());
    }

    #[test]
    fn test_docs_fetched_success_merges_and_reports() {
        let mut engine = Engine::new();
        engine.handle(Event::PackagesNeeded {
            packages: vec!["elm-lang/core/5.1.1".to_string()],
        });

        let mut module = make_module("List", &["map"]);
        module.source = Arc::from(DocsRequest::new("elm-lang/core/5.1.1").url.as_ref());
        let responses = engine.handle(Event::DocsFetched {
            result: Ok(vec![module]),
        });

        assert!(matches!(responses.as_slice(), [Response::DocsLoaded]));
        assert_eq!(engine.store().library_modules().len(), 1);

        // A later request for the same package is satisfied from cache
        let responses = engine.handle(Event::PackagesNeeded {
            packages: vec!["elm-lang/core/5.1.1".to_string()],
        });
        assert!(matches!(responses.as_slice(), [Response::DocsLoaded]));
    }

    #[test]
    fn test_docs_fetch_failure_leaves_store_untouched() {
        let mut engine = Engine::new();
        engine.handle(Event::PackagesNeeded {
            packages: vec!["elm-lang/core/5.1.1".to_string()],
        });

        let responses = engine.handle(Event::DocsFetched {
            result: Err(DocsError::Fetch("connection refused".to_string())),
        });

        match responses.as_slice() {
            [Response::DocsFailed { message }] => {
                assert!(message.contains("connection refused"));
            }
            other => panic!("unexpected responses: {other:?}"),
        }
        assert!(engine.store().library_modules().is_empty());

        // The failed request may be retried by a later PackagesNeeded
        let responses = engine.handle(Event::PackagesNeeded {
            packages: vec!["elm-lang/core/5.1.1".to_string()],
        });
        assert!(matches!(
            responses.as_slice(),
            [Response::UpdatingDocs, Response::RequestDocs { .. }]
        ));
    }

    #[test]
    fn test_removed_file_drops_from_index() {
        let mut engine = focused_engine();
        engine.handle(Event::FileContentsChanged {
            path: "/proj/src/Helper.elm".to_string(),
            module: make_module("Helper", &["assist"]),
            imports: vec![],
        });
        // Import it from Main so it lands in scope
        engine.handle(Event::FileContentsChanged {
            path: "/proj/src/Main.elm".to_string(),
            module: make_module("Main", &["main"]),
            imports: vec![RawImport::exposing("Helper", [".."])],
        });

        let responses = engine.handle(Event::CanGoToDefinition {
            token: "assist".to_string(),
        });
        assert!(matches!(
            responses.as_slice(),
            [Response::CanGoToDefinitionResult { can: true, .. }]
        ));

        engine.handle(Event::FileContentsRemoved {
            path: "/proj/src/Helper.elm".to_string(),
        });
        let responses = engine.handle(Event::CanGoToDefinition {
            token: "assist".to_string(),
        });
        assert!(matches!(
            responses.as_slice(),
            [Response::CanGoToDefinitionResult { can: false, .. }]
        ));
    }

    #[test]
    fn test_hints_for_partial_round_trip() {
        let mut engine = focused_engine();
        let responses = engine.handle(Event::HintsForPartial {
            prefix: "vi".to_string(),
        });

        match responses.as_slice() {
            [Response::HintsForPartialResult { prefix, hints }] => {
                assert_eq!(prefix, "vi");
                assert!(hints.iter().any(|h| h.name.as_ref() == "view"));
            }
            other => panic!("unexpected responses: {other:?}"),
        }
    }

    #[test]
    fn test_import_suggestions_use_active_project() {
        let mut engine = focused_engine();
        let responses = engine.handle(Event::ImportSuggestions {
            prefix: "Ma".to_string(),
        });

        match responses.as_slice() {
            [Response::ImportSuggestionsResult { suggestions, .. }] => {
                assert!(suggestions.iter().any(|s| s.name.as_ref() == "Main"));
            }
            other => panic!("unexpected responses: {other:?}"),
        }
    }

    #[test]
    fn test_importers_requires_project_and_token() {
        let mut engine = focused_engine();

        let responses = engine.handle(Event::ImportersForToken {
            project: None,
            token: Some("main".to_string()),
        });
        match responses.as_slice() {
            [Response::ImportersForTokenResult { importers, .. }] => {
                assert!(importers.is_empty())
            }
            other => panic!("unexpected responses: {other:?}"),
        }

        let responses = engine.handle(Event::ImportersForToken {
            project: Some("/proj".to_string()),
            token: Some("main".to_string()),
        });
        match responses.as_slice() {
            [Response::ImportersForTokenResult { importers, .. }] => {
                assert_eq!(importers.len(), 1);
                assert_eq!(importers[0].0.as_ref(), "/proj/src/Main.elm");
            }
            other => panic!("unexpected responses: {other:?}"),
        }
    }
}
