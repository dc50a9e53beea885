//! # glint-base
//!
//! Core library for Elm symbol indexing, name resolution, and editor
//! intelligence: autocomplete hints, go-to-definition, go-to-symbol,
//! import suggestions, and importer lookup.
//!
//! The crate is fed per-file module summaries (declared module,
//! declarations, import list) and library documentation bundles, and
//! answers scope-sensitive queries as files are edited, opened, closed,
//! or as new packages are added. It never parses source code and never
//! type checks — summaries arrive pre-extracted from the host editor.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide      → query engines (hints, definitions, importers) + event loop
//!   ↓
//! resolve  → import scopes, exposing policies, token index
//!   ↓
//! docs     → documentation store, bundle decoding, fetch boundary
//!   ↓
//! core     → primitives (cursor/token text utilities)
//! ```

// ============================================================================
// MODULES (dependency order: core → docs → resolve → ide)
// ============================================================================

/// Foundation utilities: identifier classification, token extraction
pub mod core;

/// Documentation model, store, bundle decoding, fetch boundary
pub mod docs;

/// Import scopes and the token index
pub mod resolve;

/// Query engines and the event-driven engine
pub mod ide;

// Re-export the types hosts touch on every event
pub use docs::{
    DocStore, DocsError, DocsRequest, Exposed, FileDocs, Import, ModuleDecls, ModuleDocs,
};
pub use ide::{Engine, Event, Response, Symbol};
pub use resolve::{ActiveFile, Hint, RawImport, SymbolKind, TokenIndex};
