//! The documentation fetch boundary.
//!
//! The core never performs network IO itself. It derives the bundle URI
//! for each needed package, hands [`DocsRequest`]s to the host, and is fed
//! back either decoded summaries or a [`DocsError`]. While a request is
//! pending, queries keep answering from whatever is already cached.

use std::sync::Arc;

use thiserror::Error;

/// Fixed file name of a package's documentation bundle.
pub const DOC_BUNDLE_FILE: &str = "documentation.json";

/// Base URI of the package site the bundle URIs are derived from.
pub const PACKAGE_SITE: &str = "http://package.elm-lang.org/packages";

/// A pending documentation fetch for one package.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocsRequest {
    /// The package identifier as supplied by the host
    /// (`elm-lang/core/5.1.1`).
    pub package: Arc<str>,
    /// The derived bundle URI. Doubles as the cache key for every module
    /// the bundle contains.
    pub url: Arc<str>,
}

impl DocsRequest {
    /// Derive the bundle URI for a package identifier.
    pub fn new(package: impl Into<Arc<str>>) -> Self {
        let package = package.into();
        let url = Arc::from(format!("{PACKAGE_SITE}/{package}/{DOC_BUNDLE_FILE}"));
        Self { package, url }
    }
}

/// Why a documentation bundle could not be loaded.
///
/// Both variants are terminal for the request: the store is left untouched
/// and the core initiates no retry.
#[derive(Debug, Error)]
pub enum DocsError {
    /// The transport reported a failure (connection refused, 404, ...).
    #[error("documentation fetch failed: {0}")]
    Fetch(String),

    /// The payload arrived but is not a valid documentation bundle.
    #[error("documentation bundle could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}
