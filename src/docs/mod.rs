//! Documentation handling: the data model for module summaries, the store
//! that caches them, bundle decoding, and the fetch boundary.
//!
//! Library documentation is fetched once per package and cached for the
//! process lifetime. Project-file summaries are replaced wholesale as the
//! host reports edits.

mod decode;
mod fetch;
mod model;
mod store;

pub use decode::decode_docs;
pub use fetch::{DOC_BUNDLE_FILE, DocsError, DocsRequest, PACKAGE_SITE};
pub use model::{Exposed, Import, ModuleDecls, ModuleDocs, UnionDecl, ValueDecl, first_paragraph};
pub use store::{DocStore, FileDocs};
