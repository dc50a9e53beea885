//! Editor-facing features — the four query engines and the event loop.
//!
//! This module is the interface between the semantic state (docs store +
//! token index) and the host editor. Query functions are pure: data in,
//! data out. State mutation happens only in [`Engine::handle`].
//!
//! ## Usage
//!
//! ```ignore
//! use glint::ide::{Engine, Event};
//!
//! let mut engine = Engine::new();
//! let responses = engine.handle(Event::HintsForPartial {
//!     prefix: "ba".to_string(),
//! });
//! ```

mod engine;
mod events;
mod hints;
mod importers;
mod suggestions;
mod symbols;

pub use engine::Engine;
pub use events::{Event, Response};
pub use hints::{KEYWORDS, hints_for_partial};
pub use importers::importers_for_token;
pub use suggestions::{ImportSuggestion, import_suggestions};
pub use symbols::{
    Symbol, default_symbol_name, definition_candidates, is_probable_type_alias, project_symbols,
};
