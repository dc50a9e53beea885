//! Data model for module documentation.
//!
//! A [`ModuleDocs`] is one module's worth of declarations, produced either
//! by decoding a fetched library bundle or by the host summarizing a
//! project file. Summaries are immutable once produced and replaced
//! wholesale when their source changes.

use std::sync::Arc;

use rustc_hash::FxHashSet;

/// A single documented value or type-alias declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueDecl {
    /// Declared name.
    pub name: Arc<str>,
    /// Doc comment (may be empty).
    pub comment: Arc<str>,
    /// Type signature text (may be empty for project summaries).
    pub signature: Arc<str>,
}

impl ValueDecl {
    /// Create a new declaration.
    pub fn new(
        name: impl Into<Arc<str>>,
        comment: impl Into<Arc<str>>,
        signature: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            name: name.into(),
            comment: comment.into(),
            signature: signature.into(),
        }
    }
}

/// A union type declaration with its ordered constructor names.
///
/// Each constructor additionally behaves as one value-level declaration of
/// the enclosing module when indexed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnionDecl {
    /// Declared type name.
    pub name: Arc<str>,
    /// Doc comment (may be empty).
    pub comment: Arc<str>,
    /// Type signature text (type name plus type variables).
    pub signature: Arc<str>,
    /// Constructor names, in declaration order.
    pub cases: Vec<Arc<str>>,
}

impl UnionDecl {
    /// Create a new union type declaration.
    pub fn new(
        name: impl Into<Arc<str>>,
        comment: impl Into<Arc<str>>,
        signature: impl Into<Arc<str>>,
        cases: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        Self {
            name: name.into(),
            comment: comment.into(),
            signature: signature.into(),
            cases: cases.into_iter().map(Arc::from).collect(),
        }
    }
}

/// The declaration triple of one module: type aliases, union types, and
/// plain values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleDecls {
    /// Type-alias declarations.
    pub aliases: Vec<ValueDecl>,
    /// Union type declarations.
    pub unions: Vec<UnionDecl>,
    /// Plain value declarations.
    pub values: Vec<ValueDecl>,
}

impl ModuleDecls {
    /// Total number of indexable declarations, constructors included.
    pub fn len(&self) -> usize {
        self.aliases.len()
            + self.values.len()
            + self.unions.iter().map(|u| 1 + u.cases.len()).sum::<usize>()
    }

    /// Check whether the module declares nothing.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty() && self.unions.is_empty() && self.values.is_empty()
    }
}

/// One module's documentation summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleDocs {
    /// Canonical source locator: a file path for project modules, a
    /// bundle-URI-derived key for library modules.
    pub source: Arc<str>,
    /// Dotted module name (`Json.Decode`).
    pub name: Arc<str>,
    /// Module doc comment.
    pub comment: Arc<str>,
    /// The module's declarations.
    pub decls: ModuleDecls,
}

impl ModuleDocs {
    /// Create a summary with empty declarations.
    pub fn new(source: impl Into<Arc<str>>, name: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
            comment: Arc::from(""),
            decls: ModuleDecls::default(),
        }
    }

    /// Whether this summary came from a fetched library bundle rather than
    /// a project file. Library sources are URI keys, project sources are
    /// filesystem paths.
    pub fn is_library(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }
}

/// Which of a module's declarations an import makes visible unqualified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Exposed {
    /// Nothing is exposed; every reference must be qualified.
    #[default]
    None,
    /// Only the listed names are exposed.
    Listed(FxHashSet<Arc<str>>),
    /// Every declaration is exposed.
    All,
}

impl Exposed {
    /// Whether `name` is visible unqualified under this policy.
    pub fn exposes(&self, name: &str) -> bool {
        match self {
            Exposed::None => false,
            Exposed::Listed(names) => names.contains(name),
            Exposed::All => true,
        }
    }
}

/// One import of a module into a file's scope.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Import {
    /// Local alias (`import Json.Decode as Decode`).
    pub alias: Option<Arc<str>>,
    /// Exposing policy.
    pub exposed: Exposed,
}

impl Import {
    /// An unaliased import exposing nothing.
    pub fn plain() -> Self {
        Self::default()
    }

    /// An unaliased import exposing everything.
    pub fn exposing_all() -> Self {
        Self {
            alias: None,
            exposed: Exposed::All,
        }
    }

    /// An unaliased import exposing the listed names.
    pub fn exposing<I: IntoIterator<Item = &'static str>>(names: I) -> Self {
        Self {
            alias: None,
            exposed: Exposed::Listed(names.into_iter().map(Arc::from).collect()),
        }
    }

    /// Attach an alias.
    pub fn with_alias(mut self, alias: impl Into<Arc<str>>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The qualifier this import binds the module to locally: the alias if
    /// present, otherwise the module name itself.
    pub fn local_qualifier<'a>(&'a self, module: &'a str) -> &'a str {
        self.alias.as_deref().unwrap_or(module)
    }
}

/// The first paragraph of a doc comment (up to the first blank line).
///
/// Library module comments can run to hundreds of lines; only the leading
/// paragraph is kept when a bundle enters the store.
pub fn first_paragraph(comment: &str) -> &str {
    comment.split("\n\n").next().unwrap_or("").trim_end()
}
