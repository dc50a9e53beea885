//! Token index construction.
//!
//! For the active file, the index maps every string a token could be typed
//! as — bare name, module-qualified name, alias-qualified name — to the
//! list of candidate declarations it could refer to. Entries are appended,
//! never replaced: a key with several same-named candidates from different
//! modules keeps them all, and queries decide how to disambiguate.
//!
//! The index is a pure derived value. It is recomputed in full whenever
//! the active file, any visible module's contents, or the library docs
//! change; rebuilding twice from the same state yields the same index.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use crate::docs::{DocStore, FileDocs, Import, ModuleDocs, UnionDecl, ValueDecl};

use super::ActiveFile;
use super::imports::{default_imports, effective_imports, has_global_cases};

/// What kind of declaration a hint or symbol stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    /// A plain value.
    Default,
    /// A type alias.
    TypeAlias,
    /// A union type.
    Type,
    /// A union type constructor.
    TypeCase,
    /// A module.
    Module,
}

/// One resolvable meaning of a token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hint {
    /// The token form this hint is indexed under (`bar`, `F.bar`,
    /// `Foo.bar`). Queries adjust this for display.
    pub name: Arc<str>,
    /// Owning module name; empty for keyword and alias pseudo-hints.
    pub module_name: Arc<str>,
    /// Canonical source locator of the owning module.
    pub source: Arc<str>,
    /// Doc comment.
    pub comment: Arc<str>,
    /// Type signature text.
    pub signature: Arc<str>,
    /// Enclosing union type, for constructors.
    pub case_of: Option<Arc<str>>,
    /// Declaration kind.
    pub kind: SymbolKind,
}

impl Hint {
    /// The unqualified form of this hint's name (last dotted segment).
    pub fn bare_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// The true module-qualified name, independent of alias or display
    /// adjustments. A module hint's qualified name is the module name
    /// itself; hints with no owning module keep their bare name.
    pub fn qualified_name(&self) -> Arc<str> {
        if self.kind == SymbolKind::Module && !self.module_name.is_empty() {
            self.module_name.clone()
        } else if self.module_name.is_empty() {
            Arc::from(self.bare_name())
        } else {
            Arc::from(format!("{}.{}", self.module_name, self.bare_name()))
        }
    }

    /// A pseudo-hint carrying a name and nothing else (keywords, import
    /// aliases).
    pub fn bare(name: impl Into<Arc<str>>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            module_name: Arc::from(""),
            source: Arc::from(""),
            comment: Arc::from(""),
            signature: Arc::from(""),
            case_of: None,
            kind,
        }
    }

    fn with_name(&self, name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

/// Mapping from every typeable token form to its candidate hints.
#[derive(Clone, Debug, Default)]
pub struct TokenIndex {
    map: IndexMap<Arc<str>, Vec<Hint>>,
}

impl TokenIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hint under a key, keeping earlier candidates.
    pub fn insert(&mut self, key: impl Into<Arc<str>>, hint: Hint) {
        self.map.entry(key.into()).or_default().push(hint);
    }

    /// All candidates for a token; empty when the token is unknown.
    pub fn get(&self, token: &str) -> &[Hint] {
        self.map.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over (key, candidates) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &[Hint])> {
        self.map.iter().map(|(key, hints)| (key, hints.as_slice()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the index has no keys.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Build the token index for the active file.
///
/// With no active file the index is empty. With an active file whose
/// record is not (yet) in the store, the default imports still apply, so
/// prelude names resolve while the first summary is pending.
pub fn build_index(store: &DocStore, active: Option<&ActiveFile>) -> TokenIndex {
    let Some(active) = active else {
        return TokenIndex::new();
    };

    let imports = match store.file(&active.path) {
        Some(file) => effective_imports(file),
        None => default_imports(),
    };

    let mut index = TokenIndex::new();
    for module in store.visible_modules(&active.project) {
        if let Some(import) = imports.get(&module.name) {
            add_module_hints(&mut index, module, import);
        }
    }

    tracing::debug!(
        file = %active.path,
        keys = index.len(),
        "token index rebuilt"
    );
    index
}

/// Generate every (key, hint) pair one imported module contributes.
fn add_module_hints(index: &mut TokenIndex, module: &ModuleDocs, import: &Import) {
    let qualifier = import.local_qualifier(&module.name);
    tracing::trace!(module = %module.name, qualifier, "indexing module");

    for value in &module.decls.values {
        add_decl(index, module, import, qualifier, value, SymbolKind::Default);
    }
    for alias in &module.decls.aliases {
        add_decl(index, module, import, qualifier, alias, SymbolKind::TypeAlias);
    }
    for union in &module.decls.unions {
        add_union(index, module, import, qualifier, union);
    }

    // The module itself, under its name and under its alias
    let module_hint = Hint {
        name: module.name.clone(),
        module_name: module.name.clone(),
        source: module.source.clone(),
        comment: module.comment.clone(),
        signature: Arc::from(""),
        case_of: None,
        kind: SymbolKind::Module,
    };
    index.insert(module.name.clone(), module_hint.clone());
    if let Some(alias) = &import.alias {
        index.insert(alias.clone(), module_hint.with_name(alias.clone()));
    }
}

fn add_decl(
    index: &mut TokenIndex,
    module: &ModuleDocs,
    import: &Import,
    qualifier: &str,
    decl: &ValueDecl,
    kind: SymbolKind,
) {
    let hint = Hint {
        name: decl.name.clone(),
        module_name: module.name.clone(),
        source: module.source.clone(),
        comment: decl.comment.clone(),
        signature: decl.signature.clone(),
        case_of: None,
        kind,
    };

    if import.exposed.exposes(&decl.name) {
        index.insert(decl.name.clone(), hint.clone());
    }
    let qualified = format!("{qualifier}.{}", decl.name);
    index.insert(qualified.clone(), hint.with_name(qualified));
}

fn add_union(
    index: &mut TokenIndex,
    module: &ModuleDocs,
    import: &Import,
    qualifier: &str,
    union: &UnionDecl,
) {
    let type_hint = Hint {
        name: union.name.clone(),
        module_name: module.name.clone(),
        source: module.source.clone(),
        comment: union.comment.clone(),
        signature: union.signature.clone(),
        case_of: None,
        kind: SymbolKind::Type,
    };

    if import.exposed.exposes(&union.name) {
        index.insert(union.name.clone(), type_hint.clone());
    }
    let qualified = format!("{qualifier}.{}", union.name);
    index.insert(qualified.clone(), type_hint.with_name(qualified));

    for case in &union.cases {
        let case_hint = Hint {
            name: case.clone(),
            module_name: module.name.clone(),
            source: module.source.clone(),
            comment: union.comment.clone(),
            signature: union.signature.clone(),
            case_of: Some(union.name.clone()),
            kind: SymbolKind::TypeCase,
        };

        if import.exposed.exposes(case) || has_global_cases(&union.name) {
            index.insert(case.clone(), case_hint.clone());
        }
        // Alias-qualified and module-qualified forms are both typeable
        let local = format!("{qualifier}.{case}");
        index.insert(local.clone(), case_hint.with_name(local.clone()));
        let full = format!("{}.{case}", module.name);
        if full != local {
            index.insert(full.clone(), case_hint.with_name(full));
        }
    }
}

/// The set of (owning module, name) pairs visible unqualified for a file.
pub fn exposed_names(
    store: &DocStore,
    file: &FileDocs,
    project: &str,
) -> FxHashSet<(Arc<str>, Arc<str>)> {
    let imports = effective_imports(file);
    let mut exposed = FxHashSet::default();

    for module in store.visible_modules(project) {
        let Some(import) = imports.get(&module.name) else {
            continue;
        };

        let mut add = |name: &Arc<str>| {
            exposed.insert((module.name.clone(), name.clone()));
        };

        for value in &module.decls.values {
            if import.exposed.exposes(&value.name) {
                add(&value.name);
            }
        }
        for alias in &module.decls.aliases {
            if import.exposed.exposes(&alias.name) {
                add(&alias.name);
            }
        }
        for union in &module.decls.unions {
            if import.exposed.exposes(&union.name) {
                add(&union.name);
            }
            for case in &union.cases {
                if import.exposed.exposes(case) || has_global_cases(&union.name) {
                    add(case);
                }
            }
        }
    }

    exposed
}
