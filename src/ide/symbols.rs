//! Definition and symbol lookup (go-to-definition, go-to-symbol).

use std::sync::Arc;

use crate::docs::DocStore;
use crate::resolve::{ActiveFile, Hint, SymbolKind, TokenIndex};

/// A definition identity for navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    /// Fully qualified name (`Module.name`; the module name itself for
    /// module symbols).
    pub qualified_name: Arc<str>,
    /// Canonical source locator of the defining module.
    pub source: Arc<str>,
    /// Enclosing union type, for constructors.
    pub case_of: Option<Arc<str>>,
    /// Symbol kind.
    pub kind: SymbolKind,
}

impl Symbol {
    /// The definition a hint points at, with display adjustments dropped:
    /// the true module-qualified name and the true source locator.
    pub fn for_hint(hint: &Hint) -> Self {
        Self {
            qualified_name: hint.qualified_name(),
            source: hint.source.clone(),
            case_of: hint.case_of.clone(),
            kind: hint.kind,
        }
    }
}

/// Every definition a token could refer to, one symbol per candidate.
///
/// Ambiguity fans out: the caller issues one navigation request per
/// candidate and lets the user choose.
pub fn definition_candidates(index: &TokenIndex, token: &str) -> Vec<Symbol> {
    index.get(token).iter().map(Symbol::for_hint).collect()
}

/// Whether a value name reads as a type alias rather than a value.
///
/// Project-file summaries from some producers fold alias declarations
/// into plain values; an uppercase initial recovers the common case.
/// A deliberately capitalized plain value will be misclassified — this
/// predicate is the one place to revisit that trade-off.
pub fn is_probable_type_alias(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}

/// The full navigable symbol set of a project: every project module, its
/// values, aliases, union types, and constructors. Library modules are
/// excluded — go-to-symbol navigates source, not documentation.
pub fn project_symbols(store: &DocStore, project: &str) -> Vec<Symbol> {
    let mut symbols = Vec::new();

    for module in store.project_modules(project) {
        symbols.push(Symbol {
            qualified_name: module.name.clone(),
            source: module.source.clone(),
            case_of: None,
            kind: SymbolKind::Module,
        });

        let qualify = |name: &str| -> Arc<str> { Arc::from(format!("{}.{name}", module.name)) };

        for value in &module.decls.values {
            let kind = if is_probable_type_alias(&value.name) {
                SymbolKind::TypeAlias
            } else {
                SymbolKind::Default
            };
            symbols.push(Symbol {
                qualified_name: qualify(&value.name),
                source: module.source.clone(),
                case_of: None,
                kind,
            });
        }
        for alias in &module.decls.aliases {
            symbols.push(Symbol {
                qualified_name: qualify(&alias.name),
                source: module.source.clone(),
                case_of: None,
                kind: SymbolKind::TypeAlias,
            });
        }
        for union in &module.decls.unions {
            symbols.push(Symbol {
                qualified_name: qualify(&union.name),
                source: module.source.clone(),
                case_of: None,
                kind: SymbolKind::Type,
            });
            for case in &union.cases {
                symbols.push(Symbol {
                    qualified_name: qualify(case),
                    source: module.source.clone(),
                    case_of: Some(union.name.clone()),
                    kind: SymbolKind::TypeCase,
                });
            }
        }
    }

    symbols
}

/// The default query name go-to-symbol opens with.
///
/// A token that resolves uses its first hint's name, shortened to the
/// last dotted segment when the hint is defined in the active file itself
/// (a local definition needs no qualification). An unresolved token is
/// used as typed; no token means no default.
pub fn default_symbol_name(
    index: &TokenIndex,
    active: Option<&ActiveFile>,
    token: Option<&str>,
) -> Option<String> {
    let token = token?;
    if token.is_empty() {
        return None;
    }

    match index.get(token).first() {
        Some(hint) => {
            let local = active.is_some_and(|a| a.path == hint.source);
            if local {
                Some(hint.bare_name().to_string())
            } else {
                Some(hint.name.as_ref().to_string())
            }
        }
        None => Some(token.to_string()),
    }
}
