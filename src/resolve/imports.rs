//! Import statements and the effective import map.
//!
//! Raw import statements arrive from the host as plain data and are
//! normalized permissively: malformed exposing entries are dropped, never
//! rejected. The effective map a file resolves under is the union of the
//! built-in default imports, the file's declared imports (declared wins on
//! conflict), and a synthesized fully-exposed self-import.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::docs::{Exposed, FileDocs, Import};

/// One import statement as stated in a file, before normalization.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RawImport {
    /// Dotted name of the imported module.
    pub module: String,
    /// Local alias, if any.
    #[serde(default)]
    pub alias: Option<String>,
    /// The exposing clause: absent, a name list, or a `".."` wildcard
    /// entry. Entries of the form `Name(..)` expose the type name itself;
    /// constructor exposure is listed per constructor.
    #[serde(default)]
    pub exposing: Option<Vec<String>>,
}

impl RawImport {
    /// A plain `import Module` statement.
    pub fn plain(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            alias: None,
            exposing: None,
        }
    }

    /// An `import Module as Alias` statement.
    pub fn aliased(module: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            alias: Some(alias.into()),
            exposing: None,
        }
    }

    /// An `import Module exposing (...)` statement.
    pub fn exposing<I, S>(module: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            module: module.into(),
            alias: None,
            exposing: Some(names.into_iter().map(Into::into).collect()),
        }
    }
}

/// Whether a string is a well-formed identifier (UAX #31 start character
/// followed by identifier characters, primes allowed).
fn is_well_formed_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if unicode_ident::is_xid_start(c) => {}
        _ => return false,
    }
    chars.all(crate::core::is_word_character)
}

/// Normalize one exposing clause into a policy.
///
/// No clause is [`Exposed::None`]; a `".."` entry anywhere makes it
/// [`Exposed::All`]; otherwise the well-formed entries form a
/// [`Exposed::Listed`] set. `Name(..)` entries are reduced to `Name`;
/// anything else malformed is dropped.
fn normalize_exposing(clause: Option<&[String]>) -> Exposed {
    let Some(entries) = clause else {
        return Exposed::None;
    };

    if entries.iter().any(|entry| entry.trim() == "..") {
        return Exposed::All;
    }

    let names = entries
        .iter()
        .filter_map(|entry| {
            let entry = entry.trim();
            let entry = entry.strip_suffix("(..)").unwrap_or(entry).trim_end();
            is_well_formed_name(entry).then(|| Arc::from(entry))
        })
        .collect();
    Exposed::Listed(names)
}

/// Normalize a file's raw import list into its declared import map.
///
/// A module imported twice keeps the later statement.
pub fn normalize_imports(raw: &[RawImport]) -> FxHashMap<Arc<str>, Import> {
    raw.iter()
        .map(|statement| {
            let import = Import {
                alias: statement.alias.as_deref().map(Arc::from),
                exposed: normalize_exposing(statement.exposing.as_deref()),
            };
            (Arc::from(statement.module.as_str()), import)
        })
        .collect()
}

/// The built-in imports every file resolves under, each with its fixed
/// policy.
pub fn default_imports() -> FxHashMap<Arc<str>, Import> {
    let mut imports = FxHashMap::default();
    imports.insert(Arc::from("Basics"), Import::exposing_all());
    imports.insert(Arc::from("List"), Import::exposing(["List"]));
    imports.insert(Arc::from("Maybe"), Import::exposing(["Maybe"]));
    imports.insert(Arc::from("Result"), Import::exposing(["Result"]));
    imports.insert(Arc::from("String"), Import::exposing(["String"]));
    imports.insert(Arc::from("Char"), Import::exposing(["Char"]));
    imports.insert(Arc::from("Tuple"), Import::plain());
    imports.insert(Arc::from("Debug"), Import::plain());
    imports.insert(Arc::from("Platform"), Import::exposing(["Program"]));
    imports.insert(
        Arc::from("Platform.Cmd"),
        Import::exposing(["Cmd"]).with_alias("Cmd"),
    );
    imports.insert(
        Arc::from("Platform.Sub"),
        Import::exposing(["Sub"]).with_alias("Sub"),
    );
    imports
}

/// Union types whose constructors are visible unqualified in every file,
/// whatever the exposing policy says.
pub const GLOBAL_CASE_TYPES: [&str; 2] = ["Maybe", "Result"];

/// Whether a union type's constructors are globally visible.
pub fn has_global_cases(union_name: &str) -> bool {
    GLOBAL_CASE_TYPES.contains(&union_name)
}

/// The effective import map a file resolves under: default imports,
/// overridden by the file's declared imports, plus the synthesized
/// self-import (fully exposed, unaliased).
pub fn effective_imports(file: &FileDocs) -> FxHashMap<Arc<str>, Import> {
    let mut imports = default_imports();
    for (module, import) in &file.imports {
        imports.insert(module.clone(), import.clone());
    }
    imports.insert(file.module.name.clone(), Import::exposing_all());
    imports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::ModuleDocs;

    fn make_file(module: &str, raw: &[RawImport]) -> FileDocs {
        FileDocs::new(
            ModuleDocs::new(format!("/proj/src/{module}.elm"), module),
            normalize_imports(raw),
        )
    }

    #[test]
    fn test_normalize_no_clause() {
        let imports = normalize_imports(&[RawImport::plain("Html")]);
        assert_eq!(imports["Html"], Import::plain());
    }

    #[test]
    fn test_normalize_wildcard() {
        let imports = normalize_imports(&[RawImport::exposing("Html", [".."])]);
        assert_eq!(imports["Html"].exposed, Exposed::All);
    }

    #[test]
    fn test_normalize_name_list() {
        let imports = normalize_imports(&[RawImport::exposing("Html", ["div", "span"])]);
        assert!(imports["Html"].exposed.exposes("div"));
        assert!(imports["Html"].exposed.exposes("span"));
        assert!(!imports["Html"].exposed.exposes("text"));
    }

    #[test]
    fn test_normalize_constructor_shorthand() {
        // `Msg(..)` exposes the type name; constructors are listed per name
        let imports = normalize_imports(&[RawImport::exposing("App.Msg", ["Msg(..)"])]);
        assert!(imports["App.Msg"].exposed.exposes("Msg"));
        assert!(!imports["App.Msg"].exposed.exposes(".."));
    }

    #[test]
    fn test_normalize_drops_malformed_entries() {
        let imports = normalize_imports(&[RawImport::exposing(
            "Html",
            ["div", "", "  ", "1abc", "(=>)"],
        )]);
        match &imports["Html"].exposed {
            Exposed::Listed(names) => {
                assert_eq!(names.len(), 1);
                assert!(names.contains("div"));
            }
            other => panic!("expected listed policy, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_alias() {
        let imports = normalize_imports(&[RawImport::aliased("Json.Decode", "Decode")]);
        assert_eq!(imports["Json.Decode"].alias.as_deref(), Some("Decode"));
    }

    #[test]
    fn test_default_imports_present() {
        let file = make_file("Main", &[]);
        let effective = effective_imports(&file);

        assert_eq!(effective["Basics"].exposed, Exposed::All);
        assert!(effective["Maybe"].exposed.exposes("Maybe"));
        assert!(!effective["Maybe"].exposed.exposes("Just"));
        assert_eq!(effective["Platform.Cmd"].alias.as_deref(), Some("Cmd"));
        assert_eq!(effective["Debug"].exposed, Exposed::None);
    }

    #[test]
    fn test_declared_import_overrides_default() {
        let file = make_file("Main", &[RawImport::exposing("List", ["map", "filter"])]);
        let effective = effective_imports(&file);

        assert!(effective["List"].exposed.exposes("map"));
        assert!(!effective["List"].exposed.exposes("List"));
    }

    #[test]
    fn test_self_import_always_fully_exposed() {
        // Even a hostile declared import of the file's own module is
        // overridden by the synthesized self-import
        let file = make_file("Main", &[RawImport::exposing("Main", ["nothing"])]);
        let effective = effective_imports(&file);

        assert_eq!(effective["Main"].exposed, Exposed::All);
        assert_eq!(effective["Main"].alias, None);
    }

    #[test]
    fn test_global_case_types() {
        assert!(has_global_cases("Maybe"));
        assert!(has_global_cases("Result"));
        assert!(!has_global_cases("List"));
    }

    #[test]
    fn test_raw_import_deserialize() {
        let raw: RawImport = serde_json::from_str(
            r#"{"module": "Json.Decode", "alias": "Decode", "exposing": ["field", ".."]}"#,
        )
        .unwrap();
        assert_eq!(raw.module, "Json.Decode");

        let imports = normalize_imports(&[raw]);
        assert_eq!(imports["Json.Decode"].exposed, Exposed::All);
    }
}
