//! Decoding of fetched documentation bundles.
//!
//! A bundle is a JSON array of module records. Decoding goes through raw
//! serde structs that mirror the wire format, then converts into the
//! [`ModuleDocs`] model, stamping every module with the bundle's source
//! key. Union constructor entries arrive as `[name, [argument types]]`
//! pairs; only the names are kept.

use std::sync::Arc;

use serde::Deserialize;

use super::fetch::DocsError;
use super::model::{ModuleDecls, ModuleDocs, UnionDecl, ValueDecl};

#[derive(Deserialize)]
struct RawModule {
    name: String,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    aliases: Vec<RawValue>,
    #[serde(default)]
    types: Vec<RawUnion>,
    #[serde(default)]
    values: Vec<RawValue>,
}

#[derive(Deserialize)]
struct RawValue {
    name: String,
    #[serde(default)]
    comment: String,
    #[serde(rename = "type", default)]
    signature: String,
}

#[derive(Deserialize)]
struct RawUnion {
    name: String,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    cases: Vec<(String, serde_json::Value)>,
}

impl RawUnion {
    /// The display signature: type name followed by its type variables.
    fn signature(&self) -> String {
        if self.args.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.args.join(" "))
        }
    }
}

/// Decode a documentation bundle into module summaries.
///
/// `source` is the bundle URI the payload was fetched from; it becomes the
/// source locator of every module in the result.
pub fn decode_docs(source: &str, json: &str) -> Result<Vec<ModuleDocs>, DocsError> {
    let raw: Vec<RawModule> = serde_json::from_str(json)?;
    let source: Arc<str> = Arc::from(source);

    Ok(raw
        .into_iter()
        .map(|module| ModuleDocs {
            source: source.clone(),
            name: Arc::from(module.name),
            comment: Arc::from(module.comment),
            decls: ModuleDecls {
                aliases: module.aliases.into_iter().map(into_decl).collect(),
                unions: module.types.into_iter().map(into_union).collect(),
                values: module.values.into_iter().map(into_decl).collect(),
            },
        })
        .collect())
}

fn into_decl(raw: RawValue) -> ValueDecl {
    ValueDecl {
        name: Arc::from(raw.name),
        comment: Arc::from(raw.comment),
        signature: Arc::from(raw.signature),
    }
}

fn into_union(raw: RawUnion) -> UnionDecl {
    let signature = raw.signature();
    UnionDecl {
        name: Arc::from(raw.name),
        comment: Arc::from(raw.comment),
        signature: Arc::from(signature),
        cases: raw
            .cases
            .into_iter()
            .map(|(name, _args)| Arc::from(name))
            .collect(),
    }
}
