//! Structured doc-comment annotations
//!
//! Storage types carry `+gen key:value ...` lines, form types carry
//! `+genform object:<Storage>` and fields may be marked `+gen readonly`.

use crate::error::{CodegenError, CodegenResult};
use std::collections::BTreeMap;

const GEN_PREFIX: &str = "+gen ";
const GENFORM_PREFIX: &str = "+genform";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Object,
    /// Junction entity of a many-to-many relation
    ObjectRel,
}

/// Options of a storage type's `+gen` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenOptions {
    pub kind: ObjectKind,
    pub pk_field: String,
    pub preloads: Vec<String>,
    pub search: Vec<String>,
    pub left_field: Option<String>,
    pub right_field: Option<String>,
}

/// Text of every `///` line, trimmed
pub fn doc_lines(attrs: &[syn::Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(nv) => match &nv.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(s), ..
                }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

fn list(value: Option<&String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Parse the `+gen` lines of a type. `None` when the type is not annotated
/// or its `type` option names no generated shape.
pub fn parse_gen(type_name: &str, docs: &[String]) -> CodegenResult<Option<GenOptions>> {
    let mut options = BTreeMap::new();
    for line in docs {
        let Some(content) = line.strip_prefix(GEN_PREFIX) else {
            continue;
        };
        for option in content.split_whitespace() {
            let (key, value) = option.split_once(':').ok_or_else(|| CodegenError::Annotation {
                type_name: type_name.to_string(),
                option: option.to_string(),
            })?;
            options.insert(key.to_string(), value.to_string());
        }
    }

    let kind = match options.get("type").map(String::as_str) {
        Some("object") => ObjectKind::Object,
        Some("objectrel") => ObjectKind::ObjectRel,
        _ => return Ok(None),
    };
    let pk_field = options
        .get("pkfield")
        .or_else(|| options.get("pk"))
        .cloned()
        .unwrap_or_else(|| "id".to_string());

    Ok(Some(GenOptions {
        kind,
        pk_field,
        preloads: list(options.get("preloads")),
        search: list(options.get("search")),
        left_field: options.get("leftfield").cloned(),
        right_field: options.get("rightfield").cloned(),
    }))
}

/// Storage type named by a form's `+genform object:<Type>` line
pub fn parse_genform(docs: &[String]) -> Option<String> {
    docs.iter()
        .filter_map(|line| line.strip_prefix(GENFORM_PREFIX))
        .flat_map(str::split_whitespace)
        .filter_map(|option| option.split_once(':'))
        .find(|(key, _)| *key == "object")
        .map(|(_, value)| value.to_string())
}

/// Field excluded from stored columns (`+gen readonly`)
pub fn is_readonly(docs: &[String]) -> bool {
    docs.iter().any(|line| line == "+gen readonly")
}
