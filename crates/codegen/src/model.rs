//! Parsed type declarations of a source tree

use crate::annotations::doc_lines;
use crate::error::{CodegenError, CodegenResult};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the generated file in each tree; never read back as input
pub const GENERATED_FILE: &str = "zz_generated.rs";

/// Wrapping of a field's base type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Direct,
    Boxed,
    Optional,
    OptionalBoxed,
    List,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Direct => write!(f, "T"),
            Shape::Boxed => write!(f, "Box<T>"),
            Shape::Optional => write!(f, "Option<T>"),
            Shape::OptionalBoxed => write!(f, "Option<Box<T>>"),
            Shape::List => write!(f, "Vec<T>"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub ty: syn::Type,
    pub docs: Vec<String>,
}

impl FieldDef {
    /// Shape and base type name (`Option<Box<Tenant>>` -> `OptionalBoxed`, `Tenant`)
    pub fn shape(&self) -> (Shape, Option<String>) {
        classify(&self.ty)
    }

    pub fn type_string(&self) -> String {
        type_string(&self.ty)
    }
}

#[derive(Debug, Clone)]
pub struct TypeDef {
    pub name: String,
    pub docs: Vec<String>,
    pub fields: Vec<FieldDef>,
    pub source: PathBuf,
}

impl TypeDef {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

pub fn type_string(ty: &syn::Type) -> String {
    quote::quote!(#ty).to_string().replace(' ', "")
}

/// Single generic argument of `Wrapper<T>`
fn generic_arg<'a>(segment: &'a syn::PathSegment) -> Option<&'a syn::Type> {
    match &segment.arguments {
        syn::PathArguments::AngleBracketed(args) if args.args.len() == 1 => match args.args.first() {
            Some(syn::GenericArgument::Type(ty)) => Some(ty),
            _ => None,
        },
        _ => None,
    }
}

fn last_segment(ty: &syn::Type) -> Option<&syn::PathSegment> {
    match ty {
        syn::Type::Path(p) if p.qself.is_none() => p.path.segments.last(),
        _ => None,
    }
}

/// Strip one `Box<..>` layer if present
fn unbox(ty: &syn::Type) -> (bool, &syn::Type) {
    match last_segment(ty) {
        Some(seg) if seg.ident == "Box" => match generic_arg(seg) {
            Some(inner) => (true, inner),
            None => (false, ty),
        },
        _ => (false, ty),
    }
}

fn base_name(ty: &syn::Type) -> Option<String> {
    let seg = last_segment(ty)?;
    match seg.arguments {
        syn::PathArguments::None => Some(seg.ident.to_string()),
        _ => None,
    }
}

pub fn classify(ty: &syn::Type) -> (Shape, Option<String>) {
    let Some(seg) = last_segment(ty) else {
        return (Shape::Direct, None);
    };
    let wrapped = generic_arg(seg);
    match (seg.ident.to_string().as_str(), wrapped) {
        ("Option", Some(inner)) => {
            let (boxed, base) = unbox(inner);
            let shape = if boxed { Shape::OptionalBoxed } else { Shape::Optional };
            (shape, base_name(base))
        }
        ("Box", Some(inner)) => (Shape::Boxed, base_name(inner)),
        ("Vec", Some(inner)) => (Shape::List, base_name(unbox(inner).1)),
        _ => (Shape::Direct, base_name(ty)),
    }
}

/// Parse every struct with named fields in `dir` (not recursive). The
/// generated file is skipped. Types are returned sorted by name.
pub fn parse_dir(dir: &Path) -> CodegenResult<Vec<TypeDef>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| CodegenError::io(dir, e))? {
        let path = entry.map_err(|e| CodegenError::io(dir, e))?.path();
        let is_source = path.extension().is_some_and(|ext| ext == "rs");
        let is_generated = path.file_name().is_some_and(|name| name == GENERATED_FILE);
        if is_source && !is_generated {
            paths.push(path);
        }
    }
    paths.sort();

    let mut types = Vec::new();
    for path in paths {
        let content = fs::read_to_string(&path).map_err(|e| CodegenError::io(&path, e))?;
        types.extend(parse_source(&content, &path)?);
    }
    types.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(dir = %dir.display(), types = types.len(), "parsed source tree");
    Ok(types)
}

pub fn parse_source(content: &str, path: &Path) -> CodegenResult<Vec<TypeDef>> {
    let file = syn::parse_file(content).map_err(|source| CodegenError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(file
        .items
        .into_iter()
        .filter_map(|item| match item {
            syn::Item::Struct(s) => Some(s),
            _ => None,
        })
        .filter_map(|s| {
            let syn::Fields::Named(named) = s.fields else {
                return None;
            };
            let fields = named
                .named
                .into_iter()
                .filter_map(|f| {
                    let name = f.ident.as_ref()?.to_string();
                    Some(FieldDef {
                        name,
                        docs: doc_lines(&f.attrs),
                        ty: f.ty,
                    })
                })
                .collect();
            Some(TypeDef {
                name: s.ident.to_string(),
                docs: doc_lines(&s.attrs),
                fields,
                source: path.to_path_buf(),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_of(src: &str) -> (Shape, Option<String>) {
        classify(&syn::parse_str::<syn::Type>(src).unwrap())
    }

    #[test]
    fn test_classify_shapes() {
        assert_eq!(shape_of("String"), (Shape::Direct, Some("String".into())));
        assert_eq!(shape_of("Box<Tenant>"), (Shape::Boxed, Some("Tenant".into())));
        assert_eq!(shape_of("Option<Tenant>"), (Shape::Optional, Some("Tenant".into())));
        assert_eq!(shape_of("Option<Box<Tenant>>"), (Shape::OptionalBoxed, Some("Tenant".into())));
        assert_eq!(shape_of("Vec<Project>"), (Shape::List, Some("Project".into())));
        assert_eq!(shape_of("crate::orm::Tenant"), (Shape::Direct, Some("Tenant".into())));
        assert_eq!(shape_of("HashMap<String, String>"), (Shape::Direct, None));
    }

    #[test]
    fn test_parse_source_collects_named_structs() {
        let src = r#"
            /// A tenant
            /// +gen type:object
            #[derive(Default)]
            pub struct Tenant {
                pub id: i64,
                /// +gen readonly
                pub role: String,
            }

            pub struct Unit;
            pub enum Mode { A, B }
        "#;
        let types = parse_source(src, Path::new("m_tenant.rs")).unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "Tenant");
        assert_eq!(types[0].docs, vec!["A tenant", "+gen type:object"]);
        assert_eq!(types[0].fields.len(), 2);
        assert_eq!(types[0].field("role").unwrap().docs, vec!["+gen readonly"]);
        assert_eq!(types[0].field("id").unwrap().type_string(), "i64");
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let err = parse_source("pub struct {", Path::new("broken.rs")).unwrap_err();
        assert!(err.to_string().contains("broken.rs"));
    }
}
