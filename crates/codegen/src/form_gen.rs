//! Form-tree output: conversions between form types and storage types
//!
//! Generation is two-pass. The first pass maps every `+genform` type to its
//! storage type; the second emits the conversions, recursing through nested
//! form fields by the mapping built in the first.

use crate::annotations::{parse_gen, parse_genform};
use crate::error::{CodegenError, CodegenResult};
use crate::model::{Shape, TypeDef};
use gems_core::naming::to_snake_case;
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use std::collections::{BTreeMap, HashSet};

/// A form type and the storage type it converts to
#[derive(Debug, Clone, Copy)]
struct FormBinding<'a> {
    form: &'a TypeDef,
    storage: &'a TypeDef,
}

fn ident(name: &str) -> Ident {
    Ident::new(name, Span::call_site())
}

/// `<from>_to_<to>` in snake case
pub fn conversion_name(from: &str, to: &str) -> String {
    format!("{}_to_{}", to_snake_case(from), to_snake_case(to))
}

fn slice_name(from: &str, to: &str) -> String {
    format!("{}_slice", conversion_name(from, to))
}

/// Pass one: every mapped form whose storage type exists
fn bind_forms<'a>(forms: &'a [TypeDef], storage: &'a [TypeDef]) -> BTreeMap<&'a str, FormBinding<'a>> {
    let storage_by_name: BTreeMap<&str, &TypeDef> = storage.iter().map(|t| (t.name.as_str(), t)).collect();
    forms
        .iter()
        .filter_map(|form| {
            let object = parse_genform(&form.docs)?;
            match storage_by_name.get(object.as_str()) {
                Some(storage) => Some((form.name.as_str(), FormBinding { form, storage })),
                None => {
                    tracing::warn!(form = %form.name, object = %object, "form maps to an unknown storage type");
                    None
                }
            }
        })
        .collect()
}

/// Wrap a conversion call for a field of the given shape
fn convert_expr(shape: Shape, source: TokenStream, single: &Ident, slice: &Ident) -> TokenStream {
    match shape {
        Shape::Direct => quote!(#single(#source)),
        Shape::Boxed => quote!(Box::new(#single(*#source))),
        Shape::Optional => quote!(#source.map(#single)),
        Shape::OptionalBoxed => quote!(#source.map(|v| Box::new(#single(*v)))),
        Shape::List => quote!(#slice(#source)),
    }
}

/// Direction of one generated function
#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    ToStorage,
    ToForm,
}

struct Conversion<'a> {
    binding: FormBinding<'a>,
    bindings: &'a BTreeMap<&'a str, FormBinding<'a>>,
    orm: &'a syn::Path,
}

impl Conversion<'_> {
    fn type_path(&self, name: &str, storage: bool) -> TokenStream {
        let name = ident(name);
        if storage {
            let orm = self.orm;
            quote!(#orm::#name)
        } else {
            quote!(#name)
        }
    }

    /// Field initializers, sorted by field name
    fn fields(&self, direction: Direction) -> CodegenResult<(Vec<TokenStream>, bool)> {
        let FormBinding { form, storage } = self.binding;
        let mut fields: Vec<_> = form.fields.iter().collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));

        let mut inits = Vec::new();
        let mut mapped = HashSet::new();
        for field in fields {
            let Some(stored) = storage.field(&field.name) else {
                continue;
            };
            mapped.insert(field.name.as_str());
            let name = ident(&field.name);
            let source = quote!(src.#name);

            let (form_shape, base) = field.shape();
            let nested = base.as_deref().and_then(|b| self.bindings.get(b));
            let value = match nested {
                Some(nested) => {
                    let (storage_shape, _) = stored.shape();
                    if storage_shape != form_shape {
                        return Err(CodegenError::ShapeMismatch {
                            form: form.name.clone(),
                            field: field.name.clone(),
                            form_shape: form_shape.to_string(),
                            storage_shape: storage_shape.to_string(),
                        });
                    }
                    let (from, to) = match direction {
                        Direction::ToStorage => (&nested.form.name, &nested.storage.name),
                        Direction::ToForm => (&nested.storage.name, &nested.form.name),
                    };
                    convert_expr(
                        form_shape,
                        source,
                        &ident(&conversion_name(from, to)),
                        &ident(&slice_name(from, to)),
                    )
                }
                None if field.type_string() == stored.type_string() => source,
                None => quote!(#source.into()),
            };
            inits.push(quote!(#name: #value));
        }

        // the target has fields the source does not fill
        let target = match direction {
            Direction::ToStorage => storage,
            Direction::ToForm => form,
        };
        let partial = target.fields.iter().any(|f| !mapped.contains(f.name.as_str()));
        Ok((inits, partial))
    }

    fn function(&self, direction: Direction) -> CodegenResult<TokenStream> {
        let FormBinding { form, storage } = self.binding;
        let (from, to, from_ty, to_ty) = match direction {
            Direction::ToStorage => (
                &form.name,
                &storage.name,
                self.type_path(&form.name, false),
                self.type_path(&storage.name, true),
            ),
            Direction::ToForm => (
                &storage.name,
                &form.name,
                self.type_path(&storage.name, true),
                self.type_path(&form.name, false),
            ),
        };
        let single = ident(&conversion_name(from, to));
        let slice = ident(&slice_name(from, to));
        let (inits, partial) = self.fields(direction)?;
        let rest = if partial { quote!(..Default::default()) } else { quote!() };
        let param = if inits.is_empty() { ident("_src") } else { ident("src") };

        Ok(quote! {
            pub fn #single(#param: #from_ty) -> #to_ty {
                #to_ty {
                    #(#inits,)*
                    #rest
                }
            }

            pub fn #slice(items: Vec<#from_ty>) -> Vec<#to_ty> {
                items.into_iter().map(#single).collect()
            }

            impl From<#from_ty> for #to_ty {
                fn from(src: #from_ty) -> Self {
                    #single(src)
                }
            }
        })
    }

    fn list(&self) -> TokenStream {
        let FormBinding { form, storage } = self.binding;
        let list = ident(&format!("{}List", form.name));
        let object_list = self.type_path(&format!("{}List", storage.name), true);
        let to_form = ident(&slice_name(&storage.name, &form.name));
        let to_storage = ident(&slice_name(&form.name, &storage.name));
        let form_ty = ident(&form.name);

        quote! {
            #[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
            #[serde(default)]
            pub struct #list {
                pub items: Vec<#form_ty>,
                #[serde(flatten)]
                pub base: gems_orm::BaseList,
            }

            impl #list {
                pub fn from_object_list(list: #object_list) -> Self {
                    Self {
                        items: #to_form(list.items),
                        base: list.base,
                    }
                }

                pub fn into_object_list(self) -> #object_list {
                    #object_list {
                        items: #to_storage(self.items),
                        base: self.base,
                    }
                }
            }
        }
    }
}

/// Source of the form tree's generated file, before formatting. `orm_module`
/// is the path under which the storage types are reachable.
pub fn generate_forms(forms: &[TypeDef], storage: &[TypeDef], orm_module: &str) -> CodegenResult<TokenStream> {
    let orm: syn::Path =
        syn::parse_str(orm_module).map_err(|_| CodegenError::ModulePath(orm_module.to_string()))?;
    let bindings = bind_forms(forms, storage);

    let mut items = Vec::with_capacity(bindings.len());
    for binding in bindings.values() {
        let conversion = Conversion {
            binding: *binding,
            bindings: &bindings,
            orm: &orm,
        };
        items.push(conversion.function(Direction::ToStorage)?);
        items.push(conversion.function(Direction::ToForm)?);
        // list types exist only for generated storage objects
        if parse_gen(&binding.storage.name, &binding.storage.docs)?.is_some() {
            items.push(conversion.list());
        }
    }
    tracing::info!(forms = bindings.len(), "form conversions generated");

    Ok(quote! {
        use super::*;

        #(#items)*
    })
}
