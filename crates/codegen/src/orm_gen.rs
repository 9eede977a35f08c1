//! Storage-tree output: per-type metadata, capability impls and list types

use crate::annotations::{is_readonly, parse_gen, GenOptions, ObjectKind};
use crate::error::{CodegenError, CodegenResult};
use crate::model::{Shape, TypeDef};
use gems_core::naming::{foreign_key, table_name, to_snake_case};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Direction of a resolved association
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssociationKind {
    BelongsTo,
    HasMany,
    /// Through the junction table; `fk_column` there points back at the owner
    ManyToMany { via_table: String, via_target_fk: String },
}

/// Association field resolved against the other storage types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    pub field: String,
    pub target: String,
    pub target_table: String,
    pub target_pk: String,
    pub fk_column: String,
    pub kind: AssociationKind,
}

/// Everything generated for one storage type
#[derive(Debug, Clone)]
pub struct ObjectDef {
    pub name: String,
    pub kind: String,
    pub table: String,
    pub options: GenOptions,
    pub pk_type: String,
    pub columns: Vec<String>,
    pub associations: Vec<Association>,
}

impl ObjectDef {
    pub fn meta_ident(&self) -> Ident {
        Ident::new(&format!("{}_META", self.kind.to_uppercase()), Span::call_site())
    }

    pub fn list_name(&self) -> String {
        format!("{}List", self.name)
    }

    fn association(&self, field: &str) -> Option<&Association> {
        self.associations.iter().find(|a| a.field == field)
    }
}

/// Resolve every annotated type of the storage tree
pub fn collect_objects(types: &[TypeDef]) -> CodegenResult<Vec<ObjectDef>> {
    let mut annotated = BTreeMap::new();
    for ty in types {
        if let Some(options) = parse_gen(&ty.name, &ty.docs)? {
            annotated.insert(ty.name.as_str(), (ty, options));
        }
    }

    let mut objects = Vec::with_capacity(annotated.len());
    for (ty, options) in annotated.values() {
        let pk = ty.field(&options.pk_field).ok_or_else(|| CodegenError::MissingPrimaryKey {
            type_name: ty.name.clone(),
            field: options.pk_field.clone(),
        })?;
        let kind = to_snake_case(&ty.name);

        let mut columns = Vec::new();
        let mut candidates = Vec::new();
        for field in &ty.fields {
            let (shape, base) = field.shape();
            match base.as_deref().and_then(|b| annotated.get(b)) {
                Some((target, target_options)) => candidates.push((field, shape, *target, target_options)),
                None if is_readonly(&field.docs) => debug!(type_name = %ty.name, field = %field.name, "read-only field"),
                None => columns.push(field.name.clone()),
            }
        }

        let mut associations = Vec::new();
        for (field, shape, target, target_options) in candidates {
            let association = match shape {
                Shape::List => {
                    let fk_column = foreign_key(&kind, &options.pk_field);
                    let resolved = match target.field(&fk_column) {
                        Some(_) => Some((fk_column, AssociationKind::HasMany)),
                        None => junction(
                            &annotated,
                            (ty.name.as_str(), options.pk_field.as_str()),
                            (target.name.as_str(), target_options.pk_field.as_str()),
                        ),
                    };
                    resolved.map(|(fk_column, kind)| Association {
                        field: field.name.clone(),
                        target: target.name.clone(),
                        target_table: table_name(&target.name),
                        target_pk: target_options.pk_field.clone(),
                        fk_column,
                        kind,
                    })
                }
                _ => {
                    let fk_column = foreign_key(&field.name, &target_options.pk_field);
                    columns.contains(&fk_column).then(|| Association {
                        field: field.name.clone(),
                        target: target.name.clone(),
                        target_table: table_name(&target.name),
                        target_pk: target_options.pk_field.clone(),
                        fk_column,
                        kind: AssociationKind::BelongsTo,
                    })
                }
            };
            match association {
                Some(a) => associations.push(a),
                None => debug!(type_name = %ty.name, field = %field.name, "association has no key column"),
            }
        }

        for preload in &options.preloads {
            if !associations.iter().any(|a| &a.field == preload) {
                warn!(type_name = %ty.name, preload = %preload, "preload has no loadable association");
            }
        }
        for field in &options.search {
            if !columns.contains(field) {
                warn!(type_name = %ty.name, field = %field, "search field is not a column");
            }
        }

        objects.push(ObjectDef {
            name: ty.name.clone(),
            kind,
            table: table_name(&ty.name),
            options: options.clone(),
            pk_type: pk.type_string(),
            columns,
            associations,
        });
    }
    Ok(objects)
}

/// Junction type pairing `owner` with `target` (type name, key field) through
/// its left and right ends. Yields the junction column pointing at the owner.
fn junction(
    annotated: &BTreeMap<&str, (&TypeDef, GenOptions)>,
    owner: (&str, &str),
    target: (&str, &str),
) -> Option<(String, AssociationKind)> {
    annotated.values().find_map(|(rel, options)| {
        if options.kind != ObjectKind::ObjectRel {
            return None;
        }
        let (left, right) = (options.left_field.as_deref()?, options.right_field.as_deref()?);
        let end_type = |end: &str| rel.field(end).and_then(|f| f.shape().1);
        let (left_type, right_type) = (end_type(left)?, end_type(right)?);
        let (owner_end, target_end) = if left_type == owner.0 && right_type == target.0 {
            (left, right)
        } else if left_type == target.0 && right_type == owner.0 {
            (right, left)
        } else {
            return None;
        };

        let fk_column = foreign_key(owner_end, owner.1);
        let via_target_fk = foreign_key(target_end, target.1);
        if rel.field(&fk_column).is_none() || rel.field(&via_target_fk).is_none() {
            return None;
        }
        debug!(owner = owner.0, target = target.0, via = %rel.name, "many-to-many association");
        Some((
            fk_column,
            AssociationKind::ManyToMany {
                via_table: table_name(&rel.name),
                via_target_fk,
            },
        ))
    })
}

fn ident(name: &str) -> Ident {
    Ident::new(name, Span::call_site())
}

const INTEGER_TYPES: &[&str] = &["i32", "i64", "u32", "u64"];

fn is_copy_scalar(ty: &str) -> bool {
    INTEGER_TYPES.contains(&ty) || matches!(ty, "bool" | "Uuid" | "uuid::Uuid")
}

/// `pk_value` / `set_pk_value` bodies for the primary key's type
fn pk_accessors(obj: &ObjectDef) -> CodegenResult<(TokenStream, TokenStream)> {
    let field = ident(&obj.options.pk_field);
    let ty: syn::Type = syn::parse_str(&obj.pk_type)?;
    let pk_type = obj.pk_type.as_str();

    if INTEGER_TYPES.contains(&pk_type) {
        Ok((
            quote! { gems_orm::DatabaseValue::from(self.#field) },
            quote! {
                if let Some(pk) = value.as_i64().and_then(|v| <#ty>::try_from(v).ok()) {
                    self.#field = pk;
                }
            },
        ))
    } else if pk_type == "String" {
        Ok((
            quote! { gems_orm::DatabaseValue::from(self.#field.clone()) },
            quote! {
                if let Some(pk) = value.as_str() {
                    self.#field = pk.to_string();
                }
            },
        ))
    } else if pk_type == "Uuid" || pk_type == "uuid::Uuid" {
        Ok((
            quote! { gems_orm::DatabaseValue::Uuid(self.#field) },
            quote! {
                match value {
                    gems_orm::DatabaseValue::Uuid(pk) => self.#field = pk,
                    gems_orm::DatabaseValue::String(s) => {
                        if let Ok(pk) = s.parse() {
                            self.#field = pk;
                        }
                    }
                    _ => {}
                }
            },
        ))
    } else {
        Err(CodegenError::UnsupportedPrimaryKey {
            type_name: obj.name.clone(),
            ty: obj.pk_type.clone(),
        })
    }
}

fn meta_tokens(obj: &ObjectDef) -> TokenStream {
    let meta = obj.meta_ident();
    let (kind, table, pk) = (&obj.kind, &obj.table, &obj.options.pk_field);
    let valid_preloads = &obj.options.preloads;
    let columns = &obj.columns;
    let search = &obj.options.search;
    let preloads = obj.associations.iter().map(|a| {
        let (field, target_table, target_pk, fk) = (&a.field, &a.target_table, &a.target_pk, &a.fk_column);
        let kind = match &a.kind {
            AssociationKind::BelongsTo => quote!(gems_orm::PreloadKind::BelongsTo),
            AssociationKind::HasMany => quote!(gems_orm::PreloadKind::HasMany),
            AssociationKind::ManyToMany { via_table, via_target_fk } => quote! {
                gems_orm::PreloadKind::ManyToMany {
                    via_table: #via_table,
                    via_target_fk: #via_target_fk,
                }
            },
        };
        quote! {
            gems_orm::Preload {
                field: #field,
                target_table: #target_table,
                target_pk: #target_pk,
                fk_column: #fk,
                kind: #kind,
            }
        }
    });
    let doc = format!(" Metadata of [`{}`]", obj.name);

    quote! {
        #[doc = #doc]
        pub const #meta: gems_orm::TypeMeta = gems_orm::TypeMeta {
            kind: #kind,
            table: #table,
            pk_field: #pk,
            valid_preloads: &[#(#valid_preloads),*],
            columns: &[#(#columns),*],
            search_fields: &[#(#search),*],
            preloads: &[#(#preloads),*],
        };
    }
}

fn relation_end(obj: &ObjectDef, field: &str, objects: &[ObjectDef]) -> CodegenResult<TokenStream> {
    let association = obj
        .association(field)
        .filter(|a| a.kind == AssociationKind::BelongsTo)
        .ok_or_else(|| CodegenError::RelationField {
            type_name: obj.name.clone(),
            field: field.to_string(),
        })?;
    let target = ident(&association.target);
    let fk = ident(&association.fk_column);
    // key column type decides whether the value is copied or cloned
    let copied = objects
        .iter()
        .find(|o| o.name == association.target)
        .map_or(true, |t| is_copy_scalar(&t.pk_type));
    let value = if copied {
        quote!(self.#fk)
    } else {
        quote!(self.#fk.clone())
    };
    Ok(quote! {
        gems_orm::RelationEnd {
            meta: <#target as gems_orm::Object>::META,
            pk: gems_orm::DatabaseValue::from(#value),
        }
    })
}

fn object_tokens(obj: &ObjectDef, objects: &[ObjectDef]) -> CodegenResult<TokenStream> {
    let name = ident(&obj.name);
    let list = ident(&obj.list_name());
    let meta = obj.meta_ident();
    let meta_const = meta_tokens(obj);
    let (pk_value, set_pk_value) = pk_accessors(obj)?;

    let relationship = match (&obj.options.kind, &obj.options.left_field, &obj.options.right_field) {
        (ObjectKind::ObjectRel, Some(left), Some(right)) => {
            let left = relation_end(obj, left, objects)?;
            let right = relation_end(obj, right, objects)?;
            quote! {
                impl gems_orm::RelationShip for #name {
                    fn left(&self) -> gems_orm::RelationEnd {
                        #left
                    }

                    fn right(&self) -> gems_orm::RelationEnd {
                        #right
                    }
                }
            }
        }
        _ => TokenStream::new(),
    };

    Ok(quote! {
        #meta_const

        impl gems_orm::ObjectType for #name {
            fn meta(&self) -> &'static gems_orm::TypeMeta {
                &#meta
            }
        }

        impl gems_orm::Object for #name {
            const META: &'static gems_orm::TypeMeta = &#meta;

            fn pk_value(&self) -> gems_orm::DatabaseValue {
                #pk_value
            }

            fn set_pk_value(&mut self, value: gems_orm::DatabaseValue) {
                #set_pk_value
            }
        }

        #relationship

        #[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        pub struct #list {
            pub items: Vec<#name>,
            #[serde(flatten)]
            pub base: gems_orm::BaseList,
        }

        impl gems_orm::ObjectType for #list {
            fn meta(&self) -> &'static gems_orm::TypeMeta {
                &#meta
            }
        }

        impl gems_orm::ObjectList for #list {
            type Item = #name;

            fn items(&self) -> &[#name] {
                &self.items
            }

            fn items_mut(&mut self) -> &mut Vec<#name> {
                &mut self.items
            }

            fn page_size(&self) -> (i64, i64) {
                (self.base.page, self.base.size)
            }

            fn set_page_size(&mut self, page: i64, size: i64) {
                self.base.page = page;
                self.base.size = size;
            }

            fn total(&self) -> i64 {
                self.base.total
            }

            fn set_total(&mut self, total: i64) {
                self.base.total = total;
            }
        }
    })
}

/// Source of the storage tree's generated file, before formatting
pub fn generate_orm(types: &[TypeDef]) -> CodegenResult<TokenStream> {
    let objects = collect_objects(types)?;
    let items = objects
        .iter()
        .map(|obj| object_tokens(obj, &objects))
        .collect::<CodegenResult<Vec<_>>>()?;
    tracing::info!(objects = objects.len(), "storage metadata generated");

    Ok(quote! {
        use super::*;

        #(#items)*
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_source;
    use std::path::Path;

    const STORAGE: &str = r#"
        /// +gen type:object pkfield:id preloads:projects,users search:tenant_name
        pub struct Tenant {
            pub id: i64,
            pub tenant_name: String,
            pub projects: Vec<Project>,
            pub users: Vec<User>,
        }

        /// +gen type:object preloads:tenant
        pub struct Project {
            pub id: i64,
            pub project_name: String,
            pub tenant_id: i64,
            pub tenant: Option<Box<Tenant>>,
        }

        /// +gen type:object pkfield:name
        pub struct User {
            pub name: String,
            /// +gen readonly
            pub role: String,
        }

        /// +gen type:objectrel leftfield:tenant rightfield:user
        pub struct TenantUserRel {
            pub id: i64,
            pub tenant_id: i64,
            pub tenant: Option<Tenant>,
            pub user_name: String,
            pub user: Option<Box<User>>,
            pub role: String,
        }
    "#;

    fn objects() -> Vec<ObjectDef> {
        collect_objects(&parse_source(STORAGE, Path::new("m.rs")).unwrap()).unwrap()
    }

    #[test]
    fn test_columns_exclude_associations_and_readonly() {
        let objects = objects();
        let tenant = objects.iter().find(|o| o.name == "Tenant").unwrap();
        assert_eq!(tenant.kind, "tenant");
        assert_eq!(tenant.table, "tenants");
        assert_eq!(tenant.columns, vec!["id", "tenant_name"]);

        let user = objects.iter().find(|o| o.name == "User").unwrap();
        assert_eq!(user.columns, vec!["name"]);
        assert_eq!(user.pk_type, "String");
    }

    #[test]
    fn test_associations_resolve_key_columns() {
        let objects = objects();
        let tenant = objects.iter().find(|o| o.name == "Tenant").unwrap();
        assert_eq!(tenant.associations.len(), 2);
        assert_eq!(tenant.associations[0].fk_column, "tenant_id");
        assert_eq!(tenant.associations[0].kind, AssociationKind::HasMany);

        // users carry no tenant_id, so the junction type links them
        let users = tenant.association("users").unwrap();
        assert_eq!(users.target_table, "users");
        assert_eq!(users.target_pk, "name");
        assert_eq!(users.fk_column, "tenant_id");
        assert_eq!(
            users.kind,
            AssociationKind::ManyToMany {
                via_table: "tenant_user_rels".to_string(),
                via_target_fk: "user_name".to_string(),
            }
        );

        let rel = objects.iter().find(|o| o.name == "TenantUserRel").unwrap();
        assert_eq!(rel.table, "tenant_user_rels");
        let user = rel.association("user").unwrap();
        assert_eq!(user.fk_column, "user_name");
        assert_eq!(user.target_pk, "name");
        assert_eq!(user.kind, AssociationKind::BelongsTo);
    }

    #[test]
    fn test_generated_code_parses_and_names_everything() {
        let tokens = generate_orm(&parse_source(STORAGE, Path::new("m.rs")).unwrap()).unwrap();
        let file: syn::File = syn::parse2(tokens).unwrap();
        let code = prettyplease::unparse(&file);
        assert!(code.contains("pub const TENANT_USER_REL_META: gems_orm::TypeMeta"));
        assert!(code.contains("pub struct ProjectList"));
        assert!(code.contains("impl gems_orm::RelationShip for TenantUserRel"));
        assert!(code.contains("self.user_name.clone()"));
        assert!(!code.contains("impl gems_orm::RelationShip for Tenant "));
        assert!(code.contains("kind: gems_orm::PreloadKind::ManyToMany {"));
        assert!(code.contains("via_table: \"tenant_user_rels\","));
    }

    #[test]
    fn test_list_without_key_or_junction_is_skipped() {
        let types = parse_source(
            r#"
            /// +gen type:object
            pub struct Team { pub id: i64, pub members: Vec<Member> }
            /// +gen type:object
            pub struct Member { pub id: i64 }
            "#,
            Path::new("m.rs"),
        )
        .unwrap();
        let objects = collect_objects(&types).unwrap();
        let team = objects.iter().find(|o| o.name == "Team").unwrap();
        assert!(team.associations.is_empty());
        assert_eq!(team.columns, vec!["id"]);
    }

    #[test]
    fn test_missing_primary_key_is_an_error() {
        let types = parse_source(
            "/// +gen type:object pkfield:uid\npub struct Broken { pub id: i64 }",
            Path::new("m.rs"),
        )
        .unwrap();
        let err = collect_objects(&types).unwrap_err();
        assert!(matches!(err, CodegenError::MissingPrimaryKey { .. }));
    }

    #[test]
    fn test_bad_relation_field_is_an_error() {
        let types = parse_source(
            "/// +gen type:objectrel leftfield:nothing rightfield:nothing\npub struct Rel { pub id: i64 }",
            Path::new("m.rs"),
        )
        .unwrap();
        let err = generate_orm(&types).unwrap_err();
        assert!(matches!(err, CodegenError::RelationField { .. }));
    }
}
