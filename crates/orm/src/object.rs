//! Capability model
//!
//! Every stored type exposes a static [`TypeMeta`] describing its kind, table
//! and associations. The generator emits these records; the client reads
//! them instead of reflecting over values.

use crate::backends::DatabaseValue;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Direction of a preloadable association
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadKind {
    /// This row holds `fk_column` pointing at one target row
    BelongsTo,
    /// Target rows hold `fk_column` pointing at this row
    HasMany,
    /// Rows of `via_table` pair `fk_column` (this row) with `via_target_fk`
    ManyToMany {
        via_table: &'static str,
        via_target_fk: &'static str,
    },
}

/// Association that can be loaded alongside a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preload {
    /// Field of the owning type that receives the loaded value
    pub field: &'static str,
    pub target_table: &'static str,
    pub target_pk: &'static str,
    pub fk_column: &'static str,
    pub kind: PreloadKind,
}

/// Static metadata of an object type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMeta {
    pub kind: &'static str,
    pub table: &'static str,
    pub pk_field: &'static str,
    /// Association names a caller may request
    pub valid_preloads: &'static [&'static str],
    /// Stored columns; association and read-only fields are absent
    pub columns: &'static [&'static str],
    /// Columns matched by free-text search
    pub search_fields: &'static [&'static str],
    pub preloads: &'static [Preload],
}

impl TypeMeta {
    pub fn preload(&self, field: &str) -> Option<&'static Preload> {
        self.preloads.iter().find(|p| p.field == field)
    }

    pub fn is_valid_preload(&self, field: &str) -> bool {
        self.valid_preloads.contains(&field)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(&column)
    }
}

/// Object-safe access to a type's metadata
pub trait ObjectType {
    fn meta(&self) -> &'static TypeMeta;

    fn kind(&self) -> &'static str {
        self.meta().kind
    }

    fn table(&self) -> &'static str {
        self.meta().table
    }

    fn pk_field(&self) -> &'static str {
        self.meta().pk_field
    }
}

/// A stored entity
pub trait Object:
    ObjectType + Serialize + DeserializeOwned + Default + Send + Sync + 'static
{
    const META: &'static TypeMeta;

    fn pk_value(&self) -> DatabaseValue;

    /// Write back a store-assigned primary key
    fn set_pk_value(&mut self, value: DatabaseValue);

    fn valid_preloads(&self) -> &'static [&'static str] {
        Self::META.valid_preloads
    }
}

/// A page of entities of one kind
pub trait ObjectList: ObjectType + Send + Sync {
    type Item: Object;

    fn items(&self) -> &[Self::Item];

    fn items_mut(&mut self) -> &mut Vec<Self::Item>;

    /// `(page, size)` recorded by the last paged read
    fn page_size(&self) -> (i64, i64);

    fn set_page_size(&mut self, page: i64, size: i64);

    fn total(&self) -> i64;

    fn set_total(&mut self, total: i64);
}

/// Paging block embedded in every generated list type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseList {
    pub page: i64,
    pub size: i64,
    pub total: i64,
}

/// One side of a junction row: the referenced type and its key
#[derive(Debug, Clone, PartialEq)]
pub struct RelationEnd {
    pub meta: &'static TypeMeta,
    pub pk: DatabaseValue,
}

impl RelationEnd {
    /// Junction column referencing this side: `<kind>_<pk field>`
    pub fn column(&self) -> String {
        gems_core::naming::foreign_key(self.meta.kind, self.meta.pk_field)
    }
}

/// Junction entity of a many-to-many relation
pub trait RelationShip: ObjectType {
    fn left(&self) -> RelationEnd;
    fn right(&self) -> RelationEnd;
}

/// Type-erased object handed to hooks
pub trait AnyObject: ObjectType + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn pk(&self) -> DatabaseValue;
}

impl<T: Object> AnyObject for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn pk(&self) -> DatabaseValue {
        self.pk_value()
    }
}

impl<'a> dyn AnyObject + 'a {
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
