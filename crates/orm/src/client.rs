//! Generic client
//!
//! One client serves every object type. Table, key and association details
//! come from each type's [`TypeMeta`]; relations and hooks are registered on
//! a [`ClientBuilder`] and frozen when the client is built.

use crate::backends::{DatabasePool, DatabaseRow, DatabaseTransaction, DatabaseValue, SqlDialect};
use crate::context::Context;
use crate::error::{ModelError, ModelResult};
use crate::hooks::{typed, Hook, HookPhase, HookRegistry, TypedHook};
use crate::object::{Object, ObjectList, PreloadKind, RelationShip, TypeMeta};
use crate::query::sql::{delete_sql, insert_sql, update_sql};
use crate::query::{
    Cond, Filter, JoinClause, JoinType, OrderDirection, Query, QueryOperator, QueryOption, SelectBuilder,
};
use crate::relation::{Relation, RelationKind, RelationRegistry};
use crate::transaction;
use gems_core::naming::foreign_key;
use serde_json::{Map, Value as JsonValue};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Rows per statement in [`Client::create_in_batches`]
pub const BATCH_SIZE: usize = 1000;

type RowMap = Map<String, JsonValue>;

/// Statement target: the pool, or an open transaction
enum Exec<'a> {
    Pool(&'a dyn DatabasePool),
    Tx(&'a mut dyn DatabaseTransaction),
}

impl Exec<'_> {
    async fn execute(&mut self, sql: &str, params: &[DatabaseValue]) -> ModelResult<u64> {
        debug!(sql = %sql, params = params.len(), "execute");
        match self {
            Exec::Pool(pool) => pool.execute(sql, params).await,
            Exec::Tx(tx) => tx.execute(sql, params).await,
        }
    }

    async fn fetch_all(&mut self, sql: &str, params: &[DatabaseValue]) -> ModelResult<Vec<Box<dyn DatabaseRow>>> {
        debug!(sql = %sql, params = params.len(), "fetch");
        match self {
            Exec::Pool(pool) => pool.fetch_all(sql, params).await,
            Exec::Tx(tx) => tx.fetch_all(sql, params).await,
        }
    }

    async fn fetch_optional(&mut self, sql: &str, params: &[DatabaseValue]) -> ModelResult<Option<Box<dyn DatabaseRow>>> {
        debug!(sql = %sql, params = params.len(), "fetch one");
        match self {
            Exec::Pool(pool) => pool.fetch_optional(sql, params).await,
            Exec::Tx(tx) => tx.fetch_optional(sql, params).await,
        }
    }

    async fn count(&mut self, select: &SelectBuilder, dialect: SqlDialect) -> ModelResult<i64> {
        let (sql, params) = select.build_count(dialect)?;
        let row = self
            .fetch_optional(&sql, &params)
            .await?
            .ok_or_else(|| ModelError::Query("COUNT returned no row".to_string()))?;
        row.get_by_index(0)?
            .as_i64()
            .ok_or_else(|| ModelError::Query("COUNT returned a non-integer".to_string()))
    }
}

/// Collects relations and hooks before the client is frozen
pub struct ClientBuilder {
    pool: Arc<dyn DatabasePool>,
    relations: RelationRegistry,
    hooks: HookRegistry,
}

impl ClientBuilder {
    pub fn new(pool: Arc<dyn DatabasePool>) -> Self {
        Self {
            pool,
            relations: RelationRegistry::new(),
            hooks: HookRegistry::new(),
        }
    }

    pub fn relation(
        mut self,
        source: &'static TypeMeta,
        target: &'static TypeMeta,
        via: Option<&'static TypeMeta>,
        kind: RelationKind,
    ) -> Self {
        self.relations.register(source, target, via, kind);
        self
    }

    pub fn hook(mut self, kind: &str, phase: HookPhase, hook: Arc<dyn Hook>) -> Self {
        self.hooks.register(kind, phase, hook);
        self
    }

    pub fn typed_hook<T, H>(self, phase: HookPhase, hook: H) -> Self
    where
        T: Object,
        H: TypedHook<T> + 'static,
    {
        self.hook(T::META.kind, phase, typed::<T, H>(hook))
    }

    pub fn build(self) -> Client {
        info!(
            relations = self.relations.len(),
            hooks = self.hooks.hook_count(),
            "model client ready"
        );
        Client {
            pool: self.pool,
            relations: self.relations,
            hooks: self.hooks,
        }
    }
}

/// Typed access to every registered object kind
pub struct Client {
    pub(crate) pool: Arc<dyn DatabasePool>,
    relations: RelationRegistry,
    hooks: HookRegistry,
}

impl Client {
    pub fn builder(pool: Arc<dyn DatabasePool>) -> ClientBuilder {
        ClientBuilder::new(pool)
    }

    pub fn pool(&self) -> &Arc<dyn DatabasePool> {
        &self.pool
    }

    pub fn relation(&self, a: &str, b: &str) -> Option<&Relation> {
        self.relations.resolve(a, b)
    }

    pub(crate) fn dialect(&self) -> SqlDialect {
        self.pool.dialect()
    }

    /// Whether a row matches the object's non-zero columns and `opts`.
    /// Errors are logged and reported as `false`.
    pub async fn exist<T: Object>(&self, ctx: &Context, obj: &T, opts: &[QueryOption]) -> bool {
        match self.try_exist(ctx, obj, opts).await {
            Ok(found) => found,
            Err(err) => {
                warn!(kind = T::META.kind, error = %err, "existence check failed");
                false
            }
        }
    }

    pub async fn try_exist<T: Object>(&self, ctx: &Context, obj: &T, opts: &[QueryOption]) -> ModelResult<bool> {
        ctx.run(async {
            let meta = T::META;
            let query = Query::from_options(opts);
            let mut select = SelectBuilder::new(meta.table)?;
            for (column, value) in column_values(obj)? {
                if !value.is_zero() {
                    select.filter.push_eq(meta.table, column, value)?;
                }
            }
            push_conditions(&mut select, meta, &query)?;
            let total = Exec::Pool(&*self.pool).count(&select, self.dialect()).await?;
            Ok(total > 0)
        })
        .await
    }

    /// Load one object by primary key (when set) and `opts`, overwriting `obj`
    pub async fn get<T: Object>(&self, ctx: &Context, obj: &mut T, opts: &[QueryOption]) -> ModelResult<()> {
        ctx.run(async {
            let meta = T::META;
            let query = Query::from_options(opts);
            let mut select = SelectBuilder::new(meta.table)?;
            let pk = obj.pk_value();
            if !pk.is_zero() {
                select.filter.push_eq(meta.table, meta.pk_field, pk)?;
            }
            push_conditions(&mut select, meta, &query)?;
            for order in &query.orders {
                select.order_by(&order.field, order.direction)?;
            }
            if !select.has_order() {
                select.order_by(meta.pk_field, OrderDirection::Asc)?;
            }
            select.limit(1);

            let (sql, params) = select.build(self.dialect())?;
            let mut exec = Exec::Pool(&*self.pool);
            let row = exec
                .fetch_optional(&sql, &params)
                .await?
                .ok_or_else(|| ModelError::NotFound(meta.table.to_string()))?;
            let mut rows = vec![row_map(row.as_ref())?];
            load_preloads(&mut exec, self.dialect(), meta, &mut rows, &query.preloads).await?;
            *obj = decode(rows.remove(0))?;
            Ok(())
        })
        .await
    }

    /// Fill `list` with matching objects. A paged query records page and
    /// size on the list and sets its total from a count over the same filter.
    pub async fn list<L: ObjectList>(&self, ctx: &Context, list: &mut L, opts: &[QueryOption]) -> ModelResult<()> {
        ctx.run(async {
            let meta = L::Item::META;
            let query = Query::from_options(opts);
            let mut select = SelectBuilder::new(meta.table)?;
            self.push_scopes(&mut select, meta, &query)?;
            self.fetch_into(select, meta, &query, list).await
        })
        .await
    }

    /// Number of rows of `meta`'s table matching the conditions in `opts`
    pub async fn count(&self, ctx: &Context, meta: &'static TypeMeta, opts: &[QueryOption]) -> ModelResult<i64> {
        ctx.run(async {
            let query = Query::from_options(opts);
            let mut select = SelectBuilder::new(meta.table)?;
            for cond in &query.conditions {
                select.filter.push_cond(meta.table, cond)?;
            }
            Exec::Pool(&*self.pool).count(&select, self.dialect()).await
        })
        .await
    }

    /// Insert `obj`, omitting association fields and a zero primary key. The
    /// store-assigned key is written back. Registered create hooks run with
    /// the insert in one transaction.
    pub async fn create<T: Object>(&self, ctx: &Context, obj: &mut T, _opts: &[QueryOption]) -> ModelResult<()> {
        ctx.run(async {
            let kind = T::META.kind;
            if !self.has_hooks(kind, HookPhase::BeforeCreate, HookPhase::AfterCreate) {
                return insert_one(&mut Exec::Pool(&*self.pool), self.dialect(), obj).await;
            }
            let mut tx = transaction::begin(&*self.pool).await?;
            let result = self.create_in_tx(tx.as_mut(), obj).await;
            transaction::finish(tx, result).await
        })
        .await
    }

    async fn create_in_tx<T: Object>(&self, tx: &mut dyn DatabaseTransaction, obj: &mut T) -> ModelResult<()> {
        self.hooks.invoke(&mut *tx, &*obj, HookPhase::BeforeCreate).await?;
        let dialect = tx.dialect();
        insert_one(&mut Exec::Tx(&mut *tx), dialect, obj).await?;
        self.hooks.invoke(&mut *tx, &*obj, HookPhase::AfterCreate).await
    }

    /// Insert every item of `list` in multi-row statements of up to
    /// [`BATCH_SIZE`] rows, all in one transaction. No hooks run.
    pub async fn create_in_batches<L: ObjectList>(&self, ctx: &Context, list: &mut L, _opts: &[QueryOption]) -> ModelResult<()> {
        ctx.run(async {
            if list.items().is_empty() {
                return Ok(());
            }
            let mut tx = transaction::begin(&*self.pool).await?;
            let result = insert_batches(tx.as_mut(), list.items_mut()).await;
            transaction::finish(tx, result).await
        })
        .await
    }

    /// Write the object's non-zero columns to rows matched by its primary key
    /// and `opts`. Refuses to run without any filter. Update hooks run once
    /// per matched row and see `obj` carrying that row's key.
    pub async fn update<T: Object>(&self, ctx: &Context, obj: &T, opts: &[QueryOption]) -> ModelResult<()> {
        ctx.run(async {
            let kind = T::META.kind;
            if !self.has_hooks(kind, HookPhase::BeforeUpdate, HookPhase::AfterUpdate) {
                return update_one(&mut Exec::Pool(&*self.pool), self.dialect(), obj, opts).await;
            }
            let mut tx = transaction::begin(&*self.pool).await?;
            let result = self.update_in_tx(tx.as_mut(), obj, opts).await;
            transaction::finish(tx, result).await
        })
        .await
    }

    async fn update_in_tx<T: Object>(
        &self,
        tx: &mut dyn DatabaseTransaction,
        obj: &T,
        opts: &[QueryOption],
    ) -> ModelResult<()> {
        let dialect = tx.dialect();
        let targets = update_targets(&mut Exec::Tx(&mut *tx), dialect, obj, opts).await?;
        for target in &targets {
            self.hooks.invoke(&mut *tx, target, HookPhase::BeforeUpdate).await?;
        }
        update_one(&mut Exec::Tx(&mut *tx), dialect, obj, opts).await?;
        for target in &targets {
            self.hooks.invoke(&mut *tx, target, HookPhase::AfterUpdate).await?;
        }
        Ok(())
    }

    /// Delete rows matched by the object's primary key and `opts`. Delete
    /// hooks and the statement share one transaction; any failure rolls back
    /// all of it.
    pub async fn delete<T: Object>(&self, ctx: &Context, obj: &T, opts: &[QueryOption]) -> ModelResult<()> {
        ctx.run(async {
            let mut tx = transaction::begin(&*self.pool).await?;
            let result = self.delete_in_tx(tx.as_mut(), obj, opts).await;
            transaction::finish(tx, result).await
        })
        .await
    }

    async fn delete_in_tx<T: Object>(
        &self,
        tx: &mut dyn DatabaseTransaction,
        obj: &T,
        opts: &[QueryOption],
    ) -> ModelResult<()> {
        let meta = T::META;
        self.hooks.invoke(&mut *tx, obj, HookPhase::BeforeDelete).await?;

        let query = Query::from_options(opts);
        let filter = key_filter(meta, obj.pk_value(), &query)?;
        if filter.is_empty() {
            return Err(ModelError::Validation(format!(
                "refusing to delete from '{}' without a primary key or condition",
                meta.table
            )));
        }
        let (sql, params) = delete_sql(tx.dialect(), meta.table, &filter)?;
        let affected = Exec::Tx(&mut *tx).execute(&sql, &params).await?;
        debug!(kind = meta.kind, affected, "rows deleted");

        self.hooks.invoke(&mut *tx, obj, HookPhase::AfterDelete).await
    }

    /// List the children of `parent` through the registered relation
    pub async fn list_sub_resource<P: Object, L: ObjectList>(
        &self,
        ctx: &Context,
        parent: &P,
        list: &mut L,
        opts: &[QueryOption],
    ) -> ModelResult<()> {
        ctx.run(async {
            let meta = L::Item::META;
            let query = Query::from_options(opts);
            let select = self.sub_resource_select(parent, meta, &query)?;
            self.fetch_into(select, meta, &query, list).await
        })
        .await
    }

    /// Number of children of `parent` of `child` kind matching `opts`
    pub async fn count_sub_resource<P: Object>(
        &self,
        ctx: &Context,
        parent: &P,
        child: &'static TypeMeta,
        opts: &[QueryOption],
    ) -> ModelResult<i64> {
        ctx.run(async {
            let query = Query::from_options(opts);
            let select = self.sub_resource_select(parent, child, &query)?;
            Exec::Pool(&*self.pool).count(&select, self.dialect()).await
        })
        .await
    }

    /// Remove the junction row linking the two sides of `rel`
    pub async fn del_m2m_relation(&self, ctx: &Context, rel: &dyn RelationShip) -> ModelResult<u64> {
        ctx.run(async {
            let filter = junction_filter(rel)?;
            let (sql, params) = delete_sql(self.dialect(), rel.table(), &filter)?;
            Exec::Pool(&*self.pool).execute(&sql, &params).await
        })
        .await
    }

    /// Whether the junction row of `rel` exists. Errors are logged and
    /// reported as `false`.
    pub async fn exist_m2m_relation(&self, ctx: &Context, rel: &dyn RelationShip) -> bool {
        match self.try_exist_m2m_relation(ctx, rel).await {
            Ok(found) => found,
            Err(err) => {
                warn!(kind = rel.kind(), error = %err, "relation existence check failed");
                false
            }
        }
    }

    pub async fn try_exist_m2m_relation(&self, ctx: &Context, rel: &dyn RelationShip) -> ModelResult<bool> {
        ctx.run(async {
            let mut select = SelectBuilder::new(rel.table())?;
            select.filter = junction_filter(rel)?;
            let total = Exec::Pool(&*self.pool).count(&select, self.dialect()).await?;
            Ok(total > 0)
        })
        .await
    }

    fn has_hooks(&self, kind: &str, before: HookPhase, after: HookPhase) -> bool {
        self.hooks.has_hooks(kind, before) || self.hooks.has_hooks(kind, after)
    }

    /// Belong-to, relation, condition and search filters of a list query
    fn push_scopes(&self, select: &mut SelectBuilder, meta: &'static TypeMeta, query: &Query) -> ModelResult<()> {
        for belong in &query.belongs {
            select.filter.push_eq(meta.table, &belong.column, belong.value.clone())?;
        }

        for (i, rel) in query.relations.iter().enumerate() {
            let relation = self
                .relations
                .resolve(meta.kind, rel.target.kind)
                .ok_or_else(|| ModelError::RelationNotRegistered(meta.kind.to_string(), rel.target.kind.to_string()))?;
            let via = junction_of(relation)?;
            let alias = format!("rel{}", i);
            select.join(JoinClause {
                join_type: JoinType::Left,
                table: via.table.to_string(),
                alias: Some(alias.clone()),
                on_conditions: vec![(
                    format!("{}.{}", alias, foreign_key(meta.kind, meta.pk_field)),
                    format!("{}.{}", meta.table, meta.pk_field),
                )],
            })?;
            if let Some(key) = &rel.key {
                select
                    .filter
                    .push_eq(meta.table, &format!("{}.{}", alias, key), rel.value.clone())?;
            }
            if !rel.target_pk.is_zero() {
                select.filter.push_eq(
                    meta.table,
                    &format!("{}.{}", alias, foreign_key(rel.target.kind, rel.target.pk_field)),
                    rel.target_pk.clone(),
                )?;
            }
        }

        push_conditions(select, meta, query)
    }

    fn sub_resource_select<P: Object>(
        &self,
        parent: &P,
        child: &'static TypeMeta,
        query: &Query,
    ) -> ModelResult<SelectBuilder> {
        let parent_meta = P::META;
        let relation = self
            .relations
            .resolve(parent_meta.kind, child.kind)
            .ok_or_else(|| ModelError::RelationNotRegistered(parent_meta.kind.to_string(), child.kind.to_string()))?;
        let parent_column = foreign_key(parent_meta.kind, parent_meta.pk_field);

        let mut select = SelectBuilder::new(child.table)?;
        match relation.kind {
            RelationKind::ManyToMany => {
                let via = junction_of(relation)?;
                select.join(JoinClause {
                    join_type: JoinType::Left,
                    table: via.table.to_string(),
                    alias: None,
                    on_conditions: vec![(
                        format!("{}.{}", via.table, foreign_key(child.kind, child.pk_field)),
                        format!("{}.{}", child.table, child.pk_field),
                    )],
                })?;
                select.filter.push_eq(
                    child.table,
                    &format!("{}.{}", via.table, parent_column),
                    parent.pk_value(),
                )?;
                if let Some(field) = query.relation_fields.iter().find(|f| child.has_column(f)) {
                    return Err(ModelError::Validation(format!(
                        "relation field '{}' shadows a column of '{}'",
                        field, child.table
                    )));
                }
                if !query.relation_fields.is_empty() {
                    select.all_columns_of(child.table)?;
                    for field in &query.relation_fields {
                        select.column(&format!("{}.{}", via.table, field))?;
                    }
                }
            }
            RelationKind::Ownership => {
                select.filter.push_eq(child.table, &parent_column, parent.pk_value())?;
            }
        }

        push_conditions(&mut select, child, query)?;
        Ok(select)
    }

    /// Shared tail of `list` and `list_sub_resource`: count when paged, then
    /// order, page, fetch, preload and decode
    async fn fetch_into<L: ObjectList>(
        &self,
        mut select: SelectBuilder,
        meta: &'static TypeMeta,
        query: &Query,
        list: &mut L,
    ) -> ModelResult<()> {
        let dialect = self.dialect();
        let mut exec = Exec::Pool(&*self.pool);

        if query.is_paged() {
            list.set_page_size(query.page, query.size);
            let total = exec.count(&select, dialect).await?;
            list.set_total(total);
            select.limit(query.size);
            select.offset(query.offset());
        }
        for order in &query.orders {
            select.order_by(&order.field, order.direction)?;
        }

        let (sql, params) = select.build(dialect)?;
        let rows = exec.fetch_all(&sql, &params).await?;
        let mut maps = rows
            .iter()
            .map(|row| row_map(row.as_ref()))
            .collect::<ModelResult<Vec<_>>>()?;
        load_preloads(&mut exec, dialect, meta, &mut maps, &query.preloads).await?;

        let items = maps.into_iter().map(decode).collect::<ModelResult<Vec<L::Item>>>()?;
        *list.items_mut() = items;
        Ok(())
    }
}

/// Alias of the junction's owner key in many-to-many preload rows
const JUNCTION_KEY: &str = "junction_owner_key";

/// Attach requested associations. Names outside the type's valid
/// preloads are ignored.
async fn load_preloads(
    exec: &mut Exec<'_>,
    dialect: SqlDialect,
    meta: &'static TypeMeta,
    rows: &mut [RowMap],
    requested: &[String],
) -> ModelResult<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let mut seen = HashSet::new();

    for name in requested {
        if !seen.insert(name.as_str()) {
            continue;
        }
        let Some(preload) = meta.preload(name).filter(|_| meta.is_valid_preload(name)) else {
            debug!(kind = meta.kind, preload = %name, "ignoring unknown preload");
            continue;
        };

        // key columns on this side and on the fetched rows
        let (local_key, remote_key) = match preload.kind {
            PreloadKind::BelongsTo => (preload.fk_column, preload.target_pk),
            PreloadKind::HasMany => (meta.pk_field, preload.fk_column),
            PreloadKind::ManyToMany { .. } => (meta.pk_field, JUNCTION_KEY),
        };

        let mut keys = Vec::new();
        let mut key_set = HashSet::new();
        for row in rows.iter() {
            if let Some(value) = row.get(local_key).filter(|v| !v.is_null()) {
                if key_set.insert(key_text(value)) {
                    keys.push(DatabaseValue::from_json(value.clone()));
                }
            }
        }

        let mut grouped: HashMap<String, Vec<JsonValue>> = HashMap::new();
        if !keys.is_empty() {
            let mut select = SelectBuilder::new(preload.target_table)?;
            let (filter_table, filter_column) = match preload.kind {
                PreloadKind::ManyToMany { via_table, via_target_fk } => {
                    select.join(JoinClause {
                        join_type: JoinType::Inner,
                        table: via_table.to_string(),
                        alias: None,
                        on_conditions: vec![(
                            format!("{}.{}", via_table, via_target_fk),
                            format!("{}.{}", preload.target_table, preload.target_pk),
                        )],
                    })?;
                    select.all_columns_of(preload.target_table)?;
                    select.column_as(&format!("{}.{}", via_table, preload.fk_column), JUNCTION_KEY)?;
                    (via_table, preload.fk_column)
                }
                _ => (preload.target_table, remote_key),
            };
            select.filter.push_cond(
                filter_table,
                &Cond {
                    field: filter_column.to_string(),
                    op: QueryOperator::In,
                    value: DatabaseValue::Array(keys),
                },
            )?;
            select.order_by(preload.target_pk, OrderDirection::Asc)?;
            let (sql, params) = select.build(dialect)?;
            for row in exec.fetch_all(&sql, &params).await? {
                let mut map = row_map(row.as_ref())?;
                let key = match preload.kind {
                    PreloadKind::ManyToMany { .. } => map.remove(JUNCTION_KEY),
                    _ => map.get(remote_key).cloned(),
                };
                if let Some(key) = key.as_ref().map(key_text) {
                    grouped.entry(key).or_default().push(JsonValue::Object(map));
                }
            }
        }

        for row in rows.iter_mut() {
            let found = row.get(local_key).and_then(|k| grouped.get(&key_text(k)));
            let value = match preload.kind {
                PreloadKind::BelongsTo => found
                    .and_then(|targets| targets.first().cloned())
                    .unwrap_or(JsonValue::Null),
                PreloadKind::HasMany | PreloadKind::ManyToMany { .. } => {
                    JsonValue::Array(found.cloned().unwrap_or_default())
                }
            };
            row.insert(preload.field.to_string(), value);
        }
    }
    Ok(())
}

/// Read objects of `T` inside an open transaction. Conditions, search,
/// orders and preloads of `opts` apply; paging and relation scopes do not.
/// Hooks read through here instead of the pool.
pub async fn find_in_tx<T: Object>(tx: &mut dyn DatabaseTransaction, opts: &[QueryOption]) -> ModelResult<Vec<T>> {
    let meta = T::META;
    let query = Query::from_options(opts);
    let dialect = tx.dialect();
    let mut select = SelectBuilder::new(meta.table)?;
    push_conditions(&mut select, meta, &query)?;
    for order in &query.orders {
        select.order_by(&order.field, order.direction)?;
    }
    if !select.has_order() {
        select.order_by(meta.pk_field, OrderDirection::Asc)?;
    }

    let (sql, params) = select.build(dialect)?;
    let mut exec = Exec::Tx(tx);
    let rows = exec.fetch_all(&sql, &params).await?;
    let mut maps = rows
        .iter()
        .map(|row| row_map(row.as_ref()))
        .collect::<ModelResult<Vec<_>>>()?;
    load_preloads(&mut exec, dialect, meta, &mut maps, &query.preloads).await?;
    maps.into_iter().map(decode).collect()
}

/// Stored columns of `obj` with their values, in metadata order
fn column_values<T: Object>(obj: &T) -> ModelResult<Vec<(&'static str, DatabaseValue)>> {
    let JsonValue::Object(mut map) = serde_json::to_value(obj)? else {
        return Err(ModelError::Serialization(format!(
            "'{}' does not serialize to an object",
            T::META.kind
        )));
    };
    Ok(T::META
        .columns
        .iter()
        .map(|column| {
            let value = map.remove(*column).unwrap_or(JsonValue::Null);
            (*column, DatabaseValue::from_column_json(value))
        })
        .collect())
}

fn row_map(row: &dyn DatabaseRow) -> ModelResult<RowMap> {
    match row.to_json()? {
        JsonValue::Object(map) => Ok(map),
        _ => Err(ModelError::Serialization("row did not decode to an object".to_string())),
    }
}

fn decode<T: Object>(map: RowMap) -> ModelResult<T> {
    serde_json::from_value(JsonValue::Object(map)).map_err(|e| {
        ModelError::Serialization(format!("failed to decode '{}': {}", T::META.kind, e))
    })
}

/// Comparable text of a key value; numbers and strings compare by content
fn key_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn junction_of(relation: &Relation) -> ModelResult<&'static TypeMeta> {
    relation.via.ok_or_else(|| {
        ModelError::Query(format!(
            "relation between '{}' and '{}' has no junction type",
            relation.source.kind, relation.target.kind
        ))
    })
}

fn push_conditions(select: &mut SelectBuilder, meta: &TypeMeta, query: &Query) -> ModelResult<()> {
    for cond in &query.conditions {
        select.filter.push_cond(meta.table, cond)?;
    }
    select.filter.push_search(meta.table, meta.search_fields, &query.search)
}

/// Primary key (when set) plus option conditions
fn key_filter(meta: &TypeMeta, pk: DatabaseValue, query: &Query) -> ModelResult<Filter> {
    let mut filter = Filter::new();
    if !pk.is_zero() {
        filter.push_eq(meta.table, meta.pk_field, pk)?;
    }
    for cond in &query.conditions {
        filter.push_cond(meta.table, cond)?;
    }
    Ok(filter)
}

fn junction_filter(rel: &dyn RelationShip) -> ModelResult<Filter> {
    let (left, right) = (rel.left(), rel.right());
    let mut filter = Filter::new();
    filter.push_eq(rel.table(), &left.column(), left.pk)?;
    filter.push_eq(rel.table(), &right.column(), right.pk)?;
    Ok(filter)
}

async fn insert_one<T: Object>(exec: &mut Exec<'_>, dialect: SqlDialect, obj: &mut T) -> ModelResult<()> {
    let meta = T::META;
    let (columns, params): (Vec<&str>, Vec<DatabaseValue>) = column_values(obj)?
        .into_iter()
        .filter(|(column, value)| *column != meta.pk_field || !value.is_zero())
        .unzip();

    let sql = insert_sql(dialect, meta.table, &columns, 1, Some(meta.pk_field))?;
    if let Some(row) = exec.fetch_optional(&sql, &params).await? {
        let pk = row.get_by_name(meta.pk_field)?;
        if !pk.is_null() {
            obj.set_pk_value(pk);
        }
    }
    Ok(())
}

async fn insert_batches<T: Object>(tx: &mut dyn DatabaseTransaction, items: &mut [T]) -> ModelResult<()> {
    let meta = T::META;
    let dialect = tx.dialect();

    for chunk in items.chunks_mut(BATCH_SIZE) {
        let keyed = chunk.iter().filter(|obj| !obj.pk_value().is_zero()).count();
        if keyed != 0 && keyed != chunk.len() {
            return Err(ModelError::Validation(format!(
                "batch insert into '{}' mixes set and unset primary keys",
                meta.table
            )));
        }
        let assign_keys = keyed == 0;

        let mut columns: Vec<&str> = Vec::new();
        let mut params = Vec::new();
        for obj in chunk.iter() {
            let values = column_values(obj)?
                .into_iter()
                .filter(|(column, _)| !assign_keys || *column != meta.pk_field);
            let fill_columns = columns.is_empty();
            for (column, value) in values {
                if fill_columns {
                    columns.push(column);
                }
                params.push(value);
            }
        }

        let sql = insert_sql(dialect, meta.table, &columns, chunk.len(), Some(meta.pk_field))?;
        let rows = Exec::Tx(&mut *tx).fetch_all(&sql, &params).await?;
        if assign_keys && rows.len() == chunk.len() {
            for (obj, row) in chunk.iter_mut().zip(rows.iter()) {
                obj.set_pk_value(row.get_by_name(meta.pk_field)?);
            }
        }
        debug!(kind = meta.kind, rows = chunk.len(), "batch inserted");
    }
    Ok(())
}

/// Copies of `obj` carrying the key of each row an update will touch. A set
/// primary key names its own row; otherwise the conditions select them.
async fn update_targets<T: Object>(
    exec: &mut Exec<'_>,
    dialect: SqlDialect,
    obj: &T,
    opts: &[QueryOption],
) -> ModelResult<Vec<T>> {
    let meta = T::META;
    let copy = || -> ModelResult<T> { Ok(serde_json::from_value(serde_json::to_value(obj)?)?) };
    let pk = obj.pk_value();
    let query = Query::from_options(opts);
    if !pk.is_zero() || query.conditions.is_empty() {
        return Ok(vec![copy()?]);
    }

    let mut select = SelectBuilder::new(meta.table)?;
    select.column(&format!("{}.{}", meta.table, meta.pk_field))?;
    select.filter = key_filter(meta, pk, &query)?;
    select.order_by(meta.pk_field, OrderDirection::Asc)?;
    let (sql, params) = select.build(dialect)?;

    let mut targets = Vec::new();
    for row in exec.fetch_all(&sql, &params).await? {
        let mut target = copy()?;
        target.set_pk_value(row.get_by_name(meta.pk_field)?);
        targets.push(target);
    }
    debug!(kind = meta.kind, rows = targets.len(), "update targets resolved");
    Ok(targets)
}

async fn update_one<T: Object>(
    exec: &mut Exec<'_>,
    dialect: SqlDialect,
    obj: &T,
    opts: &[QueryOption],
) -> ModelResult<()> {
    let meta = T::META;
    let query = Query::from_options(opts);
    let filter = key_filter(meta, obj.pk_value(), &query)?;
    if filter.is_empty() {
        return Err(ModelError::Validation(format!(
            "refusing to update '{}' without a primary key or condition",
            meta.table
        )));
    }

    let sets: Vec<(String, DatabaseValue)> = column_values(obj)?
        .into_iter()
        .filter(|(column, value)| *column != meta.pk_field && !value.is_zero())
        .map(|(column, value)| (column.to_string(), value))
        .collect();
    if sets.is_empty() {
        return Ok(());
    }

    let (sql, params) = update_sql(dialect, meta.table, &sets, &filter)?;
    let affected = exec.execute(&sql, &params).await?;
    debug!(kind = meta.kind, affected, "rows updated");
    Ok(())
}
