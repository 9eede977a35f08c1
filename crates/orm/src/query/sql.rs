//! SQL generation
//!
//! Fragments are assembled with `?` markers and renumbered into the
//! dialect's placeholder style when the statement is rendered. Identifiers
//! are validated and quoted; values are always bound.

use super::types::*;
use crate::backends::{DatabaseValue, SqlDialect};
use crate::error::{ModelError, ModelResult};
use crate::security::{qualify, quote_identifier};

/// Replace `?` markers with the dialect's numbered placeholders
pub fn render_placeholders(sql: &str, dialect: SqlDialect) -> String {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut index = 0;
    for c in sql.chars() {
        if c == '?' {
            out.push_str(&dialect.parameter_placeholder(index));
            index += 1;
        } else {
            out.push(c);
        }
    }
    out
}

/// Accumulated `WHERE` predicates joined by `AND`
#[derive(Debug, Clone, Default)]
pub struct Filter {
    fragments: Vec<String>,
    params: Vec<DatabaseValue>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Add a fragment whose `?` markers bind `params` in order
    pub fn push_raw(&mut self, fragment: impl Into<String>, params: Vec<DatabaseValue>) {
        self.fragments.push(fragment.into());
        self.params.extend(params);
    }

    /// `table.column = value`
    pub fn push_eq(&mut self, table: &str, column: &str, value: DatabaseValue) -> ModelResult<()> {
        self.push_raw(format!("{} = ?", qualify(table, column)?), vec![value]);
        Ok(())
    }

    pub fn push_cond(&mut self, table: &str, cond: &Cond) -> ModelResult<()> {
        let column = qualify(table, &cond.field)?;
        match (cond.op, &cond.value) {
            (QueryOperator::In, DatabaseValue::Array(values)) if values.is_empty() => {
                self.push_raw("1 = 0", vec![]);
            }
            (QueryOperator::In, DatabaseValue::Array(values)) => {
                let markers = vec!["?"; values.len()].join(", ");
                self.push_raw(format!("{} IN ({})", column, markers), values.clone());
            }
            (QueryOperator::In, value) => {
                self.push_raw(format!("{} IN (?)", column), vec![value.clone()]);
            }
            (QueryOperator::Equal, DatabaseValue::Null) => {
                self.push_raw(format!("{} IS NULL", column), vec![]);
            }
            (QueryOperator::NotEqual, DatabaseValue::Null) => {
                self.push_raw(format!("{} IS NOT NULL", column), vec![]);
            }
            (op, DatabaseValue::Array(_)) => {
                return Err(ModelError::Query(format!(
                    "Operator '{}' does not accept a list value for '{}'",
                    op, cond.field
                )));
            }
            (op, value) => {
                self.push_raw(format!("{} {} ?", column, op), vec![value.clone()]);
            }
        }
        Ok(())
    }

    /// `(t.f1 LIKE ? OR t.f2 LIKE ?)` matching `%text%`
    pub fn push_search(&mut self, table: &str, fields: &[&str], text: &str) -> ModelResult<()> {
        if fields.is_empty() || text.is_empty() {
            return Ok(());
        }
        let pattern = format!("%{}%", text);
        let mut parts = Vec::with_capacity(fields.len());
        let mut params = Vec::with_capacity(fields.len());
        for field in fields {
            parts.push(format!("{} LIKE ?", qualify(table, field)?));
            params.push(DatabaseValue::String(pattern.clone()));
        }
        self.push_raw(format!("({})", parts.join(" OR ")), params);
        Ok(())
    }

    fn write_to(&self, sql: &mut String, params: &mut Vec<DatabaseValue>) {
        if !self.fragments.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.fragments.join(" AND "));
            params.extend(self.params.iter().cloned());
        }
    }
}

/// SELECT statement builder
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    table: String,
    projection: Vec<String>,
    joins: Vec<JoinClause>,
    pub filter: Filter,
    orders: Vec<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl SelectBuilder {
    pub fn new(table: &str) -> ModelResult<Self> {
        quote_identifier(table)?;
        Ok(Self {
            table: table.to_string(),
            projection: Vec::new(),
            joins: Vec::new(),
            filter: Filter::new(),
            orders: Vec::new(),
            limit: None,
            offset: None,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Project a column of any joined table (`table.column`)
    pub fn column(&mut self, name: &str) -> ModelResult<()> {
        self.projection.push(quote_identifier(name)?);
        Ok(())
    }

    /// Project a column under another name
    pub fn column_as(&mut self, name: &str, alias: &str) -> ModelResult<()> {
        self.projection
            .push(format!("{} AS {}", quote_identifier(name)?, quote_identifier(alias)?));
        Ok(())
    }

    /// Project every column of `table`
    pub fn all_columns_of(&mut self, table: &str) -> ModelResult<()> {
        self.projection.push(format!("{}.*", quote_identifier(table)?));
        Ok(())
    }

    pub fn join(&mut self, join: JoinClause) -> ModelResult<()> {
        quote_identifier(&join.table)?;
        if let Some(alias) = &join.alias {
            quote_identifier(alias)?;
        }
        for (left, right) in &join.on_conditions {
            quote_identifier(left)?;
            quote_identifier(right)?;
        }
        self.joins.push(join);
        Ok(())
    }

    pub fn order_by(&mut self, field: &str, direction: OrderDirection) -> ModelResult<()> {
        self.orders
            .push(format!("{} {}", qualify(&self.table, field)?, direction));
        Ok(())
    }

    pub fn has_order(&self) -> bool {
        !self.orders.is_empty()
    }

    pub fn limit(&mut self, limit: i64) {
        self.limit = Some(limit);
    }

    pub fn offset(&mut self, offset: i64) {
        self.offset = Some(offset);
    }

    fn write_from(&self, sql: &mut String) -> ModelResult<()> {
        sql.push_str(" FROM ");
        sql.push_str(&quote_identifier(&self.table)?);

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.join_type.to_string());
            sql.push(' ');
            sql.push_str(&quote_identifier(&join.table)?);
            if let Some(alias) = &join.alias {
                sql.push_str(" AS ");
                sql.push_str(&quote_identifier(alias)?);
            }
            sql.push_str(" ON ");
            for (i, (left, right)) in join.on_conditions.iter().enumerate() {
                if i > 0 {
                    sql.push_str(" AND ");
                }
                sql.push_str(&format!("{} = {}", quote_identifier(left)?, quote_identifier(right)?));
            }
        }
        Ok(())
    }

    /// Render the full statement
    pub fn build(&self, dialect: SqlDialect) -> ModelResult<(String, Vec<DatabaseValue>)> {
        let mut sql = String::from("SELECT ");
        let mut params = Vec::new();

        if self.projection.is_empty() {
            sql.push_str(&format!("{}.*", quote_identifier(&self.table)?));
        } else {
            sql.push_str(&self.projection.join(", "));
        }

        self.write_from(&mut sql)?;
        self.filter.write_to(&mut sql, &mut params);

        if !self.orders.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.orders.join(", "));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        Ok((render_placeholders(&sql, dialect), params))
    }

    /// Render `SELECT COUNT(*)` over the same joins and filters; projection,
    /// order and paging are ignored
    pub fn build_count(&self, dialect: SqlDialect) -> ModelResult<(String, Vec<DatabaseValue>)> {
        let mut sql = String::from("SELECT COUNT(*) AS count");
        let mut params = Vec::new();
        self.write_from(&mut sql)?;
        self.filter.write_to(&mut sql, &mut params);
        Ok((render_placeholders(&sql, dialect), params))
    }
}

/// Multi-row INSERT with one `?` group per row
pub fn insert_sql(
    dialect: SqlDialect,
    table: &str,
    columns: &[&str],
    rows: usize,
    returning: Option<&str>,
) -> ModelResult<String> {
    if columns.is_empty() || rows == 0 {
        return Err(ModelError::Query(format!("Nothing to insert into '{}'", table)));
    }
    let quoted = columns
        .iter()
        .map(|c| quote_identifier(c))
        .collect::<ModelResult<Vec<_>>>()?;
    let group = format!("({})", vec!["?"; columns.len()].join(", "));
    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES {}",
        quote_identifier(table)?,
        quoted.join(", "),
        vec![group; rows].join(", ")
    );
    if let Some(column) = returning {
        sql.push_str(&format!(" RETURNING {}", quote_identifier(column)?));
    }
    Ok(render_placeholders(&sql, dialect))
}

/// UPDATE of `columns` restricted by `filter`
pub fn update_sql(
    dialect: SqlDialect,
    table: &str,
    columns: &[(String, DatabaseValue)],
    filter: &Filter,
) -> ModelResult<(String, Vec<DatabaseValue>)> {
    let mut params = Vec::with_capacity(columns.len());
    let mut sets = Vec::with_capacity(columns.len());
    for (column, value) in columns {
        sets.push(format!("{} = ?", quote_identifier(column)?));
        params.push(value.clone());
    }
    let mut sql = format!("UPDATE {} SET {}", quote_identifier(table)?, sets.join(", "));
    filter.write_to(&mut sql, &mut params);
    Ok((render_placeholders(&sql, dialect), params))
}

/// DELETE restricted by `filter`
pub fn delete_sql(dialect: SqlDialect, table: &str, filter: &Filter) -> ModelResult<(String, Vec<DatabaseValue>)> {
    let mut params = Vec::new();
    let mut sql = format!("DELETE FROM {}", quote_identifier(table)?);
    filter.write_to(&mut sql, &mut params);
    Ok((render_placeholders(&sql, dialect), params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_with_join_filter_and_paging() {
        let mut select = SelectBuilder::new("users").unwrap();
        select.all_columns_of("users").unwrap();
        select.column("tenant_user_rels.role").unwrap();
        select
            .join(JoinClause {
                join_type: JoinType::Left,
                table: "tenant_user_rels".into(),
                alias: None,
                on_conditions: vec![("tenant_user_rels.user_id".into(), "users.id".into())],
            })
            .unwrap();
        select
            .filter
            .push_eq("users", "tenant_user_rels.tenant_id", DatabaseValue::Int64(7))
            .unwrap();
        select.order_by("id", OrderDirection::Desc).unwrap();
        select.limit(10);
        select.offset(20);

        let (sql, params) = select.build(SqlDialect::PostgreSQL).unwrap();
        assert_eq!(
            sql,
            "SELECT \"users\".*, \"tenant_user_rels\".\"role\" FROM \"users\" \
             LEFT JOIN \"tenant_user_rels\" ON \"tenant_user_rels\".\"user_id\" = \"users\".\"id\" \
             WHERE \"tenant_user_rels\".\"tenant_id\" = $1 ORDER BY \"users\".\"id\" DESC LIMIT 10 OFFSET 20"
        );
        assert_eq!(params, vec![DatabaseValue::Int64(7)]);

        let (count, _) = select.build_count(SqlDialect::SQLite).unwrap();
        assert!(count.starts_with("SELECT COUNT(*) AS count FROM \"users\" LEFT JOIN"));
        assert!(count.ends_with("= ?"));
    }

    #[test]
    fn test_in_condition_expands() {
        let mut filter = Filter::new();
        filter
            .push_cond(
                "projects",
                &Cond {
                    field: "id".into(),
                    op: QueryOperator::In,
                    value: DatabaseValue::array([1i64, 2, 3]),
                },
            )
            .unwrap();
        let (sql, params) = delete_sql(SqlDialect::PostgreSQL, "projects", &filter).unwrap();
        assert_eq!(sql, "DELETE FROM \"projects\" WHERE \"projects\".\"id\" IN ($1, $2, $3)");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_empty_in_matches_nothing() {
        let mut filter = Filter::new();
        filter
            .push_cond(
                "projects",
                &Cond {
                    field: "id".into(),
                    op: QueryOperator::In,
                    value: DatabaseValue::Array(vec![]),
                },
            )
            .unwrap();
        let (sql, params) = delete_sql(SqlDialect::SQLite, "projects", &filter).unwrap();
        assert!(sql.ends_with("WHERE 1 = 0"));
        assert!(params.is_empty());
    }

    #[test]
    fn test_search_fragment() {
        let mut filter = Filter::new();
        filter.push_search("tenants", &["tenant_name", "remark"], "ops").unwrap();
        let mut select = SelectBuilder::new("tenants").unwrap();
        select.filter = filter;
        let (sql, params) = select.build(SqlDialect::SQLite).unwrap();
        assert!(sql.ends_with("WHERE (\"tenants\".\"tenant_name\" LIKE ? OR \"tenants\".\"remark\" LIKE ?)"));
        assert_eq!(params[0], DatabaseValue::String("%ops%".into()));
    }

    #[test]
    fn test_insert_and_update_sql() {
        let sql = insert_sql(SqlDialect::PostgreSQL, "tenants", &["tenant_name", "is_active"], 2, Some("id")).unwrap();
        assert_eq!(
            sql,
            "INSERT INTO \"tenants\" (\"tenant_name\", \"is_active\") VALUES ($1, $2), ($3, $4) RETURNING \"id\""
        );

        let mut filter = Filter::new();
        filter.push_eq("tenants", "id", DatabaseValue::Int64(1)).unwrap();
        let (sql, params) = update_sql(
            SqlDialect::PostgreSQL,
            "tenants",
            &[("remark".to_string(), DatabaseValue::from("x"))],
            &filter,
        )
        .unwrap();
        assert_eq!(sql, "UPDATE \"tenants\" SET \"remark\" = $1 WHERE \"tenants\".\"id\" = $2");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_rejects_unsafe_field() {
        let mut filter = Filter::new();
        let err = filter.push_cond(
            "users",
            &Cond {
                field: "name = 'x' OR 1".into(),
                op: QueryOperator::Equal,
                value: DatabaseValue::Null,
            },
        );
        assert!(err.is_err());
    }
}
