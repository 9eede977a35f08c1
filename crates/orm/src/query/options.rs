//! Functional query options
//!
//! Each option mutates a [`Query`]. Conditions, orders, preloads and scope
//! filters accumulate across options; paging and search are replaced by the
//! last option that sets them.

use super::types::*;
use crate::backends::DatabaseValue;
use crate::object::AnyObject;
use std::fmt;

/// Accumulated query parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub page: i64,
    pub size: i64,
    pub search: String,
    pub orders: Vec<Order>,
    pub conditions: Vec<Cond>,
    pub preloads: Vec<String>,
    pub belongs: Vec<BelongTo>,
    pub relations: Vec<RelationCondition>,
    /// Junction columns projected by sub-resource listings
    pub relation_fields: Vec<String>,
}

impl Query {
    pub fn from_options(opts: &[QueryOption]) -> Self {
        let mut query = Query::default();
        for opt in opts {
            opt.apply(&mut query);
        }
        query
    }

    pub fn is_paged(&self) -> bool {
        self.page > 0 && self.size > 0
    }

    pub fn offset(&self) -> i64 {
        self.size * (self.page - 1)
    }
}

/// A single query modifier
pub struct QueryOption(Box<dyn Fn(&mut Query) + Send + Sync>);

impl QueryOption {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Query) + Send + Sync + 'static,
    {
        QueryOption(Box::new(f))
    }

    pub fn apply(&self, query: &mut Query) {
        (self.0)(query)
    }
}

impl fmt::Debug for QueryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("QueryOption")
    }
}

pub fn page_size(page: i64, size: i64) -> QueryOption {
    QueryOption::new(move |q| {
        q.page = page;
        q.size = size;
    })
}

pub fn where_cond(field: impl Into<String>, op: QueryOperator, value: impl Into<DatabaseValue>) -> QueryOption {
    let cond = Cond {
        field: field.into(),
        op,
        value: value.into(),
    };
    QueryOption::new(move |q| q.conditions.push(cond.clone()))
}

pub fn where_equal(field: impl Into<String>, value: impl Into<DatabaseValue>) -> QueryOption {
    where_cond(field, QueryOperator::Equal, value)
}

pub fn where_by_name(name: impl Into<String>) -> QueryOption {
    where_equal("name", name.into())
}

pub fn preloads<I, S>(fields: I) -> QueryOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
    QueryOption::new(move |q| q.preloads.extend(fields.iter().cloned()))
}

pub fn order_asc(field: impl Into<String>) -> QueryOption {
    order(field.into(), OrderDirection::Asc)
}

pub fn order_desc(field: impl Into<String>) -> QueryOption {
    order(field.into(), OrderDirection::Desc)
}

fn order(field: String, direction: OrderDirection) -> QueryOption {
    QueryOption::new(move |q| {
        q.orders.push(Order {
            field: field.clone(),
            direction,
        })
    })
}

/// Free-text match against the type's search fields
pub fn search(text: impl Into<String>) -> QueryOption {
    let text = text.into();
    QueryOption::new(move |q| q.search = text.clone())
}

/// Restrict to children owned by `parent`
pub fn belong_to(parent: &dyn AnyObject) -> QueryOption {
    let belong = BelongTo {
        column: gems_core::naming::foreign_key(parent.kind(), parent.pk_field()),
        value: parent.pk(),
    };
    QueryOption::new(move |q| q.belongs.push(belong.clone()))
}

/// Restrict to rows related to `target` through a many-to-many relation
pub fn exist_relation(target: &dyn AnyObject) -> QueryOption {
    relation_condition(target, None, DatabaseValue::Null)
}

/// Like [`exist_relation`], additionally requiring `key = value` on the
/// junction row
pub fn exist_relation_with_key_value(
    target: &dyn AnyObject,
    key: impl Into<String>,
    value: impl Into<DatabaseValue>,
) -> QueryOption {
    relation_condition(target, Some(key.into()), value.into())
}

fn relation_condition(target: &dyn AnyObject, key: Option<String>, value: DatabaseValue) -> QueryOption {
    let condition = RelationCondition {
        target: target.meta(),
        target_pk: target.pk(),
        key,
        value,
    };
    QueryOption::new(move |q| q.relations.push(condition.clone()))
}

/// Project junction columns alongside sub-resource rows
pub fn relation_fields<I, S>(fields: I) -> QueryOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
    QueryOption::new(move |q| q.relation_fields.extend(fields.iter().cloned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conditions_and_orders_append() {
        let opts = vec![
            where_equal("tenant_name", "alpha"),
            where_cond("id", QueryOperator::GreaterThan, 3i64),
            order_desc("id"),
            order_asc("tenant_name"),
            preloads(["projects"]),
            preloads(["users"]),
        ];
        let q = Query::from_options(&opts);
        assert_eq!(q.conditions.len(), 2);
        assert_eq!(q.conditions[1].op, QueryOperator::GreaterThan);
        assert_eq!(q.orders[0].direction, OrderDirection::Desc);
        assert_eq!(q.orders[1].field, "tenant_name");
        assert_eq!(q.preloads, vec!["projects".to_string(), "users".to_string()]);
    }

    #[test]
    fn test_paging_and_search_overwrite() {
        let opts = vec![page_size(1, 10), search("a"), page_size(3, 5), search("b")];
        let q = Query::from_options(&opts);
        assert_eq!((q.page, q.size), (3, 5));
        assert_eq!(q.offset(), 10);
        assert_eq!(q.search, "b");
        assert!(q.is_paged());
    }

    #[test]
    fn test_unpaged_by_default() {
        let q = Query::from_options(&[]);
        assert!(!q.is_paged());
        assert!(!Query::from_options(&[page_size(0, 10)]).is_paged());
    }
}
