//! Query Builder Types - Core types and enums for query building

use crate::backends::DatabaseValue;
use crate::error::ModelError;
use crate::object::TypeMeta;
use std::fmt;
use std::str::FromStr;

/// Comparison operators accepted in conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOperator {
    Equal,
    GreaterThan,
    LessThan,
    NotEqual,
    GreaterThanOrEqual,
    LessThanOrEqual,
    In,
    Like,
}

impl fmt::Display for QueryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOperator::Equal => write!(f, "="),
            QueryOperator::GreaterThan => write!(f, ">"),
            QueryOperator::LessThan => write!(f, "<"),
            QueryOperator::NotEqual => write!(f, "<>"),
            QueryOperator::GreaterThanOrEqual => write!(f, ">="),
            QueryOperator::LessThanOrEqual => write!(f, "<="),
            QueryOperator::In => write!(f, "IN"),
            QueryOperator::Like => write!(f, "LIKE"),
        }
    }
}

impl FromStr for QueryOperator {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "=" => Ok(QueryOperator::Equal),
            ">" => Ok(QueryOperator::GreaterThan),
            "<" => Ok(QueryOperator::LessThan),
            "<>" | "!=" => Ok(QueryOperator::NotEqual),
            ">=" => Ok(QueryOperator::GreaterThanOrEqual),
            "<=" => Ok(QueryOperator::LessThanOrEqual),
            "in" => Ok(QueryOperator::In),
            "like" => Ok(QueryOperator::Like),
            other => Err(ModelError::Query(format!("Unsupported operator '{}'", other))),
        }
    }
}

/// Where clause condition. An unqualified field refers to the queried table.
#[derive(Debug, Clone, PartialEq)]
pub struct Cond {
    pub field: String,
    pub op: QueryOperator,
    pub value: DatabaseValue,
}

/// Order by direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Asc => write!(f, "ASC"),
            OrderDirection::Desc => write!(f, "DESC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub field: String,
    pub direction: OrderDirection,
}

/// Join types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinType::Inner => write!(f, "INNER JOIN"),
            JoinType::Left => write!(f, "LEFT JOIN"),
        }
    }
}

/// Join clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinClause {
    pub join_type: JoinType,
    pub table: String,
    pub alias: Option<String>,
    /// `(left_column, right_column)` pairs, both qualified
    pub on_conditions: Vec<(String, String)>,
}

/// Restricts rows to children of one parent: `<parent kind>_<parent pk> = pk`
#[derive(Debug, Clone, PartialEq)]
pub struct BelongTo {
    pub column: String,
    pub value: DatabaseValue,
}

/// Restricts rows to those related to `target` through a junction table,
/// optionally requiring a junction column to hold a value
#[derive(Debug, Clone, PartialEq)]
pub struct RelationCondition {
    pub target: &'static TypeMeta,
    pub target_pk: DatabaseValue,
    pub key: Option<String>,
    pub value: DatabaseValue,
}
