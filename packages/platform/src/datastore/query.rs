use std::cmp::Ordering;

use super::entity::Value;
use super::key::Key;

/// Sort direction for an ordered query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Comparison operator for a property filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    LessThan,
    LessOrEqual,
    Equal,
    GreaterOrEqual,
    GreaterThan,
}

/// A single property comparison.
#[derive(Debug, Clone)]
pub struct PropertyFilter {
    pub property: String,
    pub op: FilterOp,
    pub value: Value,
}

impl PropertyFilter {
    /// Whether `candidate` satisfies this filter. A candidate of a different
    /// type than the filter operand never matches.
    pub fn matches(&self, candidate: &Value) -> bool {
        let Some(ordering) = candidate.partial_cmp(&self.value) else {
            return false;
        };
        match self.op {
            FilterOp::LessThan => ordering == Ordering::Less,
            FilterOp::LessOrEqual => ordering != Ordering::Greater,
            FilterOp::Equal => ordering == Ordering::Equal,
            FilterOp::GreaterOrEqual => ordering != Ordering::Less,
            FilterOp::GreaterThan => ordering == Ordering::Greater,
        }
    }
}

/// Query over a single entity kind.
#[derive(Debug, Clone)]
pub struct Query {
    kind: String,
    ancestor: Option<Key>,
    filters: Vec<PropertyFilter>,
    order: Option<(String, Direction)>,
    limit: Option<usize>,
    keys_only: bool,
}

impl Query {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ancestor: None,
            filters: Vec::new(),
            order: None,
            limit: None,
            keys_only: false,
        }
    }

    /// Restrict results to descendants of `key`. Ancestor queries observe
    /// all prior writes under the ancestor.
    pub fn ancestor(mut self, key: Key) -> Self {
        self.ancestor = Some(key);
        self
    }

    pub fn filter(
        mut self,
        property: impl Into<String>,
        op: FilterOp,
        value: impl Into<Value>,
    ) -> Self {
        self.filters.push(PropertyFilter {
            property: property.into(),
            op,
            value: value.into(),
        });
        self
    }

    pub fn order_asc(mut self, property: impl Into<String>) -> Self {
        self.order = Some((property.into(), Direction::Ascending));
        self
    }

    pub fn order_desc(mut self, property: impl Into<String>) -> Self {
        self.order = Some((property.into(), Direction::Descending));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Return entities stripped to their keys.
    pub fn keys_only(mut self) -> Self {
        self.keys_only = true;
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn ancestor_key(&self) -> Option<&Key> {
        self.ancestor.as_ref()
    }

    pub fn filters(&self) -> &[PropertyFilter] {
        &self.filters
    }

    pub fn ordering(&self) -> Option<(&str, Direction)> {
        self.order
            .as_ref()
            .map(|(property, direction)| (property.as_str(), *direction))
    }

    pub fn result_limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn is_keys_only(&self) -> bool {
        self.keys_only
    }
}
