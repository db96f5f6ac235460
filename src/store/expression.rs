//! # Query and Write Expressions
//!
//! Key conditions select a partition (and optionally an exact sort key) of a
//! table or index. Filter expressions are evaluated per item after the key
//! condition has narrowed the scan. Conditions guard single-item writes.

use std::fmt;

use super::item::{AttributeValue, Item};

/// Equality constraint on a single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equality {
    pub attribute: String,
    pub value: AttributeValue,
}

impl Equality {
    pub fn new(attribute: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// True when the item carries the attribute with exactly this value
    pub fn matches(&self, item: &Item) -> bool {
        item.get(&self.attribute) == Some(&self.value)
    }
}

impl fmt::Display for Equality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.attribute, self.value)
    }
}

/// Key condition: partition key equality plus optional sort key equality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCondition {
    pub partition: Equality,
    pub sort: Option<Equality>,
}

impl KeyCondition {
    pub fn partition(attribute: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            partition: Equality::new(attribute, value),
            sort: None,
        }
    }

    pub fn with_sort(mut self, attribute: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.sort = Some(Equality::new(attribute, value));
        self
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.partition.matches(item) && self.sort.as_ref().map_or(true, |s| s.matches(item))
    }
}

impl fmt::Display for KeyCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.partition)?;
        if let Some(sort) = &self.sort {
            write!(f, " AND {}", sort)?;
        }
        Ok(())
    }
}

/// Conjunction of equality predicates (empty = matches everything)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpression {
    predicates: Vec<Equality>,
}

impl FilterExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and_eq(mut self, attribute: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.predicates.push(Equality::new(attribute, value));
        self
    }

    pub fn predicates(&self) -> &[Equality] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.predicates.iter().all(|p| p.matches(item))
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.predicates.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", parts.join(" AND "))
    }
}

/// Write guard evaluated against the currently stored item (if any)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    AttributeExists(String),
    AttributeNotExists(String),
    And(Box<Condition>, Box<Condition>),
}

impl Condition {
    pub fn attribute_exists(attribute: impl Into<String>) -> Self {
        Condition::AttributeExists(attribute.into())
    }

    pub fn attribute_not_exists(attribute: impl Into<String>) -> Self {
        Condition::AttributeNotExists(attribute.into())
    }

    pub fn and(self, other: Condition) -> Self {
        Condition::And(Box::new(self), Box::new(other))
    }

    pub fn evaluate(&self, existing: Option<&Item>) -> bool {
        match self {
            Condition::AttributeExists(attr) => existing.map_or(false, |i| i.contains_key(attr)),
            Condition::AttributeNotExists(attr) => existing.map_or(true, |i| !i.contains_key(attr)),
            Condition::And(a, b) => a.evaluate(existing) && b.evaluate(existing),
        }
    }
}
