//! Boolean condition trees evaluated against a tag record.
//!
//! A [`Condition`] decides whether an object belongs to a type. Evaluation
//! is total: missing tags or malformed values make the affected node
//! `false`, they never abort the evaluation.
//!
//! # Examples
//!
//! ```
//! use geoclass::condition::{Condition, Operator};
//! use geoclass::registry::{TagId, TagMap};
//!
//! let highway = TagId::new(1);
//! let primary = Condition::and(vec![
//!     Condition::exists(highway),
//!     Condition::compare(highway, Operator::Eq, "primary"),
//! ]);
//!
//! let mut tags = TagMap::new();
//! tags.insert(highway, "primary".to_string());
//! assert!(primary.evaluate(&tags));
//!
//! tags.insert(highway, "secondary".to_string());
//! assert!(!primary.evaluate(&tags));
//! ```

use crate::registry::{TagId, TagMap};
use hashbrown::HashSet;
use std::cmp::Ordering;
use std::fmt;

/// Comparison operator of a [`Condition::Binary`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Lt,
    Le,
    Eq,
    Ne,
    Ge,
    Gt,
}

impl Operator {
    /// Applies the operator to the result of `tag_value.cmp(literal)`.
    pub fn matches(self, ordering: Ordering) -> bool {
        match self {
            Operator::Lt => ordering == Ordering::Less,
            Operator::Le => ordering != Ordering::Greater,
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Ne => ordering != Ordering::Equal,
            Operator::Ge => ordering != Ordering::Less,
            Operator::Gt => ordering == Ordering::Greater,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Ge => ">=",
            Operator::Gt => ">",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literal operand of a [`Condition::Binary`] node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionValue {
    /// Compared lexically against the tag value.
    String(String),

    /// Compared numerically; the tag value must parse as an unsigned integer.
    Number(u64),
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        ConditionValue::String(value.to_owned())
    }
}

impl From<String> for ConditionValue {
    fn from(value: String) -> Self {
        ConditionValue::String(value)
    }
}

impl From<u64> for ConditionValue {
    fn from(value: u64) -> Self {
        ConditionValue::Number(value)
    }
}

/// A node of a condition tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// True if the tag is present, whatever its value.
    Exists(TagId),

    Not(Box<Condition>),

    /// True if every child is true; an empty list is true.
    And(Vec<Condition>),

    /// True if any child is true; an empty list is false.
    Or(Vec<Condition>),

    /// Compares the tag value against a literal.
    Binary {
        tag: TagId,
        op: Operator,
        value: ConditionValue,
    },

    /// True if the tag is present and its value is in the set.
    OneOf { tag: TagId, values: HashSet<String> },
}

impl Condition {
    #[must_use]
    pub fn exists(tag: TagId) -> Self {
        Condition::Exists(tag)
    }

    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    #[must_use]
    pub fn and(children: Vec<Condition>) -> Self {
        Condition::And(children)
    }

    #[must_use]
    pub fn or(children: Vec<Condition>) -> Self {
        Condition::Or(children)
    }

    #[must_use]
    pub fn compare(tag: TagId, op: Operator, value: impl Into<ConditionValue>) -> Self {
        Condition::Binary {
            tag,
            op,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn one_of<I, S>(tag: TagId, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition::OneOf {
            tag,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Evaluates the tree against `tags`.
    pub fn evaluate(&self, tags: &TagMap) -> bool {
        match self {
            Condition::Exists(tag) => tags.contains_key(tag),
            Condition::Not(child) => !child.evaluate(tags),
            Condition::And(children) => children.iter().all(|c| c.evaluate(tags)),
            Condition::Or(children) => children.iter().any(|c| c.evaluate(tags)),
            Condition::Binary { tag, op, value } => {
                let Some(actual) = tags.get(tag) else {
                    return false;
                };

                match value {
                    ConditionValue::String(literal) => {
                        op.matches(actual.as_str().cmp(literal.as_str()))
                    }
                    ConditionValue::Number(literal) => match actual.parse::<u64>() {
                        Ok(number) => op.matches(number.cmp(literal)),
                        Err(_) => false,
                    },
                }
            }
            Condition::OneOf { tag, values } => tags
                .get(tag)
                .is_some_and(|actual| values.contains(actual.as_str())),
        }
    }
}
