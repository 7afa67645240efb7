//! Placement rule model produced by the query parser.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::query::lookup_operation;

/// A parsed placement rule: replication factor plus selection/filter groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRule {
    /// Minimum number of copies the placement must achieve.
    pub replication_factor: u32,
    /// Groups in textual order. Never empty after a successful parse.
    pub groups: Vec<SFGroup>,
}

impl PlacementRule {
    /// Replication factor used when the query has no `RF` clause.
    pub const DEFAULT_REPLICATION_FACTOR: u32 = 2;

    /// Total number of selectors across all groups.
    pub fn selector_count(&self) -> usize {
        self.groups.iter().map(|g| g.selectors.len()).sum()
    }
}

/// One `SELECT ... [FILTER ...]` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SFGroup {
    /// Selectors in declared order.
    pub selectors: Vec<Select>,
    /// Filters in declared order (may be empty).
    #[serde(default)]
    pub filters: Vec<Filter>,
}

/// Request for `count` nodes grouped by attribute `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Select {
    pub key: String,
    pub count: u32,
}

impl Select {
    pub fn new(key: impl Into<String>, count: u32) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

/// Constraint on a node attribute: `key <operation> value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub key: String,
    pub operation: Operation,
    /// Compared as-is; numeric interpretation is up to the consumer.
    pub value: String,
}

impl Filter {
    pub fn new(key: impl Into<String>, operation: Operation, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            operation,
            value: value.into(),
        }
    }

    /// Filter matching nodes whose `key` equals `value`.
    pub fn eq(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Operation::Eq, value)
    }

    /// Filter matching nodes whose `key` differs from `value`.
    pub fn ne(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Operation::Ne, value)
    }

    /// Filter matching nodes whose `key` is greater than `value`.
    pub fn gt(key: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::new(key, Operation::Gt, value.to_string())
    }
}

/// Comparison operations usable in a `FILTER` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    /// `EQ` or `=`
    Eq,
    /// `NE` or `!=`
    Ne,
    /// `LT` or `<`
    Lt,
    /// `LE` or `<=`
    Le,
    /// `GT` or `>`
    Gt,
    /// `GE` or `>=`
    Ge,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Eq,
        Operation::Ne,
        Operation::Lt,
        Operation::Le,
        Operation::Gt,
        Operation::Ge,
    ];

    /// Keyword form, e.g. `NE`.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Operation::Eq => "EQ",
            Operation::Ne => "NE",
            Operation::Lt => "LT",
            Operation::Le => "LE",
            Operation::Gt => "GT",
            Operation::Ge => "GE",
        }
    }

    /// Symbolic form, e.g. `!=`.
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Eq => "=",
            Operation::Ne => "!=",
            Operation::Lt => "<",
            Operation::Le => "<=",
            Operation::Gt => ">",
            Operation::Ge => ">=",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for Operation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_operation(s).ok_or_else(|| ParseError::new(s))
    }
}
