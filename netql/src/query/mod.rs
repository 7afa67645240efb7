//! Placement query language parser.
//!
//! # Syntax Overview
//!
//! Full pattern: `[RF n] SELECT n key [n key ...] [FILTER key op value ...] [; SELECT ...]`
//!
//! - **Replication factor**: `RF 3` (defaults to 2 when omitted)
//! - **Selectors**: `SELECT 1 Country 2 City`
//! - **Filters**: `FILTER Location NE Europe Trust >= 10`
//! - **Operators**: `EQ =`, `NE !=`, `LT <`, `LE <=`, `GT >`, `GE >=`
//! - **Union**: groups separated by `;`
//!
//! Keywords are case-sensitive. Whitespace between tokens is free-form,
//! including newlines.

mod combinator;
mod cursor;
mod grammar;

pub(crate) use cursor::Cursor;
pub use grammar::{lookup_operation, parse_query, OPERATOR_TABLE};

use crate::config::Config;
use crate::rule::PlacementRule;
use crate::{Error, Result};

/// Longest query accepted by a default [`QueryParser`], in bytes.
pub const DEFAULT_MAX_QUERY_LEN: usize = 4_096;

/// Query parser with an input length bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryParser {
    max_len: usize,
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryParser {
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_QUERY_LEN)
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self { max_len }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_max_len(config.max_query_len)
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Parse `input`, rejecting it up front when it exceeds the bound.
    pub fn parse(&self, input: &str) -> Result<PlacementRule> {
        if input.len() > self.max_len {
            tracing::debug!(len = input.len(), max = self.max_len, "query rejected: too long");
            return Err(Error::QueryTooLong {
                len: input.len(),
                max: self.max_len,
            });
        }

        match parse_query(input) {
            Ok(rule) => {
                tracing::debug!(
                    replication_factor = rule.replication_factor,
                    groups = rule.groups.len(),
                    "query parsed"
                );
                Ok(rule)
            }
            Err(e) => {
                tracing::debug!(query = input, "query rejected: syntax error");
                Err(e.into())
            }
        }
    }
}
