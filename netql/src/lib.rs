//! netql: placement rule query language for network maps.
//!
//! Parses queries such as `RF 3 SELECT 1 Country FILTER Location NE Europe`
//! into a [`PlacementRule`] for a node-selection engine to consume.

pub mod config;
pub mod error;
pub mod query;
pub mod rule;

pub use config::{Config, LogFormat, LoggingConfig, OutputFormat};
pub use error::{Error, ParseError, Result};
pub use query::{lookup_operation, parse_query, QueryParser, DEFAULT_MAX_QUERY_LEN, OPERATOR_TABLE};
pub use rule::{Filter, Operation, PlacementRule, SFGroup, Select};
