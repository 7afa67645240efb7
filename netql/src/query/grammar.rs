//! Grammar rules for placement queries.

use super::combinator::{many, many1, optional, sequence};
use super::cursor::{is_digit, is_ident, is_non_space, is_space, satisfy, Cursor};
use crate::error::ParseError;
use crate::rule::{Filter, Operation, PlacementRule, SFGroup, Select};

/// Accepted operator tokens, mnemonic and symbolic.
pub const OPERATOR_TABLE: &[(&str, Operation)] = &[
    ("EQ", Operation::Eq),
    ("=", Operation::Eq),
    ("NE", Operation::Ne),
    ("!=", Operation::Ne),
    ("LT", Operation::Lt),
    ("<", Operation::Lt),
    ("LE", Operation::Le),
    ("<=", Operation::Le),
    ("GT", Operation::Gt),
    (">", Operation::Gt),
    ("GE", Operation::Ge),
    (">=", Operation::Ge),
];

/// Look up an operator token in [`OPERATOR_TABLE`].
pub fn lookup_operation(token: &str) -> Option<Operation> {
    OPERATOR_TABLE
        .iter()
        .find(|(text, _)| *text == token)
        .map(|(_, op)| *op)
}

/// Parse a placement query into a [`PlacementRule`].
///
/// The whole input must match; trailing whitespace is allowed, anything else
/// left over rejects the query.
pub fn parse_query(input: &str) -> Result<PlacementRule, ParseError> {
    let mut cur = Cursor::new(input);
    placement_rule(&mut cur).ok_or_else(|| ParseError::new(input))
}

/// query := replication_factor? sf_group (";" sf_group)* EOF
fn placement_rule(cur: &mut Cursor<'_>) -> Option<PlacementRule> {
    sequence(cur, |cur| {
        let rf = optional(cur, replication_factor)?;
        let groups = group_union(cur)?;
        ws(cur)?;
        if !cur.is_eof() {
            tracing::trace!(
                offset = cur.position(),
                rest = cur.remaining(),
                "unconsumed query input"
            );
            return None;
        }
        Some(PlacementRule {
            replication_factor: rf.unwrap_or(PlacementRule::DEFAULT_REPLICATION_FACTOR),
            groups,
        })
    })
}

/// replication_factor := ws "RF" ws1 digits
fn replication_factor(cur: &mut Cursor<'_>) -> Option<u32> {
    sequence(cur, |cur| {
        ws(cur)?;
        literal(cur, "RF")?;
        ws1(cur)?;
        number(cur)
    })
}

/// sf_group (ws ";" ws sf_group)*
fn group_union(cur: &mut Cursor<'_>) -> Option<Vec<SFGroup>> {
    sequence(cur, |cur| {
        let first = sf_group(cur)?;
        let rest = many(cur, |cur| {
            ws(cur)?;
            literal(cur, ";")?;
            ws(cur)?;
            sf_group(cur)
        });

        let mut groups = Vec::with_capacity(rest.len() + 1);
        groups.push(first);
        groups.extend(rest);
        Some(groups)
    })
}

/// sf_group := ws "SELECT" (ws1 digits ws1 identifier)+ (ws1 filter_clause)?
fn sf_group(cur: &mut Cursor<'_>) -> Option<SFGroup> {
    sequence(cur, |cur| {
        ws(cur)?;
        literal(cur, "SELECT")?;
        let selectors = many1(cur, selector)?;
        let filters = optional(cur, |cur| {
            ws1(cur)?;
            filter_clause(cur)
        })?;

        Some(SFGroup {
            selectors,
            filters: filters.unwrap_or_default(),
        })
    })
}

fn selector(cur: &mut Cursor<'_>) -> Option<Select> {
    sequence(cur, |cur| {
        ws1(cur)?;
        let count = number(cur)?;
        ws1(cur)?;
        let key = identifier(cur)?;
        Some(Select { key, count })
    })
}

/// filter_clause := "FILTER" (ws1 identifier ws1 operator ws1 identifier)+
fn filter_clause(cur: &mut Cursor<'_>) -> Option<Vec<Filter>> {
    sequence(cur, |cur| {
        literal(cur, "FILTER")?;
        many1(cur, filter)
    })
}

fn filter(cur: &mut Cursor<'_>) -> Option<Filter> {
    sequence(cur, |cur| {
        ws1(cur)?;
        let key = identifier(cur)?;
        ws1(cur)?;
        let operation = operator(cur)?;
        ws1(cur)?;
        let value = identifier(cur)?;
        Some(Filter {
            key,
            operation,
            value,
        })
    })
}

/// A run of non-space characters found in the operator table.
pub(super) fn operator(cur: &mut Cursor<'_>) -> Option<Operation> {
    sequence(cur, |cur| {
        let token: String = many1(cur, |cur| satisfy(cur, is_non_space))?
            .into_iter()
            .collect();
        lookup_operation(&token)
    })
}

fn identifier(cur: &mut Cursor<'_>) -> Option<String> {
    let chars = many1(cur, |cur| satisfy(cur, is_ident))?;
    Some(chars.into_iter().collect())
}

/// Unsigned decimal; overflow wraps.
pub(super) fn number(cur: &mut Cursor<'_>) -> Option<u32> {
    let digits = many1(cur, |cur| satisfy(cur, is_digit))?;
    Some(digits.into_iter().fold(0u32, |n, d| {
        n.wrapping_mul(10).wrapping_add(d as u32 - '0' as u32)
    }))
}

/// Exact keyword or punctuation.
fn literal(cur: &mut Cursor<'_>, word: &str) -> Option<()> {
    sequence(cur, |cur| {
        for expected in word.chars() {
            satisfy(cur, |ch| ch == expected)?;
        }
        Some(())
    })
}

fn ws(cur: &mut Cursor<'_>) -> Option<()> {
    many(cur, |cur| satisfy(cur, is_space));
    Some(())
}

fn ws1(cur: &mut Cursor<'_>) -> Option<()> {
    many1(cur, |cur| satisfy(cur, is_space)).map(|_| ())
}
