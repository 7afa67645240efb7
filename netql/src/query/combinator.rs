//! Generic parser combinators.
//!
//! A parser is any `FnMut(&mut Cursor) -> Option<T>`: `Some` on a match,
//! `None` on failure. Every combinator here leaves the cursor untouched when
//! it fails, so a failed alternative never leaks partially consumed input.

use super::cursor::Cursor;

/// Run `p` as a single unit: all of it matches, or the cursor is restored.
///
/// Composite rules are written as closures using `?` on each step; the
/// returned value (often a tuple) is the ordered result of the steps.
pub fn sequence<'a, T>(
    cur: &mut Cursor<'a>,
    p: impl FnOnce(&mut Cursor<'a>) -> Option<T>,
) -> Option<T> {
    let mut cp = cur.checkpoint();
    let out = p(&mut *cp)?;
    cp.commit();
    Some(out)
}

/// Apply `p` until it fails. Always succeeds.
pub fn many<'a, T>(
    cur: &mut Cursor<'a>,
    mut p: impl FnMut(&mut Cursor<'a>) -> Option<T>,
) -> Vec<T> {
    let mut out = Vec::new();
    loop {
        let start = cur.position();
        match sequence(cur, &mut p) {
            Some(v) => out.push(v),
            None => break,
        }
        // zero-width match would repeat forever
        if cur.position() == start {
            break;
        }
    }
    out
}

/// Apply `p` one or more times.
pub fn many1<'a, T>(
    cur: &mut Cursor<'a>,
    p: impl FnMut(&mut Cursor<'a>) -> Option<T>,
) -> Option<Vec<T>> {
    let out = many(cur, p);
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Try `p`; a failure yields `None` without consuming input.
///
/// The outer `Option` is the combinator's own result and is always `Some`,
/// so callers can use `?` uniformly inside a [`sequence`].
pub fn optional<'a, T>(
    cur: &mut Cursor<'a>,
    p: impl FnOnce(&mut Cursor<'a>) -> Option<T>,
) -> Option<Option<T>> {
    Some(sequence(cur, p))
}
