//! Read cursor over query text and single-character matchers.

use std::ops::{Deref, DerefMut};

/// Character cursor with a byte offset into the query text.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move back (or forward) to an offset previously returned by `position`.
    ///
    /// An offset past the end or inside a character leaves nothing to read.
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn remaining(&self) -> &'a str {
        self.source.get(self.pos..).unwrap_or("")
    }

    /// Start an attempt that is rolled back unless committed.
    pub fn checkpoint(&mut self) -> Checkpoint<'_, 'a> {
        Checkpoint {
            start: self.pos,
            cursor: self,
            committed: false,
        }
    }
}

/// Scoped attempt on a cursor.
///
/// Dropping the guard without calling [`Checkpoint::commit`] puts the cursor
/// back where the attempt started.
pub struct Checkpoint<'c, 'a> {
    cursor: &'c mut Cursor<'a>,
    start: usize,
    committed: bool,
}

impl Checkpoint<'_, '_> {
    /// Keep everything consumed since the checkpoint was taken.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl<'a> Deref for Checkpoint<'_, 'a> {
    type Target = Cursor<'a>;

    fn deref(&self) -> &Self::Target {
        self.cursor
    }
}

impl<'a> DerefMut for Checkpoint<'_, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cursor
    }
}

impl Drop for Checkpoint<'_, '_> {
    fn drop(&mut self) {
        if !self.committed {
            self.cursor.set_position(self.start);
        }
    }
}

/// Consume one character if it satisfies `pred`.
pub fn satisfy(cur: &mut Cursor<'_>, pred: impl Fn(char) -> bool) -> Option<char> {
    match cur.peek() {
        Some(ch) if pred(ch) => cur.advance(),
        _ => None,
    }
}

pub fn is_space(ch: char) -> bool {
    ch.is_whitespace()
}

pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Identifier characters: letters and ASCII digits.
///
/// Letter-like numerals (`Ⅻ`) and other numeric symbols (`²`, `½`) are not
/// identifier characters.
pub fn is_ident(ch: char) -> bool {
    (ch.is_alphabetic() && !ch.is_numeric()) || ch.is_ascii_digit()
}

/// Operator token characters.
pub fn is_non_space(ch: char) -> bool {
    !ch.is_whitespace()
}
