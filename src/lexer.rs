//! Splitting a line into an argument vector.

use crate::error::Result;

/// Characters that separate tokens: space, tab, carriage return, newline, bell.
pub const TOKEN_DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

/// Initial capacity and growth increment of the token list.
pub const TOKEN_BUFSIZE: usize = 64;

/// Ordered tokens of one command line, borrowed from the line they came from.
///
/// Index 0 is the command name. The vector cannot outlive its line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentVector<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> ArgumentVector<'a> {
    /// The command name, or `None` when the line held no tokens.
    pub fn command(&self) -> Option<&'a str> {
        self.tokens.first().copied()
    }

    /// Token at `index`; `None` past the last token.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens after the command name.
    pub fn args(&self) -> &[&'a str] {
        self.tokens.get(1..).unwrap_or(&[])
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.tokens
    }
}

fn is_delimiter(c: char) -> bool {
    TOKEN_DELIMITERS.contains(&c)
}

/// Split `line` on runs of [`TOKEN_DELIMITERS`].
///
/// Consecutive delimiters never produce empty tokens, and a line made only of
/// delimiters produces an empty vector.
pub fn split_line(line: &str) -> Result<ArgumentVector<'_>> {
    let mut tokens: Vec<&str> = Vec::new();
    tokens.try_reserve_exact(TOKEN_BUFSIZE)?;

    for token in line.split(is_delimiter).filter(|t| !t.is_empty()) {
        if tokens.len() == tokens.capacity() {
            tokens.try_reserve_exact(TOKEN_BUFSIZE)?;
        }
        tokens.push(token);
    }

    Ok(ArgumentVector { tokens })
}
