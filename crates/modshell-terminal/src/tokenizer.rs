//! Line tokenizer.
//!
//! Arguments are runs of non-space characters. Only the space character
//! delimits; tabs and other whitespace are part of an argument. Argument
//! slices borrow from the line, nothing is copied.

use modshell_types::error::{Result, ShellError};

/// Arguments of one line, borrowed from the line buffer.
///
/// Index `len()` is the end marker: `get(len())` is always `None`, and
/// [`Args::terminated`] yields it explicitly after the last argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args<'a> {
    argv: Vec<&'a str>,
}

impl<'a> Args<'a> {
    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.argv.len()
    }

    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }

    /// Argument at `index`, or `None` at and past the end marker.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.argv.get(index).copied()
    }

    pub fn first(&self) -> Option<&'a str> {
        self.get(0)
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.argv
    }

    /// Arguments from `offset` on, clamped to the end marker.
    pub fn from_offset(&self, offset: usize) -> &[&'a str] {
        &self.argv[offset.min(self.argv.len())..]
    }

    /// Every argument followed by the terminating `None`.
    pub fn terminated(&self) -> impl Iterator<Item = Option<&'a str>> + '_ {
        self.argv
            .iter()
            .map(|arg| Some(*arg))
            .chain(std::iter::once(None))
    }
}

/// Split `line` into at most `max_args` space-delimited arguments.
///
/// Leading, trailing, and repeated spaces never produce empty arguments.
/// A line holding more than `max_args` arguments is rejected as a whole.
pub fn tokenize(line: &str, max_args: usize) -> Result<Args<'_>> {
    let mut argv = Vec::new();
    for token in line.split(' ').filter(|t| !t.is_empty()) {
        if argv.len() == max_args {
            return Err(ShellError::TooManyArguments { max: max_args });
        }
        argv.push(token);
    }
    Ok(Args { argv })
}
