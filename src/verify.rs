//! Round-trip verification.
//!
//! Positions are character (Unicode scalar value) indices, the same unit the
//! codec preserves.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::PipelineError;

/// Outcome of comparing two texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// The texts are identical.
    Equal,
    /// The texts first differ at this character index.
    DifferAt(usize),
}

impl MatchResult {
    /// Returns `true` for [`MatchResult::Equal`].
    pub fn is_equal(&self) -> bool {
        matches!(self, MatchResult::Equal)
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Equal => f.write_str("equal"),
            MatchResult::DifferAt(index) => write!(f, "first difference at index {}", index),
        }
    }
}

/// Compares `a` and `b` character by character.
///
/// If one is a strict prefix of the other, the divergence index is the
/// shorter length.
///
/// # Examples
///
/// ```
/// use metashift::{compare, MatchResult};
///
/// assert_eq!(compare("abc", "abc"), MatchResult::Equal);
/// assert_eq!(compare("abc", "abd"), MatchResult::DifferAt(2));
/// assert_eq!(compare("ab", "abc"), MatchResult::DifferAt(2));
/// ```
pub fn compare(a: &str, b: &str) -> MatchResult {
    let mut lhs = a.chars();
    let mut rhs = b.chars();
    let mut index = 0usize;
    loop {
        match (lhs.next(), rhs.next()) {
            (None, None) => return MatchResult::Equal,
            (Some(x), Some(y)) if x == y => index += 1,
            _ => return MatchResult::DifferAt(index),
        }
    }
}

/// Reads two UTF-8 files and compares their contents.
///
/// # Errors
/// Returns [`PipelineError::Io`] if either file cannot be read as UTF-8.
pub fn compare_files(a: &Path, b: &Path) -> Result<MatchResult, PipelineError> {
    let lhs = fs::read_to_string(a).map_err(|e| PipelineError::io(a, e))?;
    let rhs = fs::read_to_string(b).map_err(|e| PipelineError::io(b, e))?;
    Ok(compare(&lhs, &rhs))
}
