//! Character classification into the five transform classes.
//!
//! A [`Partition`] pairs a lowercase and an uppercase [`Alphabet`] and splits
//! each into a first half (positions 0..13) and a second half (13..26).
//! Every character falls into exactly one [`CharClass`]; characters in neither
//! alphabet are [`CharClass::Unchanged`].

use std::fmt;

use crate::alphabet::{Alphabet, ALPHABET_LEN};
use crate::error::MetaShiftError;

/// Split point between the first and second half of an alphabet.
pub const HALF: usize = ALPHABET_LEN / 2;

/// The transform rule applied to a single character.
///
/// The discriminant is the metadata tag value written for the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharClass {
    /// Not a member of either alphabet; passed through.
    Unchanged = 0,
    /// Lowercase, positions 0..13 (`a..=m`).
    LowerFirstHalf = 1,
    /// Lowercase, positions 13..26 (`n..=z`).
    LowerSecondHalf = 2,
    /// Uppercase, positions 0..13 (`A..=M`).
    UpperFirstHalf = 3,
    /// Uppercase, positions 13..26 (`N..=Z`).
    UpperSecondHalf = 4,
}

impl CharClass {
    /// All classes in tag order.
    pub const ALL: [CharClass; 5] = [
        CharClass::Unchanged,
        CharClass::LowerFirstHalf,
        CharClass::LowerSecondHalf,
        CharClass::UpperFirstHalf,
        CharClass::UpperSecondHalf,
    ];

    /// Returns the metadata symbol (`'0'..='4'`) for this class.
    pub fn tag(self) -> char {
        (b'0' + self as u8) as char
    }

    /// Parses a metadata symbol. Returns `None` for anything outside `'0'..='4'`.
    pub fn from_tag(symbol: char) -> Option<CharClass> {
        match symbol {
            '0' => Some(CharClass::Unchanged),
            '1' => Some(CharClass::LowerFirstHalf),
            '2' => Some(CharClass::LowerSecondHalf),
            '3' => Some(CharClass::UpperFirstHalf),
            '4' => Some(CharClass::UpperSecondHalf),
            _ => None,
        }
    }

    /// Returns the tag value as an index `0..5`.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharClass::Unchanged => "unchanged",
            CharClass::LowerFirstHalf => "lower a-m",
            CharClass::LowerSecondHalf => "lower n-z",
            CharClass::UpperFirstHalf => "upper A-M",
            CharClass::UpperSecondHalf => "upper N-Z",
        };
        f.write_str(name)
    }
}

/// A lowercase/uppercase alphabet pair split into halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    lower: Alphabet,
    upper: Alphabet,
}

impl Partition {
    /// ASCII `a..=z` / `A..=Z`.
    pub const ASCII: Partition = Partition {
        lower: Alphabet::LOWER,
        upper: Alphabet::UPPER,
    };

    /// Creates a partition from two alphabets.
    ///
    /// # Errors
    /// Returns [`MetaShiftError::InvalidAlphabet`] if the alphabets share a symbol.
    pub fn new(lower: Alphabet, upper: Alphabet) -> Result<Self, MetaShiftError> {
        if let Some(&c) = lower.symbols().iter().find(|&&c| upper.contains(c)) {
            return Err(MetaShiftError::InvalidAlphabet(format!(
                "symbol {:?} appears in both alphabets",
                c
            )));
        }
        Ok(Partition { lower, upper })
    }

    /// The lowercase alphabet.
    pub fn lower(&self) -> &Alphabet {
        &self.lower
    }

    /// The uppercase alphabet.
    pub fn upper(&self) -> &Alphabet {
        &self.upper
    }

    /// Returns the alphabet a class shifts within, or `None` for `Unchanged`.
    pub fn alphabet_for(&self, class: CharClass) -> Option<&Alphabet> {
        match class {
            CharClass::Unchanged => None,
            CharClass::LowerFirstHalf | CharClass::LowerSecondHalf => Some(&self.lower),
            CharClass::UpperFirstHalf | CharClass::UpperSecondHalf => Some(&self.upper),
        }
    }

    /// Classifies `c`. First match wins: lower first half, lower second
    /// half, upper first half, upper second half, else unchanged.
    pub fn classify(&self, c: char) -> CharClass {
        if let Some(i) = self.lower.index_of(c) {
            if i < HALF {
                CharClass::LowerFirstHalf
            } else {
                CharClass::LowerSecondHalf
            }
        } else if let Some(i) = self.upper.index_of(c) {
            if i < HALF {
                CharClass::UpperFirstHalf
            } else {
                CharClass::UpperSecondHalf
            }
        } else {
            CharClass::Unchanged
        }
    }
}

impl Default for Partition {
    fn default() -> Self {
        Partition::ASCII
    }
}

/// Classifies `c` against the ASCII partition.
///
/// # Examples
///
/// ```
/// use metashift::{classify, CharClass};
///
/// assert_eq!(classify('b'), CharClass::LowerFirstHalf);
/// assert_eq!(classify('Q'), CharClass::UpperSecondHalf);
/// assert_eq!(classify('?'), CharClass::Unchanged);
/// ```
pub fn classify(c: char) -> CharClass {
    Partition::ASCII.classify(c)
}
