//! Alphabet: fixed 26-symbol tables and the cyclic shifter.
//!
//! An [`Alphabet`] is an immutable, ordered table of 26 distinct symbols.
//! The two built-in tables ([`Alphabet::LOWER`] and [`Alphabet::UPPER`]) are
//! built at compile time; custom tables are validated on construction.
//!
//! [`shift`] rotates a symbol's position within an alphabet. Symbols that are
//! not members pass through unchanged.

use crate::error::MetaShiftError;

/// Number of symbols in every alphabet.
pub const ALPHABET_LEN: usize = 26;

/// Ordered table of 26 distinct symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alphabet {
    symbols: [char; ALPHABET_LEN],
}

impl Alphabet {
    /// ASCII lowercase `a..=z`.
    pub const LOWER: Alphabet = Alphabet::ascii_run(b'a');

    /// ASCII uppercase `A..=Z`.
    pub const UPPER: Alphabet = Alphabet::ascii_run(b'A');

    /// Builds an alphabet of 26 consecutive ASCII code points starting at `first`.
    const fn ascii_run(first: u8) -> Self {
        let mut symbols = ['\0'; ALPHABET_LEN];
        let mut i = 0;
        while i < ALPHABET_LEN {
            symbols[i] = (first + i as u8) as char;
            i += 1;
        }
        Alphabet { symbols }
    }

    /// Creates an alphabet from a string of exactly 26 distinct characters.
    ///
    /// # Errors
    /// Returns [`MetaShiftError::InvalidAlphabet`] if the string does not
    /// hold 26 characters or if any character repeats.
    ///
    /// # Examples
    ///
    /// ```
    /// use metashift::Alphabet;
    ///
    /// let rev = Alphabet::new("zyxwvutsrqponmlkjihgfedcba").unwrap();
    /// assert_eq!(rev.index_of('z'), Some(0));
    /// assert!(Alphabet::new("abc").is_err());
    /// ```
    pub fn new(symbols: &str) -> Result<Self, MetaShiftError> {
        let chars: Vec<char> = symbols.chars().collect();
        if chars.len() != ALPHABET_LEN {
            return Err(MetaShiftError::InvalidAlphabet(format!(
                "expected {} symbols, found {}",
                ALPHABET_LEN,
                chars.len()
            )));
        }
        let mut table = ['\0'; ALPHABET_LEN];
        for (i, &c) in chars.iter().enumerate() {
            if table[..i].contains(&c) {
                return Err(MetaShiftError::InvalidAlphabet(format!(
                    "symbol {:?} repeats at position {}",
                    c, i
                )));
            }
            table[i] = c;
        }
        Ok(Alphabet { symbols: table })
    }

    /// Returns the position of `c`, or `None` if it is not a member.
    pub fn index_of(&self, c: char) -> Option<usize> {
        self.symbols.iter().position(|&s| s == c)
    }

    /// Returns `true` if `c` is a member of this alphabet.
    pub fn contains(&self, c: char) -> bool {
        self.index_of(c).is_some()
    }

    /// Returns the symbol at `index` reduced modulo 26.
    pub fn symbol_at(&self, index: usize) -> char {
        self.symbols[index % ALPHABET_LEN]
    }

    /// Returns the symbols in order.
    pub fn symbols(&self) -> &[char; ALPHABET_LEN] {
        &self.symbols
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::LOWER
    }
}

/// Cyclically shifts `c` by `offset` positions within `alphabet`.
///
/// Non-members are returned unchanged. The offset may be any `i64`; it is
/// reduced to a non-negative remainder modulo 26 before use, so
/// `shift(shift(c, k, a), -k, a) == c` for every member `c`.
///
/// # Examples
///
/// ```
/// use metashift::{shift, Alphabet};
///
/// assert_eq!(shift('a', 3, &Alphabet::LOWER), 'd');
/// assert_eq!(shift('A', -3, &Alphabet::UPPER), 'X');
/// assert_eq!(shift('7', 3, &Alphabet::LOWER), '7');
/// ```
pub fn shift(c: char, offset: i64, alphabet: &Alphabet) -> char {
    match alphabet.index_of(c) {
        Some(index) => {
            let n = ALPHABET_LEN as i64;
            let target = (index as i64 + offset.rem_euclid(n)).rem_euclid(n);
            alphabet.symbols[target as usize]
        }
        None => c,
    }
}
