//! MetaShift: the partition-driven shift cipher.
//!
//! Encoding classifies every character, shifts it by the offset its class
//! prescribes and records the class tag in a parallel metadata stream.
//! Decoding walks ciphertext and metadata in lockstep and applies the
//! inverse offset named by each tag, so the plaintext's classes never need
//! to be recomputed.
//!
//! | Class             | Forward offset    | Alphabet  | Tag |
//! |-------------------|-------------------|-----------|-----|
//! | `LowerFirstHalf`  | `+shift1*shift2`  | lowercase | `1` |
//! | `LowerSecondHalf` | `-(shift1+shift2)`| lowercase | `2` |
//! | `UpperFirstHalf`  | `-shift1`         | uppercase | `3` |
//! | `UpperSecondHalf` | `+shift2²`        | uppercase | `4` |
//! | `Unchanged`       | none              | n/a       | `0` |

use crate::alphabet::{shift, ALPHABET_LEN};
use crate::class::{CharClass, Partition};
use crate::error::MetaShiftError;

/// The two caller-supplied shift parameters.
///
/// Any `i64` values are accepted. The same pair must be used to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ShiftKey {
    /// First shift parameter.
    pub shift1: i64,
    /// Second shift parameter.
    pub shift2: i64,
}

impl ShiftKey {
    /// Creates a key from two shift parameters.
    pub fn new(shift1: i64, shift2: i64) -> Self {
        ShiftKey { shift1, shift2 }
    }

    /// Derives the per-class offsets for this key.
    pub fn offsets(&self) -> Offsets {
        Offsets::derive(self.shift1, self.shift2)
    }
}

/// Per-call derived offsets, each reduced to `0..26`.
///
/// Reducing before multiplying keeps `k1` and `k3` exact for any `i64`
/// inputs; the result is congruent to the unreduced products modulo 26.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offsets {
    /// `shift1 * shift2`.
    pub k1: i64,
    /// `shift1 + shift2`.
    pub k2: i64,
    /// `shift2²`.
    pub k3: i64,
    /// `shift1`.
    pub s1: i64,
}

impl Offsets {
    fn derive(shift1: i64, shift2: i64) -> Self {
        let n = ALPHABET_LEN as i64;
        let a = shift1.rem_euclid(n);
        let b = shift2.rem_euclid(n);
        Offsets {
            k1: (a * b) % n,
            k2: (a + b) % n,
            k3: (b * b) % n,
            s1: a,
        }
    }

    /// Returns the offset applied to a character of `class` while encoding.
    pub fn forward(&self, class: CharClass) -> i64 {
        match class {
            CharClass::Unchanged => 0,
            CharClass::LowerFirstHalf => self.k1,
            CharClass::LowerSecondHalf => -self.k2,
            CharClass::UpperFirstHalf => -self.s1,
            CharClass::UpperSecondHalf => self.k3,
        }
    }

    /// Returns the offset that undoes [`forward`](Self::forward).
    pub fn inverse(&self, class: CharClass) -> i64 {
        -self.forward(class)
    }
}

/// Ciphertext and its parallel metadata stream.
///
/// Both strings hold exactly as many characters as the plaintext.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoded {
    /// Transformed text.
    pub ciphertext: String,
    /// One tag symbol (`'0'..='4'`) per ciphertext character.
    pub metadata: String,
}

impl Encoded {
    /// Counts metadata tags per class, indexed by tag value.
    pub fn class_counts(&self) -> [usize; 5] {
        let mut counts = [0usize; 5];
        for class in self.metadata.chars().filter_map(CharClass::from_tag) {
            counts[class.index()] += 1;
        }
        counts
    }
}

/// Codec bound to a partition and a key.
///
/// Holds no mutable state; one instance may encode and decode any number
/// of texts, from any number of threads.
///
/// # Examples
///
/// ```
/// use metashift::{MetaShift, ShiftKey};
///
/// let codec = MetaShift::new(ShiftKey::new(3, 5));
/// let encoded = codec.encode("Abc123");
/// assert_eq!(encoded.ciphertext, "Xqr123");
/// assert_eq!(encoded.metadata, "311000");
///
/// let plain = codec.decode(&encoded.ciphertext, &encoded.metadata).unwrap();
/// assert_eq!(plain, "Abc123");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetaShift {
    partition: Partition,
    key: ShiftKey,
}

impl MetaShift {
    /// Creates a codec over the ASCII partition.
    pub fn new(key: ShiftKey) -> Self {
        Self::with_partition(Partition::ASCII, key)
    }

    /// Creates a codec over a custom partition.
    pub fn with_partition(partition: Partition, key: ShiftKey) -> Self {
        MetaShift { partition, key }
    }

    /// The key this codec was built with.
    pub fn key(&self) -> ShiftKey {
        self.key
    }

    /// The partition this codec classifies against.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Encodes `text`, returning ciphertext and metadata. Never fails.
    pub fn encode(&self, text: &str) -> Encoded {
        let offsets = self.key.offsets();
        let mut ciphertext = String::with_capacity(text.len());
        let mut metadata = String::with_capacity(text.len());

        for c in text.chars() {
            let class = self.partition.classify(c);
            let out = match self.partition.alphabet_for(class) {
                Some(alphabet) => shift(c, offsets.forward(class), alphabet),
                None => c,
            };
            ciphertext.push(out);
            metadata.push(class.tag());
        }

        Encoded {
            ciphertext,
            metadata,
        }
    }

    /// Decodes `ciphertext` using its `metadata` stream.
    ///
    /// # Errors
    /// - [`MetaShiftError::LengthMismatch`] if the two inputs differ in
    ///   character count. Checked before any character is decoded.
    /// - [`MetaShiftError::InvalidMetadataSymbol`] on the first symbol
    ///   outside `'0'..='4'`.
    pub fn decode(&self, ciphertext: &str, metadata: &str) -> Result<String, MetaShiftError> {
        let cipher_len = ciphertext.chars().count();
        let meta_len = metadata.chars().count();
        if cipher_len != meta_len {
            return Err(MetaShiftError::LengthMismatch {
                ciphertext: cipher_len,
                metadata: meta_len,
            });
        }

        let offsets = self.key.offsets();
        let mut plaintext = String::with_capacity(ciphertext.len());

        for (index, (c, symbol)) in ciphertext.chars().zip(metadata.chars()).enumerate() {
            let class = CharClass::from_tag(symbol)
                .ok_or(MetaShiftError::InvalidMetadataSymbol { index, symbol })?;
            let out = match self.partition.alphabet_for(class) {
                Some(alphabet) => shift(c, offsets.inverse(class), alphabet),
                None => c,
            };
            plaintext.push(out);
        }

        Ok(plaintext)
    }
}

/// Encodes `text` over the ASCII partition.
///
/// # Examples
///
/// ```
/// let encoded = metashift::encode("Abc123", 3, 5);
/// assert_eq!(encoded.ciphertext, "Xqr123");
/// assert_eq!(encoded.metadata, "311000");
/// ```
pub fn encode(text: &str, shift1: i64, shift2: i64) -> Encoded {
    MetaShift::new(ShiftKey::new(shift1, shift2)).encode(text)
}

/// Decodes `ciphertext` over the ASCII partition.
///
/// # Errors
/// See [`MetaShift::decode`].
///
/// # Examples
///
/// ```
/// let plain = metashift::decode("Xqr123", "311000", 3, 5).unwrap();
/// assert_eq!(plain, "Abc123");
///
/// assert!(metashift::decode("Xqr123", "3100", 3, 5).is_err());
/// ```
pub fn decode(
    ciphertext: &str,
    metadata: &str,
    shift1: i64,
    shift2: i64,
) -> Result<String, MetaShiftError> {
    MetaShift::new(ShiftKey::new(shift1, shift2)).decode(ciphertext, metadata)
}
