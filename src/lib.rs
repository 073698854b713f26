//! MetaShift: reversible partition-based shift cipher with per-character metadata.
//!
//! Every character of the plaintext is classified into one of five classes
//! (lowercase `a-m`, lowercase `n-z`, uppercase `A-M`, uppercase `N-Z`, or
//! anything else) and shifted cyclically by an offset derived from two
//! integer parameters. A parallel metadata stream records the class tag of
//! each character, so decoding applies the exact inverse without having to
//! reclassify.
//!
//! The scheme is a teaching cipher. It offers no confidentiality.
//!
//! # Architecture
//!
//! ```text
//! Alphabet / shift   (26-symbol table + modular rotation)
//!     ↓
//! Partition / CharClass   (classification, tag symbols 0..=4)
//!     ↓
//! MetaShift   (encode → Encoded { ciphertext, metadata }, decode)
//!     ↓
//! compare   (first divergence index)
//!     ↓
//! pipeline   (file artifacts: raw, encrypted, .meta, decrypted)
//! ```
//!
//! # Examples
//!
//! Encode, decode and verify:
//!
//! ```
//! use metashift::{compare, decode, encode, MatchResult};
//!
//! let encoded = encode("Abc123", 3, 5);
//! assert_eq!(encoded.ciphertext, "Xqr123");
//! assert_eq!(encoded.metadata, "311000");
//!
//! let plain = decode(&encoded.ciphertext, &encoded.metadata, 3, 5).unwrap();
//! assert_eq!(compare("Abc123", &plain), MatchResult::Equal);
//! ```
//!
//! Corrupted metadata is rejected:
//!
//! ```
//! use metashift::{decode, MetaShiftError};
//!
//! let err = decode("Xqr123", "311009", 3, 5).unwrap_err();
//! assert_eq!(err, MetaShiftError::InvalidMetadataSymbol { index: 5, symbol: '9' });
//! ```

#![deny(clippy::all)]

pub mod error;

pub mod alphabet;
pub mod cipher;
pub mod class;
pub mod config;
pub mod pipeline;
pub mod utils;
pub mod verify;

pub use alphabet::{shift, Alphabet};
pub use cipher::{decode, encode, Encoded, MetaShift, Offsets, ShiftKey};
pub use class::{classify, CharClass, Partition};
pub use config::PipelineConfig;
pub use error::{MetaShiftError, PipelineError};
pub use verify::{compare, MatchResult};
