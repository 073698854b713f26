//! Helpers for the I/O layer around the codec.

pub mod shift_input;
