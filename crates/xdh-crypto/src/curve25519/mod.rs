//! Curve25519 primitives backing X25519.
//!
//! Provides field arithmetic over GF(2^255 - 19).

pub(crate) mod field;
