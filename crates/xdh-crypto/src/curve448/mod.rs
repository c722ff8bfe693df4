//! Curve448 (Goldilocks) primitives backing X448.
//!
//! Provides field arithmetic over GF(2^448 - 2^224 - 1).

pub(crate) mod field;
