#![forbid(unsafe_code)]
#![doc = "X25519 and X448 Diffie-Hellman functions from RFC 7748."]

pub(crate) mod curve25519;
pub(crate) mod curve448;

pub mod x25519;
pub mod x448;
