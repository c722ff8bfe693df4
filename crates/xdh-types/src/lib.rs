#![forbid(unsafe_code)]
#![doc = "Common types and error codes for the xdh workspace."]

pub mod error;

pub use error::*;
