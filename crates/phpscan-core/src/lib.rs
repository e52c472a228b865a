//! phpscan Core - Foundation types and error handling
//!
//! This crate provides the types shared by every phpscan crate:
//! - `Finding`: a configuration setting that deviates from a baseline rule
//! - `CompareValue`: the numeric-or-text form values take after normalization
//! - `Error` / `Result`: the error taxonomy

pub mod error;
pub mod finding;
pub mod value;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use finding::Finding;
pub use value::{CompareValue, EMPTY, NOT_SET};
