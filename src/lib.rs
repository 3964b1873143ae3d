//! NovaLib inventory library
//!
//! Owns the book collection, persists it through a key-value backend after
//! every change, and derives the filtered list and counts the front end shows.

pub mod modules;

/// Re-export commonly used types
pub use modules::books::*;
pub use novalib_storage as storage;
