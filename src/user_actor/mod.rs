//! User-specific store logic: the entity hooks and the user error type.

pub mod entity;
pub mod error;

pub use error::*;
