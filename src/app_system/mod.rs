//! System orchestration, startup, and shutdown logic.

pub mod config;
pub mod tracing;
pub mod user_system;

pub use self::config::*;
pub use self::tracing::*;
pub use self::user_system::*;
