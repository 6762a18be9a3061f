//! Startup and shutdown of the collection actors, plus logging setup.

pub mod resource_system;
pub mod tracing;

pub use resource_system::{ResourceSystem, ShutdownError};
pub use self::tracing::setup_tracing;
