//! Wiring and lifetime of the running menu: actor startup, per-visit sessions,
//! shutdown and log setup.

mod menu_system;
mod tracing;

pub use self::menu_system::*;
pub use self::tracing::setup_tracing;
