// This module re-exports important pieces for convenience,
// so we can "use crate::config::*" easily.
#[allow(clippy::module_inception)]
pub mod config;
pub mod error;
pub mod logging;
pub mod settings;
pub mod target;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use settings::*;
pub use target::*;
