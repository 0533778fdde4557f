//!
//! Logger of the system.
//!

pub use tracing::{debug, error, event as log, info, trace, warn, Level};

pub mod config;
pub mod setup;

pub use self::{
    config::{Api, ApiEnvironment, Config, EnvError, Log, LogConsole, LogFormat, LogLevel},
    setup::{setup, LogGuard},
};
