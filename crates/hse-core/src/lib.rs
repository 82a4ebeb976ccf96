#![forbid(unsafe_code)]
//! hse-core library.
//!
//! Entity model for the documents exported from the site-management store,
//! plus the ambient pieces every consumer needs: an injectable clock,
//! configuration loading, snapshot loading and a user directory.
//!
//! # Conventions
//!
//! - **Errors**: `HseError` (via `thiserror`) at I/O edges only. Decoding a
//!   document never fails because of a single bad field.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod clock;
pub mod config;
pub mod directory;
pub mod error;
pub mod model;
pub mod snapshot;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{HseConfig, UserConfig};
pub use directory::UserDirectory;
pub use error::{ErrorCode, HseError};
pub use snapshot::Snapshot;
