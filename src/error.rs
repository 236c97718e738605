//! Error types and result aliases for fcst.
//!
//! The front-end stages never fail; only the driver layer (configuration,
//! file I/O, CLI) returns errors:
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used throughout the driver

use anyhow::Result as AnyhowResult;

pub type Result<T> = AnyhowResult<T>;
