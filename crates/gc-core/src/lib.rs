//! Core types for the gearcore emulation adapter
//!
//! This crate provides the foundational types, error handling,
//! configuration, and logging infrastructure shared by the engine,
//! input and integration crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod platform;

pub use config::Config;
pub use error::{CoreError, CoreErrorKind, EngineError, Result};
pub use platform::{PixelFormat, Platform, Region};
