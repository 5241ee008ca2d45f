//! Host core lifecycle adapter for gearcore
//!
//! This crate implements the host's core contract on top of an [`Engine`]:
//! ROM loading, per-frame execution, input delivery, save-RAM persistence and
//! save-state snapshots.
//!
//! [`Engine`]: gc_engine::Engine

pub mod adapter;
pub mod host;
pub mod savedata;
pub mod snapshot;

pub use adapter::{CoreAdapter, CoreState};
pub use host::{Host, SoftwareSurface, SurfaceArea};
