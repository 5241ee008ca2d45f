//! Platform input routing for gearcore
//!
//! Hosts describe controller state as one snapshot per platform. The router
//! turns a snapshot into engine key presses and releases.

pub mod pad;
pub mod router;

pub use pad::{GameGearButtons, MasterSystemButtons, Sg1000Buttons};
pub use router::{apply_input, PlatformInput};
