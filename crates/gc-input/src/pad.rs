//! Controller button sets per platform

use bitflags::bitflags;

/// Buttons on the Game Gear
pub const GAME_GEAR_N_BUTTONS: usize = 7;
/// Buttons on each Master System control pad
pub const MASTER_SYSTEM_N_BUTTONS: usize = 6;
/// Buttons on each SG-1000 joypad
pub const SG1000_N_BUTTONS: usize = 6;
/// Controller ports on the home consoles
pub const N_PORTS: usize = 2;

bitflags! {
    /// Game Gear button mask, bit order matches the engine key set
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GameGearButtons: u32 {
        const UP    = 1 << 0;
        const DOWN  = 1 << 1;
        const LEFT  = 1 << 2;
        const RIGHT = 1 << 3;
        const I     = 1 << 4;
        const II    = 1 << 5;
        const START = 1 << 6;
    }
}

bitflags! {
    /// Master System control pad mask
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MasterSystemButtons: u32 {
        const UP    = 1 << 0;
        const DOWN  = 1 << 1;
        const LEFT  = 1 << 2;
        const RIGHT = 1 << 3;
        const ONE   = 1 << 4;
        const TWO   = 1 << 5;
    }
}

bitflags! {
    /// SG-1000 joypad mask
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Sg1000Buttons: u32 {
        const UP    = 1 << 0;
        const DOWN  = 1 << 1;
        const LEFT  = 1 << 2;
        const RIGHT = 1 << 3;
        const ONE   = 1 << 4;
        const TWO   = 1 << 5;
    }
}
