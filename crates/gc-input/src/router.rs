//! Snapshot to engine key routing
//!
//! Input is level-triggered: every button of every port is written on every
//! call, as a press when its bit is set and a release otherwise. The engine's
//! key state therefore always equals the latest snapshot, even if an earlier
//! event was lost or the snapshot did not change.

use crate::pad::{
    GameGearButtons, MasterSystemButtons, Sg1000Buttons, GAME_GEAR_N_BUTTONS,
    MASTER_SYSTEM_N_BUTTONS, N_PORTS, SG1000_N_BUTTONS,
};
use gc_core::Platform;
use gc_engine::{Joypad, Key, KeyInput};

/// Controller snapshot for one host frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformInput {
    /// Single built-in controller
    GameGear { buttons: u32 },
    /// Two control pads plus the console's pause button
    MasterSystem {
        pad_buttons: [u32; N_PORTS],
        pause: bool,
    },
    /// Two joypads plus the console's pause button
    Sg1000 {
        pad_buttons: [u32; N_PORTS],
        pause: bool,
    },
}

impl PlatformInput {
    pub fn game_gear(buttons: GameGearButtons) -> Self {
        Self::GameGear {
            buttons: buttons.bits(),
        }
    }

    pub fn master_system(pads: [MasterSystemButtons; N_PORTS], pause: bool) -> Self {
        Self::MasterSystem {
            pad_buttons: pads.map(|p| p.bits()),
            pause,
        }
    }

    pub fn sg1000(pads: [Sg1000Buttons; N_PORTS], pause: bool) -> Self {
        Self::Sg1000 {
            pad_buttons: pads.map(|p| p.bits()),
            pause,
        }
    }

    /// Platform this snapshot was taken for
    pub fn platform(&self) -> Platform {
        match self {
            Self::GameGear { .. } => Platform::GameGear,
            Self::MasterSystem { .. } => Platform::MasterSystem,
            Self::Sg1000 { .. } => Platform::Sg1000,
        }
    }

    /// Buttons per controller on this platform
    pub fn button_count(&self) -> usize {
        match self {
            Self::GameGear { .. } => GAME_GEAR_N_BUTTONS,
            Self::MasterSystem { .. } => MASTER_SYSTEM_N_BUTTONS,
            Self::Sg1000 { .. } => SG1000_N_BUTTONS,
        }
    }
}

/// Write one controller's mask to the engine
fn apply_mask<K: KeyInput + ?Sized>(engine: &mut K, joypad: Joypad, mask: u32, n_buttons: usize) {
    if mask >> n_buttons != 0 {
        tracing::trace!("Ignoring unmapped buttons {:#x} on {:?}", mask >> n_buttons, joypad);
    }

    for index in 0..n_buttons {
        let Some(key) = Key::from_index(index) else {
            break;
        };

        if mask & (1 << index) != 0 {
            engine.key_pressed(joypad, key);
        } else {
            engine.key_released(joypad, key);
        }
    }
}

/// Pause is wired to Start on the first controller, whichever port is in use
fn apply_pause<K: KeyInput + ?Sized>(engine: &mut K, pause: bool) {
    if pause {
        engine.key_pressed(Joypad::One, Key::Start);
    } else {
        engine.key_released(Joypad::One, Key::Start);
    }
}

/// Drive the engine's key state from a snapshot
pub fn apply_input<K: KeyInput + ?Sized>(engine: &mut K, input: &PlatformInput) {
    let n_buttons = input.button_count();

    match *input {
        PlatformInput::GameGear { buttons } => {
            apply_mask(engine, Joypad::One, buttons, n_buttons);
        }
        PlatformInput::MasterSystem { pad_buttons, pause }
        | PlatformInput::Sg1000 { pad_buttons, pause } => {
            for (port, &mask) in pad_buttons.iter().enumerate() {
                apply_mask(engine, Joypad::from_port(port), mask, n_buttons);
            }
            apply_pause(engine, pause);
        }
    }
}
