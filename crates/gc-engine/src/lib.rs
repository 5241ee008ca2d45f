//! Emulation engine interface for gearcore
//!
//! The adapter drives any engine through the [`Engine`] trait. The engine owns
//! all emulated state: CPU, VDP, PSG, cartridge mapper and battery RAM. This
//! crate also ships [`NullEngine`], a deterministic stand-in used by tests and
//! headless hosts.

pub mod null;

use gc_core::{EngineError, PixelFormat, Platform, Region};
use std::io::{Read, Write};
use std::path::Path;

pub use null::NullEngine;

/// Widest screen the engine can produce
pub const RESOLUTION_MAX_WIDTH: u32 = 256;
/// Tallest screen the engine can produce
pub const RESOLUTION_MAX_HEIGHT: u32 = 224;
/// Output sample rate in Hz
pub const AUDIO_SAMPLE_RATE: u32 = 44100;
/// Upper bound of interleaved stereo samples produced by one frame
pub const AUDIO_BUFFER_SIZE: usize = 4096;

/// Controller port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joypad {
    One,
    Two,
}

impl Joypad {
    /// Port for a zero-based host port index
    pub fn from_port(port: usize) -> Self {
        if port == 0 {
            Joypad::One
        } else {
            Joypad::Two
        }
    }

    pub fn index(self) -> usize {
        match self {
            Joypad::One => 0,
            Joypad::Two => 1,
        }
    }
}

/// Engine key set, shared by every controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Key {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
    One = 4,
    Two = 5,
    Start = 6,
}

impl Key {
    pub const ALL: [Key; 7] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::One,
        Key::Two,
        Key::Start,
    ];

    /// Key at a host button index, if the engine has one
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Metadata describing what the engine is currently producing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub screen_width: u32,
    pub screen_height: u32,
    pub region: Region,
    /// Hardware family detected from the loaded cartridge
    pub platform: Platform,
}

impl Default for RuntimeInfo {
    fn default() -> Self {
        Self {
            screen_width: 256,
            screen_height: 192,
            region: Region::Ntsc,
            platform: Platform::MasterSystem,
        }
    }
}

/// Controller input accepted by an engine
pub trait KeyInput {
    fn key_pressed(&mut self, joypad: Joypad, key: Key);

    fn key_released(&mut self, joypad: Joypad, key: Key);
}

/// Emulation engine driven by the core adapter
pub trait Engine: KeyInput {
    /// Load and power on a cartridge image
    fn load_rom(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Soft reset of the loaded cartridge
    fn reset_rom(&mut self);

    /// Select the layout `run_to_vblank` writes pixels in
    fn set_color_format(&mut self, format: PixelFormat);

    /// Emulate until the next vertical blank.
    ///
    /// Writes `screen_width * screen_height` pixels, row stride
    /// `screen_width * pixel_size`, to `frame`, and up to `audio.len()`
    /// interleaved stereo samples to `audio`. Returns the number of samples written.
    fn run_to_vblank(&mut self, frame: &mut [u8], audio: &mut [i16]) -> usize;

    /// Serialize the full machine state to `sink`, returning the bytes written
    fn save_state(&mut self, sink: &mut dyn Write) -> Result<usize, EngineError>;

    /// Replace the machine state with a snapshot read from `source`
    fn load_state(&mut self, source: &mut dyn Read) -> Result<(), EngineError>;

    /// Battery-backed cartridge RAM; empty when the cartridge has none
    fn save_ram(&self) -> &[u8];

    /// Overwrite cartridge RAM. An empty slice clears it.
    fn load_save_ram(&mut self, data: &[u8]);

    fn runtime_info(&self) -> RuntimeInfo;

    /// Enable or mute the YM2413 FM chip in the audio mixer
    fn set_ym2413_enabled(&mut self, enabled: bool);
}
