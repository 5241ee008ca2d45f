//! Shared fixtures for adapter tests

#![allow(dead_code)]

use gc_core::Platform;
use gc_engine::NullEngine;
use gc_integration::{CoreAdapter, Host};
use std::path::PathBuf;
use tempfile::TempDir;

/// Host that keeps every audio block it is handed
pub struct RecordingHost {
    pub platform: Platform,
    pub sample_blocks: Vec<Vec<i16>>,
    pub surfaces_created: usize,
}

impl RecordingHost {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            sample_blocks: Vec::new(),
            surfaces_created: 0,
        }
    }
}

impl Host for RecordingHost {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn create_surface(
        &mut self,
        max_width: u32,
        max_height: u32,
        format: gc_core::PixelFormat,
    ) -> gc_integration::SoftwareSurface {
        self.surfaces_created += 1;
        gc_integration::SoftwareSurface::new(max_width, max_height, format)
    }

    fn play_samples(&mut self, samples: &[i16]) {
        self.sample_blocks.push(samples.to_vec());
    }
}

pub type TestCore = CoreAdapter<NullEngine, RecordingHost>;

pub fn core(platform: Platform) -> TestCore {
    CoreAdapter::new(NullEngine::new(), RecordingHost::new(platform))
}

/// Write a ROM image whose extension selects the detected platform.
///
/// The file name is stamped into the header, so differently named ROMs are different cartridges.
pub fn write_rom(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut rom: Vec<u8> = (0..0x8000usize).map(|i| (i * 31 + 7) as u8).collect();
    rom[..name.len()].copy_from_slice(name.as_bytes());
    std::fs::write(&path, rom).expect("Failed to write ROM");
    path
}

/// Load `rom_name` into a fresh core, saving to `game.sav` in the same directory
pub fn loaded_core(dir: &TempDir, platform: Platform, rom_name: &str) -> TestCore {
    let mut core = core(platform);
    let rom = write_rom(dir, rom_name);
    core.load(&[rom], dir.path().join("game.sav"))
        .expect("Failed to load ROM");
    core
}

/// Framebuffer bytes after the last frame
pub fn frame_bytes(core: &TestCore) -> Vec<u8> {
    core.surface()
        .expect("no surface")
        .visible_bytes()
        .to_vec()
}
