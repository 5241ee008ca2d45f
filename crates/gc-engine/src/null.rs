//! Null engine for testing
//!
//! Deterministic stand-in for a real emulation engine. It performs no CPU or
//! video emulation: each frame advances a xorshift generator mixed with the
//! current key state, and video, audio and cartridge RAM are derived from it.
//! That is enough to tell frames apart, to observe input, and to check that a
//! restored snapshot reproduces the same output.

use crate::{
    Engine, Joypad, Key, KeyInput, RuntimeInfo, AUDIO_SAMPLE_RATE, RESOLUTION_MAX_HEIGHT,
    RESOLUTION_MAX_WIDTH,
};
use gc_core::{EngineError, PixelFormat, Platform, Region};
use std::io::{Read, Write};
use std::path::Path;

const STATE_MAGIC: &[u8; 4] = b"GCNS";
const STATE_VERSION: u8 = 1;
/// Largest accepted cartridge image (4 MiB)
const MAX_ROM_SIZE: usize = 4 * 1024 * 1024;
/// Battery RAM on Game Gear and Master System cartridges
const CARTRIDGE_RAM_SIZE: usize = 0x2000;
const PSG_AMPLITUDE: i16 = 2000;
const FM_AMPLITUDE: i16 = 1200;

/// Deterministic engine with no hardware emulation
pub struct NullEngine {
    loaded: bool,
    platform: Platform,
    region: Region,
    format: PixelFormat,
    rom_checksum: u32,
    ram: Vec<u8>,
    keys: [u8; 2],
    frame_count: u64,
    seed: u32,
    sample_clock: u64,
    ym2413_enabled: bool,
    screen_override: Option<(u32, u32)>,
}

impl NullEngine {
    pub fn new() -> Self {
        Self {
            loaded: false,
            platform: Platform::MasterSystem,
            region: Region::Ntsc,
            format: PixelFormat::Rgb888,
            rom_checksum: 0,
            ram: Vec::new(),
            keys: [0; 2],
            frame_count: 0,
            seed: 1,
            sample_clock: 0,
            ym2413_enabled: false,
            screen_override: None,
        }
    }

    /// Engine reporting the given broadcast region
    pub fn with_region(region: Region) -> Self {
        Self {
            region,
            ..Self::new()
        }
    }

    /// Switch region without reloading, as a region-detecting cartridge would
    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    /// Report a different screen size until the next ROM load, as a mode
    /// change would. Clamped to the largest resolution.
    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        self.screen_override = Some((
            width.min(RESOLUTION_MAX_WIDTH),
            height.min(RESOLUTION_MAX_HEIGHT),
        ));
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn ym2413_enabled(&self) -> bool {
        self.ym2413_enabled
    }

    pub fn color_format(&self) -> PixelFormat {
        self.format
    }

    /// Bitmask of held keys on a controller, bit `n` for `Key` index `n`
    pub fn keys(&self, joypad: Joypad) -> u8 {
        self.keys[joypad.index()]
    }

    fn detect_platform(path: &Path) -> Platform {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("gg") => Platform::GameGear,
            Some("sg") | Some("sc") => Platform::Sg1000,
            _ => Platform::MasterSystem,
        }
    }

    fn screen_size(&self) -> (u32, u32) {
        if let Some(size) = self.screen_override {
            return size;
        }

        match self.platform {
            Platform::GameGear => (160, 144),
            Platform::MasterSystem | Platform::Sg1000 => (256, 192),
        }
    }

    fn step(&mut self) {
        let mut x = self.seed
            ^ ((self.keys[0] as u32) << 8)
            ^ ((self.keys[1] as u32) << 16);
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.seed = if x == 0 { 1 } else { x };
        self.frame_count += 1;
    }

    fn render(&self, frame: &mut [u8]) {
        let (width, height) = self.screen_size();
        let width = width as usize;
        let pixel_count = width * height as usize;
        let base = (self.seed >> 8) as u8;

        for (i, pixel) in frame
            .chunks_exact_mut(self.format.pixel_size())
            .take(pixel_count)
            .enumerate()
        {
            let x = (i % width) as u8;
            let y = (i / width) as u8;
            let v = base.wrapping_add(x) ^ y.wrapping_add(self.frame_count as u8);
            let (r, g, b) = (v, v ^ self.keys[0], v ^ self.keys[1]);

            match self.format {
                PixelFormat::Rgb888 => pixel.copy_from_slice(&[r, g, b]),
                PixelFormat::Rgb565 => {
                    let packed = (((r >> 3) as u16) << 11) | (((g >> 2) as u16) << 5) | (b >> 3) as u16;
                    pixel.copy_from_slice(&packed.to_le_bytes());
                }
            }
        }
    }

    fn mix(&mut self, audio: &mut [i16]) -> usize {
        let frames = (AUDIO_SAMPLE_RATE / self.region.frame_rate() as u32) as u64;
        let count = ((frames * 2) as usize).min(audio.len() & !1);
        let psg_period = 40 + (self.seed & 0x3F) as u64;
        let fm = self.ym2413_enabled && self.platform.supports_fm_audio();

        for (i, pair) in audio[..count].chunks_exact_mut(2).enumerate() {
            let t = self.sample_clock + i as u64;
            let mut sample = if (t / psg_period) % 2 == 0 {
                PSG_AMPLITUDE
            } else {
                -PSG_AMPLITUDE
            };
            if fm && (t / 25) % 2 == 0 {
                sample += FM_AMPLITUDE;
            }
            pair[0] = sample;
            pair[1] = sample;
        }

        self.sample_clock += frames;
        count
    }

    fn encode_state(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(40 + self.ram.len());
        out.extend_from_slice(STATE_MAGIC);
        out.push(STATE_VERSION);
        out.extend_from_slice(&self.rom_checksum.to_le_bytes());
        out.extend_from_slice(&self.frame_count.to_le_bytes());
        out.extend_from_slice(&self.seed.to_le_bytes());
        out.extend_from_slice(&self.sample_clock.to_le_bytes());
        out.extend_from_slice(&self.keys);
        out.extend_from_slice(&(self.ram.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.ram);
        out
    }
}

impl Default for NullEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounds-checked cursor over a snapshot
struct StateReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> StateReader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], EngineError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| EngineError::StateLoad("truncated snapshot".to_string()))?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn u8(&mut self) -> Result<u8, EngineError> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32, EngineError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(buf))
    }

    fn u64(&mut self) -> Result<u64, EngineError> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8)?);
        Ok(u64::from_le_bytes(buf))
    }
}

impl KeyInput for NullEngine {
    fn key_pressed(&mut self, joypad: Joypad, key: Key) {
        self.keys[joypad.index()] |= key.bit();
    }

    fn key_released(&mut self, joypad: Joypad, key: Key) {
        self.keys[joypad.index()] &= !key.bit();
    }
}

impl Engine for NullEngine {
    fn load_rom(&mut self, path: &Path) -> Result<(), EngineError> {
        let rom = std::fs::read(path)?;

        if rom.is_empty() {
            return Err(EngineError::InvalidRom("empty image".to_string()));
        }
        if rom.len() > MAX_ROM_SIZE {
            return Err(EngineError::InvalidRom(format!(
                "image is {} bytes, maximum is {}",
                rom.len(),
                MAX_ROM_SIZE
            )));
        }

        self.platform = Self::detect_platform(path);
        self.screen_override = None;
        self.rom_checksum = rom
            .iter()
            .fold(0x1234_5678u32, |acc, &b| acc.rotate_left(5) ^ b as u32);
        self.ram = match self.platform {
            Platform::Sg1000 => Vec::new(),
            Platform::GameGear | Platform::MasterSystem => vec![0; CARTRIDGE_RAM_SIZE],
        };
        self.keys = [0; 2];
        self.frame_count = 0;
        self.sample_clock = 0;
        self.seed = self.rom_checksum.max(1);
        self.loaded = true;

        tracing::debug!(
            "Null engine loaded {} bytes as {} (ram {} bytes)",
            rom.len(),
            self.platform,
            self.ram.len()
        );
        Ok(())
    }

    fn reset_rom(&mut self) {
        self.keys = [0; 2];
        self.frame_count = 0;
        self.sample_clock = 0;
        self.seed = self.rom_checksum.max(1);
    }

    fn set_color_format(&mut self, format: PixelFormat) {
        self.format = format;
    }

    fn run_to_vblank(&mut self, frame: &mut [u8], audio: &mut [i16]) -> usize {
        if !self.loaded {
            return 0;
        }

        self.step();

        if !self.ram.is_empty() {
            let index = (self.frame_count as usize) % self.ram.len();
            self.ram[index] = self.seed as u8 ^ self.keys[0];
        }

        self.render(frame);
        self.mix(audio)
    }

    fn save_state(&mut self, sink: &mut dyn Write) -> Result<usize, EngineError> {
        if !self.loaded {
            return Err(EngineError::StateSave("no cartridge loaded".to_string()));
        }

        let state = self.encode_state();
        sink.write_all(&state)
            .map_err(|e| EngineError::StateSave(e.to_string()))?;
        Ok(state.len())
    }

    fn load_state(&mut self, source: &mut dyn Read) -> Result<(), EngineError> {
        if !self.loaded {
            return Err(EngineError::StateLoad("no cartridge loaded".to_string()));
        }

        let mut data = Vec::new();
        source.read_to_end(&mut data)?;

        // Parse everything before touching the machine so a bad file changes nothing
        let mut reader = StateReader { data: &data, pos: 0 };
        if reader.take(4)? != STATE_MAGIC {
            return Err(EngineError::StateLoad("bad magic".to_string()));
        }
        let version = reader.u8()?;
        if version != STATE_VERSION {
            return Err(EngineError::StateLoad(format!("unsupported version {}", version)));
        }
        if reader.u32()? != self.rom_checksum {
            return Err(EngineError::StateLoad(
                "snapshot belongs to another cartridge".to_string(),
            ));
        }
        let frame_count = reader.u64()?;
        let seed = reader.u32()?;
        let sample_clock = reader.u64()?;
        let keys = [reader.u8()?, reader.u8()?];
        let ram_len = reader.u32()? as usize;
        if ram_len != self.ram.len() {
            return Err(EngineError::StateLoad(format!(
                "ram size {} does not match cartridge ({})",
                ram_len,
                self.ram.len()
            )));
        }
        let ram = reader.take(ram_len)?;
        if reader.pos != data.len() {
            return Err(EngineError::StateLoad("trailing data".to_string()));
        }

        self.frame_count = frame_count;
        self.seed = seed;
        self.sample_clock = sample_clock;
        self.keys = keys;
        self.ram.copy_from_slice(ram);
        Ok(())
    }

    fn save_ram(&self) -> &[u8] {
        &self.ram
    }

    fn load_save_ram(&mut self, data: &[u8]) {
        self.ram.fill(0);
        let len = data.len().min(self.ram.len());
        self.ram[..len].copy_from_slice(&data[..len]);
    }

    fn runtime_info(&self) -> RuntimeInfo {
        if !self.loaded {
            return RuntimeInfo {
                region: self.region,
                ..RuntimeInfo::default()
            };
        }

        let (screen_width, screen_height) = self.screen_size();
        RuntimeInfo {
            screen_width,
            screen_height,
            region: self.region,
            platform: self.platform,
        }
    }

    fn set_ym2413_enabled(&mut self, enabled: bool) {
        self.ym2413_enabled = enabled;
    }
}
