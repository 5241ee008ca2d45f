//! Platform, region and pixel format vocabulary

use serde::{Deserialize, Serialize};

/// Hardware family a core is running as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// Sega Game Gear (handheld)
    GameGear,
    /// Sega Master System / Mark III (home console)
    MasterSystem,
    /// Sega SG-1000 (earlier-generation console)
    Sg1000,
}

impl Platform {
    /// Whether cartridges for this platform can drive the YM2413 FM unit.
    pub fn supports_fm_audio(self) -> bool {
        matches!(self, Platform::MasterSystem)
    }

    pub fn name(self) -> &'static str {
        match self {
            Platform::GameGear => "Game Gear",
            Platform::MasterSystem => "Master System",
            Platform::Sg1000 => "SG-1000",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Broadcast standard reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Region {
    #[default]
    Ntsc,
    Pal,
}

impl Region {
    /// Display refresh rate in frames per second
    pub fn frame_rate(self) -> f64 {
        match self {
            Region::Ntsc => 60.0,
            Region::Pal => 50.0,
        }
    }

    /// Width of one emulated pixel relative to its height
    pub fn pixel_aspect_ratio(self) -> f64 {
        match self {
            Region::Ntsc => 8.0 / 7.0,
            Region::Pal => 2_950_000.0 / 2_128_137.0,
        }
    }
}

/// Framebuffer pixel layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 24-bit packed R, G, B
    Rgb888,
    /// 16-bit little-endian 5:6:5
    Rgb565,
}

impl PixelFormat {
    /// Bytes occupied by one pixel
    pub fn pixel_size(self) -> usize {
        match self {
            PixelFormat::Rgb888 => 3,
            PixelFormat::Rgb565 => 2,
        }
    }
}
