//! Host side of the core contract
//!
//! The host decides which platform a core runs as, supplies the software
//! rendering surface and consumes audio.

use gc_core::{PixelFormat, Platform};

/// Visible region of a surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceArea {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// CPU-side framebuffer the engine renders into
#[derive(Debug, Clone)]
pub struct SoftwareSurface {
    framebuffer: Vec<u8>,
    max_width: u32,
    max_height: u32,
    format: PixelFormat,
    area: SurfaceArea,
    row_stride: usize,
}

impl SoftwareSurface {
    /// Allocate a zeroed surface able to hold `max_width * max_height` pixels
    pub fn new(max_width: u32, max_height: u32, format: PixelFormat) -> Self {
        let row_stride = max_width as usize * format.pixel_size();
        Self {
            framebuffer: vec![0; row_stride * max_height as usize],
            max_width,
            max_height,
            format,
            area: SurfaceArea {
                x: 0,
                y: 0,
                width: max_width,
                height: max_height,
            },
            row_stride,
        }
    }

    pub fn framebuffer(&self) -> &[u8] {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut [u8] {
        &mut self.framebuffer
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.format
    }

    pub fn max_size(&self) -> (u32, u32) {
        (self.max_width, self.max_height)
    }

    pub fn area(&self) -> SurfaceArea {
        self.area
    }

    pub fn set_area(&mut self, area: SurfaceArea) {
        self.area = area;
    }

    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    pub fn set_row_stride(&mut self, row_stride: usize) {
        self.row_stride = row_stride;
    }

    /// Bytes covering the visible area, starting at the area origin
    pub fn visible_bytes(&self) -> &[u8] {
        let start = self.area.y as usize * self.row_stride
            + self.area.x as usize * self.format.pixel_size();
        let len = self.area.height as usize * self.row_stride;
        let end = (start + len).min(self.framebuffer.len());
        &self.framebuffer[start.min(end)..end]
    }
}

/// Services a host provides to a running core
pub trait Host {
    /// Platform the host is presenting this core as
    fn platform(&self) -> Platform;

    /// Create the rendering surface for a freshly loaded cartridge
    fn create_surface(&mut self, max_width: u32, max_height: u32, format: PixelFormat) -> SoftwareSurface {
        SoftwareSurface::new(max_width, max_height, format)
    }

    /// Queue interleaved stereo samples for playback
    fn play_samples(&mut self, samples: &[i16]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_allocation() {
        let surface = SoftwareSurface::new(256, 224, PixelFormat::Rgb888);
        assert_eq!(surface.framebuffer().len(), 256 * 224 * 3);
        assert_eq!(surface.row_stride(), 256 * 3);
        assert_eq!(surface.max_size(), (256, 224));

        let surface = SoftwareSurface::new(256, 224, PixelFormat::Rgb565);
        assert_eq!(surface.framebuffer().len(), 256 * 224 * 2);
    }

    #[test]
    fn test_visible_bytes_follow_area() {
        let mut surface = SoftwareSurface::new(256, 224, PixelFormat::Rgb888);
        surface.set_area(SurfaceArea {
            x: 0,
            y: 0,
            width: 160,
            height: 144,
        });
        surface.set_row_stride(160 * 3);

        assert_eq!(surface.visible_bytes().len(), 160 * 144 * 3);
    }
}
