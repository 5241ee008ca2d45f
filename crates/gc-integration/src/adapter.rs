//! Core lifecycle adapter
//!
//! `CoreAdapter` implements the host's core contract on top of one engine:
//! - ROM loading and soft reset
//! - per-frame video and audio
//! - controller input
//! - save-RAM and save-state persistence
//! - frame rate, aspect ratio and sample rate queries
//!
//! The host calls one operation at a time on one thread. The adapter keeps
//! only presentation and persistence metadata; the engine owns all emulated
//! state.

use crate::host::{Host, SoftwareSurface, SurfaceArea};
use crate::{savedata, snapshot};
use gc_core::{Config, CoreError, Platform, Result};
use gc_engine::{
    Engine, AUDIO_BUFFER_SIZE, AUDIO_SAMPLE_RATE, RESOLUTION_MAX_HEIGHT, RESOLUTION_MAX_WIDTH,
};
use gc_input::{apply_input, PlatformInput};
use std::path::{Path, PathBuf};

/// Lifecycle state of a core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreState {
    /// No cartridge has been loaded yet
    Uninitialized,
    /// A cartridge is loaded but no frame has run
    Loaded,
    /// Frames are being produced
    Running,
    /// The session was stopped; a new load may follow
    Stopped,
}

/// One emulation core as seen by the host
pub struct CoreAdapter<E: Engine, H: Host> {
    /// Engine instance, alive as long as the adapter
    engine: E,
    /// Host services
    host: H,
    /// Configuration
    config: Config,
    /// Current state
    state: CoreState,
    /// Where save-RAM is persisted for the current session
    save_location: Option<PathBuf>,
    /// Rendering surface for the current session
    surface: Option<SoftwareSurface>,
    /// User-facing FM audio toggle
    fm_audio: bool,
}

impl<E: Engine, H: Host> CoreAdapter<E, H> {
    /// Create a core with the default configuration
    pub fn new(engine: E, host: H) -> Self {
        Self::with_config(engine, host, Config::default())
    }

    pub fn with_config(engine: E, host: H, config: Config) -> Self {
        tracing::info!("Initializing {} core", host.platform());

        let fm_audio = config.audio.fm_audio;
        Self {
            engine,
            host,
            config,
            state: CoreState::Uninitialized,
            save_location: None,
            surface: None,
            fm_audio,
        }
    }

    /// Load a cartridge and start a session.
    ///
    /// Exactly one ROM path is accepted. Existing save-RAM at `save_path` is
    /// loaded; a missing file means blank RAM.
    pub fn load<P: AsRef<Path>>(&mut self, rom_paths: &[P], save_path: impl AsRef<Path>) -> Result<()> {
        let rom_path = match rom_paths {
            [single] => single.as_ref(),
            _ => {
                tracing::error!("Expected exactly one ROM, got {}", rom_paths.len());
                return Err(CoreError::RomLoad(format!(
                    "expected exactly one ROM, got {}",
                    rom_paths.len()
                )));
            }
        };

        tracing::info!("Loading ROM: {}", rom_path.display());

        if let Err(e) = self.engine.load_rom(rom_path) {
            tracing::error!("Couldn't load ROM {}: {}", rom_path.display(), e);
            self.abandon_session();
            return Err(CoreError::RomLoad(e.to_string()));
        }

        let save_path = save_path.as_ref().to_path_buf();
        let save_ram = match savedata::read_save_ram(&save_path) {
            Ok(save_ram) => save_ram,
            Err(e) => {
                tracing::error!("{}", e);
                self.abandon_session();
                return Err(e);
            }
        };
        self.engine
            .load_save_ram(save_ram.as_deref().unwrap_or_default());
        self.save_location = Some(save_path);

        let info = self.engine.runtime_info();
        let platform = self.host.platform();
        if info.platform != platform {
            tracing::warn!(
                "Cartridge detected as {} while running as {}",
                info.platform,
                platform
            );
        }

        let format = self.config.video.pixel_format(platform);
        self.engine.set_color_format(format);

        // Any surface from a previous session is dropped here
        let mut surface = self
            .host
            .create_surface(RESOLUTION_MAX_WIDTH, RESOLUTION_MAX_HEIGHT, format);
        surface.set_area(SurfaceArea {
            x: 0,
            y: 0,
            width: info.screen_width,
            height: info.screen_height,
        });
        surface.set_row_stride(info.screen_width as usize * format.pixel_size());
        self.surface = Some(surface);

        self.configure_fm_audio();
        self.state = CoreState::Loaded;

        tracing::info!(
            "Loaded {} cartridge: {}x{} {:?}",
            info.platform,
            info.screen_width,
            info.screen_height,
            info.region
        );
        Ok(())
    }

    /// Drop session resources after a failed load
    fn abandon_session(&mut self) {
        self.save_location = None;
        self.surface = None;
        if self.state != CoreState::Uninitialized {
            self.state = CoreState::Stopped;
        }
    }

    /// Soft reset
    pub fn reset(&mut self) {
        tracing::info!("Resetting core");
        self.engine.reset_rom();
    }

    /// Apply the host's controller snapshot for this frame
    pub fn poll_input(&mut self, input: &PlatformInput) {
        apply_input(&mut self.engine, input);
    }

    /// Emulate one frame into the surface and hand its audio to the host
    pub fn run_frame(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            tracing::warn!("run_frame called without a loaded cartridge");
            return;
        };

        let mut audio_buffer = [0i16; AUDIO_BUFFER_SIZE];
        let n_samples = self
            .engine
            .run_to_vblank(surface.framebuffer_mut(), &mut audio_buffer)
            .min(AUDIO_BUFFER_SIZE);

        self.host.play_samples(&audio_buffer[..n_samples]);
        self.state = CoreState::Running;
    }

    /// End the session. The engine instance is kept.
    pub fn stop(&mut self) {
        tracing::info!("Stopping core");
        self.save_location = None;
        self.surface = None;
        self.state = CoreState::Stopped;
    }

    /// Switch to another save file, replacing the in-engine save-RAM
    pub fn reload_save(&mut self, save_path: impl AsRef<Path>) -> Result<()> {
        let save_path = save_path.as_ref().to_path_buf();
        tracing::info!("Reloading save data from {}", save_path.display());

        // Location only moves once the engine holds the new slot's RAM
        let save_ram = savedata::read_save_ram(&save_path)?;
        self.engine
            .load_save_ram(save_ram.as_deref().unwrap_or_default());
        self.save_location = Some(save_path);
        Ok(())
    }

    /// Write the in-engine save-RAM to the save location
    pub fn sync_save(&mut self) -> Result<()> {
        let path = self
            .save_location
            .as_deref()
            .ok_or_else(|| CoreError::Internal("No save location set".to_string()))?;

        savedata::write_save_ram(path, self.engine.save_ram())
    }

    /// Write a snapshot to `path`.
    ///
    /// `callback` runs exactly once, before this returns, with `None` on success.
    pub fn save_state<F>(&mut self, path: impl AsRef<Path>, callback: F)
    where
        F: FnOnce(&mut Self, Option<CoreError>),
    {
        let path = path.as_ref();
        let error = match snapshot::write_state(&mut self.engine, path) {
            Ok(size) => {
                tracing::debug!("Saved {} byte state to {}", size, path.display());
                None
            }
            Err(e) => {
                tracing::error!("Save state to {} failed: {}", path.display(), e);
                Some(e)
            }
        };

        callback(self, error);
    }

    /// Restore a snapshot from `path`.
    ///
    /// `callback` runs exactly once, before this returns, with `None` on success.
    pub fn load_state<F>(&mut self, path: impl AsRef<Path>, callback: F)
    where
        F: FnOnce(&mut Self, Option<CoreError>),
    {
        let path = path.as_ref();
        let error = match snapshot::read_state(&mut self.engine, path) {
            Ok(()) => {
                tracing::debug!("Loaded state from {}", path.display());
                None
            }
            Err(e) => {
                tracing::error!("Load state from {} failed: {}", path.display(), e);
                Some(e)
            }
        };

        callback(self, error);
    }

    /// Display refresh rate for the current region
    pub fn frame_rate(&self) -> f64 {
        self.engine.runtime_info().region.frame_rate()
    }

    /// Display aspect ratio, correcting for non-square pixels
    pub fn aspect_ratio(&self) -> f64 {
        if self.host.platform() == Platform::GameGear {
            return 4.0 / 3.0;
        }

        let info = self.engine.runtime_info();
        info.region.pixel_aspect_ratio() * info.screen_width as f64 / info.screen_height as f64
    }

    pub fn sample_rate(&self) -> f64 {
        AUDIO_SAMPLE_RATE as f64
    }

    /// Set the FM audio toggle and reconfigure the mixer
    pub fn set_enable_fm_audio(&mut self, enabled: bool) {
        tracing::info!("FM audio {}", if enabled { "enabled" } else { "disabled" });
        self.fm_audio = enabled;
        self.configure_fm_audio();
    }

    /// The YM2413 only plays when the user wants it and the hardware has it
    fn configure_fm_audio(&mut self) {
        let supported = self.host.platform() == Platform::MasterSystem
            && self.engine.runtime_info().platform.supports_fm_audio();
        let enabled = self.fm_audio && supported;

        tracing::debug!(
            "YM2413 {} (requested {}, supported {})",
            if enabled { "on" } else { "off" },
            self.fm_audio,
            supported
        );
        self.engine.set_ym2413_enabled(enabled);
    }

    pub fn state(&self) -> CoreState {
        self.state
    }

    pub fn save_location(&self) -> Option<&Path> {
        self.save_location.as_deref()
    }

    pub fn surface(&self) -> Option<&SoftwareSurface> {
        self.surface.as_ref()
    }

    /// User-facing FM toggle, not whether the chip is actually on
    pub fn fm_audio_enabled(&self) -> bool {
        self.fm_audio
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gc_engine::NullEngine;

    struct SilentHost(Platform);

    impl Host for SilentHost {
        fn platform(&self) -> Platform {
            self.0
        }

        fn play_samples(&mut self, _samples: &[i16]) {}
    }

    #[test]
    fn test_adapter_creation() {
        let core = CoreAdapter::new(NullEngine::new(), SilentHost(Platform::MasterSystem));

        assert_eq!(core.state(), CoreState::Uninitialized);
        assert!(core.surface().is_none());
        assert!(core.save_location().is_none());
        assert!(core.fm_audio_enabled());
    }

    #[test]
    fn test_fm_flag_from_config() {
        let mut config = Config::default();
        config.audio.fm_audio = false;
        let core = CoreAdapter::with_config(
            NullEngine::new(),
            SilentHost(Platform::MasterSystem),
            config,
        );

        assert!(!core.fm_audio_enabled());
    }

    #[test]
    fn test_rejects_multiple_roms() {
        let mut core = CoreAdapter::new(NullEngine::new(), SilentHost(Platform::MasterSystem));

        let err = core.load(&["a.sms", "b.sms"], "game.sav").unwrap_err();
        assert!(matches!(err, CoreError::RomLoad(_)));

        let none: [&str; 0] = [];
        assert!(core.load(&none, "game.sav").is_err());
        assert_eq!(core.state(), CoreState::Uninitialized);
        assert!(!core.engine().is_loaded());
    }

    #[test]
    fn test_run_frame_without_surface() {
        let mut core = CoreAdapter::new(NullEngine::new(), SilentHost(Platform::Sg1000));
        core.run_frame();

        assert_eq!(core.state(), CoreState::Uninitialized);
        assert_eq!(core.engine().frame_count(), 0);
    }

    #[test]
    fn test_sync_save_without_location() {
        let mut core = CoreAdapter::new(NullEngine::new(), SilentHost(Platform::GameGear));
        assert!(core.sync_save().is_err());
    }

    #[test]
    fn test_sample_rate() {
        let core = CoreAdapter::new(NullEngine::new(), SilentHost(Platform::GameGear));
        assert_eq!(core.sample_rate(), 44100.0);
    }
}
