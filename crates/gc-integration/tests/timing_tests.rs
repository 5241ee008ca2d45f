//! Frame rate, aspect ratio and FM audio configuration

mod common;

use common::{loaded_core, write_rom, RecordingHost, TestCore};
use gc_core::{Platform, Region};
use gc_engine::NullEngine;
use gc_integration::CoreAdapter;
use tempfile::TempDir;

fn regional_core(dir: &TempDir, platform: Platform, region: Region, rom_name: &str) -> TestCore {
    let mut core = CoreAdapter::new(NullEngine::with_region(region), RecordingHost::new(platform));
    let rom = write_rom(dir, rom_name);
    core.load(&[rom], dir.path().join("game.sav")).unwrap();
    core
}

#[test]
fn test_frame_rate_follows_region() {
    let dir = TempDir::new().unwrap();
    let mut core = regional_core(&dir, Platform::MasterSystem, Region::Ntsc, "game.sms");
    assert_eq!(core.frame_rate(), 60.0);

    // Queried each time, never cached at load
    core.engine_mut().set_region(Region::Pal);
    assert_eq!(core.frame_rate(), 50.0);
}

#[test]
fn test_game_gear_aspect_ratio() {
    let dir = TempDir::new().unwrap();
    let ntsc = regional_core(&dir, Platform::GameGear, Region::Ntsc, "game.gg");
    let pal = regional_core(&dir, Platform::GameGear, Region::Pal, "game.gg");

    assert_eq!(ntsc.aspect_ratio(), 4.0 / 3.0);
    assert_eq!(pal.aspect_ratio(), 4.0 / 3.0);
}

#[test]
fn test_master_system_aspect_ratio() {
    let dir = TempDir::new().unwrap();
    let ntsc = regional_core(&dir, Platform::MasterSystem, Region::Ntsc, "game.sms");
    let pal = regional_core(&dir, Platform::MasterSystem, Region::Pal, "game.sms");

    let expected_ntsc = 8.0 / 7.0 * 256.0 / 192.0;
    assert!((ntsc.aspect_ratio() - expected_ntsc).abs() < 1e-9);
    assert!(pal.aspect_ratio() > ntsc.aspect_ratio());
}

#[test]
fn test_aspect_ratio_follows_reported_geometry() {
    let dir = TempDir::new().unwrap();
    let sizes = [(256u32, 192u32), (256, 224), (248, 192)];

    for region in [Region::Ntsc, Region::Pal] {
        let mut core = regional_core(&dir, Platform::MasterSystem, region, "game.sms");
        for (width, height) in sizes {
            core.engine_mut().set_screen_size(width, height);
            let expected = region.pixel_aspect_ratio() * width as f64 / height as f64;
            assert!(
                (core.aspect_ratio() - expected).abs() < 1e-9,
                "{:?} {}x{}",
                region,
                width,
                height
            );
        }

        // Linear in width, inverse in height
        core.engine_mut().set_screen_size(256, 192);
        let base = core.aspect_ratio();
        core.engine_mut().set_screen_size(128, 192);
        assert!((core.aspect_ratio() - base / 2.0).abs() < 1e-9);
        core.engine_mut().set_screen_size(256, 96);
        assert!((core.aspect_ratio() - base * 2.0).abs() < 1e-9);
    }
}

#[test]
fn test_game_gear_aspect_ratio_ignores_geometry() {
    let dir = TempDir::new().unwrap();
    let mut core = regional_core(&dir, Platform::GameGear, Region::Ntsc, "game.sms");
    assert_eq!(core.aspect_ratio(), 4.0 / 3.0);

    for (width, height) in [(256, 224), (248, 192), (160, 144)] {
        core.engine_mut().set_screen_size(width, height);
        assert_eq!(core.aspect_ratio(), 4.0 / 3.0);
    }
}

#[test]
fn test_sg1000_aspect_ratio_uses_pixel_ratio() {
    let dir = TempDir::new().unwrap();
    let core = loaded_core(&dir, Platform::Sg1000, "game.sg");

    assert!(core.aspect_ratio() > 256.0 / 192.0);
}

#[test]
fn test_fm_audio_on_master_system() {
    let dir = TempDir::new().unwrap();
    let mut core = loaded_core(&dir, Platform::MasterSystem, "game.sms");
    assert!(core.engine().ym2413_enabled());

    core.set_enable_fm_audio(false);
    assert!(!core.fm_audio_enabled());
    assert!(!core.engine().ym2413_enabled());

    core.set_enable_fm_audio(true);
    assert!(core.engine().ym2413_enabled());
}

#[test]
fn test_fm_audio_needs_supporting_cartridge() {
    let dir = TempDir::new().unwrap();
    let mut core = loaded_core(&dir, Platform::MasterSystem, "game.sg");

    core.set_enable_fm_audio(true);
    assert!(core.fm_audio_enabled());
    assert!(!core.engine().ym2413_enabled());
}

#[test]
fn test_fm_audio_off_on_game_gear() {
    let dir = TempDir::new().unwrap();
    let mut core = loaded_core(&dir, Platform::GameGear, "game.gg");
    assert!(!core.engine().ym2413_enabled());

    core.set_enable_fm_audio(true);
    assert!(!core.engine().ym2413_enabled());
}

#[test]
fn test_fm_toggle_survives_reload() {
    let dir = TempDir::new().unwrap();
    let mut core = loaded_core(&dir, Platform::MasterSystem, "game.sms");
    core.set_enable_fm_audio(false);
    core.stop();

    let rom = write_rom(&dir, "other.sms");
    core.load(&[rom], dir.path().join("other.sav")).unwrap();
    assert!(!core.engine().ym2413_enabled());
}

#[test]
fn test_fm_changes_audio() {
    let dir = TempDir::new().unwrap();
    let mut with_fm = loaded_core(&dir, Platform::MasterSystem, "game.sms");
    let mut without_fm = loaded_core(&dir, Platform::MasterSystem, "game.sms");
    without_fm.set_enable_fm_audio(false);

    with_fm.run_frame();
    without_fm.run_frame();

    assert_eq!(
        with_fm.host().sample_blocks[0].len(),
        without_fm.host().sample_blocks[0].len()
    );
    assert_ne!(with_fm.host().sample_blocks[0], without_fm.host().sample_blocks[0]);
}
