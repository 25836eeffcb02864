//! Configuration loading and environment overrides
//!
//! Environment variables are process-wide, so these tests run serially.

use anyhow::Result;
use serial_test::serial;
use watchpage::surface::{Key, KeyEvent};
use watchpage::{Config, MediaPlayer, WatchPageError};
use watchpage_integration_tests::{press_space, wait, PageBuilder, TestFixture, WATCH_URL};

const ENV_VARS: [&str; 4] = [
    "WATCHPAGE_HOLD_THRESHOLD_MS",
    "WATCHPAGE_BOOST_SPEED",
    "WATCHPAGE_TOAST_DURATION_MS",
    "WATCHPAGE_LOG_LEVEL",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_env_overrides_file_values() -> Result<()> {
    clear_env();
    let fixture = TestFixture::new()?;
    let path = fixture.write_config(
        "config.toml",
        "[controls]\nhold_threshold_ms = 450\nboost_speed = 1.5\n",
    )?;

    let mut config = Config::from_file(&path)?;
    assert_eq!(config.controls.hold_threshold_ms, 450);
    assert_eq!(config.controls.boost_speed, 1.5);
    assert_eq!(config.toast.default_duration_ms, 3000);

    std::env::set_var("WATCHPAGE_BOOST_SPEED", "3");
    std::env::set_var("WATCHPAGE_LOG_LEVEL", "debug");
    config.apply_env_overrides()?;
    clear_env();

    assert_eq!(config.controls.hold_threshold_ms, 450);
    assert_eq!(config.controls.boost_speed, 3.0);
    assert_eq!(config.general.log_level, "debug");
    config.validate()?;
    Ok(())
}

#[test]
#[serial]
fn test_malformed_env_value_is_rejected() {
    clear_env();
    std::env::set_var("WATCHPAGE_HOLD_THRESHOLD_MS", "soon");
    let result = Config::default().apply_env_overrides();
    clear_env();

    assert!(matches!(result, Err(WatchPageError::Config(_))));
}

#[test]
#[serial]
fn test_configured_threshold_and_boost_drive_the_page() {
    clear_env();
    std::env::set_var("WATCHPAGE_HOLD_THRESHOLD_MS", "600");
    std::env::set_var("WATCHPAGE_BOOST_SPEED", "1.75");
    let mut config = Config::default();
    let applied = config.apply_env_overrides();
    clear_env();
    assert!(applied.is_ok());

    let mut page = PageBuilder::new(WATCH_URL).with_config(config).build();

    // 400ms is a tap under a 600ms threshold
    press_space(&mut page, 400);
    assert_eq!(page.player().unwrap().toggle_count(), 1);

    page.handle_key_down(KeyEvent::new(Key::Space));
    wait(&mut page, 600);
    assert_eq!(page.player().unwrap().speed(), 1.75);
    page.handle_key_up(KeyEvent::new(Key::Space));
    assert_eq!(page.player().unwrap().speed(), 1.0);
}

#[test]
#[serial]
fn test_saved_config_round_trips_through_disk() -> Result<()> {
    clear_env();
    let fixture = TestFixture::new()?;
    let path = fixture.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.toast.default_duration_ms = 5000;
    config.gestures.swipe_threshold_px = 80.0;
    config.save_to(&path)?;

    let loaded = Config::load_with(Some(path.as_path()))?;
    assert_eq!(loaded.toast.default_duration_ms, 5000);
    assert_eq!(loaded.gestures.swipe_threshold_px, 80.0);
    Ok(())
}

#[test]
#[serial]
fn test_invalid_file_values_fail_validation() -> Result<()> {
    clear_env();
    let fixture = TestFixture::new()?;
    let path = fixture.write_config("bad.toml", "[controls]\nboost_speed = 0.0\n")?;

    assert!(matches!(Config::load_with(Some(path.as_path())), Err(WatchPageError::Config(_))));
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_extra_file_layers_over_user_file() -> Result<()> {
    clear_env();
    let fixture = TestFixture::new()?;
    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", fixture.path());

    let mut saved = Config::default();
    saved.controls.hold_threshold_ms = 450;
    saved.toast.default_duration_ms = 4000;
    let result = saved.save().and_then(|()| {
        let extra = fixture.path().join("extra.toml");
        std::fs::write(&extra, "[controls]\nboost_speed = 3.0\n")?;
        Ok((Config::load()?, Config::load_with(Some(extra.as_path()))?))
    });

    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    let (user_only, layered) = result?;

    assert!(fixture.path().join("watchpage").join("config.toml").exists());
    assert_eq!(user_only, saved);

    assert_eq!(layered.controls.hold_threshold_ms, 450);
    assert_eq!(layered.toast.default_duration_ms, 4000);
    assert_eq!(layered.controls.boost_speed, 3.0);
    Ok(())
}
