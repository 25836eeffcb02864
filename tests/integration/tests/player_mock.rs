//! Coordinator against a mocked player widget
//!
//! Checks the exact calls made to the player, in order, for taps, holds
//! and source reloads.

use mockall::predicate::eq;
use mockall::{mock, Sequence};
use std::time::Duration;
use watchpage::session;
use watchpage::surface::{Control, Key, KeyEvent, Rect};
use watchpage::{Config, HeadlessSurface, MediaPlayer, MemoryStore, PlaybackCoordinator, WatchPageError, STREAM_MENU};
use watchpage_integration_tests::WATCH_URL;

mock! {
    pub Player {}

    impl MediaPlayer for Player {
        fn position(&self) -> f64;
        fn set_position(&mut self, secs: f64);
        fn duration(&self) -> f64;
        fn volume(&self) -> f64;
        fn set_volume(&mut self, volume: f64);
        fn is_muted(&self) -> bool;
        fn set_muted(&mut self, muted: bool);
        fn speed(&self) -> f64;
        fn set_speed(&mut self, speed: f64);
        fn video_dimensions(&self) -> (u32, u32);
        fn is_paused(&self) -> bool;
        fn play(&mut self);
        fn pause(&mut self);
        fn toggle_play(&mut self);
        fn toggle_fullscreen(&mut self);
        fn reload_source(&mut self, url: &str) -> watchpage::Result<()>;
    }
}

type MockPage = PlaybackCoordinator<HeadlessSurface, MockPlayer, MemoryStore>;

/// Player answering the metadata queries made during init
fn player() -> MockPlayer {
    let mut player = MockPlayer::new();
    player.expect_duration().return_const(4000.0);
    player.expect_video_dimensions().return_const((3840u32, 2160u32));
    player
}

fn page(player: MockPlayer) -> MockPage {
    let mut surface = HeadlessSurface::new(WATCH_URL);
    surface.add_dropdown(STREAM_MENU, Rect { top: 300.0, bottom: 340.0 }, 200.0, 10);
    let mut page = PlaybackCoordinator::new(Config::default(), surface, MemoryStore::new());
    page.init(|| Ok(player));
    page
}

#[test]
fn test_metadata_read_on_init() {
    let page = page(player());
    let surface = page.surface();
    assert_eq!(surface.meta(watchpage::surface::MetaField::Duration), Some("1:06:40"));
    assert_eq!(surface.meta(watchpage::surface::MetaField::Resolution), Some("3840x2160"));
    assert_eq!(surface.meta(watchpage::surface::MetaField::FileSize), Some("~2000.0 MB"));
}

#[test]
fn test_tap_only_toggles() {
    let mut player = player();
    player.expect_toggle_play().times(1).return_const(());
    player.expect_set_speed().never();
    player.expect_play().never();
    player.expect_pause().never();

    let mut page = page(player);
    page.handle_key_down(KeyEvent::new(Key::Space));
    session::advance(&mut page, Duration::from_millis(200));
    page.handle_key_up(KeyEvent::new(Key::Space));
}

#[test]
fn test_hold_from_paused_boosts_then_pauses_again() {
    let mut player = player();
    let mut seq = Sequence::new();
    player.expect_speed().return_const(1.5);
    player.expect_is_paused().return_const(true);
    player.expect_toggle_play().never();

    player.expect_play().times(1).in_sequence(&mut seq).return_const(());
    player
        .expect_set_speed()
        .with(eq(2.0))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    player
        .expect_set_speed()
        .with(eq(1.5))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    player.expect_pause().times(1).in_sequence(&mut seq).return_const(());

    let mut page = page(player);
    page.handle_key_down(KeyEvent::new(Key::Space));
    session::advance(&mut page, Duration::from_millis(500));
    page.handle_key_down(KeyEvent::new(Key::Space));
    page.handle_key_up(KeyEvent::new(Key::Space));
}

#[test]
fn test_mute_shortcut() {
    let mut player = player();
    player.expect_is_muted().return_const(false);
    player.expect_set_muted().with(eq(true)).times(1).return_const(());

    let mut page = page(player);
    page.handle_key_down(KeyEvent::new(Key::Char('m')));
    assert_eq!(
        page.surface().toast(),
        Some(("🔇 Muted", watchpage::controls::ToastKind::Info))
    );
}

#[test]
fn test_failed_reload_shows_overlay() {
    let mut player = player();
    player
        .expect_reload_source()
        .times(1)
        .returning(|_| Err(WatchPageError::player_error("source rejected")));

    let mut page = page(player);
    page.handle_control(Control::RetryPlayback);

    assert!(!page.surface().is_loading());
    assert_eq!(
        page.surface().error_overlay(),
        Some("Error loading video source. Please try again.")
    );
}
