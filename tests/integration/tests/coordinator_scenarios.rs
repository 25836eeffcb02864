//! End-to-end scenarios for the playback control coordinator
//!
//! These tests drive a headless page through realistic input sequences:
//! - Spacebar tap and hold
//! - Toasts replacing each other
//! - Dropdown exclusivity and keyboard handling
//! - Invalid media URLs
//! - Theme persistence across page loads

use watchpage::controls::{MenuPlacement, Theme, ToastKind};
use watchpage::controls::theme::THEME_KEY;
use watchpage::surface::{ClickEvent, Control, EventResponse, Key, MetaField, PageEffect, TargetKind};
use watchpage::{Lifecycle, MediaPlayer, MemoryStore, PreferenceStore, STREAM_MENU};
use watchpage_integration_tests::{
    ctrl, key, page, player_click, press_space, wait, PageBuilder, QUALITY_MENU, WATCH_URL,
};

#[test]
fn test_hold_boosts_once_and_restores_playing_state() {
    let mut page = page();
    page.player_mut().unwrap().play();
    page.player_mut().unwrap().set_speed(1.25);

    page.handle_key_down(key(Key::Space));
    wait(&mut page, 300);
    assert!(page.hold().is_held());
    assert_eq!(page.player().unwrap().speed(), 2.0);

    // Auto-repeat while held changes nothing
    for _ in 0..5 {
        assert_eq!(page.handle_key_down(key(Key::Space)), EventResponse::PreventDefault);
        wait(&mut page, 30);
    }
    let boosts = page
        .surface()
        .toast_history()
        .iter()
        .filter(|(m, _)| m.starts_with("⚡ Hold"))
        .count();
    assert_eq!(boosts, 1);

    page.handle_key_up(key(Key::Space));
    let player = page.player().unwrap();
    assert_eq!(player.speed(), 1.25);
    assert!(!player.is_paused());
    assert_eq!(page.surface().toast(), Some(("🔄 Normal Speed", ToastKind::Info)));
}

#[test]
fn test_tap_never_boosts() {
    let mut page = page();
    press_space(&mut page, 299);

    let player = page.player().unwrap();
    assert_eq!(player.toggle_count(), 1);
    assert_eq!(player.speed(), 1.0);
    assert!(!page.hold().is_held());

    wait(&mut page, 1000);
    assert_eq!(page.player().unwrap().speed(), 1.0);
}

#[test]
fn test_two_taps_toggle_twice() {
    let mut page = page();
    press_space(&mut page, 50);
    press_space(&mut page, 50);

    let player = page.player().unwrap();
    assert_eq!(player.toggle_count(), 2);
    assert!(player.is_paused());
}

#[test]
fn test_newer_toast_survives_older_timer() {
    let mut page = page();
    page.handle_key_down(key(Key::Char('m')));
    wait(&mut page, 500);
    page.handle_control(Control::Download);

    // The mute toast would have expired at 800ms
    wait(&mut page, 400);
    assert_eq!(page.surface().toast(), Some(("Download started", ToastKind::Success)));
    assert_eq!(page.surface().pending_timers(), 1);

    wait(&mut page, 2600);
    assert_eq!(page.surface().toast(), None);
    assert_eq!(page.surface().pending_timers(), 0);
}

#[test]
fn test_opening_one_dropdown_closes_the_other() {
    let mut page = page();

    assert!(page.toggle_dropdown(QUALITY_MENU));
    assert!(page.surface().dropdown_open(QUALITY_MENU));

    page.handle_control(Control::StreamMenu);
    assert!(page.surface().dropdown_open(STREAM_MENU));
    assert!(!page.surface().dropdown_open(QUALITY_MENU));
    assert_eq!(page.dropdowns().open_container(), Some(STREAM_MENU));
    assert_eq!(page.surface().placement(STREAM_MENU), Some(MenuPlacement::Below));
}

#[test]
fn test_stream_menu_shortcut_toggles() {
    let mut page = page();
    page.handle_key_down(ctrl('s'));
    assert!(page.surface().dropdown_open(STREAM_MENU));
    assert!(page.surface().dismiss_listeners_active());

    page.handle_key_down(ctrl('s'));
    assert!(!page.surface().dropdown_open(STREAM_MENU));
    assert_eq!(page.surface().trigger_focused(), Some(STREAM_MENU));
    assert!(!page.surface().dismiss_listeners_active());
}

#[test]
fn test_unmeasured_menu_uses_fallback_height() {
    let mut page = page();
    // 60px above is less than the 400px fallback, so it stays below
    page.toggle_dropdown(QUALITY_MENU);
    assert_eq!(page.surface().placement(QUALITY_MENU), Some(MenuPlacement::Below));
}

#[test]
fn test_menu_flips_above_near_viewport_bottom() {
    let mut page = PageBuilder::new(WATCH_URL)
        .with_surface(|s| s.set_viewport_height(500.0))
        .build();

    page.handle_control(Control::StreamMenu);
    assert_eq!(page.surface().placement(STREAM_MENU), Some(MenuPlacement::Above));
}

#[test]
fn test_outside_click_closes_menu_inside_click_does_not() {
    let mut page = page();
    page.handle_control(Control::StreamMenu);

    page.handle_click(ClickEvent {
        target: TargetKind::Page,
        dropdown: Some(STREAM_MENU.to_string()),
    });
    assert!(page.dropdowns().is_open(STREAM_MENU));

    page.handle_click(ClickEvent::default());
    assert!(!page.dropdowns().is_open(STREAM_MENU));
}

#[test]
fn test_escape_closes_menu_before_anything_else() {
    let mut page = page();
    page.handle_control(Control::StreamMenu);

    assert_eq!(page.handle_key_down(key(Key::Escape)), EventResponse::Consume);
    assert!(!page.surface().dropdown_open(STREAM_MENU));
    assert_eq!(page.handle_key_down(key(Key::Escape)), EventResponse::Pass);
}

#[test]
fn test_malformed_url_shows_one_error_and_blocks_actions() {
    let mut page = PageBuilder::new("cdn.example.net/watch/9x7/Night_Drive.mp4").build();
    assert_eq!(page.lifecycle(), Lifecycle::Degraded);
    assert!(page.media_url().is_none());

    page.handle_control(Control::Download);
    page.handle_control(Control::CopyLink);
    page.handle_control(Control::PlayerCard("vlc".to_string()));
    page.handle_control(Control::PlayerCard("winamp".to_string()));
    page.handle_key_down(ctrl('d'));
    wait(&mut page, 10_000);

    assert!(page.surface().effects().is_empty());
    assert_eq!(page.surface().toasts_of_kind(ToastKind::Error), 1);
    assert_eq!(page.surface().toast(), Some(("Invalid media URL", ToastKind::Error)));

    // Playback controls keep working
    press_space(&mut page, 50);
    assert_eq!(page.player().unwrap().toggle_count(), 1);
}

#[test]
fn test_theme_persists_between_page_loads() {
    let mut page = page();
    assert_eq!(page.theme(), Theme::Dark);
    page.handle_control(Control::ThemeToggle);
    assert_eq!(page.surface().theme_icon(), Some(("fa-moon", true)));
    assert_eq!(page.store().get(THEME_KEY).as_deref(), Some("light"));

    let mut store = MemoryStore::new();
    store.set(THEME_KEY, "light").unwrap();
    let reloaded = PageBuilder::new(WATCH_URL)
        .with_store(store)
        .with_surface(|s| s.set_system_prefers_dark(Some(true)))
        .build();
    assert_eq!(reloaded.theme(), Theme::Light);
    assert_eq!(reloaded.surface().announced_themes(), &[Theme::Light]);
}

#[test]
fn test_system_preference_used_without_stored_theme() {
    let page = PageBuilder::new(WATCH_URL)
        .with_surface(|s| s.set_system_prefers_dark(Some(false)))
        .build();
    assert_eq!(page.theme(), Theme::Light);
}

#[test]
fn test_theme_write_failure_still_applies() {
    let mut store = MemoryStore::new();
    store.fail_writes(true);
    let mut page = PageBuilder::new(WATCH_URL).with_store(store).build();

    page.handle_control(Control::ThemeToggle);
    assert_eq!(page.surface().theme(), Some(Theme::Light));
}

#[test]
fn test_double_click_toggles_speed() {
    let mut page = page();
    page.handle_click(player_click());
    wait(&mut page, 150);
    page.handle_click(player_click());
    assert_eq!(page.player().unwrap().speed(), 2.0);
    assert_eq!(page.surface().toast(), Some(("⚡ 2x Speed", ToastKind::Info)));

    // Clicks too far apart are two single clicks
    page.handle_click(player_click());
    wait(&mut page, 400);
    page.handle_click(player_click());
    assert_eq!(page.player().unwrap().speed(), 2.0);

    wait(&mut page, 100);
    page.handle_click(player_click());
    assert_eq!(page.player().unwrap().speed(), 1.0);
}

#[test]
fn test_seek_and_volume_are_clamped() {
    let mut page = page();
    page.handle_key_down(key(Key::Left));
    assert_eq!(page.player().unwrap().position(), 0.0);
    assert_eq!(page.surface().toast(), Some(("⏪ -10s", ToastKind::Info)));

    page.player_mut().unwrap().set_position(595.0);
    page.handle_key_down(key(Key::Right));
    assert_eq!(page.player().unwrap().position(), 600.0);

    page.handle_key_down(key(Key::Up));
    assert_eq!(page.player().unwrap().volume(), 1.0);
    assert_eq!(page.surface().toast(), Some(("🔊 Volume: 100%", ToastKind::Info)));

    page.handle_key_down(key(Key::Down));
    assert_eq!(page.surface().toast(), Some(("🔉 Volume: 90%", ToastKind::Info)));
}

#[test]
fn test_swipe_seeks() {
    let mut page = page();
    page.player_mut().unwrap().set_position(100.0);

    page.handle_touch_start(400.0);
    page.handle_touch_end(300.0);
    assert_eq!(page.player().unwrap().position(), 110.0);

    page.handle_touch_start(100.0);
    page.handle_touch_end(130.0);
    assert_eq!(page.player().unwrap().position(), 110.0);

    page.handle_touch_start(100.0);
    page.handle_touch_end(200.0);
    assert_eq!(page.player().unwrap().position(), 100.0);
}

#[test]
fn test_shortcuts_ignored_while_typing() {
    let mut page = page();
    let event = key(Key::Char('m')).on(TargetKind::TextInput);
    assert_eq!(page.handle_key_down(event), EventResponse::Pass);
    assert!(!page.player().unwrap().is_muted());

    let event = ctrl('d').on(TargetKind::Editable);
    assert_eq!(page.handle_key_down(event), EventResponse::Pass);
    assert!(page.surface().effects().is_empty());
}

#[test]
fn test_copy_shortcut() {
    let mut page = page();
    let mut event = ctrl('C');
    event.modifiers.shift = true;
    assert_eq!(page.handle_key_down(event), EventResponse::PreventDefault);
    assert_eq!(
        page.surface().effects(),
        &[PageEffect::Clipboard {
            text: "https://files.example.net/9x7/Night_Drive.mp4".to_string(),
            legacy: false,
        }]
    );
}

#[test]
fn test_page_without_player_degrades() {
    let mut page = PageBuilder::new(WATCH_URL).without_player().build();
    assert_eq!(page.lifecycle(), Lifecycle::Active);
    assert!(page.player().is_none());
    assert_eq!(page.surface().meta(MetaField::Duration), None);

    assert_eq!(page.handle_key_down(key(Key::Space)), EventResponse::Pass);
    assert_eq!(page.handle_key_down(key(Key::Char('f'))), EventResponse::Pass);

    page.handle_control(Control::Download);
    assert_eq!(page.surface().effects().len(), 1);
}

#[test]
fn test_dispose_is_idempotent() {
    let mut page = page();
    page.handle_key_down(key(Key::Space));
    page.dispose();
    page.dispose();
    assert_eq!(page.lifecycle(), Lifecycle::Disposed);
    assert_eq!(page.surface().pending_timers(), 0);

    // A stale timer arriving after teardown is ignored
    wait(&mut page, 1000);
    assert!(!page.hold().is_held());
}
