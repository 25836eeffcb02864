//! Session files replayed the way the CLI does it

use anyhow::Result;
use watchpage::controls::ToastKind;
use watchpage::session::{self, Session, SessionStep};
use watchpage::surface::{Control, Key, KeyModifiers, PageEffect, TargetKind};
use watchpage::{Config, JsonFileStore, Lifecycle, PlaybackCoordinator, PreferenceStore, WatchPageError};
use watchpage_integration_tests::{TestFixture, WATCH_URL};

fn key_down(key: Key) -> SessionStep {
    SessionStep::KeyDown {
        key,
        modifiers: KeyModifiers::default(),
        target: TargetKind::Page,
    }
}

fn steps() -> Vec<SessionStep> {
    vec![
        key_down(Key::Space),
        SessionStep::Wait { ms: 350 },
        SessionStep::KeyUp {
            key: Key::Space,
            modifiers: KeyModifiers::default(),
            target: TargetKind::Page,
        },
        SessionStep::Control { control: Control::ThemeToggle },
        SessionStep::Control { control: Control::PlayerCard("nplayer".to_string()) },
        SessionStep::Wait { ms: 3000 },
    ]
}

#[test]
fn test_session_file_replays_against_file_store() -> Result<()> {
    let fixture = TestFixture::new()?;
    let path = fixture.write_session("session.json", WATCH_URL, steps())?;
    let session = Session::load(&path)?;

    let prefs = fixture.path().join("prefs.json");
    let store = JsonFileStore::open(&prefs);
    let mut page = PlaybackCoordinator::new(Config::default(), session.surface(), store);
    page.init(|| Ok(session.player()));
    let report = session::replay(&mut page, &session.steps);

    assert_eq!(report.steps, 6);
    assert_eq!(report.lifecycle, Lifecycle::Active);
    assert_eq!(report.pending_timers, 0);
    assert_eq!(
        report.effects,
        vec![PageEffect::OpenWindow {
            url: "nplayer-https://files.example.net/9x7/Night_Drive.mp4".to_string()
        }]
    );
    assert_eq!(report.toasts_of(ToastKind::Error), 0);

    // Theme survives a reload of the store
    let reopened = JsonFileStore::open(&prefs);
    assert_eq!(reopened.get("theme").as_deref(), Some("light"));
    Ok(())
}

#[test]
fn test_missing_session_file() {
    let result = Session::load(std::path::Path::new("/nonexistent/session.json"));
    assert!(matches!(result, Err(WatchPageError::FileIO(_))));
}

#[test]
fn test_malformed_session_file() -> Result<()> {
    let fixture = TestFixture::new()?;
    let path = fixture.write_config("session.json", r#"{"steps": [{"step": "teleport"}]}"#)?;
    assert!(matches!(Session::load(&path), Err(WatchPageError::Session(_))));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_realtime_replay_matches_virtual_replay() -> Result<()> {
    let session = Session {
        page_url: Some(WATCH_URL.to_string()),
        file_name: Some("Night Drive".to_string()),
        media: Default::default(),
        steps: steps(),
    };

    let mut virtual_page = PlaybackCoordinator::new(Config::default(), session.surface(), watchpage::MemoryStore::new());
    virtual_page.init(|| Ok(session.player()));
    let expected = session::replay(&mut virtual_page, &session.steps);

    let mut realtime_page = PlaybackCoordinator::new(Config::default(), session.surface(), watchpage::MemoryStore::new());
    realtime_page.init(|| Ok(session.player()));
    let started = tokio::time::Instant::now();
    let report = session::replay_realtime(&mut realtime_page, &session.steps).await;

    assert_eq!(report, expected);
    assert!(started.elapsed() >= std::time::Duration::from_millis(3350));
    Ok(())
}
