//! Integration test utilities for watchpage
//!
//! This module provides common utilities for integration testing including:
//! - A headless page with a simulated player
//! - Key and click helpers
//! - Temporary session and config files

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use watchpage::session::{self, Session, SessionStep};
use watchpage::surface::{ClickEvent, Key, KeyEvent, KeyModifiers, Rect, TargetKind};
use watchpage::{Config, HeadlessSurface, MemoryStore, PlaybackCoordinator, SimulatedPlayer, STREAM_MENU};

/// Page under test
pub type TestPage = PlaybackCoordinator<HeadlessSurface, SimulatedPlayer, MemoryStore>;

/// Address of a well-formed watch page
pub const WATCH_URL: &str = "https://files.example.net/watch/9x7/Night_Drive.mp4";

/// Second dropdown used to check the single-open rule
pub const QUALITY_MENU: &str = "quality-dropdown-container";

/// Builder for a headless page
pub struct PageBuilder {
    config: Config,
    surface: HeadlessSurface,
    store: MemoryStore,
    player: Option<SimulatedPlayer>,
}

impl PageBuilder {
    pub fn new(url: &str) -> Self {
        let mut surface = HeadlessSurface::new(url);
        surface.add_dropdown(STREAM_MENU, Rect { top: 360.0, bottom: 400.0 }, 320.0, 10);
        surface.add_dropdown(QUALITY_MENU, Rect { top: 60.0, bottom: 100.0 }, 0.0, 4);

        Self {
            config: Config::default(),
            surface,
            store: MemoryStore::new(),
            player: Some(SimulatedPlayer::new(600.0, (1280, 720))),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_store(mut self, store: MemoryStore) -> Self {
        self.store = store;
        self
    }

    pub fn with_surface(mut self, setup: impl FnOnce(&mut HeadlessSurface)) -> Self {
        setup(&mut self.surface);
        self
    }

    /// Make player creation fail during init
    pub fn without_player(mut self) -> Self {
        self.player = None;
        self
    }

    pub fn build(self) -> TestPage {
        let mut page = PlaybackCoordinator::new(self.config, self.surface, self.store);
        let player = self.player;
        page.init(|| player.ok_or_else(|| watchpage::WatchPageError::player_error("widget missing")));
        page
    }
}

/// Page at [`WATCH_URL`] with default settings
pub fn page() -> TestPage {
    PageBuilder::new(WATCH_URL).build()
}

/// Let time pass on the page's virtual clock
pub fn wait(page: &mut TestPage, ms: u64) {
    session::advance(page, Duration::from_millis(ms));
}

pub fn key(key: Key) -> KeyEvent {
    KeyEvent::new(key)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(Key::Char(c)).with_modifiers(KeyModifiers { ctrl: true, ..Default::default() })
}

pub fn player_click() -> ClickEvent {
    ClickEvent {
        target: TargetKind::Player,
        dropdown: None,
    }
}

/// Hold Space for `ms` and release it
pub fn press_space(page: &mut TestPage, ms: u64) {
    page.handle_key_down(key(Key::Space));
    wait(page, ms);
    page.handle_key_up(key(Key::Space));
}

/// Temporary directory for session, config and preference files
pub struct TestFixture {
    pub temp_dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `steps` as a session file for `url`
    pub fn write_session(&self, name: &str, url: &str, steps: Vec<SessionStep>) -> Result<PathBuf> {
        let session = Session {
            page_url: Some(url.to_string()),
            file_name: None,
            media: Default::default(),
            steps,
        };
        let path = self.path().join(name);
        std::fs::write(&path, serde_json::to_string_pretty(&session)?)?;
        Ok(path)
    }

    /// Write a raw config file
    pub fn write_config(&self, name: &str, toml: &str) -> Result<PathBuf> {
        let path = self.path().join(name);
        std::fs::write(&path, toml)?;
        Ok(path)
    }
}
