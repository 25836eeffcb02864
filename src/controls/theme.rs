//! Light/dark theme preference

use crate::storage::PreferenceStore;
use crate::surface::ThemeSurface;
use crate::utils::error::WatchPageError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage key for the persisted theme
pub const THEME_KEY: &str = "theme";

/// Page colour scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Toggle button icon: it shows the theme you would switch to
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "fa-moon",
            Theme::Dark => "fa-sun",
        }
    }

    /// Browser chrome colour for the theme-color meta tag
    pub fn chrome_color(&self) -> &'static str {
        match self {
            Theme::Light => "#f2efe7",
            Theme::Dark => "#1a1a2e",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = WatchPageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(WatchPageError::Config(format!("Unknown theme '{}'", other))),
        }
    }
}

/// Applies and persists the theme preference
#[derive(Debug, Default)]
pub struct ThemeSwitcher {
    current: Theme,
}

impl ThemeSwitcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Pick the starting theme and apply it
    ///
    /// A stored value wins, then the system preference, then dark.
    pub fn initialize<S, P>(&mut self, surface: &mut S, store: &mut P) -> Theme
    where
        S: ThemeSurface + ?Sized,
        P: PreferenceStore + ?Sized,
    {
        let stored = store.get(THEME_KEY).and_then(|value| match value.parse::<Theme>() {
            Ok(theme) => Some(theme),
            Err(e) => {
                warn!("Ignoring stored theme: {}", e);
                None
            }
        });

        let theme = stored
            .or_else(|| surface.system_prefers_dark().map(|dark| if dark { Theme::Dark } else { Theme::Light }))
            .unwrap_or_default();

        self.set_theme(surface, store, theme);
        theme
    }

    /// Apply, persist and announce `theme`
    pub fn set_theme<S, P>(&mut self, surface: &mut S, store: &mut P, theme: Theme)
    where
        S: ThemeSurface + ?Sized,
        P: PreferenceStore + ?Sized,
    {
        surface.apply_theme(theme);
        if let Err(e) = store.set(THEME_KEY, theme.as_str()) {
            warn!("Failed to persist theme: {}", e);
        }
        surface.set_theme_icon(theme.icon(), theme != Theme::Dark);
        surface.announce_theme(theme);

        self.current = theme;
        info!("Theme set to {}", theme);
    }

    /// Flip between light and dark
    pub fn toggle<S, P>(&mut self, surface: &mut S, store: &mut P) -> Theme
    where
        S: ThemeSurface + ?Sized,
        P: PreferenceStore + ?Sized,
    {
        let next = self.current.toggled();
        self.set_theme(surface, store, next);
        next
    }
}
