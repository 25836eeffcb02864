//! UI surface abstraction for watchpage
//!
//! The coordinator never touches a real document. Everything it needs
//! from the page (timers, the toast element, dropdown geometry, theme
//! attributes, clipboard, downloads, new windows) goes through the
//! capability traits below, so a browser binding and the in-memory
//! [`HeadlessSurface`] are interchangeable.

pub mod headless;

pub use headless::{HeadlessSurface, PageEffect};

use crate::controls::dropdown::MenuPlacement;
use crate::controls::theme::Theme;
use crate::controls::toast::ToastKind;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Handle of a scheduled one-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Vertical extent of an element in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

/// Handle returned by a successful window open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHandle {
    /// Whether the new context was closed right away (popup blockers do this)
    pub closed: bool,
}

/// Metadata fields shown under the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetaField {
    Duration,
    Resolution,
    FileSize,
}

/// Non-blocking one-shot timers
pub trait TimerHost {
    /// Schedule a callback after `delay`; the host later reports the id back
    fn set_timeout(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timer. Unknown or fired ids are ignored.
    fn clear_timeout(&mut self, id: TimerId);
}

/// The page's single toast element
pub trait ToastSurface {
    /// Whether the page has a toast element at all
    fn has_toast(&self) -> bool;

    /// Show `message` styled for `kind`
    fn show_toast(&mut self, message: &str, kind: ToastKind);

    /// Hide the toast
    fn hide_toast(&mut self);
}

/// Dropdown containers and their menus
pub trait DropdownSurface {
    fn has_dropdown(&self, id: &str) -> bool;

    /// Bounding box of the container, if it is laid out
    fn container_rect(&self, id: &str) -> Option<Rect>;

    fn viewport_height(&self) -> f64;

    /// Measured menu height; zero when not yet rendered
    fn menu_height(&self, id: &str) -> f64;

    fn set_dropdown_open(&mut self, id: &str, open: bool);

    fn place_menu(&mut self, id: &str, placement: MenuPlacement);

    /// Number of focusable items in the menu
    fn menu_item_count(&self, id: &str) -> usize;

    /// Index of the menu item holding focus
    fn focused_menu_item(&self, id: &str) -> Option<usize>;

    fn focus_menu_item(&mut self, id: &str, index: usize);

    /// Return focus to the control that opened the menu
    fn focus_trigger(&mut self, id: &str);

    /// Register or remove the document-level outside-click and keydown listeners
    fn set_dismiss_listeners(&mut self, active: bool);
}

/// Page-wide theme attributes
pub trait ThemeSurface {
    /// Apply the theme attribute and the matching browser theme colour
    fn apply_theme(&mut self, theme: Theme);

    /// Update the toggle button's icon class and pressed state
    fn set_theme_icon(&mut self, icon: &str, pressed: bool);

    /// Notify other listeners that the theme changed
    fn announce_theme(&mut self, theme: Theme);

    /// The system colour scheme preference, if the platform reports one
    fn system_prefers_dark(&self) -> Option<bool>;
}

/// Everything else the page can do
pub trait PageActions {
    /// Address of the current page
    fn page_url(&self) -> String;

    /// Text of the file name heading, if present
    fn file_name(&self) -> Option<String>;

    fn set_file_name(&mut self, name: &str);

    fn set_year(&mut self, year: i32);

    fn write_clipboard(&mut self, text: &str) -> Result<()>;

    /// Select-and-copy through a temporary text field
    fn legacy_copy(&mut self, text: &str) -> Result<()>;

    fn trigger_download(&mut self, url: &str, file_name: &str) -> Result<()>;

    /// Open `url` in a new browsing context; `None` when no handle came back
    fn open_window(&mut self, url: &str) -> Result<Option<WindowHandle>>;

    fn set_meta(&mut self, field: MetaField, text: &str);

    fn set_loading(&mut self, visible: bool);

    /// Show the playback error overlay with a message, or hide it with `None`
    fn set_error_overlay(&mut self, message: Option<&str>);

    /// Register or remove the page's input listeners
    fn set_page_listeners(&mut self, active: bool);
}

/// Full capability set the coordinator runs against
pub trait UiSurface: TimerHost + ToastSurface + DropdownSurface + ThemeSurface + PageActions {}

impl<T> UiSurface for T where T: TimerHost + ToastSurface + DropdownSurface + ThemeSurface + PageActions {}

/// Keyboard key types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Space,
    Escape,
    Tab,

    // Navigation
    Left,
    Right,
    Up,
    Down,
    Home,
    End,

    /// Printable character, as typed
    Char(char),
}

impl Key {
    /// Lower-cased character for letter keys
    pub fn letter(&self) -> Option<char> {
        match self {
            Key::Char(c) => Some(c.to_ascii_lowercase()),
            _ => None,
        }
    }
}

/// Keyboard modifier state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyModifiers {
    /// Ctrl on most platforms, Cmd on macOS
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// What kind of element an event landed on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Text input or textarea
    TextInput,
    /// Content-editable element
    Editable,
    /// The media player area
    Player,
    /// Anything else on the page
    #[default]
    Page,
}

impl TargetKind {
    /// Typing targets swallow playback shortcuts
    pub fn accepts_text(&self) -> bool {
        matches!(self, TargetKind::TextInput | TargetKind::Editable)
    }
}

/// A key press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: KeyModifiers,
    pub target: TargetKind,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::default(),
            target: TargetKind::Page,
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn on(mut self, target: TargetKind) -> Self {
        self.target = target;
        self
    }
}

/// A click anywhere in the document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClickEvent {
    pub target: TargetKind,
    /// Dropdown container the click landed inside, if any
    pub dropdown: Option<String>,
}

/// Page controls with their own click handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    ThemeToggle,
    StreamMenu,
    StreamMenuClose,
    /// One of the "open with" cards, carrying its player id
    PlayerCard(String),
    Download,
    CopyLink,
    RetryPlayback,
}

/// How the page should treat the native event after a handler ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// Not ours; let the browser do its default
    Pass,
    /// Suppress the default action
    PreventDefault,
    /// Suppress the default action and stop propagation
    Consume,
}

impl EventResponse {
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResponse::Pass)
    }
}
