//! watchpage - playback control coordinator for a single-video streaming page
//!
//! The coordinator sits between page input and an embedded media player:
//! toasts, dropdown menus, spacebar tap/hold, keyboard shortcuts, touch
//! gestures, the theme preference and "open with" deep links. The page
//! itself is reached only through the [`surface::UiSurface`] traits.

pub mod controls;
pub mod coordinator;
pub mod launch;
pub mod player;
pub mod session;
pub mod storage;
pub mod surface;
pub mod utils;

pub use coordinator::{Lifecycle, PlaybackCoordinator, STREAM_MENU};
pub use launch::{ExternalPlayer, MediaUrl};
pub use player::{MediaPlayer, PlayerEvent, SimulatedPlayer};
pub use session::{Session, SessionReport, SessionStep};
pub use storage::{JsonFileStore, MemoryStore, PreferenceStore};
pub use surface::{HeadlessSurface, UiSurface};
pub use utils::{Config, Result, WatchPageError};
