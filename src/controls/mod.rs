//! Page controls
//!
//! Each control is a small state holder that talks to the page only
//! through the surface traits it is handed. They share nothing with each
//! other; the coordinator composes them.

pub mod dropdown;
pub mod gestures;
pub mod shortcuts;
pub mod spacebar;
pub mod theme;
pub mod toast;

pub use dropdown::{compute_placement, DropdownManager, MenuPlacement};
pub use gestures::{DoubleClickDetector, Swipe, SwipeTracker};
pub use shortcuts::Command;
pub use spacebar::{HoldAction, HoldDetector, HoldInput, HoldPhase};
pub use theme::{Theme, ThemeSwitcher};
pub use toast::{ToastKind, ToastNotifier, ToastState};
