//! Playback control coordinator
//!
//! One instance per page load. It owns every piece of transient UI state
//! (toast, dropdowns, spacebar hold, click and swipe gestures, theme) and
//! routes page input to them and to the media player. All timers it
//! starts are tracked here and cleared on the matching state change and
//! on [`PlaybackCoordinator::dispose`].

mod actions;

use crate::controls::shortcuts::{self, Command};
use crate::controls::{
    DoubleClickDetector, DropdownManager, HoldAction, HoldDetector, HoldInput, Swipe, SwipeTracker, Theme,
    ThemeSwitcher, ToastKind, ToastNotifier,
};
use crate::launch::MediaUrl;
use crate::player::MediaPlayer;
use crate::storage::PreferenceStore;
use crate::surface::{ClickEvent, Control, EventResponse, Key, KeyEvent, TargetKind, TimerId, UiSurface};
use crate::utils::error::Result;
use crate::utils::{clamp, Config};
use chrono::Datelike;
use log::{debug, error, info, warn};

/// Container id of the "open with" stream menu
pub const STREAM_MENU: &str = "stream-dropdown-container";

/// File name shown when the page rendered none
const DEFAULT_FILE_NAME: &str = "File";

/// Coordinator lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, `init` not yet called
    Created,
    /// Running with a valid media URL
    Active,
    /// Running, but the media URL is invalid; URL actions refuse
    Degraded,
    /// Torn down
    Disposed,
}

/// Façade between page input and the media player
pub struct PlaybackCoordinator<S, P, St>
where
    S: UiSurface,
    P: MediaPlayer,
    St: PreferenceStore,
{
    config: Config,
    surface: S,
    store: St,
    player: Option<P>,
    media_url: Option<MediaUrl>,
    lifecycle: Lifecycle,

    toast: ToastNotifier,
    dropdowns: DropdownManager,
    hold: HoldDetector,
    clicks: DoubleClickDetector,
    swipe: SwipeTracker,
    theme: ThemeSwitcher,
}

impl<S, P, St> PlaybackCoordinator<S, P, St>
where
    S: UiSurface,
    P: MediaPlayer,
    St: PreferenceStore,
{
    pub fn new(config: Config, surface: S, store: St) -> Self {
        Self {
            toast: ToastNotifier::new(config.toast.default_duration()),
            dropdowns: DropdownManager::new(config.dropdown.fallback_menu_height),
            hold: HoldDetector::new(config.controls.boost_speed),
            clicks: DoubleClickDetector::new(config.gestures.double_click_window()),
            swipe: SwipeTracker::new(config.gestures.swipe_threshold_px),
            theme: ThemeSwitcher::new(),
            config,
            surface,
            store,
            player: None,
            media_url: None,
            lifecycle: Lifecycle::Created,
        }
    }

    /// Bring the page up
    ///
    /// An invalid media URL shows one sticky error toast and leaves the
    /// coordinator degraded: theme and playback controls still work, URL
    /// actions refuse. A player that fails to initialise is logged and the
    /// page carries on without it.
    pub fn init<F>(&mut self, create_player: F) -> Lifecycle
    where
        F: FnOnce() -> Result<P>,
    {
        if self.lifecycle != Lifecycle::Created {
            warn!("init called in {:?}; ignoring", self.lifecycle);
            return self.lifecycle;
        }

        let page_url = self.surface.page_url();
        self.media_url = match MediaUrl::from_page_address(&page_url) {
            Ok(url) => {
                info!("Media URL: {}", url);
                Some(url)
            }
            Err(e) => {
                error!("{}", e);
                self.toast.notify_sticky(&mut self.surface, "Invalid media URL", ToastKind::Error);
                None
            }
        };

        self.surface.set_year(chrono::Local::now().year());
        let blank_name = self.surface.file_name().map_or(true, |n| n.trim().is_empty());
        if blank_name {
            self.surface.set_file_name(DEFAULT_FILE_NAME);
        }

        self.theme.initialize(&mut self.surface, &mut self.store);

        match create_player() {
            Ok(player) => {
                self.player = Some(player);
                self.update_metadata();
            }
            Err(e) => error!("Player initialization failed: {}", e),
        }

        self.surface.set_page_listeners(true);
        self.lifecycle = if self.media_url.is_some() { Lifecycle::Active } else { Lifecycle::Degraded };
        info!("Page initialised ({:?})", self.lifecycle);
        self.lifecycle
    }

    /// Tear the page down: clear every timer, close menus, drop listeners
    pub fn dispose(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }

        self.toast.dismiss(&mut self.surface);
        if let Some(id) = self.hold.reset() {
            self.surface.clear_timeout(id);
        }
        self.clicks.cancel(&mut self.surface);
        self.dropdowns.close_all(&mut self.surface);
        self.surface.set_page_listeners(false);

        self.lifecycle = Lifecycle::Disposed;
        info!("Page disposed");
    }

    fn is_running(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Active | Lifecycle::Degraded)
    }

    /// A timer scheduled through the surface fired
    pub fn on_timer(&mut self, id: TimerId) {
        if self.toast.on_timer(&mut self.surface, id) {
            return;
        }
        if self.clicks.on_timer(id) {
            return;
        }
        if self.hold.owns_timer(id) {
            self.hold.disarm();
            self.on_hold_threshold();
            return;
        }
        debug!("Ignoring stale timer {:?}", id);
    }

    /// Document-level key-down
    pub fn handle_key_down(&mut self, event: KeyEvent) -> EventResponse {
        if !self.is_running() {
            return EventResponse::Pass;
        }

        if self.dropdowns.open_container().is_some() {
            let response = self.dropdowns.handle_key(&mut self.surface, event.key);
            if response.is_handled() {
                return response;
            }
        }

        if event.key == Key::Space && !event.modifiers.command() {
            return self.space_down(event.target);
        }

        let Some(command) = shortcuts::resolve(&event) else {
            return EventResponse::Pass;
        };
        if command.needs_player() && self.player.is_none() {
            return EventResponse::Pass;
        }

        self.run_command(command);
        match command {
            // Escape keeps its default behaviour for other page elements
            Command::CloseMenus => EventResponse::Pass,
            _ => EventResponse::PreventDefault,
        }
    }

    /// Document-level key-up
    pub fn handle_key_up(&mut self, event: KeyEvent) -> EventResponse {
        if !self.is_running() || event.key != Key::Space {
            return EventResponse::Pass;
        }
        if event.target.accepts_text() || self.player.is_none() {
            return EventResponse::Pass;
        }

        let actions = self.hold.handle(HoldInput::KeyUp);
        self.apply_hold_actions(actions);
        EventResponse::PreventDefault
    }

    fn space_down(&mut self, target: TargetKind) -> EventResponse {
        if target.accepts_text() || self.player.is_none() {
            return EventResponse::Pass;
        }

        let actions = self.hold.handle(HoldInput::KeyDown);
        self.apply_hold_actions(actions);
        // Space scrolls the page otherwise, also on auto-repeat
        EventResponse::PreventDefault
    }

    fn on_hold_threshold(&mut self) {
        let Some(player) = self.player.as_ref() else {
            return;
        };
        let input = HoldInput::ThresholdElapsed {
            speed: player.speed(),
            paused: player.is_paused(),
        };
        let actions = self.hold.handle(input);
        self.apply_hold_actions(actions);
    }

    fn apply_hold_actions(&mut self, actions: Vec<HoldAction>) {
        for action in actions {
            match action {
                HoldAction::ArmTimer => {
                    let id = self.surface.set_timeout(self.config.controls.hold_threshold());
                    self.hold.arm(id);
                }
                HoldAction::CancelTimer => {
                    if let Some(id) = self.hold.disarm() {
                        self.surface.clear_timeout(id);
                    }
                }
                HoldAction::TogglePlay => {
                    if let Some(player) = self.player.as_mut() {
                        player.toggle_play();
                    }
                }
                HoldAction::Boost { speed, start_playback } => {
                    if let Some(player) = self.player.as_mut() {
                        if start_playback {
                            player.play();
                        }
                        player.set_speed(speed);
                    }
                    let message = format!("⚡ Hold for {}x Speed", speed);
                    self.shortcut_toast(message);
                }
                HoldAction::Restore { speed, pause } => {
                    if let Some(player) = self.player.as_mut() {
                        player.set_speed(speed);
                        if pause {
                            player.pause();
                        }
                    }
                    self.shortcut_toast("🔄 Normal Speed");
                }
            }
        }
    }

    /// One of the page's own controls was activated
    pub fn handle_control(&mut self, control: Control) {
        if !self.is_running() {
            return;
        }

        match control {
            Control::ThemeToggle => {
                self.theme.toggle(&mut self.surface, &mut self.store);
            }
            Control::StreamMenu => {
                self.toggle_dropdown(STREAM_MENU);
            }
            Control::StreamMenuClose => self.dropdowns.close_all(&mut self.surface),
            Control::PlayerCard(id) => self.launch(&id),
            Control::Download => self.download(),
            Control::CopyLink => self.copy_link(),
            Control::RetryPlayback => self.retry_playback(),
        }
    }

    /// Open or close a dropdown container; any other open one closes first
    pub fn toggle_dropdown(&mut self, id: &str) -> bool {
        if !self.is_running() {
            return false;
        }
        self.dropdowns.toggle(&mut self.surface, id)
    }

    /// Any click in the document
    pub fn handle_click(&mut self, event: ClickEvent) {
        if !self.is_running() {
            return;
        }

        self.dropdowns.handle_outside_click(&mut self.surface, event.dropdown.as_deref());

        if event.target == TargetKind::Player && self.player.is_some() && self.clicks.click(&mut self.surface) {
            self.toggle_boost_speed();
        }
    }

    pub fn handle_touch_start(&mut self, x: f64) {
        if self.is_running() {
            self.swipe.touch_start(x);
        }
    }

    pub fn handle_touch_end(&mut self, x: f64) {
        if !self.is_running() {
            return;
        }
        let Some(swipe) = self.swipe.touch_end(x) else {
            return;
        };
        let step = self.config.controls.seek_step_secs;
        if let Some(player) = self.player.as_mut() {
            let target = match swipe {
                Swipe::Left => player.position() + step,
                Swipe::Right => player.position() - step,
            };
            player.set_position(clamp(target, 0.0, player.duration().max(0.0)));
        }
    }

    fn toggle_boost_speed(&mut self) {
        let boost = self.config.controls.boost_speed;
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let speed = if player.speed() == 1.0 { boost } else { 1.0 };
        player.set_speed(speed);

        let message = if speed == 1.0 { "🔄 Normal Speed".to_string() } else { format!("⚡ {}x Speed", speed) };
        let duration = self.config.gestures.double_click_toast();
        self.toast.notify_for(&mut self.surface, message, ToastKind::Info, duration);
    }

    fn run_command(&mut self, command: Command) {
        debug!("Shortcut {:?}", command);
        match command {
            Command::ToggleTheme => {
                self.theme.toggle(&mut self.surface, &mut self.store);
            }
            Command::Download => self.download(),
            Command::CopyLink => self.copy_link(),
            Command::ToggleStreamMenu => {
                self.toggle_dropdown(STREAM_MENU);
            }
            Command::CloseMenus => self.dropdowns.close_all(&mut self.surface),
            player_command => self.run_player_command(player_command),
        }
    }

    fn run_player_command(&mut self, command: Command) {
        let seek_step = self.config.controls.seek_step_secs;
        let volume_step = self.config.controls.volume_step;
        let Some(player) = self.player.as_mut() else {
            return;
        };

        let message = match command {
            Command::ToggleFullscreen => {
                player.toggle_fullscreen();
                None
            }
            Command::ToggleMute => {
                let muted = !player.is_muted();
                player.set_muted(muted);
                Some(if muted { "🔇 Muted".to_string() } else { "🔊 Unmuted".to_string() })
            }
            Command::SeekBackward => {
                player.set_position((player.position() - seek_step).max(0.0));
                Some(format!("⏪ -{}s", seek_step))
            }
            Command::SeekForward => {
                player.set_position((player.position() + seek_step).min(player.duration()));
                Some(format!("⏩ +{}s", seek_step))
            }
            Command::VolumeUp => {
                player.set_volume(clamp(player.volume() + volume_step, 0.0, 1.0));
                Some(format!("🔊 Volume: {}%", (player.volume() * 100.0).round()))
            }
            Command::VolumeDown => {
                player.set_volume(clamp(player.volume() - volume_step, 0.0, 1.0));
                Some(format!("🔉 Volume: {}%", (player.volume() * 100.0).round()))
            }
            _ => None,
        };

        if let Some(message) = message {
            self.shortcut_toast(message);
        }
    }

    fn shortcut_toast(&mut self, message: impl Into<String>) {
        let duration = self.config.controls.shortcut_toast();
        self.toast.notify_for(&mut self.surface, message, ToastKind::Info, duration);
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    pub fn player(&self) -> Option<&P> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut P> {
        self.player.as_mut()
    }

    pub fn media_url(&self) -> Option<&MediaUrl> {
        self.media_url.as_ref()
    }

    pub fn toast(&self) -> &ToastNotifier {
        &self.toast
    }

    pub fn dropdowns(&self) -> &DropdownManager {
        &self.dropdowns
    }

    pub fn hold(&self) -> &HoldDetector {
        &self.hold
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }
}
