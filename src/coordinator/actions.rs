//! URL-dependent page actions and player event handling

use super::PlaybackCoordinator;
use crate::controls::ToastKind;
use crate::launch::{ExternalPlayer, MediaUrl};
use crate::player::{playback_error_message, MediaPlayer, PlayerEvent, VideoMetadata};
use crate::storage::PreferenceStore;
use crate::surface::{MetaField, UiSurface};
use log::{debug, error, info, warn};

impl<S, P, St> PlaybackCoordinator<S, P, St>
where
    S: UiSurface,
    P: MediaPlayer,
    St: PreferenceStore,
{
    /// The media URL, or `None` after logging the refusal
    fn require_media_url(&self, action: &str) -> Option<MediaUrl> {
        if self.media_url.is_none() {
            warn!("{} refused: no valid media URL", action);
        }
        self.media_url.clone()
    }

    /// File name heading text, if it holds anything
    fn display_name(&self) -> Option<String> {
        self.surface
            .file_name()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
    }

    /// Start a download of the media file
    pub fn download(&mut self) {
        let Some(url) = self.require_media_url("Download") else {
            return;
        };
        let file_name = url.download_file_name(self.display_name().as_deref());

        match self.surface.trigger_download(url.as_str(), &file_name) {
            Ok(()) => {
                info!("Download started: {}", file_name);
                self.toast.notify(&mut self.surface, "Download started", ToastKind::Success);
            }
            Err(e) => {
                error!("Download error: {}", e);
                self.toast.notify(&mut self.surface, "Download failed", ToastKind::Error);
            }
        }
    }

    /// Copy the media URL, falling back to the legacy copy path
    pub fn copy_link(&mut self) {
        let Some(url) = self.require_media_url("Copy") else {
            return;
        };

        let copied = match self.surface.write_clipboard(url.as_str()) {
            Ok(()) => true,
            Err(e) => {
                warn!("Clipboard write failed, trying legacy copy: {}", e);
                match self.surface.legacy_copy(url.as_str()) {
                    Ok(()) => true,
                    Err(e) => {
                        error!("Clipboard error: {}", e);
                        false
                    }
                }
            }
        };

        if copied {
            self.toast.notify(&mut self.surface, "Link copied to clipboard", ToastKind::Success);
        } else {
            self.toast.notify(&mut self.surface, "Copy failed - please copy manually", ToastKind::Error);
        }
    }

    /// Open the media in an external player by id
    pub fn launch(&mut self, player_id: &str) {
        self.dropdowns.close_all(&mut self.surface);

        let Some(url) = self.require_media_url("Launch") else {
            return;
        };
        let player = match player_id.parse::<ExternalPlayer>() {
            Ok(player) => player,
            Err(e) => {
                warn!("{}", e);
                let message = format!("Unknown player: {}", player_id);
                self.toast.notify(&mut self.surface, message, ToastKind::Error);
                return;
            }
        };

        let link = player.deep_link(&url, self.display_name().as_deref());
        let name = player.display_name();
        debug!("Opening {} via {}", name, link);

        let (message, kind) = match self.surface.open_window(&link) {
            Ok(Some(handle)) if !handle.closed => (format!("Launching {}...", name), ToastKind::Info),
            Ok(_) => {
                warn!("{} did not open", name);
                (format!("Could not open {} - please install the app", name), ToastKind::Error)
            }
            Err(e) => {
                error!("Error opening external player: {}", e);
                (format!("Failed to open {}", name), ToastKind::Error)
            }
        };
        self.toast.notify(&mut self.surface, message, kind);
    }

    /// Hide the error overlay and reload the media source
    pub fn retry_playback(&mut self) {
        let Some(url) = self.require_media_url("Retry") else {
            return;
        };
        let Some(player) = self.player.as_mut() else {
            warn!("Retry refused: no player");
            return;
        };

        self.surface.set_error_overlay(None);
        self.surface.set_loading(true);

        if let Err(e) = player.reload_source(url.as_str()) {
            error!("Error setting video source: {}", e);
            self.surface.set_loading(false);
            self.surface
                .set_error_overlay(Some("Error loading video source. Please try again."));
        }
    }

    /// Refresh the metadata panel from the player
    pub fn update_metadata(&mut self) {
        let Some(player) = self.player.as_ref() else {
            return;
        };
        let meta = VideoMetadata::from_player(player);
        self.surface.set_meta(MetaField::Duration, &meta.duration);
        self.surface.set_meta(MetaField::Resolution, &meta.resolution);
        self.surface.set_meta(MetaField::FileSize, &meta.file_size);
    }

    /// Event from the player widget
    pub fn on_player_event(&mut self, event: PlayerEvent) {
        if !self.is_running() {
            return;
        }

        match event {
            PlayerEvent::Ready | PlayerEvent::LoadedMetadata => self.update_metadata(),
            PlayerEvent::LoadStart => self.surface.set_loading(true),
            PlayerEvent::CanPlay => self.surface.set_loading(false),
            PlayerEvent::Playing => {
                self.surface.set_loading(false);
                self.surface.set_error_overlay(None);
            }
            PlayerEvent::Error { code } => {
                error!("Video error: code {}", code);
                self.surface.set_loading(false);
                self.surface.set_error_overlay(Some(playback_error_message(code)));
            }
        }
    }
}
