//! Toast notifier
//!
//! At most one toast is visible. A new notification replaces the current
//! one and cancels its hide timer, so an old timer can never dismiss a
//! newer message.

use crate::surface::{TimerHost, TimerId, ToastSurface};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Toast severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastKind {
    /// CSS class applied to the toast element
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
        }
    }

    /// Icon class shown beside the message
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "fa-check-circle",
            ToastKind::Error => "fa-times-circle",
            ToastKind::Warning => "fa-exclamation-triangle",
            ToastKind::Info => "fa-info-circle",
        }
    }
}

/// The toast currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastState {
    pub message: String,
    pub kind: ToastKind,
    /// `None` for sticky toasts
    pub hide_timer: Option<TimerId>,
}

/// Queues and times short-lived status messages
#[derive(Debug)]
pub struct ToastNotifier {
    current: Option<ToastState>,
    default_duration: Duration,
}

impl ToastNotifier {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            current: None,
            default_duration,
        }
    }

    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    /// Show `message` for the default duration
    pub fn notify<S>(&mut self, surface: &mut S, message: impl Into<String>, kind: ToastKind)
    where
        S: TimerHost + ToastSurface + ?Sized,
    {
        let duration = self.default_duration;
        self.notify_for(surface, message, kind, duration);
    }

    /// Show `message`, replacing any pending toast, and hide it after `duration`
    pub fn notify_for<S>(&mut self, surface: &mut S, message: impl Into<String>, kind: ToastKind, duration: Duration)
    where
        S: TimerHost + ToastSurface + ?Sized,
    {
        self.show(surface, message.into(), kind, Some(duration));
    }

    /// Show `message` with no hide timer; it stays until replaced
    pub fn notify_sticky<S>(&mut self, surface: &mut S, message: impl Into<String>, kind: ToastKind)
    where
        S: TimerHost + ToastSurface + ?Sized,
    {
        self.show(surface, message.into(), kind, None);
    }

    fn show<S>(&mut self, surface: &mut S, message: String, kind: ToastKind, duration: Option<Duration>)
    where
        S: TimerHost + ToastSurface + ?Sized,
    {
        if !surface.has_toast() {
            return;
        }

        self.cancel_timer(surface);

        debug!("Toast [{}]: {}", kind.as_str(), message);
        surface.show_toast(&message, kind);

        let hide_timer = duration.map(|d| surface.set_timeout(d));
        self.current = Some(ToastState {
            message,
            kind,
            hide_timer,
        });
    }

    /// Route a fired timer. Returns true when the timer belonged to the toast.
    pub fn on_timer<S>(&mut self, surface: &mut S, id: TimerId) -> bool
    where
        S: TimerHost + ToastSurface + ?Sized,
    {
        let ours = self
            .current
            .as_ref()
            .is_some_and(|t| t.hide_timer == Some(id));
        if ours {
            self.current = None;
            surface.hide_toast();
        }
        ours
    }

    /// Hide the toast now and drop its timer
    pub fn dismiss<S>(&mut self, surface: &mut S)
    where
        S: TimerHost + ToastSurface + ?Sized,
    {
        if self.current.is_some() {
            self.cancel_timer(surface);
            self.current = None;
            surface.hide_toast();
        }
    }

    fn cancel_timer<S>(&mut self, surface: &mut S)
    where
        S: TimerHost + ?Sized,
    {
        if let Some(id) = self.current.as_mut().and_then(|t| t.hide_timer.take()) {
            surface.clear_timeout(id);
        }
    }

    /// The visible toast, if any
    pub fn current(&self) -> Option<&ToastState> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }
}
