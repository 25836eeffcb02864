//! External player deep links
//!
//! Every supported "open with" target is a variant of [`ExternalPlayer`];
//! identifiers coming from the page are parsed once and unknown ones are
//! rejected instead of silently falling back to some default.

pub mod media_url;

pub use media_url::MediaUrl;

use crate::utils::error::WatchPageError;
use std::fmt;
use std::str::FromStr;

/// Title used in Android intents when the page has no file name
const DEFAULT_TITLE: &str = "Video";

/// Players the page can hand the stream to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalPlayer {
    // Desktop
    VlcDesktop,
    PotPlayer,
    MpcHc,
    KmPlayerDesktop,

    // Mobile
    VlcAndroid,
    MxPlayer,
    MxPlayerPro,
    NPlayer,
    SPlayer,
    KmPlayerAndroid,
}

/// How a player's deep link is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkStyle {
    /// `<scheme>://<url>`
    Scheme(&'static str),
    /// `<prefix><url>`
    Prefix(&'static str),
    /// Android intent targeting a package, with the title as an extra
    Intent { package: &'static str },
    /// Android intent with an explicit action and no extras
    ActionIntent { action: &'static str, package: &'static str },
}

impl ExternalPlayer {
    /// Every player, desktop first
    pub const ALL: [ExternalPlayer; 10] = [
        ExternalPlayer::VlcDesktop,
        ExternalPlayer::PotPlayer,
        ExternalPlayer::MpcHc,
        ExternalPlayer::KmPlayerDesktop,
        ExternalPlayer::VlcAndroid,
        ExternalPlayer::MxPlayer,
        ExternalPlayer::MxPlayerPro,
        ExternalPlayer::NPlayer,
        ExternalPlayer::SPlayer,
        ExternalPlayer::KmPlayerAndroid,
    ];

    /// Identifier used by the page's player cards
    pub fn id(&self) -> &'static str {
        match self {
            ExternalPlayer::VlcDesktop => "vlc-pc",
            ExternalPlayer::PotPlayer => "potplayer",
            ExternalPlayer::MpcHc => "mpc",
            ExternalPlayer::KmPlayerDesktop => "kmpc",
            ExternalPlayer::VlcAndroid => "vlc",
            ExternalPlayer::MxPlayer => "mx",
            ExternalPlayer::MxPlayerPro => "mxpro",
            ExternalPlayer::NPlayer => "nplayer",
            ExternalPlayer::SPlayer => "splayer",
            ExternalPlayer::KmPlayerAndroid => "km",
        }
    }

    /// Human readable name for toasts
    pub fn display_name(&self) -> &'static str {
        match self {
            ExternalPlayer::VlcDesktop => "VLC (PC)",
            ExternalPlayer::PotPlayer => "PotPlayer",
            ExternalPlayer::MpcHc => "MPC-HC",
            ExternalPlayer::KmPlayerDesktop => "KMPlayer (PC)",
            ExternalPlayer::VlcAndroid => "VLC",
            ExternalPlayer::MxPlayer => "MX Player",
            ExternalPlayer::MxPlayerPro => "MX Player Pro",
            ExternalPlayer::NPlayer => "nPlayer",
            ExternalPlayer::SPlayer => "SPlayer",
            ExternalPlayer::KmPlayerAndroid => "KMPlayer",
        }
    }

    pub fn is_desktop(&self) -> bool {
        matches!(
            self,
            ExternalPlayer::VlcDesktop
                | ExternalPlayer::PotPlayer
                | ExternalPlayer::MpcHc
                | ExternalPlayer::KmPlayerDesktop
        )
    }

    fn link_style(&self) -> LinkStyle {
        match self {
            ExternalPlayer::VlcDesktop => LinkStyle::Scheme("vlc"),
            ExternalPlayer::PotPlayer => LinkStyle::Scheme("potplayer"),
            ExternalPlayer::MpcHc => LinkStyle::Scheme("mpc"),
            ExternalPlayer::KmPlayerDesktop => LinkStyle::Scheme("kmplayer"),
            ExternalPlayer::VlcAndroid => LinkStyle::Intent { package: "org.videolan.vlc" },
            ExternalPlayer::MxPlayer => LinkStyle::Intent { package: "com.mxtech.videoplayer.ad" },
            ExternalPlayer::MxPlayerPro => LinkStyle::Intent { package: "com.mxtech.videoplayer.pro" },
            ExternalPlayer::NPlayer => LinkStyle::Prefix("nplayer-"),
            ExternalPlayer::SPlayer => LinkStyle::ActionIntent {
                action: "com.young.simple.player.playback_online",
                package: "com.young.simple.player",
            },
            ExternalPlayer::KmPlayerAndroid => LinkStyle::Intent { package: "com.kmplayer" },
        }
    }

    /// Build the deep link that asks this player to open `media`
    ///
    /// `title` is passed to Android players that accept one; blank titles
    /// fall back to "Video".
    pub fn deep_link(&self, media: &MediaUrl, title: Option<&str>) -> String {
        let url = media.as_str();
        match self.link_style() {
            LinkStyle::Scheme(scheme) => format!("{}://{}", scheme, url),
            LinkStyle::Prefix(prefix) => format!("{}{}", prefix, url),
            LinkStyle::Intent { package } => {
                let title = title.map(str::trim).filter(|t| !t.is_empty()).unwrap_or(DEFAULT_TITLE);
                format!(
                    "intent:{}#Intent;package={};S.title={};end",
                    url,
                    package,
                    urlencoding::encode(title)
                )
            }
            LinkStyle::ActionIntent { action, package } => {
                format!("intent:{}#Intent;action={};package={};end", url, action, package)
            }
        }
    }
}

impl FromStr for ExternalPlayer {
    type Err = WatchPageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExternalPlayer::ALL
            .iter()
            .copied()
            .find(|p| p.id() == s)
            .ok_or_else(|| WatchPageError::UnknownPlayer(s.to_string()))
    }
}

impl fmt::Display for ExternalPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
