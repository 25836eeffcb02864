use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};
use std::path::PathBuf;

use watchpage::controls::ToastKind;
use watchpage::session::{self, Session};
use watchpage::{Config, JsonFileStore, MediaPlayer, PlaybackCoordinator};

/// watchpage - replay input sessions against the playback control coordinator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Watch page address (overrides the session's)
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// JSON session to replay; the built-in demo runs when omitted
    #[arg(short, long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Extra configuration file applied after the system and user files
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Preferences file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    prefs: Option<PathBuf>,

    /// Let waits take real time
    #[arg(long)]
    realtime: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let config = Config::load_with(args.config.as_deref())?;

    // Initialize logging
    let log_level = if args.debug { "debug" } else { config.general.log_level.as_str() };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    info!("Starting watchpage v{}", env!("CARGO_PKG_VERSION"));

    let mut session = match &args.script {
        Some(path) => Session::load(path)?,
        None => {
            info!("No session given, replaying the built-in demo");
            Session::demo()
        }
    };
    if let Some(url) = args.url {
        session.page_url = Some(url);
    }

    let store = match args.prefs {
        Some(path) => JsonFileStore::open(path),
        None => JsonFileStore::open_default()?,
    };
    info!("Preferences at {:?}", store.path());

    let mut coordinator = PlaybackCoordinator::new(config, session.surface(), store);
    coordinator.init(|| Ok(session.player()));

    let report = if args.realtime {
        session::replay_realtime(&mut coordinator, &session.steps).await
    } else {
        session::replay(&mut coordinator, &session.steps)
    };

    for (message, kind) in &report.toasts {
        match kind {
            ToastKind::Error => error!("Toast: {}", message),
            ToastKind::Warning => warn!("Toast: {}", message),
            _ => info!("Toast: {}", message),
        }
    }
    for effect in &report.effects {
        info!("Effect: {:?}", effect);
    }
    if let Some(player) = coordinator.player() {
        info!(
            "Player at {:.1}s of {:.1}s, speed {}x, {}",
            player.position(),
            player.duration(),
            player.speed(),
            if player.is_paused() { "paused" } else { "playing" }
        );
    }
    info!(
        "Replayed {} step(s) over {:.1}s ({:?}, theme {})",
        report.steps,
        report.elapsed.as_secs_f64(),
        report.lifecycle,
        report.theme
    );

    coordinator.dispose();
    Ok(())
}
