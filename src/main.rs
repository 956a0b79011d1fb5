//! Alpha Pop entry point
//!
//! Headless demo: an idle player taps bubbles while silent audio and a logging
//! renderer stand in for the device. Usage:
//!
//! ```text
//! alpha-pop [settings.json] [seconds]
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use alpha_pop::assets::{AssetLoader, AssetSet, BuiltinAssets, DirectoryAssets};
use alpha_pop::audio::SilentAudio;
use alpha_pop::platform::{Event, Game};
use alpha_pop::renderer::LogRenderer;
use alpha_pop::sim::{IdlePlayer, Session};
use alpha_pop::{SessionError, Settings};

const DEFAULT_SETTINGS: &str = "alpha-pop.json";
const ASSET_DIR: &str = "assets";
const DEFAULT_SECONDS: u32 = 60;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Alpha Pop (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS));
    let seconds = match args.next().map(|s| s.parse::<u32>()) {
        None => DEFAULT_SECONDS,
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Bad duration: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&settings_path, seconds) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Number of ticks in a run of `seconds`
fn demo_ticks(seconds: u32, tick_rate: u32) -> u64 {
    u64::from(seconds) * u64::from(tick_rate)
}

fn run(settings_path: &Path, seconds: u32) -> Result<(), SessionError> {
    let settings = Settings::load_or_default(settings_path)?;

    let loader: Rc<dyn AssetLoader> = if Path::new(ASSET_DIR).is_dir() {
        Rc::new(DirectoryAssets::new(ASSET_DIR))
    } else {
        log::info!("No {ASSET_DIR}/ directory, using built-in asset names");
        Rc::new(BuiltinAssets::default())
    };
    let assets = AssetSet::load(loader)?;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    log::info!("Game initialized with seed: {}", seed);

    let ticks = demo_ticks(seconds, settings.tick_rate);
    let session = Session::new(seed, settings, assets)?;
    let mut game = Game::new(
        session,
        Box::new(SilentAudio::default()),
        Box::new(LogRenderer::default()),
    );
    let mut idle = IdlePlayer::new(seed ^ 0x1D1E, 20, 0.1);

    game.start();
    for _ in 0..ticks {
        game.push(Event::Tick);
        if let Some(tap) = idle.decide(&game.session) {
            game.push(Event::PointerDown(tap));
        }
        if game.run_until_idle().is_break() {
            break;
        }
    }

    let snapshot = game.session.snapshot();
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => log::info!("Final state:\n{json}"),
        Err(e) => log::warn!("Could not serialize snapshot: {e}"),
    }
    Ok(())
}
