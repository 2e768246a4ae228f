//! Bubble Dodge entry point
//!
//! Wires the settings, the minifb display backend, and the session state
//! machine together, and maps fatal errors to a nonzero exit code.

use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use bubble_dodge::display::{DisplayAdapter, Scene, WindowDisplay};
use bubble_dodge::sim::{Session, SessionConfig, Step};
use bubble_dodge::{GameError, Settings};

const SETTINGS_PATH: &str = "settings.json";

fn main() {
    env_logger::init();

    let settings = Settings::load(Path::new(SETTINGS_PATH));
    if let Err(e) = run(&settings) {
        log::error!("{e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(settings: &Settings) -> Result<(), GameError> {
    let mut display = WindowDisplay::new(settings)?;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let config = SessionConfig {
        width: settings.width as f32,
        height: settings.height as f32,
        release_interval: Duration::from_millis(settings.release_interval_ms),
        wave_pause: Duration::from_millis(settings.wave_pause_ms),
    };
    let mut session = Session::new(config, seed);

    // One cooperative loop: poll, advance the state machine against the
    // monotonic clock, present. Frame pacing comes from the display's
    // target fps.
    let start = Instant::now();
    while !display.is_closed() {
        let events = display.poll_events();
        if session.advance(start.elapsed(), &events) == Step::Quit {
            display.close();
            break;
        }
        display.present(&Scene::capture(&session))?;
    }

    log::info!("session ended on wave {}", session.wave_number());
    Ok(())
}
