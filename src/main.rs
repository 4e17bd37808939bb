//! Kurve entry point
//!
//! Headless host: plays one round with every participant on autopilot,
//! rendering into the software raster, and optionally writes the final frame
//! as an image (format from the file extension, e.g. `.png` or `.ppm`).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use image::{DynamicImage, RgbaImage};

use kurve::Settings;
use kurve::consts::AUTOPILOT_LOOKAHEAD;
use kurve::renderer::{Canvas, Raster};
use kurve::sim::{FrameSnapshot, GameEvent, RoundPhase, RoundState, autopilot_input, tick};

#[derive(Parser, Debug)]
#[command(name = "kurve", version, about = "Play one autopilot round of Kurve")]
struct Cli {
    /// JSON settings file; defaults are used when omitted
    settings: Option<PathBuf>,

    /// Write the final frame to this image file
    #[arg(long, value_name = "FILE")]
    dump: Option<PathBuf>,
}

/// Signals a redraw every `1 / fps` seconds of simulated time
struct RedrawTimer {
    interval: f64,
    accumulator: f64,
}

impl RedrawTimer {
    fn new(fps: f64) -> Self {
        Self {
            interval: 1.0 / fps,
            accumulator: 0.0,
        }
    }

    /// Advance by `dt` seconds; true when a frame is due
    fn advance(&mut self, dt: f64) -> bool {
        self.accumulator += dt;
        if self.accumulator >= self.interval {
            self.accumulator %= self.interval;
            true
        } else {
            false
        }
    }
}

/// Save a frame as an image, alpha dropped
fn write_image(path: &Path, frame: &FrameSnapshot) -> image::ImageResult<()> {
    let buffer = RgbaImage::from_raw(frame.width(), frame.height(), frame.as_rgba8().to_vec())
        .ok_or_else(|| {
            image::ImageError::Parameter(image::error::ParameterError::from_kind(
                image::error::ParameterErrorKind::DimensionMismatch,
            ))
        })?;
    DynamicImage::ImageRgba8(buffer).to_rgb8().save(path)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Kurve (headless) starting...");

    let args = Cli::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    let mut state = RoundState::from_settings(&settings);
    let mut canvas = Raster::new(settings.arena.width, settings.arena.height);
    let mut timer = RedrawTimer::new(settings.fps);
    let ids: Vec<u32> = state.participants.iter().map(|p| p.id).collect();
    let dt = 1.0 / settings.fps;

    while state.phase == RoundPhase::Running && state.time_ticks < settings.max_ticks {
        let input = autopilot_input(&state, &ids, AUTOPILOT_LOOKAHEAD);
        let redraw = timer.advance(dt);
        for event in tick(&mut state, &input, &mut canvas, redraw) {
            if let GameEvent::RoundOver { survivor } = event {
                match survivor {
                    Some(id) => println!("Participant {} wins after {} ticks", id, state.time_ticks),
                    None => println!("No survivors after {} ticks", state.time_ticks),
                }
            }
        }
    }

    if state.phase == RoundPhase::Running {
        println!(
            "Stopped after {} ticks with {} participants alive",
            state.time_ticks,
            state.alive_count()
        );
    }

    if let Some(path) = &args.dump {
        // Make sure the dump shows the final positions
        kurve::sim::render(&state, &mut canvas);
        if let Err(e) = write_image(path, &canvas.capture()) {
            log::error!("Failed to write {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
        log::info!("Final frame written to {}", path.display());
    }

    ExitCode::SUCCESS
}
