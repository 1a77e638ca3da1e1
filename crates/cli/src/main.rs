use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::Parser;

use photobooth_core::camera::infrastructure::image_sequence_camera::ImageSequenceCamera;
use photobooth_core::capture::domain::capture_sequencer::CountdownEvent;
use photobooth_core::capture::domain::photo_slot::PhotoSlot;
use photobooth_core::landmarks::domain::landmark_source::LandmarkSource;
use photobooth_core::landmarks::infrastructure::scripted_landmark_source::ScriptedLandmarkSource;
use photobooth_core::landmarks::infrastructure::unavailable_landmark_source::UnavailableLandmarkSource;
use photobooth_core::overlay::domain::filter_variant::FilterVariant;
use photobooth_core::overlay::infrastructure::cpu_rasterizer::CpuRasterizer;
use photobooth_core::pipeline::photo_booth::PhotoBooth;
use photobooth_core::printing::domain::print_quantity::PrintQuantity;
use photobooth_core::printing::infrastructure::spool_printer::SpoolPrinter;
use photobooth_core::shared::constants::{MAX_PRINT_QUANTITY, MIN_PRINT_QUANTITY};
use photobooth_core::shared::settings::BoothSettings;

/// Bounds on the simulated frame rate; outside them the per-frame step
/// either rounds to zero or overflows `Duration`.
const MIN_FPS: f64 = 1.0;
const MAX_FPS: f64 = 1000.0;

/// Runs one photo booth session over a directory of recorded frames.
#[derive(Parser)]
#[command(name = "photobooth")]
struct Cli {
    /// Directory of camera frames, replayed in file-name order.
    frames: PathBuf,

    /// JSON landmark recording, one array of faces per frame.
    #[arg(long)]
    landmarks: Option<PathBuf>,

    /// Filter: party-hat, blush, crown, mask (or 0-3).
    #[arg(long)]
    filter: Option<FilterVariant>,

    /// Number of copies to print (1-10).
    #[arg(long)]
    quantity: Option<u32>,

    /// Photo to print after the countdown: photo1 or photo2.
    #[arg(long)]
    select: Option<PhotoSlot>,

    /// Directory print jobs are spooled into.
    #[arg(long, default_value = "spool")]
    spool: PathBuf,

    /// Simulated camera frame rate (1-1000).
    #[arg(long, default_value = "30")]
    fps: f64,

    /// Print preview resolution in dots per inch.
    #[arg(long)]
    dpi: Option<u32>,

    /// Delay between selecting a photo and printing it, in milliseconds.
    #[arg(long)]
    settle_ms: Option<u64>,

    /// Persist the effective filter, quantity, DPI and delay as defaults.
    #[arg(long)]
    save_settings: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let settings = effective_settings(&cli);
    if cli.save_settings {
        settings.save()?;
        log::info!("Settings saved");
    }

    let mut booth = PhotoBooth::new(
        Box::new(ImageSequenceCamera::new(&cli.frames)),
        open_landmarks(cli.landmarks.as_deref())?,
        Box::new(CpuRasterizer::new()),
        Box::new(SpoolPrinter::new(&cli.spool)),
        &settings,
    );
    booth.start()?;

    let step = Duration::from_secs_f64(1.0 / cli.fps);
    let mut now = Duration::ZERO;
    booth.tick(now);
    if !booth.start_countdown(now) {
        return Err("Countdown could not start".into());
    }
    now = run_countdown(&mut booth, now, step);
    log::info!("{} photos captured", booth.session().still_count());

    if let Some(slot) = cli.select {
        booth.select_and_print(slot, now)?;
        while booth.print_flow().has_pending() {
            now += step;
            booth.tick(now);
        }
        log::info!(
            "Printed {slot} x{} to {}",
            booth.session().print_quantity().get(),
            cli.spool.display()
        );
    }

    booth.stop();
    Ok(())
}

/// Ticks until the countdown completes. Returns the completion instant.
fn run_countdown(booth: &mut PhotoBooth, mut now: Duration, step: Duration) -> Duration {
    loop {
        for event in booth.tick(now) {
            match event {
                CountdownEvent::Numeral(n) => eprintln!("{n}..."),
                CountdownEvent::Capture(slot) => eprintln!("Snap! ({slot})"),
                CountdownEvent::Completed => return now,
            }
        }
        now += step;
    }
}

fn open_landmarks(path: Option<&Path>) -> Result<Box<dyn LandmarkSource>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let source = ScriptedLandmarkSource::from_path(path)?;
            log::info!("Loaded landmarks for {} frames", source.len());
            Ok(Box::new(source))
        }
        None => {
            log::warn!("No landmarks given, photos will have no decorations");
            Ok(Box::new(UnavailableLandmarkSource))
        }
    }
}

fn effective_settings(cli: &Cli) -> BoothSettings {
    let mut settings = BoothSettings::load();
    if let Some(filter) = cli.filter {
        settings.filter = filter;
    }
    if let Some(quantity) = cli.quantity {
        settings.print_quantity = PrintQuantity::new(quantity);
    }
    if let Some(dpi) = cli.dpi {
        settings.print_dpi = dpi;
    }
    if let Some(ms) = cli.settle_ms {
        settings.print_settle_ms = ms;
    }
    settings
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.frames.is_dir() {
        return Err(format!("Frames directory not found: {}", cli.frames.display()).into());
    }
    if let Some(path) = &cli.landmarks {
        if !path.exists() {
            return Err(format!("Landmark file not found: {}", path.display()).into());
        }
    }
    if let Some(q) = cli.quantity {
        if !(MIN_PRINT_QUANTITY..=MAX_PRINT_QUANTITY).contains(&q) {
            return Err(format!(
                "Quantity must be between {MIN_PRINT_QUANTITY} and {MAX_PRINT_QUANTITY}, got {q}"
            )
            .into());
        }
    }
    if !(MIN_FPS..=MAX_FPS).contains(&cli.fps) {
        return Err(format!(
            "Frame rate must be between {MIN_FPS} and {MAX_FPS}, got {}",
            cli.fps
        )
        .into());
    }
    if cli.dpi == Some(0) {
        return Err("DPI must be positive".into());
    }
    Ok(())
}
