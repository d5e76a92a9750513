use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use practice_audio::{AudioClock, ClipProbe, SimulatedClock};
use practice_domain::{format_time_label, ClipInfo, LoopRegion, PracticeConfig};
use practice_seeker::{
    DisplayFrame, PlaybackPositionController, PointerEvent, SharedLoopRegion, SpeedStepper,
};
use serde::Serialize;
use time::Duration;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulate a looped practice session on the seek bar", long_about = None)]
struct Cli {
    /// YAML or JSON practice configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Audio clip to read length and sample rate from
    #[arg(long)]
    clip: Option<PathBuf>,
    /// Length in seconds of the synthetic clip used when no clip is given
    #[arg(long, default_value_t = 180.0)]
    duration: f64,
    #[arg(long, default_value_t = 44_100)]
    sample_rate: u32,
    #[arg(long, default_value_t = 0.0)]
    loop_start: f64,
    #[arg(long, default_value_t = 1.0)]
    loop_end: f64,
    /// Normalized position to drag the cursor to before playback resumes
    #[arg(long)]
    seek: Option<f64>,
    /// Speed list steps away from the configured initial speed
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    speed_steps: i32,
    /// Number of hidden-bar update frames to simulate
    #[arg(long, default_value_t = 3_600)]
    frames: u32,
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

#[derive(Debug, Serialize)]
struct SeekRecord {
    time: f64,
    pre_roll: f64,
}

#[derive(Debug, Serialize)]
struct Summary {
    clip: ClipInfo,
    loop_region: LoopRegion,
    speed: String,
    seek_frame: Option<DisplayFrame>,
    seeks: Vec<SeekRecord>,
    loop_backs: u32,
    final_time: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let summary = run(&cli)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn load_config(path: &Path) -> Result<PracticeConfig> {
    let source =
        fs::read_to_string(path).with_context(|| format!("read config file {:?}", path))?;
    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => PracticeConfig::from_json_str(&source),
        _ => PracticeConfig::from_yaml_str(&source),
    }
    .with_context(|| format!("parse config file {:?}", path))?;
    Ok(config)
}

#[instrument(skip_all)]
fn run(cli: &Cli) -> Result<Summary> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => PracticeConfig::default(),
    };
    let clip = match &cli.clip {
        Some(path) => ClipProbe::open(path)?,
        None => ClipInfo::from_duration(cli.duration, cli.sample_rate, 2),
    };
    info!(?clip, "clip ready");

    let region = LoopRegion::new(cli.loop_start, cli.loop_end)?;
    let looper = SharedLoopRegion::new(region);

    let mut stepper = SpeedStepper::new(config.speed)?;
    let speed = Rc::new(Cell::new(stepper.speed()));
    let speed_sink = speed.clone();
    stepper.on_value_changed(move |value| speed_sink.set(value));
    for _ in 0..cli.speed_steps.unsigned_abs() {
        let moved = if cli.speed_steps > 0 {
            stepper.increment()
        } else {
            stepper.decrement()
        };
        if !moved {
            break;
        }
    }
    info!(speed = %stepper.label(), "playback speed");

    let mut controller =
        PlaybackPositionController::new(config.seeker, SimulatedClock::with_clip(clip), looper);
    let seeks = Rc::new(RefCell::new(Vec::new()));
    let seek_sink = seeks.clone();
    controller.add_song_time_hook(move |time: f64, pre_roll: f64| {
        seek_sink.borrow_mut().push(SeekRecord { time, pre_roll });
    });
    let last_frame = Rc::new(RefCell::new(None));
    let frame_sink = last_frame.clone();
    controller.set_display_sink(move |frame: &DisplayFrame| {
        *frame_sink.borrow_mut() = Some(frame.clone());
    });

    controller.seed_from_loop_start();

    if let Some(target) = cli.seek {
        controller.activate();
        let press = PointerEvent::at_position(
            controller.config(),
            target,
            controller.config().bar_height / 2.0,
        );
        controller.on_pointer_down(press);
        controller.render_tick();
        controller.deactivate();
    }

    let frame = std::time::Duration::try_from(Duration::seconds_f64(1.0 / cli.fps.max(1) as f64))?;
    let mut loop_backs = 0;
    for _ in 0..cli.frames {
        controller.clock_mut().set_speed(speed.get());
        controller.clock_mut().advance(frame);
        if controller.tick() {
            loop_backs += 1;
        }
        if controller.clock().is_finished() {
            break;
        }
    }

    let final_time = format_time_label(controller.clock().current_time_seconds());
    let seek_frame = last_frame.borrow_mut().take();
    let seeks = seeks.take();
    Ok(Summary {
        clip,
        loop_region: region,
        speed: stepper.label(),
        seek_frame,
        seeks,
        loop_backs,
        final_time,
    })
}
