use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use eframe::egui;

use field_replay::app::FieldReplayApp;
use field_replay::config::{AxisMode, GridRange, PanelConfig, ReplayConfig};
use field_replay::data::{self, writer, AxisScaler, FrameSeries, Layout};
use field_replay::export;
use field_replay::playback::PlaybackDriver;
use field_replay::state::AppState;

#[derive(Parser)]
#[command(name = "field-replay", version, about = "Replay 1-D field simulation dumps")]
struct Cli {
    /// JSON configuration file; command-line flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play the series once in a window
    View {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Encode the playback as a looping GIF
    Export {
        #[command(flatten)]
        input: InputArgs,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Frames per second (default: one frame per interval-ms)
        #[arg(long)]
        fps: Option<u32>,
    },
    /// Write every frame as a PNG into a directory
    Frames {
        #[command(flatten)]
        input: InputArgs,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Overlay the initial state and several later timesteps in one PNG
    Snapshot {
        #[command(flatten)]
        input: InputArgs,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        channel: Option<String>,
        #[arg(long)]
        count: Option<usize>,
        /// Pick the timesteps at random with this seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Write the parsed series back as a tabular text dump
    Dump {
        #[command(flatten)]
        input: InputArgs,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Print frame count, channels and bounds
    Inspect {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Simulation dump to read
    input: Option<PathBuf>,
    #[arg(long, value_enum)]
    layout: Option<Layout>,
    /// Rows (tabular) or samples (marker / blocked) per frame
    #[arg(long)]
    samples: Option<usize>,
    /// Render at most this many frames
    #[arg(long)]
    frames: Option<usize>,
    #[arg(long)]
    interval_ms: Option<u64>,
    /// Fixed y-range for every panel, e.g. `--ylim=-1.2,1.2`
    #[arg(long, value_parser = parse_range, allow_hyphen_values = true)]
    ylim: Option<(f64, f64)>,
    /// x-range of a marker file's grid, e.g. `--grid=-100,100`
    #[arg(long, value_parser = parse_range, allow_hyphen_values = true)]
    grid: Option<(f64, f64)>,
    /// Comma-separated channels sharing one chart; repeat for more charts
    #[arg(long = "panel")]
    panels: Vec<String>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
}

impl InputArgs {
    fn apply(&self, config: &mut ReplayConfig) {
        if let Some(input) = &self.input {
            config.input = Some(input.clone());
        }
        if let Some(layout) = self.layout {
            config.parser.layout = layout;
        }
        if self.samples.is_some() {
            config.parser.samples_per_frame = self.samples;
        }
        if self.frames.is_some() {
            config.frames = self.frames;
        }
        if let Some(ms) = self.interval_ms {
            config.interval_ms = ms;
        }
        if let Some((min, max)) = self.ylim {
            config.axis = Some(AxisMode::Fixed { min, max });
        }
        if let Some((min, max)) = self.grid {
            config.parser.grid = Some(GridRange { min, max });
        }
        if !self.panels.is_empty() {
            config.panels = self
                .panels
                .iter()
                .map(|p| PanelConfig {
                    channels: p.split(',').map(|c| c.trim().to_string()).collect(),
                    label: None,
                    axis: AxisMode::Auto,
                })
                .collect();
        }
        if let Some(w) = self.width {
            config.width = w;
        }
        if let Some(h) = self.height {
            config.height = h;
        }
    }
}

fn parse_range(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected MIN,MAX, got '{s}'"))?;
    let min = a.trim().parse::<f64>().map_err(|e| format!("'{a}': {e}"))?;
    let max = b.trim().parse::<f64>().map_err(|e| format!("'{b}': {e}"))?;
    Ok((min, max))
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ReplayConfig::load(path)?,
        None => ReplayConfig::default(),
    };

    match cli.command {
        Command::View { input } => {
            input.apply(&mut config);
            config.validate()?;
            view(config)
        }
        Command::Export { input, output, fps } => {
            input.apply(&mut config);
            if output.is_some() {
                config.output = output;
            }
            if fps.is_some() {
                config.fps = fps;
            }
            config.validate()?;
            let series = load_series(&config)?;
            let path = config
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from("animation.gif"));
            let mut driver = PlaybackDriver::from_config(series, &config)?;
            export::export_animation(
                &mut driver,
                &path,
                (config.width, config.height),
                config.frame_delay(),
            )?;
            Ok(())
        }
        Command::Frames { input, output } => {
            input.apply(&mut config);
            config.validate()?;
            let series = load_series(&config)?;
            let mut driver = PlaybackDriver::from_config(series, &config)?;
            export::export_frames(&mut driver, &output, (config.width, config.height))?;
            Ok(())
        }
        Command::Snapshot {
            input,
            output,
            channel,
            count,
            seed,
        } => {
            input.apply(&mut config);
            if output.is_some() {
                config.output = output;
            }
            if channel.is_some() {
                config.snapshot.channel = channel;
            }
            if let Some(count) = count {
                config.snapshot.count = count;
            }
            if seed.is_some() {
                config.snapshot.seed = seed;
            }
            config.validate()?;
            let series = load_series(&config)?;
            let path = config
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from("snapshot.png"));
            export::export_snapshot(
                &series,
                &config.snapshot,
                config.axis.unwrap_or_default(),
                &path,
                (config.width, config.height),
            )?;
            Ok(())
        }
        Command::Dump { input, output } => {
            input.apply(&mut config);
            config.validate()?;
            let series = load_series(&config)?;
            writer::write_tabular_file(&series, &output)
        }
        Command::Inspect { input } => {
            input.apply(&mut config);
            config.validate()?;
            let series = load_series(&config)?;
            print_summary(&series)
        }
    }
}

fn load_series(config: &ReplayConfig) -> Result<Arc<FrameSeries>> {
    let path = config
        .input
        .as_deref()
        .context("no input file given (pass a path or set `input` in the config)")?;
    Ok(Arc::new(data::load_file(path, &config.parser)?))
}

fn print_summary(series: &FrameSeries) -> Result<()> {
    let (t0, t1) = series.time_span();
    println!("frames:   {}", series.len());
    println!("samples:  {}", series.sample_count());
    println!("time:     {t0} .. {t1}");

    let scaler = AxisScaler::new(series);
    let x = scaler.grid_bounds();
    println!("x:        {} .. {}", x.min, x.max);
    for channel in series.channel_names() {
        let raw = series.bounds(channel);
        let shown = scaler.bounds(channel)?;
        match raw {
            Some(b) => println!(
                "{channel:<9} {} .. {} (display {} .. {})",
                b.min, b.max, shown.min, shown.max
            ),
            None => println!("{channel:<9} no finite samples"),
        }
    }
    Ok(())
}

fn view(config: ReplayConfig) -> Result<()> {
    let mut state = AppState::new(config);
    if let Some(path) = state.config.input.clone() {
        let series = data::load_file(&path, &state.config.parser)?;
        state.source = Some(path);
        state.set_series(Arc::new(series));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Field Replay",
        options,
        Box::new(|_cc| Ok(Box::new(FieldReplayApp::new(state)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
