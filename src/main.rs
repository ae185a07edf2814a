use std::time::Duration;

use anyhow::Context;
use chrono::NaiveTime;
use clap::{Parser, ValueEnum};

use watchface::{
    init_logging, AmbientPolicy, ClockTime, FaceKind, LoggingConfig, TransformFaceStyle,
    WatchApp, WatchConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Face {
    /// Redraws needles on a cleared canvas every frame
    Canvas,
    /// Rotates pre-built hand elements
    Transform,
}

impl From<Face> for FaceKind {
    fn from(face: Face) -> Self {
        match face {
            Face::Canvas => FaceKind::Canvas,
            Face::Transform => FaceKind::Transform,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "watchface", about = "Minimal analog watch face", version)]
struct Cli {
    /// Renderer variant
    #[arg(long, value_enum, default_value_t = Face::Canvas)]
    face: Face,

    /// Window edge length in logical pixels
    #[arg(long, default_value_t = 360)]
    size: u32,

    /// Window title
    #[arg(long, default_value = "Watch")]
    title: String,

    /// Ambient tick period in seconds
    #[arg(long, value_name = "SECS", default_value_t = 60, conflicts_with = "external_tick")]
    ambient_tick: u64,

    /// Only tick in ambient mode when `t` is pressed
    #[arg(long)]
    external_tick: bool,

    /// Show a second hand on the transform face
    #[arg(long)]
    seconds: bool,

    /// Start the clock at HH:MM:SS instead of the local time
    #[arg(long, value_name = "HH:MM:SS", value_parser = parse_time)]
    at: Option<ClockTime>,

    /// Log filter, env_logger syntax (overrides RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

fn parse_time(value: &str) -> Result<ClockTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .map(|time| ClockTime::from_timelike(&time))
        .map_err(|err| format!("expected HH:MM:SS: {err}"))
}

impl Cli {
    fn into_config(self) -> WatchConfig {
        let ambient_policy = if self.external_tick {
            AmbientPolicy::External
        } else {
            AmbientPolicy::Periodic(Duration::from_secs(self.ambient_tick))
        };

        WatchConfig::builder()
            .title(self.title)
            .window_size(self.size)
            .face(self.face.into())
            .ambient_policy(ambient_policy)
            .transform_style(TransformFaceStyle {
                show_seconds: self.seconds,
                ..TransformFaceStyle::default()
            })
            .maybe_start_time(self.at)
            .build()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::with_filter(cli.log.clone()));

    let app = WatchApp::new(cli.into_config());
    app.run().context("watch face stopped with an error")?;

    log::info!("shutting down");
    Ok(())
}
