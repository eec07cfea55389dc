//! LESS jump-landing analysis application for scoring recorded or live video.

use anyhow::Result;
use clap::Parser;
use less_scoring::app::{AnalysisMode, AppConfig, LessApp, VideoSource};
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Video file to process
    #[arg(short, long)]
    video: Option<String>,

    /// Camera index to use when no video file is given
    #[arg(long, default_value = "0")]
    cam: i32,

    /// Analysis overlay mode (kinematics, zscore)
    #[arg(short, long, default_value = "kinematics")]
    mode: String,

    /// Output path for the annotated video (default: <input>_scored.<ext>)
    #[arg(short, long)]
    output: Option<String>,

    /// Show a preview window while processing
    #[arg(short, long)]
    gui: bool,

    /// Skip writing the annotated output video
    #[arg(long)]
    no_video_out: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("LESS Jump-Landing Analysis");

    // Load configuration if provided
    let mut settings = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match less_scoring::config::Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                less_scoring::config::Config::default()
            }
        }
    } else {
        less_scoring::config::Config::default()
    };
    settings.display.show_window = settings.display.show_window || args.gui;
    settings.display.write_video = settings.display.write_video && !args.no_video_out;

    // Build application configuration
    let config = AppConfig {
        video_source: if let Some(video_path) = args.video {
            VideoSource::File(video_path)
        } else {
            VideoSource::Camera(args.cam)
        },
        mode: match args.mode.as_str() {
            "zscore" => AnalysisMode::ZScore,
            _ => AnalysisMode::Kinematics,
        },
        output_path: args.output,
        settings,
    };

    // Create and run application
    let mut app = LessApp::new(config)?;
    app.run()?;

    Ok(())
}
