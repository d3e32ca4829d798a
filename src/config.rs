use std::path::PathBuf;

use clap::Parser;

use crate::loader::DEFAULT_MODEL_PATH;
use crate::viewport::clamp_pixel_ratio;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "flyby3d", version)]
#[command(about = "Fly into a 3D model and orbit it from your terminal", long_about = None)]
pub struct Args {
    /// glTF or GLB model to load
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Target frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Supersampling factor, clamped to 1..=2
    #[arg(long, default_value_t = 2.0)]
    pub pixel_ratio: f32,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Resolved viewer settings
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub model_path: PathBuf,
    pub target_fps: u32,
    pub pixel_ratio: f32,
    pub log_file: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            target_fps: 60,
            pixel_ratio: 2.0,
            log_file: None,
        }
    }
}

impl From<Args> for ViewerConfig {
    fn from(args: Args) -> Self {
        ViewerConfig {
            model_path: args.model,
            target_fps: args.fps,
            pixel_ratio: clamp_pixel_ratio(args.pixel_ratio),
            log_file: args.log_file,
        }
    }
}
