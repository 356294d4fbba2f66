//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::params::{RecordingConfig, RenderConfig};
use crate::scene::SceneKind;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "oceanview")]
#[command(about = "Animated procedural ocean backdrop", long_about = None)]
pub struct Args {
    /// Backdrop to render
    #[arg(long, value_enum, default_value_t = SceneKind::Realistic)]
    pub scene: SceneKind,

    /// Window or frame width (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 1280)]
    pub width: u32,

    /// Window or frame height (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 720)]
    pub height: u32,

    /// Seed for bubble and fish placement (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render frames to PNG files instead of opening a window (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,

    /// Recording frame rate
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Recording output directory
    #[arg(long, value_name = "DIR", default_value = "recording")]
    pub output: PathBuf,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            ..Default::default()
        }
    }

    /// Recording configuration if recording mode is enabled
    pub fn recording_config(&self) -> Option<RecordingConfig> {
        self.record.map(|duration| RecordingConfig {
            output_dir: self.output.clone(),
            fps: self.fps,
            ..RecordingConfig::new(duration)
        })
    }

    /// Particle random source, seeded when `--seed` is given
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
