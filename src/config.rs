//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::ShooterError;

pub const DEFAULT_FPS: u32 = 60;
const MAX_FPS: u32 = 240;

/// Where log records go.  The game owns the terminal, so there is no
/// console option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Discard,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "space_shooter", version, about = "Terminal arcade shooter")]
pub struct Args {
    /// Directory holding the persisted high score.
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Keep the high score in memory only.
    #[arg(long, conflicts_with = "data_dir")]
    pub no_persist: bool,

    /// Frames per second.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Seed for enemy placement; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write log output here (filter with RUST_LOG, default `info`).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn validate(&self) -> Result<(), ShooterError> {
        if !(1..=MAX_FPS).contains(&self.fps) {
            return Err(ShooterError::Config(format!(
                "--fps must be between 1 and {}, got {}",
                MAX_FPS, self.fps
            )));
        }
        Ok(())
    }

    pub fn log_target(&self) -> LogTarget {
        match &self.log_file {
            Some(path) => LogTarget::File(path.clone()),
            None => LogTarget::Discard,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }
}
