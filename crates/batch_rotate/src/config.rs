// Settings for one batch run.

use std::path::PathBuf;

use pixel_rotate::Rotation;

pub const DEFAULT_ROOT: &str = "images";
pub const DEFAULT_WORKERS: usize = 16;
pub const DEFAULT_EXTENSION: &str = "png";

#[derive(Clone, Debug, PartialEq)]
pub struct BatchConfig {
    /// Directory whose images are rotated. Subdirectories are ignored.
    pub root: PathBuf,
    /// Number of worker threads; 0 means one per logical CPU.
    pub workers: usize,
    /// File extension to pick up, without the leading dot.
    pub extension: String,
    pub rotation: Rotation,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            workers: DEFAULT_WORKERS,
            extension: DEFAULT_EXTENSION.to_string(),
            rotation: Rotation::default(),
        }
    }
}

impl BatchConfig {
    pub fn new(root: impl Into<PathBuf>, workers: usize, extension: &str, rotation: Rotation) -> Self {
        Self {
            root: root.into(),
            workers,
            extension: extension.trim_start_matches('.').to_string(),
            rotation,
        }
    }

    /// Number of threads the scheduler will spawn.
    pub fn worker_count(&self) -> usize {
        match self.workers {
            0 => num_cpus::get(),
            n => n,
        }
    }
}
