use std::path::PathBuf;
use std::time::Duration;

use crate::cli::BuildArgs;
use crate::http::HttpConfig;

/// Entry sections, relative to the output root.
pub const ENTRIES_DIR: &str = "puzzles";
/// Cached puzzle images, relative to the output root.
pub const IMAGES_DIR: &str = "puzzle_images";
pub const CHAPTERS_DIR: &str = "chapters";

#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub http: HttpConfig,
}

impl BuildConfig {
    pub fn from_args(args: &BuildArgs) -> Self {
        Self {
            input: PathBuf::from(&args.input),
            out_dir: PathBuf::from(&args.out),
            http: HttpConfig {
                timeout: Duration::from_secs(args.timeout_secs),
                ..HttpConfig::default()
            },
        }
    }

    pub fn entries_dir(&self) -> PathBuf {
        self.out_dir.join(ENTRIES_DIR)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.out_dir.join(IMAGES_DIR)
    }

    pub fn chapters_dir(&self) -> PathBuf {
        self.out_dir.join(CHAPTERS_DIR)
    }
}
