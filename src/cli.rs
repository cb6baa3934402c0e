use clap::{Args, Parser};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub build: BuildArgs,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Submission log exported as CSV.
    pub input: String,

    /// Output root for `puzzles/`, `puzzle_images/` and `chapters/`.
    #[arg(long, default_value = ".")]
    pub out: String,

    /// Timeout for each HTTP request (image downloads, link resolution).
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}
