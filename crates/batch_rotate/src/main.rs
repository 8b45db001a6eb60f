// CLI that rotates every image in a directory in place.

use batch_rotate::config::{BatchConfig, DEFAULT_EXTENSION, DEFAULT_ROOT, DEFAULT_WORKERS};
use clap::{Args, Parser, Subcommand};
use pixel_rotate::{DEFAULT_ANGLE_DEGREES, Rotation};

// setup command line args

#[derive(Parser)]
#[command(about = "Rotate every image in a directory, overwriting the originals")]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,
    /// Directory holding the images; subdirectories are not searched.
    #[clap(long, default_value = DEFAULT_ROOT)]
    root: String,
    /// Worker threads to use, 0 for one per logical CPU.
    #[clap(long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,
    /// Extension of the files to rotate.
    #[clap(long, default_value = DEFAULT_EXTENSION)]
    extension: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rotate a quarter turn clockwise (the default).
    Quarter,
    /// Rotate by any angle, growing the image to fit.
    Arbitrary(ArbitraryArgs),
}

#[derive(Debug, Args)]
pub struct ArbitraryArgs {
    #[clap(long, default_value_t = DEFAULT_ANGLE_DEGREES, allow_negative_numbers = true, value_parser = parse_angle)]
    angle: f64,
}

fn parse_angle(s: &str) -> Result<f64, String> {
    let angle: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if angle.is_finite() {
        Ok(angle)
    } else {
        Err(String::from("angle must be a finite number of degrees"))
    }
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();

    let rotation = match args.command {
        None | Some(Command::Quarter) => Rotation::Quarter,
        Some(Command::Arbitrary(args)) => Rotation::Arbitrary {
            degrees: args.angle,
        },
    };
    let config = BatchConfig::new(&args.root, args.workers, &args.extension, rotation);
    log::debug!("Configuration: {:?}", config);

    let report = batch_rotate::run_batch(&config)
        .map_err(|e| format!("Unable to list images in {}: {}", config.root.display(), e))?;

    // individual failures were already logged and don't fail the run
    log::info!(
        "Done: {} of {} images rotated, {} failed",
        report.succeeded(),
        report.total(),
        report.failed()
    );

    Ok(())
}
