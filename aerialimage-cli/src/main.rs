//! aerialimage CLI - Command-line interface
//!
//! Retrieves the aerial image for a bounding box and saves it as
//! `aerialImage_{zoom}.jpeg`.

mod error;
mod runner;

use aerialimage::config::{clamp_parallel_downloads, ByteSize, ConfigFile};
use aerialimage::retrieval::RetrievalRequest;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use error::CliError;
use runner::CliRunner;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "aerialimage", version = aerialimage::VERSION)]
#[command(about = "Retrieve a cropped aerial image for a bounding box", long_about = None)]
struct Args {
    /// Two diagonal corners in decimal degrees, in either order
    #[arg(
        num_args = 4,
        value_names = ["LAT1", "LON1", "LAT2", "LON2"],
        allow_negative_numbers = true,
        required_unless_present = "center",
        conflicts_with = "center"
    )]
    corners: Option<Vec<f64>>,

    /// Center point and extent; WIDTH spans longitude, HEIGHT spans latitude.
    /// The extent is in degrees unless --meters is given
    #[arg(
        long,
        num_args = 4,
        value_names = ["LAT", "LON", "WIDTH", "HEIGHT"],
        allow_negative_numbers = true
    )]
    center: Option<Vec<f64>>,

    /// Interpret the --center extent in meters
    #[arg(long, requires = "center")]
    meters: bool,

    /// Directory the image is written to
    #[arg(long, short)]
    output_dir: Option<PathBuf>,

    /// Maximum number of concurrent tile downloads
    #[arg(long)]
    parallel: Option<usize>,

    /// Deadline for downloading all tiles, in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Maximum number of pixels in the output image
    #[arg(long)]
    max_pixels: Option<u64>,

    /// Maximum uncompressed output size (e.g. 64MB)
    #[arg(long)]
    max_size: Option<ByteSize>,

    /// Tile URL template containing a {quadkey} placeholder
    #[arg(long, value_parser = parse_tile_url)]
    tile_url: Option<String>,

    /// Fail on tiles the provider has no imagery for
    #[arg(long)]
    detect_missing: bool,

    /// Config file (default: ~/.aerialimage/config.ini)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

impl Args {
    /// Build the retrieval request from the positional corners or --center.
    fn request(&self) -> Result<RetrievalRequest, clap::Error> {
        if self.meters && self.center.is_none() {
            return Err(Args::command().error(
                ErrorKind::MissingRequiredArgument,
                "--meters only applies to --center LAT LON WIDTH HEIGHT",
            ));
        }

        let request = match (self.center.as_deref(), self.corners.as_deref()) {
            (Some(&[latitude, longitude, width_m, height_m]), _) if self.meters => {
                RetrievalRequest::CenteredMeters {
                    latitude,
                    longitude,
                    width_m,
                    height_m,
                }
            }
            (Some(&[latitude, longitude, width, height]), _) => RetrievalRequest::Centered {
                latitude,
                longitude,
                width,
                height,
            },
            (None, Some(&[lat1, lon1, lat2, lon2])) => RetrievalRequest::Corners {
                lat1,
                lon1,
                lat2,
                lon2,
            },
            _ => {
                return Err(Args::command().error(
                    ErrorKind::MissingRequiredArgument,
                    "provide four corner values or --center LAT LON WIDTH HEIGHT",
                ))
            }
        };
        Ok(request)
    }

    /// Apply command-line overrides on top of the config file.
    fn apply_overrides(&self, mut config: ConfigFile) -> ConfigFile {
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
        if let Some(parallel) = self.parallel {
            config.download.parallel_downloads = clamp_parallel_downloads(parallel);
        }
        if let Some(timeout) = self.timeout {
            config.download.timeout = timeout;
        }
        if let Some(max_pixels) = self.max_pixels {
            config.output.max_pixel_area = max_pixels;
        }
        if let Some(max_size) = self.max_size {
            config.output.max_size = Some(max_size.bytes());
        }
        if let Some(url) = &self.tile_url {
            config.provider.url = url.clone();
        }
        if self.detect_missing {
            config.provider.detect_missing = true;
        }
        config
    }
}

fn parse_tile_url(s: &str) -> Result<String, String> {
    if s.contains("{quadkey}") {
        Ok(s.to_string())
    } else {
        Err("URL must contain a {quadkey} placeholder".to_string())
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let request = match args.request() {
        Ok(request) => request,
        Err(e) => e.exit(),
    };

    if let Err(e) = run(args, request).await {
        e.exit();
    }
}

async fn run(args: Args, request: RetrievalRequest) -> Result<(), CliError> {
    let config = CliRunner::load_config(args.config.as_deref())?;
    let runner = CliRunner::new(args.apply_overrides(config), args.verbose)?;
    runner.log_startup();
    let started = Instant::now();

    let retrieved = runner.retrieve(&request).await?;
    println!(
        "Zoom {}: {} tiles, {}x{} pixels",
        retrieved.zoom,
        retrieved.grid.tile_count(),
        retrieved.width(),
        retrieved.height()
    );

    let path = runner.save(&retrieved)?;
    println!(
        "Saved {} in {:.1}s",
        path.display(),
        started.elapsed().as_secs_f64()
    );

    Ok(())
}
