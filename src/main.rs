//! DIGIPIN command-line interface.

use clap::{Parser, Subcommand, ValueEnum};
use digipin_rs::{
    BatchOptions, CsvDigipinConfig, DigipinError, GridSpec, csv_to_coords_csv,
    csv_to_digipin_csv, decode, distance_between_codes, encode, find_nearest, order_by_distance,
    precise_distance_between_codes, write_grid_csv, write_grid_json,
};
use std::fmt;
use std::io;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "digipin")]
#[command(about = "Encode and decode DIGIPIN geocodes", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a latitude/longitude to a DIGIPIN
    Encode {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// Decode a DIGIPIN to the center of its cell
    Decode {
        #[arg(long)]
        pin: String,
    },
    /// Distance in meters between two DIGIPINs
    Distance {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Use the WGS84 ellipsoid instead of a sphere
        #[arg(long)]
        precise: bool,
    },
    /// Nearest DIGIPIN to a reference
    Nearest {
        #[arg(long)]
        reference: String,
        #[arg(long, value_delimiter = ',', required = true)]
        pins: Vec<String>,
    },
    /// Sort DIGIPINs by distance from a reference
    Order {
        #[arg(long)]
        reference: String,
        #[arg(long, value_delimiter = ',', required = true)]
        pins: Vec<String>,
    },
    /// Encode the coordinate columns of a CSV file
    BatchEncode {
        #[arg(long)]
        input: String,
        #[arg(long)]
        output: String,
        #[arg(long, default_value = "latitude")]
        lat_column: String,
        #[arg(long, default_value = "longitude")]
        lng_column: String,
        /// Encode on a worker pool sized to the available processors
        #[arg(long)]
        concurrent: bool,
    },
    /// Decode a DIGIPIN column of a CSV file
    BatchDecode {
        #[arg(long)]
        input: String,
        #[arg(long)]
        output: String,
        #[arg(long, default_value = "digipin")]
        column: String,
        #[arg(long)]
        concurrent: bool,
    },
    /// Sample a regular grid of coordinates and write their DIGIPINs
    Grid {
        #[arg(long, allow_hyphen_values = true)]
        min_lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        min_lng: f64,
        #[arg(long, allow_hyphen_values = true)]
        max_lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        max_lng: f64,
        #[arg(long)]
        step: f64,
        #[arg(long)]
        output: String,
        #[arg(long, value_enum, default_value = "csv")]
        format: GridFormat,
    },
}

#[derive(Debug, Clone, ValueEnum)]
enum GridFormat {
    Csv,
    Json,
}

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Codec, validation or file error from the library
    Digipin(DigipinError),
}

impl CliError {
    /// Exit the process with an error message and code 1.
    fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Digipin(e) => write!(f, "{}", e),
        }
    }
}

impl From<DigipinError> for CliError {
    fn from(e: DigipinError) -> Self {
        CliError::Digipin(e)
    }
}

fn init_logging(verbose: bool) -> Result<(), CliError> {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .map_err(|e| CliError::LoggingInit(e.to_string()))
}

fn concurrency(enabled: bool) -> Option<BatchOptions> {
    enabled.then(BatchOptions::default)
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Encode { lat, lng } => {
            println!("DIGIPIN: {}", encode(lat, lng)?);
        }
        Command::Decode { pin } => {
            let coord = decode(&pin)?;
            println!("Latitude: {:.6}", coord.latitude);
            println!("Longitude: {:.6}", coord.longitude);
        }
        Command::Distance { from, to, precise } => {
            let meters = if precise {
                precise_distance_between_codes(&from, &to)?
            } else {
                distance_between_codes(&from, &to)?
            };
            println!("Distance: {:.0} m", meters);
        }
        Command::Nearest { reference, pins } => {
            println!("{}", find_nearest(&reference, &pins)?);
        }
        Command::Order { reference, pins } => {
            for pin in order_by_distance(&reference, &pins)? {
                println!("{}", pin);
            }
        }
        Command::BatchEncode {
            input,
            output,
            lat_column,
            lng_column,
            concurrent,
        } => {
            let mut config = CsvDigipinConfig::from_coords(lat_column, lng_column);
            if let Some(options) = concurrency(concurrent) {
                config = config.concurrent(options);
            }
            csv_to_digipin_csv(&input, &output, &config)?;
            info!(%input, %output, "batch encode complete");
            println!("Batch encode complete. Output written to {}", output);
        }
        Command::BatchDecode {
            input,
            output,
            column,
            concurrent,
        } => {
            csv_to_coords_csv(&input, &output, &column, concurrency(concurrent).as_ref())?;
            info!(%input, %output, "batch decode complete");
            println!("Batch decode complete. Output written to {}", output);
        }
        Command::Grid {
            min_lat,
            min_lng,
            max_lat,
            max_lng,
            step,
            output,
            format,
        } => {
            let spec = GridSpec::new(min_lat, min_lng, max_lat, max_lng, step);
            match format {
                GridFormat::Csv => write_grid_csv(&spec, &output)?,
                GridFormat::Json => write_grid_json(&spec, &output)?,
            }
            println!("Grid written to {}", output);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose).and_then(|_| run(cli.command)) {
        e.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_grid_accepts_negative_bounds() {
        let cli = Cli::try_parse_from([
            "digipin", "grid", "--min-lat", "-1.5", "--min-lng", "-2", "--max-lat", "3",
            "--max-lng", "4", "--step", "0.5", "--output", "grid.csv",
        ])
        .expect("negative bounds should parse");

        match cli.command {
            Command::Grid {
                min_lat, min_lng, ..
            } => assert_eq!((min_lat, min_lng), (-1.5, -2.0)),
            _ => panic!("expected grid subcommand"),
        }
    }

    #[test]
    fn test_encode_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["digipin", "encode", "--lat", "-10", "--lng", "77"])
            .expect("negative latitude should parse");
        assert!(matches!(cli.command, Command::Encode { lat, .. } if lat == -10.0));
    }
}
