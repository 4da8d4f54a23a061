use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::{config, normalize, parse};
use showtime_config::{Config, PathManager};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "showtime")]
#[command(about = "Showtime - One datetime format for every cinema's listings")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Config file to use instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize showtime datetimes in scraped collection files
    #[command(long_about = "Read each collection file, derive normalized_datetime, normalized_date and normalized_time for every showtime that can be read, and write the file back. Without FILES, every file in the data directory ending with the configured suffix is processed.")]
    Normalize {
        /// Collection files to normalize
        files: Vec<PathBuf>,

        /// Directory to scan when no files are given
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,

        /// Filename suffix to scan for
        #[arg(long, value_name = "SUFFIX")]
        pattern: Option<String>,

        /// Report what would be normalized without writing any file
        #[arg(long, action = ArgAction::SetTrue)]
        dry_run: bool,

        /// Reference time for relative dates and year inference (defaults to the local clock)
        #[arg(long, value_name = "DATETIME", value_parser = parse_now)]
        now: Option<NaiveDateTime>,
    },
    /// Normalize a single piece of text
    #[command(long_about = "Run the parsing chain on one value and print the normalized fields together with the strategy that read it. The value is treated as display text unless --datetime is given.")]
    Parse {
        text: String,

        /// Treat the value as a machine datetime field
        #[arg(long, action = ArgAction::SetTrue)]
        datetime: bool,

        /// Reference time for relative dates and year inference (defaults to the local clock)
        #[arg(long, value_name = "DATETIME", value_parser = parse_now)]
        now: Option<NaiveDateTime>,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}

fn parse_now(value: &str) -> Result<NaiveDateTime, String> {
    showtime_core::iso::parse_strict(value)
        .ok_or_else(|| format!("expected an ISO-8601 date or datetime, got {:?}", value))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config_file = cli
        .config
        .clone()
        .unwrap_or_else(|| PathManager::default().config_file());
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    logging::init_logging(cli.verbose, cli.quiet, &config.logging)
        .map_err(|e| eyre!("Failed to initialize logging: {}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let succeeded = match cli.command {
        Commands::Normalize {
            files,
            data_dir,
            pattern,
            dry_run,
            now,
        } => {
            config
                .validate()
                .map_err(|e| eyre!("Invalid config {}: {}", config_file.display(), e))?;
            let args = normalize::NormalizeArgs {
                files,
                data_dir,
                pattern,
                dry_run,
                now,
            };
            normalize::run_normalize(args, &config, &output)?
        }
        Commands::Parse {
            text,
            datetime,
            now,
        } => parse::run_parse(&text, datetime, now, &output)?,
        Commands::Config { cmd } => config::run_config(cmd, &config, &config_file, &output)?,
    };

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_now_accepts_date_and_datetime() {
        let midnight = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(parse_now("2025-12-10"), Ok(midnight));
        let evening = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap().and_hms_opt(18, 30, 0).unwrap();
        assert_eq!(parse_now("2025-12-10T18:30"), Ok(evening));
        assert!(parse_now("next friday").is_err());
    }

    #[test]
    fn test_normalize_arguments() {
        let cli = Cli::try_parse_from([
            "showtime",
            "-vv",
            "--output",
            "json",
            "normalize",
            "a.json",
            "b.json",
            "--dry-run",
            "--now",
            "2025-06-01T12:00:00",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, output::OutputFormat::Json);
        match cli.command {
            Commands::Normalize { files, dry_run, now, pattern, .. } => {
                assert_eq!(files, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
                assert!(dry_run);
                assert!(now.is_some());
                assert_eq!(pattern, None);
            }
            _ => panic!("expected normalize"),
        }
    }

    #[test]
    fn test_bad_now_is_rejected() {
        assert!(Cli::try_parse_from(["showtime", "parse", "fre 8 aug", "--now", "soon"]).is_err());
    }
}
