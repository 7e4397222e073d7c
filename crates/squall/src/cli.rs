//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use squall_config::{Overrides, parse_percentage};
use squall_core::NamedColor;

const AFTER_HELP: &str =
    "Available colors: black, red, green, yellow, blue, magenta, cyan, white\n\n\
     Press q, Esc or Ctrl-C to quit.";

/// An ambient rainstorm with branching lightning for your terminal.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None, after_help = AFTER_HELP)]
pub struct Args {
    /// Set the color of the rain.
    #[arg(long, value_name = "COLOR")]
    pub rain_color: Option<NamedColor>,

    /// Set the color of the lightning.
    #[arg(long, value_name = "COLOR")]
    pub lightning_color: Option<NamedColor>,

    /// Set the volume of the thunder.
    #[arg(long, value_name = "0-100", value_parser = parse_percentage)]
    pub thunder_volume: Option<f32>,

    /// Set the volume of the rain loop.
    #[arg(long, value_name = "0-100", value_parser = parse_percentage)]
    pub rain_volume: Option<f32>,

    /// Percentage chance of lightning per frame (e.g. 0.5).
    #[arg(long, value_name = "%", value_parser = parse_percentage)]
    pub lightning_chance: Option<f32>,

    /// Seed the storm for a reproducible run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Configuration file (defaults to the platform config directory).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write diagnostics to this file. Filter with RUST_LOG.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Disable all sound.
    #[arg(long)]
    pub mute: bool,
}

impl Args {
    /// Values to layer over the configuration file.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            rain_color: self.rain_color,
            lightning_color: self.lightning_color,
            thunder_volume: self.thunder_volume,
            rain_volume: self.rain_volume,
            lightning_chance: self.lightning_chance,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_arguments() {
        let args = Args::try_parse_from(["squall"]).unwrap();
        assert_eq!(args.overrides(), Overrides::default());
        assert!(!args.mute);
    }

    #[test]
    fn test_all_arguments() {
        let args = Args::try_parse_from([
            "squall",
            "--rain-color",
            "cyan",
            "--lightning-color",
            "white",
            "--thunder-volume",
            "80",
            "--lightning-chance",
            "0.5",
            "--seed",
            "12",
            "--mute",
        ])
        .unwrap();
        let overrides = args.overrides();
        assert_eq!(overrides.rain_color, Some(NamedColor::Cyan));
        assert_eq!(overrides.lightning_color, Some(NamedColor::White));
        assert_eq!(overrides.thunder_volume, Some(80.0));
        assert_eq!(overrides.lightning_chance, Some(0.5));
        assert_eq!(overrides.seed, Some(12));
        assert!(args.mute);
    }

    #[test]
    fn test_invalid_color_rejected() {
        assert!(Args::try_parse_from(["squall", "--rain-color", "plaid"]).is_err());
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        assert!(Args::try_parse_from(["squall", "--thunder-volume", "loud"]).is_err());
        assert!(Args::try_parse_from(["squall", "--lightning-chance", "250"]).is_err());
        assert!(Args::try_parse_from(["squall", "--seed", "-1"]).is_err());
    }
}
