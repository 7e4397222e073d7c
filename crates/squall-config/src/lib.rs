//! Configuration for squall.
//!
//! Settings come from built-in defaults, then an optional TOML file, then
//! command-line [`Overrides`], each layer replacing what the previous one
//! set.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use squall_core::NamedColor;
use thiserror::Error;

/// Default lightning spawn chance, in percent per frame.
pub const DEFAULT_LIGHTNING_CHANCE: f32 = 0.05;

/// Default thunder volume, 0-100.
pub const DEFAULT_THUNDER_VOLUME: f32 = 30.0;

/// Default rain loop volume, 0-100.
pub const DEFAULT_RAIN_VOLUME: f32 = 50.0;

/// File name looked up inside the platform config directory.
const CONFIG_FILE: &str = "config.toml";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid {field}: {value} (expected a number between 0 and 100)")]
    Invalid { field: &'static str, value: f32 },
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Color of the falling rain.
    pub rain_color: NamedColor,
    /// Bright color of fresh lightning.
    pub lightning_color: NamedColor,
    /// Thunder volume, 0-100.
    pub thunder_volume: f32,
    /// Rain loop volume, 0-100.
    pub rain_volume: f32,
    /// Spawn chance in percent per frame.
    pub lightning_chance: f32,
    /// Fixed random seed; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rain_color: NamedColor::Blue,
            lightning_color: NamedColor::Yellow,
            thunder_volume: DEFAULT_THUNDER_VOLUME,
            rain_volume: DEFAULT_RAIN_VOLUME,
            lightning_chance: DEFAULT_LIGHTNING_CHANCE,
            seed: None,
        }
    }
}

/// Values given on the command line; `None` keeps the lower layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub rain_color: Option<NamedColor>,
    pub lightning_color: Option<NamedColor>,
    pub thunder_volume: Option<f32>,
    pub rain_volume: Option<f32>,
    pub lightning_chance: Option<f32>,
    pub seed: Option<u64>,
}

impl Config {
    /// Load the configuration file.
    ///
    /// An explicit `path` must exist. Without one, the platform default
    /// location is tried and silently skipped when absent.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Layer command-line values on top and re-validate.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(color) = overrides.rain_color {
            self.rain_color = color;
        }
        if let Some(color) = overrides.lightning_color {
            self.lightning_color = color;
        }
        if let Some(volume) = overrides.thunder_volume {
            self.thunder_volume = volume;
        }
        if let Some(volume) = overrides.rain_volume {
            self.rain_volume = volume;
        }
        if let Some(chance) = overrides.lightning_chance {
            self.lightning_chance = chance;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_percentage("thunder_volume", self.thunder_volume)?;
        check_percentage("rain_volume", self.rain_volume)?;
        check_percentage("lightning_chance", self.lightning_chance)?;
        Ok(())
    }
}

/// Platform config file location, e.g. `~/.config/squall/config.toml`.
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "squall").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Parse a finite number in `[0, 100]`, for command-line percentages.
pub fn parse_percentage(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if is_percentage(value) {
        Ok(value)
    } else {
        Err(format!("{value} is not between 0 and 100"))
    }
}

fn is_percentage(value: f32) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

fn check_percentage(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if is_percentage(value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.rain_color, NamedColor::Blue);
        assert_eq!(config.lightning_color, NamedColor::Yellow);
        assert_eq!(config.thunder_volume, 30.0);
        assert_eq!(config.rain_volume, 50.0);
        assert_eq!(config.lightning_chance, 0.05);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml("rain_color = \"cyan\"\nseed = 7\n").unwrap();
        assert_eq!(config.rain_color, NamedColor::Cyan);
        assert_eq!(config.lightning_color, NamedColor::Yellow);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_bad_color_rejected() {
        let err = Config::from_toml("lightning_color = \"purple\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml("thunder = 3").is_err());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = Config::from_toml("thunder_volume = 140.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "thunder_volume",
                ..
            }
        ));
        assert!(Config::from_toml("lightning_chance = -1.0").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let base = Config::from_toml("rain_color = \"red\"\nthunder_volume = 10.0").unwrap();
        let merged = base
            .with_overrides(Overrides {
                rain_color: Some(NamedColor::Green),
                lightning_chance: Some(2.5),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(merged.rain_color, NamedColor::Green);
        assert_eq!(merged.thunder_volume, 10.0);
        assert_eq!(merged.lightning_chance, 2.5);
    }

    #[test]
    fn test_override_validated() {
        let result = Config::default().with_overrides(Overrides {
            rain_volume: Some(f32::NAN),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("0.5"), Ok(0.5));
        assert_eq!(parse_percentage(" 100 "), Ok(100.0));
        assert_eq!(parse_percentage("0"), Ok(0.0));
        assert!(parse_percentage("loud").is_err());
        assert!(parse_percentage("101").is_err());
        assert!(parse_percentage("-3").is_err());
        assert!(parse_percentage("inf").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "lightning_color = \"magenta\"").unwrap();
        writeln!(file, "lightning_chance = 1.5").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.lightning_color, NamedColor::Magenta);
        assert_eq!(config.lightning_chance, 1.5);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }
}
