//! Runtime configuration
//!
//! Read from an optional TOML file; every field has a default so an empty
//! file (or no file) is a valid configuration.
//!
//! ```toml
//! human_side = "white"
//! candidate_range = 2
//! seed = 42
//! log_level = "debug"
//! mode = "single"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use thiserror::Error;

use crate::board::{Stone, BOARD_SIZE};
use crate::engine::Mode;
use crate::search::DEFAULT_RANGE;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value for {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Side played by the human; the arbiter plays the other one
    pub human_side: Stone,
    /// Chebyshev radius for candidate generation
    pub candidate_range: u8,
    /// Seed for the arbiter's random fallback
    pub seed: Option<u64>,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
    /// Advisor council or a single advisor
    pub mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            human_side: Stone::Black,
            candidate_range: DEFAULT_RANGE,
            seed: None,
            log_level: "info".to_string(),
            mode: Mode::Council,
        }
    }
}

impl Config {
    /// Load from `path`, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.human_side == Stone::Empty {
            return Err(ConfigError::Invalid {
                field: "human_side",
                message: "must be \"black\" or \"white\"".to_string(),
            });
        }
        if self.candidate_range == 0 || self.candidate_range as usize >= BOARD_SIZE {
            return Err(ConfigError::Invalid {
                field: "candidate_range",
                message: format!("must be between 1 and {}", BOARD_SIZE - 1),
            });
        }
        Ok(())
    }

    /// The side the arbiter plays
    #[inline]
    pub fn ai_side(&self) -> Stone {
        self.human_side.opponent()
    }

    /// RNG for the random fallback, seeded when `seed` is set
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
        assert_eq!(Config::default().mode, Mode::Council);
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn test_parse_all_fields() {
        let config = Config::from_toml(
            r#"
            human_side = "white"
            candidate_range = 3
            seed = 42
            log_level = "debug"
            mode = "single"
            "#,
        )
        .unwrap();
        assert_eq!(config.human_side, Stone::White);
        assert_eq!(config.ai_side(), Stone::Black);
        assert_eq!(config.candidate_range, 3);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.mode, Mode::Single);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Config::from_toml("human_side = \"empty\""),
            Err(ConfigError::Invalid { field: "human_side", .. })
        ));
        assert!(matches!(
            Config::from_toml("candidate_range = 0"),
            Err(ConfigError::Invalid { field: "candidate_range", .. })
        ));
        assert!(matches!(
            Config::from_toml("human_side = \"red\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_toml("mode = \"duo\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_toml("depth = 4"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/gomoku.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/gomoku.toml"));
    }

    #[test]
    fn test_seeded_rng_repeats() {
        let config = Config {
            seed: Some(9),
            ..Config::default()
        };
        let a: u64 = config.rng().gen();
        let b: u64 = config.rng().gen();
        assert_eq!(a, b);
    }
}
