//! Marketplace configuration loading from market.toml
//!
//! Every value has a default, so a missing file or a partial file still yields a
//! complete configuration: a 5,000,000 starting budget, a 20-player squad
//! (3 goalkeepers, 6 defenders, 6 midfielders, 5 attackers) valued at 1,000,000
//! each, player ages in `[18, 40)`, and a post-transfer value multiplier in `[1.1, 2.0)`.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default config file looked up when `MARKET_CONFIG` is not set
pub const DEFAULT_CONFIG_PATH: &str = "market.toml";

/// Configuration structure representing the entire market.toml file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Settings for newly formed teams
    pub team: TeamConfig,
    /// How many players of each position a new team receives
    pub squad: SquadConfig,
    /// Settings for generated players
    pub player: PlayerConfig,
    /// Post-transfer market value adjustment
    pub valuation: ValuationConfig,
}

/// Settings for newly formed teams
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    /// Budget every new team starts with
    pub starting_budget: i64,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            starting_budget: 5_000_000,
        }
    }
}

/// Squad composition of a newly formed team
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SquadConfig {
    pub goalkeepers: usize,
    pub defenders: usize,
    pub midfielders: usize,
    pub attackers: usize,
}

impl SquadConfig {
    /// Total number of players in a generated squad.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.goalkeepers + self.defenders + self.midfielders + self.attackers
    }
}

impl Default for SquadConfig {
    fn default() -> Self {
        Self {
            goalkeepers: 3,
            defenders: 6,
            midfielders: 6,
            attackers: 5,
        }
    }
}

/// Settings for generated players
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Market value every generated player starts with
    pub initial_market_value: i64,
    /// Youngest generated age (inclusive)
    pub min_age: i32,
    /// Oldest generated age (exclusive)
    pub max_age: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_market_value: 1_000_000,
            min_age: 18,
            max_age: 40,
        }
    }
}

/// Bounds of the random multiplier applied to a player's value after a purchase
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// Lowest multiplier (inclusive)
    pub min_multiplier: f64,
    /// Highest multiplier (exclusive)
    pub max_multiplier: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            min_multiplier: 1.1,
            max_multiplier: 2.0,
        }
    }
}

impl MarketConfig {
    /// Checks the configured values for consistency.
    ///
    /// # Errors
    /// Returns `Error::Config` when a range is empty, a multiplier would lower
    /// a player's value, or a monetary default or the minimum age is negative.
    pub fn validate(&self) -> Result<()> {
        if self.team.starting_budget < 0 {
            return Err(Error::Config {
                message: format!(
                    "team.starting_budget must not be negative (got {})",
                    self.team.starting_budget
                ),
            });
        }
        if self.player.initial_market_value < 0 {
            return Err(Error::Config {
                message: format!(
                    "player.initial_market_value must not be negative (got {})",
                    self.player.initial_market_value
                ),
            });
        }
        if self.player.min_age < 0 {
            return Err(Error::Config {
                message: format!(
                    "player.min_age must not be negative (got {})",
                    self.player.min_age
                ),
            });
        }
        if self.player.min_age >= self.player.max_age {
            return Err(Error::Config {
                message: format!(
                    "player age range is empty: [{}, {})",
                    self.player.min_age, self.player.max_age
                ),
            });
        }
        let ValuationConfig {
            min_multiplier,
            max_multiplier,
        } = self.valuation;
        if !min_multiplier.is_finite() || !max_multiplier.is_finite() {
            return Err(Error::Config {
                message: "valuation multipliers must be finite".to_string(),
            });
        }
        if min_multiplier < 1.0 || min_multiplier >= max_multiplier {
            return Err(Error::Config {
                message: format!(
                    "valuation range must satisfy 1.0 <= min < max (got [{min_multiplier}, {max_multiplier}))"
                ),
            });
        }
        Ok(())
    }
}

/// Loads and validates marketplace configuration from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - The values fail [`MarketConfig::validate`]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MarketConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load market configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Parses and validates marketplace configuration from TOML text.
///
/// # Errors
/// Returns `Error::Config` on invalid TOML or inconsistent values.
pub fn parse_config(contents: &str) -> Result<MarketConfig> {
    let config: MarketConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse market configuration: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from `MARKET_CONFIG` or `./market.toml`.
///
/// A missing file is not an error: the built-in defaults are used instead.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_config() -> Result<MarketConfig> {
    let path = std::env::var("MARKET_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if Path::new(&path).exists() {
        load_config(&path)
    } else {
        info!("No market configuration at {}, using defaults.", path);
        Ok(MarketConfig::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_default_values() {
        let config = MarketConfig::default();
        assert_eq!(config.team.starting_budget, 5_000_000);
        assert_eq!(config.squad.size(), 20);
        assert_eq!(config.squad.goalkeepers, 3);
        assert_eq!(config.squad.attackers, 5);
        assert_eq!(config.player.initial_market_value, 1_000_000);
        assert_eq!(config.valuation.min_multiplier, 1.1);
        assert_eq!(config.valuation.max_multiplier, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r"
            [team]
            starting_budget = 100000

            [squad]
            goalkeepers = 1
            defenders = 2
        ";

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.team.starting_budget, 100_000);
        assert_eq!(config.squad.goalkeepers, 1);
        assert_eq!(config.squad.defenders, 2);
        // Unset fields keep their defaults
        assert_eq!(config.squad.midfielders, 6);
        assert_eq!(config.player, PlayerConfig::default());
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), MarketConfig::default());
    }

    #[test]
    fn test_rejects_shrinking_multiplier() {
        let toml_str = r"
            [valuation]
            min_multiplier = 0.5
            max_multiplier = 2.0
        ";
        let result = parse_config(toml_str);
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));
    }

    #[test]
    fn test_rejects_empty_age_range() {
        let toml_str = r"
            [player]
            min_age = 30
            max_age = 30
        ";
        assert!(matches!(
            parse_config(toml_str).unwrap_err(),
            Error::Config { message: _ }
        ));
    }

    #[test]
    fn test_rejects_negative_min_age() {
        let toml_str = r"
            [player]
            min_age = -3
        ";
        assert!(matches!(
            parse_config(toml_str).unwrap_err(),
            Error::Config { message: _ }
        ));
    }

    #[test]
    fn test_rejects_invalid_toml() {
        assert!(matches!(
            parse_config("[team\nstarting_budget = ").unwrap_err(),
            Error::Config { message: _ }
        ));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("definitely/not/here/market.toml");
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));
    }
}
