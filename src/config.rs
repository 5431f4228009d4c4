//! Optimizer Configuration

use std::{fs, path::Path, time::Duration};

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    prices::{PriceError, percent_of_minor},
    solvers::SearchBudget,
};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading a configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// The search must be allowed at least one node
    #[error("max_nodes must be greater than zero")]
    ZeroNodeBudget,
}

/// Tunable limits for one optimizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerConfig {
    /// Most search nodes a single call may visit
    pub max_nodes: u64,

    /// Longest a single search may run, if bounded
    pub max_duration: Option<Duration>,

    /// Smallest upgrade premium always allowed, in major currency units
    pub upgrade_floor: i64,

    /// Upgrade premium allowed as a share of the baseline price
    pub upgrade_ratio: Percentage,

    /// Most alternatives a single upsell rule may propose
    pub suggestion_limit: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        let budget = SearchBudget::default();

        Self {
            max_nodes: budget.max_nodes,
            max_duration: budget.max_duration,
            upgrade_floor: 50,
            upgrade_ratio: Percentage::from(0.3),
            suggestion_limit: 3,
        }
    }
}

impl OptimizerConfig {
    /// Set the search node budget.
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Set or clear the wall-clock budget.
    #[must_use]
    pub fn with_max_duration(mut self, max_duration: Option<Duration>) -> Self {
        self.max_duration = max_duration;
        self
    }

    /// Set the upgrade premium floor in major currency units.
    #[must_use]
    pub fn with_upgrade_floor(mut self, upgrade_floor: i64) -> Self {
        self.upgrade_floor = upgrade_floor;
        self
    }

    /// Set the upgrade premium ratio.
    #[must_use]
    pub fn with_upgrade_ratio(mut self, upgrade_ratio: Percentage) -> Self {
        self.upgrade_ratio = upgrade_ratio;
        self
    }

    /// Set how many alternatives an upsell rule may propose.
    #[must_use]
    pub fn with_suggestion_limit(mut self, suggestion_limit: usize) -> Self {
        self.suggestion_limit = suggestion_limit;
        self
    }

    /// Search limits for the cover solver.
    pub fn budget(&self) -> SearchBudget {
        SearchBudget {
            max_nodes: self.max_nodes,
            max_duration: self.max_duration,
        }
    }

    /// Largest premium over `baseline_minor` an upgrade may charge:
    /// the greater of the floor and the ratio of the baseline.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the ratio cannot be applied to the baseline.
    pub fn upgrade_threshold_minor(
        &self,
        baseline_minor: i64,
        currency: &Currency,
    ) -> Result<i64, PriceError> {
        let floor = Money::from_major(self.upgrade_floor, currency).to_minor_units();
        let share = percent_of_minor(self.upgrade_ratio, baseline_minor)?;

        Ok(floor.max(share))
    }

    /// Parse a configuration from YAML; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the YAML is malformed or a value is invalid.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_norway::from_str(yaml)?;

        file.try_into()
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }
}

/// Configuration as written in YAML.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    max_nodes: Option<u64>,

    /// Milliseconds; `0` disables the wall-clock budget
    max_duration_ms: Option<u64>,

    upgrade_floor: Option<i64>,

    /// `"30%"` or `"0.3"`
    upgrade_ratio: Option<String>,

    suggestion_limit: Option<usize>,
}

impl TryFrom<ConfigFile> for OptimizerConfig {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        let mut config = OptimizerConfig::default();

        if let Some(max_nodes) = file.max_nodes {
            if max_nodes == 0 {
                return Err(ConfigError::ZeroNodeBudget);
            }

            config.max_nodes = max_nodes;
        }

        if let Some(max_duration_ms) = file.max_duration_ms {
            config.max_duration =
                (max_duration_ms > 0).then(|| Duration::from_millis(max_duration_ms));
        }

        if let Some(upgrade_floor) = file.upgrade_floor {
            config.upgrade_floor = upgrade_floor;
        }

        if let Some(upgrade_ratio) = file.upgrade_ratio {
            config.upgrade_ratio = parse_percentage(&upgrade_ratio)?;
        }

        if let Some(suggestion_limit) = file.suggestion_limit {
            config.suggestion_limit = suggestion_limit;
        }

        Ok(config)
    }
}

/// Parse percentage string (e.g., "30%" or "0.3") into a `Percentage`
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPercentage`] if the string is not a number or
/// is negative.
pub fn parse_percentage(s: &str) -> Result<Percentage, ConfigError> {
    let trimmed = s.trim();

    let value = match trimmed.strip_suffix('%') {
        Some(percent_str) => {
            percent_str
                .trim()
                .parse::<f64>()
                .map_err(|_err| ConfigError::InvalidPercentage(s.to_string()))?
                / 100.0
        }
        None => trimmed
            .parse::<f64>()
            .map_err(|_err| ConfigError::InvalidPercentage(s.to_string()))?,
    };

    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidPercentage(s.to_string()));
    }

    Ok(Percentage::from(value))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rusty_money::iso::TWD;
    use tempfile::NamedTempFile;
    use testresult::TestResult;

    use super::*;

    fn twd_minor(major: i64) -> i64 {
        Money::from_major(major, TWD).to_minor_units()
    }

    #[test]
    fn defaults() {
        let config = OptimizerConfig::default();

        assert_eq!(config.max_nodes, 250_000);
        assert_eq!(config.max_duration, Some(Duration::from_secs(2)));
        assert_eq!(config.upgrade_floor, 50);
        assert_eq!(config.upgrade_ratio, Percentage::from(0.3));
        assert_eq!(config.suggestion_limit, 3);
    }

    #[test]
    fn threshold_is_floor_for_small_baselines() -> TestResult {
        let config = OptimizerConfig::default();

        let small = config.upgrade_threshold_minor(twd_minor(100), TWD)?;
        let large = config.upgrade_threshold_minor(twd_minor(300), TWD)?;

        assert_eq!(small, Money::from_major(50, TWD).to_minor_units());
        assert_eq!(large, Money::from_major(90, TWD).to_minor_units());

        Ok(())
    }

    fn threshold_for(config: &OptimizerConfig, total: &Money<'_, Currency>) -> TestResult<i64> {
        Ok(config.upgrade_threshold_minor(total.to_minor_units(), total.currency())?)
    }

    #[test]
    fn threshold_accepts_currency_of_any_money() -> TestResult {
        let config = OptimizerConfig::default();

        assert_eq!(threshold_for(&config, &Money::from_major(300, TWD))?, twd_minor(90));
        assert_eq!(threshold_for(&config, &Money::from_major(20, TWD))?, twd_minor(50));

        Ok(())
    }

    #[test]
    fn yaml_overrides_selected_keys() -> TestResult {
        let config = OptimizerConfig::from_yaml_str(
            "max_nodes: 1000\nmax_duration_ms: 0\nupgrade_ratio: \"25%\"\n",
        )?;

        assert_eq!(config.max_nodes, 1000);
        assert_eq!(config.max_duration, None);
        assert_eq!(config.upgrade_ratio, Percentage::from(0.25));
        assert_eq!(config.upgrade_floor, 50);

        Ok(())
    }

    #[test]
    fn yaml_rejects_zero_nodes_and_unknown_keys() {
        assert!(matches!(
            OptimizerConfig::from_yaml_str("max_nodes: 0"),
            Err(ConfigError::ZeroNodeBudget)
        ));
        assert!(matches!(
            OptimizerConfig::from_yaml_str("max_depth: 3"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn parse_percentage_formats() -> TestResult {
        assert_eq!(parse_percentage("30%")?, Percentage::from(0.3));
        assert_eq!(parse_percentage(" 0.3 ")?, Percentage::from(0.3));
        assert!(matches!(
            parse_percentage("-5%"),
            Err(ConfigError::InvalidPercentage(_))
        ));
        assert!(matches!(
            parse_percentage("lots"),
            Err(ConfigError::InvalidPercentage(_))
        ));

        Ok(())
    }

    #[test]
    fn loads_from_file() -> TestResult {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "suggestion_limit: 1")?;

        let config = OptimizerConfig::from_path(file.path())?;

        assert_eq!(config.suggestion_limit, 1);
        assert_eq!(config.budget(), SearchBudget::default());

        Ok(())
    }
}
