//! Tunable constants for every tool, loadable from a JSON file. Sections and fields omitted from
//! the file take their defaults.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::briefing::BriefingConfig;
use crate::clv::ClvConfig;
use crate::file::read_json;
use crate::kelly::KellyConfig;
use crate::ledger::LedgerConfig;
use crate::movement::MovementConfig;
use crate::parlay::ParlayConfig;
use crate::ruin::RuinConfig;
use crate::streak::StreakConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub kelly: KellyConfig,
    pub clv: ClvConfig,
    pub ruin: RuinConfig,
    pub movement: MovementConfig,
    pub parlay: ParlayConfig,
    pub briefing: BriefingConfig,
    pub streak: StreakConfig,
    pub ledger: LedgerConfig,
}
impl Config {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.kelly.validate()?;
        self.clv.validate()?;
        self.ruin.validate()?;
        self.movement.validate()?;
        self.parlay.validate()?;
        self.briefing.validate()?;
        self.streak.validate()?;
        self.ledger.validate()?;
        Ok(())
    }

    /// Reads and validates the config at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let config: Config =
            read_json(path).with_context(|| format!("reading config from {}", path.display()))?;
        config.validate()?;
        debug!("loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// The config at `path` if one is given, otherwise the defaults.
    pub fn load_or_default(path: Option<impl AsRef<Path>>) -> Result<Self, anyhow::Error> {
        match path {
            None => Ok(Self::default()),
            Some(path) => Self::load(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    fn write_temp(name: &str, json: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("brolly-{name}-{}.json", std::process::id()));
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn defaults_are_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let path = write_temp(
            "partial",
            r#"{"kelly": {"max_fraction": 0.1}, "ruin": {"severe_ruin": 0.4}}"#,
        );
        let config = Config::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(0.1, config.kelly.max_fraction);
        assert_eq!(KellyConfig::default().streak_guards, config.kelly.streak_guards);
        assert_eq!(0.4, config.ruin.severe_ruin);
        assert_eq!(RuinConfig::default().max_sims, config.ruin.max_sims);
        assert_eq!(ClvConfig::default(), config.clv);
    }

    #[test]
    fn invalid_file_is_rejected() {
        let path = write_temp("invalid", r#"{"ruin": {"min_sims": 0}}"#);
        let result = Config::load(&path);
        fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn missing_path_is_default() {
        assert_eq!(Config::default(), Config::load_or_default(None::<PathBuf>).unwrap());
        assert!(Config::load_or_default(Some("/nonexistent/brolly.json")).is_err());
    }
}
