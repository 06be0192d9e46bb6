use serde::{Deserialize, Serialize};

use crate::error::{RaceError, RaceResult};
use crate::simulation::engine::{check_probability, EngineKind};

/// Setup for a single race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Car names in lineup order. Duplicates are allowed.
    pub car_names: Vec<String>,
    /// Engine handed to every car.
    pub engine: EngineKind,
    /// Laps run by [`crate::simulate`] and `RaceDirector::run_scheduled_laps`.
    pub laps: u32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            car_names: ["petty", "loopy", "crong", "poby", "harry"]
                .into_iter()
                .map(String::from)
                .collect(),
            engine: EngineKind::default(),
            laps: 10,
        }
    }
}

impl RaceConfig {
    /// Config for the given lineup with default engine and lap count.
    pub fn new<I, S>(car_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            car_names: car_names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_engine(mut self, engine: EngineKind) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_laps(mut self, laps: u32) -> Self {
        self.laps = laps;
        self
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> RaceResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the lineup and engine settings before a race is built.
    pub fn validate(&self) -> RaceResult<()> {
        if self.car_names.is_empty() {
            return Err(RaceError::EmptyLineup);
        }
        if let EngineKind::Random { probability, .. } = self.engine {
            check_probability(probability)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RaceConfig::default();
        assert_eq!(config.car_names.len(), 5);
        assert_eq!(config.laps, 10);
        config.validate().unwrap();
    }

    #[test]
    fn json_fills_missing_fields() {
        let config = RaceConfig::from_json(r#"{"car_names":["a","b"],"engine":{"kind":"perfect"}}"#)
            .unwrap();
        assert_eq!(config.car_names, vec!["a", "b"]);
        assert_eq!(config.engine, EngineKind::Perfect);
        assert_eq!(config.laps, 10);
    }

    #[test]
    fn json_rejects_bad_settings() {
        assert!(matches!(
            RaceConfig::from_json(r#"{"car_names":[]}"#),
            Err(RaceError::EmptyLineup)
        ));
        assert!(matches!(
            RaceConfig::from_json(r#"{"engine":{"kind":"random","probability":1.0}}"#),
            Err(RaceError::InvalidProbability(_))
        ));
        assert!(matches!(
            RaceConfig::from_json("{not json"),
            Err(RaceError::Config(_))
        ));
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = RaceConfig::new(["solo"])
            .with_engine(EngineKind::Broken)
            .with_laps(3);
        assert_eq!(config.car_names, vec!["solo"]);
        assert_eq!(config.engine, EngineKind::Broken);
        assert_eq!(config.laps, 3);
    }
}
