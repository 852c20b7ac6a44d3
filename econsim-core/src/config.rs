use crate::construction::BuildKind;
use crate::defines::construction as defines;
use crate::resources::ResourceDelta;
use crate::systems::production::ProductionModel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid coefficient {field}: {value} (must be finite and >= 0)")]
    InvalidCoefficient { field: &'static str, value: f64 },
    #[error("Invalid build cost for {kind}: {cost} (must be finite and > 0)")]
    InvalidBuildCost { kind: BuildKind, cost: f64 },
    #[error("Invalid civilian output per day: {0} (must be finite and >= 0)")]
    InvalidCivOutput(f64),
    #[error("Invalid completion epsilon: {0} (must be finite and > 0)")]
    InvalidEpsilon(f64),
}

/// Simulation run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of days to simulate.
    pub days: u32,
    pub economy: EconomyConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            // One month
            days: 30,
            economy: EconomyConfig::default(),
        }
    }
}

/// Configuration for economy simulation.
/// Externalized constants that can be adjusted without recompiling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub production: ProductionModel,
    pub construction: ConstructionConfig,
}

impl EconomyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.production.validate()?;
        self.construction.validate()
    }
}

/// Build point cost of each construction kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildCosts {
    pub infrastructure: f64,
    pub civilian_factory: f64,
    pub military_factory: f64,
    pub refinery: f64,
}

impl Default for BuildCosts {
    fn default() -> Self {
        Self {
            infrastructure: defines::INFRA_COST,
            civilian_factory: defines::CIV_COST,
            military_factory: defines::MIL_COST,
            refinery: defines::REFINERY_COST,
        }
    }
}

impl BuildCosts {
    pub fn get(&self, kind: BuildKind) -> f64 {
        match kind {
            BuildKind::Infrastructure => self.infrastructure,
            BuildKind::CivilianFactory => self.civilian_factory,
            BuildKind::MilitaryFactory => self.military_factory,
            BuildKind::Refinery => self.refinery,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructionConfig {
    pub costs: BuildCosts,
    /// Build points per civilian factory per day
    pub civ_output_per_day: f64,
    /// Tasks with remaining BP at or below this are complete
    pub completion_epsilon: f64,
    /// Resources paid from the stockpile when construction starts.
    /// Kinds without an entry are free to start.
    pub upfront_costs: BTreeMap<BuildKind, ResourceDelta>,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        Self {
            costs: BuildCosts::default(),
            civ_output_per_day: defines::CIV_OUTPUT_PER_DAY,
            completion_epsilon: defines::COMPLETION_EPSILON,
            upfront_costs: BTreeMap::new(),
        }
    }
}

impl ConstructionConfig {
    pub fn upfront_cost(&self, kind: BuildKind) -> Option<&ResourceDelta> {
        self.upfront_costs.get(&kind)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in BuildKind::ALL {
            let cost = self.costs.get(kind);
            if !cost.is_finite() || cost <= 0.0 {
                return Err(ConfigError::InvalidBuildCost { kind, cost });
            }
        }
        if !self.civ_output_per_day.is_finite() || self.civ_output_per_day < 0.0 {
            return Err(ConfigError::InvalidCivOutput(self.civ_output_per_day));
        }
        if !self.completion_epsilon.is_finite() || self.completion_epsilon <= 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.completion_epsilon));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceKind;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.days, 30);
        assert_eq!(config.economy.construction.civ_output_per_day, 1.0);
        assert_eq!(config.economy.construction.costs.get(BuildKind::Infrastructure), 5.0);
        assert_eq!(config.economy.construction.costs.get(BuildKind::Refinery), 20.0);
        assert!(config.economy.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "days": 60,
            "economy": {
                "construction": {
                    "costs": { "civilian_factory": 40.0 },
                    "upfront_costs": { "refinery": { "steel": 5 } }
                }
            }
        }"#;
        let config: SimConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.days, 60);
        assert_eq!(config.economy.construction.costs.civilian_factory, 40.0);
        assert_eq!(config.economy.construction.costs.military_factory, 25.0);
        assert_eq!(
            config
                .economy
                .construction
                .upfront_cost(BuildKind::Refinery)
                .map(|c| c.get(ResourceKind::Steel)),
            Some(5)
        );
        assert!(config
            .economy
            .construction
            .upfront_cost(BuildKind::Infrastructure)
            .is_none());
        assert_eq!(config.economy.production, ProductionModel::default());
    }

    #[test]
    fn test_validate_rejects_bad_construction_values() {
        let mut config = ConstructionConfig::default();
        config.costs.refinery = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidBuildCost {
                kind: BuildKind::Refinery,
                cost: 0.0
            })
        );

        let mut config = ConstructionConfig::default();
        config.completion_epsilon = -1.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidEpsilon(-1.0)));

        let mut config = ConstructionConfig::default();
        config.civ_output_per_day = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCivOutput(_))
        ));
    }
}
