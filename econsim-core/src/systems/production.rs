//! Daily resource production.
//!
//! Two production models are supported, selected once per country through
//! [`ProductionModel`]:
//!
//! - **Reserve extraction**: oil reserves are refined into fuel at a fixed ratio,
//!   refineries add a flat daily fuel bonus, and population yields manpower.
//! - **Factory output**: oil and steel are linear in the factory counts, scaled by
//!   the infrastructure multiplier `0.6 + 0.05 × infrastructure`.
//!
//! # Rounding
//! Every output component is rounded to the nearest integer (half away from zero)
//! independently, per province, per day. Fractions are not carried between days.

use crate::config::ConfigError;
use crate::defines::production as defines;
use crate::province::Province;
use crate::resources::{ResourceDelta, ResourceKind};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A production rule: what one province yields per day, plus any country-level term.
pub trait Production {
    /// Daily yield of a single province. Pure.
    fn province_output(&self, province: &Province) -> ResourceDelta;

    /// Daily yield of country-level facilities.
    fn country_output(&self, refineries: u32) -> ResourceDelta;
}

/// Parameters of the reserve-extraction model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReserveExtraction {
    /// Fuel per unit of oil reserve per day
    pub oil_to_fuel_ratio: i64,
    /// Fuel per refinery per day
    pub refinery_fuel_bonus: i64,
    /// Manpower per head of population per day
    pub manpower_per_pop: f64,
}

impl Default for ReserveExtraction {
    fn default() -> Self {
        Self {
            oil_to_fuel_ratio: defines::OIL_TO_FUEL_RATIO,
            refinery_fuel_bonus: defines::REFINERY_FUEL_BONUS_PER_DAY,
            manpower_per_pop: defines::MANPOWER_PER_POP,
        }
    }
}

impl Production for ReserveExtraction {
    fn province_output(&self, province: &Province) -> ResourceDelta {
        let fuel = i64::from(province.reserves().oil).saturating_mul(self.oil_to_fuel_ratio);
        let manpower = round(f64::from(province.population()) * self.manpower_per_pop);
        ResourceDelta::new()
            .with(ResourceKind::Fuel, fuel)
            .with(ResourceKind::Manpower, manpower)
    }

    fn country_output(&self, refineries: u32) -> ResourceDelta {
        ResourceDelta::new().with(
            ResourceKind::Fuel,
            i64::from(refineries).saturating_mul(self.refinery_fuel_bonus),
        )
    }
}

/// Parameters of the factory-output model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryOutput {
    pub oil_per_civ: f64,
    pub oil_per_mil: f64,
    pub steel_per_civ: f64,
    pub steel_per_mil: f64,
    pub manpower_per_pop: f64,
    /// Infrastructure multiplier at level 0
    pub infra_base: f64,
    /// Infrastructure multiplier gained per level
    pub infra_per_level: f64,
    /// Fuel per refinery per day
    pub refinery_fuel_bonus: i64,
}

impl Default for FactoryOutput {
    fn default() -> Self {
        Self {
            oil_per_civ: defines::OIL_PER_CIV,
            oil_per_mil: defines::OIL_PER_MIL,
            steel_per_civ: defines::STEEL_PER_CIV,
            steel_per_mil: defines::STEEL_PER_MIL,
            manpower_per_pop: defines::MANPOWER_PER_POP,
            infra_base: defines::INFRA_MULTIPLIER_BASE,
            infra_per_level: defines::INFRA_MULTIPLIER_PER_LEVEL,
            refinery_fuel_bonus: defines::REFINERY_FUEL_BONUS_PER_DAY,
        }
    }
}

impl FactoryOutput {
    /// `infra_base + infra_per_level × level`; `[0.6, 1.1]` with default parameters.
    pub fn infrastructure_multiplier(&self, infrastructure: i32) -> f64 {
        self.infra_base + self.infra_per_level * f64::from(infrastructure)
    }
}

impl Production for FactoryOutput {
    fn province_output(&self, province: &Province) -> ResourceDelta {
        let multiplier = self.infrastructure_multiplier(province.infrastructure());
        let civ = f64::from(province.civilian_factories());
        let mil = f64::from(province.military_factories());

        let oil = (self.oil_per_civ * civ + self.oil_per_mil * mil) * multiplier;
        let steel = (self.steel_per_civ * civ + self.steel_per_mil * mil) * multiplier;
        let manpower = f64::from(province.population()) * self.manpower_per_pop * multiplier;

        ResourceDelta::new()
            .with(ResourceKind::Oil, round(oil))
            .with(ResourceKind::Steel, round(steel))
            .with(ResourceKind::Manpower, round(manpower))
    }

    fn country_output(&self, refineries: u32) -> ResourceDelta {
        ResourceDelta::new().with(
            ResourceKind::Fuel,
            i64::from(refineries).saturating_mul(self.refinery_fuel_bonus),
        )
    }
}

/// The production model a country runs under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ProductionModel {
    ReserveExtraction(ReserveExtraction),
    FactoryOutput(FactoryOutput),
}

impl Default for ProductionModel {
    fn default() -> Self {
        ProductionModel::ReserveExtraction(ReserveExtraction::default())
    }
}

impl ProductionModel {
    pub fn name(&self) -> &'static str {
        match self {
            ProductionModel::ReserveExtraction(_) => "reserve_extraction",
            ProductionModel::FactoryOutput(_) => "factory_output",
        }
    }

    /// Rejects negative coefficients.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let coefficients: Vec<(&'static str, f64)> = match self {
            ProductionModel::ReserveExtraction(p) => vec![
                ("oil_to_fuel_ratio", p.oil_to_fuel_ratio as f64),
                ("refinery_fuel_bonus", p.refinery_fuel_bonus as f64),
                ("manpower_per_pop", p.manpower_per_pop),
            ],
            ProductionModel::FactoryOutput(p) => vec![
                ("oil_per_civ", p.oil_per_civ),
                ("oil_per_mil", p.oil_per_mil),
                ("steel_per_civ", p.steel_per_civ),
                ("steel_per_mil", p.steel_per_mil),
                ("manpower_per_pop", p.manpower_per_pop),
                ("infra_base", p.infra_base),
                ("infra_per_level", p.infra_per_level),
                ("refinery_fuel_bonus", p.refinery_fuel_bonus as f64),
            ],
        };

        for (field, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidCoefficient { field, value });
            }
        }
        Ok(())
    }
}

impl Production for ProductionModel {
    fn province_output(&self, province: &Province) -> ResourceDelta {
        match self {
            ProductionModel::ReserveExtraction(p) => p.province_output(province),
            ProductionModel::FactoryOutput(p) => p.province_output(province),
        }
    }

    fn country_output(&self, refineries: u32) -> ResourceDelta {
        match self {
            ProductionModel::ReserveExtraction(p) => p.country_output(refineries),
            ProductionModel::FactoryOutput(p) => p.country_output(refineries),
        }
    }
}

/// Sums one day of production across `provinces` plus the country-level term.
///
/// Pure: the caller applies the result to its stockpile.
#[instrument(skip_all, name = "production")]
pub fn daily_production<P: Production + ?Sized>(
    model: &P,
    provinces: &[Province],
    refineries: u32,
) -> ResourceDelta {
    let mut total = model.country_output(refineries);
    for province in provinces {
        total += model.province_output(province);
    }
    total
}

/// Nearest integer, halves away from zero.
fn round(value: f64) -> i64 {
    value.round() as i64
}
