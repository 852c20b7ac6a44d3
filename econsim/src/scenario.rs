//! Scenario and configuration loading.
//!
//! A scenario is the static starting data for a run: countries, their provinces,
//! initial stockpiles, and construction orders queued before day 1. Malformed
//! scenario data aborts startup.

use anyhow::{bail, Context, Result};
use econsim_core::{
    BuildKind, Country, EconomyConfig, Province, ProvinceIndex, ProvinceReserves, ResourceKind,
    ResourceStockpile, SimConfig, WorldState,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub countries: Vec<CountryDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryDef {
    pub name: String,
    pub ideology: String,
    pub provinces: Vec<ProvinceDef>,
    #[serde(default)]
    pub stockpile: BTreeMap<ResourceKind, i64>,
    /// Orders queued before the first tick, in this order.
    #[serde(default)]
    pub construction: Vec<ConstructionOrder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvinceDef {
    pub name: String,
    pub population: u32,
    pub civilian_factories: u32,
    pub military_factories: u32,
    pub infrastructure: i32,
    #[serde(default)]
    pub reserves: ProvinceReserves,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstructionOrder {
    pub kind: BuildKind,
    pub province: ProvinceIndex,
}

impl ProvinceDef {
    fn new(
        name: &str,
        population: u32,
        civ: u32,
        mil: u32,
        infrastructure: i32,
        reserves: ProvinceReserves,
    ) -> Self {
        Self {
            name: name.to_string(),
            population,
            civilian_factories: civ,
            military_factories: mil,
            infrastructure,
            reserves,
        }
    }
}

fn reserves(steel: u32, tungsten: u32, chromium: u32, aluminium: u32, oil: u32) -> ProvinceReserves {
    ProvinceReserves {
        oil,
        steel,
        tungsten,
        chromium,
        aluminium,
    }
}

impl Scenario {
    /// Built-in two-country scenario.
    pub fn builtin() -> Self {
        Scenario {
            countries: vec![
                CountryDef {
                    name: "Romania".to_string(),
                    ideology: "Democratic".to_string(),
                    provinces: vec![
                        ProvinceDef::new("Wallachia", 1800, 3, 1, 6, reserves(1, 1, 1, 10, 3)),
                        ProvinceDef::new("Moldavia", 1500, 2, 2, 5, reserves(6, 1, 1, 1, 1)),
                        ProvinceDef::new("Transylvania", 1600, 2, 1, 7, reserves(8, 1, 1, 1, 2)),
                    ],
                    stockpile: [(ResourceKind::Fuel, 0), (ResourceKind::Manpower, 50)]
                        .into_iter()
                        .collect(),
                    construction: vec![
                        ConstructionOrder {
                            kind: BuildKind::Refinery,
                            province: 0,
                        },
                        ConstructionOrder {
                            kind: BuildKind::CivilianFactory,
                            province: 2,
                        },
                    ],
                },
                CountryDef {
                    name: "Hungary".to_string(),
                    ideology: "Authoritarian".to_string(),
                    provinces: vec![
                        ProvinceDef::new("Alfold", 1400, 2, 2, 6, reserves(7, 1, 1, 1, 1)),
                        ProvinceDef::new("Transdanubia", 1200, 2, 1, 6, reserves(5, 1, 1, 1, 2)),
                    ],
                    stockpile: [(ResourceKind::Fuel, 0), (ResourceKind::Manpower, 45)]
                        .into_iter()
                        .collect(),
                    construction: vec![ConstructionOrder {
                        kind: BuildKind::MilitaryFactory,
                        province: 1,
                    }],
                },
            ],
        }
    }

    /// Builds the initial world, queueing every country's starting orders.
    pub fn build(&self, economy: &EconomyConfig) -> Result<WorldState> {
        let mut seen = HashSet::new();
        let mut countries = Vec::with_capacity(self.countries.len());

        for def in &self.countries {
            if !seen.insert(def.name.as_str()) {
                bail!("Duplicate country name in scenario: {}", def.name);
            }
            countries.push(def.build(economy)?);
        }

        log::info!("Built scenario with {} countries", countries.len());
        Ok(WorldState::new(countries))
    }
}

impl CountryDef {
    fn build(&self, economy: &EconomyConfig) -> Result<Country> {
        let mut provinces = Vec::with_capacity(self.provinces.len());
        for p in &self.provinces {
            if !(0..=10).contains(&p.infrastructure) {
                bail!(
                    "Province {} of {} has infrastructure {} (expected 0..=10)",
                    p.name,
                    self.name,
                    p.infrastructure
                );
            }
            provinces.push(
                Province::new(
                    p.name.as_str(),
                    p.population,
                    p.civilian_factories,
                    p.military_factories,
                    p.infrastructure,
                )
                .with_reserves(p.reserves),
            );
        }

        let stockpile = ResourceStockpile::from_amounts(self.stockpile.iter().map(|(&k, &v)| (k, v)));
        let mut country = Country::new(self.name.as_str(), self.ideology.as_str(), provinces, stockpile)
            .with_economy(economy.clone())
            .with_context(|| format!("Invalid economy for {}", self.name))?;

        for order in &self.construction {
            country
                .start_construction(order.kind, order.province)
                .with_context(|| format!("Initial construction order for {}", self.name))?;
        }

        log::debug!(
            "{}: {} provinces, {} queued orders",
            self.name,
            country.provinces().len(),
            country.queue().len()
        );
        Ok(country)
    }
}

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse scenario {}", path.display()))
}

pub fn load_config(path: &Path) -> Result<SimConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: SimConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    Ok(config)
}
