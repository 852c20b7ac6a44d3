//! Provinces: the producing units of a country.

use crate::bounded::{new_infrastructure, Infrastructure};
use crate::resources::ResourceKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a province in its country's province list.
///
/// Stable for the lifetime of a country; provinces are never removed.
pub type ProvinceIndex = usize;

/// Fixed local resource deposits. Immutable once the province is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvinceReserves {
    pub oil: u32,
    pub steel: u32,
    pub tungsten: u32,
    pub chromium: u32,
    pub aluminium: u32,
}

impl ProvinceReserves {
    /// Reserve of `kind`. Kinds that are never deposits (fuel, manpower) are always zero.
    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Oil => self.oil,
            ResourceKind::Steel => self.steel,
            ResourceKind::Tungsten => self.tungsten,
            ResourceKind::Chromium => self.chromium,
            ResourceKind::Aluminium => self.aluminium,
            ResourceKind::Fuel | ResourceKind::Manpower => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    name: String,
    population: u32,
    civilian_factories: u32,
    military_factories: u32,
    infrastructure: Infrastructure,
    reserves: ProvinceReserves,
}

impl Province {
    /// Creates a province with no reserves. `infrastructure` is clamped to `[0, 10]`.
    pub fn new(
        name: impl Into<String>,
        population: u32,
        civilian_factories: u32,
        military_factories: u32,
        infrastructure: i32,
    ) -> Self {
        Self {
            name: name.into(),
            population,
            civilian_factories,
            military_factories,
            infrastructure: new_infrastructure(infrastructure),
            reserves: ProvinceReserves::default(),
        }
    }

    pub fn with_reserves(mut self, reserves: ProvinceReserves) -> Self {
        self.reserves = reserves;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn population(&self) -> u32 {
        self.population
    }

    pub fn civilian_factories(&self) -> u32 {
        self.civilian_factories
    }

    pub fn military_factories(&self) -> u32 {
        self.military_factories
    }

    pub fn infrastructure(&self) -> i32 {
        self.infrastructure.get()
    }

    pub fn reserves(&self) -> &ProvinceReserves {
        &self.reserves
    }

    /// Changes the civilian factory count, flooring at zero.
    pub fn add_civilian_factories(&mut self, delta: i32) {
        self.civilian_factories = self.civilian_factories.saturating_add_signed(delta);
    }

    /// Changes the military factory count, flooring at zero.
    pub fn add_military_factories(&mut self, delta: i32) {
        self.military_factories = self.military_factories.saturating_add_signed(delta);
    }

    /// Changes the infrastructure level, clamped to `[0, 10]`.
    pub fn add_infrastructure(&mut self, delta: i32) {
        self.infrastructure.add(delta);
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Province({}) pop={}, INFRA={}, CIV={}, MIL={}, STEEL={}, TUNGSTEN={}, CHROMIUM={}, ALUMINIUM={}, OIL={}",
            self.name,
            self.population,
            self.infrastructure(),
            self.civilian_factories,
            self.military_factories,
            self.reserves.steel,
            self.reserves.tungsten,
            self.reserves.chromium,
            self.reserves.aluminium,
            self.reserves.oil,
        )
    }
}
