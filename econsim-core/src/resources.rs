//! Resource kinds, deltas, and the national stockpile.
//!
//! The stockpile is a bag of non-negative integer counters. It supports two
//! distinct mutation modes:
//!
//! - [`ResourceStockpile::add`]: saturating. Applies a delta and clamps every
//!   counter at zero. Used by production and never fails.
//! - [`ResourceStockpile::try_consume`] / [`ResourceStockpile::consume`]:
//!   all-or-nothing spend. Either every cost is paid or nothing changes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign};
use thiserror::Error;

/// Every resource kind known to the economy.
///
/// Ordering is stable and used for deterministic iteration and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Fuel,
    Manpower,
    Oil,
    Steel,
    Tungsten,
    Chromium,
    Aluminium,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Fuel,
        ResourceKind::Manpower,
        ResourceKind::Oil,
        ResourceKind::Steel,
        ResourceKind::Tungsten,
        ResourceKind::Chromium,
        ResourceKind::Aluminium,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Fuel => "Fuel",
            ResourceKind::Manpower => "Manpower",
            ResourceKind::Oil => "Oil",
            ResourceKind::Steel => "Steel",
            ResourceKind::Tungsten => "Tungsten",
            ResourceKind::Chromium => "Chromium",
            ResourceKind::Aluminium => "Aluminium",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Signed per-kind amounts: a production gain, a cost, or any other change.
///
/// Kinds that are absent read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceDelta(BTreeMap<ResourceKind, i64>);

impl ResourceDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style accumulate.
    pub fn with(mut self, kind: ResourceKind, amount: i64) -> Self {
        self.accumulate(kind, amount);
        self
    }

    pub fn get(&self, kind: ResourceKind) -> i64 {
        self.0.get(&kind).copied().unwrap_or(0)
    }

    /// Adds `amount` to the entry for `kind`.
    pub fn accumulate(&mut self, kind: ResourceKind, amount: i64) {
        let entry = self.0.entry(kind).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// True if every entry is zero.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|&v| v == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, i64)> + '_ {
        self.0.iter().map(|(&k, &v)| (k, v))
    }
}

impl AddAssign<&ResourceDelta> for ResourceDelta {
    fn add_assign(&mut self, rhs: &ResourceDelta) {
        for (kind, amount) in rhs.iter() {
            self.accumulate(kind, amount);
        }
    }
}

impl AddAssign for ResourceDelta {
    fn add_assign(&mut self, rhs: ResourceDelta) {
        *self += &rhs;
    }
}

impl Add for ResourceDelta {
    type Output = ResourceDelta;

    fn add(mut self, rhs: ResourceDelta) -> ResourceDelta {
        self += &rhs;
        self
    }
}

impl FromIterator<(ResourceKind, i64)> for ResourceDelta {
    fn from_iter<I: IntoIterator<Item = (ResourceKind, i64)>>(iter: I) -> Self {
        let mut delta = ResourceDelta::new();
        for (kind, amount) in iter {
            delta.accumulate(kind, amount);
        }
        delta
    }
}

impl fmt::Display for ResourceDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_amounts(f, self.iter())
    }
}

/// Error returned by [`ResourceStockpile::try_consume`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StockpileError {
    #[error("Insufficient {kind}: required {required}, available {available}")]
    Insufficient {
        kind: ResourceKind,
        required: i64,
        available: i64,
    },
}

/// A country's resource stockpile. Every amount is `>= 0` at all times.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStockpile {
    amounts: BTreeMap<ResourceKind, i64>,
}

impl ResourceStockpile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a stockpile from initial amounts. Negative amounts clamp to zero.
    pub fn from_amounts<I: IntoIterator<Item = (ResourceKind, i64)>>(amounts: I) -> Self {
        let initial: ResourceDelta = amounts.into_iter().collect();
        let mut stockpile = Self::new();
        stockpile.add(&initial);
        stockpile
    }

    pub fn get(&self, kind: ResourceKind) -> i64 {
        self.amounts.get(&kind).copied().unwrap_or(0)
    }

    /// Applies `deltas` elementwise, clamping each result at zero.
    pub fn add(&mut self, deltas: &ResourceDelta) {
        for (kind, delta) in deltas.iter() {
            let amount = self.amounts.entry(kind).or_insert(0);
            *amount = amount.saturating_add(delta).max(0);
        }
    }

    /// True if every cost is covered.
    ///
    /// Negative cost entries are treated as zero: a cost is never a gain.
    pub fn can_afford(&self, costs: &ResourceDelta) -> bool {
        self.first_shortfall(costs).is_none()
    }

    /// Pays all `costs` or nothing.
    pub fn try_consume(&mut self, costs: &ResourceDelta) -> Result<(), StockpileError> {
        if let Some(err) = self.first_shortfall(costs) {
            return Err(err);
        }
        for (kind, cost) in costs.iter() {
            if cost > 0 {
                let amount = self.amounts.entry(kind).or_insert(0);
                *amount -= cost;
            }
        }
        Ok(())
    }

    /// Boolean form of [`try_consume`](Self::try_consume).
    pub fn consume(&mut self, costs: &ResourceDelta) -> bool {
        self.try_consume(costs).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, i64)> + '_ {
        self.amounts.iter().map(|(&k, &v)| (k, v))
    }

    fn first_shortfall(&self, costs: &ResourceDelta) -> Option<StockpileError> {
        costs.iter().find_map(|(kind, cost)| {
            let available = self.get(kind);
            (cost > available).then_some(StockpileError::Insufficient {
                kind,
                required: cost,
                available,
            })
        })
    }
}

impl fmt::Display for ResourceStockpile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_amounts(f, self.iter())
    }
}

fn write_amounts(
    f: &mut fmt::Formatter<'_>,
    amounts: impl Iterator<Item = (ResourceKind, i64)>,
) -> fmt::Result {
    let mut first = true;
    for (kind, amount) in amounts {
        if !first {
            f.write_str(", ")?;
        }
        write!(f, "{}={}", kind, amount)?;
        first = false;
    }
    if first {
        f.write_str("(none)")?;
    }
    Ok(())
}
