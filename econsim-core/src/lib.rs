//! # Economy Simulation Core
//!
//! Deterministic daily-tick engine for a national economy: countries own
//! provinces that produce resources, and civilian factories spend build points
//! on a construction queue.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌──────────────────────────┐
//! │ PlayerInputs │────▶│ step_world  │────▶│ Country::simulate_day    │
//! │ (commands)   │     │ (per day)   │     │  1. production → stock   │
//! └──────────────┘     └─────────────┘     │  2. construction queue   │
//!                                          └──────────────────────────┘
//! ```
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`ResourceStockpile`] | Non-negative resource counters (`add`, `consume`) |
//! | [`Province`] | Population, factories, infrastructure, reserves |
//! | [`ConstructionQueue`] | In-flight [`ConstructionTask`]s, equal-split progression |
//! | [`Country`] | Owns the above and runs the daily tick |
//! | [`ProductionModel`] | Pluggable per-province production rule |
//! | [`WorldState`] / [`step_world`] | Several independent countries advanced together |

pub mod bounded;
pub mod config;
pub mod construction;
pub mod country;
pub mod defines;
pub mod input;
pub mod province;
pub mod resources;
pub mod state;
pub mod step;
pub mod systems;
pub mod testing;

pub use bounded::{new_infrastructure, BoundedInt, Infrastructure};
pub use config::{BuildCosts, ConfigError, ConstructionConfig, EconomyConfig, SimConfig};
pub use construction::{BuildKind, ConstructionError, ConstructionQueue, ConstructionTask};
pub use country::{Country, DayReport};
pub use input::{Command, PlayerInputs};
pub use province::{Province, ProvinceIndex, ProvinceReserves};
pub use resources::{ResourceDelta, ResourceKind, ResourceStockpile, StockpileError};
pub use state::{Day, WorldState};
pub use step::{step_world, ActionError};
pub use systems::{
    daily_production, FactoryOutput, Production, ProductionModel, ReserveExtraction,
};
