//! Economy simulation systems.

pub mod construction;
pub mod production;

pub use construction::{apply_completion, progress_queue, run_construction_tick};
pub use production::{
    daily_production, FactoryOutput, Production, ProductionModel, ReserveExtraction,
};
