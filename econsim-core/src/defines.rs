//! Game mechanic constants (defines).
//!
//! Default balance values used by [`EconomyConfig::default`](crate::EconomyConfig).
//! Everything here can be overridden through configuration; the engine never reads
//! these directly during a tick.

/// Province production constants
pub mod production {
    /// Fuel produced per unit of oil reserve per day
    pub const OIL_TO_FUEL_RATIO: i64 = 5;

    /// Flat daily fuel bonus per completed refinery
    pub const REFINERY_FUEL_BONUS_PER_DAY: i64 = 10;

    /// Manpower accrued per head of population per day
    pub const MANPOWER_PER_POP: f64 = 0.0001;

    /// Oil output per civilian factory (factory-output model)
    pub const OIL_PER_CIV: f64 = 1.0;

    /// Oil output per military factory (factory-output model)
    pub const OIL_PER_MIL: f64 = 0.5;

    /// Steel output per civilian factory (factory-output model)
    pub const STEEL_PER_CIV: f64 = 0.5;

    /// Steel output per military factory (factory-output model)
    pub const STEEL_PER_MIL: f64 = 2.0;

    /// Infrastructure multiplier at level 0
    pub const INFRA_MULTIPLIER_BASE: f64 = 0.6;

    /// Infrastructure multiplier gained per level (0.6 + 0.05 × 10 = 1.1)
    pub const INFRA_MULTIPLIER_PER_LEVEL: f64 = 0.05;
}

/// Construction constants
pub mod construction {
    /// Build points contributed per civilian factory per day
    pub const CIV_OUTPUT_PER_DAY: f64 = 1.0;

    pub const INFRA_COST: f64 = 5.0;
    pub const CIV_COST: f64 = 25.0;
    pub const MIL_COST: f64 = 25.0;
    pub const REFINERY_COST: f64 = 20.0;

    /// Remaining BP at or below this counts as finished
    pub const COMPLETION_EPSILON: f64 = 1e-4;
}

/// Infrastructure level bounds
pub mod infrastructure {
    pub const MIN: i32 = 0;
    pub const MAX: i32 = 10;
}
