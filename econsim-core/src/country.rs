//! Countries: owners of provinces, a stockpile, and a construction queue.
//!
//! [`Country::simulate_day`] is the daily tick. It runs two phases in a fixed order:
//!
//! 1. **Production**: every province's yield plus country-level facilities are
//!    summed into one delta and applied with [`ResourceStockpile::add`].
//! 2. **Construction**: the queue advances using the civilian factory count read
//!    after phase 1, and finished tasks apply their effect.

use crate::config::{ConfigError, EconomyConfig};
use crate::construction::{BuildKind, ConstructionError, ConstructionQueue, ConstructionTask};
use crate::province::{Province, ProvinceIndex};
use crate::resources::{ResourceDelta, ResourceKind, ResourceStockpile};
use crate::systems::construction::run_construction_tick;
use crate::systems::production::daily_production;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// What happened to a country during one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayReport {
    /// Delta applied to the stockpile in the production phase (before clamping).
    pub production: ResourceDelta,
    /// Tasks finished this tick, in queue order.
    pub completed: Vec<ConstructionTask>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    name: String,
    /// Free-form label; not interpreted by the simulation.
    ideology: String,
    provinces: Vec<Province>,
    stockpile: ResourceStockpile,
    queue: ConstructionQueue,
    refineries: u32,
    economy: EconomyConfig,
}

impl Country {
    /// Creates a country running the default [`EconomyConfig`].
    pub fn new(
        name: impl Into<String>,
        ideology: impl Into<String>,
        provinces: Vec<Province>,
        stockpile: ResourceStockpile,
    ) -> Self {
        Self {
            name: name.into(),
            ideology: ideology.into(),
            provinces,
            stockpile,
            queue: ConstructionQueue::new(),
            refineries: 0,
            economy: EconomyConfig::default(),
        }
    }

    /// Switches to `economy`, rejecting it if it fails [`EconomyConfig::validate`].
    pub fn with_economy(mut self, economy: EconomyConfig) -> Result<Self, ConfigError> {
        economy.validate()?;
        self.economy = economy;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ideology(&self) -> &str {
        &self.ideology
    }

    pub fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    pub fn province(&self, index: ProvinceIndex) -> Option<&Province> {
        self.provinces.get(index)
    }

    pub fn stockpile(&self) -> &ResourceStockpile {
        &self.stockpile
    }

    pub fn queue(&self) -> &ConstructionQueue {
        &self.queue
    }

    pub fn refineries(&self) -> u32 {
        self.refineries
    }

    pub fn economy(&self) -> &EconomyConfig {
        &self.economy
    }

    pub fn total_civilian_factories(&self) -> u32 {
        self.provinces
            .iter()
            .fold(0u32, |acc, p| acc.saturating_add(p.civilian_factories()))
    }

    pub fn total_military_factories(&self) -> u32 {
        self.provinces
            .iter()
            .fold(0u32, |acc, p| acc.saturating_add(p.military_factories()))
    }

    /// Sum of a reserve kind across all provinces.
    pub fn total_reserve(&self, kind: ResourceKind) -> u64 {
        self.provinces
            .iter()
            .map(|p| u64::from(p.reserves().get(kind)))
            .sum()
    }

    /// The delta the next tick's production phase will apply.
    pub fn daily_production(&self) -> ResourceDelta {
        daily_production(&self.economy.production, &self.provinces, self.refineries)
    }

    /// Queues a new construction task at the end of the queue.
    ///
    /// Fails without touching any state if `province` is out of range or the
    /// configured upfront cost for `kind` cannot be paid.
    pub fn start_construction(
        &mut self,
        kind: BuildKind,
        province: ProvinceIndex,
    ) -> Result<(), ConstructionError> {
        if province >= self.provinces.len() {
            return Err(ConstructionError::InvalidProvince {
                index: province,
                province_count: self.provinces.len(),
            });
        }

        if let Some(costs) = self.economy.construction.upfront_cost(kind) {
            self.stockpile
                .try_consume(costs)
                .map_err(|source| ConstructionError::InsufficientResources { kind, source })?;
        }

        let cost = self.economy.construction.costs.get(kind);
        self.queue.push(ConstructionTask::new(kind, province, cost));

        log::debug!(
            "{} started {} in {} ({:.1} BP)",
            self.name,
            kind,
            self.provinces[province].name(),
            cost
        );
        Ok(())
    }

    /// Advances this country by one day: production, then construction.
    #[instrument(skip_all, name = "simulate_day", fields(country = %self.name))]
    pub fn simulate_day(&mut self) -> DayReport {
        // Phase 1: production
        let production = self.daily_production();
        self.stockpile.add(&production);

        // Phase 2: construction
        let civilian_factories = self.total_civilian_factories();
        let completed = run_construction_tick(
            &mut self.queue,
            &mut self.provinces,
            &mut self.refineries,
            civilian_factories,
            &self.economy.construction,
        );

        for task in &completed {
            log::info!(
                "{}: {} finished in {}",
                self.name,
                task.kind(),
                self.provinces
                    .get(task.province())
                    .map_or("?", |p| p.name())
            );
        }

        DayReport {
            production,
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::StockpileError;
    use crate::systems::production::{FactoryOutput, ProductionModel};
    use crate::testing::CountryBuilder;
    use proptest::prelude::*;

    #[test]
    fn test_end_to_end_equal_split() {
        let mut country = CountryBuilder::new("Romania")
            .with_province(Province::new("Wallachia", 1800, 3, 0, 6))
            .build();
        country
            .start_construction(BuildKind::Infrastructure, 0)
            .unwrap();
        country
            .start_construction(BuildKind::CivilianFactory, 0)
            .unwrap();

        // 3 BP/day over two tasks: 1.5 each
        for day in 1..=3 {
            let report = country.simulate_day();
            assert!(report.completed.is_empty(), "day {}", day);
        }
        let report = country.simulate_day();
        assert_eq!(report.completed.len(), 1);
        assert_eq!(report.completed[0].kind(), BuildKind::Infrastructure);
        assert_eq!(country.provinces()[0].infrastructure(), 7);
        assert_eq!(country.queue().len(), 1);
        assert_eq!(country.queue().tasks()[0].remaining_bp(), 19.0);

        // Day 5: full 3 BP on the remaining task
        country.simulate_day();
        assert_eq!(country.queue().tasks()[0].remaining_bp(), 16.0);
        assert_eq!(country.provinces()[0].infrastructure(), 7);
    }

    #[test]
    fn test_invalid_province_rejected_without_mutation() {
        let mut country = CountryBuilder::new("Hungary")
            .with_province(Province::new("Alfold", 1400, 2, 2, 6))
            .with_stock(ResourceKind::Manpower, 45)
            .build();
        let before = country.clone();

        let err = country
            .start_construction(BuildKind::MilitaryFactory, 1)
            .unwrap_err();

        assert_eq!(
            err,
            ConstructionError::InvalidProvince {
                index: 1,
                province_count: 1
            }
        );
        assert_eq!(country, before);
    }

    #[test]
    fn test_refinery_increments_country_counter() {
        let mut country = CountryBuilder::new("Romania")
            .with_province(Province::new("Wallachia", 1800, 4, 0, 6))
            .build();
        country.start_construction(BuildKind::Refinery, 0).unwrap();

        // 20 BP at 4 BP/day
        for _ in 0..5 {
            country.simulate_day();
        }

        assert_eq!(country.refineries(), 1);
        assert!(country.queue().is_empty());
        // Next tick includes the refinery bonus
        assert_eq!(country.daily_production().get(ResourceKind::Fuel), 10);
    }

    #[test]
    fn test_idle_tick_only_changes_stockpile() {
        let mut country = CountryBuilder::new("Idle")
            .with_province(
                Province::new("Plains", 30_000, 0, 2, 4).with_reserves(
                    crate::province::ProvinceReserves {
                        oil: 2,
                        ..Default::default()
                    },
                ),
            )
            .build();
        let provinces_before = country.provinces().to_vec();

        let report = country.simulate_day();

        assert!(report.completed.is_empty());
        assert_eq!(country.provinces(), provinces_before.as_slice());
        assert!(country.queue().is_empty());
        assert_eq!(country.stockpile().get(ResourceKind::Fuel), 10);
        assert_eq!(country.stockpile().get(ResourceKind::Manpower), 3);
    }

    #[test]
    fn test_no_civilian_factories_no_progress() {
        let mut country = CountryBuilder::new("Stalled")
            .with_province(Province::new("A", 1000, 0, 3, 5))
            .build();
        country
            .start_construction(BuildKind::CivilianFactory, 0)
            .unwrap();

        for _ in 0..10 {
            country.simulate_day();
        }

        assert_eq!(country.queue().tasks()[0].remaining_bp(), 25.0);
    }

    #[test]
    fn test_new_factory_speeds_up_next_day() {
        let mut country = CountryBuilder::new("Growth")
            .with_province(Province::new("A", 1000, 5, 0, 5))
            .build();
        country
            .start_construction(BuildKind::CivilianFactory, 0)
            .unwrap();
        country
            .start_construction(BuildKind::Infrastructure, 0)
            .unwrap();

        // Infra finishes on day 2; the civ task then gets all 5 BP and finishes on day 6
        for _ in 0..6 {
            country.simulate_day();
        }
        assert_eq!(country.total_civilian_factories(), 6);
        assert!(country.queue().is_empty());

        country
            .start_construction(BuildKind::Infrastructure, 0)
            .unwrap();
        country.simulate_day();
        // 6 factories now: 5 BP task done in a single day
        assert!(country.queue().is_empty());
    }

    #[test]
    fn test_upfront_cost_consumed() {
        let mut economy = EconomyConfig::default();
        economy.construction.upfront_costs.insert(
            BuildKind::MilitaryFactory,
            ResourceDelta::new().with(ResourceKind::Steel, 10),
        );
        let mut country = CountryBuilder::new("Paying")
            .with_province(Province::new("A", 1000, 1, 0, 5))
            .with_stock(ResourceKind::Steel, 15)
            .economy(economy)
            .build();

        country
            .start_construction(BuildKind::MilitaryFactory, 0)
            .unwrap();
        assert_eq!(country.stockpile().get(ResourceKind::Steel), 5);

        let before = country.clone();
        let err = country
            .start_construction(BuildKind::MilitaryFactory, 0)
            .unwrap_err();
        assert_eq!(
            err,
            ConstructionError::InsufficientResources {
                kind: BuildKind::MilitaryFactory,
                source: StockpileError::Insufficient {
                    kind: ResourceKind::Steel,
                    required: 10,
                    available: 5
                }
            }
        );
        assert_eq!(country, before);

        // Kinds without an upfront cost are free
        country
            .start_construction(BuildKind::Infrastructure, 0)
            .unwrap();
        assert_eq!(country.queue().len(), 2);
    }

    #[test]
    fn test_with_economy_rejects_invalid_config() {
        let country = CountryBuilder::new("Romania")
            .with_province(Province::new("Wallachia", 1800, 1, 0, 6))
            .build();

        let mut economy = EconomyConfig::default();
        economy.construction.civ_output_per_day = f64::NAN;
        assert!(matches!(
            country.clone().with_economy(economy),
            Err(ConfigError::InvalidCivOutput(_))
        ));

        let mut economy = EconomyConfig::default();
        economy.construction.costs.civilian_factory = -5.0;
        assert_eq!(
            country.clone().with_economy(economy).unwrap_err(),
            ConfigError::InvalidBuildCost {
                kind: BuildKind::CivilianFactory,
                cost: -5.0
            }
        );

        // A rejected config leaves the default economy in charge: 25 BP at 1 BP/day
        let mut country = country;
        country
            .start_construction(BuildKind::CivilianFactory, 0)
            .unwrap();
        let report = country.simulate_day();
        assert!(report.completed.is_empty());
        assert_eq!(country.queue().tasks()[0].remaining_bp(), 24.0);
        assert_eq!(country.total_civilian_factories(), 1);
    }

    #[test]
    fn test_factory_output_model_through_ticks() {
        let economy = EconomyConfig {
            production: ProductionModel::FactoryOutput(FactoryOutput::default()),
            ..Default::default()
        };
        let mut country = CountryBuilder::new("Industrial")
            .with_province(Province::new("Banat", 20_000, 2, 1, 4))
            .economy(economy)
            .build();
        country
            .start_construction(BuildKind::Infrastructure, 0)
            .unwrap();

        // Infrastructure 4, multiplier 0.8: oil 2.5 × 0.8 = 2, steel 3 × 0.8 = 2.4,
        // manpower 2 × 0.8 = 1.6
        for _ in 0..3 {
            let report = country.simulate_day();
            assert_eq!(report.production.get(ResourceKind::Oil), 2);
            assert_eq!(report.production.get(ResourceKind::Steel), 2);
            assert_eq!(report.production.get(ResourceKind::Manpower), 2);
        }
        // 5 BP at 2 BP/day finished on day 3, after that day's production
        assert_eq!(country.provinces()[0].infrastructure(), 5);
        assert!(country.queue().is_empty());

        // Multiplier 0.85: steel 3 × 0.85 = 2.55 now rounds up
        let report = country.simulate_day();
        assert_eq!(report.production.get(ResourceKind::Oil), 2);
        assert_eq!(report.production.get(ResourceKind::Steel), 3);
        assert_eq!(report.production.get(ResourceKind::Manpower), 2);

        assert_eq!(country.stockpile().get(ResourceKind::Oil), 8);
        assert_eq!(country.stockpile().get(ResourceKind::Steel), 9);
        assert_eq!(country.stockpile().get(ResourceKind::Manpower), 8);
        assert_eq!(country.stockpile().get(ResourceKind::Fuel), 0);
    }

    #[test]
    fn test_totals() {
        let country = CountryBuilder::new("Romania")
            .with_province(Province::new("Wallachia", 1800, 3, 1, 6).with_reserves(
                crate::province::ProvinceReserves {
                    oil: 3,
                    steel: 1,
                    tungsten: 1,
                    chromium: 1,
                    aluminium: 10,
                },
            ))
            .with_province(Province::new("Moldavia", 1500, 2, 2, 5).with_reserves(
                crate::province::ProvinceReserves {
                    oil: 1,
                    steel: 6,
                    tungsten: 1,
                    chromium: 1,
                    aluminium: 1,
                },
            ))
            .build();

        assert_eq!(country.total_civilian_factories(), 5);
        assert_eq!(country.total_military_factories(), 3);
        assert_eq!(country.total_reserve(ResourceKind::Oil), 4);
        assert_eq!(country.total_reserve(ResourceKind::Steel), 7);
        assert_eq!(country.total_reserve(ResourceKind::Aluminium), 11);
        assert_eq!(country.daily_production().get(ResourceKind::Fuel), 20);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Start(BuildKind, usize),
        Tick,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..BuildKind::ALL.len(), 0..4usize).prop_map(|(k, p)| Op::Start(BuildKind::ALL[k], p)),
            Just(Op::Tick),
            Just(Op::Tick),
        ]
    }

    proptest! {
        #[test]
        fn prop_tick_sequences_keep_invariants(
            ops in proptest::collection::vec(op_strategy(), 1..80),
            civ in 0..6u32
        ) {
            let mut country = CountryBuilder::new("Prop")
                .with_province(Province::new("A", 5000, civ, 1, 3))
                .with_province(Province::new("B", 5000, 1, 0, 9))
                .build();
            let mut started = 0usize;
            let mut finished = 0usize;

            for op in ops {
                match op {
                    Op::Start(kind, province) => {
                        let accepted = country.start_construction(kind, province).is_ok();
                        prop_assert_eq!(accepted, province < 2);
                        if accepted {
                            started += 1;
                        }
                    }
                    Op::Tick => {
                        let report = country.simulate_day();
                        finished += report.completed.len();
                        for task in &report.completed {
                            prop_assert!(task.remaining_bp() <= 1e-4);
                        }
                    }
                }

                for (_, amount) in country.stockpile().iter() {
                    prop_assert!(amount >= 0);
                }
                for p in country.provinces() {
                    prop_assert!((0..=10).contains(&p.infrastructure()));
                }
                for task in country.queue() {
                    prop_assert!(task.remaining_bp() > 1e-4);
                    prop_assert!(task.remaining_bp() <= task.base_cost_bp());
                }
            }

            prop_assert_eq!(started, finished + country.queue().len());
        }
    }
}
