use crate::country::Country;
use serde::{Deserialize, Serialize};

/// Days elapsed since the start of the simulation.
pub type Day = u64;

/// All simulated countries, ticked independently in list order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub day: Day,
    pub countries: Vec<Country>,
}

impl WorldState {
    pub fn new(countries: Vec<Country>) -> Self {
        Self { day: 0, countries }
    }

    pub fn country(&self, name: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.name() == name)
    }

    pub fn country_mut(&mut self, name: &str) -> Option<&mut Country> {
        self.countries.iter_mut().find(|c| c.name() == name)
    }

    /// Compute a deterministic checksum of the world state.
    ///
    /// Identical states produce identical checksums. Used to verify that
    /// repeated runs of the same scenario do not diverge.
    pub fn checksum(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();

        self.day.hash(&mut hasher);

        // Countries in tick order
        for c in &self.countries {
            c.name().hash(&mut hasher);
            c.refineries().hash(&mut hasher);
            for (kind, amount) in c.stockpile().iter() {
                kind.hash(&mut hasher);
                amount.hash(&mut hasher);
            }
            for p in c.provinces() {
                p.name().hash(&mut hasher);
                p.population().hash(&mut hasher);
                p.civilian_factories().hash(&mut hasher);
                p.military_factories().hash(&mut hasher);
                p.infrastructure().hash(&mut hasher);
            }
            for t in c.queue() {
                t.kind().hash(&mut hasher);
                t.province().hash(&mut hasher);
                t.remaining_bp().to_bits().hash(&mut hasher);
            }
        }

        hasher.finish()
    }
}
