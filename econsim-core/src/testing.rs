use crate::config::EconomyConfig;
use crate::country::Country;
use crate::province::Province;
use crate::resources::{ResourceDelta, ResourceKind, ResourceStockpile};

pub struct CountryBuilder {
    name: String,
    ideology: String,
    provinces: Vec<Province>,
    stockpile: ResourceStockpile,
    economy: EconomyConfig,
}

impl CountryBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ideology: "Neutral".to_string(),
            provinces: Vec::new(),
            stockpile: ResourceStockpile::new(),
            economy: EconomyConfig::default(),
        }
    }

    pub fn ideology(mut self, ideology: &str) -> Self {
        self.ideology = ideology.to_string();
        self
    }

    pub fn with_province(mut self, province: Province) -> Self {
        self.provinces.push(province);
        self
    }

    pub fn with_stock(mut self, kind: ResourceKind, amount: i64) -> Self {
        self.stockpile.add(&ResourceDelta::new().with(kind, amount));
        self
    }

    pub fn economy(mut self, economy: EconomyConfig) -> Self {
        self.economy = economy;
        self
    }

    /// Panics if the economy fails validation.
    pub fn build(self) -> Country {
        Country::new(self.name, self.ideology, self.provinces, self.stockpile)
            .with_economy(self.economy)
            .expect("CountryBuilder economy must be valid")
    }
}
