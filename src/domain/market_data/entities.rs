pub use super::value_objects::{ChangeRate, MarketCap, Price, Symbol};
use serde::{Deserialize, Serialize};

/// Sector label applied when the feed leaves the sector blank.
pub const FALLBACK_SECTOR: &str = "Other Sectors";
/// Instrument label applied when the feed leaves the name blank.
pub const FALLBACK_NAME: &str = "Unnamed";

/// Domain entity - one flat record per instrument, as delivered by the
/// data-fetch collaborator. Field aliases accept the upstream feed's names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    #[serde(default, alias = "sectorName")]
    pub sector_name: Option<String>,
    #[serde(default, alias = "nodeName")]
    pub node_name: Option<String>,
    #[serde(default, alias = "mktcap", alias = "marketCap")]
    pub market_cap: f64,
    #[serde(default, alias = "fluc_rate", alias = "changeRate")]
    pub change_rate: f64,
    #[serde(default, alias = "cur_price", alias = "currentPrice")]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub symbol: Option<String>,
}

impl MarketRecord {
    pub fn new(sector: &str, name: &str, market_cap: f64, change_rate: f64) -> Self {
        Self {
            sector_name: Some(sector.to_string()),
            node_name: Some(name.to_string()),
            market_cap,
            change_rate,
            current_price: None,
            symbol: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.current_price = Some(price);
        self
    }

    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }

    /// Sector grouping key, falling back to the fixed label for blank sectors.
    pub fn sector_label(&self) -> &str {
        match self.sector_name.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => FALLBACK_SECTOR,
        }
    }

    /// Instrument display name, falling back to the fixed label.
    pub fn display_name(&self) -> &str {
        match self.node_name.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => FALLBACK_NAME,
        }
    }

    pub fn market_cap(&self) -> MarketCap {
        MarketCap::from(self.market_cap)
    }

    pub fn change_rate(&self) -> ChangeRate {
        ChangeRate::from(self.change_rate)
    }
}
