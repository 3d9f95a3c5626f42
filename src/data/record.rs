//! Trade Record Types
//! The ordered table of per-country trade values produced by the loader.

/// Raw currency units per billion.
pub const BILLION: f64 = 1e9;

/// One country row after continent filtering and numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub country: String,
    pub iso3: String,
    pub continent: String,
    pub trade_value: f64,
}

impl TradeRecord {
    pub fn new(country: &str, iso3: &str, continent: &str, trade_value: f64) -> Self {
        Self {
            country: country.to_string(),
            iso3: iso3.to_string(),
            continent: continent.to_string(),
            trade_value,
        }
    }

    /// Trade value scaled to billions for display.
    pub fn trade_value_billions(&self) -> f64 {
        self.trade_value / BILLION
    }
}

/// Records in source order. Every value is finite once the loader has built it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: Vec<TradeRecord>,
}

impl Table {
    pub fn new(records: Vec<TradeRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Trade values in table order.
    pub fn values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.trade_value).collect()
    }
}

impl From<Vec<TradeRecord>> for Table {
    fn from(records: Vec<TradeRecord>) -> Self {
        Self::new(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billions_scale_raw_value() {
        let record = TradeRecord::new("Norway", "NOR", "Europe", 2.5e10);
        assert!((record.trade_value_billions() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn values_keep_source_order() {
        let table = Table::from(vec![
            TradeRecord::new("A", "AAA", "Europe", 3.0),
            TradeRecord::new("B", "BBB", "Europe", 1.0),
            TradeRecord::new("C", "CCC", "Europe", 2.0),
        ]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.values(), vec![3.0, 1.0, 2.0]);
    }
}
