//! Built-in indicator catalog.
//!
//! The table is a `static`, so every consumer shares the same definitions by
//! reference and ids stay stable across redraws and requests.

use super::types::{Frequency, IndicatorDefinition, Rgb};

/// Ordered, read-only mapping from indicator id to definition.
#[derive(Debug)]
pub struct IndicatorRegistry {
    entries: &'static [IndicatorDefinition],
}

pub static INDICATORS: IndicatorRegistry = IndicatorRegistry {
    entries: &[
        IndicatorDefinition {
            id: "GDP",
            series_key: "GDP",
            title: "Gross Domestic Product",
            description: "Total value of goods and services produced",
            unit: "Billions of Dollars",
            color: Rgb(0x19, 0x76, 0xd2),
            frequency: Frequency::Quarterly,
        },
        IndicatorDefinition {
            id: "UNEMPLOYMENT",
            series_key: "UNRATE",
            title: "Unemployment Rate",
            description: "Percentage of labor force unemployed",
            unit: "Percent",
            color: Rgb(0xd3, 0x2f, 0x2f),
            frequency: Frequency::Monthly,
        },
        IndicatorDefinition {
            id: "INFLATION",
            series_key: "CPIAUCSL",
            title: "Consumer Price Index (Inflation)",
            description: "Measure of average change in prices over time",
            unit: "Index 1982-1984=100",
            color: Rgb(0xf5, 0x7c, 0x00),
            frequency: Frequency::Monthly,
        },
        IndicatorDefinition {
            id: "FED_RATE",
            series_key: "FEDFUNDS",
            title: "Federal Funds Rate",
            description: "Interest rate for overnight lending between banks",
            unit: "Percent",
            color: Rgb(0x38, 0x8e, 0x3c),
            frequency: Frequency::Monthly,
        },
        IndicatorDefinition {
            id: "SP500",
            series_key: "SP500",
            title: "S&P 500",
            description: "Stock market index of 500 largest U.S. companies",
            unit: "Index",
            color: Rgb(0x7b, 0x1f, 0xa2),
            frequency: Frequency::Daily,
        },
    ],
};

impl IndicatorRegistry {
    /// Look up an indicator by id (ASCII case-insensitive).
    pub fn get(&self, id: &str) -> Option<&'static IndicatorDefinition> {
        self.entries.iter().find(|d| d.id.eq_ignore_ascii_case(id))
    }

    /// Position of `id` in registry order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|d| d.id.eq_ignore_ascii_case(id))
    }

    pub fn at(&self, index: usize) -> Option<&'static IndicatorDefinition> {
        self.entries.get(index)
    }

    /// The indicator shown when nothing has been selected yet.
    pub fn first(&self) -> &'static IndicatorDefinition {
        &self.entries[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'static, IndicatorDefinition> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.entries.iter().map(|d| d.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
