//! Catalog defaults for comparison-rate seeding.
//!
//! These constants encode business assumptions about the replacement
//! products on offer, not facts derived from an invoice. They live here as
//! one overridable configuration block rather than as literals inside the
//! extractors, and can be replaced wholesale from a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::prelude::*;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Catalog {
    /// Multiplier applied to a present current rate to seed its proposal
    /// ("5% better than current").
    pub better_factor: f64,

    pub electricity: ElectricityCatalog,
    pub gas: GasCatalog,
}

/// Placeholder electricity rates used when no current value exists, in
/// cents/kWh except where noted.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ElectricityCatalog {
    pub peak_rate: f64,
    pub off_peak_rate: f64,
    pub shoulder_rate: f64,

    /// Dollars per day.
    pub daily_supply: f64,

    /// Dollars per kVA per month.
    pub demand_rate: f64,

    /// Flat-fee metering replacement product, dollars per year. Seeded
    /// unconditionally, regardless of the current metering charge.
    pub metering_annual: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct GasCatalog {
    /// Dollars per GJ.
    pub rate: f64,

    /// Dollars per day.
    pub daily_supply: f64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            better_factor: 0.95,
            electricity: ElectricityCatalog::default(),
            gas: GasCatalog::default(),
        }
    }
}

impl Default for ElectricityCatalog {
    fn default() -> Self {
        Self {
            peak_rate: 24.50,
            off_peak_rate: 18.00,
            shoulder_rate: 20.00,
            daily_supply: 1.50,
            demand_rate: 12.00,
            metering_annual: 700.00,
        }
    }
}

impl Default for GasCatalog {
    fn default() -> Self {
        Self { rate: 17.8, daily_supply: 1.20 }
    }
}

impl Catalog {
    /// Seeds a proposed rate from the current one: 5% better when present
    /// and positive, otherwise the supplied catalog placeholder.
    #[must_use]
    pub fn better_or(&self, current: Option<f64>, placeholder: Option<f64>) -> Option<f64> {
        match current {
            Some(value) if value > 0.0 => Some(value * self.better_factor),
            _ => placeholder,
        }
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read the catalog file `{}`", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse the catalog file `{}`", path.display()))
    }
}
