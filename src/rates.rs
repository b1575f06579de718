//! Canonical rate records: what the invoice says, and what we propose.

use serde::{Deserialize, Serialize};

/// Canonical numeric fields resolved from a raw invoice record.
///
/// Every field is optional: absence means "not found in the source", which is
/// distinct from a parsed zero and must never be defaulted away.
/// Electricity rates are in cents/kWh, gas rates in $/GJ, metering and
/// supply charges in dollars.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ExtractedRates {
    // Electricity tariffs.
    pub peak_rate: Option<f64>,
    pub off_peak_rate: Option<f64>,
    pub shoulder_rate: Option<f64>,
    pub monthly_usage: Option<f64>,
    pub peak_usage: Option<f64>,
    pub off_peak_usage: Option<f64>,
    pub shoulder_usage: Option<f64>,
    pub demand_rate: Option<f64>,
    pub demand_quantity: Option<f64>,

    // Fixed charges, shared across fuels.
    pub daily_supply: Option<f64>,
    pub metering_daily: Option<f64>,
    pub metering_annual: Option<f64>,

    // Single-rate categories (gas, oil, waste, cleaning).
    pub unit_rate: Option<f64>,
    pub usage_quantity: Option<f64>,

    // Derived for periodic gas billing.
    pub estimated_annual_usage: Option<f64>,
    pub supply_period_days: Option<f64>,

    /// Billing period start, passed through verbatim for document generation.
    pub period_start: Option<String>,
}

/// The proposed counterpart to each current-rate field. Seeded by the
/// extractor, then user-editable; edits never recompute other fields except
/// the paired metering daily↔annual mirroring.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ComparisonRates {
    pub peak_rate: Option<f64>,
    pub off_peak_rate: Option<f64>,
    pub shoulder_rate: Option<f64>,
    pub demand_rate: Option<f64>,
    pub daily_supply: Option<f64>,
    pub metering_daily: Option<f64>,
    pub metering_annual: Option<f64>,
    pub unit_rate: Option<f64>,
}

/// What a rate extractor hands back: the normalized current rates plus the
/// seeded proposal.
#[derive(Clone, Debug, Default)]
pub struct Extraction {
    pub extracted: ExtractedRates,
    pub comparison: ComparisonRates,
}
