//! C&I gas adapter.
//!
//! C&I gas records are the oldest shape the provider emits and have the
//! widest spread of historical key names, so the fallback chains here are
//! long. When the rate itself is missing but both the energy cost and the
//! quantity survive, the rate is derived as cost over quantity.

use super::RateExtractor;
use crate::{
    catalog::Catalog,
    convert::normalize_period_start,
    rates::{ComparisonRates, ExtractedRates, Extraction},
    raw::RawInvoiceRecord,
    resolve::{Candidate, resolve, resolve_text},
};

const USAGE_GJ: &[Candidate] = &[
    Candidate::positive(&["gas_details", "full_data", "Energy Charge Quantity in GJ"]),
    Candidate::positive(&["gas_details", "full_data", "Energy Charge Quantity"]),
    Candidate::positive(&["gas_details", "full_data", "Gas Usage"]),
    Candidate::positive(&["gas_details", "full_data", "Total Consumption GJ"]),
    Candidate::positive(&["gas_usage_gj"]),
    Candidate::positive(&["energy_quantity_gj"]),
    Candidate::positive(&["gas_usage"]),
];

const RATE: &[Candidate] = &[
    Candidate::positive(&["gas_details", "full_data", "Energy Charge Rate"]),
    Candidate::positive(&["gas_details", "full_data", "Energy Charge Rate in GJ"]),
    Candidate::positive(&["gas_details", "full_data", "Gas Rate"]),
    Candidate::positive(&["gas_details", "full_data", "Commodity Rate"]),
    Candidate::positive(&["gas_rate_gj"]),
    Candidate::positive(&["energy_rate_gj"]),
    Candidate::positive(&["gas_rate"]),
];

const COST: &[Candidate] = &[
    Candidate::positive(&["gas_details", "full_data", "Energy Charge Cost"]),
    Candidate::positive(&["gas_details", "full_data", "Gas Cost"]),
    Candidate::positive(&["gas_cost"]),
];

const DAILY_SUPPLY: &[Candidate] = &[
    Candidate::positive(&["gas_details", "full_data", "Daily Supply Charge"]),
    Candidate::positive(&["gas_details", "full_data", "Supply Charge"]),
    Candidate::positive(&["gas_daily_supply"]),
    Candidate::positive(&["supply_charge"]),
];

const PERIOD_START: &[&[&str]] =
    &[&["gas_details", "full_data", "Period Start Date"], &["period_start"]];

pub struct GasCi;

impl RateExtractor for GasCi {
    fn extract(&self, record: &RawInvoiceRecord, catalog: &Catalog) -> Extraction {
        let usage_quantity = resolve(record, USAGE_GJ);
        let unit_rate = resolve(record, RATE).or_else(|| {
            let cost = resolve(record, COST)?;
            usage_quantity.map(|quantity| cost / quantity)
        });

        let extracted = ExtractedRates {
            unit_rate,
            usage_quantity,
            daily_supply: resolve(record, DAILY_SUPPLY),
            period_start: resolve_text(record, PERIOD_START).as_deref().map(normalize_period_start),
            ..ExtractedRates::default()
        };

        let comparison = ComparisonRates {
            // C&I gas is always quoted against the catalog product, not
            // against a discount on the invoiced rate. Asymmetric with SME
            // gas on purpose.
            unit_rate: Some(catalog.gas.rate),
            daily_supply: catalog.better_or(extracted.daily_supply, Some(catalog.gas.daily_supply)),
            ..ComparisonRates::default()
        };

        Extraction { extracted, comparison }
    }
}
