//! SME gas adapter: block tariffs billed in MJ over an explicit supply period.

use super::{DAYS_PER_YEAR, RateExtractor};
use crate::{
    catalog::Catalog,
    convert::{cents_per_mj_to_dollars_per_gj, mj_to_gj, normalize_period_start},
    rates::{ComparisonRates, ExtractedRates, Extraction},
    raw::RawInvoiceRecord,
    resolve::{Candidate, resolve, resolve_text},
};

const USAGE_MJ: &[Candidate] = &[
    Candidate::positive(&["gas_sme_details", "usage_mj"]),
    Candidate::positive(&["gas_sme_details", "full_data", "Gas Usage MJ"]),
    Candidate::positive(&["gas_sme_details", "full_data", "Total Usage MJ"]),
];

const BLOCK_1_CONSUMPTION: &[Candidate] =
    &[Candidate::positive(&["gas_sme_details", "tariff_blocks", "block_1", "consumption"])];
const BLOCK_1_RATE: &[Candidate] =
    &[Candidate::positive(&["gas_sme_details", "tariff_blocks", "block_1", "rate"])];
const BLOCK_2_CONSUMPTION: &[Candidate] =
    &[Candidate::positive(&["gas_sme_details", "tariff_blocks", "block_2", "consumption"])];
const BLOCK_2_RATE: &[Candidate] =
    &[Candidate::positive(&["gas_sme_details", "tariff_blocks", "block_2", "rate"])];

const SUPPLY_CHARGE_RATE: &[Candidate] = &[
    Candidate::positive(&["gas_sme_details", "supply_charge", "rate"]),
    Candidate::positive(&["gas_sme_details", "full_data", "Supply Charge"]),
];

const SUPPLY_PERIOD_DAYS: &[Candidate] = &[
    Candidate::positive(&["gas_sme_details", "supply_charge", "period_days"]),
    Candidate::positive(&["gas_sme_details", "full_data", "Supply Charge Days"]),
];

const PERIOD_START: &[&[&str]] =
    &[&["gas_sme_details", "full_data", "Period Start Date"], &["period_start"]];

pub struct GasSme;

impl RateExtractor for GasSme {
    fn extract(&self, record: &RawInvoiceRecord, catalog: &Catalog) -> Extraction {
        let usage_quantity = resolve(record, USAGE_MJ).map(mj_to_gj);

        // Up to two tariff blocks, averaged by consumption. Block rates are
        // in cents/MJ; convert after averaging.
        let mut blocks = Vec::with_capacity(2);
        if let (Some(consumption), Some(rate)) =
            (resolve(record, BLOCK_1_CONSUMPTION), resolve(record, BLOCK_1_RATE))
        {
            blocks.push((consumption, rate));
        }
        if let (Some(consumption), Some(rate)) =
            (resolve(record, BLOCK_2_CONSUMPTION), resolve(record, BLOCK_2_RATE))
        {
            blocks.push((consumption, rate));
        }
        let unit_rate =
            crate::weighted::weighted_average(&blocks).map(cents_per_mj_to_dollars_per_gj);

        let supply_rate = resolve(record, SUPPLY_CHARGE_RATE);
        let supply_period_days = resolve(record, SUPPLY_PERIOD_DAYS);
        let daily_supply = match (supply_rate, supply_period_days) {
            (Some(rate), Some(days)) => Some(rate / days),
            // Older records carry the daily figure directly.
            (Some(rate), None) => Some(rate),
            (None, _) => None,
        };

        let estimated_annual_usage = match (usage_quantity, supply_period_days) {
            (Some(usage), Some(days)) => Some(usage / days * DAYS_PER_YEAR),
            _ => None,
        };

        let extracted = ExtractedRates {
            unit_rate,
            usage_quantity,
            daily_supply,
            supply_period_days,
            estimated_annual_usage,
            period_start: resolve_text(record, PERIOD_START).as_deref().map(normalize_period_start),
            ..ExtractedRates::default()
        };

        let comparison = ComparisonRates {
            unit_rate: catalog.better_or(extracted.unit_rate, Some(catalog.gas.rate)),
            daily_supply: catalog.better_or(extracted.daily_supply, Some(catalog.gas.daily_supply)),
            ..ComparisonRates::default()
        };

        Extraction { extracted, comparison }
    }
}
