//! Electricity adapter, shared by the C&I and SME categories.

use super::{DAYS_PER_YEAR, RateExtractor};
use crate::{
    catalog::Catalog,
    convert::normalize_period_start,
    rates::{ComparisonRates, ExtractedRates, Extraction},
    raw::RawInvoiceRecord,
    resolve::{Candidate, resolve, resolve_text},
};

const PEAK_RATE: &[Candidate] = &[
    Candidate::positive(&["electricity_details", "full_data", "Peak Rate"]),
    Candidate::positive(&["electricity_details", "full_data", "Peak Energy Rate"]),
    Candidate::positive(&["peak_rate"]),
    Candidate::positive(&["peakRate"]),
];

const OFF_PEAK_RATE: &[Candidate] = &[
    Candidate::positive(&["electricity_details", "full_data", "Off Peak Rate"]),
    Candidate::positive(&["electricity_details", "full_data", "Off-Peak Energy Rate"]),
    Candidate::positive(&["off_peak_rate"]),
    Candidate::positive(&["offPeakRate"]),
];

// Shoulder is genuinely absent on two-rate tariffs, so a zero here means
// "no shoulder tariff" and is not a value.
const SHOULDER_RATE: &[Candidate] = &[
    Candidate::positive(&["electricity_details", "full_data", "Shoulder Rate"]),
    Candidate::positive(&["shoulder_rate"]),
    Candidate::positive(&["shoulderRate"]),
];

const MONTHLY_USAGE: &[Candidate] = &[
    Candidate::positive(&["electricity_details", "full_data", "Total Usage kWh"]),
    Candidate::positive(&["electricity_details", "full_data", "Total Usage"]),
    Candidate::positive(&["monthly_usage"]),
    Candidate::positive(&["usage_kwh"]),
];

const PEAK_USAGE: &[Candidate] = &[
    Candidate::positive(&["electricity_details", "full_data", "Peak Usage kWh"]),
    Candidate::positive(&["peak_usage"]),
];

const OFF_PEAK_USAGE: &[Candidate] = &[
    Candidate::positive(&["electricity_details", "full_data", "Off Peak Usage kWh"]),
    Candidate::positive(&["off_peak_usage"]),
];

const SHOULDER_USAGE: &[Candidate] = &[
    Candidate::positive(&["electricity_details", "full_data", "Shoulder Usage kWh"]),
    Candidate::positive(&["shoulder_usage"]),
];

// A metered demand of zero kVA is a real reading on a demand tariff.
const DEMAND_QUANTITY: &[Candidate] = &[
    Candidate::non_negative(&["electricity_details", "full_data", "Demand Quantity"]),
    Candidate::non_negative(&["electricity_details", "full_data", "Demand kVA"]),
    Candidate::non_negative(&["demand_quantity"]),
    Candidate::non_negative(&["demand_kva"]),
];

const DEMAND_RATE: &[Candidate] = &[
    Candidate::positive(&["electricity_details", "full_data", "Demand Rate"]),
    Candidate::positive(&["electricity_details", "full_data", "Demand Charge"]),
    Candidate::positive(&["electricity_details", "full_data", "Capacity Charge Rate"]),
    Candidate::positive(&["demand_rate"]),
    Candidate::positive(&["demandRate"]),
];

const DAILY_SUPPLY: &[Candidate] = &[
    Candidate::positive(&["electricity_details", "full_data", "Daily Supply Charge"]),
    Candidate::positive(&["electricity_details", "full_data", "Supply Charge"]),
    Candidate::positive(&["daily_supply_charge"]),
    Candidate::positive(&["supply_charge"]),
];

const METER_RATE: &[Candidate] = &[
    Candidate::positive(&["electricity_details", "full_data", "Meter Charge Rate"]),
    Candidate::positive(&["electricity_details", "full_data", "Metering Charge"]),
    Candidate::positive(&["meter_rate"]),
];

const VALUE_ADDED_SERVICE_RATE: &[Candidate] = &[
    Candidate::positive(&["electricity_details", "full_data", "Value Added Service Rate"]),
    Candidate::positive(&["electricity_details", "full_data", "VAS Rate"]),
    Candidate::positive(&["value_added_service_rate"]),
];

const PERIOD_START: &[&[&str]] = &[
    &["electricity_details", "full_data", "Period Start Date"],
    &["period_start"],
    &["invoice_period_start"],
];

pub struct Electricity;

impl RateExtractor for Electricity {
    fn extract(&self, record: &RawInvoiceRecord, catalog: &Catalog) -> Extraction {
        let meter_rate = resolve(record, METER_RATE);
        let value_added_service_rate = resolve(record, VALUE_ADDED_SERVICE_RATE);

        // The invoice splits metering into the meter charge proper and a
        // value-added service component; the canonical figure is their sum.
        let metering_daily = match (meter_rate, value_added_service_rate) {
            (None, None) => None,
            (meter, service) => Some(meter.unwrap_or(0.0) + service.unwrap_or(0.0)),
        };

        let extracted = ExtractedRates {
            peak_rate: resolve(record, PEAK_RATE),
            off_peak_rate: resolve(record, OFF_PEAK_RATE),
            shoulder_rate: resolve(record, SHOULDER_RATE),
            monthly_usage: resolve(record, MONTHLY_USAGE),
            peak_usage: resolve(record, PEAK_USAGE),
            off_peak_usage: resolve(record, OFF_PEAK_USAGE),
            shoulder_usage: resolve(record, SHOULDER_USAGE),
            demand_rate: resolve(record, DEMAND_RATE),
            demand_quantity: resolve(record, DEMAND_QUANTITY),
            daily_supply: resolve(record, DAILY_SUPPLY),
            metering_daily,
            metering_annual: metering_daily.map(|daily| daily * DAYS_PER_YEAR),
            period_start: resolve_text(record, PERIOD_START).as_deref().map(normalize_period_start),
            ..ExtractedRates::default()
        };

        let electricity = &catalog.electricity;
        let comparison = ComparisonRates {
            peak_rate: catalog.better_or(extracted.peak_rate, Some(electricity.peak_rate)),
            off_peak_rate: catalog
                .better_or(extracted.off_peak_rate, Some(electricity.off_peak_rate)),
            shoulder_rate: catalog
                .better_or(extracted.shoulder_rate, Some(electricity.shoulder_rate)),
            demand_rate: catalog.better_or(extracted.demand_rate, Some(electricity.demand_rate)),
            daily_supply: catalog.better_or(extracted.daily_supply, Some(electricity.daily_supply)),
            // The metering proposal is a flat-fee replacement product, not a
            // discount on the current charge, so the target is fixed even
            // when the current figure is lower.
            metering_annual: Some(electricity.metering_annual),
            metering_daily: Some(electricity.metering_annual / DAYS_PER_YEAR),
            unit_rate: None,
        };

        Extraction { extracted, comparison }
    }
}
