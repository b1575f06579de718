//! Formatting contract for the document-generation consumer.
//!
//! Downstream templates expect every numeric field as a string with exactly
//! two decimals and the literal `"0"` for an absent value. This shape is a
//! boundary contract and must stay bit-for-bit stable.

use serde::Serialize;

use crate::record::ComparisonRecord;

/// Two decimals, `"0"` when the value was never resolved.
#[must_use]
pub fn format_rate(value: Option<f64>) -> String {
    value.map_or_else(|| "0".to_string(), |value| format!("{value:.2}"))
}

/// The derived fields handed to document generation, all pre-formatted.
#[derive(Debug, Serialize)]
pub struct DocumentFields {
    pub peak_rate: String,
    pub off_peak_rate: String,
    pub shoulder_rate: String,
    pub demand_rate: String,
    pub demand_quantity: String,
    pub daily_supply: String,
    pub metering_annual: String,
    pub unit_rate: String,
    pub estimated_annual_usage: String,
    pub proposed_peak_rate: String,
    pub proposed_off_peak_rate: String,
    pub proposed_daily_supply: String,
    pub proposed_unit_rate: String,
    pub total_annual_savings: String,
    pub total_annual_savings_percent: String,
    pub period_start: String,
}

impl From<&ComparisonRecord> for DocumentFields {
    fn from(record: &ComparisonRecord) -> Self {
        Self {
            peak_rate: format_rate(record.extracted.peak_rate),
            off_peak_rate: format_rate(record.extracted.off_peak_rate),
            shoulder_rate: format_rate(record.extracted.shoulder_rate),
            demand_rate: format_rate(record.extracted.demand_rate),
            demand_quantity: format_rate(record.extracted.demand_quantity),
            daily_supply: format_rate(record.extracted.daily_supply),
            metering_annual: format_rate(record.extracted.metering_annual),
            unit_rate: format_rate(record.extracted.unit_rate),
            estimated_annual_usage: format_rate(record.extracted.estimated_annual_usage),
            proposed_peak_rate: format_rate(record.comparison.peak_rate),
            proposed_off_peak_rate: format_rate(record.comparison.off_peak_rate),
            proposed_daily_supply: format_rate(record.comparison.daily_supply),
            proposed_unit_rate: format_rate(record.comparison.unit_rate),
            total_annual_savings: format_rate(record.savings.total_annual_savings),
            total_annual_savings_percent: format_rate(record.savings.total_annual_savings_percent),
            period_start: record.extracted.period_start.clone().unwrap_or_else(|| "0".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        account::{UtilityAccount, UtilityCategory},
        rates::{ComparisonRates, ExtractedRates, Extraction},
    };

    #[test]
    fn test_format_rate_two_decimals() {
        assert_eq!(format_rate(Some(24.5)), "24.50");
        assert_eq!(format_rate(Some(17.839)), "17.84");
    }

    #[test]
    fn test_format_rate_absent_is_zero_literal() {
        assert_eq!(format_rate(None), "0");
    }

    #[test]
    fn test_format_rate_parsed_zero_keeps_decimals() {
        // A legitimately parsed zero is a value, not an absence.
        assert_eq!(format_rate(Some(0.0)), "0.00");
    }

    #[test]
    fn test_document_fields() {
        let extraction = Extraction {
            extracted: ExtractedRates {
                peak_rate: Some(30.162),
                demand_quantity: Some(50.0),
                period_start: Some("2026-07-01".to_string()),
                ..ExtractedRates::default()
            },
            comparison: ComparisonRates::default(),
        };
        let record = ComparisonRecord::ready(
            UtilityAccount::new(UtilityCategory::ElectricityCi, "6001"),
            None,
            extraction,
        );
        let fields = DocumentFields::from(&record);
        assert_eq!(fields.peak_rate, "30.16");
        assert_eq!(fields.demand_quantity, "50.00");
        assert_eq!(fields.off_peak_rate, "0");
        assert_eq!(fields.period_start, "2026-07-01");
    }
}
