//! Cleaning adapter: a single service rate and a visit frequency.

use super::RateExtractor;
use crate::{
    catalog::Catalog,
    rates::{ComparisonRates, ExtractedRates, Extraction},
    raw::RawInvoiceRecord,
    resolve::{Candidate, resolve},
};

const RATE: &[Candidate] = &[
    Candidate::positive(&["cleaning_details", "full_data", "Cleaning Rate"]),
    Candidate::positive(&["cleaning_details", "rate"]),
    Candidate::positive(&["cleaning_rate"]),
];

const FREQUENCY: &[Candidate] = &[
    Candidate::positive(&["cleaning_details", "full_data", "Cleans per Month"]),
    Candidate::positive(&["cleaning_details", "frequency"]),
    Candidate::positive(&["cleaning_frequency"]),
];

pub struct Cleaning;

impl RateExtractor for Cleaning {
    fn extract(&self, record: &RawInvoiceRecord, catalog: &Catalog) -> Extraction {
        let extracted = ExtractedRates {
            unit_rate: resolve(record, RATE),
            usage_quantity: resolve(record, FREQUENCY),
            ..ExtractedRates::default()
        };
        let comparison = ComparisonRates {
            unit_rate: catalog.better_or(extracted.unit_rate, None),
            ..ComparisonRates::default()
        };
        Extraction { extracted, comparison }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_extracts_from_flat_key() {
        let record =
            RawInvoiceRecord::from(json!({"cleaning_rate": "120.0", "cleaning_frequency": "2"}));
        let extraction = Cleaning.extract(&record, &Catalog::default());
        assert_abs_diff_eq!(extraction.extracted.unit_rate.unwrap(), 120.0);
        assert_abs_diff_eq!(extraction.extracted.usage_quantity.unwrap(), 2.0);
        assert_abs_diff_eq!(extraction.comparison.unit_rate.unwrap(), 114.0);
    }
}
