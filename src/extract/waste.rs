//! Waste adapter: a single service rate and a collection frequency.

use super::RateExtractor;
use crate::{
    catalog::Catalog,
    rates::{ComparisonRates, ExtractedRates, Extraction},
    raw::RawInvoiceRecord,
    resolve::{Candidate, resolve},
};

const RATE: &[Candidate] = &[
    Candidate::positive(&["waste_details", "full_data", "Service Rate"]),
    Candidate::positive(&["waste_details", "rate"]),
    Candidate::positive(&["waste_rate"]),
];

const FREQUENCY: &[Candidate] = &[
    Candidate::positive(&["waste_details", "full_data", "Collections per Month"]),
    Candidate::positive(&["waste_details", "frequency"]),
    Candidate::positive(&["waste_frequency"]),
];

pub struct Waste;

impl RateExtractor for Waste {
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
