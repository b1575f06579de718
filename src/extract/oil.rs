//! Oil adapter: up to two product lines averaged by delivered quantity.

use super::RateExtractor;
use crate::{
    catalog::Catalog,
    rates::{ComparisonRates, ExtractedRates, Extraction},
    raw::RawInvoiceRecord,
    resolve::{Candidate, resolve},
    weighted::weighted_average,
};

const QUANTITY_1: &[Candidate] = &[
    Candidate::positive(&["oil_details", "quantity_1"]),
    Candidate::positive(&["oil_details", "full_data", "Product 1 Quantity"]),
];
const RATE_1: &[Candidate] = &[
    Candidate::positive(&["oil_details", "rate_1"]),
    Candidate::positive(&["oil_details", "full_data", "Product 1 Rate"]),
];
const QUANTITY_2: &[Candidate] = &[
    Candidate::positive(&["oil_details", "quantity_2"]),
    Candidate::positive(&["oil_details", "full_data", "Product 2 Quantity"]),
];

// Compatibility shim: upstream labels the second product's rate `rate_3`.
// Almost certainly a naming defect in the source schema; keep the mapping
// here and nowhere else so a schema fix only touches this constant.
const RATE_2: &[Candidate] = &[
    Candidate::positive(&["oil_details", "rate_3"]),
    Candidate::positive(&["oil_details", "full_data", "Product 2 Rate"]),
];

pub struct Oil;

impl RateExtractor for Oil {
    fn extract(&self, record: &RawInvoiceRecord, catalog: &Catalog) -> Extraction {
        let mut products = Vec::with_capacity(2);
        if let (Some(quantity), Some(rate)) = (resolve(record, QUANTITY_1), resolve(record, RATE_1))
        {
            products.push((quantity, rate));
        }
        if let (Some(quantity), Some(rate)) = (resolve(record, QUANTITY_2), resolve(record, RATE_2))
        {
            products.push((quantity, rate));
        }

        let extracted = ExtractedRates {
            unit_rate: weighted_average(&products),
            usage_quantity: (!products.is_empty())
                .then(|| products.iter().map(|(quantity, _)| quantity).sum()),
            ..ExtractedRates::default()
        };

        // No catalog product for oil: without a current rate there is
        // nothing to propose.
        let comparison = ComparisonRates {
            unit_rate: catalog.better_or(extracted.unit_rate, None),
            ..ComparisonRates::default()
        };

        Extraction { extracted, comparison }
    }
}
