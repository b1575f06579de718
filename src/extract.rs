//! Per-category invoice adapters.
//!
//! Each adapter normalizes one utility category's raw record into
//! [`ExtractedRates`] and seeds the proposed [`ComparisonRates`]. An adapter
//! never fails: fields it cannot resolve stay `None`.

mod cleaning;
mod electricity;
mod gas_ci;
mod gas_sme;
mod oil;
mod waste;

use std::collections::HashMap;

use crate::{account::UtilityCategory, catalog::Catalog, rates::Extraction, raw::RawInvoiceRecord};

pub const DAYS_PER_YEAR: f64 = 365.0;

pub trait RateExtractor: Send + Sync {
    fn extract(&self, record: &RawInvoiceRecord, catalog: &Catalog) -> Extraction;
}

/// Runtime registry of adapters by category. A category with no registered
/// adapter is reported as unsupported by the orchestrator, without a fetch.
pub struct Extractors(HashMap<UtilityCategory, Box<dyn RateExtractor>>);

impl Default for Extractors {
    fn default() -> Self {
        let mut registry: HashMap<UtilityCategory, Box<dyn RateExtractor>> = HashMap::new();
        registry.insert(UtilityCategory::ElectricityCi, Box::new(electricity::Electricity));
        registry.insert(UtilityCategory::ElectricitySme, Box::new(electricity::Electricity));
        registry.insert(UtilityCategory::GasCi, Box::new(gas_ci::GasCi));
        registry.insert(UtilityCategory::GasSme, Box::new(gas_sme::GasSme));
        registry.insert(UtilityCategory::Oil, Box::new(oil::Oil));
        registry.insert(UtilityCategory::Waste, Box::new(waste::Waste));
        registry.insert(UtilityCategory::Cleaning, Box::new(cleaning::Cleaning));
        Self(registry)
    }
}

impl Extractors {
    /// An empty registry, for callers that register their own adapters.
    #[must_use]
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    pub fn register(&mut self, category: UtilityCategory, extractor: Box<dyn RateExtractor>) {
        self.0.insert(category, extractor);
    }

    #[must_use]
    pub fn get(&self, category: UtilityCategory) -> Option<&dyn RateExtractor> {
        self.0.get(&category).map(Box::as_ref)
    }
}
