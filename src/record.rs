//! The assembled per-account comparison record and user overrides.

use serde::{Deserialize, Serialize};

use crate::{
    account::UtilityAccount,
    convert::parse_override,
    extract::DAYS_PER_YEAR,
    rates::{ComparisonRates, ExtractedRates, Extraction},
    raw::RawInvoiceRecord,
    savings::{self, SavingsBreakdown},
};

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Loading,
    Ready,
    Error(String),
}

/// A comparison-rate field addressable by the user-override setter.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RateField {
    Peak,
    OffPeak,
    Shoulder,
    Demand,
    DailySupply,
    MeteringDaily,
    MeteringAnnual,
    UnitRate,
}

/// One account's full comparison state. Created in `Loading`, finished in
/// `Ready` or `Error`, and mutated afterwards only through [`Self::set_rate`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ComparisonRecord {
    pub account: UtilityAccount,
    pub raw: Option<RawInvoiceRecord>,
    pub extracted: ExtractedRates,
    pub comparison: ComparisonRates,
    pub savings: SavingsBreakdown,
    pub status: RecordStatus,
}

impl ComparisonRecord {
    #[must_use]
    pub fn loading(account: UtilityAccount) -> Self {
        Self {
            account,
            raw: None,
            extracted: ExtractedRates::default(),
            comparison: ComparisonRates::default(),
            savings: SavingsBreakdown::default(),
            status: RecordStatus::Loading,
        }
    }

    #[must_use]
    pub fn ready(
        account: UtilityAccount,
        raw: Option<RawInvoiceRecord>,
        extraction: Extraction,
    ) -> Self {
        let savings = savings::compute(account.category, &extraction.extracted, &extraction.comparison);
        Self {
            account,
            raw,
            extracted: extraction.extracted,
            comparison: extraction.comparison,
            savings,
            status: RecordStatus::Ready,
        }
    }

    #[must_use]
    pub fn error(account: UtilityAccount, message: impl Into<String>) -> Self {
        Self { status: RecordStatus::Error(message.into()), ..Self::loading(account) }
    }

    /// Applies a user override to one comparison field and re-derives the
    /// savings breakdown.
    ///
    /// The raw string is parsed with the override policy: empty clears the
    /// field, unparseable input becomes zero. The metering daily and annual
    /// figures mirror each other; no other field is recomputed.
    pub fn set_rate(&mut self, field: RateField, raw: &str) {
        let value = parse_override(raw);
        match field {
            RateField::Peak => self.comparison.peak_rate = value,
            RateField::OffPeak => self.comparison.off_peak_rate = value,
            RateField::Shoulder => self.comparison.shoulder_rate = value,
            RateField::Demand => self.comparison.demand_rate = value,
            RateField::DailySupply => self.comparison.daily_supply = value,
            RateField::MeteringDaily => {
                self.comparison.metering_daily = value;
                self.comparison.metering_annual = value.map(|daily| daily * DAYS_PER_YEAR);
            }
            RateField::MeteringAnnual => {
                self.comparison.metering_annual = value;
                self.comparison.metering_daily = value.map(|annual| annual / DAYS_PER_YEAR);
            }
            RateField::UnitRate => self.comparison.unit_rate = value,
        }
        self.savings = savings::compute(self.account.category, &self.extracted, &self.comparison);
    }
}
