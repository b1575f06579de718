//! Savings math: current rates vs the proposal, per component and in total.
//!
//! Pure and always re-derivable from its two inputs. A component is only
//! populated when its current rate, comparison rate, and (where applicable)
//! usage are all present and positive; anything else stays `None` so the
//! presentation layer renders "not available" instead of implying a savings
//! claim of zero.

use serde::{Deserialize, Serialize};

use crate::{
    account::UtilityCategory,
    extract::DAYS_PER_YEAR,
    rates::{ComparisonRates, ExtractedRates},
};

/// Billing-cadence assumption for categories whose invoices carry no period
/// information: one invoice per month. Kept as a named constant per category
/// family so it can be revisited without touching the electricity/gas math.
pub const MONTHLY_BILLING_PERIODS: f64 = 12.0;

/// Share of total monthly usage attributed to each electricity tariff when
/// the invoice does not break usage down explicitly. An estimate, not a
/// measurement.
const ESTIMATED_PEAK_SHARE: f64 = 0.4;
const ESTIMATED_OFF_PEAK_SHARE: f64 = 0.3;
const ESTIMATED_SHOULDER_SHARE: f64 = 0.3;

/// Per-component dollar deltas and the aggregate, annualized figures.
/// Monthly where named so, annual otherwise.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct SavingsBreakdown {
    pub peak_savings: Option<f64>,
    pub off_peak_savings: Option<f64>,
    pub shoulder_savings: Option<f64>,

    /// Combined monthly usage savings across tariffs.
    pub usage_savings: Option<f64>,
    pub usage_savings_annual: Option<f64>,

    pub metering_savings: Option<f64>,
    pub supply_savings: Option<f64>,
    pub demand_savings: Option<f64>,

    pub total_annual_savings: Option<f64>,
    pub total_annual_savings_percent: Option<f64>,
}

#[must_use]
pub fn compute(
    category: UtilityCategory,
    extracted: &ExtractedRates,
    comparison: &ComparisonRates,
) -> SavingsBreakdown {
    match category {
        UtilityCategory::ElectricityCi | UtilityCategory::ElectricitySme => {
            compute_electricity(extracted, comparison)
        }
        UtilityCategory::GasCi | UtilityCategory::GasSme => compute_gas(extracted, comparison),
        UtilityCategory::Oil | UtilityCategory::Waste | UtilityCategory::Cleaning => {
            compute_flat(extracted, comparison)
        }
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|value| *value > 0.0)
}

/// Monthly savings for one electricity tariff; rates are in cents/kWh.
fn tariff_savings(
    current: Option<f64>,
    comparison: Option<f64>,
    quantity: Option<f64>,
) -> Option<f64> {
    let current = positive(current)?;
    let comparison = positive(comparison)?;
    let quantity = positive(quantity)?;
    Some(quantity * (current - comparison) / 100.0)
}

fn compute_electricity(
    extracted: &ExtractedRates,
    comparison: &ComparisonRates,
) -> SavingsBreakdown {
    // Explicit per-tariff quantities win; otherwise apportion the monthly
    // total by the estimated shares.
    let monthly_usage = positive(extracted.monthly_usage);
    let peak_quantity = extracted
        .peak_usage
        .or_else(|| monthly_usage.map(|usage| usage * ESTIMATED_PEAK_SHARE));
    let off_peak_quantity = extracted
        .off_peak_usage
        .or_else(|| monthly_usage.map(|usage| usage * ESTIMATED_OFF_PEAK_SHARE));
    let shoulder_quantity = extracted
        .shoulder_usage
        .or_else(|| monthly_usage.map(|usage| usage * ESTIMATED_SHOULDER_SHARE));

    let peak_savings = tariff_savings(extracted.peak_rate, comparison.peak_rate, peak_quantity);
    let off_peak_savings =
        tariff_savings(extracted.off_peak_rate, comparison.off_peak_rate, off_peak_quantity);
    let shoulder_savings =
        tariff_savings(extracted.shoulder_rate, comparison.shoulder_rate, shoulder_quantity);

    let usage_savings = sum_present(&[peak_savings, off_peak_savings, shoulder_savings]);

    let metering_savings = match (positive(extracted.metering_annual), positive(comparison.metering_annual))
    {
        (Some(current), Some(proposed)) => Some(current - proposed),
        _ => None,
    };

    let supply_savings = match (positive(extracted.daily_supply), positive(comparison.daily_supply))
    {
        (Some(current), Some(proposed)) => Some((current - proposed) * DAYS_PER_YEAR),
        _ => None,
    };

    // Demand is billed monthly against the metered kVA.
    let demand_savings = match (
        positive(extracted.demand_rate),
        positive(comparison.demand_rate),
        positive(extracted.demand_quantity),
    ) {
        (Some(current), Some(proposed), Some(quantity)) => {
            Some((current - proposed) * quantity * MONTHLY_BILLING_PERIODS)
        }
        _ => None,
    };

    let total_annual_savings = sum_present(&[
        usage_savings.map(|savings| savings * MONTHLY_BILLING_PERIODS),
        metering_savings,
        supply_savings,
        demand_savings,
    ]);

    // Current-side annual cost of exactly the components that produced a
    // savings figure, for the percentage denominator.
    let current_usage_cost = sum_present(&[
        peak_savings
            .and(extracted.peak_rate.zip(peak_quantity))
            .map(|(rate, quantity)| quantity * rate / 100.0),
        off_peak_savings
            .and(extracted.off_peak_rate.zip(off_peak_quantity))
            .map(|(rate, quantity)| quantity * rate / 100.0),
        shoulder_savings
            .and(extracted.shoulder_rate.zip(shoulder_quantity))
            .map(|(rate, quantity)| quantity * rate / 100.0),
    ]);
    let current_annual_cost = sum_present(&[
        current_usage_cost.map(|cost| cost * MONTHLY_BILLING_PERIODS),
        metering_savings.and(extracted.metering_annual),
        supply_savings.and(extracted.daily_supply).map(|daily| daily * DAYS_PER_YEAR),
        demand_savings
            .and(extracted.demand_rate.zip(extracted.demand_quantity))
            .map(|(rate, quantity)| rate * quantity * MONTHLY_BILLING_PERIODS),
    ]);

    SavingsBreakdown {
        peak_savings,
        off_peak_savings,
        shoulder_savings,
        usage_savings,
        usage_savings_annual: usage_savings.map(|savings| savings * MONTHLY_BILLING_PERIODS),
        metering_savings,
        supply_savings,
        demand_savings,
        total_annual_savings,
        total_annual_savings_percent: percent_of(total_annual_savings, current_annual_cost),
    }
}

fn compute_gas(extracted: &ExtractedRates, comparison: &ComparisonRates) -> SavingsBreakdown {
    let usage_savings = match (
        positive(extracted.unit_rate),
        positive(comparison.unit_rate),
        positive(extracted.usage_quantity),
    ) {
        (Some(current), Some(proposed), Some(quantity)) => {
            Some(quantity * current - quantity * proposed)
        }
        _ => None,
    };

    let supply_savings = match (positive(extracted.daily_supply), positive(comparison.daily_supply))
    {
        (Some(current), Some(proposed)) => Some((current - proposed) * DAYS_PER_YEAR),
        _ => None,
    };

    let total_annual_savings = sum_present(&[
        usage_savings.map(|savings| savings * MONTHLY_BILLING_PERIODS),
        supply_savings,
    ]);

    let current_annual_cost = sum_present(&[
        usage_savings
            .and(extracted.unit_rate.zip(extracted.usage_quantity))
            .map(|(rate, quantity)| rate * quantity * MONTHLY_BILLING_PERIODS),
        supply_savings.and(extracted.daily_supply).map(|daily| daily * DAYS_PER_YEAR),
    ]);

    SavingsBreakdown {
        usage_savings,
        usage_savings_annual: usage_savings.map(|savings| savings * MONTHLY_BILLING_PERIODS),
        supply_savings,
        total_annual_savings,
        total_annual_savings_percent: percent_of(total_annual_savings, current_annual_cost),
        ..SavingsBreakdown::default()
    }
}

/// Oil, waste, and cleaning: one rate, one quantity, assumed monthly billing.
fn compute_flat(extracted: &ExtractedRates, comparison: &ComparisonRates) -> SavingsBreakdown {
    let (current, proposed, quantity) = match (
        positive(extracted.unit_rate),
        positive(comparison.unit_rate),
        positive(extracted.usage_quantity),
    ) {
        (Some(current), Some(proposed), Some(quantity)) => (current, proposed, quantity),
        _ => return SavingsBreakdown::default(),
    };

    let current_cost = quantity * current;
    let usage_savings = current_cost - quantity * proposed;
    let annual = usage_savings * MONTHLY_BILLING_PERIODS;

    SavingsBreakdown {
        usage_savings: Some(usage_savings),
        usage_savings_annual: Some(annual),
        total_annual_savings: Some(annual),
        total_annual_savings_percent: percent_of(Some(annual), Some(current_cost * MONTHLY_BILLING_PERIODS)),
        ..SavingsBreakdown::default()
    }
}

/// Sums the present components; `None` when none are present.
fn sum_present(components: &[Option<f64>]) -> Option<f64> {
    components.iter().flatten().copied().fold(None, |total, value| Some(total.unwrap_or(0.0) + value))
}

/// Savings as a percentage of the current cost, guarded against a zero
/// denominator (a zero-cost baseline yields 0%, never NaN or infinity).
fn percent_of(savings: Option<f64>, current_cost: Option<f64>) -> Option<f64> {
    let savings = savings?;
    let current_cost = current_cost.unwrap_or(0.0);
    if current_cost == 0.0 { Some(0.0) } else { Some(savings / current_cost * 100.0) }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_electricity_peak_worked_example() {
        let extracted = ExtractedRates {
            peak_rate: Some(30.0),
            peak_usage: Some(1000.0),
            ..ExtractedRates::default()
        };
        let comparison = ComparisonRates { peak_rate: Some(24.0), ..ComparisonRates::default() };
        let savings = compute(UtilityCategory::ElectricityCi, &extracted, &comparison);
        assert_abs_diff_eq!(savings.peak_savings.unwrap(), 60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(savings.usage_savings.unwrap(), 60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(savings.usage_savings_annual.unwrap(), 720.0, epsilon = 1e-9);
        assert_abs_diff_eq!(savings.total_annual_savings.unwrap(), 720.0, epsilon = 1e-9);
    }

    #[test]
    fn test_electricity_apportions_usage_when_no_breakdown() {
        let extracted = ExtractedRates {
            peak_rate: Some(30.0),
            off_peak_rate: Some(20.0),
            monthly_usage: Some(1000.0),
            ..ExtractedRates::default()
        };
        let comparison = ComparisonRates {
            peak_rate: Some(20.0),
            off_peak_rate: Some(10.0),
            ..ComparisonRates::default()
        };
        let savings = compute(UtilityCategory::ElectricitySme, &extracted, &comparison);
        // Peak: 400 kWh × 10c = 40 $; off-peak: 300 kWh × 10c = 30 $.
        assert_abs_diff_eq!(savings.peak_savings.unwrap(), 40.0, epsilon = 1e-9);
        assert_abs_diff_eq!(savings.off_peak_savings.unwrap(), 30.0, epsilon = 1e-9);
        assert_eq!(savings.shoulder_savings, None);
    }

    #[test]
    fn test_electricity_negative_metering_savings_expected() {
        // Current metering cheaper than the fixed-fee proposal: the savings
        // figure is negative, by design.
        let extracted =
            ExtractedRates { metering_annual: Some(400.0), ..ExtractedRates::default() };
        let comparison =
            ComparisonRates { metering_annual: Some(700.0), ..ComparisonRates::default() };
        let savings = compute(UtilityCategory::ElectricityCi, &extracted, &comparison);
        assert_abs_diff_eq!(savings.metering_savings.unwrap(), -300.0, epsilon = 1e-9);
        assert_abs_diff_eq!(savings.total_annual_savings.unwrap(), -300.0, epsilon = 1e-9);
        assert_abs_diff_eq!(savings.total_annual_savings_percent.unwrap(), -75.0, epsilon = 1e-9);
    }

    #[test]
    fn test_electricity_demand_component() {
        let extracted = ExtractedRates {
            demand_rate: Some(14.0),
            demand_quantity: Some(50.0),
            ..ExtractedRates::default()
        };
        let comparison = ComparisonRates { demand_rate: Some(12.0), ..ComparisonRates::default() };
        let savings = compute(UtilityCategory::ElectricityCi, &extracted, &comparison);
        // (14 − 12) × 50 kVA × 12 months.
        assert_abs_diff_eq!(savings.demand_savings.unwrap(), 1200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_electricity_supply_component() {
        let extracted = ExtractedRates { daily_supply: Some(2.0), ..ExtractedRates::default() };
        let comparison = ComparisonRates { daily_supply: Some(1.5), ..ComparisonRates::default() };
        let savings = compute(UtilityCategory::ElectricityCi, &extracted, &comparison);
        assert_abs_diff_eq!(savings.supply_savings.unwrap(), 182.5, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_usage_omits_component() {
        let extracted = ExtractedRates { peak_rate: Some(30.0), ..ExtractedRates::default() };
        let comparison = ComparisonRates { peak_rate: Some(24.0), ..ComparisonRates::default() };
        let savings = compute(UtilityCategory::ElectricityCi, &extracted, &comparison);
        assert_eq!(savings.peak_savings, None);
        assert_eq!(savings.total_annual_savings, None);
        assert_eq!(savings.total_annual_savings_percent, None);
    }

    #[test]
    fn test_gas_savings() {
        let extracted = ExtractedRates {
            unit_rate: Some(20.0),
            usage_quantity: Some(50.0),
            daily_supply: Some(1.5),
            ..ExtractedRates::default()
        };
        let comparison = ComparisonRates {
            unit_rate: Some(17.8),
            daily_supply: Some(1.2),
            ..ComparisonRates::default()
        };
        let savings = compute(UtilityCategory::GasCi, &extracted, &comparison);
        // Usage: 50 GJ × (20 − 17.8) = 110 $/month.
        assert_abs_diff_eq!(savings.usage_savings.unwrap(), 110.0, epsilon = 1e-9);
        assert_abs_diff_eq!(savings.supply_savings.unwrap(), 109.5, epsilon = 1e-9);
        assert_abs_diff_eq!(savings.total_annual_savings.unwrap(), 1429.5, epsilon = 1e-9);
    }

    #[test]
    fn test_flat_category_fixed_annualization() {
        let extracted = ExtractedRates {
            unit_rate: Some(2.0),
            usage_quantity: Some(300.0),
            ..ExtractedRates::default()
        };
        let comparison = ComparisonRates { unit_rate: Some(1.9), ..ComparisonRates::default() };
        let savings = compute(UtilityCategory::Oil, &extracted, &comparison);
        assert_abs_diff_eq!(savings.usage_savings.unwrap(), 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(savings.total_annual_savings.unwrap(), 360.0, epsilon = 1e-9);
        assert_abs_diff_eq!(savings.total_annual_savings_percent.unwrap(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_flat_category_without_comparison_is_empty() {
        let extracted = ExtractedRates {
            unit_rate: Some(2.0),
            usage_quantity: Some(300.0),
            ..ExtractedRates::default()
        };
        let savings = compute(UtilityCategory::Waste, &extracted, &ComparisonRates::default());
        assert_eq!(savings, SavingsBreakdown::default());
    }

    #[test]
    fn test_percent_guards_zero_denominator() {
        assert_eq!(percent_of(Some(100.0), Some(0.0)), Some(0.0));
        assert_eq!(percent_of(Some(100.0), None), Some(0.0));
        assert_eq!(percent_of(None, Some(10.0)), None);
    }
}
