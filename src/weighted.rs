//! Quantity-weighted average across tariff blocks or product lines.

/// Returns `Σ(quantity·rate) / Σ(quantity)`, or `None` when the total
/// quantity is zero (including the empty case).
#[must_use]
pub fn weighted_average(pairs: &[(f64, f64)]) -> Option<f64> {
    let total_quantity: f64 = pairs.iter().map(|(quantity, _)| quantity).sum();
    if total_quantity == 0.0 {
        return None;
    }
    let weighted_sum: f64 = pairs.iter().map(|(quantity, rate)| quantity * rate).sum();
    Some(weighted_sum / total_quantity)
}
