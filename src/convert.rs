//! Pure unit conversions and the two lenient parsing policies.

/// Megajoules to gigajoules.
#[must_use]
pub fn mj_to_gj(megajoules: f64) -> f64 {
    megajoules / 1000.0
}

/// Cents per megajoule to dollars per gigajoule (1 c/MJ = 10 $/GJ).
#[must_use]
pub fn cents_per_mj_to_dollars_per_gj(cents_per_mj: f64) -> f64 {
    cents_per_mj * 10.0
}

/// Parse a float out of a messy source string: currency symbols, thousands
/// separators, and surrounding whitespace are stripped. Returns [`f64::NAN`]
/// on empty or unparseable input.
#[must_use]
pub fn parse_lenient_float(raw: &str) -> f64 {
    let cleaned: String =
        raw.chars().filter(|char| char.is_ascii_digit() || *char == '.' || *char == '-').collect();
    cleaned.parse().unwrap_or(f64::NAN)
}

/// Source documents spell the billing-period start half a dozen ways;
/// normalize the recognized ones to ISO `YYYY-MM-DD` and pass anything else
/// through verbatim.
#[must_use]
pub fn normalize_period_start(raw: &str) -> String {
    const FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d %b %Y", "%d %B %Y"];
    let trimmed = raw.trim();
    for format in FORMATS {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, format) {
            return date.format("%Y-%m-%d").to_string();
        }
    }
    trimmed.to_string()
}

/// Extraction-side policy: anything unparseable resolves to `None`, never to
/// a silent zero.
#[must_use]
pub fn parse_extracted(raw: &str) -> Option<f64> {
    let value = parse_lenient_float(raw);
    value.is_finite().then_some(value)
}

/// User-override policy: an empty string clears the field, while a non-empty
/// but unparseable one falls back to zero. Intentionally different from
/// [`parse_extracted`].
#[must_use]
pub fn parse_override(raw: &str) -> Option<f64> {
    if raw.trim().is_empty() {
        return None;
    }
    let value = parse_lenient_float(raw);
    Some(if value.is_finite() { value } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_mj_to_gj() {
        assert_abs_diff_eq!(mj_to_gj(1000.0), 1.0);
    }

    #[test]
    fn test_cents_per_mj_to_dollars_per_gj() {
        assert_abs_diff_eq!(cents_per_mj_to_dollars_per_gj(1.0), 10.0);
    }

    #[test]
    fn test_parse_lenient_float_strips_currency() {
        assert_abs_diff_eq!(parse_lenient_float("$1,234.50 "), 1234.5);
    }

    #[test]
    fn test_parse_lenient_float_negative() {
        assert_abs_diff_eq!(parse_lenient_float("-12.5c"), -12.5);
    }

    #[test]
    fn test_parse_lenient_float_empty_is_nan() {
        assert!(parse_lenient_float("").is_nan());
        assert!(parse_lenient_float("n/a").is_nan());
    }

    #[test]
    fn test_parse_extracted_rejects_garbage() {
        assert_eq!(parse_extracted("no charge"), None);
        assert_eq!(parse_extracted("0"), Some(0.0));
    }

    #[test]
    fn test_parse_override_empty_clears() {
        assert_eq!(parse_override("   "), None);
    }

    #[test]
    fn test_parse_override_garbage_defaults_to_zero() {
        assert_eq!(parse_override("oops"), Some(0.0));
    }

    #[test]
    fn test_parse_override_parses() {
        assert_eq!(parse_override("$24.50"), Some(24.5));
    }

    #[test]
    fn test_normalize_period_start() {
        assert_eq!(normalize_period_start("01/07/2026"), "2026-07-01");
        assert_eq!(normalize_period_start(" 2026-07-01 "), "2026-07-01");
        assert_eq!(normalize_period_start("1 Jul 2026"), "2026-07-01");
        assert_eq!(normalize_period_start("Q3 2026"), "Q3 2026");
    }
}
