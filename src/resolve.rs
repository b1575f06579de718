//! Fallback-chain field lookup.
//!
//! The same semantic value (say, "gas usage quantity") arrives from the
//! provider under many historical key names depending on the vintage of the
//! source document. Each canonical field therefore declares an ordered list
//! of candidate paths, and this resolver returns the first one that parses —
//! the churn in provider naming stays out of the business logic.

use crate::{convert::parse_lenient_float, raw::RawInvoiceRecord};

/// Whether a parsed value counts as "found".
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ParsePolicy {
    /// The value must be finite and strictly positive.
    Positive,

    /// Zero is a legitimate parsed value; empty or unparseable input is
    /// still rejected.
    NonNegative,
}

impl ParsePolicy {
    const fn accepts(self, value: f64) -> bool {
        match self {
            Self::Positive => value > 0.0,
            Self::NonNegative => value >= 0.0,
        }
    }
}

/// One candidate location for a canonical field.
#[derive(Copy, Clone, Debug)]
pub struct Candidate {
    pub path: &'static [&'static str],
    pub policy: ParsePolicy,
}

impl Candidate {
    #[must_use]
    pub const fn positive(path: &'static [&'static str]) -> Self {
        Self { path, policy: ParsePolicy::Positive }
    }

    #[must_use]
    pub const fn non_negative(path: &'static [&'static str]) -> Self {
        Self { path, policy: ParsePolicy::NonNegative }
    }
}

/// Walks the candidates in order and returns the first present, parseable
/// value accepted by its policy. Candidate order is significant. Malformed
/// candidates are skipped silently; this never fails.
#[must_use]
pub fn resolve(record: &RawInvoiceRecord, candidates: &[Candidate]) -> Option<f64> {
    candidates.iter().find_map(|candidate| {
        let text = record.get_text(candidate.path)?;
        let value = parse_lenient_float(&text);
        (value.is_finite() && candidate.policy.accepts(value)).then_some(value)
    })
}

/// Resolves a raw text field (no numeric parsing), first candidate wins.
#[must_use]
pub fn resolve_text(record: &RawInvoiceRecord, paths: &[&'static [&'static str]]) -> Option<String> {
    paths.iter().find_map(|path| {
        let text = record.get_text(path)?;
        (!text.trim().is_empty()).then_some(text)
    })
}
