//! Batch validation over lists of identifiers.

use log::info;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{IdentifierKind, ValidationResult};
use crate::imo::{ImoOptions, validate_imo};
use crate::mmsi::{MmsiOptions, validate_mmsi};

/// One validated input in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BatchItem {
    /// The input exactly as supplied.
    pub input: String,
    /// Validation outcome for `input`.
    pub result: ValidationResult,
}

/// Tallies for a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BatchSummary {
    /// Number of inputs.
    pub total: usize,
    /// Inputs that validated.
    pub valid: usize,
    /// Inputs that did not.
    pub invalid: usize,
    /// `valid / total` as a percentage with one decimal (`"50.0%"`), or `"0%"`
    /// for an empty batch.
    pub success_rate: String,
}

impl BatchSummary {
    /// Summarize a list of results.
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a ValidationResult>) -> Self {
        let mut total = 0usize;
        let mut valid = 0usize;
        for result in results {
            total += 1;
            if result.valid {
                valid += 1;
            }
        }
        Self {
            total,
            valid,
            invalid: total - valid,
            success_rate: success_rate(valid, total),
        }
    }

    /// Whether every input validated. Empty batches count as clean.
    pub fn all_valid(&self) -> bool {
        self.invalid == 0
    }
}

/// Results of validating a list of identifiers, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BatchReport {
    /// Identifier family of every item.
    pub kind: IdentifierKind,
    /// Per-input outcomes.
    pub results: Vec<BatchItem>,
    /// Aggregate tallies.
    pub summary: BatchSummary,
}

/// Validate each input with `validator`, keeping input order.
pub fn validate_batch<I, S, F>(kind: IdentifierKind, items: I, validator: F) -> BatchReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> ValidationResult,
{
    let results: Vec<BatchItem> = items
        .into_iter()
        .map(|item| {
            let input = item.as_ref();
            BatchItem {
                input: input.to_string(),
                result: validator(input),
            }
        })
        .collect();
    let summary = BatchSummary::from_results(results.iter().map(|item| &item.result));
    info!(
        "{kind} batch: {} total, {} valid, {} invalid ({})",
        summary.total, summary.valid, summary.invalid, summary.success_rate
    );
    BatchReport {
        kind,
        results,
        summary,
    }
}

/// Validate a list of IMO numbers with shared options.
pub fn validate_imo_batch<I, S>(items: I, options: &ImoOptions) -> BatchReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    validate_batch(IdentifierKind::Imo, items, |input| validate_imo(input, options))
}

/// Validate a list of MMSIs with shared options.
pub fn validate_mmsi_batch<I, S>(items: I, options: &MmsiOptions) -> BatchReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    validate_batch(IdentifierKind::Mmsi, items, |input| validate_mmsi(input, options))
}

fn success_rate(valid: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    let percent = valid as f64 / total as f64 * 100.0;
    format!("{percent:.1}%")
}
