//! Domain entities for vessel identifier validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The identifier family a validation or batch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    /// International Maritime Organization ship or company number.
    Imo,
    /// Maritime Mobile Service Identity.
    Mmsi,
}

impl IdentifierKind {
    /// Display label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Imo => "IMO",
            Self::Mmsi => "MMSI",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of an IMO check-digit comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CheckDigit {
    /// Digit computed from the first six digits.
    pub calculated: u8,
    /// Seventh digit as supplied.
    pub actual: u8,
    /// Whether `calculated == actual`.
    pub valid: bool,
}

impl CheckDigit {
    /// Build a comparison record; `valid` is derived from the two digits.
    pub fn new(calculated: u8, actual: u8) -> Self {
        Self {
            calculated,
            actual,
            valid: calculated == actual,
        }
    }
}

/// Metadata collected while validating. Only the fields reached by the executed
/// branch are populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationInfo {
    /// Requested IMO number type or detected MMSI type label.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// IMO check-digit detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_digit: Option<CheckDigit>,
    /// Confirmation message when the IMO check digit matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_success: Option<String>,
    /// Rough construction era derived from the IMO number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_era: Option<String>,
    /// Maritime Identification Digits extracted from an MMSI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid: Option<String>,
    /// Country administering the MID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Usage contexts appropriate for the detected MMSI type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suitable_for: Option<Vec<String>>,
}

/// Result of validating a single vessel identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationResult {
    /// True iff no error was raised.
    pub valid: bool,
    /// Canonical form of the input.
    pub normalized: String,
    /// Failure descriptions, in the order they were raised.
    pub errors: Vec<String>,
    /// Advisory descriptions; never affect `valid`.
    pub warnings: Vec<String>,
    /// Branch-dependent metadata.
    pub info: ValidationInfo,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    /// Create a passing result with no findings.
    pub fn new() -> Self {
        Self {
            valid: true,
            normalized: String::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            info: ValidationInfo::default(),
        }
    }

    /// Record an error. Always clears `valid`.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    /// Record an advisory warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Whether any warning was raised.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
