//! IMO ship and company number validation.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::domain::{CheckDigit, ValidationResult};
use crate::error::VesselIdError;

const IMO_PREFIX: &str = "IMO";
const IMO_DIGITS: usize = 7;
const LOWEST_IMO: u32 = 1_000_000;
const OLDER_VESSEL_THRESHOLD: u32 = 6_000_000;

const SHIP_WEIGHTS: [u32; 6] = [7, 6, 5, 4, 3, 2];
const COMPANY_WEIGHTS: [u32; 6] = [8, 6, 4, 2, 9, 7];

// Exclusive upper bounds, ascending.
const ERA_BOUNDS: &[(u32, &str)] = &[
    (5_000_000, "Pre-1960s (historical)"),
    (6_000_000, "1960s-1980s"),
    (7_000_000, "1980s-1990s"),
    (8_000_000, "1990s-2000s"),
    (9_000_000, "2000s-2010s"),
    (9_500_000, "2010s-2020s"),
];
const LATEST_ERA: &str = "2020s-present";

/// Which IMO numbering scheme to check against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImoNumberType {
    /// Ship identification number.
    #[default]
    Ship,
    /// Registered owner / company identification number.
    Company,
    /// Not known; validated as a ship number.
    Auto,
}

impl ImoNumberType {
    /// Lowercase name as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ship => "ship",
            Self::Company => "company",
            Self::Auto => "auto",
        }
    }

    fn subject(self) -> &'static str {
        match self {
            Self::Company => "IMO company number",
            Self::Ship | Self::Auto => "IMO number",
        }
    }
}

impl fmt::Display for ImoNumberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImoNumberType {
    type Err = VesselIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ship" => Ok(Self::Ship),
            "company" => Ok(Self::Company),
            "auto" => Ok(Self::Auto),
            _ => Err(VesselIdError::InvalidOption {
                kind: "IMO number type",
                value: value.to_string(),
            }),
        }
    }
}

/// Options for [`validate_imo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImoOptions {
    /// Numbering scheme for the check digit.
    pub number_type: ImoNumberType,
    /// Together with `allow_without_prefix = false`, require the `IMO` prefix.
    pub strict_format: bool,
    /// Accept bare seven-digit numbers.
    pub allow_without_prefix: bool,
}

impl Default for ImoOptions {
    fn default() -> Self {
        Self {
            number_type: ImoNumberType::Ship,
            strict_format: false,
            allow_without_prefix: true,
        }
    }
}

/// Validate an IMO number such as `"IMO 9074729"` or `"9074729"`.
///
/// Spaces and hyphens are ignored and the prefix is case-insensitive. The
/// normalized form is always `IMO` followed by the digits.
pub fn validate_imo(input: &str, options: &ImoOptions) -> ValidationResult {
    let mut result = ValidationResult::new();

    let working: String = input
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();

    if working.is_empty() {
        result.fail("IMO number cannot be empty");
        return result;
    }

    let digits = match working.strip_prefix(IMO_PREFIX) {
        Some(rest) => rest,
        None if options.strict_format && !options.allow_without_prefix => {
            result.fail("IMO number must start with 'IMO' prefix");
            return result;
        }
        None => working.as_str(),
    };
    result.normalized = format!("{IMO_PREFIX}{digits}");

    let length = digits.chars().count();
    if length != IMO_DIGITS {
        result.fail(format!(
            "IMO number must have exactly 7 digits after 'IMO' prefix, got {length}"
        ));
        return result;
    }

    let number = match parse_digits(digits) {
        Some(number) => number,
        None => {
            result.fail("IMO number must contain only numeric digits after 'IMO' prefix");
            return result;
        }
    };

    if digits.starts_with('0') {
        result.fail("IMO number should not start with leading zeros");
        return result;
    }

    // Unreachable after the leading-zero check; kept as the range guard.
    if number < LOWEST_IMO {
        result.fail(format!(
            "IMO number {number} is below valid range (suspicious)"
        ));
        return result;
    }

    let number_type = match options.number_type {
        ImoNumberType::Auto => {
            result.info.kind = Some("ship (assumed)".to_string());
            ImoNumberType::Ship
        }
        requested => {
            result.info.kind = Some(requested.as_str().to_string());
            requested
        }
    };

    let (head, tail) = digits.split_at(IMO_DIGITS - 1);
    let calculated = match number_type {
        ImoNumberType::Company => company_check_digit(head),
        ImoNumberType::Ship | ImoNumberType::Auto => ship_check_digit(head),
    };
    let actual = tail.bytes().next().map(|byte| byte - b'0');
    if let (Some(calculated), Some(actual)) = (calculated, actual) {
        let check = CheckDigit::new(calculated, actual);
        result.info.check_digit = Some(check);
        let subject = number_type.subject();
        if check.valid {
            result.info.validation_success = Some(format!(
                "{subject} {} is valid (check digit verified)",
                result.normalized
            ));
        } else {
            result.fail(format!(
                "Invalid {subject}: check digit validation failed. \
                 Expected {calculated}, got {actual}"
            ));
        }
    }

    if number < OLDER_VESSEL_THRESHOLD {
        result.warn(format!(
            "IMO {number} appears to be from an older vessel (pre-1990s)"
        ));
    }

    result.info.estimated_era = Some(estimate_era(number).to_string());

    debug!(
        "validated {} as {}: valid={}",
        result.normalized, number_type, result.valid
    );
    result
}

/// Ship check digit: `(7d1 + 6d2 + 5d3 + 4d4 + 3d5 + 2d6) mod 10`.
///
/// Returns `None` unless given exactly six ASCII digits.
pub fn ship_check_digit(first_six: &str) -> Option<u8> {
    let total = weighted_sum(first_six, &SHIP_WEIGHTS)?;
    Some((total % 10) as u8)
}

/// Company check digit: `(11 - ((8d1 + 6d2 + 4d3 + 2d4 + 9d5 + 7d6) mod 11)) mod 10`.
///
/// Returns `None` unless given exactly six ASCII digits.
pub fn company_check_digit(first_six: &str) -> Option<u8> {
    let total = weighted_sum(first_six, &COMPANY_WEIGHTS)?;
    Some(((11 - total % 11) % 10) as u8)
}

/// Construction era suggested by where an IMO number falls in the allocation sequence.
pub fn estimate_era(number: u32) -> &'static str {
    ERA_BOUNDS
        .iter()
        .find(|(bound, _)| number < *bound)
        .map(|(_, era)| *era)
        .unwrap_or(LATEST_ERA)
}

fn weighted_sum(digits: &str, weights: &[u32; 6]) -> Option<u32> {
    if digits.len() != weights.len() {
        return None;
    }
    parse_digits(digits)?;
    Some(
        digits
            .bytes()
            .zip(weights)
            .map(|(byte, weight)| u32::from(byte - b'0') * weight)
            .sum(),
    )
}

fn parse_digits(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
