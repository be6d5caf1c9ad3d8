//! MMSI classification and validation.
//!
//! An MMSI is nine digits. Its leading digits select the station type, and the
//! type decides where the three Maritime Identification Digits sit.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::domain::ValidationResult;
use crate::error::VesselIdError;
use crate::mid::{UNKNOWN_COUNTRY, country_for_mid, mid_in_range};

const MMSI_DIGITS: usize = 9;
const MID_DIGITS: usize = 3;

const ASCENDING_RUNS: [&str; 3] = ["123456789", "012345678", "234567890"];
const DESCENDING_RUNS: [&str; 2] = ["987654321", "876543210"];

/// Station type detected from the MMSI prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MmsiType {
    /// `2`-`7` followed by the MID.
    ShipStation,
    /// `00` + MID.
    CoastStation,
    /// `0` + MID.
    GroupStation,
    /// `8` + MID.
    Handheld,
    /// `111` + MID.
    SarAircraft,
    /// `99` + MID.
    Aton,
    /// `970`.
    AisSart,
    /// `98` + MID.
    CraftAssociatedWithShip,
    /// No rule matched.
    Unknown,
}

impl MmsiType {
    /// Snake-case label used in results.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShipStation => "ship_station",
            Self::CoastStation => "coast_station",
            Self::GroupStation => "group_station",
            Self::Handheld => "handheld",
            Self::SarAircraft => "sar_aircraft",
            Self::Aton => "aton",
            Self::AisSart => "ais_sart",
            Self::CraftAssociatedWithShip => "craft_associated_with_ship",
            Self::Unknown => "unknown",
        }
    }

    /// Character offset of the MID, for types that carry one.
    pub fn mid_offset(self) -> Option<usize> {
        match self {
            Self::ShipStation => Some(0),
            Self::GroupStation | Self::Handheld => Some(1),
            Self::CoastStation | Self::Aton | Self::CraftAssociatedWithShip => Some(2),
            Self::SarAircraft => Some(3),
            Self::AisSart | Self::Unknown => None,
        }
    }

    /// Operational contexts an MMSI of this type is suited to.
    pub fn usage_contexts(self) -> &'static [&'static str] {
        match self {
            Self::ShipStation => &["vhf_communication", "ais_transmission", "dsc_calling"],
            Self::CoastStation => &["shore_based_communication", "traffic_management"],
            Self::GroupStation => &["fleet_operations", "group_calling"],
            Self::Handheld => &["personal_vhf", "portable_equipment"],
            Self::SarAircraft => &["search_and_rescue", "emergency_response"],
            Self::Aton => &["navigation_aids", "buoy_identification"],
            Self::AisSart => &["emergency_beacon", "distress_signal"],
            Self::CraftAssociatedWithShip => &["tender_operations", "pilot_boats"],
            Self::Unknown => &["general_maritime_use"],
        }
    }
}

impl fmt::Display for MmsiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Station type a caller expects, or `Auto` to accept whatever is detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestedMmsiType {
    /// Ship station.
    Ship,
    /// Coast station.
    Coast,
    /// Group call.
    Group,
    /// Handheld VHF.
    Handheld,
    /// Search and rescue aircraft.
    Sar,
    /// Aid to navigation.
    Aton,
    /// No expectation.
    #[default]
    Auto,
}

impl RequestedMmsiType {
    /// Lowercase name as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ship => "ship",
            Self::Coast => "coast",
            Self::Group => "group",
            Self::Handheld => "handheld",
            Self::Sar => "sar",
            Self::Aton => "aton",
            Self::Auto => "auto",
        }
    }

    /// Detected type that satisfies this request; `None` for `Auto`.
    ///
    /// The mismatch warning compares this mapped type, not the raw request
    /// name, so `ship` against a `ship_station` MMSI does not warn.
    pub fn expected(self) -> Option<MmsiType> {
        match self {
            Self::Ship => Some(MmsiType::ShipStation),
            Self::Coast => Some(MmsiType::CoastStation),
            Self::Group => Some(MmsiType::GroupStation),
            Self::Handheld => Some(MmsiType::Handheld),
            Self::Sar => Some(MmsiType::SarAircraft),
            Self::Aton => Some(MmsiType::Aton),
            Self::Auto => None,
        }
    }
}

impl fmt::Display for RequestedMmsiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestedMmsiType {
    type Err = VesselIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ship" => Ok(Self::Ship),
            "coast" => Ok(Self::Coast),
            "group" => Ok(Self::Group),
            "handheld" => Ok(Self::Handheld),
            "sar" => Ok(Self::Sar),
            "aton" => Ok(Self::Aton),
            "auto" => Ok(Self::Auto),
            _ => Err(VesselIdError::InvalidOption {
                kind: "MMSI type",
                value: value.to_string(),
            }),
        }
    }
}

/// Options for [`validate_mmsi`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MmsiOptions {
    /// Expected station type; a mismatch only warns.
    pub mmsi_type: RequestedMmsiType,
    /// Expected flag country; a mismatch only warns.
    pub expected_country: Option<String>,
    /// Accepted for parity with [`ImoOptions`](crate::ImoOptions). MMSI input is
    /// always held to the strict nine-digit form.
    pub strict_format: bool,
}

/// Classify an MMSI by its prefix. The first matching rule wins.
pub fn detect_mmsi_type(mmsi: &str) -> MmsiType {
    if mmsi.starts_with("00") {
        MmsiType::CoastStation
    } else if mmsi.starts_with("111") {
        MmsiType::SarAircraft
    } else if mmsi.starts_with("99") {
        MmsiType::Aton
    } else if mmsi.starts_with("98") {
        MmsiType::CraftAssociatedWithShip
    } else if mmsi.starts_with("970") {
        MmsiType::AisSart
    } else if mmsi.starts_with('8') {
        MmsiType::Handheld
    } else if mmsi.starts_with('0') {
        MmsiType::GroupStation
    } else if mmsi.starts_with(['2', '3', '4', '5', '6', '7']) {
        MmsiType::ShipStation
    } else {
        MmsiType::Unknown
    }
}

/// Slice the MID out of an MMSI of the given type.
pub fn extract_mid(mmsi: &str, mmsi_type: MmsiType) -> Option<&str> {
    let offset = mmsi_type.mid_offset()?;
    mmsi.get(offset..offset + MID_DIGITS)
}

/// Validate a nine-digit MMSI.
pub fn validate_mmsi(input: &str, options: &MmsiOptions) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mmsi = input.trim();
    result.normalized = mmsi.to_string();

    if mmsi.is_empty() {
        result.fail("MMSI cannot be empty");
        return result;
    }

    let length = mmsi.chars().count();
    if length != MMSI_DIGITS {
        result.fail(format!("MMSI must be exactly 9 digits, got {length}"));
        return result;
    }

    if !mmsi.bytes().all(|byte| byte.is_ascii_digit()) {
        result.fail("MMSI must contain only numeric digits");
        return result;
    }

    let detected = detect_mmsi_type(mmsi);
    result.info.kind = Some(detected.as_str().to_string());

    if options
        .mmsi_type
        .expected()
        .is_some_and(|expected| expected != detected)
    {
        result.warn(format!(
            "Expected MMSI type '{}', but detected '{detected}'",
            options.mmsi_type
        ));
    }

    if let Some(mid) = extract_mid(mmsi, detected) {
        check_mid(mid, detected, options.expected_country.as_deref(), &mut result);
    }

    apply_type_rules(mmsi, detected, &mut result);
    check_suspicious_patterns(mmsi, &mut result);

    debug!(
        "validated MMSI {mmsi} as {detected}: valid={}",
        result.valid
    );
    result
}

fn check_mid(
    mid: &str,
    detected: MmsiType,
    expected_country: Option<&str>,
    result: &mut ValidationResult,
) {
    result.info.mid = Some(mid.to_string());

    let in_range = mid.parse::<u16>().map(mid_in_range).unwrap_or(false);
    if !in_range {
        result.fail(format!("Invalid MID code: {mid}. Must be between 201-775"));
        return;
    }

    let country = country_for_mid(mid);
    result.info.country = Some(country.to_string());
    result.info.suitable_for = Some(
        detected
            .usage_contexts()
            .iter()
            .map(|context| context.to_string())
            .collect(),
    );

    let mismatch = expected_country.filter(|expected| {
        !expected.is_empty() && country != *expected && country != UNKNOWN_COUNTRY
    });
    if let Some(expected) = mismatch {
        result.warn(format!(
            "MID {mid} corresponds to {country}, expected {expected}"
        ));
    }
}

/// Prefix rules per station type. Most restate the classification rule so that
/// the two stay aligned if classification changes.
fn apply_type_rules(mmsi: &str, mmsi_type: MmsiType, result: &mut ValidationResult) {
    let Some(first) = mmsi.chars().next() else {
        return;
    };

    match mmsi_type {
        MmsiType::ShipStation => {
            if matches!(first, '0' | '1' | '8' | '9') {
                result.fail("Ship station MMSI cannot start with 0, 1, 8, or 9");
            }
            if !('2'..='7').contains(&first) {
                result.fail("Ship station MMSI must start with digit 2-7");
            }
            if !mmsi.ends_with("000") {
                result.warn(
                    "Ship MMSI does not end in 000. \
                     May not be valid for international voyages or Inmarsat",
                );
            }
        }
        MmsiType::CoastStation => {
            if !mmsi.starts_with("00") {
                result.fail("Coast station MMSI must start with 00");
            }
        }
        MmsiType::GroupStation => {
            if !mmsi.starts_with('0') || mmsi.starts_with("00") {
                result.fail("Group station MMSI must start with single 0");
            }
        }
        MmsiType::Handheld => {
            if !mmsi.starts_with('8') {
                result.fail("Handheld MMSI must start with 8");
            }
        }
        MmsiType::SarAircraft => {
            if !mmsi.starts_with("111") {
                result.fail("SAR aircraft MMSI must start with 111");
            }
        }
        MmsiType::Aton => {
            if !mmsi.starts_with("99") {
                result.fail("AIS AtoN MMSI must start with 99");
            }
        }
        MmsiType::Unknown => {
            if first == '1' {
                result.fail(format!(
                    "Invalid MMSI format: MMSI starting with '1' must be SAR aircraft \
                     (111XXXXXX). Ship stations must start with 2-7, not {first}"
                ));
            } else {
                result.fail(
                    "Unknown MMSI type. Valid formats: Ship (2-7XX), Coast (00XX), \
                     Group (0XX), Handheld (8XX), SAR (111XX), AtoN (99XX), \
                     SART (970XX), Craft (98XX)",
                );
            }
        }
        MmsiType::AisSart | MmsiType::CraftAssociatedWithShip => {}
    }
}

fn check_suspicious_patterns(mmsi: &str, result: &mut ValidationResult) {
    let repeated = mmsi
        .chars()
        .next()
        .filter(|first| mmsi.chars().all(|digit| digit == *first));
    if let Some(digit) = repeated {
        result.warn(format!(
            "MMSI contains suspicious pattern (all same digits: {digit})"
        ));
    }

    if ASCENDING_RUNS.contains(&mmsi) {
        result.warn("MMSI contains suspicious sequential ascending pattern");
    }

    if DESCENDING_RUNS.contains(&mmsi) {
        result.warn("MMSI contains suspicious sequential descending pattern");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto(input: &str) -> ValidationResult {
        validate_mmsi(input, &MmsiOptions::default())
    }

    fn kind(result: &ValidationResult) -> &str {
        result.info.kind.as_deref().unwrap_or_default()
    }

    #[test]
    fn ship_stations_resolve_country() {
        let cases = [
            ("366123000", "366", "United States of America"),
            ("232123000", "232", "United Kingdom"),
            ("316123000", "316", "Canada"),
            ("351234000", "351", "Panama"),
            ("636123000", "636", "Liberia"),
            ("563123000", "563", "Singapore"),
        ];
        for (input, mid, country) in cases {
            let result = auto(input);
            assert!(result.valid, "{input}: {:?}", result.errors);
            assert_eq!(kind(&result), "ship_station");
            assert_eq!(result.info.mid.as_deref(), Some(mid));
            assert_eq!(result.info.country.as_deref(), Some(country));
            assert!(result.warnings.is_empty(), "{input}: {:?}", result.warnings);
        }
    }

    #[test]
    fn ship_station_records_usage_contexts() {
        let result = auto("366123000");
        assert_eq!(
            result.info.suitable_for,
            Some(vec![
                "vhf_communication".to_string(),
                "ais_transmission".to_string(),
                "dsc_calling".to_string(),
            ])
        );
    }

    #[test]
    fn ship_station_not_ending_in_000_warns() {
        let result = auto("366123456");
        assert!(result.valid);
        assert_eq!(kind(&result), "ship_station");
        assert!(result.warnings[0].contains("not end in 000"));
    }

    #[test]
    fn other_station_types() {
        let cases = [
            ("002470002", "coast_station", Some("247"), Some("Italy")),
            ("002320001", "coast_station", Some("232"), Some("United Kingdom")),
            ("023200001", "group_station", Some("232"), Some("United Kingdom")),
            ("836612345", "handheld", Some("366"), Some("United States of America")),
            ("111232000", "sar_aircraft", Some("232"), Some("United Kingdom")),
            ("992320001", "aton", Some("232"), Some("United Kingdom")),
            ("982320001", "craft_associated_with_ship", Some("232"), Some("United Kingdom")),
            ("970123456", "ais_sart", None, None),
        ];
        for (input, expected_kind, mid, country) in cases {
            let result = auto(input);
            assert!(result.valid, "{input}: {:?}", result.errors);
            assert_eq!(kind(&result), expected_kind, "{input}");
            assert_eq!(result.info.mid.as_deref(), mid, "{input}");
            assert_eq!(result.info.country.as_deref(), country, "{input}");
        }
    }

    #[test]
    fn ais_sart_has_no_mid_or_usage_contexts() {
        let result = auto("970123456");
        assert!(result.info.mid.is_none());
        assert!(result.info.suitable_for.is_none());
    }

    #[test]
    fn rejects_format_errors() {
        let empty = auto("   ");
        assert!(!empty.valid);
        assert_eq!(empty.errors, vec!["MMSI cannot be empty".to_string()]);

        let short = auto("12345678");
        assert_eq!(short.errors, vec!["MMSI must be exactly 9 digits, got 8".to_string()]);

        let long = auto("1234567890");
        assert!(long.errors[0].contains("exactly 9 digits"));

        let letters = auto("36612300A");
        assert!(!letters.valid);
        assert!(letters.errors[0].contains("only numeric digits"));
        assert!(letters.info.kind.is_none());
    }

    #[test]
    fn trims_before_validating() {
        let result = auto("  366123000\n");
        assert!(result.valid);
        assert_eq!(result.normalized, "366123000");
    }

    #[test]
    fn leading_one_requires_sar_prefix() {
        let result = auto("123456789");
        assert!(!result.valid);
        assert_eq!(kind(&result), "unknown");
        assert!(result.errors[0].contains("SAR aircraft"));
        assert!(
            result
                .warnings
                .contains(&"MMSI contains suspicious sequential ascending pattern".to_string())
        );
    }

    #[test]
    fn leading_nine_without_known_prefix_is_unknown() {
        let result = auto("912345678");
        assert!(!result.valid);
        assert_eq!(kind(&result), "unknown");
        assert!(result.errors[0].starts_with("Unknown MMSI type. Valid formats"));
        assert!(result.info.mid.is_none());
    }

    #[test]
    fn leading_eight_is_handheld() {
        let result = auto("812345678");
        assert_eq!(kind(&result), "handheld");
        // MID 123 is out of range.
        assert!(!result.valid);
    }

    #[test]
    fn group_station_with_low_mid_is_invalid() {
        let result = auto("012345678");
        assert!(!result.valid);
        assert_eq!(kind(&result), "group_station");
        assert_eq!(result.errors[0], "Invalid MID code: 123. Must be between 201-775");
        assert_eq!(result.info.mid.as_deref(), Some("123"));
        assert!(result.info.country.is_none());
    }

    #[test]
    fn mid_range_boundaries() {
        for input in ["200123000", "776123000"] {
            let result = auto(input);
            assert!(!result.valid, "{input}");
            assert!(result.errors[0].contains("Invalid MID code"));
            // Processing continues after the MID error.
            assert!(result.warnings.is_empty());
            assert_eq!(result.errors.len(), 1);
        }

        let low = auto("201123000");
        assert!(low.valid);
        assert_eq!(low.info.country.as_deref(), Some("Albania"));

        let high = auto("775123000");
        assert!(high.valid);
        assert_eq!(high.info.country.as_deref(), Some("Venezuela"));
    }

    #[test]
    fn unallocated_mid_in_range_is_unknown_country() {
        let result = auto("222123000");
        assert!(result.valid);
        assert_eq!(result.info.country.as_deref(), Some("Unknown"));
    }

    #[test]
    fn expected_country_mismatch_warns() {
        let matching = MmsiOptions {
            expected_country: Some("United States of America".to_string()),
            ..MmsiOptions::default()
        };
        let result = validate_mmsi("366123000", &matching);
        assert!(result.valid);
        assert!(result.warnings.is_empty());

        let other = MmsiOptions {
            expected_country: Some("Canada".to_string()),
            ..MmsiOptions::default()
        };
        let result = validate_mmsi("366123000", &other);
        assert!(result.valid);
        assert_eq!(
            result.warnings,
            vec!["MID 366 corresponds to United States of America, expected Canada".to_string()]
        );

        // Unallocated MIDs never trigger the mismatch warning.
        let result = validate_mmsi("222123000", &other);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn requested_type_mismatch_warns_without_failing() {
        let coast = MmsiOptions {
            mmsi_type: RequestedMmsiType::Coast,
            ..MmsiOptions::default()
        };
        let result = validate_mmsi("366123000", &coast);
        assert!(result.valid);
        assert_eq!(
            result.warnings,
            vec!["Expected MMSI type 'coast', but detected 'ship_station'".to_string()]
        );

        let ship = MmsiOptions {
            mmsi_type: RequestedMmsiType::Ship,
            ..MmsiOptions::default()
        };
        assert!(validate_mmsi("366123000", &ship).warnings.is_empty());
    }

    #[test]
    fn suspicious_patterns_warn_regardless_of_validity() {
        let same = auto("222222222");
        assert!(same.warnings.iter().any(|w| w.contains("suspicious pattern")));
        assert!(
            same.warnings
                .contains(&"MMSI contains suspicious pattern (all same digits: 2)".to_string())
        );

        let descending = auto("987654321");
        assert_eq!(kind(&descending), "craft_associated_with_ship");
        assert!(descending.valid);
        assert!(
            descending
                .warnings
                .contains(&"MMSI contains suspicious sequential descending pattern".to_string())
        );

        let zeros = auto("000000000");
        assert_eq!(kind(&zeros), "coast_station");
        assert!(!zeros.valid);
        assert!(zeros.warnings[0].contains("all same digits: 0"));
    }

    #[test]
    fn classification_respects_priority() {
        assert_eq!(detect_mmsi_type("992320001"), MmsiType::Aton);
        assert_eq!(detect_mmsi_type("982320001"), MmsiType::CraftAssociatedWithShip);
        assert_eq!(detect_mmsi_type("970123456"), MmsiType::AisSart);
        assert_eq!(detect_mmsi_type("971234567"), MmsiType::Unknown);
        assert_eq!(detect_mmsi_type("001234567"), MmsiType::CoastStation);
        assert_eq!(detect_mmsi_type("011234567"), MmsiType::GroupStation);
        assert_eq!(detect_mmsi_type("111234567"), MmsiType::SarAircraft);
        assert_eq!(detect_mmsi_type("112345678"), MmsiType::Unknown);
    }

    #[test]
    fn classification_is_total_over_prefixes() {
        for prefix in 0..1000u32 {
            let mmsi = format!("{prefix:03}000000");
            let detected = detect_mmsi_type(&mmsi);
            assert_eq!(detect_mmsi_type(&mmsi), detected);
            let first = mmsi.as_bytes()[0];
            if (b'2'..=b'7').contains(&first) {
                assert_eq!(detected, MmsiType::ShipStation, "{mmsi}");
            }
        }
    }

    #[test]
    fn extracts_mid_by_type_offset() {
        assert_eq!(extract_mid("366123000", MmsiType::ShipStation), Some("366"));
        assert_eq!(extract_mid("002470002", MmsiType::CoastStation), Some("247"));
        assert_eq!(extract_mid("023200001", MmsiType::GroupStation), Some("232"));
        assert_eq!(extract_mid("836612345", MmsiType::Handheld), Some("366"));
        assert_eq!(extract_mid("111232000", MmsiType::SarAircraft), Some("232"));
        assert_eq!(extract_mid("992320001", MmsiType::Aton), Some("232"));
        assert_eq!(
            extract_mid("982320001", MmsiType::CraftAssociatedWithShip),
            Some("232")
        );
        assert_eq!(extract_mid("970123456", MmsiType::AisSart), None);
        assert_eq!(extract_mid("912345678", MmsiType::Unknown), None);
    }

    #[test]
    fn type_rules_hold_even_when_classification_disagrees() {
        let mut result = ValidationResult::new();
        apply_type_rules("812345000", MmsiType::ShipStation, &mut result);
        assert_eq!(
            result.errors,
            vec![
                "Ship station MMSI cannot start with 0, 1, 8, or 9".to_string(),
                "Ship station MMSI must start with digit 2-7".to_string(),
            ]
        );

        let cases = [
            (MmsiType::CoastStation, "Coast station MMSI must start with 00"),
            (MmsiType::GroupStation, "Group station MMSI must start with single 0"),
            (MmsiType::Handheld, "Handheld MMSI must start with 8"),
            (MmsiType::SarAircraft, "SAR aircraft MMSI must start with 111"),
            (MmsiType::Aton, "AIS AtoN MMSI must start with 99"),
        ];
        for (mmsi_type, message) in cases {
            let mut result = ValidationResult::new();
            apply_type_rules("366123000", mmsi_type, &mut result);
            assert!(!result.valid);
            assert_eq!(result.errors, vec![message.to_string()]);
        }
    }

    #[test]
    fn every_error_clears_valid() {
        let inputs = [
            "", "1", "36612300A", "123456789", "912345678", "200123000", "012345678",
            "366123000", "970123456",
        ];
        for input in inputs {
            let result = auto(input);
            assert_eq!(result.valid, result.errors.is_empty(), "{input}");
        }
    }

    #[test]
    fn requested_type_parses() {
        assert_eq!("SAR".parse::<RequestedMmsiType>().ok(), Some(RequestedMmsiType::Sar));
        assert!("barge".parse::<RequestedMmsiType>().is_err());
        assert_eq!(RequestedMmsiType::Auto.expected(), None);
    }
}
