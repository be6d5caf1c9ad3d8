#![deny(missing_docs)]
//! vesselid core library.
//!
//! Validation for maritime vessel identifiers: IMO ship and company numbers
//! (weighted check digit) and MMSIs (prefix classification and MID country
//! lookup). Validators never fail; rejected input comes back as a
//! [`ValidationResult`] with `valid == false` and a list of errors.

pub mod batch;
pub mod domain;
pub mod error;
pub mod fs;
pub mod imo;
pub mod mid;
pub mod mmsi;
pub mod report;

pub use batch::{
    BatchItem, BatchReport, BatchSummary, validate_batch, validate_imo_batch, validate_mmsi_batch,
};
pub use domain::{CheckDigit, IdentifierKind, ValidationInfo, ValidationResult};
pub use error::{Result, VesselIdError};
pub use fs::{FileSystem, StdFileSystem, load_identifiers, parse_identifiers};
pub use imo::{
    ImoNumberType, ImoOptions, company_check_digit, estimate_era, ship_check_digit, validate_imo,
};
pub use mid::{MID_RANGE, UNKNOWN_COUNTRY, country_for_mid, lookup_mid, mids_for_country};
pub use mmsi::{
    MmsiOptions, MmsiType, RequestedMmsiType, detect_mmsi_type, extract_mid, validate_mmsi,
};
pub use report::{render_batch_markdown, render_batch_text, render_json, summary_line};
