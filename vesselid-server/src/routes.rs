//! HTTP handlers for the vesselid server.

use actix_web::{HttpResponse, Responder, get, post, web};
use log::debug;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::{OpenApi, ToSchema};
use vesselid_core::{
    BatchReport, ImoNumberType, ImoOptions, MmsiOptions, RequestedMmsiType, ValidationResult,
    VesselIdError, lookup_mid, mid::table_len, validate_imo, validate_imo_batch, validate_mmsi,
    validate_mmsi_batch,
};

use crate::openapi::ApiDoc;

/// Error payload returned by failing handlers.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

/// Identifier as sent by a client. Numbers are validated as their JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdentifierInput {
    /// A JSON string.
    Text(String),
    /// A JSON number such as `366123000`.
    Number(serde_json::Number),
}

impl IdentifierInput {
    /// String form handed to the validators.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

impl From<&str> for IdentifierInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Request payload for validating one IMO number.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ImoValidateRequest {
    /// IMO number to validate. Missing is treated as empty.
    #[schema(value_type = Option<String>)]
    pub imo: Option<IdentifierInput>,
    /// `ship`, `company` or `auto`. Defaults to `ship`.
    pub number_type: Option<String>,
    /// Require the canonical `IMO1234567` layout.
    pub strict_format: Option<bool>,
    /// Accept numbers without the `IMO` prefix. Defaults to true.
    pub allow_without_prefix: Option<bool>,
}

/// Request payload for validating a list of IMO numbers.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ImoBatchRequest {
    /// IMO numbers in the order they should be reported. Nulls are treated as empty.
    #[schema(value_type = Vec<Option<String>>)]
    pub imos: Vec<Option<IdentifierInput>>,
    /// `ship`, `company` or `auto`. Defaults to `ship`.
    pub number_type: Option<String>,
    /// Require the canonical `IMO1234567` layout.
    pub strict_format: Option<bool>,
    /// Accept numbers without the `IMO` prefix. Defaults to true.
    pub allow_without_prefix: Option<bool>,
}

/// Request payload for validating one MMSI.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MmsiValidateRequest {
    /// MMSI to validate. Missing is treated as empty.
    #[schema(value_type = Option<String>)]
    pub mmsi: Option<IdentifierInput>,
    /// `ship`, `coast`, `group`, `handheld`, `sar`, `aton` or `auto`. Defaults to `auto`.
    pub mmsi_type: Option<String>,
    /// Country the MID is expected to resolve to.
    pub expected_country: Option<String>,
    /// Accepted for symmetry with IMO requests.
    pub strict_format: Option<bool>,
}

/// Request payload for validating a list of MMSIs.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MmsiBatchRequest {
    /// MMSIs in the order they should be reported. Nulls are treated as empty.
    #[schema(value_type = Vec<Option<String>>)]
    pub mmsis: Vec<Option<IdentifierInput>>,
    /// `ship`, `coast`, `group`, `handheld`, `sar`, `aton` or `auto`. Defaults to `auto`.
    pub mmsi_type: Option<String>,
    /// Country the MID is expected to resolve to.
    pub expected_country: Option<String>,
    /// Accepted for symmetry with IMO requests.
    pub strict_format: Option<bool>,
}

/// MID lookup result.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MidLookupResponse {
    /// Three-digit MID.
    pub mid: String,
    /// Allocated country.
    pub country: String,
}

/// Liveness payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `ok`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Number of MIDs known to the server.
    pub mid_entries: usize,
}

/// Register every handler on an app or scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(imo_validate)
        .service(imo_batch)
        .service(mmsi_validate)
        .service(mmsi_batch)
        .service(mid_lookup)
        .service(health)
        .service(openapi_json);
}

fn imo_options(
    number_type: Option<&str>,
    strict_format: Option<bool>,
    allow_without_prefix: Option<bool>,
) -> Result<ImoOptions, VesselIdError> {
    let defaults = ImoOptions::default();
    Ok(ImoOptions {
        number_type: number_type
            .map(ImoNumberType::from_str)
            .transpose()?
            .unwrap_or(defaults.number_type),
        strict_format: strict_format.unwrap_or(defaults.strict_format),
        allow_without_prefix: allow_without_prefix.unwrap_or(defaults.allow_without_prefix),
    })
}

fn mmsi_options(
    mmsi_type: Option<&str>,
    expected_country: Option<String>,
    strict_format: Option<bool>,
) -> Result<MmsiOptions, VesselIdError> {
    Ok(MmsiOptions {
        mmsi_type: mmsi_type
            .map(RequestedMmsiType::from_str)
            .transpose()?
            .unwrap_or_default(),
        expected_country,
        strict_format: strict_format.unwrap_or_default(),
    })
}

fn bad_request(err: &VesselIdError) -> HttpResponse {
    debug!("rejecting request: {err}");
    HttpResponse::BadRequest().json(ErrorResponse {
        message: err.to_string(),
    })
}

fn input_text(input: Option<IdentifierInput>) -> String {
    input.map(IdentifierInput::into_text).unwrap_or_default()
}

fn flatten_inputs(inputs: Vec<Option<IdentifierInput>>) -> Vec<String> {
    inputs.into_iter().map(input_text).collect()
}

#[utoipa::path(
    post,
    path = "/imo/validate",
    request_body = ImoValidateRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidationResult),
        (status = 400, description = "Unknown option value", body = ErrorResponse)
    ),
    tag = "imo"
)]
#[post("/api/imo/validate")]
/// Validate one IMO number.
pub async fn imo_validate(payload: web::Json<ImoValidateRequest>) -> impl Responder {
    let request = payload.into_inner();
    let options = match imo_options(
        request.number_type.as_deref(),
        request.strict_format,
        request.allow_without_prefix,
    ) {
        Ok(options) => options,
        Err(err) => return bad_request(&err),
    };
    let imo = input_text(request.imo);
    HttpResponse::Ok().json(validate_imo(&imo, &options))
}

#[utoipa::path(
    post,
    path = "/imo/batch",
    request_body = ImoBatchRequest,
    responses(
        (status = 200, description = "Batch report", body = BatchReport),
        (status = 400, description = "Unknown option value", body = ErrorResponse)
    ),
    tag = "imo"
)]
#[post("/api/imo/batch")]
/// Validate a list of IMO numbers with shared options.
pub async fn imo_batch(payload: web::Json<ImoBatchRequest>) -> impl Responder {
    let request = payload.into_inner();
    let options = match imo_options(
        request.number_type.as_deref(),
        request.strict_format,
        request.allow_without_prefix,
    ) {
        Ok(options) => options,
        Err(err) => return bad_request(&err),
    };
    HttpResponse::Ok().json(validate_imo_batch(flatten_inputs(request.imos), &options))
}

#[utoipa::path(
    post,
    path = "/mmsi/validate",
    request_body = MmsiValidateRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidationResult),
        (status = 400, description = "Unknown option value", body = ErrorResponse)
    ),
    tag = "mmsi"
)]
#[post("/api/mmsi/validate")]
/// Validate one MMSI.
pub async fn mmsi_validate(payload: web::Json<MmsiValidateRequest>) -> impl Responder {
    let request = payload.into_inner();
    let options = match mmsi_options(
        request.mmsi_type.as_deref(),
        request.expected_country,
        request.strict_format,
    ) {
        Ok(options) => options,
        Err(err) => return bad_request(&err),
    };
    let mmsi = input_text(request.mmsi);
    HttpResponse::Ok().json(validate_mmsi(&mmsi, &options))
}

#[utoipa::path(
    post,
    path = "/mmsi/batch",
    request_body = MmsiBatchRequest,
    responses(
        (status = 200, description = "Batch report", body = BatchReport),
        (status = 400, description = "Unknown option value", body = ErrorResponse)
    ),
    tag = "mmsi"
)]
#[post("/api/mmsi/batch")]
/// Validate a list of MMSIs with shared options.
pub async fn mmsi_batch(payload: web::Json<MmsiBatchRequest>) -> impl Responder {
    let request = payload.into_inner();
    let options = match mmsi_options(
        request.mmsi_type.as_deref(),
        request.expected_country,
        request.strict_format,
    ) {
        Ok(options) => options,
        Err(err) => return bad_request(&err),
    };
    HttpResponse::Ok().json(validate_mmsi_batch(flatten_inputs(request.mmsis), &options))
}

#[utoipa::path(
    get,
    path = "/mid/{code}",
    params(
        ("code" = String, Path, description = "Three-digit Maritime Identification Digits")
    ),
    responses(
        (status = 200, description = "Allocated country", body = MidLookupResponse),
        (status = 404, description = "MID not allocated", body = ErrorResponse)
    ),
    tag = "mid"
)]
#[get("/api/mid/{code}")]
/// Look up the country a MID is allocated to.
pub async fn mid_lookup(path: web::Path<String>) -> impl Responder {
    let code = path.into_inner();
    match lookup_mid(code.trim()) {
        Some(country) => HttpResponse::Ok().json(MidLookupResponse {
            mid: code.trim().to_string(),
            country: country.to_string(),
        }),
        None => HttpResponse::NotFound().json(ErrorResponse {
            message: format!("MID {code} is not allocated"),
        }),
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    ),
    tag = "system"
)]
#[get("/api/health")]
/// Report liveness.
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        mid_entries: table_len(),
    })
}

#[utoipa::path(
    get,
    path = "/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document", body = serde_json::Value)
    ),
    tag = "system"
)]
#[get("/api/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
