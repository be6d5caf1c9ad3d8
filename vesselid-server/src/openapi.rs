//! OpenAPI specification for the vesselid server.

use utoipa::OpenApi;

use vesselid_core::{
    BatchItem, BatchReport, BatchSummary, CheckDigit, IdentifierKind, ValidationInfo,
    ValidationResult,
};

use crate::routes::{
    ErrorResponse, HealthResponse, ImoBatchRequest, ImoValidateRequest, MidLookupResponse,
    MmsiBatchRequest, MmsiValidateRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::imo_validate,
        crate::routes::imo_batch,
        crate::routes::mmsi_validate,
        crate::routes::mmsi_batch,
        crate::routes::mid_lookup,
        crate::routes::health,
        crate::routes::openapi_json
    ),
    components(
        schemas(
            ImoValidateRequest,
            ImoBatchRequest,
            MmsiValidateRequest,
            MmsiBatchRequest,
            MidLookupResponse,
            HealthResponse,
            ErrorResponse,
            ValidationResult,
            ValidationInfo,
            CheckDigit,
            BatchReport,
            BatchItem,
            BatchSummary,
            IdentifierKind
        )
    ),
    tags(
        (name = "imo", description = "IMO ship and company numbers"),
        (name = "mmsi", description = "Maritime Mobile Service Identities"),
        (name = "mid", description = "Maritime Identification Digits"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI specification for the vesselid server.
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn openapi_includes_expected_paths() {
        let doc = ApiDoc::openapi();
        let paths = doc.paths.paths;

        assert!(paths.contains_key("/imo/validate"));
        assert!(paths.contains_key("/imo/batch"));
        assert!(paths.contains_key("/mmsi/validate"));
        assert!(paths.contains_key("/mmsi/batch"));
        assert!(paths.contains_key("/mid/{code}"));
        assert!(paths.contains_key("/health"));
        assert!(paths.contains_key("/openapi.json"));
    }

    #[test]
    fn openapi_registers_result_schemas() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;

        for name in ["ValidationResult", "ValidationInfo", "BatchReport", "ErrorResponse"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }
}
