//! OpenAPI documentation configuration.

use actix_web::{HttpResponse, get, web};
use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student Registry Server",
        version = "0.1.0",
        description = "API server for collecting school student registrations and exporting them as CSV"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::info,
        // View endpoints
        api::view::resolve_view,
        // Dashboard endpoints
        api::dashboard::get_stats,
        api::dashboard::list_schools,
        api::dashboard::add_school,
        api::dashboard::request_delete,
        api::dashboard::delete_school,
        api::dashboard::export_all,
        api::dashboard::export_school,
        // Registration endpoints
        api::registration::get_form,
        api::registration::submit_student,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            error::InvalidLinkResponse,
            // Health
            api::health::HealthResponse,
            api::health::ServerInfoResponse,
            // Schools
            models::School,
            models::SchoolSummary,
            models::SchoolListResponse,
            models::CreateSchoolRequest,
            models::CreateSchoolResponse,
            models::DashboardStats,
            models::DeletePreviewResponse,
            models::DeleteSchoolResponse,
            // Students
            models::SerialPolicy,
            models::Student,
            models::StudentFields,
            models::SubmitStudentResponse,
            // View
            models::ViewResponse,
            models::RegistrationFormResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "View", description = "Dashboard or registration form selection"),
        (name = "Dashboard", description = "School management and CSV export"),
        (name = "Registration", description = "Per-school student registration form")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add dashboard key security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_key",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Header(
                        utoipa::openapi::security::ApiKeyValue::new(
                            crate::config::ADMIN_KEY_HEADER,
                        ),
                    ),
                ),
            );
        }
    }
}

/// Serve the OpenAPI document.
#[get("/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Configure OpenAPI routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(openapi_json);
}
