//! Dashboard endpoints: school management and export.
//!
//! Every handler takes `DashboardAuth`, so none of these routes is reachable
//! without the dashboard key.

use actix_web::{HttpResponse, delete, get, post, web};

use crate::auth::DashboardAuth;
use crate::error::AppResult;
use crate::models::{
    CreateSchoolRequest, CreateSchoolResponse, DashboardStats, DeletePreviewResponse,
    DeleteSchoolResponse, SchoolListResponse,
};
use crate::services::{Command, Session};

/// Configure dashboard routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_stats)
        .service(export_all)
        .service(list_schools)
        .service(add_school)
        // Specific paths first
        .service(request_delete)
        .service(export_school)
        .service(delete_school);
}

/// Totals shown at the top of the dashboard.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Dashboard totals", body = DashboardStats),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("admin_key" = []))
)]
#[get("/dashboard/stats")]
pub async fn get_stats(auth: DashboardAuth) -> HttpResponse {
    HttpResponse::Ok().json(auth.session.stats().await)
}

/// List schools with their registration URLs.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/schools",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Schools in creation order", body = SchoolListResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(("admin_key" = []))
)]
#[get("/dashboard/schools")]
pub async fn list_schools(auth: DashboardAuth) -> HttpResponse {
    HttpResponse::Ok().json(SchoolListResponse {
        schools: auth.session.list_schools().await,
    })
}

/// Add a school and return its registration link.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/schools",
    tag = "Dashboard",
    request_body = CreateSchoolRequest,
    responses(
        (status = 201, description = "School added", body = CreateSchoolResponse),
        (status = 400, description = "Blank name", body = crate::error::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 504, description = "Submission timed out", body = crate::error::ErrorResponse),
    ),
    security(("admin_key" = []))
)]
#[post("/dashboard/schools")]
pub async fn add_school(
    auth: DashboardAuth,
    body: web::Json<CreateSchoolRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let outcome = Session::Dashboard(auth.session)
        .dispatch(Command::AddSchool {
            name: req.name,
            total_forms_needed: req.total_forms_needed,
        })
        .await?;
    Ok(outcome.into_response())
}

/// First step of a delete: show what the cascade will remove.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard/schools/{school_id}/delete-request",
    tag = "Dashboard",
    params(("school_id" = String, Path, description = "School id")),
    responses(
        (status = 200, description = "Deletion preview", body = DeletePreviewResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "School not found", body = crate::error::ErrorResponse),
    ),
    security(("admin_key" = []))
)]
#[post("/dashboard/schools/{school_id}/delete-request")]
pub async fn request_delete(
    auth: DashboardAuth,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let outcome = Session::Dashboard(auth.session)
        .dispatch(Command::DeleteSchool {
            school_id: path.into_inner(),
            confirmed: false,
        })
        .await?;
    Ok(outcome.into_response())
}

/// Second step of a delete: remove the school and its students.
#[utoipa::path(
    delete,
    path = "/api/v1/dashboard/schools/{school_id}",
    tag = "Dashboard",
    params(("school_id" = String, Path, description = "School id")),
    responses(
        (status = 200, description = "School deleted", body = DeleteSchoolResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "School not found", body = crate::error::ErrorResponse),
    ),
    security(("admin_key" = []))
)]
#[delete("/dashboard/schools/{school_id}")]
pub async fn delete_school(
    auth: DashboardAuth,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let outcome = Session::Dashboard(auth.session)
        .dispatch(Command::DeleteSchool {
            school_id: path.into_inner(),
            confirmed: true,
        })
        .await?;
    Ok(outcome.into_response())
}

/// Download every student as `all_students_data.csv`.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/export",
    tag = "Dashboard",
    responses(
        (status = 200, description = "CSV document", content_type = "text/csv", body = String),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "No student data", body = crate::error::ErrorResponse),
    ),
    security(("admin_key" = []))
)]
#[get("/dashboard/export")]
pub async fn export_all(auth: DashboardAuth) -> AppResult<HttpResponse> {
    let outcome = Session::Dashboard(auth.session)
        .dispatch(Command::ExportAll)
        .await?;
    Ok(outcome.into_response())
}

/// Download one school's students.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/schools/{school_id}/export",
    tag = "Dashboard",
    params(("school_id" = String, Path, description = "School id")),
    responses(
        (status = 200, description = "CSV document", content_type = "text/csv", body = String),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
        (status = 404, description = "School not found or no student data", body = crate::error::ErrorResponse),
    ),
    security(("admin_key" = []))
)]
#[get("/dashboard/schools/{school_id}/export")]
pub async fn export_school(
    auth: DashboardAuth,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let outcome = Session::Dashboard(auth.session)
        .dispatch(Command::ExportOne {
            school_id: path.into_inner(),
        })
        .await?;
    Ok(outcome.into_response())
}
