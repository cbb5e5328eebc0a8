//! View resolution endpoint.

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::AppResult;
use crate::models::ViewResponse;
use crate::services::Sessions;

/// Query of the view resolver.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ViewQuery {
    /// Registration link token; absent for the dashboard
    pub school: Option<String>,
}

/// Decide whether a page load shows the dashboard or a school's form.
///
/// GET /view?school=<token>
#[utoipa::path(
    get,
    path = "/api/v1/view",
    tag = "View",
    params(ViewQuery),
    responses(
        (status = 200, description = "Resolved view", body = ViewResponse),
        (status = 404, description = "Invalid school link", body = crate::error::InvalidLinkResponse),
    )
)]
#[get("/view")]
pub async fn resolve_view(
    sessions: web::Data<Sessions>,
    query: web::Query<ViewQuery>,
) -> AppResult<HttpResponse> {
    let view = sessions.resolve(query.school.as_deref()).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Configure view routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(resolve_view);
}
