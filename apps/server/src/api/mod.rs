//! API endpoint modules.

pub mod dashboard;
pub mod health;
pub mod openapi;
pub mod registration;
pub mod view;

use actix_web::HttpResponse;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};

use crate::services::{CommandOutcome, CsvDocument, csv_export::CSV_CONTENT_TYPE};

pub use dashboard::configure_routes as configure_dashboard_routes;
pub use health::configure_health_routes;
pub use openapi::{ApiDoc, configure_routes as configure_openapi_routes};
pub use registration::configure_routes as configure_registration_routes;
pub use view::configure_routes as configure_view_routes;

/// Register every API route. Mounted under `/api/v1`.
pub fn configure_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(configure_openapi_routes)
        .configure(configure_view_routes)
        .configure(configure_dashboard_routes)
        .configure(configure_registration_routes);
}

/// Send a CSV document as a file download.
pub fn csv_response(document: CsvDocument) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(CSV_CONTENT_TYPE)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(document.filename)],
        })
        .body(document.content)
}

impl CommandOutcome {
    /// HTTP rendering of a command result.
    pub fn into_response(self) -> HttpResponse {
        match self {
            CommandOutcome::SchoolAdded(created) => HttpResponse::Created().json(created),
            CommandOutcome::DeletePending(preview) => HttpResponse::Ok().json(preview),
            CommandOutcome::SchoolDeleted(deleted) => HttpResponse::Ok().json(deleted),
            CommandOutcome::Exported(document) => csv_response(document),
            CommandOutcome::StudentAdded(submitted) => HttpResponse::Created().json(submitted),
        }
    }
}
