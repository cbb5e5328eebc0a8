//! Registration form endpoints.
//!
//! The link token in the path is the only credential. It opens a form session
//! bound to one school, which can do nothing but read that school and append
//! students to it.

use actix_web::{HttpResponse, get, post, web};

use crate::error::AppResult;
use crate::models::{RegistrationFormResponse, StudentFields, SubmitStudentResponse};
use crate::services::{Command, Session, Sessions};

/// Configure registration routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(submit_student).service(get_form);
}

/// What the form for a school link should display.
#[utoipa::path(
    get,
    path = "/api/v1/register/{token}",
    tag = "Registration",
    params(("token" = String, Path, description = "Registration link token")),
    responses(
        (status = 200, description = "Form metadata", body = RegistrationFormResponse),
        (status = 404, description = "Invalid school link", body = crate::error::InvalidLinkResponse),
    )
)]
#[get("/register/{token}")]
pub async fn get_form(
    sessions: web::Data<Sessions>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let form = sessions.school_form(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(form.form().await?))
}

/// Submit a student to the school the link is bound to.
#[utoipa::path(
    post,
    path = "/api/v1/register/{token}/students",
    tag = "Registration",
    params(("token" = String, Path, description = "Registration link token")),
    request_body = StudentFields,
    responses(
        (status = 201, description = "Student registered", body = SubmitStudentResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorResponse),
        (status = 404, description = "Invalid school link", body = crate::error::InvalidLinkResponse),
        (status = 504, description = "Submission timed out", body = crate::error::ErrorResponse),
    )
)]
#[post("/register/{token}/students")]
pub async fn submit_student(
    sessions: web::Data<Sessions>,
    path: web::Path<String>,
    body: web::Json<StudentFields>,
) -> AppResult<HttpResponse> {
    let form = sessions.school_form(&path.into_inner()).await?;
    let outcome = Session::SchoolForm(form)
        .dispatch(Command::AddStudent {
            fields: body.into_inner(),
        })
        .await?;
    Ok(outcome.into_response())
}
