//! Actix-web extractor guarding dashboard routes.
//!
//! # Security
//! - The presented key is wrapped in `SecretString` immediately
//! - Key values are never logged or exposed in debug output
//! - Comparison is constant-time

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use secrecy::{ExposeSecret, SecretString};
use std::future::{Ready, ready};

use super::AdminKey;
use crate::config::ADMIN_KEY_HEADER;
use crate::error::AppError;
use crate::services::{DashboardGrant, DashboardSession, Sessions};

/// Extract a secret header value, wrapping it in SecretString.
/// Returns None if the header is missing or invalid UTF-8.
fn extract_secret_header(req: &HttpRequest, header_name: &str) -> Option<SecretString> {
    req.headers()
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .map(|s| SecretString::from(s.to_string()))
}

/// Extractor that requires the dashboard key and opens a dashboard session.
///
/// ```ignore
/// async fn handler(auth: DashboardAuth) -> impl Responder {
///     auth.session.stats().await
/// }
/// ```
pub struct DashboardAuth {
    pub session: DashboardSession,
}

impl FromRequest for DashboardAuth {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let (Some(sessions), Some(stored_key)) = (
            req.app_data::<web::Data<Sessions>>(),
            req.app_data::<web::Data<AdminKey>>(),
        ) else {
            tracing::error!("Dashboard auth used without Sessions/AdminKey app data");
            return ready(Err(AppError::Unauthorized(
                "Internal configuration error".to_string(),
            )));
        };

        if !stored_key.is_configured() {
            return ready(Err(AppError::Unauthorized(
                "Dashboard is disabled: no admin key configured".to_string(),
            )));
        }

        let provided: Option<SecretString> = extract_secret_header(req, ADMIN_KEY_HEADER);
        match provided {
            Some(ref key) if stored_key.verify(key.expose_secret()) => ready(Ok(DashboardAuth {
                session: sessions.dashboard(DashboardGrant::issue()),
            })),
            Some(_) => ready(Err(AppError::Unauthorized("Invalid admin key".to_string()))),
            None => ready(Err(AppError::Unauthorized(format!(
                "Missing {} header",
                ADMIN_KEY_HEADER
            )))),
        }
    }
}
