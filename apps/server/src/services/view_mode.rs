//! View-mode resolution from the `school` signal.

use crate::error::{AppError, AppResult};
use crate::models::ViewMode;
use crate::services::registry::Registry;

/// Query parameter carrying the school token.
pub const SCHOOL_PARAM: &str = "school";

/// Where a caller holding an invalid link is sent.
pub const DASHBOARD_ENTRY: &str = "/";

/// Pick the view for a session.
///
/// An absent or blank signal selects the dashboard. A signal that resolves to
/// a school binds the form to it. Anything else is an `InvalidLink`.
pub fn resolve_view(registry: &Registry, signal: Option<&str>) -> AppResult<ViewMode> {
    let token = match signal.map(str::trim) {
        None | Some("") => return Ok(ViewMode::Dashboard),
        Some(token) => token,
    };

    match registry.resolve_school_by_link(token) {
        Some(school) => Ok(ViewMode::SchoolForm {
            school_id: school.id.clone(),
        }),
        None => Err(AppError::InvalidLink {
            token: token.to_string(),
            redirect: DASHBOARD_ENTRY.to_string(),
        }),
    }
}

/// Build the URL handed to a school: `<public_url>?school=<link>`.
pub fn registration_url(public_url: &str, registration_link: &str) -> String {
    let separator = if public_url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}{}={}",
        public_url,
        separator,
        SCHOOL_PARAM,
        urlencoding::encode(registration_link)
    )
}
