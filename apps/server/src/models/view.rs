//! View-mode models.

use serde::Serialize;
use utoipa::ToSchema;

use super::School;

/// Which surface a session presents. Chosen once, from the `school` signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    /// Administrative dashboard: school management and aggregate export
    Dashboard,
    /// Single-school registration form, bound to one school id
    SchoolForm { school_id: String },
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::SchoolForm { .. } => "school_form",
        }
    }
}

/// Response of the view resolver.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    /// `dashboard` or `school_form`
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<RegistrationFormResponse>,
}

/// What the registration form needs to render.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFormResponse {
    pub school: School,
    /// "<School name> - Student Registration"
    pub title: String,
    /// Advisory preview of the next serial number
    pub next_serial_no: String,
    /// Filename the photo will be saved as
    pub photo_filename: String,
}
