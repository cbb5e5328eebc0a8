//! Student model and submission input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How serial numbers are assigned to new students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SerialPolicy {
    /// Per-school running counter ("01", "02", ...) assigned at insertion.
    /// Any client-supplied serial is ignored.
    #[default]
    Auto,
    /// Client supplies the serial; duplicates within a school are rejected.
    Manual,
}

impl SerialPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

impl std::fmt::Display for SerialPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A submitted registration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub serial_no: String,
    pub name: String,
    pub father_name: String,
    pub mother_name: String,
    pub class: String,
    pub roll: String,
    pub section: String,
    pub date_of_birth: String,
    pub address: String,
    /// Exactly 10 digits
    pub mobile_no: String,
    /// Always `<serial_no>.jpg`; image bytes are not stored
    pub photo: String,
    pub school_id: String,
    pub submitted_date: DateTime<Utc>,
}

/// Form fields of a student submission, as typed by the user.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentFields {
    /// Required under the manual serial policy, ignored under auto
    #[serde(default)]
    pub serial_no: Option<String>,
    #[serde(default, alias = "studentName")]
    pub name: String,
    #[serde(default)]
    pub father_name: String,
    #[serde(default)]
    pub mother_name: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub roll: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub mobile_no: String,
}

/// Response for an accepted submission.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitStudentResponse {
    pub student: Student,
    /// Serial the form should display for the next submission
    pub next_serial_no: String,
}
