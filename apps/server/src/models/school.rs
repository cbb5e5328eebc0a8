//! School model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A school that registers students and owns a registration link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct School {
    /// Opaque unique identifier
    pub id: String,
    /// Display name, stored trimmed
    pub name: String,
    /// Lookup token handed out in the registration link; equal to `id`
    pub registration_link: String,
    /// Number of students whose `school_id` is this school's `id`
    pub students_count: u32,
    /// Calendar date the school was added
    pub created_date: NaiveDate,
    /// Administrator-declared target, used only for the completion percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_forms_needed: Option<u32>,
}

impl School {
    /// Percentage of `total_forms_needed` already submitted, floored.
    ///
    /// `None` when no target (or a zero target) was declared. Not capped at 100.
    pub fn completion_percent(&self) -> Option<u32> {
        match self.total_forms_needed {
            Some(total) if total > 0 => {
                Some((u64::from(self.students_count) * 100 / u64::from(total)) as u32)
            }
            _ => None,
        }
    }
}

/// Request body for adding a school.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchoolRequest {
    pub name: String,
    #[serde(default)]
    pub total_forms_needed: Option<u32>,
}

/// School as listed on the dashboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchoolSummary {
    #[serde(flatten)]
    pub school: School,
    /// Full URL to distribute to the school
    pub registration_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_percent: Option<u32>,
}

/// Response for a newly added school.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchoolResponse {
    pub school: School,
    pub registration_url: String,
}

/// Dashboard school list.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SchoolListResponse {
    pub schools: Vec<SchoolSummary>,
}

/// Aggregate counters shown on the dashboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_schools: usize,
    pub total_students: usize,
}

/// First step of a school deletion: what will be removed.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletePreviewResponse {
    pub school: School,
    /// Students that the confirmed delete will remove with the school
    pub students_to_remove: usize,
}

/// Result of a confirmed school deletion.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSchoolResponse {
    pub school_id: String,
    pub students_removed: usize,
}
