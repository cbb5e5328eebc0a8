//! Domain models for the student registry.

pub mod school;
pub mod student;
pub mod view;

// Re-export commonly used types
pub use school::{
    CreateSchoolRequest, CreateSchoolResponse, DashboardStats, DeletePreviewResponse,
    DeleteSchoolResponse, School, SchoolListResponse, SchoolSummary,
};
pub use student::{SerialPolicy, Student, StudentFields, SubmitStudentResponse};
pub use view::{RegistrationFormResponse, ViewMode, ViewResponse};
