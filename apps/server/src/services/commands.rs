//! The closed set of registry commands and their dispatch.
//!
//! Each command is only valid in one view mode. Dispatching it through a
//! session of the other mode fails with `Forbidden` before anything is read
//! or written.

use crate::error::{AppError, AppResult};
use crate::models::{
    CreateSchoolResponse, DeletePreviewResponse, DeleteSchoolResponse, StudentFields,
    SubmitStudentResponse,
};
use crate::services::session::{CsvDocument, DashboardSession, SchoolFormSession};

/// A registry operation requested by a client.
#[derive(Debug, Clone)]
pub enum Command {
    AddSchool {
        name: String,
        total_forms_needed: Option<u32>,
    },
    /// Unconfirmed requests only preview the cascade.
    DeleteSchool { school_id: String, confirmed: bool },
    ExportAll,
    ExportOne { school_id: String },
    AddStudent { fields: StudentFields },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddSchool { .. } => "add_school",
            Self::DeleteSchool { .. } => "delete_school",
            Self::ExportAll => "export_all",
            Self::ExportOne { .. } => "export_one",
            Self::AddStudent { .. } => "add_student",
        }
    }
}

/// Result of a dispatched command.
#[derive(Debug)]
pub enum CommandOutcome {
    SchoolAdded(CreateSchoolResponse),
    DeletePending(DeletePreviewResponse),
    SchoolDeleted(DeleteSchoolResponse),
    Exported(CsvDocument),
    StudentAdded(SubmitStudentResponse),
}

/// The session a command runs against.
pub enum Session {
    Dashboard(DashboardSession),
    SchoolForm(SchoolFormSession),
}

impl Session {
    fn mode(&self) -> &'static str {
        match self {
            Self::Dashboard(_) => "dashboard",
            Self::SchoolForm(_) => "school_form",
        }
    }

    /// Run `command` if this session's mode permits it.
    pub async fn dispatch(&self, command: Command) -> AppResult<CommandOutcome> {
        tracing::debug!(command = command.name(), mode = self.mode(), "Dispatching command");

        match (self, command) {
            (
                Self::Dashboard(dashboard),
                Command::AddSchool {
                    name,
                    total_forms_needed,
                },
            ) => dashboard
                .add_school(name, total_forms_needed)
                .await
                .map(CommandOutcome::SchoolAdded),
            (
                Self::Dashboard(dashboard),
                Command::DeleteSchool {
                    school_id,
                    confirmed: false,
                },
            ) => dashboard
                .request_delete(&school_id)
                .await
                .map(CommandOutcome::DeletePending),
            (
                Self::Dashboard(dashboard),
                Command::DeleteSchool {
                    school_id,
                    confirmed: true,
                },
            ) => dashboard
                .confirm_delete(&school_id)
                .await
                .map(CommandOutcome::SchoolDeleted),
            (Self::Dashboard(dashboard), Command::ExportAll) => {
                dashboard.export_all().await.map(CommandOutcome::Exported)
            }
            (Self::Dashboard(dashboard), Command::ExportOne { school_id }) => dashboard
                .export_school(&school_id)
                .await
                .map(CommandOutcome::Exported),
            (Self::SchoolForm(form), Command::AddStudent { fields }) => form
                .add_student(fields)
                .await
                .map(CommandOutcome::StudentAdded),
            (session, command) => Err(AppError::Forbidden(format!(
                "{} is not available in {} mode",
                command.name(),
                session.mode()
            ))),
        }
    }
}
