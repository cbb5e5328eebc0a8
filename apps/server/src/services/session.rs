//! Mode-scoped access to the registry.
//!
//! A `DashboardSession` can manage schools and export everything; a
//! `SchoolFormSession` can only read its own school and append students to it.
//! Dashboard sessions require a `DashboardGrant`, which only the dashboard key
//! check in `crate::auth` can mint. Form sessions are only created from a
//! registration link that resolves.

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateSchoolResponse, DashboardStats, DeletePreviewResponse, DeleteSchoolResponse,
    RegistrationFormResponse, School, SchoolSummary, StudentFields, SubmitStudentResponse,
    ViewMode, ViewResponse,
};
use crate::services::csv_export::{self, CsvExporter};
use crate::services::registry::Registry;
use crate::services::seed::demo_registry;
use crate::services::store::RegistryStore;
use crate::services::view_mode::{registration_url, resolve_view};

/// Proof that the caller passed the dashboard key check.
#[derive(Debug)]
pub struct DashboardGrant(());

impl DashboardGrant {
    pub(crate) fn issue() -> Self {
        Self(())
    }
}

/// A CSV document ready to be sent as a download.
#[derive(Debug, Clone)]
pub struct CsvDocument {
    pub filename: String,
    pub content: String,
}

/// Shared entry point that hands out sessions. Injected as app data.
#[derive(Clone)]
pub struct Sessions {
    store: RegistryStore,
    public_url: String,
    exporter: CsvExporter,
}

impl Sessions {
    pub fn new(store: RegistryStore, public_url: String, exporter: CsvExporter) -> Self {
        Self {
            store,
            public_url,
            exporter,
        }
    }

    /// Build the registry (seeded or empty) and session factory for `config`.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let registry = if config.seed_demo {
            demo_registry(config.serial_policy)?
        } else {
            Registry::new(config.serial_policy)
        };
        Ok(Self::new(
            RegistryStore::new(registry, config.timing),
            config.public_url.clone(),
            CsvExporter::new(config.date_format.clone()),
        ))
    }

    pub fn store(&self) -> &RegistryStore {
        &self.store
    }

    /// Resolve the view for a `school` signal and describe it.
    pub async fn resolve(&self, signal: Option<&str>) -> AppResult<ViewResponse> {
        let mode = {
            let registry = self.store.read().await;
            resolve_view(&registry, signal)?
        };

        let form = match &mode {
            ViewMode::Dashboard => None,
            ViewMode::SchoolForm { school_id } => {
                Some(self.bound_form(school_id.clone()).form().await?)
            }
        };

        Ok(ViewResponse {
            mode: mode.as_str().to_string(),
            form,
        })
    }

    /// Open the dashboard.
    pub fn dashboard(&self, _grant: DashboardGrant) -> DashboardSession {
        DashboardSession {
            store: self.store.clone(),
            public_url: self.public_url.clone(),
            exporter: self.exporter.clone(),
        }
    }

    /// Open the registration form a link token points at.
    pub async fn school_form(&self, token: &str) -> AppResult<SchoolFormSession> {
        match resolve_view(&*self.store.read().await, Some(token))? {
            ViewMode::SchoolForm { school_id } => Ok(self.bound_form(school_id)),
            ViewMode::Dashboard => Err(AppError::Forbidden(
                "a school link is required to open the registration form".to_string(),
            )),
        }
    }

    fn bound_form(&self, school_id: String) -> SchoolFormSession {
        SchoolFormSession {
            store: self.store.clone(),
            school_id,
        }
    }
}

/// Administrative operations.
#[derive(Clone)]
pub struct DashboardSession {
    store: RegistryStore,
    public_url: String,
    exporter: CsvExporter,
}

impl DashboardSession {
    pub async fn stats(&self) -> DashboardStats {
        let registry = self.store.read().await;
        DashboardStats {
            total_schools: registry.schools().len(),
            total_students: registry.total_students(),
        }
    }

    pub async fn list_schools(&self) -> Vec<SchoolSummary> {
        let registry = self.store.read().await;
        registry
            .schools()
            .iter()
            .map(|school| self.summarize(school))
            .collect()
    }

    pub async fn add_school(
        &self,
        name: String,
        total_forms_needed: Option<u32>,
    ) -> AppResult<CreateSchoolResponse> {
        let school = self.store.add_school(name, total_forms_needed).await?;
        Ok(CreateSchoolResponse {
            registration_url: registration_url(&self.public_url, &school.registration_link),
            school,
        })
    }

    /// First step of a delete: report what would be removed, change nothing.
    pub async fn request_delete(&self, school_id: &str) -> AppResult<DeletePreviewResponse> {
        let registry = self.store.read().await;
        let school = registry
            .school(school_id)
            .ok_or_else(|| AppError::NotFound(format!("School {}", school_id)))?;
        Ok(DeletePreviewResponse {
            students_to_remove: registry.list_students(Some(school_id)).len(),
            school: school.clone(),
        })
    }

    /// Second step of a delete: remove the school and its students.
    pub async fn confirm_delete(&self, school_id: &str) -> AppResult<DeleteSchoolResponse> {
        let deleted = self.store.delete_school(school_id).await?;
        Ok(DeleteSchoolResponse {
            school_id: deleted.school.id,
            students_removed: deleted.students_removed,
        })
    }

    /// Every student, in submission order.
    pub async fn export_all(&self) -> AppResult<CsvDocument> {
        let registry = self.store.read().await;
        let students = registry.list_students(None);
        if students.is_empty() {
            return Err(AppError::NoData("to download".to_string()));
        }
        Ok(CsvDocument {
            filename: csv_export::ALL_STUDENTS_FILENAME.to_string(),
            content: self.exporter.to_csv(students, &registry)?,
        })
    }

    /// One school's students, in submission order.
    pub async fn export_school(&self, school_id: &str) -> AppResult<CsvDocument> {
        let registry = self.store.read().await;
        let school = registry
            .school(school_id)
            .ok_or_else(|| AppError::NotFound(format!("School {}", school_id)))?;
        let students = registry.list_students(Some(school_id));
        if students.is_empty() {
            return Err(AppError::NoData("for this school".to_string()));
        }
        Ok(CsvDocument {
            filename: csv_export::school_filename(Some(&school.name)),
            content: self.exporter.to_csv(students, &registry)?,
        })
    }

    fn summarize(&self, school: &School) -> SchoolSummary {
        SchoolSummary {
            registration_url: registration_url(&self.public_url, &school.registration_link),
            completion_percent: school.completion_percent(),
            school: school.clone(),
        }
    }
}

/// Registration form bound to a single school.
#[derive(Clone)]
pub struct SchoolFormSession {
    store: RegistryStore,
    school_id: String,
}

impl SchoolFormSession {
    pub fn school_id(&self) -> &str {
        &self.school_id
    }

    /// Title, next serial preview and photo filename for the form.
    pub async fn form(&self) -> AppResult<RegistrationFormResponse> {
        let registry = self.store.read().await;
        let school = registry
            .school(&self.school_id)
            .ok_or_else(|| AppError::NotFound(format!("School {}", self.school_id)))?;
        let next_serial_no = registry.next_serial_number(&self.school_id)?;

        Ok(RegistrationFormResponse {
            title: format!("{} - Student Registration", school.name),
            photo_filename: format!("{}.jpg", next_serial_no),
            next_serial_no,
            school: school.clone(),
        })
    }

    /// Append a student to the bound school.
    pub async fn add_student(&self, fields: StudentFields) -> AppResult<SubmitStudentResponse> {
        self.store.add_student(self.school_id.clone(), fields).await
    }
}
