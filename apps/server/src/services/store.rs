//! Shared registry handle and the asynchronous submission boundary.
//!
//! Mutations that came from a form (adding a school, submitting a student)
//! complete after a simulated latency, bounded by a timeout. The registry is
//! only touched once the latency has elapsed, inside a single write-lock
//! section, so a submission that times out or whose future is dropped leaves
//! no trace.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{info, warn};

use crate::config::SubmissionTiming;
use crate::error::{AppError, AppResult};
use crate::models::{School, StudentFields, SubmitStudentResponse};
use crate::services::registry::{DeletedSchool, Registry};

/// Clonable, thread-safe handle to the registry.
#[derive(Clone)]
pub struct RegistryStore {
    registry: Arc<RwLock<Registry>>,
    timing: SubmissionTiming,
}

impl RegistryStore {
    pub fn new(registry: Registry, timing: SubmissionTiming) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
            timing,
        }
    }

    /// Shared read access for lookups, listings and export.
    pub async fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().await
    }

    /// Add a school after the configured school latency.
    pub async fn add_school(
        &self,
        name: String,
        total_forms_needed: Option<u32>,
    ) -> AppResult<School> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("school name must not be empty".to_string()));
        }

        let school = self
            .commit_after(self.timing.school_latency, "add school", |registry| {
                registry.add_school(&name, total_forms_needed)
            })
            .await?;

        info!(school_id = %school.id, name = %school.name, "School added");
        Ok(school)
    }

    /// Submit a student after the configured student latency.
    ///
    /// Serial assignment, the duplicate check, the count update and the next
    /// serial preview happen in the same critical section as the insert.
    pub async fn add_student(
        &self,
        school_id: String,
        fields: StudentFields,
    ) -> AppResult<SubmitStudentResponse> {
        let submitted = self
            .commit_after(self.timing.student_latency, "submit student", |registry| {
                let student = registry.add_student(&school_id, fields)?;
                let next_serial_no = registry.next_serial_number(&school_id)?;
                Ok(SubmitStudentResponse {
                    student,
                    next_serial_no,
                })
            })
            .await?;

        info!(
            school_id = %submitted.student.school_id,
            serial_no = %submitted.student.serial_no,
            "Student submitted"
        );
        Ok(submitted)
    }

    /// Remove a school and its students in one step.
    pub async fn delete_school(&self, id: &str) -> AppResult<DeletedSchool> {
        let deleted = self.registry.write().await.delete_school(id)?;
        info!(
            school_id = %deleted.school.id,
            students_removed = deleted.students_removed,
            "School deleted"
        );
        Ok(deleted)
    }

    async fn commit_after<T, F>(&self, latency: Duration, what: &str, commit: F) -> AppResult<T>
    where
        F: FnOnce(&mut Registry) -> AppResult<T>,
    {
        let pending = async {
            tokio::time::sleep(latency).await;
            let mut registry = self.registry.write().await;
            commit(&mut *registry)
        };

        with_timeout(self.timing.timeout, what, pending).await
    }
}

async fn with_timeout<T>(
    limit: Duration,
    what: &str,
    pending: impl Future<Output = AppResult<T>>,
) -> AppResult<T> {
    match tokio::time::timeout(limit, pending).await {
        Ok(result) => result,
        Err(_) => {
            warn!(operation = what, timeout_ms = %limit.as_millis(), "Pending operation abandoned");
            Err(AppError::Timeout(format!(
                "{} did not complete within {} ms",
                what,
                limit.as_millis()
            )))
        }
    }
}
