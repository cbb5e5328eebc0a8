//! In-memory registry of schools and their students.
//!
//! The registry owns both collections and is the only place they are mutated.
//! It is synchronous and holds no locks; `RegistryStore` wraps it for shared use.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{SerialPolicy, School, Student, StudentFields};

/// Number of digits a mobile number must have.
pub const MOBILE_DIGITS: usize = 10;

/// Minimum width of an auto-assigned serial number.
const SERIAL_WIDTH: usize = 2;

/// Separators dropped from a mobile number before it is checked.
const MOBILE_SEPARATORS: &[char] = &[' ', '-', '(', ')', '.'];

/// A school removed by `delete_school`, with the size of the cascade.
#[derive(Debug, Clone)]
pub struct DeletedSchool {
    pub school: School,
    pub students_removed: usize,
}

/// Schools and students held in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    schools: Vec<School>,
    students: Vec<Student>,
    serial_policy: SerialPolicy,
}

impl Registry {
    /// Create an empty registry.
    pub fn new(serial_policy: SerialPolicy) -> Self {
        Self {
            schools: Vec::new(),
            students: Vec::new(),
            serial_policy,
        }
    }

    /// Build a registry from existing records.
    ///
    /// Every student must reference one of `schools` and serials must be unique
    /// per school. Cached counts are recomputed from `students`.
    pub fn from_records(
        serial_policy: SerialPolicy,
        schools: Vec<School>,
        students: Vec<Student>,
    ) -> AppResult<Self> {
        let mut registry = Self::new(serial_policy);
        for school in schools {
            if registry.school(&school.id).is_some() {
                return Err(AppError::Validation(format!(
                    "duplicate school id {}",
                    school.id
                )));
            }
            registry.schools.push(School {
                students_count: 0,
                ..school
            });
        }
        for student in students {
            if registry.school(&student.school_id).is_none() {
                return Err(AppError::NotFound(format!("School {}", student.school_id)));
            }
            if registry.serial_taken(&student.school_id, &student.serial_no) {
                return Err(AppError::Validation(format!(
                    "serial number {} already exists for school {}",
                    student.serial_no, student.school_id
                )));
            }
            let school_id = student.school_id.clone();
            registry.students.push(student);
            registry.recount(&school_id);
        }
        Ok(registry)
    }

    /// Serial numbering policy in effect.
    pub fn serial_policy(&self) -> SerialPolicy {
        self.serial_policy
    }

    /// All schools in creation order.
    pub fn schools(&self) -> &[School] {
        &self.schools
    }

    /// Look up a school by id.
    pub fn school(&self, id: &str) -> Option<&School> {
        self.schools.iter().find(|s| s.id == id)
    }

    /// Add a school named `name`.
    pub fn add_school(
        &mut self,
        name: &str,
        total_forms_needed: Option<u32>,
    ) -> AppResult<School> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("school name must not be empty".to_string()));
        }

        let id = format!("school_{}", Uuid::now_v7().simple());
        let school = School {
            id: id.clone(),
            name: name.to_string(),
            registration_link: id,
            students_count: 0,
            created_date: Utc::now().date_naive(),
            total_forms_needed,
        };
        self.schools.push(school.clone());
        Ok(school)
    }

    /// Remove a school and every student it owns.
    ///
    /// Fails with `NotFound` if no school has this id; nothing is mutated then.
    pub fn delete_school(&mut self, id: &str) -> AppResult<DeletedSchool> {
        let index = self
            .schools
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound(format!("School {}", id)))?;

        let school = self.schools.remove(index);
        let before = self.students.len();
        self.students.retain(|s| s.school_id != school.id);

        Ok(DeletedSchool {
            students_removed: before - self.students.len(),
            school,
        })
    }

    /// Resolve the school a registration link token points at.
    pub fn resolve_school_by_link(&self, token: &str) -> Option<&School> {
        self.schools.iter().find(|s| s.registration_link == token)
    }

    /// Preview the serial number the next student of `school_id` would get.
    ///
    /// Advisory only: nothing is reserved.
    pub fn next_serial_number(&self, school_id: &str) -> AppResult<String> {
        if self.school(school_id).is_none() {
            return Err(AppError::NotFound(format!("School {}", school_id)));
        }
        Ok(format_serial(self.count_students(school_id) + 1))
    }

    /// Validate and append a student to `school_id`.
    pub fn add_student(&mut self, school_id: &str, fields: StudentFields) -> AppResult<Student> {
        self.add_student_at(school_id, fields, Utc::now())
    }

    pub(crate) fn add_student_at(
        &mut self,
        school_id: &str,
        fields: StudentFields,
        submitted_date: DateTime<Utc>,
    ) -> AppResult<Student> {
        let valid = validate_fields(&fields)?;

        if self.school(school_id).is_none() {
            return Err(AppError::NotFound(format!("School {}", school_id)));
        }

        let serial_no = match self.serial_policy {
            SerialPolicy::Auto => format_serial(self.count_students(school_id) + 1),
            SerialPolicy::Manual => {
                let serial = fields.serial_no.as_deref().map(str::trim).unwrap_or("");
                if serial.is_empty() {
                    return Err(AppError::Validation(
                        "Please fill in the serial no field.".to_string(),
                    ));
                }
                serial.to_string()
            }
        };

        if self.serial_taken(school_id, &serial_no) {
            return Err(AppError::Validation(format!(
                "Serial number {} already exists for this school.",
                serial_no
            )));
        }

        let student = Student {
            photo: format!("{}.jpg", serial_no),
            serial_no,
            name: valid.name,
            father_name: valid.father_name,
            mother_name: valid.mother_name,
            class: valid.class,
            roll: valid.roll,
            section: valid.section,
            date_of_birth: valid.date_of_birth,
            address: valid.address,
            mobile_no: valid.mobile_no,
            school_id: school_id.to_string(),
            submitted_date,
        };

        self.students.push(student.clone());
        self.recount(school_id);
        Ok(student)
    }

    /// Students in submission order, optionally only those of one school.
    pub fn list_students(&self, school_id: Option<&str>) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| school_id.is_none_or(|id| s.school_id == id))
            .collect()
    }

    /// Total number of students across all schools.
    pub fn total_students(&self) -> usize {
        self.students.len()
    }

    fn count_students(&self, school_id: &str) -> usize {
        self.students
            .iter()
            .filter(|s| s.school_id == school_id)
            .count()
    }

    fn serial_taken(&self, school_id: &str, serial_no: &str) -> bool {
        self.students
            .iter()
            .any(|s| s.school_id == school_id && s.serial_no == serial_no)
    }

    fn recount(&mut self, school_id: &str) {
        let count = self.count_students(school_id) as u32;
        if let Some(school) = self.schools.iter_mut().find(|s| s.id == school_id) {
            school.students_count = count;
        }
    }
}

/// Zero-pad `n` to at least two digits.
pub fn format_serial(n: usize) -> String {
    format!("{:0width$}", n, width = SERIAL_WIDTH)
}

/// Trimmed, checked copy of the required fields.
struct ValidFields {
    name: String,
    father_name: String,
    mother_name: String,
    class: String,
    roll: String,
    section: String,
    date_of_birth: String,
    address: String,
    mobile_no: String,
}

fn validate_fields(fields: &StudentFields) -> AppResult<ValidFields> {
    let required = [
        ("name", &fields.name),
        ("father name", &fields.father_name),
        ("mother name", &fields.mother_name),
        ("class", &fields.class),
        ("roll", &fields.roll),
        ("section", &fields.section),
        ("date of birth", &fields.date_of_birth),
        ("address", &fields.address),
        ("mobile no", &fields.mobile_no),
    ];
    for (label, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "Please fill in the {} field.",
                label
            )));
        }
    }

    Ok(ValidFields {
        name: fields.name.trim().to_string(),
        father_name: fields.father_name.trim().to_string(),
        mother_name: fields.mother_name.trim().to_string(),
        class: fields.class.trim().to_string(),
        roll: fields.roll.trim().to_string(),
        section: fields.section.trim().to_string(),
        date_of_birth: fields.date_of_birth.trim().to_string(),
        address: fields.address.trim().to_string(),
        mobile_no: normalize_mobile(&fields.mobile_no)?,
    })
}

/// Strip separators and require exactly `MOBILE_DIGITS` ASCII digits.
pub fn normalize_mobile(raw: &str) -> AppResult<String> {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| !MOBILE_SEPARATORS.contains(c))
        .collect();

    if digits.len() != MOBILE_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Please enter a valid 10-digit mobile number.".to_string(),
        ));
    }
    Ok(digits)
}
