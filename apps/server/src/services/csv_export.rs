//! CSV serialization of student records.
//!
//! Every field, header included, is wrapped in double quotes with inner quotes
//! doubled. Line breaks inside a field are kept verbatim. Rows are joined with
//! `\n` and the document has no trailing newline.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::config::defaults;
use crate::error::{AppError, AppResult};
use crate::models::Student;
use crate::services::registry::Registry;

/// MIME type of exported documents.
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Filename for the export of every student.
pub const ALL_STUDENTS_FILENAME: &str = "all_students_data.csv";

/// School column value when the owning school no longer exists.
pub const UNKNOWN_SCHOOL: &str = "Unknown";

/// Column titles, in output order.
pub const HEADERS: [&str; 13] = [
    "Serial No",
    "Name",
    "Father Name",
    "Mother Name",
    "Class",
    "Roll",
    "Section",
    "Date of Birth",
    "Address",
    "Mobile No",
    "Photo",
    "School",
    "Submitted Date",
];

/// Filename for the export of one school's students.
///
/// Whitespace runs in the name become a single underscore.
pub fn school_filename(school_name: Option<&str>) -> String {
    let stem = match school_name {
        Some(name) if !name.trim().is_empty() => {
            name.split_whitespace().collect::<Vec<_>>().join("_")
        }
        _ => "school".to_string(),
    };
    format!("{}_students_data.csv", stem)
}

/// Renders students as a CSV document.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    date_format: String,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new(defaults::DATE_FORMAT)
    }
}

impl CsvExporter {
    /// `date_format` is a chrono format string for the "Submitted Date" column.
    ///
    /// Dates are rendered in UTC, not in the local time zone of whoever
    /// downloads the file, so a submission late in the evening can show the
    /// next day's date.
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
        }
    }

    /// Serialize `students` in the given order.
    ///
    /// `registry` is only read, to resolve school names. An empty input yields
    /// the header row alone.
    pub fn to_csv<'a, I>(&self, students: I, registry: &Registry) -> AppResult<String>
    where
        I: IntoIterator<Item = &'a Student>,
    {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(HEADERS)?;

        for student in students {
            let school = registry
                .school(&student.school_id)
                .map(|s| s.name.as_str())
                .unwrap_or(UNKNOWN_SCHOOL);
            let submitted = self.format_date(&student.submitted_date)?;

            writer.write_record([
                student.serial_no.as_str(),
                student.name.as_str(),
                student.father_name.as_str(),
                student.mother_name.as_str(),
                student.class.as_str(),
                student.roll.as_str(),
                student.section.as_str(),
                student.date_of_birth.as_str(),
                student.address.as_str(),
                student.mobile_no.as_str(),
                student.photo.as_str(),
                school,
                submitted.as_str(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Export(e.to_string()))?;
        let mut document =
            String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))?;
        if document.ends_with('\n') {
            document.pop();
        }
        Ok(document)
    }

    fn format_date(&self, date: &DateTime<Utc>) -> AppResult<String> {
        let mut out = String::new();
        write!(out, "{}", date.format(&self.date_format)).map_err(|_| {
            AppError::Export(format!("invalid date format '{}'", self.date_format))
        })?;
        Ok(out)
    }
}
