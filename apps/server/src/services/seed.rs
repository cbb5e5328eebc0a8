//! Demo records loaded at startup in development.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::error::AppResult;
use crate::models::{SerialPolicy, School, Student};
use crate::services::registry::Registry;

fn demo_school(id: &str, name: &str) -> School {
    School {
        id: id.to_string(),
        name: name.to_string(),
        registration_link: id.to_string(),
        students_count: 0,
        created_date: NaiveDate::from_ymd_opt(2025, 8, 15).unwrap_or_default(),
        total_forms_needed: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn demo_student(
    serial_no: &str,
    name: &str,
    father_name: &str,
    mother_name: &str,
    class: &str,
    roll: &str,
    section: &str,
    date_of_birth: &str,
    address: &str,
    mobile_no: &str,
    submitted: (u32, u32),
) -> Student {
    let (hour, minute) = submitted;
    Student {
        serial_no: serial_no.to_string(),
        name: name.to_string(),
        father_name: father_name.to_string(),
        mother_name: mother_name.to_string(),
        class: class.to_string(),
        roll: roll.to_string(),
        section: section.to_string(),
        date_of_birth: date_of_birth.to_string(),
        address: address.to_string(),
        mobile_no: mobile_no.to_string(),
        photo: format!("{}.jpg", serial_no),
        school_id: "school_001".to_string(),
        submitted_date: Utc
            .with_ymd_and_hms(2025, 8, 15, hour, minute, 0)
            .single()
            .unwrap_or_default(),
    }
}

/// Registry pre-filled with two schools and two students of the first.
pub fn demo_registry(serial_policy: SerialPolicy) -> AppResult<Registry> {
    Registry::from_records(
        serial_policy,
        vec![
            demo_school("school_001", "Green Valley School"),
            demo_school("school_002", "Sunrise Academy"),
        ],
        vec![
            demo_student(
                "01",
                "Arjun Patel",
                "Raj Patel",
                "Priya Patel",
                "10",
                "15",
                "A",
                "2009-05-15",
                "123 Main Street, Mumbai",
                "9876543210",
                (10, 30),
            ),
            demo_student(
                "02",
                "Sneha Sharma",
                "Vikash Sharma",
                "Meera Sharma",
                "9",
                "22",
                "B",
                "2010-03-22",
                "456 Park Road, Delhi",
                "9876543211",
                (11, 15),
            ),
        ],
    )
}
