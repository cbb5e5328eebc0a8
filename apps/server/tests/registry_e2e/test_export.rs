//! CSV export downloads.

use actix_web::{http::header, test};
use serde_json::Value;
use student_registry_lib::models::SerialPolicy;

use crate::test_helpers::*;

const EXPECTED_HEADERS: [&str; 13] = [
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

async fn download<S>(app: &S, uri: &str) -> (u16, Option<String>, String)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::get()
        .uri(uri)
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = test::read_body(resp).await;
    (status, disposition, String::from_utf8(body.to_vec()).unwrap())
}

#[actix_rt::test]
async fn test_export_without_students_is_no_data() {
    let sessions = create_sessions(SerialPolicy::Auto);
    let app = create_test_app(&sessions).await;

    let created = add_school(&app, "Green Valley School").await;
    let school_id = created["school"]["id"].as_str().unwrap();

    for uri in [
        "/api/v1/dashboard/export".to_string(),
        format!("/api/v1/dashboard/schools/{}/export", school_id),
    ] {
        let (status, _, body) = download(&app, &uri).await;
        assert_eq!(status, 404, "{uri}");
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"], "NO_DATA", "{uri}");
    }
}

#[actix_rt::test]
async fn test_export_school_csv() {
    let sessions = create_sessions(SerialPolicy::Auto);
    let app = create_test_app(&sessions).await;

    let created = add_school(&app, "Green Valley School").await;
    let school_id = created["school"]["id"].as_str().unwrap();
    let link = created["school"]["registrationLink"].as_str().unwrap();

    let mut quoted = student_body("Arjun Patel", "9876543210");
    quoted["address"] = Value::String("He said \"hi\", then left".to_string());
    let (status, _) = submit_student(&app, link, quoted).await;
    assert_eq!(status, 201);

    let (status, disposition, body) = download(
        &app,
        &format!("/api/v1/dashboard/schools/{}/export", school_id),
    )
    .await;
    assert_eq!(status, 200);
    let disposition = disposition.unwrap();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("Green_Valley_School_students_data.csv"));

    // Every field is quoted, embedded quotes are doubled.
    assert!(body.starts_with("\"Serial No\",\"Name\""));
    assert!(body.contains("\"He said \"\"hi\"\", then left\""));

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    assert_eq!(headers, EXPECTED_HEADERS);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "01");
    assert_eq!(&rows[0][1], "Arjun Patel");
    assert_eq!(&rows[0][8], "He said \"hi\", then left");
    assert_eq!(&rows[0][10], "01.jpg");
    assert_eq!(&rows[0][11], "Green Valley School");
}

#[actix_rt::test]
async fn test_export_all_spans_schools() {
    let sessions = create_sessions(SerialPolicy::Auto);
    let app = create_test_app(&sessions).await;

    let green = add_school(&app, "Green Valley School").await;
    let sunrise = add_school(&app, "Sunrise Academy").await;
    let green_link = green["school"]["registrationLink"].as_str().unwrap();
    let sunrise_link = sunrise["school"]["registrationLink"].as_str().unwrap();

    submit_student(&app, green_link, student_body("Arjun Patel", "9876543210")).await;
    submit_student(&app, sunrise_link, student_body("Sneha Sharma", "9876543211")).await;

    let (status, disposition, body) = download(&app, "/api/v1/dashboard/export").await;
    assert_eq!(status, 200);
    assert!(disposition.unwrap().contains("all_students_data.csv"));
    assert!(!body.ends_with('\n'));

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let schools: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[11].to_string())
        .collect();
    assert_eq!(schools, ["Green Valley School", "Sunrise Academy"]);
}
