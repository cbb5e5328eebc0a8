//! Shared test helpers for registry E2E tests.

use actix_web::{App, dev::ServiceResponse, test, web};
use serde_json::{Value, json};
use student_registry_lib::auth::AdminKey;
use student_registry_lib::config::SubmissionTiming;
use student_registry_lib::middleware::RequestLogger;
use student_registry_lib::models::SerialPolicy;
use student_registry_lib::services::{CsvExporter, Registry, RegistryStore, Sessions};

/// Dashboard key used in tests.
pub const TEST_ADMIN_KEY: &str = "test-admin-key-for-registry-e2e";

/// Public URL registration links are built on in tests.
pub const TEST_PUBLIC_URL: &str = "http://forms.test/";

/// Fresh, empty sessions with no latency.
pub fn create_sessions(policy: SerialPolicy) -> Sessions {
    Sessions::new(
        RegistryStore::new(Registry::new(policy), SubmissionTiming::immediate()),
        TEST_PUBLIC_URL.to_string(),
        CsvExporter::default(),
    )
}

/// Create a test app around `sessions`.
pub async fn create_test_app(
    sessions: &Sessions,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .wrap(RequestLogger)
            .app_data(web::Data::new(sessions.clone()))
            .app_data(web::Data::new(AdminKey::new(Some(TEST_ADMIN_KEY.to_string()))))
            .service(
                web::scope("/api/v1").configure(student_registry_lib::api::configure_routes),
            ),
    )
    .await
}

/// Complete, valid form fields with the given name and mobile number.
pub fn student_body(name: &str, mobile: &str) -> Value {
    json!({
        "studentName": name,
        "fatherName": "Raj Patel",
        "motherName": "Priya Patel",
        "class": "10",
        "roll": "15",
        "section": "A",
        "dateOfBirth": "2009-05-15",
        "address": "123 Main Street, Mumbai",
        "mobileNo": mobile,
    })
}

/// Add a school through the dashboard API and return the response body.
pub async fn add_school<S>(app: &S, name: &str) -> Value
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/dashboard/schools")
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .set_json(json!({ "name": name }))
        .to_request();

    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(status, 201, "Failed to add school: {}", body);
    body
}

/// Submit a student through a registration link; returns status and body.
pub async fn submit_student<S>(app: &S, token: &str, body: Value) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/register/{}/students", token))
        .set_json(body)
        .to_request();

    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// GET a dashboard route with the test key; returns status and JSON body.
pub async fn dashboard_get<S>(app: &S, uri: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::get()
        .uri(uri)
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .to_request();

    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}
