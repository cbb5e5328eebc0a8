//! Registration form flow through school links.

use actix_web::test;
use serde_json::Value;
use student_registry_lib::models::SerialPolicy;

use crate::test_helpers::*;

#[actix_rt::test]
async fn test_view_with_token_opens_school_form() {
    let sessions = create_sessions(SerialPolicy::Auto);
    let app = create_test_app(&sessions).await;

    let created = add_school(&app, "Green Valley School").await;
    let link = created["school"]["registrationLink"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/view?school={}", link))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["mode"], "school_form");
    assert_eq!(
        body["form"]["title"],
        "Green Valley School - Student Registration"
    );
    assert_eq!(body["form"]["nextSerialNo"], "01");
    assert_eq!(body["form"]["photoFilename"], "01.jpg");
}

#[actix_rt::test]
async fn test_serials_are_assigned_in_order() {
    let sessions = create_sessions(SerialPolicy::Auto);
    let app = create_test_app(&sessions).await;

    let created = add_school(&app, "Green Valley School").await;
    let link = created["school"]["registrationLink"].as_str().unwrap();

    let (status, first) = submit_student(&app, link, student_body("Arjun Patel", "9876543210")).await;
    assert_eq!(status, 201);
    assert_eq!(first["student"]["serialNo"], "01");
    assert_eq!(first["student"]["photo"], "01.jpg");
    assert_eq!(first["nextSerialNo"], "02");

    let (status, second) =
        submit_student(&app, link, student_body("Sneha Sharma", "98765-43211")).await;
    assert_eq!(status, 201);
    assert_eq!(second["student"]["serialNo"], "02");
    assert_eq!(second["student"]["mobileNo"], "9876543211");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/register/{}", link))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let form: Value = test::read_body_json(resp).await;
    assert_eq!(form["school"]["studentsCount"], 2);
    assert_eq!(form["nextSerialNo"], "03");
}

#[actix_rt::test]
async fn test_short_mobile_number_is_rejected() {
    let sessions = create_sessions(SerialPolicy::Auto);
    let app = create_test_app(&sessions).await;

    let created = add_school(&app, "Green Valley School").await;
    let link = created["school"]["registrationLink"].as_str().unwrap();

    let (status, body) = submit_student(&app, link, student_body("Arjun Patel", "98765432")).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (_, stats) = dashboard_get(&app, "/api/v1/dashboard/stats").await;
    assert_eq!(stats["totalStudents"], 0);

    let (_, list) = dashboard_get(&app, "/api/v1/dashboard/schools").await;
    assert_eq!(list["schools"][0]["studentsCount"], 0);
}

#[actix_rt::test]
async fn test_blank_required_field_is_rejected() {
    let sessions = create_sessions(SerialPolicy::Auto);
    let app = create_test_app(&sessions).await;

    let created = add_school(&app, "Green Valley School").await;
    let link = created["school"]["registrationLink"].as_str().unwrap();

    let mut body = student_body("Arjun Patel", "9876543210");
    body["fatherName"] = Value::String("  ".to_string());

    let (status, body) = submit_student(&app, link, body).await;
    assert_eq!(status, 400);
    assert!(body["message"].as_str().unwrap().contains("Please fill in"));
}

#[actix_rt::test]
async fn test_unknown_link_is_invalid() {
    let sessions = create_sessions(SerialPolicy::Auto);
    let app = create_test_app(&sessions).await;

    let (status, body) =
        submit_student(&app, "not-a-real-link", student_body("Arjun Patel", "9876543210")).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "INVALID_LINK");

    let req = test::TestRequest::get()
        .uri("/api/v1/view?school=not-a-real-link")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_manual_policy_rejects_duplicate_serial() {
    let sessions = create_sessions(SerialPolicy::Manual);
    let app = create_test_app(&sessions).await;

    let created = add_school(&app, "Green Valley School").await;
    let link = created["school"]["registrationLink"].as_str().unwrap();

    let mut first = student_body("Arjun Patel", "9876543210");
    first["serialNo"] = Value::String("07".to_string());
    let (status, _) = submit_student(&app, link, first).await;
    assert_eq!(status, 201);

    let mut duplicate = student_body("Sneha Sharma", "9876543211");
    duplicate["serialNo"] = Value::String("07".to_string());
    let (status, body) = submit_student(&app, link, duplicate).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (_, stats) = dashboard_get(&app, "/api/v1/dashboard/stats").await;
    assert_eq!(stats["totalStudents"], 1);
}
