//! Dashboard access control, school management and cascade delete.

use actix_web::test;
use serde_json::{Value, json};
use student_registry_lib::models::SerialPolicy;

use crate::test_helpers::*;

#[actix_rt::test]
async fn test_dashboard_requires_admin_key() {
    let sessions = create_sessions(SerialPolicy::Auto);
    let app = create_test_app(&sessions).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/dashboard/schools")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::post()
        .uri("/api/v1/dashboard/schools")
        .insert_header(("X-Admin-Key", "wrong-key"))
        .set_json(json!({ "name": "Green Valley School" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    // Nothing was created by the rejected request.
    let (_, stats) = dashboard_get(&app, "/api/v1/dashboard/stats").await;
    assert_eq!(stats["totalSchools"], 0);
}

#[actix_rt::test]
async fn test_add_school_returns_registration_url() {
    let sessions = create_sessions(SerialPolicy::Auto);
    let app = create_test_app(&sessions).await;

    let created = add_school(&app, "  Green Valley School  ").await;
    let link = created["school"]["registrationLink"].as_str().unwrap();

    assert_eq!(created["school"]["name"], "Green Valley School");
    assert_eq!(created["school"]["studentsCount"], 0);
    assert_eq!(
        created["registrationUrl"],
        format!("{}?school={}", TEST_PUBLIC_URL, link)
    );

    let (status, list) = dashboard_get(&app, "/api/v1/dashboard/schools").await;
    assert_eq!(status, 200);
    assert_eq!(list["schools"].as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_add_school_rejects_blank_name() {
    let sessions = create_sessions(SerialPolicy::Auto);
    let app = create_test_app(&sessions).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/dashboard/schools")
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .set_json(json!({ "name": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_rt::test]
async fn test_delete_school_cascades_and_invalidates_link() {
    let sessions = create_sessions(SerialPolicy::Auto);
    let app = create_test_app(&sessions).await;

    let doomed = add_school(&app, "Green Valley School").await;
    let kept = add_school(&app, "Sunrise Academy").await;
    let doomed_id = doomed["school"]["id"].as_str().unwrap();
    let doomed_link = doomed["school"]["registrationLink"].as_str().unwrap();
    let kept_link = kept["school"]["registrationLink"].as_str().unwrap();

    for name in ["Arjun Patel", "Sneha Sharma"] {
        let (status, _) = submit_student(&app, doomed_link, student_body(name, "9876543210")).await;
        assert_eq!(status, 201);
    }
    let (status, _) = submit_student(&app, kept_link, student_body("Rahul Verma", "9123456780")).await;
    assert_eq!(status, 201);

    // The request step only previews the cascade.
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/dashboard/schools/{}/delete-request", doomed_id))
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let preview: Value = test::read_body_json(resp).await;
    assert_eq!(preview["studentsToRemove"], 2);

    let (_, stats) = dashboard_get(&app, "/api/v1/dashboard/stats").await;
    assert_eq!(stats["totalSchools"], 2);
    assert_eq!(stats["totalStudents"], 3);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/dashboard/schools/{}", doomed_id))
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let deleted: Value = test::read_body_json(resp).await;
    assert_eq!(deleted["schoolId"], doomed_id);
    assert_eq!(deleted["studentsRemoved"], 2);

    let (_, stats) = dashboard_get(&app, "/api/v1/dashboard/stats").await;
    assert_eq!(stats["totalSchools"], 1);
    assert_eq!(stats["totalStudents"], 1);

    // The old link no longer resolves.
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/view?school={}", doomed_link))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_LINK");
    assert_eq!(body["redirect"], "/");
}

#[actix_rt::test]
async fn test_delete_unknown_school_is_not_found() {
    let sessions = create_sessions(SerialPolicy::Auto);
    let app = create_test_app(&sessions).await;

    let req = test::TestRequest::delete()
        .uri("/api/v1/dashboard/schools/school_missing")
        .insert_header(("X-Admin-Key", TEST_ADMIN_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_rt::test]
async fn test_view_without_token_is_dashboard() {
    let sessions = create_sessions(SerialPolicy::Auto);
    let app = create_test_app(&sessions).await;

    for uri in ["/api/v1/view", "/api/v1/view?school="] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200, "{uri}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["mode"], "dashboard", "{uri}");
        assert!(body.get("form").is_none(), "{uri}");
    }
}
