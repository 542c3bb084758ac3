mod common;

use std::str::FromStr;

use axum::http::{Method, StatusCode};
use common::{response_json, TestApp};
use garage_api::entities::{JobStatus, UserRole};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

fn money(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        other => Decimal::from_str(&other.to_string()).unwrap(),
    }
}

#[tokio::test]
async fn health_needs_no_token() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn api_rejects_missing_or_bad_tokens() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/api/v1/job-cards", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["code"], "unauthorized");

    let response = app
        .request(Method::GET, "/api/v1/job-cards", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_edit_and_list_over_http() {
    let app = TestApp::new().await;
    let token = app.token_for(app.seed.staff, UserRole::Staff);

    let response = app
        .request(
            Method::POST,
            "/api/v1/job-cards",
            Some(json!({
                "customer_id": app.seed.alice,
                "vehicle_id": app.seed.alice_car,
                "mechanic_notes": "squeaky brakes"
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let job = response_json(response).await;
    assert_eq!(job["status"], "OPEN");
    assert_eq!(job["job_no"], 1);
    let id = job["id"].as_i64().unwrap();

    let response = app
        .request(
            Method::POST,
            &format!("/api/v1/job-cards/{id}/line-items"),
            Some(json!({
                "changes": [
                    { "op": "add", "kind": "service", "description": "Brake service",
                      "unit_price": "500", "quantity": "1" },
                    { "op": "add", "kind": "part", "description": "Brake pad",
                      "part_number": "BP-220", "unit_price": "300", "quantity": "2" }
                ]
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let details = response_json(response).await;
    assert_eq!(money(&details["job"]["tax_amount"]), dec!(198));
    assert_eq!(money(&details["job"]["grand_total"]), dec!(1298));
    assert_eq!(details["parts"][0]["part_number"], "BP-220");

    let part_id = details["parts"][0]["id"].as_i64().unwrap();
    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/job-cards/{id}/line-items/part/{part_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let details = response_json(response).await;
    assert_eq!(money(&details["job"]["grand_total"]), dec!(590));

    let response = app
        .request(
            Method::GET,
            "/api/v1/job-cards?status=OPEN&per_page=5",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = response_json(response).await;
    assert_eq!(page["pagination"]["total"], 1);
    assert_eq!(page["pagination"]["per_page"], 5);
    assert_eq!(page["data"][0]["id"], id);
}

#[tokio::test]
async fn locked_job_answers_forbidden() {
    let app = TestApp::new().await;
    let job = app.job_in_status(JobStatus::Completed).await;
    let token = app.token_for(app.seed.mechanic, UserRole::Mechanic);

    let response = app
        .request(
            Method::PUT,
            &format!("/api/v1/job-cards/{}/notes", job.id),
            Some(json!({ "notes": "too late" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(response_json(response).await["code"], "job_locked");

    let response = app
        .request(
            Method::POST,
            &format!("/api/v1/job-cards/{}/status", job.id),
            Some(json!({ "status": "IN_PROGRESS" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(response_json(response).await["code"], "forbidden_transition");
}

#[tokio::test]
async fn status_errors_map_to_bad_request() {
    let app = TestApp::new().await;
    let job = app.open_job().await;
    let token = app.token_for(app.seed.admin, UserRole::Admin);

    for status in ["BILLED", "ON_HOLD"] {
        let response = app
            .request(
                Method::POST,
                &format!("/api/v1/job-cards/{}/status", job.id),
                Some(json!({ "status": status })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn assigning_a_customer_is_unprocessable() {
    let app = TestApp::new().await;
    let job = app.open_job().await;
    let token = app.token_for(app.seed.staff, UserRole::Staff);

    let response = app
        .request(
            Method::POST,
            &format!("/api/v1/job-cards/{}/assign", job.id),
            Some(json!({ "mechanic_id": app.seed.customer_user })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response_json(response).await["code"], "invalid_mechanic");
}

#[tokio::test]
async fn trash_round_trip_over_http() {
    let app = TestApp::new().await;
    let job = app.open_job().await;
    let token = app.token_for(app.seed.staff, UserRole::Staff);

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/job-cards/{}", job.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(
            Method::GET,
            &format!("/api/v1/job-cards/{}", job.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .request(Method::GET, "/api/v1/job-cards/trash", None, Some(&token))
        .await;
    let trash = response_json(response).await;
    assert_eq!(trash.as_array().map(Vec::len), Some(1));

    let response = app
        .request(
            Method::POST,
            &format!("/api/v1/job-cards/{}/restore", job.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response_json(response).await["deleted_at"].is_null());
}

#[tokio::test]
async fn tax_rate_endpoint_is_admin_only() {
    let app = TestApp::new().await;
    app.open_job().await;

    let staff = app.token_for(app.seed.staff, UserRole::Staff);
    let response = app
        .request(
            Method::PUT,
            "/api/v1/settings/tax-rate",
            Some(json!({ "tax_rate": "28" })),
            Some(&staff),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin = app.token_for(app.seed.admin, UserRole::Admin);
    let response = app
        .request(
            Method::PUT,
            "/api/v1/settings/tax-rate",
            Some(json!({ "tax_rate": "28" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let update = response_json(response).await;
    assert_eq!(update["jobs_recomputed"], 1);

    let response = app
        .request(Method::GET, "/api/v1/settings/tax-rate", None, Some(&staff))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(money(&response_json(response).await["tax_rate"]), dec!(28));
}
