use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::Router;
use dogs_api::mount;
use dogs_api::services::adapters::SqliteDogStore;
use http_body_util::BodyExt;
use kennel_core::KennelApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn router() -> Router {
    let store = SqliteDogStore::connect("sqlite::memory:").await.unwrap();
    mount(KennelApp::new(), Arc::new(store)).into_router()
}

async fn json_body(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn with_json(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn without_body(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

const FIDO: &str = r#"{"name":"Fido","description":"Good boy","breed":"Lab","age":3}"#;

async fn create_fido(router: &Router) -> Value {
    let res = router.clone().oneshot(with_json("POST", "/dogs", FIDO)).await.unwrap();
    assert_eq!(res.status().as_u16(), 201);
    json_body(res).await
}

#[tokio::test]
async fn root_and_health_respond() {
    let router = router().await;

    let res = router.clone().oneshot(without_body("GET", "/")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(json_body(res).await, json!({"message": "Hello World!"}));

    let res = router.oneshot(without_body("GET", "/health")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(text_body(res).await, "ok");
}

#[tokio::test]
async fn create_returns_201_with_assigned_id() {
    let router = router().await;

    let res = router.oneshot(with_json("POST", "/dogs", FIDO)).await.unwrap();

    assert_eq!(res.status().as_u16(), 201);
    assert!(res.headers().get("x-request-id").is_some());
    let body = json_body(res).await;
    assert!(body["id"].is_i64());
    assert_eq!(body["name"], "Fido");
    assert_eq!(body["description"], "Good boy");
    assert_eq!(body["breed"], "Lab");
    assert_eq!(body["age"], 3);
}

#[tokio::test]
async fn created_dog_reads_back_identically() {
    let router = router().await;
    let created = create_fido(&router).await;

    let uri = format!("/dogs/{}", created["id"]);
    let res = router.clone().oneshot(without_body("GET", &uri)).await.unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(json_body(res).await, created);

    let res = router.oneshot(without_body("GET", "/dogs")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(json_body(res).await, json!([created]));
}

#[tokio::test]
async fn list_is_empty_initially() {
    let router = router().await;

    let res = router.oneshot(without_body("GET", "/dogs")).await.unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(json_body(res).await, json!([]));
}

#[tokio::test]
async fn invalid_id_is_rejected_on_every_id_route() {
    let router = router().await;

    for req in [
        without_body("GET", "/dogs/abc"),
        with_json("PATCH", "/dogs/abc", r#"{"age":4}"#),
        without_body("DELETE", "/dogs/abc"),
    ] {
        let res = router.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status().as_u16(), 400);
        assert_eq!(json_body(res).await, json!({"message": "id should be a number"}));
    }
}

#[tokio::test]
async fn invalid_create_lists_every_violation_and_persists_nothing() {
    let router = router().await;

    let res = router
        .clone()
        .oneshot(with_json("POST", "/dogs", r#"{"name":"Fido","age":"three","color":"brown"}"#))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 400);
    assert_eq!(
        json_body(res).await,
        json!({"errors": [
            "description should be a string",
            "breed should be a string",
            "age should be a number",
            "'color' is not a valid key"
        ]})
    );

    let res = router.oneshot(without_body("GET", "/dogs")).await.unwrap();
    assert_eq!(json_body(res).await, json!([]));
}

#[tokio::test]
async fn fractional_age_is_rejected() {
    let router = router().await;

    let res = router
        .oneshot(with_json(
            "POST",
            "/dogs",
            r#"{"name":"Fido","description":"Good boy","breed":"Lab","age":3.5}"#,
        ))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 400);
    assert_eq!(json_body(res).await, json!({"errors": ["age should be a whole number"]}));
}

#[tokio::test]
async fn whole_number_ages_written_as_floats_are_accepted() {
    let router = router().await;

    for (age, stored) in [("3.0", 3), ("1e2", 100)] {
        let body = format!(r#"{{"name":"Fido","description":"Good boy","breed":"Lab","age":{age}}}"#);
        let res = router.clone().oneshot(with_json("POST", "/dogs", &body)).await.unwrap();

        assert_eq!(res.status().as_u16(), 201, "age {age}");
        let created = json_body(res).await;
        assert_eq!(created["age"], json!(stored));

        let uri = format!("/dogs/{}", created["id"]);
        let res = router
            .clone()
            .oneshot(with_json("PATCH", &uri, &format!(r#"{{"age":{age}}}"#)))
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 200);
        assert_eq!(json_body(res).await["age"], json!(stored));
    }
}

#[tokio::test]
async fn non_object_body_is_rejected() {
    let router = router().await;

    let res = router.oneshot(with_json("POST", "/dogs", "[1, 2]")).await.unwrap();

    assert_eq!(res.status().as_u16(), 400);
    let body = json_body(res).await;
    assert_eq!(body["errors"][0], "request body should be an object");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let router = router().await;

    let res = router
        .oneshot(with_json("POST", "/dogs", r#"{"name":"Fido""#))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 400);
    let body = json_body(res).await;
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn bad_id_is_reported_before_a_malformed_update_body() {
    let router = router().await;

    let res = router.oneshot(with_json("PATCH", "/dogs/abc", "{")).await.unwrap();

    assert_eq!(res.status().as_u16(), 400);
    assert_eq!(json_body(res).await, json!({"message": "id should be a number"}));
}

#[tokio::test]
async fn partial_update_changes_only_given_fields() {
    let router = router().await;
    let created = create_fido(&router).await;
    let uri = format!("/dogs/{}", created["id"]);

    let res = router
        .clone()
        .oneshot(with_json("PATCH", &uri, r#"{"age":4}"#))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    let mut expected = created.clone();
    expected["age"] = json!(4);
    assert_eq!(json_body(res).await, expected);

    let res = router.oneshot(without_body("GET", &uri)).await.unwrap();
    assert_eq!(json_body(res).await, expected);
}

#[tokio::test]
async fn update_rejects_unknown_and_mistyped_fields() {
    let router = router().await;
    let created = create_fido(&router).await;
    let uri = format!("/dogs/{}", created["id"]);

    let res = router
        .clone()
        .oneshot(with_json("PATCH", &uri, r#"{"breed":7,"id":9}"#))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 400);
    assert_eq!(
        json_body(res).await,
        json!({"errors": ["breed should be a string", "'id' is not a valid key"]})
    );

    let res = router.oneshot(without_body("GET", &uri)).await.unwrap();
    assert_eq!(json_body(res).await, created);
}

#[tokio::test]
async fn updating_a_missing_dog_is_not_found() {
    let router = router().await;

    let res = router
        .oneshot(with_json("PATCH", "/dogs/999", r#"{"age":4}"#))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 404);
    assert_eq!(json_body(res).await, json!({"error": "Dog not found"}));
}

#[tokio::test]
async fn reading_a_missing_dog_is_no_content() {
    let router = router().await;

    let res = router.oneshot(without_body("GET", "/dogs/999")).await.unwrap();

    assert_eq!(res.status().as_u16(), 204);
    assert!(text_body(res).await.is_empty());
}

#[tokio::test]
async fn deleting_returns_prior_state_then_no_content() {
    let router = router().await;
    let created = create_fido(&router).await;
    let uri = format!("/dogs/{}", created["id"]);

    let res = router.clone().oneshot(without_body("DELETE", &uri)).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(json_body(res).await, created);

    let res = router.clone().oneshot(without_body("GET", &uri)).await.unwrap();
    assert_eq!(res.status().as_u16(), 204);

    let res = router.oneshot(without_body("DELETE", &uri)).await.unwrap();
    assert_eq!(res.status().as_u16(), 204);
    assert!(text_body(res).await.is_empty());
}

#[tokio::test]
async fn unsupported_methods_are_not_allowed() {
    let router = router().await;

    let res = router.oneshot(with_json("PUT", "/dogs/1", FIDO)).await.unwrap();

    assert_eq!(res.status().as_u16(), 405);
}

#[tokio::test]
async fn provided_request_id_is_echoed() {
    let router = router().await;
    let provided = HeaderValue::from_static("dogs-req-1");

    let mut req = without_body("GET", "/dogs");
    req.headers_mut().insert("x-request-id", provided.clone());
    let res = router.oneshot(req).await.unwrap();

    assert_eq!(res.headers().get("x-request-id").unwrap(), &provided);
}
