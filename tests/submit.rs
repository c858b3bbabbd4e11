use axum::{
    Router,
    body::Body,
    http::{
        Request, StatusCode,
        header::{CONTENT_TYPE, LOCATION},
    },
};
use http_body_util::BodyExt;
use tempfile::{TempDir, tempdir};
use tower::ServiceExt;

use flame::{config::Config, router, state::AppState, store::SubmissionRecord};

fn test_app(dir: &TempDir) -> Router {
    let config = Config {
        port: 0,
        submissions_path: dir.path().join("submissions.json"),
        public_dir: dir.path().join("public"),
    };

    router(AppState::with(config))
}

fn submit_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/submit")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn read_log(dir: &TempDir) -> Vec<SubmissionRecord> {
    let bytes = std::fs::read(dir.path().join("submissions.json")).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn submit_appends_record_to_backing_file() {
    let dir = tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(submit_request("name1=Alice&name2=Bob&mode=quick"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let log = read_log(&dir);
    assert_eq!(
        log.last().unwrap(),
        &SubmissionRecord {
            person1: "Alice".to_string(),
            person2: "Bob".to_string(),
            mode: "quick".to_string(),
        }
    );
}

#[tokio::test]
async fn repeated_submits_accumulate_in_order() {
    let dir = tempdir().unwrap();
    let app = test_app(&dir);

    for body in [
        "name1=Alice&name2=Bob&mode=quick",
        "name1=Carol&name2=Dave&mode=full",
    ] {
        let response = app.clone().oneshot(submit_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let log = read_log(&dir);
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].person1, "Alice");
    assert_eq!(log[1].person1, "Carol");
}

#[tokio::test]
async fn blank_name_is_rejected_without_touching_the_store() {
    let dir = tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(submit_request("name1=&name2=p2&mode=m"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!dir.path().join("submissions.json").exists());
}

#[tokio::test]
async fn missing_field_is_rejected_with_its_name() {
    let dir = tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(submit_request("name1=Alice&name2=Bob"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body.as_ref(), b"Missing or empty field: mode");
}

#[tokio::test]
async fn corrupt_backing_file_yields_generic_500() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("submissions.json");
    std::fs::write(&path, "{ not json").unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(submit_request("name1=Alice&name2=Bob&mode=quick"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body.as_ref(), b"Internal error");

    // Prior content stays intact for manual recovery.
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}

#[tokio::test]
async fn root_redirects_to_flame() {
    let dir = tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[LOCATION], "/flame");
}
