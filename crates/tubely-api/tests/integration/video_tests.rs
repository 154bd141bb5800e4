//! Video record endpoints, resolution and health.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use tubely_db::VideoRepository;
use tubely_models::{UserId, Video};

use super::support::*;

#[tokio::test]
async fn health_endpoints() {
    let app = TestApp::new();
    for uri in ["/health", "/healthz"] {
        let (status, body) = app.send(get(uri, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }
}

#[tokio::test]
async fn metrics_route_absent_when_disabled() {
    let app = TestApp::new();
    let (status, _) = app.send(get("/metrics", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = TestApp::new();
    let response = tower::ServiceExt::oneshot(
        app.router.clone(),
        axum::http::Request::builder()
            .uri("/health")
            .header("x-request-id", "req-123")
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-request-id"], "req-123");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
}

#[tokio::test]
async fn create_and_fetch_draft() {
    let app = TestApp::new();
    let owner = UserId::new();
    let token = app.token(&owner);

    let (status, created) = app
        .send(post_json(
            "/api/videos",
            &token,
            json!({"title": "Boots", "description": "A pair of boots"}),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["user_id"], owner.to_string());
    assert!(created["video_url"].is_null());

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = app
        .send(get(&format!("/api/videos/{}", id), Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_requires_title() {
    let app = TestApp::new();
    let token = app.token(&UserId::new());

    let (status, _) = app
        .send(post_json("/api/videos", &token, json!({"title": "   "})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_requires_token() {
    let app = TestApp::new();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/videos")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(json!({"title": "Boots"}).to_string()))
        .unwrap();

    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_returns_only_callers_videos_resolved() {
    let app = TestApp::new();
    let owner = UserId::new();

    let mut published = Video::new(owner, "Published", "");
    published.video_url = Some(format!("{},portrait/abc.mp4", BUCKET));
    app.videos.create(&published).await.unwrap();
    let draft = app.seed_video(owner).await;
    app.seed_video(UserId::new()).await;

    let (status, body) = app.send(get("/api/videos", Some(&app.token(&owner)))).await;
    assert_eq!(status, StatusCode::OK);

    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);

    let find = |id: &str| items.iter().find(|v| v["id"] == id).unwrap();
    assert_eq!(
        find(&published.id.to_string())["video_url"],
        format!("{}/{}/portrait/abc.mp4?X-Amz-Expires=3600", SIGNER, BUCKET)
    );
    assert!(find(&draft.id.to_string())["video_url"].is_null());

    // Resolution never touches the stored record
    assert_eq!(app.stored(&published).await.unwrap(), published);
}

#[tokio::test]
async fn legacy_url_location_resolves_against_its_bucket() {
    let app = TestApp::new();
    let owner = UserId::new();
    let mut video = Video::new(owner, "Legacy", "");
    video.video_url =
        Some("https://old-bucket.s3.eu-north-1.amazonaws.com/landscape/abc.mp4".to_string());
    app.videos.create(&video).await.unwrap();

    let (status, body) = app
        .send(get(&format!("/api/videos/{}", video.id), Some(&app.token(&owner))))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["video_url"],
        format!("{}/old-bucket/landscape/abc.mp4?X-Amz-Expires=3600", SIGNER)
    );
}

#[tokio::test]
async fn malformed_location_is_internal_error() {
    let app = TestApp::new();
    let owner = UserId::new();
    let mut video = Video::new(owner, "Broken", "");
    video.video_url = Some("no-separator".to_string());
    app.videos.create(&video).await.unwrap();

    let (status, _) = app
        .send(get(&format!("/api/videos/{}", video.id), Some(&app.token(&owner))))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn get_checks_existence_then_ownership() {
    let app = TestApp::new();
    let owner = UserId::new();
    let video = app.seed_video(owner).await;
    let other = app.token(&UserId::new());

    let (status, _) = app
        .send(get(&format!("/api/videos/{}", Uuid::new_v4()), Some(&other)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(get(&format!("/api/videos/{}", video.id), Some(&other)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(get("/api/videos/not-a-uuid", Some(&other)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_owned_record() {
    let app = TestApp::new();
    let owner = UserId::new();
    let video = app.seed_video(owner).await;
    let uri = format!("/api/videos/{}", video.id);

    let (status, _) = app.send(delete(&uri, &app.token(&UserId::new()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(app.stored(&video).await.is_some());

    let (status, body) = app.send(delete(&uri, &app.token(&owner))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    assert!(app.stored(&video).await.is_none());

    let (status, _) = app.send(get(&uri, Some(&app.token(&owner)))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
