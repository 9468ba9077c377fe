mod common;

use reqwest::StatusCode;

// ── Health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

// ── Requesting a code ───────────────────────────────────────────

#[tokio::test]
async fn send_code_returns_six_digit_code() {
    let app = common::spawn_app().await;

    let (body, status) = app.send_code("a@b.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let code = body["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    let numeric: u32 = code.parse().expect("code is not numeric");
    assert!((100_000..=999_999).contains(&numeric));
}

#[tokio::test]
async fn send_code_requires_email() {
    let app = common::spawn_app().await;

    let (body, status) = app.send_code("").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "email required");
}

#[tokio::test]
async fn send_code_rate_limited_per_email() {
    let app = common::spawn_app().await;

    for _ in 0..5 {
        let (_, status) = app.send_code("limited@test.com").await;
        assert_eq!(status, StatusCode::OK);
    }

    let (body, status) = app.send_code("limited@test.com").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["success"], false);

    // Other emails are unaffected
    let (_, status) = app.send_code("other@test.com").await;
    assert_eq!(status, StatusCode::OK);
}

// ── Verifying a code ────────────────────────────────────────────

#[tokio::test]
async fn full_reset_flow() {
    let app = common::spawn_app().await;

    let code = app.request_code("a@b.com").await;

    // Correct code verifies exactly once
    let (body, status) = app.verify_code("a@b.com", &code).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    // Replay fails
    let (body, status) = app.verify_code("a@b.com", &code).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "code already used");
}

#[tokio::test]
async fn verify_requires_both_fields() {
    let app = common::spawn_app().await;

    let (body, status) = app.verify_code("a@b.com", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "email and code are required");

    let (_, status) = app.verify_code("", "123456").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn verify_unknown_email_fails() {
    let app = common::spawn_app().await;

    let (body, status) = app.verify_code("nobody@test.com", "123456").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid or expired code");
}

#[tokio::test]
async fn wrong_code_does_not_consume_token() {
    let app = common::spawn_app().await;

    let code = app.request_code("a@b.com").await;

    // "0" can never collide with a 6-digit code
    let (body, status) = app.verify_code("a@b.com", "0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid code");

    // The correct code still works
    let (_, status) = app.verify_code("a@b.com", &code).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn reissue_supersedes_previous_code() {
    let app = common::spawn_app().await;

    let first = app.request_code("a@b.com").await;
    let second = app.request_code("a@b.com").await;

    if first != second {
        let (_, status) = app.verify_code("a@b.com", &first).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (_, status) = app.verify_code("a@b.com", &second).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn email_is_normalized() {
    let app = common::spawn_app().await;

    let code = app.request_code("  User@Example.COM ").await;

    let (_, status) = app.verify_code("user@example.com", &code).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn verify_rate_limited_after_repeated_failures() {
    let app = common::spawn_app().await;

    let code = app.request_code("brute@test.com").await;

    for _ in 0..10 {
        let (_, status) = app.verify_code("brute@test.com", "0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // Locked out even with the correct code
    let (body, status) = app.verify_code("brute@test.com", &code).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["success"], false);
}
