use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use medcare_reset::config::Config;

/// A running test server instance with reset codes exposed in responses.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Request a reset code for an email, return body + status.
    pub async fn send_code(&self, email: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/auth/send-reset-code"))
            .json(&json!({ "email": email }))
            .send()
            .await
            .expect("send-reset-code request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit a code for verification, return body + status.
    pub async fn verify_code(&self, email: &str, code: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/v1/auth/verify-reset-code"))
            .json(&json!({ "email": email, "code": code }))
            .send()
            .await
            .expect("verify-reset-code request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Request a code and return it from the demo-mode response.
    pub async fn request_code(&self, email: &str) -> String {
        let (body, status) = self.send_code(email).await;
        assert_eq!(status, StatusCode::OK, "send-reset-code failed: {body}");
        body["code"].as_str().expect("no code in response").to_string()
    }
}

/// Spawn a test app on a random port with a fresh in-memory store.
pub async fn spawn_app() -> TestApp {
    let config = Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        expose_reset_codes: true,
        log_level: "warn".to_string(),
        smtp: None,
    };

    let (app, _state) = medcare_reset::build_app(config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::new();

    TestApp { addr, client }
}
