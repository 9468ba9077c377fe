use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SendCodeRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Serialize)]
pub struct SendCodeResponse {
    pub success: bool,
    /// Present only when MEDCARE_EXPOSE_RESET_CODES is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Serialize)]
pub struct VerifyCodeResponse {
    pub success: bool,
}

/// Store keys and limiter keys use the normalized form, so "User@X" and
/// "user@x" share one token slot.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn send_code(
    State(state): State<SharedState>,
    Json(req): Json<SendCodeRequest>,
) -> Result<Json<SendCodeResponse>, AppError> {
    let email = normalize_email(&req.email);
    if email.is_empty() {
        return Err(AppError::BadRequest("email required".to_string()));
    }

    if state.send_limiter.check(&email).is_err() {
        return Err(AppError::RateLimited(
            "Too many reset requests. Please try again later.".to_string(),
        ));
    }

    let token = state.reset.issue(&email);
    tracing::info!("Issued password reset code for {email}");

    // Delivery runs in the background; a delivery failure is logged and
    // never fails the issuance.
    match &state.system_mailer {
        Some(mailer) => {
            let mailer = mailer.clone();
            let to = email.clone();
            let code = token.code.clone();
            tokio::spawn(async move {
                if let Err(e) = mailer.send_reset_code(&to, &code).await {
                    tracing::error!("Failed to send reset code email: {e}");
                }
            });
        }
        None => {
            tracing::warn!(
                "System SMTP not configured. Reset code for {email}: {}",
                token.code
            );
        }
    }

    let code = state.config.expose_reset_codes.then_some(token.code);
    Ok(Json(SendCodeResponse {
        success: true,
        code,
    }))
}

pub async fn verify_code(
    State(state): State<SharedState>,
    Json(req): Json<VerifyCodeRequest>,
) -> Result<Json<VerifyCodeResponse>, AppError> {
    let email = normalize_email(&req.email);
    let code = req.code.trim();
    if email.is_empty() || code.is_empty() {
        return Err(AppError::BadRequest(
            "email and code are required".to_string(),
        ));
    }

    if state.verify_limiter.check(&email).is_err() {
        return Err(AppError::RateLimited(
            "Too many verification attempts. Please try again later.".to_string(),
        ));
    }

    match state.reset.verify(&email, code) {
        Ok(()) => Ok(Json(VerifyCodeResponse { success: true })),
        Err(e) => {
            state.verify_limiter.record_failure(&email);
            Err(AppError::BadRequest(e.to_string()))
        }
    }
}
