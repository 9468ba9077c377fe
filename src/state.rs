use std::sync::Arc;

use crate::config::Config;
use crate::email::SystemMailer;
use crate::rate_limit::SendCodeRateLimiter;
use crate::rate_limit::VerifyRateLimiter;
use crate::reset::ResetService;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub reset: ResetService,
    pub system_mailer: Option<Arc<SystemMailer>>,
    pub send_limiter: SendCodeRateLimiter,
    pub verify_limiter: VerifyRateLimiter,
}
