use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Echo freshly issued codes in the response body. Development only;
    /// production deployments deliver codes via email exclusively.
    pub expose_reset_codes: bool,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("MEDCARE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid MEDCARE_HOST: {e}"))?;

        let port: u16 = env_or("MEDCARE_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid MEDCARE_PORT: {e}"))?;

        let expose_reset_codes = matches!(
            env_or("MEDCARE_EXPOSE_RESET_CODES", "false").as_str(),
            "true" | "1"
        );

        let log_level = env_or("MEDCARE_LOG_LEVEL", "info");

        let smtp = match (
            std::env::var("MEDCARE_SMTP_HOST").ok(),
            std::env::var("MEDCARE_SMTP_PORT").ok(),
            std::env::var("MEDCARE_SMTP_USER").ok(),
            std::env::var("MEDCARE_SMTP_PASS").ok(),
            std::env::var("MEDCARE_SMTP_FROM").ok(),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid MEDCARE_SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
            }),
            _ => None,
        };

        Ok(Config {
            host,
            port,
            expose_reset_codes,
            log_level,
            smtp,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
