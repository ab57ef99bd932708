use serde::{Deserialize, Serialize};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DATABASE_URL: &str = "sqlite:condominiums.db";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";

/// SMTP settings for the invitation mailer. Delivery is disabled while
/// `from_email` is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_server: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            from_email: String::new(),
        }
    }
}

/// Credentials for the staff account ensured at startup.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: String,
    pub allowed_origin: String,
    pub admin: Option<AdminSeed>,
    pub email: EmailConfig,
}

impl AppConfig {
    /// Assemble the configuration from environment variables, falling back
    /// to local-development defaults.
    pub fn from_env() -> Self {
        let email = EmailConfig {
            smtp_server: env_or("CONDO_SMTP_SERVER", "smtp.gmail.com"),
            smtp_port: std::env::var("CONDO_SMTP_PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(587),
            username: env_or("CONDO_SMTP_USERNAME", ""),
            password: env_or("CONDO_SMTP_PASSWORD", ""),
            from_email: env_or("CONDO_EMAIL_FROM", ""),
        };

        let admin = match (
            std::env::var("CONDO_ADMIN_USERNAME"),
            std::env::var("CONDO_ADMIN_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) => Some(AdminSeed {
                username,
                password,
                email: env_or("CONDO_ADMIN_EMAIL", "admin@localhost"),
            }),
            _ => None,
        };

        Self {
            bind_addr: env_or("CONDO_BIND_ADDR", DEFAULT_BIND_ADDR),
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            allowed_origin: env_or("CONDO_ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN),
            admin,
            email,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
