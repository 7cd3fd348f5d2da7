// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub bind_addr: String,

    /// Public origin of the marketing site, used to build magic-link
    /// verification URLs and allowed as a CORS origin.
    pub public_base_url: String,

    /// Allow-list of admin emails permitted to request a magic link.
    /// Injected per deployment via ADMIN_EMAILS (comma-separated).
    pub admin_emails: Vec<String>,

    pub email_api_url: String,
    pub email_api_key: String,
    pub email_from: String,

    pub meditation_audio_url: String,
    pub masterclass_video_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let public_base_url =
            env::var("PUBLIC_BASE_URL").expect("PUBLIC_BASE_URL must be set");

        let admin_emails = env::var("ADMIN_EMAILS")
            .expect("ADMIN_EMAILS must be set")
            .split(',')
            .map(|e| e.trim().to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();

        let email_api_url = env::var("EMAIL_API_URL")
            .unwrap_or_else(|_| "https://api.resend.com/emails".to_string());

        let email_api_key = env::var("EMAIL_API_KEY").expect("EMAIL_API_KEY must be set");

        let email_from = env::var("EMAIL_FROM").expect("EMAIL_FROM must be set");

        let meditation_audio_url = env::var("MEDITATION_AUDIO_URL").unwrap_or_default();

        let masterclass_video_url = env::var("MASTERCLASS_VIDEO_URL").unwrap_or_default();

        Self {
            database_url,
            rust_log,
            bind_addr,
            public_base_url,
            admin_emails,
            email_api_url,
            email_api_key,
            email_from,
            meditation_audio_url,
            masterclass_video_url,
        }
    }

    /// Case-insensitive membership check against the admin allow-list.
    pub fn is_admin_email(&self, email: &str) -> bool {
        let email = email.trim().to_ascii_lowercase();
        self.admin_emails.iter().any(|e| e == &email)
    }

    /// Session cookies carry the Secure attribute whenever the site is
    /// served over HTTPS; only plain-http local dev goes without it.
    pub fn secure_cookies(&self) -> bool {
        self.public_base_url.starts_with("https://")
    }
}
