use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub omdb_api_key: String,
    pub omdb_base_url: String,
    /// Tokens accepted by the `/api` authorization check. Empty disables the check.
    pub api_tokens: Vec<String>,
    pub cors_allowed_origin: Option<String>,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "8080".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://filmshelf.db?mode=rwc".to_string());

        let omdb_api_key = std::env::var("OMDB_API_KEY").unwrap_or_else(|_| "".to_string());
        let omdb_base_url = std::env::var("OMDB_BASE_URL")
            .unwrap_or_else(|_| "https://www.omdbapi.com/".to_string());

        let api_tokens = std::env::var("API_TOKENS").map(|s| parse_tokens(&s)).unwrap_or_default();

        let cors_allowed_origin =
            std::env::var("CORS_ALLOWED_ORIGIN").ok().filter(|s| !s.trim().is_empty());

        let http_timeout_secs: u64 =
            std::env::var("HTTP_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(30);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            omdb_api_key,
            omdb_base_url,
            api_tokens,
            cors_allowed_origin,
            http_timeout_secs,
        })
    }
}

fn parse_tokens(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty()).map(str::to_string).collect()
}
