use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;

use crate::fetcher::DEFAULT_API_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub bind_addr: SocketAddr,
    pub static_dir: String,
    pub language_code: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        dotenv().ok(); // Load .env file if present
        let bind = get_env_or_default("FACTZ_BIND", "127.0.0.1:3000");
        Ok(Config {
            api_key: get_env("FACTCHECK_API_KEY")?,
            api_url: get_env_or_default("FACTCHECK_API_URL", DEFAULT_API_URL),
            bind_addr: bind
                .parse()
                .with_context(|| format!("Invalid FACTZ_BIND address: {bind}"))?,
            static_dir: get_env_or_default("FACTZ_STATIC_DIR", "static"),
            language_code: env::var("FACTZ_LANGUAGE").ok().filter(|v| !v.is_empty()),
        })
    }
}

fn get_env(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("Missing required environment variable: {key}"))
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
