use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    // Rate limiting
    pub rate_per_min: u32,

    pub log_dir: String,

    /// Origins allowed to call the API from a browser; empty allows any
    pub cors_origins: Vec<String>,

    /// CSV dump loaded into the store at startup
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:5000".to_string(),
            api_prefix: "/api".to_string(),
            rate_per_min: 1000,
            log_dir: "logs".to_string(),
            cors_origins: Vec::new(),
            data_file: None,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty() && *origin != "*")
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Config::default();
        Self {
            server_addr: env_or("SERVER_ADDR", defaults.server_addr),
            api_prefix: env_or("API_PREFIX", defaults.api_prefix),
            rate_per_min: env_or("RATE_PER_MIN", defaults.rate_per_min),
            log_dir: env_or("LOG_DIR", defaults.log_dir),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| split_origins(&v))
                .unwrap_or_default(),
            data_file: env::var("DATA_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_on_garbage() {
        // keys are not read by any other test
        unsafe {
            env::set_var("ATTENDANCE_TEST_RATE_OK", "42");
            env::set_var("ATTENDANCE_TEST_RATE_BAD", "lots");
        }
        assert_eq!(env_or("ATTENDANCE_TEST_RATE_OK", 7u32), 42);
        assert_eq!(env_or("ATTENDANCE_TEST_RATE_BAD", 7u32), 7);
        assert_eq!(env_or("ATTENDANCE_TEST_RATE_UNSET", 7u32), 7);
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.server_addr, "127.0.0.1:5000");
        assert_eq!(config.api_prefix, "/api");
        assert!(config.data_file.is_none());
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn cors_origins_are_comma_separated() {
        assert_eq!(
            split_origins(" http://localhost:3000 ,https://dash.example.com,,"),
            vec!["http://localhost:3000", "https://dash.example.com"]
        );
        assert!(split_origins("*").is_empty());
        assert!(split_origins("").is_empty());
    }
}
