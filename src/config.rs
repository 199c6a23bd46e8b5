use std::env;
use std::str::FromStr;

use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub storage_dir: String,
    pub log_dir: String,

    // Employee list
    pub page_size: usize,
    pub max_photo_bytes: usize,

    // Rate limiting
    pub rate_limit_enabled: bool,
    pub rate_login_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,
}

/// An environment value that did not parse and was replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    pub key: &'static str,
    pub value: String,
}

/// Read `key` from the environment, falling back to `default` when it is unset
/// or does not parse. Unparseable values are recorded in `fallbacks`.
fn env_or<T: FromStr>(key: &'static str, default: T, fallbacks: &mut Vec<Fallback>) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            fallbacks.push(Fallback { key, value: raw });
            default
        }),
        Err(_) => default,
    }
}

impl Config {
    /// Returned fallbacks are meant to be logged once the subscriber is up.
    pub fn from_env() -> (Self, Vec<Fallback>) {
        dotenv().ok();

        let defaults = Self::default();
        let mut fb = Vec::new();

        let config = Self {
            server_addr: env_or("SERVER_ADDR", defaults.server_addr, &mut fb),
            storage_dir: env_or("STORAGE_DIR", defaults.storage_dir, &mut fb),
            log_dir: env_or("LOG_DIR", defaults.log_dir, &mut fb),

            page_size: env_or("PAGE_SIZE", defaults.page_size, &mut fb).max(1),
            max_photo_bytes: env_or("MAX_PHOTO_BYTES", defaults.max_photo_bytes, &mut fb),

            rate_limit_enabled: env_or("RATE_LIMIT_ENABLED", defaults.rate_limit_enabled, &mut fb),
            rate_login_per_min: env_or("RATE_LOGIN_PER_MIN", defaults.rate_login_per_min, &mut fb),
            rate_protected_per_min: env_or(
                "RATE_PROTECTED_PER_MIN",
                defaults.rate_protected_per_min,
                &mut fb,
            ),

            api_prefix: env_or("API_PREFIX", defaults.api_prefix, &mut fb),
        };

        (config, fb)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8080".to_string(),
            storage_dir: "data".to_string(),
            log_dir: "logs".to_string(),
            page_size: 4,
            max_photo_bytes: 5_000_000,
            rate_limit_enabled: true,
            rate_login_per_min: 60,
            rate_protected_per_min: 1000,
            api_prefix: "/api".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_on_garbage() {
        let mut fallbacks = Vec::new();

        // SAFETY: the key is unique to this test.
        unsafe { env::set_var("STAFF_DIR_TEST_PAGE_SIZE", "four") };
        assert_eq!(env_or("STAFF_DIR_TEST_PAGE_SIZE", 4usize, &mut fallbacks), 4);
        assert_eq!(
            fallbacks,
            [Fallback {
                key: "STAFF_DIR_TEST_PAGE_SIZE",
                value: "four".into()
            }]
        );

        unsafe { env::set_var("STAFF_DIR_TEST_PAGE_SIZE", " 12 ") };
        assert_eq!(env_or("STAFF_DIR_TEST_PAGE_SIZE", 4usize, &mut fallbacks), 12);
        assert_eq!(fallbacks.len(), 1);
    }

    #[test]
    fn env_or_uses_default_when_unset() {
        let mut fallbacks = Vec::new();
        assert!(env_or("STAFF_DIR_TEST_MISSING", true, &mut fallbacks));
        assert!(fallbacks.is_empty());
    }

    #[test]
    fn from_env_reports_unparseable_values() {
        // SAFETY: no other test reads this key.
        unsafe { env::set_var("RATE_LOGIN_PER_MIN", "lots") };
        let (config, fallbacks) = Config::from_env();
        unsafe { env::remove_var("RATE_LOGIN_PER_MIN") };

        assert_eq!(config.rate_login_per_min, 60);
        assert!(
            fallbacks
                .iter()
                .any(|f| f.key == "RATE_LOGIN_PER_MIN" && f.value == "lots")
        );
    }
}
