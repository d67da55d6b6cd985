// SPDX-License-Identifier: Apache-2.0

use hanzi_explorer_core::password::DEFAULT_ROUNDS;
use hanzi_explorer_core::{resolve_database_path, DEFAULT_DATABASE_FILE, ENV_HANZI_DATABASE_PATH};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_HANZI_BIND: &str = "HANZI_BIND";
pub const ENV_HANZI_SECRET_KEY: &str = "HANZI_SECRET_KEY";
pub const ENV_HANZI_ALLOW_DEV_SECRET: &str = "HANZI_ALLOW_DEV_SECRET";
pub const ENV_HANZI_SESSION_TTL_SECS: &str = "HANZI_SESSION_TTL_SECS";
pub const ENV_HANZI_MAX_BODY_BYTES: &str = "HANZI_MAX_BODY_BYTES";
pub const ENV_HANZI_REQUEST_TIMEOUT_MS: &str = "HANZI_REQUEST_TIMEOUT_MS";
pub const ENV_HANZI_ENABLE_AUDIT_LOG: &str = "HANZI_ENABLE_AUDIT_LOG";
pub const ENV_HANZI_LOG_JSON: &str = "HANZI_LOG_JSON";
pub const ENV_HANZI_SHUTDOWN_DRAIN_MS: &str = "HANZI_SHUTDOWN_DRAIN_MS";
pub const ENV_HANZI_PASSWORD_ROUNDS: &str = "HANZI_PASSWORD_ROUNDS";

/// Fixed key used only when `HANZI_ALLOW_DEV_SECRET=true`.
pub const DEV_SECRET_KEY: &str = "hanzi-explorer-development-secret-key";

pub const MIN_SECRET_KEY_BYTES: usize = 16;

type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn env_bool(vars: Lookup<'_>, name: &str, default: bool) -> bool {
    vars(name)
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(vars: Lookup<'_>, name: &str, default: u64) -> u64 {
    vars(name)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(vars: Lookup<'_>, name: &str, default: usize) -> usize {
    vars(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(vars: Lookup<'_>, name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(vars, name, default_ms))
}

fn process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Whether logs are emitted as JSON lines. Read before the config so the
/// subscriber exists when config warnings are logged.
#[must_use]
pub fn log_json_enabled() -> bool {
    env_bool(&process_env, ENV_HANZI_LOG_JSON, true)
}

#[derive(Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub database_path: PathBuf,
    pub secret_key: String,
    pub session_ttl: Duration,
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
    pub enable_audit_log: bool,
    pub shutdown_drain: Duration,
    pub password_rounds: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_FILE),
            secret_key: DEV_SECRET_KEY.to_string(),
            session_ttl: Duration::from_secs(86_400),
            max_body_bytes: 4 * 1024 * 1024,
            request_timeout: Duration::from_secs(10),
            enable_audit_log: false,
            shutdown_drain: Duration::from_millis(5_000),
            password_rounds: DEFAULT_ROUNDS,
        }
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("database_path", &self.database_path)
            .field("secret_key", &"<redacted>")
            .field("session_ttl", &self.session_ttl)
            .field("max_body_bytes", &self.max_body_bytes)
            .field("request_timeout", &self.request_timeout)
            .field("enable_audit_log", &self.enable_audit_log)
            .field("shutdown_drain", &self.shutdown_drain)
            .field("password_rounds", &self.password_rounds)
            .finish()
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(&process_env)
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(vars: Lookup<'_>) -> Result<Self, String> {
        let defaults = Self::default();
        let secret_key = match vars(ENV_HANZI_SECRET_KEY).filter(|s| !s.trim().is_empty()) {
            Some(secret) => secret,
            None if env_bool(vars, ENV_HANZI_ALLOW_DEV_SECRET, false) => {
                tracing::warn!(
                    "{ENV_HANZI_SECRET_KEY} is not set; using the development secret key"
                );
                DEV_SECRET_KEY.to_string()
            }
            None => {
                return Err(format!(
                    "{ENV_HANZI_SECRET_KEY} is required (set {ENV_HANZI_ALLOW_DEV_SECRET}=true for local development)"
                ))
            }
        };
        let database_path = match vars(ENV_HANZI_DATABASE_PATH).filter(|p| !p.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => resolve_database_path(),
        };
        let rounds = env_u64(vars, ENV_HANZI_PASSWORD_ROUNDS, u64::from(defaults.password_rounds));
        Ok(Self {
            bind_addr: vars(ENV_HANZI_BIND).unwrap_or(defaults.bind_addr),
            database_path,
            secret_key,
            session_ttl: Duration::from_secs(env_u64(
                vars,
                ENV_HANZI_SESSION_TTL_SECS,
                defaults.session_ttl.as_secs(),
            )),
            max_body_bytes: env_usize(vars, ENV_HANZI_MAX_BODY_BYTES, defaults.max_body_bytes),
            request_timeout: env_duration_ms(vars, ENV_HANZI_REQUEST_TIMEOUT_MS, 10_000),
            enable_audit_log: env_bool(vars, ENV_HANZI_ENABLE_AUDIT_LOG, false),
            shutdown_drain: env_duration_ms(vars, ENV_HANZI_SHUTDOWN_DRAIN_MS, 5_000),
            password_rounds: u32::try_from(rounds).unwrap_or(u32::MAX),
        })
    }
}

pub fn validate_startup_config(config: &ServerConfig) -> Result<(), String> {
    if config.bind_addr.parse::<SocketAddr>().is_err() {
        return Err(format!("invalid bind address: {}", config.bind_addr));
    }
    if config.max_body_bytes == 0 {
        return Err("max body size must be > 0".to_string());
    }
    if config.request_timeout.is_zero() || config.session_ttl.is_zero() {
        return Err("request timeout and session ttl must be > 0".to_string());
    }
    if config.secret_key.len() < MIN_SECRET_KEY_BYTES {
        return Err(format!(
            "secret key must be at least {MIN_SECRET_KEY_BYTES} bytes"
        ));
    }
    if config.password_rounds == 0 {
        return Err("password rounds must be > 0".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn missing_secret_is_rejected_unless_dev_secret_allowed() {
        let err = ServerConfig::from_lookup(&lookup(&[])).expect_err("secret required");
        assert!(err.contains(ENV_HANZI_SECRET_KEY));

        let cfg = ServerConfig::from_lookup(&lookup(&[(ENV_HANZI_ALLOW_DEV_SECRET, "true")]))
            .expect("dev secret");
        assert_eq!(cfg.secret_key, DEV_SECRET_KEY);
    }

    #[test]
    fn typed_values_fall_back_to_defaults_when_unparseable() {
        let cfg = ServerConfig::from_lookup(&lookup(&[
            (ENV_HANZI_SECRET_KEY, "0123456789abcdef0123"),
            (ENV_HANZI_SESSION_TTL_SECS, "60"),
            (ENV_HANZI_MAX_BODY_BYTES, "lots"),
            (ENV_HANZI_ENABLE_AUDIT_LOG, "yes"),
            (ENV_HANZI_DATABASE_PATH, "/tmp/hanzi-test.db"),
        ]))
        .expect("config");
        assert_eq!(cfg.session_ttl, Duration::from_secs(60));
        assert_eq!(cfg.max_body_bytes, 4 * 1024 * 1024);
        assert!(cfg.enable_audit_log);
        assert_eq!(cfg.database_path, PathBuf::from("/tmp/hanzi-test.db"));
        validate_startup_config(&cfg).expect("valid");
    }

    #[test]
    fn startup_validation_rejects_short_secret_and_bad_bind() {
        let cfg = ServerConfig {
            secret_key: "short".to_string(),
            ..ServerConfig::default()
        };
        assert!(validate_startup_config(&cfg)
            .expect_err("short secret")
            .contains("secret key"));

        let cfg = ServerConfig {
            bind_addr: "not-an-address".to_string(),
            ..ServerConfig::default()
        };
        assert!(validate_startup_config(&cfg)
            .expect_err("bad bind")
            .contains("bind address"));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let rendered = format!("{:?}", ServerConfig::default());
        assert!(!rendered.contains(DEV_SECRET_KEY));
        assert!(rendered.contains("<redacted>"));
    }
}
