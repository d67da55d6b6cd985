// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! HTTP runtime for the catalog: router, middleware, handlers, sessions.

mod config;
mod http;
mod middleware;
mod routing;
pub mod session;

use hanzi_explorer_api::ApiError;
use hanzi_explorer_store::EntityStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::timeout;

pub use config::{
    log_json_enabled, validate_startup_config, ServerConfig, DEV_SECRET_KEY,
    ENV_HANZI_ALLOW_DEV_SECRET, ENV_HANZI_BIND, ENV_HANZI_ENABLE_AUDIT_LOG, ENV_HANZI_LOG_JSON,
    ENV_HANZI_MAX_BODY_BYTES, ENV_HANZI_PASSWORD_ROUNDS, ENV_HANZI_REQUEST_TIMEOUT_MS,
    ENV_HANZI_SECRET_KEY, ENV_HANZI_SESSION_TTL_SECS, ENV_HANZI_SHUTDOWN_DRAIN_MS,
    MIN_SECRET_KEY_BYTES,
};
pub use routing::build_router;

pub const CRATE_NAME: &str = "hanzi-explorer-server";

#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<EntityStore>>,
    pub config: Arc<ServerConfig>,
    request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: EntityStore, config: ServerConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            config: Arc::new(config),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }

    pub(crate) fn next_request_id(&self) -> String {
        let id = self.request_id_seed.fetch_add(1, Ordering::Relaxed);
        format!("req-{id:016x}")
    }

    /// Runs blocking store work off the async workers. The request timeout
    /// bounds only the wait for the store; once work has the store it runs to
    /// completion and its own result is returned, so a committed write is
    /// never reported as a failure.
    pub(crate) async fn with_store<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&mut EntityStore) -> Result<T, ApiError> + Send + 'static,
    {
        let wait = self.config.request_timeout;
        let mut guard = match timeout(wait, Arc::clone(&self.store).lock_owned()).await {
            Ok(guard) => guard,
            Err(_) => {
                tracing::warn!(
                    timeout_ms = wait.as_millis() as u64,
                    "store busy past request timeout"
                );
                return Err(ApiError::store_unavailable("request timed out"));
            }
        };
        tokio::task::spawn_blocking(move || work(&mut guard))
            .await
            .map_err(|join| ApiError::internal(format!("store task failed: {join}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanzi_explorer_api::ApiErrorCode;
    use std::sync::atomic::AtomicBool;
    use std::time::Duration;

    fn state(request_timeout: Duration) -> AppState {
        let store = EntityStore::open_in_memory().expect("store");
        AppState::new(
            store,
            ServerConfig {
                request_timeout,
                ..ServerConfig::default()
            },
        )
    }

    #[tokio::test]
    async fn busy_store_times_out_before_work_starts() {
        let state = state(Duration::from_millis(20));
        let held = Arc::clone(&state.store).lock_owned().await;
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let err = state
            .with_store(move |_| {
                flag.store(true, Ordering::SeqCst);
                Ok(())
            })
            .await
            .expect_err("busy store");
        assert_eq!(err.code, ApiErrorCode::StoreUnavailable);
        drop(held);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn started_work_outlives_the_request_timeout() {
        let state = state(Duration::from_millis(10));
        let counts = state
            .with_store(|store| {
                std::thread::sleep(Duration::from_millis(60));
                Ok(store.counts()?)
            })
            .await
            .expect("work result");
        assert_eq!(counts.characters, 0);
    }
}
