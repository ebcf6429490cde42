//! Health routes
//!
//! `GET /health/cache` reports the backend's liveness probe. The route always
//! answers 200; the body carries the status.

use crate::constants::HEALTH_MOUNT_PATH;
use memo_domain::KeyValueBackend;
use memo_infrastructure::health::{CacheHealth, CacheHealthChecker, HealthChecker};
use rocket::serde::json::Json;
use rocket::{Build, Rocket, State, get, routes};
use std::sync::Arc;

/// Shared state for the health routes
#[derive(Clone)]
pub struct HealthState {
    /// Checker probing the shared backend handle
    pub checker: Arc<CacheHealthChecker>,
}

impl HealthState {
    /// State probing the given backend
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self {
            checker: Arc::new(CacheHealthChecker::new(backend)),
        }
    }
}

/// Cache backend health
///
/// GET /health/cache
#[get("/cache")]
pub async fn cache_health(state: &State<HealthState>) -> Json<CacheHealth> {
    Json(state.checker.check_health().await)
}

/// Build the Rocket application serving the health routes
pub fn health_rocket(state: HealthState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .mount(HEALTH_MOUNT_PATH, routes![cache_health])
}
