//! Unit tests for the key-value backend port contract

use async_trait::async_trait;
use memo_domain::{BackendStatus, KeyValueBackend, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Map-backed backend that ignores expiry
#[derive(Debug, Default)]
struct MapBackend {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl KeyValueBackend for MapBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>, _ttl: Duration) -> Result<()> {
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn ping(&self) -> BackendStatus {
        BackendStatus::Connected
    }

    fn provider_name(&self) -> &str {
        "map"
    }
}

#[tokio::test]
async fn test_port_is_usable_as_shared_trait_object() {
    let backend: Arc<dyn KeyValueBackend> = Arc::new(MapBackend::default());

    backend
        .put("sq:k", b"16".to_vec(), Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(backend.get("sq:k").await.unwrap(), Some(b"16".to_vec()));
    assert_eq!(backend.get("sq:other").await.unwrap(), None);
    assert_eq!(backend.ping().await, BackendStatus::Connected);
    assert_eq!(backend.provider_name(), "map");
}

#[tokio::test]
async fn test_default_shutdown_is_a_no_op() {
    let backend = MapBackend::default();
    backend
        .put("k", b"v".to_vec(), Duration::from_secs(1))
        .await
        .unwrap();

    backend.shutdown().await;

    assert_eq!(backend.get("k").await.unwrap(), Some(b"v".to_vec()));
}
