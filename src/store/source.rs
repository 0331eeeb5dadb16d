use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use super::RecordStore;

/// Where request handlers get their record snapshot from.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Return a snapshot of the pools, teams and players.
    async fn snapshot(&self) -> Result<Arc<RecordStore>>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Re-reads the JSON files on every call.
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonDirSource { dir: dir.into() }
    }
}

#[async_trait]
impl RecordSource for JsonDirSource {
    async fn snapshot(&self) -> Result<Arc<RecordStore>> {
        let store = RecordStore::load(&self.dir).await?;
        let (pools, teams, players) = store.counts();
        debug!(
            "Reloaded {} pools, {} teams, {} players from {}",
            pools,
            teams,
            players,
            self.dir.display()
        );
        Ok(Arc::new(store))
    }

    fn name(&self) -> &str {
        "json-dir"
    }
}

/// Hands out the same immutable snapshot to every request.
pub struct SharedSource {
    store: Arc<RecordStore>,
}

impl SharedSource {
    pub fn new(store: RecordStore) -> Self {
        SharedSource {
            store: Arc::new(store),
        }
    }
}

#[async_trait]
impl RecordSource for SharedSource {
    async fn snapshot(&self) -> Result<Arc<RecordStore>> {
        Ok(Arc::clone(&self.store))
    }

    fn name(&self) -> &str {
        "shared"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::sample_store;
    use std::path::Path;

    #[tokio::test]
    async fn shared_source_returns_same_snapshot() {
        let source = SharedSource::new(sample_store());
        let a = source.snapshot().await.unwrap();
        let b = source.snapshot().await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn json_dir_source_reloads_each_call() {
        let source = JsonDirSource::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"));
        let a = source.snapshot().await.unwrap();
        let b = source.snapshot().await.unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.counts(), b.counts());
    }

    #[tokio::test]
    async fn json_dir_source_surfaces_load_errors() {
        let source = JsonDirSource::new("/definitely/not/here");
        assert!(source.snapshot().await.is_err());
    }
}
