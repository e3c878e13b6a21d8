// ABOUTME: Backend client abstraction for listing, deleting and transferring single objects
// ABOUTME: Exposes the ObjectClient capability plus provider, reference and store helpers

pub mod error;
pub mod provider;
pub mod reference;
pub mod store;

pub use error::BackendError;
pub use provider::{ensure_supported, supported_providers, Provider};
pub use reference::{join_path, split_reference};
pub use store::{resolve_client, StoreClient, StoreOptions};

use async_trait::async_trait;
use bytes::Bytes;

/// Per-object operations against one provider.
///
/// A single client is shared by every worker of a batch, so implementations
/// must be safe for concurrent use. Errors are opaque to the engine.
#[async_trait]
pub trait ObjectClient: Send + Sync {
    /// Paths of all objects under `root`, relative to it
    async fn list_objects(&self, root: &str) -> error::Result<Vec<String>>;

    async fn delete_object(&self, path: &str) -> error::Result<()>;

    async fn read_object(&self, path: &str) -> error::Result<Bytes>;

    async fn write_object(&self, path: &str, data: Bytes) -> error::Result<()>;
}
