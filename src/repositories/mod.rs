pub mod documents;
pub mod energy;

pub use documents::PgDocumentStore;
pub use energy::EnergyRepository;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Collection-level access to JSON documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document of `collection`, in insertion order.
    async fn find_all(&self, collection: &str) -> Result<Vec<Value>>;

    /// Replaces the whole contents of `collection` with `docs`.
    async fn replace_all(&self, collection: &str, docs: &[Value]) -> Result<()>;
}
