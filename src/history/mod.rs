//! Request history.
//!
//! Every request that receives a response is handed to a [`HistoryStore`].
//! [`JsonlHistoryStore`] keeps the records in a JSON Lines file with the
//! configured `historyLimit` enforced.

pub mod models;
pub mod storage;

pub use models::{HistoricalHttpRequest, HistoryError};
pub use storage::{default_history_path, JsonlHistoryStore};

use async_trait::async_trait;

/// Persists history records.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Adds one record.
    async fn add_to_history(&self, record: HistoricalHttpRequest) -> Result<(), HistoryError>;
}
