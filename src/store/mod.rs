//! Record persistence behind a narrow trait, so handlers never see a
//! concrete database handle.

mod memory;
mod postgres;

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::record::{FinanceRecord, NewRecord, RecordChanges};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt record: {0}")]
    CorruptRecord(String),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert(&self, record: NewRecord) -> Result<FinanceRecord, StoreError>;

    /// Records of one user, newest date first. `since` keeps only dates on or
    /// after the given day, compared as ISO strings.
    async fn list(
        &self,
        user_id: Uuid,
        since: Option<NaiveDate>,
    ) -> Result<Vec<FinanceRecord>, StoreError>;

    /// Returns `None` when the record does not exist or belongs to someone else.
    async fn update(
        &self,
        user_id: Uuid,
        record_id: Uuid,
        changes: RecordChanges,
    ) -> Result<Option<FinanceRecord>, StoreError>;

    async fn delete(&self, user_id: Uuid, record_id: Uuid) -> Result<bool, StoreError>;
}

pub(crate) fn since_key(since: Option<NaiveDate>) -> Option<String> {
    since.map(|date| date.format(crate::analytics::DATE_FORMAT).to_string())
}
