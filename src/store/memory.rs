use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::record::{FinanceRecord, NewRecord, RecordChanges};

use super::{since_key, RecordStore, StoreError};

/// Process-local store, used when no database is configured and in tests.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<HashMap<Uuid, FinanceRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, record: NewRecord) -> Result<FinanceRecord, StoreError> {
        let record = FinanceRecord {
            id: Uuid::new_v4(),
            user_id: record.user_id,
            date: record.date,
            category: record.category,
            amount: record.amount,
            record_type: record.record_type,
            description: record.description,
            created_at: Utc::now(),
        };

        self.records.write().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list(
        &self,
        user_id: Uuid,
        since: Option<NaiveDate>,
    ) -> Result<Vec<FinanceRecord>, StoreError> {
        let since = since_key(since);
        let records = self.records.read().await;

        let mut found: Vec<FinanceRecord> = records
            .values()
            .filter(|r| r.user_id == user_id)
            .filter(|r| since.as_deref().map_or(true, |since| r.date.as_str() >= since))
            .cloned()
            .collect();

        found.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(found)
    }

    async fn update(
        &self,
        user_id: Uuid,
        record_id: Uuid,
        changes: RecordChanges,
    ) -> Result<Option<FinanceRecord>, StoreError> {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(&record_id).filter(|r| r.user_id == user_id) else {
            return Ok(None);
        };

        if let Some(date) = changes.date {
            record.date = date;
        }
        if let Some(category) = changes.category {
            record.category = category;
        }
        if let Some(amount) = changes.amount {
            record.amount = amount;
        }
        if let Some(record_type) = changes.record_type {
            record.record_type = record_type;
        }
        if let Some(description) = changes.description {
            record.description = description;
        }

        Ok(Some(record.clone()))
    }

    async fn delete(&self, user_id: Uuid, record_id: Uuid) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        match records.get(&record_id) {
            Some(record) if record.user_id == user_id => {
                records.remove(&record_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::RecordType;

    fn new_record(user_id: Uuid, date: &str, amount: f64) -> NewRecord {
        NewRecord {
            user_id,
            date: date.to_string(),
            category: "General".to_string(),
            amount,
            record_type: RecordType::Income,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn list_is_scoped_to_user_and_sorted_newest_first() {
        let store = MemoryRecordStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.insert(new_record(alice, "2024-01-05", 1.0)).await.unwrap();
        store.insert(new_record(alice, "2024-03-01", 2.0)).await.unwrap();
        store.insert(new_record(bob, "2024-02-01", 3.0)).await.unwrap();

        let records = store.list(alice, None).await.unwrap();
        let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-01-05"]);
        assert!(records.iter().all(|r| r.user_id == alice));
    }

    #[tokio::test]
    async fn list_applies_lower_bound() {
        let store = MemoryRecordStore::new();
        let user = Uuid::new_v4();

        store.insert(new_record(user, "2023-12-31", 1.0)).await.unwrap();
        store.insert(new_record(user, "2024-02-01", 2.0)).await.unwrap();
        store.insert(new_record(user, "2024-02-20", 3.0)).await.unwrap();

        let since = NaiveDate::from_ymd_opt(2024, 2, 1);
        let records = store.list(user, since).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.date.as_str() >= "2024-02-01"));
    }

    #[tokio::test]
    async fn update_and_delete_respect_ownership() {
        let store = MemoryRecordStore::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let record = store.insert(new_record(owner, "2024-01-05", 10.0)).await.unwrap();

        let changes = RecordChanges {
            amount: Some(20.0),
            record_type: Some(RecordType::Expense),
            ..Default::default()
        };

        let missing = store.update(stranger, record.id, changes.clone()).await.unwrap();
        assert!(missing.is_none());
        assert!(!store.delete(stranger, record.id).await.unwrap());

        let updated = store.update(owner, record.id, changes).await.unwrap().unwrap();
        assert_eq!(updated.amount, 20.0);
        assert_eq!(updated.record_type, RecordType::Expense);
        assert_eq!(updated.date, "2024-01-05");

        assert!(store.delete(owner, record.id).await.unwrap());
        assert!(store.list(owner, None).await.unwrap().is_empty());
    }
}
