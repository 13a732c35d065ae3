use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use tracing::debug;
use uuid::Uuid;

use crate::database::Database;
use crate::models::record::{FinanceRecord, NewRecord, RecordChanges, RecordType};

use super::{since_key, RecordStore, StoreError};

#[derive(Debug, FromRow)]
struct RecordRow {
    id: Uuid,
    user_id: Uuid,
    date: String,
    category: String,
    amount: f64,
    record_type: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<RecordRow> for FinanceRecord {
    type Error = StoreError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let record_type = RecordType::from_tag(&row.record_type).ok_or_else(|| {
            StoreError::CorruptRecord(format!(
                "record {} has unknown type {:?}",
                row.id, row.record_type
            ))
        })?;

        Ok(FinanceRecord {
            id: row.id,
            user_id: row.user_id,
            date: row.date,
            category: row.category,
            amount: row.amount,
            record_type,
            description: row.description,
            created_at: row.created_at,
        })
    }
}

#[derive(Clone)]
pub struct PgRecordStore {
    db: Database,
}

impl PgRecordStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, record: NewRecord) -> Result<FinanceRecord, StoreError> {
        let row = sqlx::query_as::<_, RecordRow>(
            "INSERT INTO finance_records (id, user_id, date, category, amount, record_type, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(record.user_id)
        .bind(&record.date)
        .bind(&record.category)
        .bind(record.amount)
        .bind(record.record_type.as_str())
        .bind(&record.description)
        .fetch_one(&self.db)
        .await?;

        debug!(record_id = %row.id, user_id = %row.user_id, "inserted finance record");
        row.try_into()
    }

    async fn list(
        &self,
        user_id: Uuid,
        since: Option<NaiveDate>,
    ) -> Result<Vec<FinanceRecord>, StoreError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT * FROM finance_records
            WHERE user_id = $1 AND ($2::text IS NULL OR date >= $2)
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(since_key(since))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(FinanceRecord::try_from).collect()
    }

    async fn update(
        &self,
        user_id: Uuid,
        record_id: Uuid,
        changes: RecordChanges,
    ) -> Result<Option<FinanceRecord>, StoreError> {
        let row = sqlx::query_as::<_, RecordRow>(
            r#"
            UPDATE finance_records SET
                date = COALESCE($3, date),
                category = COALESCE($4, category),
                amount = COALESCE($5, amount),
                record_type = COALESCE($6, record_type),
                description = COALESCE($7, description)
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(record_id)
        .bind(user_id)
        .bind(changes.date)
        .bind(changes.category)
        .bind(changes.amount)
        .bind(changes.record_type.map(|t| t.as_str()))
        .bind(changes.description)
        .fetch_optional(&self.db)
        .await?;

        row.map(FinanceRecord::try_from).transpose()
    }

    async fn delete(&self, user_id: Uuid, record_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM finance_records WHERE id = $1 AND user_id = $2")
            .bind(record_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
