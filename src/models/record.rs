use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Income,
    Expense,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Income => "income",
            RecordType::Expense => "expense",
        }
    }

    /// Only the exact lowercase tags are accepted.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "income" => Some(RecordType::Income),
            "expense" => Some(RecordType::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: String, // Format: "YYYY-MM-DD"
    pub category: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A validated record ready to be handed to a store.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub user_id: Uuid,
    pub date: String,
    pub category: String,
    pub amount: f64,
    pub record_type: RecordType,
    pub description: String,
}

/// Validated partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct RecordChanges {
    pub date: Option<String>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub record_type: Option<RecordType>,
    pub description: Option<String>,
}

impl RecordChanges {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.record_type.is_none()
            && self.description.is_none()
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateRecordRequest {
    pub date: Option<String>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    pub description: Option<String>,
}

/// Partial update body. The outer `Option` is "key present", the inner one
/// is "value not null", so an explicit `null` can be told apart from absence.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRecordRequest {
    #[serde(default, deserialize_with = "present")]
    pub date: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub amount: Option<Option<f64>>,
    #[serde(rename = "type", default, deserialize_with = "present")]
    pub record_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
