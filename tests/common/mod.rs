use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use finanal::models::record::{NewRecord, RecordType};
use finanal::store::{MemoryRecordStore, RecordStore};
use finanal::{create_app, AppConfig, AppState};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

/// App wired to an in-memory store with "today" pinned.
pub struct TestHarness {
    pub app: Router,
    pub store: Arc<MemoryRecordStore>,
    pub user_id: Uuid,
}

impl TestHarness {
    pub fn new(today: NaiveDate) -> Self {
        let store = Arc::new(MemoryRecordStore::new());
        let state = AppState::new(store.clone()).with_clock(Arc::new(move || today));
        let app = create_app(state, &AppConfig::default());

        Self {
            app,
            store,
            user_id: Uuid::new_v4(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("/api/users/{}{}", self.user_id, path)
    }

    /// Insert straight into the store, skipping request validation.
    #[allow(dead_code)]
    pub async fn seed(&self, date: &str, record_type: RecordType, amount: f64) {
        self.store
            .insert(NewRecord {
                user_id: self.user_id,
                date: date.to_string(),
                category: "General".to_string(),
                amount,
                record_type,
                description: String::new(),
            })
            .await
            .unwrap();
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
