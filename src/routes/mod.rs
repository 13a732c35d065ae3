pub mod analytics;
pub mod records;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::Json,
    routing::{get, put},
    Router,
};
use chrono::{Local, NaiveDate};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::store::RecordStore;

pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordStore>,
    clock: Clock,
}

impl AppState {
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self {
            records,
            clock: Arc::new(|| Local::now().date_naive()),
        }
    }

    /// Pin "today", used for the monthly and yearly windows.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }
}

pub fn create_app(state: AppState, config: &AppConfig) -> Router {
    let api = Router::new()
        .route(
            "/users/:user_id/finance",
            get(records::list_records).post(records::create_record),
        )
        .route(
            "/users/:user_id/finance/:record_id",
            put(records::update_record).delete(records::delete_record),
        )
        .route("/users/:user_id/metrics", get(analytics::get_metrics))
        .route("/users/:user_id/chart_data", get(analytics::get_chart_data));

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state);

    let app = match &config.static_dir {
        Some(dir) => app.fallback_service(
            ServeDir::new(dir).not_found_service(ServeFile::new(format!("{dir}/index.html"))),
        ),
        None => app.fallback(handle_404),
    };

    app.layer(cors_layer(config.cors_origin.clone()))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

async fn index() -> Json<Value> {
    Json(json!({ "message": "API is running" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn handle_404() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "status": "error",
            "message": "Not found"
        })),
    )
}

pub(crate) fn parse_user_id(user_id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(user_id).map_err(|_| AppError::BadRequest("Invalid user ID format.".to_string()))
}
