mod briefs;
mod sessions;

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use shopbrief_brief::{BriefSession, SummaryGenerator};
use shopbrief_generator::AnyGenerator;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::middleware::{request_id, RequestId};

/// Upper bound on uploaded briefs CSV bodies.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Uploaded briefs sessions in creation order, bounded by `max_sessions`.
#[derive(Debug)]
pub struct SessionStore {
    sessions: IndexMap<Uuid, Arc<BriefSession>>,
    max_sessions: usize,
}

impl SessionStore {
    #[must_use]
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: IndexMap::new(),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Stores `session`, evicting the oldest sessions once the cap is exceeded.
    pub fn insert(&mut self, id: Uuid, session: Arc<BriefSession>) {
        self.sessions.insert(id, session);
        while self.sessions.len() > self.max_sessions {
            if let Some((evicted, _)) = self.sessions.shift_remove_index(0) {
                tracing::info!(session_id = %evicted, "evicted oldest briefs session");
            }
        }
    }

    #[must_use]
    pub fn get(&self, id: &Uuid) -> Option<Arc<BriefSession>> {
        self.sessions.get(id).cloned()
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<Arc<BriefSession>> {
        self.sessions.shift_remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<SessionStore>>,
    pub generator: Arc<AnyGenerator>,
}

impl AppState {
    #[must_use]
    pub fn new(generator: AnyGenerator, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(SessionStore::new(max_sessions))),
            generator: Arc::new(generator),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    generator: String,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/briefs/parse", post(briefs::parse))
        .route("/api/v1/sessions", post(sessions::create_session))
        .route(
            "/api/v1/sessions/{session_id}",
            delete(sessions::delete_session),
        )
        .route(
            "/api/v1/sessions/{session_id}/categories",
            get(sessions::list_categories),
        )
        .route(
            "/api/v1/sessions/{session_id}/summary",
            get(sessions::get_summary),
        )
        .route(
            "/api/v1/sessions/{session_id}/export",
            get(sessions::get_export),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            generator: state.generator.provider().to_string(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
