use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use shopbrief_brief::{BriefSession, SessionError};
use shopbrief_core::SummariesFile;
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct SessionCreated {
    session_id: Uuid,
    rows: usize,
    categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct CategoryList {
    categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct CategorySummary {
    category: String,
    markdown: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SummaryQuery {
    pub category: Option<String>,
}

fn owned_categories(session: &BriefSession) -> Vec<String> {
    session
        .categories()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn map_session_error(request_id: String, error: &SessionError) -> ApiError {
    match error {
        SessionError::Csv(_) | SessionError::MissingColumn(_) => {
            ApiError::new(request_id, "bad_request", error.to_string())
        }
        SessionError::UnknownCategory(_) => {
            ApiError::new(request_id, "not_found", error.to_string())
        }
        SessionError::Generate(_) => {
            tracing::error!(error = %error, "summary generation failed");
            ApiError::new(request_id, "upstream_error", "summary generation failed")
        }
        _ => {
            tracing::error!(error = %error, "session operation failed");
            ApiError::new(request_id, "internal_error", "session operation failed")
        }
    }
}

fn parse_session_id(request_id: &str, raw_id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw_id).map_err(|_| {
        ApiError::new(request_id, "bad_request", format!("invalid session id: {raw_id}"))
    })
}

fn session_not_found(request_id: &str, id: Uuid) -> ApiError {
    ApiError::new(request_id, "not_found", format!("session {id} not found"))
}

async fn find_session(
    state: &AppState,
    request_id: &str,
    raw_id: &str,
) -> Result<Arc<BriefSession>, ApiError> {
    let id = parse_session_id(request_id, raw_id)?;
    state
        .sessions
        .read()
        .await
        .get(&id)
        .ok_or_else(|| session_not_found(request_id, id))
}

/// Loads a briefs CSV from the request body into a new session.
pub(super) async fn create_session(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: String,
) -> Result<(StatusCode, Json<ApiResponse<SessionCreated>>), ApiError> {
    let session = BriefSession::from_csv_reader(body.as_bytes())
        .map_err(|e| map_session_error(req_id.0.clone(), &e))?;

    let session_id = Uuid::new_v4();
    let data = SessionCreated {
        session_id,
        rows: session.len(),
        categories: owned_categories(&session),
    };
    let held = {
        let mut sessions = state.sessions.write().await;
        sessions.insert(session_id, Arc::new(session));
        sessions.len()
    };
    tracing::info!(%session_id, rows = data.rows, held, "created briefs session");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data,
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// Drops a session and the briefs it holds.
pub(super) async fn delete_session(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_session_id(&req_id.0, &session_id)?;
    state
        .sessions
        .write()
        .await
        .remove(&id)
        .ok_or_else(|| session_not_found(&req_id.0, id))?;
    tracing::info!(session_id = %id, "deleted briefs session");
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<CategoryList>>, ApiError> {
    let session = find_session(&state, &req_id.0, &session_id).await?;
    Ok(Json(ApiResponse {
        data: CategoryList {
            categories: owned_categories(&session),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(session_id): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<ApiResponse<CategorySummary>>, ApiError> {
    let category = query
        .category
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "bad_request", "category is required"))?;

    let session = find_session(&state, &req_id.0, &session_id).await?;
    let markdown = session
        .render_category(&category, state.generator.as_ref())
        .await
        .map_err(|e| map_session_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: CategorySummary { category, markdown },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_export(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SummariesFile>>, ApiError> {
    let session = find_session(&state, &req_id.0, &session_id).await?;
    let export = session
        .export(state.generator.as_ref())
        .await
        .map_err(|e| map_session_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: export,
        meta: ResponseMeta::new(req_id.0),
    }))
}
