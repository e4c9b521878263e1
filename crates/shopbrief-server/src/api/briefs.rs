use axum::{Extension, Json};
use shopbrief_brief::{parse_brief, ParsedBrief};

use crate::middleware::RequestId;

use super::{ApiResponse, ResponseMeta};

/// Parses the raw brief text in the request body.
pub(super) async fn parse(
    Extension(req_id): Extension<RequestId>,
    body: String,
) -> Json<ApiResponse<ParsedBrief>> {
    Json(ApiResponse {
        data: parse_brief(&body),
        meta: ResponseMeta::new(req_id.0),
    })
}
