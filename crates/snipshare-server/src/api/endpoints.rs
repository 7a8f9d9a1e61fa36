use crate::api::models::{
    CreateRequest, CreateResponse, FetchQuery, FETCH_FAILED, INVALID_DATA, MISSING_ID, NOT_FOUND,
    STORAGE_UNAVAILABLE,
};
use crate::server::state::AppState;
use percent_encoding::percent_decode_str;
use snipshare_core::{PageError, RecordError, ShareError};
use tracing::{error, warn};
use warp::http::StatusCode;
use warp::reply::{self, Reply, Response};
use warp::Rejection;

/// Plain-text reply with the given status
pub fn text_reply(message: &'static str, status: StatusCode) -> Response {
    reply::with_status(message, status).into_response()
}

/// Store a new snippet and answer with its id
pub async fn create_snippet(state: AppState, body: CreateRequest) -> Result<Response, Rejection> {
    match state.share.create(body.code).await {
        Ok(id) => Ok(reply::json(&CreateResponse { id: id.to_string() }).into_response()),
        Err(e) => Ok(share_error_reply(e)),
    }
}

/// Fetch a snippet by the `id` query parameter
pub async fn fetch_snippet(state: AppState, query: FetchQuery) -> Result<Response, Rejection> {
    match state.share.fetch(query.id.as_deref()).await {
        Ok(snippet) => Ok(reply::json(&snippet).into_response()),
        Err(e) => Ok(share_error_reply(e)),
    }
}

/// Page data for the share page of a durable record
pub async fn page_data(id: String, state: AppState) -> Result<Response, Rejection> {
    // warp hands over the raw segment; a non UTF-8 id can name no record.
    let id = match percent_decode_str(&id).decode_utf8() {
        Ok(id) => id.into_owned(),
        Err(_) => return Ok(text_reply(NOT_FOUND, StatusCode::NOT_FOUND)),
    };

    match state.pages.load(&id).await {
        Ok(page) => Ok(reply::json(&page).into_response()),
        Err(PageError::MissingId) => Ok(text_reply(MISSING_ID, StatusCode::BAD_REQUEST)),
        Err(PageError::Record(RecordError::NotFound(_))) => {
            Ok(text_reply(NOT_FOUND, StatusCode::NOT_FOUND))
        }
        Err(PageError::Record(RecordError::Fetch(reason))) => {
            warn!(%id, %reason, "failed to fetch code data");
            Ok(text_reply(FETCH_FAILED, StatusCode::BAD_GATEWAY))
        }
    }
}

fn share_error_reply(err: ShareError) -> Response {
    match err {
        ShareError::MissingId => text_reply(MISSING_ID, StatusCode::BAD_REQUEST),
        ShareError::NotFound(_) => text_reply(NOT_FOUND, StatusCode::NOT_FOUND),
        // Already logged with the parse error where it was detected.
        ShareError::Corrupt { .. } => text_reply(INVALID_DATA, StatusCode::INTERNAL_SERVER_ERROR),
        err @ (ShareError::Encode(_) | ShareError::Store(_)) => {
            error!(error = %err, "snippet store failure");
            text_reply(STORAGE_UNAVAILABLE, StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
