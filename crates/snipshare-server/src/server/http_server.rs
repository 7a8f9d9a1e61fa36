//! HTTP server implementation for the snipshare API.

use crate::api::models::{FetchQuery, INVALID_BODY, NOT_FOUND};
use crate::api::{create_snippet, fetch_snippet, page_data};
use crate::server::state::AppState;
use crate::server::utils::{clear_api_port, save_api_port};

use snipshare_core::{Config, Result, SnipshareError};
use std::convert::Infallible;
use tracing::{error, info, warn};
use warp::filters::body::BodyDeserializeError;
use warp::filters::cors::CorsForbidden;
use warp::http::StatusCode;
use warp::reject::{MethodNotAllowed, UnsupportedMediaType};
use warp::reply::Reply;
use warp::{Filter, Rejection};

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// `?id=...` read as ordered pairs so a repeated key keeps its first value.
/// An absent or unusable query string reads as no pairs.
fn fetch_query() -> impl Filter<Extract = (FetchQuery,), Error = Infallible> + Clone {
    warp::query::<Vec<(String, String)>>()
        .or(warp::any().map(Vec::new))
        .unify()
        .map(FetchQuery::from_pairs)
}

/// All routes of the API, with rejection handling, CORS and request tracing.
pub fn routes(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    // CORS for browser clients
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["Content-Type"])
        .allow_methods(vec!["GET", "POST"]);

    let create_route = warp::path!("api" / "share")
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(warp::body::json())
        .and_then(create_snippet);

    let fetch_route = warp::path!("api" / "share")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and(fetch_query())
        .and_then(fetch_snippet);

    let page_route = warp::path!("share" / String)
        .and(warp::get())
        .and(with_state(state))
        .and_then(page_data);

    // Health check endpoint
    let health_route = warp::path!("health")
        .and(warp::get())
        .map(|| "snipshare API is running");

    create_route
        .or(fetch_route)
        .or(page_route)
        .or(health_route)
        .with(cors)
        .recover(handle_rejection)
        .with(warp::trace::request())
}

/// Turn unmatched or malformed requests into plain-text replies.
pub async fn handle_rejection(err: Rejection) -> std::result::Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, NOT_FOUND)
    } else if let Some(e) = err.find::<BodyDeserializeError>() {
        warn!(error = %e, "rejected request body");
        (StatusCode::BAD_REQUEST, INVALID_BODY)
    } else if err.find::<UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported media type")
    } else if err.find::<CorsForbidden>().is_some() {
        (StatusCode::FORBIDDEN, "Forbidden")
    } else if err.find::<MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        error!(rejection = ?err, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    };

    Ok(warp::reply::with_status(message, status))
}

/// Start the HTTP API server and run it until Ctrl-C
pub async fn start_server(config: Config) -> Result<()> {
    let state = AppState::from_config(&config)?;
    let addr = config.server.socket_addr();

    let server = warp::serve(routes(state)).try_bind_with_graceful_shutdown(addr, async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, stopping API server");
    });

    match server {
        Ok((addr, server)) => {
            // Save the port to file so the CLI can find it later
            save_api_port(addr.port())?;
            info!(%addr, "snipshare API server listening");

            server.await;
            clear_api_port();
            Ok(())
        }
        Err(e) => Err(SnipshareError::Other(format!(
            "Failed to bind to {}: {}",
            addr, e
        ))),
    }
}
