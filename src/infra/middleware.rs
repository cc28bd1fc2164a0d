//! Middleware for modifying requests and responses.

use crate::infra::error::{ApiResult, InternalError};
use axum::{body::Body, middleware::Next, response::IntoResponse};
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::BodyExt;
use hyper::body::Body as _;
use tower_http::trace::MakeSpan;

static X_REQUEST_ID: &str = "x-request-id";

#[derive(Clone)]
pub(crate) struct MakeRequestIdSpan;

impl<B> MakeSpan<B> for MakeRequestIdSpan {
    fn make_span(&mut self, request: &Request<B>) -> tracing::Span {
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|id| id.to_str().ok())
            .unwrap_or("unknown");
        tracing::info_span!(
            "request",
            request_id = request_id,
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
        )
    }
}

/// The maximum size of the request body to log.
const MAX_BODY_SIZE: u64 = 8192;

/// Log the request and response, including small bodies.
pub(crate) async fn log_request_response(
    req: Request<Body>,
    next: Next,
) -> ApiResult<impl IntoResponse> {
    let (parts, body) = req.into_parts();
    let req = if body.size_hint().upper().is_some_and(|n| n <= MAX_BODY_SIZE) {
        let body_bytes = buffer_and_print("request", body).await?;
        Request::from_parts(parts, Body::from(body_bytes))
    } else {
        Request::from_parts(parts, body)
    };
    let method = req.method().to_string();
    let uri = req.uri().to_string();

    let res = next.run(req).await;

    let (parts, body) = res.into_parts();
    let res = if body.size_hint().upper().is_some_and(|n| n <= MAX_BODY_SIZE) {
        let body_bytes = buffer_and_print("response", body).await?;
        Response::from_parts(parts, Body::from(body_bytes))
    } else {
        Response::from_parts(parts, body)
    };
    tracing::info!(
        method = %method,
        uri = %uri,
        status = res.status().as_u16(),
        "handled request"
    );

    Ok(res)
}

/// Read the entire body stream and store it in memory.
async fn buffer_and_print(direction: &str, body: Body) -> ApiResult<Bytes> {
    let body: Bytes = body
        .collect()
        .await
        .map_err(|e| InternalError::Other(format!("failed to buffer {direction} body: {e}")))?
        .to_bytes();

    // Log if valid text
    if let Ok(body) = std::str::from_utf8(&body) {
        tracing::trace!("{} body = {:?}", direction, body);
    }

    Ok(body)
}
