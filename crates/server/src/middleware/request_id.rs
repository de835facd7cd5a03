//! Per-request correlation IDs.
//!
//! An `x-request-id` sent by the client or a proxy is reused when it looks
//! sane; otherwise a UUID v4 is minted. The ID lands in the tracing span,
//! the Sentry scope, the request extensions, and the response headers.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// Header carrying the request ID in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest inbound ID that is reused as-is.
const MAX_INBOUND_LEN: usize = 128;

/// The request's correlation ID, available to handlers as an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Accept an inbound ID only if it is short, printable ASCII.
fn accept_inbound(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    (!raw.is_empty()
        && raw.len() <= MAX_INBOUND_LEN
        && raw.bytes().all(|b| b.is_ascii_graphic()))
    .then_some(raw)
}

/// Attach a request ID to the request, its span, and its response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(accept_inbound)
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned);

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| scope.set_tag("request_id", &request_id));

    let header = HeaderValue::from_str(&request_id).ok();
    request.extensions_mut().insert(RequestId(request_id));

    let mut response = next.run(request).await;
    if let Some(value) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Extension, Router, body::Body, middleware::from_fn, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route(
                "/",
                get(|Extension(RequestId(id)): Extension<RequestId>| async move { id }),
            )
            .layer(from_fn(request_id_middleware))
    }

    async fn call(header: Option<&str>) -> (String, String) {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(REQUEST_ID_HEADER, value);
        }
        let response = app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let echoed = response.headers()[REQUEST_ID_HEADER]
            .to_str()
            .unwrap()
            .to_string();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (echoed, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_inbound_id_is_reused() {
        let (echoed, seen) = call(Some("edge-42")).await;
        assert_eq!(echoed, "edge-42");
        assert_eq!(seen, "edge-42");
    }

    #[tokio::test]
    async fn test_missing_id_is_generated() {
        let (echoed, seen) = call(None).await;
        assert_eq!(echoed, seen);
        assert!(Uuid::parse_str(&echoed).is_ok());
    }

    #[tokio::test]
    async fn test_oversized_id_is_replaced() {
        let long = "x".repeat(MAX_INBOUND_LEN + 1);
        let (echoed, _) = call(Some(&long)).await;
        assert_ne!(echoed, long);
        assert!(Uuid::parse_str(&echoed).is_ok());
    }

    #[test]
    fn test_accept_inbound() {
        assert_eq!(accept_inbound(" abc "), Some("abc"));
        assert_eq!(accept_inbound(""), None);
        assert_eq!(accept_inbound("has space"), None);
    }
}
