//! `/api/*` forwarding to the upstream host.
//!
//! The widget always calls relative `/api/...` URLs. In development this
//! server strips the prefix and replays the request against the upstream API,
//! keeping the headers the upstream needs for authentication.

use axum::body::{Body, Bytes};
use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use std::time::{Duration, Instant};

/// Request headers passed through to the upstream API.
const FORWARDED_HEADERS: [&str; 5] = ["content-type", "accept", "authorization", "bookyear", "socketid"];

#[derive(Clone)]
pub struct ProxyState {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyState {
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// `/api/<rest>?<query>` -> `<base>/<rest>?<query>`
pub fn upstream_url(base_url: &str, rest: &str, query: Option<&str>) -> String {
    let base = base_url.trim_end_matches('/');
    let rest = rest.trim_start_matches('/');
    match query {
        Some(q) if !q.is_empty() => format!("{}/{}?{}", base, rest, q),
        _ => format!("{}/{}", base, rest),
    }
}

pub fn forwarded_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in FORWARDED_HEADERS {
        if let Some(value) = headers.get(name) {
            out.insert(name, value.clone());
        }
    }
    out
}

pub async fn forward(
    State(state): State<ProxyState>,
    method: Method,
    Path(rest): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let started = Instant::now();
    let url = upstream_url(&state.base_url, &rest, query.as_deref());

    let mut request = state
        .client
        .request(method.clone(), &url)
        .headers(forwarded_headers(&headers));
    if !body.is_empty() {
        request = request.body(body);
    }

    let upstream = match request.send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!("{} /{} -> upstream unreachable: {}", method, rest, e);
            return (StatusCode::BAD_GATEWAY, format!("Upstream request failed: {}", e))
                .into_response();
        }
    };

    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();

    let bytes = match upstream.bytes().await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!("{} /{} -> failed to read upstream body: {}", method, rest, e);
            return (StatusCode::BAD_GATEWAY, format!("Upstream body unreadable: {}", e))
                .into_response();
        }
    };

    tracing::info!(
        "{} /{} -> {} ({} bytes, {} ms)",
        method,
        rest,
        status.as_u16(),
        bytes.len(),
        started.elapsed().as_millis()
    );

    let mut response = Response::builder().status(status);
    if let Some(ct) = content_type {
        response = response.header(header::CONTENT_TYPE, ct);
    }
    response
        .body(Body::from(bytes))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_upstream_url_strips_prefix_and_keeps_query() {
        assert_eq!(
            upstream_url(
                "https://winfakt.app:3001/",
                "sale-row",
                Some("limit=10000&preloads=%5B%22Sale%22%5D")
            ),
            "https://winfakt.app:3001/sale-row?limit=10000&preloads=%5B%22Sale%22%5D"
        );
        assert_eq!(
            upstream_url("https://winfakt.app:3001", "/sale-row", None),
            "https://winfakt.app:3001/sale-row"
        );
        assert_eq!(
            upstream_url("http://localhost:3001", "a/b", Some("")),
            "http://localhost:3001/a/b"
        );
    }

    #[test]
    fn test_only_known_headers_are_forwarded() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("t1"));
        headers.insert("bookyear", HeaderValue::from_static("2024"));
        headers.insert("socketid", HeaderValue::from_static("s1"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.insert("cookie", HeaderValue::from_static("session=x"));
        headers.insert("host", HeaderValue::from_static("localhost:5183"));

        let out = forwarded_headers(&headers);
        assert_eq!(out.len(), 4);
        assert_eq!(out.get("authorization").unwrap(), "t1");
        assert_eq!(out.get("Bookyear").unwrap(), "2024");
        assert_eq!(out.get("SocketID").unwrap(), "s1");
        assert!(out.get("cookie").is_none());
        assert!(out.get("host").is_none());
    }
}
