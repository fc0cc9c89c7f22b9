//! Read request for sale rows with a cover image, and its failure type.

use crate::system::host::AppContext;
use serde_json::json;
use thiserror::Error;

/// Local API prefix. The dev server (or the host) forwards it upstream.
pub const API_BASE: &str = "/api";

/// Upper bound on rows fetched in one call; there is no paging beyond it.
pub const ROW_LIMIT: u32 = 10_000;

/// Relations loaded in the same response to avoid one call per row.
pub const PRELOADS: [&str; 2] = ["CoverImageOverrideFile", "Sale"];

/// Host serving stored files by download token.
pub const FILE_HOST: &str = "https://winfakt.app";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("API error: {status}")]
    Http { status: u16 },
    #[error("Fout bij laden verkoopdocumenten: {0}")]
    Network(String),
    #[error("Fout bij laden verkoopdocumenten: {0}")]
    Decode(String),
}

/// `GET /api/sale-row?limit=..&preloads=..&filter=..`
///
/// `preloads` and `filter` are JSON documents, URL-encoded.
pub fn sale_rows_with_images_url(api_base: &str) -> String {
    let preloads = json!(PRELOADS).to_string();
    let filter = json!({ "CoverImageOverrideFileID": { ">": 0 } }).to_string();
    format!(
        "{}/sale-row?limit={}&preloads={}&filter={}",
        api_base.trim_end_matches('/'),
        ROW_LIMIT,
        urlencoding::encode(&preloads),
        urlencoding::encode(&filter)
    )
}

/// Headers required by the upstream API, in send order.
pub fn request_headers(ctx: &AppContext) -> Vec<(&'static str, String)> {
    vec![
        ("Content-Type", "application/json".to_string()),
        ("Authorization", ctx.access_token.clone()),
        ("Bookyear", ctx.bookyear.to_string()),
        ("SocketID", ctx.socket_id.clone()),
    ]
}

/// Outbound link for a stored file.
pub fn download_url(token: &str) -> String {
    format!("{}/files/{}", FILE_HOST, token)
}
