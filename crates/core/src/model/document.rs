//! Rewrites hosted file-sharing links into preview and direct-download forms.
//!
//! Links that do not follow the `.../d/<id>/...` shape are passed through
//! unchanged; an unrecognized link is never an error.

use std::sync::LazyLock;

use regex::Regex;

static FILE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/d/([^/]+)").expect("file id pattern compiles"));
const PREVIEW_BASE: &str = "https://drive.google.com/file/d";
const DOWNLOAD_BASE: &str = "https://drive.google.com/uc?export=download&id=";

/// Extract the opaque file identifier from a share link.
#[must_use]
pub fn file_id(source_url: &str) -> Option<&str> {
    FILE_ID
        .captures(source_url)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
}

/// URL suitable for an embedded viewer frame.
#[must_use]
pub fn resolve_view_url(source_url: &str) -> String {
    match file_id(source_url) {
        Some(id) => format!("{PREVIEW_BASE}/{id}/preview"),
        None => source_url.to_owned(),
    }
}

/// URL that starts a direct download.
#[must_use]
pub fn resolve_download_url(source_url: &str) -> String {
    match file_id(source_url) {
        Some(id) => format!("{DOWNLOAD_BASE}{id}"),
        None => source_url.to_owned(),
    }
}
