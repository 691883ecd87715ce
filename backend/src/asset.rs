use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{AssetRef, EngineError};

lazy_static! {
    static ref RE_HTTP_URL: Regex = Regex::new(r"(?i)^https?://").unwrap();
    static ref RE_OTHER_SCHEME: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*:").unwrap();
    static ref RE_SITE_ORIGIN: Regex = Regex::new(r"(?i)^(https?://[^/\s?#]+)").unwrap();
}

fn malformed(url: &str, reason: &str) -> EngineError {
    EngineError::AssetUrlMalformed {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

/// Scheme and host of `origin`, without a trailing slash or path.
pub fn site_origin(origin: &str) -> Option<String> {
    RE_SITE_ORIGIN
        .captures(origin.trim())
        .map(|caps| caps[1].to_string())
}

/// Rewrite a media source found in the page into an absolute URL.
///
/// - `https://cdn/x.mp3` is kept
/// - `//cdn/x.mp3` becomes `https://cdn/x.mp3`
/// - `/media/x.mp3` and `media/x.mp3` are joined to the site origin
pub fn normalize_url(raw: &str, origin: &str) -> Result<String, EngineError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(malformed(raw, "empty URL"));
    }

    if RE_HTTP_URL.is_match(url) {
        return Ok(url.to_string());
    }

    if let Some(rest) = url.strip_prefix("//") {
        return Ok(format!("https://{}", rest));
    }

    if RE_OTHER_SCHEME.is_match(url) {
        return Err(malformed(raw, "unsupported URL scheme"));
    }

    let origin = site_origin(origin)
        .ok_or_else(|| malformed(raw, &format!("relative URL and no usable site origin ('{}')", origin)))?;

    if url.starts_with('/') {
        Ok(format!("{}{}", origin, url))
    } else {
        Ok(format!("{}/{}", origin, url))
    }
}

/// Final path segment of an absolute URL, without query or fragment.
pub fn local_name(url: &str) -> Result<String, EngineError> {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let path_start = without_scheme
        .find('/')
        .ok_or_else(|| malformed(url, "URL has no path"))?;

    let path = &without_scheme[path_start..];
    let path = path.split(['?', '#']).next().unwrap_or("");
    let name = path.rsplit('/').next().unwrap_or("");

    if name.is_empty() {
        return Err(malformed(url, "URL path has no file name"));
    }
    Ok(name.to_string())
}

impl AssetRef {
    pub fn from_source(raw: &str, origin: &str) -> Result<AssetRef, EngineError> {
        let url = normalize_url(raw, origin)?;
        let local_name = local_name(&url)?;
        Ok(AssetRef { url, local_name })
    }
}
