//! URL construction helpers.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::{ConfigError, Result};

/// Path prefix of the NVUE REST API.
pub const API_PREFIX: &str = "nvue_v1";

/// Bytes left unescaped by [`url_safe`]: the RFC 3986 unreserved set.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Build the API base URL from a root URL such as `https://leaf01:8765/`.
///
/// Trailing slashes are dropped before the API prefix is appended.
pub fn format_base_url(root: &str) -> Result<String> {
    let root = root.trim_end_matches('/');

    let parsed = reqwest::Url::parse(root).map_err(|e| ConfigError::InvalidUrl {
        url: root.to_string(),
        message: e.to_string(),
    })?;
    if !parsed.has_host() {
        return Err(ConfigError::InvalidUrl {
            url: root.to_string(),
            message: "URL has no host".to_string(),
        }
        .into());
    }

    Ok(format!("{}/{}", root, API_PREFIX))
}

/// Join a sub-path onto a base URL.
///
/// An empty sub-path yields the base unchanged.
pub fn make_path(base: &str, sub_path: &str) -> String {
    if sub_path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, sub_path)
    }
}

/// Escape a name (e.g. a revision identifier) for use as one path segment.
pub fn url_safe(name: &str) -> String {
    utf8_percent_encode(name, UNRESERVED).to_string()
}
