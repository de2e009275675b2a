//! Client connection configuration.

use std::time::Duration;

use secrecy::SecretString;

/// Connection configuration for an NVUE API endpoint.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root URL of the switch, e.g. `https://leaf01:8765`.
    pub url: String,

    /// Username for HTTP basic authentication.
    pub username: String,

    /// Password for HTTP basic authentication.
    pub password: SecretString,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Accept self-signed or otherwise invalid TLS certificates.
    /// For lab use only.
    pub accept_invalid_certs: bool,
}

impl ClientConfig {
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
}
