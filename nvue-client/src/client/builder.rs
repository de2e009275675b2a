//! Builder for creating API clients.

use std::time::Duration;

use secrecy::SecretString;

use super::Client;
use crate::error::{ConfigError, Result};
use crate::transport::{ClientConfig, HttpTransport};

/// Builder for constructing an HTTP-backed [`Client`].
///
/// # Example
///
/// ```rust,no_run
/// use nvue_client::ClientBuilder;
///
/// # async fn example() -> Result<(), nvue_client::Error> {
/// let client = ClientBuilder::new("https://192.168.200.2:8765")
///     .username("cumulus")
///     .password("secret")
///     .danger_accept_invalid_certs()
///     .build()?;
///
/// println!("{}", client.health().await?);
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    url: String,
    username: Option<String>,
    password: SecretString,
    timeout: Duration,
    accept_invalid_certs: bool,
}

impl ClientBuilder {
    /// Create a new builder for the device at `url` (`<scheme>://<host>[:<port>]`).
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: SecretString::from(String::new()),
            timeout: ClientConfig::DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }

    /// Set the username for authentication.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password for authentication.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = SecretString::from(password.into());
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Accept invalid TLS certificates.
    ///
    /// NVUE ships with a self-signed certificate; only use this on lab
    /// devices.
    pub fn danger_accept_invalid_certs(mut self) -> Self {
        self.accept_invalid_certs = true;
        self
    }

    /// Build the configuration without creating a transport.
    pub fn config(self) -> Result<ClientConfig> {
        let username = self.username.ok_or_else(|| ConfigError::InvalidConfig {
            message: "Username is required".to_string(),
        })?;

        Ok(ClientConfig {
            url: self.url,
            username,
            password: self.password,
            timeout: self.timeout,
            accept_invalid_certs: self.accept_invalid_certs,
        })
    }

    /// Build the client.
    ///
    /// No request is made; call [`Client::health`] to verify connectivity.
    pub fn build(self) -> Result<Client> {
        let config = self.config()?;
        let url = config.url.clone();
        let transport = HttpTransport::new(config)?;
        Client::with_transport(&url, transport)
    }
}
