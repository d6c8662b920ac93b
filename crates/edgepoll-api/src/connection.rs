// Shared connection configuration for a single EdgeSwitch device.
//
// The device client and all of its port clients read the same
// `ConnectionConfig` through an `Arc`; nothing mutates it after
// construction.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::Error;

/// TLS verification mode for the management endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Accept any certificate (EdgeSwitches ship self-signed).
    DangerAcceptInvalid,
}

/// Immutable connection parameters for one EdgeSwitch.
///
/// `base_url` already carries the fixed API prefix, so request paths
/// are joined as `{base_url}switch/get` and `{base_url}port/{iface}/get`.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    base_url: Url,
    username: String,
    password: SecretString,
    timeout: Duration,
    tls: TlsMode,
}

impl ConnectionConfig {
    /// Build a config from host + port, deriving the canonical base URL
    /// `https://{host}:{port}/api/edge/`.
    pub fn new(
        host: &str,
        port: u16,
        username: impl Into<String>,
        password: SecretString,
        timeout: Duration,
        tls: TlsMode,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("https://{host}:{port}/api/edge/"))?;
        Ok(Self {
            base_url,
            username: username.into(),
            password,
            timeout,
            tls,
        })
    }

    /// Build a config from an explicit base URL.
    ///
    /// Useful when the device sits behind a reverse proxy or a plain
    /// HTTP test server. The URL must end in `/` so endpoint joins
    /// append instead of replacing the last segment.
    pub fn with_base_url(
        base_url: Url,
        username: impl Into<String>,
        password: SecretString,
        timeout: Duration,
        tls: TlsMode,
    ) -> Self {
        Self {
            base_url,
            username: username.into(),
            password,
            timeout,
            tls,
        }
    }

    /// The device base URL, including the `/api/edge/` prefix.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a full endpoint URL from a path relative to the API prefix.
    ///
    /// The prefix ends in `/` and `path` must not start with one, so
    /// `Url::join` appends rather than replaces.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    /// Apply basic-auth credentials to a request builder.
    pub(crate) fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.basic_auth(&self.username, Some(self.password.expose_secret()))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn tls(&self) -> TlsMode {
        self.tls
    }

    /// Build the `reqwest::Client` shared by the device and its ports.
    ///
    /// Timeout and TLS mode are baked into the client; auth is applied
    /// per request.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("edgepoll/", env!("CARGO_PKG_VERSION")));

        if self.tls == TlsMode::DangerAcceptInvalid {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(builder.build()?)
    }
}
