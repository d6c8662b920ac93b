// Per-port status client.
//
// GET `{base}port/{interface}/get`, parse the JSON body, and lift the
// `state` field out. Shares the device's connection config and HTTP
// client; owns nothing but its own state slot.

use std::sync::Arc;

use tracing::{debug, error};

use crate::connection::ConnectionConfig;
use crate::entity::Entity;
use crate::error::Error;
use crate::switch::SwitchStatusClient;

/// State reported for a port before its first successful poll.
pub const STATE_UNKNOWN: &str = "unknown";

/// Polled status entity for one physical switch port.
pub struct PortStatusClient {
    config: Arc<ConnectionConfig>,
    http: reqwest::Client,
    interface: String,
    name: String,
    state: String,
}

impl PortStatusClient {
    /// Create a port entity attached to an existing device client.
    ///
    /// The port reads the device's `ConnectionConfig` and reuses its
    /// HTTP client; it never takes ownership of either.
    pub fn new(device: &SwitchStatusClient, interface: impl Into<String>) -> Self {
        let interface = interface.into();
        let name = format!("{} {}", device.name(), interface);
        Self {
            config: Arc::clone(device.config()),
            http: device.http().clone(),
            interface,
            name,
            state: STATE_UNKNOWN.into(),
        }
    }

    /// The interface name this entity polls (e.g. `eth0`).
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// One poll: fetch, gate on status, then pull `state` out of the
    /// JSON body. A missing or non-string field is a parse error, not
    /// a panic -- the firmware only promises the field on healthy
    /// responses.
    async fn fetch(&self) -> Result<String, Error> {
        let path = format!("port/{}/get", self.interface);
        let url = self.config.endpoint(&path)?;
        debug!("GET {}", url);

        let resp = self
            .config
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::Status {
                status: status.as_u16(),
                path,
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        let data: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| Error::Parse {
                message: e.to_string(),
                body: body.clone(),
            })?;

        data.get("state")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| Error::Parse {
                message: "missing string field `state`".into(),
                body,
            })
    }
}

impl Entity for PortStatusClient {
    type State = String;

    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> String {
        self.state.clone()
    }

    /// All three failure kinds leave the prior state untouched; the
    /// distinction only changes what gets logged.
    async fn update(&mut self) {
        match self.fetch().await {
            Ok(state) => self.state = state,
            Err(Error::Status { status, .. }) => {
                error!(
                    interface = %self.interface,
                    status,
                    "unable to get port state from the EdgeSwitch"
                );
            }
            Err(Error::Parse { ref message, .. }) => {
                error!(
                    interface = %self.interface,
                    error = %message,
                    "EdgeSwitch returned an unparseable port status"
                );
            }
            Err(e) => {
                error!(interface = %self.interface, error = %e, "unable to reach the EdgeSwitch");
            }
        }
    }
}
