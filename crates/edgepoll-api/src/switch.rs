// Device-level status client.
//
// One GET against `{base}switch/get` per poll; only the HTTP status
// code matters. Reachability is the signal, the body is ignored.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error};

use crate::connection::ConnectionConfig;
use crate::entity::Entity;
use crate::error::Error;

/// Reachability state of the switch as a whole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SwitchState {
    On,
    Off,
    #[default]
    Unknown,
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Polled status entity for the EdgeSwitch device.
///
/// Owns the `reqwest::Client` shared with its port entities and the
/// `Arc<ConnectionConfig>` they all read.
pub struct SwitchStatusClient {
    config: Arc<ConnectionConfig>,
    http: reqwest::Client,
    name: String,
    state: SwitchState,
}

impl SwitchStatusClient {
    /// Create a client for one device. Builds the shared HTTP client
    /// from the connection config.
    pub fn new(config: ConnectionConfig) -> Result<Self, Error> {
        let http = config.build_client()?;
        Ok(Self {
            config: Arc::new(config),
            http,
            name: "EdgeSwitch".into(),
            state: SwitchState::default(),
        })
    }

    /// Override the display name (defaults to `EdgeSwitch`).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The connection config, for deriving port clients.
    pub fn config(&self) -> &Arc<ConnectionConfig> {
        &self.config
    }

    /// The shared HTTP client, for deriving port clients.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// One reachability probe: any answer is a state, no answer is not.
    async fn fetch(&self) -> Result<SwitchState, Error> {
        let url = self.config.endpoint("switch/get")?;
        debug!("GET {}", url);

        let resp = self
            .config
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(Error::Transport)?;

        if resp.status() == reqwest::StatusCode::OK {
            Ok(SwitchState::On)
        } else {
            Ok(SwitchState::Off)
        }
    }
}

impl Entity for SwitchStatusClient {
    type State = SwitchState;

    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> SwitchState {
        self.state
    }

    /// HTTP 200 means on, any other status means off. A transport
    /// failure leaves the previous state in place so a flaky network
    /// does not flap the entity.
    async fn update(&mut self) {
        match self.fetch().await {
            Ok(state) => self.state = state,
            Err(e) => {
                error!(device = %self.name, error = %e, "unable to reach the EdgeSwitch");
            }
        }
    }
}
