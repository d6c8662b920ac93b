// edgepoll-api: Async Rust client for the EdgeSwitch HTTP status API

pub mod connection;
pub mod entity;
pub mod error;
pub mod port;
pub mod switch;

pub use connection::{ConnectionConfig, TlsMode};
pub use entity::Entity;
pub use error::Error;
pub use port::PortStatusClient;
pub use switch::{SwitchState, SwitchStatusClient};
