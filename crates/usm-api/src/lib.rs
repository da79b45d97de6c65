// usm-api: Async Rust client for the USM Anywhere control plane (session API)
// and the sensor appliance's local setup API.

pub mod appliance;
pub mod auth;
pub mod control;
pub mod error;
pub mod transport;

pub use appliance::{ApplianceClient, ApplianceProbe};
pub use auth::{ApiVersion, Credentials, mask_secret};
pub use control::ControlClient;
pub use control::models;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
