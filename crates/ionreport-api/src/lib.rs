// ionreport-api: Async Rust client for the SD-WAN controller REST API

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod resources;
pub mod transport;

pub use client::ControllerClient;
pub use error::Error;
pub use models::{Element, ElementExtension, Interface, ListResponse, Profile, Site, Tenant};
pub use transport::{TlsMode, TransportConfig};
