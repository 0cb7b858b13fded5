// lmsync-api: Async Rust client for the LogicMonitor REST API (LMv1 signed)

pub mod client;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod payload;
pub mod sign;
pub mod transport;

pub use client::{Credentials, LmClient, MutationReply};
pub use endpoint::{EndpointFamily, ResourcePath};
pub use error::Error;
pub use transport::TransportConfig;
