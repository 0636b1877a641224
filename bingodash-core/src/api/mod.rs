//! Backend access: route table, response envelope decoding, the reqwest
//! client and the [`AdminApi`] service trait the stores talk to.

pub mod adapter;
pub mod client;
pub mod envelope;
pub mod params;
pub mod routes;
pub mod service;

pub use client::HttpApiClient;
pub use envelope::{Envelope, extract_error_message};
pub use params::ListRequest;
pub use service::AdminApi;

#[cfg(test)]
pub use service::MockAdminApi;
