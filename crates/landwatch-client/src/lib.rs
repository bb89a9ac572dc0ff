//! # landwatch-client
//!
//! The request half of every page section: build a request from a fixed
//! endpoint and an optional JSON payload, send it through a [`Transport`],
//! classify the response and normalise failures into one [`ClientError`].
//!
//! - [`ApiClient`] offers one typed method per backend endpoint
//! - [`ReqwestTransport`] talks to a live backend
//! - `MockTransport` (tests, or the `test-support` feature) scripts responses

pub mod client;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod transport;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use client::ApiClient;
pub use endpoints::Endpoint;
pub use error::ClientError;
pub use request::{ApiRequest, Method, RawResponse, ResponseBody};
pub use transport::{ReqwestTransport, Transport};

#[cfg(any(test, feature = "test-support"))]
pub use mock::MockTransport;
