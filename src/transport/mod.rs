//! HTTP transport: a configured `reqwest` client bound to the service base URL.

pub mod http;

pub use http::{HttpTransport, RawResponse, TransportError};
