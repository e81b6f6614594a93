//! Backends for the core's outward-facing capabilities: the HTTP client for
//! the estimate and catalog APIs, and the JSON-file session slot.

mod http;
mod storage;

pub use http::HttpClient;
pub use storage::JsonFileStorage;
