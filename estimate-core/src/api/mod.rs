//! Contracts for the external collaborators: the estimate API the draft is
//! submitted to, and the read-only catalog it is pre-filled from. The core
//! only defines the shapes and traits; transports live in backend crates.

mod client;
mod types;

pub use client::{ApiError, CatalogApi, EstimateApi};
pub use types::{CreateEstimateRequest, PdfDetail};
