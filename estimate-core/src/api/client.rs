use async_trait::async_trait;
use thiserror::Error;

use super::types::{CreateEstimateRequest, PdfDetail};
use crate::model::{Estimate, LaborPrice, MaterialPrice, RenovationTemplate, Work};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication required or token rejected")]
    Unauthorized,

    #[error("resource not found")]
    NotFound,

    #[error("server rejected the request ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("could not decode response: {0}")]
    Decode(String),
}

/// The bearer-token-authenticated estimate service: persists submitted
/// drafts and renders their PDFs.
#[async_trait]
pub trait EstimateApi: Send + Sync {
    /// Submits a draft; the server assigns the id and computes the totals.
    async fn create_estimate(
        &self,
        request: CreateEstimateRequest,
    ) -> Result<Estimate, ApiError>;

    async fn get_estimate(
        &self,
        id: &str,
    ) -> Result<Estimate, ApiError>;

    async fn list_estimates(&self) -> Result<Vec<Estimate>, ApiError>;

    async fn delete_estimate(
        &self,
        id: &str,
    ) -> Result<(), ApiError>;

    /// Fetches the rendered PDF for a persisted estimate.
    async fn estimate_pdf(
        &self,
        id: &str,
        detail: PdfDetail,
    ) -> Result<Vec<u8>, ApiError>;
}

/// The read-only catalog of predefined works and renovation templates used
/// to pre-fill draft entries.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_works(&self) -> Result<Vec<Work>, ApiError>;

    async fn works_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Work>, ApiError>;

    async fn list_templates(&self) -> Result<Vec<RenovationTemplate>, ApiError>;

    async fn templates_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<RenovationTemplate>, ApiError>;

    /// Scraped market prices for materials, for sanity-checking entered
    /// prices against current rates.
    async fn material_prices(&self) -> Result<Vec<MaterialPrice>, ApiError>;

    /// Scraped market rates for labor, the counterpart of
    /// [`CatalogApi::material_prices`].
    async fn labor_prices(&self) -> Result<Vec<LaborPrice>, ApiError>;
}
