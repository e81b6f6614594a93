use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use estimate_core::api::{ApiError, CatalogApi, CreateEstimateRequest, EstimateApi, PdfDetail};
use estimate_core::model::{Estimate, LaborPrice, MaterialPrice, RenovationTemplate, Work};

/// HTTP implementation of [`EstimateApi`] and [`CatalogApi`] against the
/// JSON REST endpoints, with optional bearer-token authentication.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl HttpClient {
    /// Creates a client for the given base URL (e.g. `http://localhost:8080`).
    /// A trailing slash on the base URL is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            token: None,
            http: reqwest::Client::new(),
        }
    }

    /// Attaches a bearer token sent with every request.
    pub fn with_token(
        mut self,
        token: impl Into<String>,
    ) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(
        &self,
        path: &str,
    ) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends the request and maps non-success statuses onto [`ApiError`].
    async fn send(
        &self,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            status => {
                let message = response.text().await.unwrap_or_default();
                tracing::warn!(status = status.as_u16(), %message, "request rejected");
                Err(ApiError::Server {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(self.http.get(self.url(path))).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl EstimateApi for HttpClient {
    async fn create_estimate(
        &self,
        request: CreateEstimateRequest,
    ) -> Result<Estimate, ApiError> {
        let response = self
            .send(self.http.post(self.url("/api/estimates")).json(&request))
            .await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_estimate(
        &self,
        id: &str,
    ) -> Result<Estimate, ApiError> {
        self.get_json(&format!("/api/estimates/{id}")).await
    }

    async fn list_estimates(&self) -> Result<Vec<Estimate>, ApiError> {
        self.get_json("/api/estimates").await
    }

    async fn delete_estimate(
        &self,
        id: &str,
    ) -> Result<(), ApiError> {
        self.send(self.http.delete(self.url(&format!("/api/estimates/{id}"))))
            .await?;
        Ok(())
    }

    async fn estimate_pdf(
        &self,
        id: &str,
        detail: PdfDetail,
    ) -> Result<Vec<u8>, ApiError> {
        let response = self
            .send(self.http.get(self.url(&pdf_path(id, detail))))
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl CatalogApi for HttpClient {
    async fn list_works(&self) -> Result<Vec<Work>, ApiError> {
        self.get_json("/api/catalog/works").await
    }

    async fn works_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Work>, ApiError> {
        self.get_json(&format!("/api/catalog/works/category/{category}"))
            .await
    }

    async fn list_templates(&self) -> Result<Vec<RenovationTemplate>, ApiError> {
        self.get_json("/api/catalog/templates").await
    }

    async fn templates_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<RenovationTemplate>, ApiError> {
        self.get_json(&format!("/api/catalog/templates/category/{category}"))
            .await
    }

    async fn material_prices(&self) -> Result<Vec<MaterialPrice>, ApiError> {
        self.get_json("/api/catalog/prices/materials").await
    }

    async fn labor_prices(&self) -> Result<Vec<LaborPrice>, ApiError> {
        self.get_json("/api/catalog/prices/labor").await
    }
}

fn pdf_path(
    id: &str,
    detail: PdfDetail,
) -> String {
    format!("/api/estimates/{id}/pdf?detail={}", detail.as_query_value())
}
