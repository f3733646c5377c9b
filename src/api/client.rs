use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument, warn};

use super::dto::{paths, HealthStatus};
use super::error::{ApiError, ApiResult};
use crate::catalog::dto::ClassifyRequest;
use crate::catalog::{CatalogItem, SustainabilityAssessment};
use crate::config::ApiConfig;
use crate::recipes::{CartMeals, Recipe};

/// Remote classification and recipe service.
#[async_trait]
pub trait EcoApi: Send + Sync {
    async fn fetch_catalog(&self) -> ApiResult<Vec<CatalogItem>>;
    async fn fetch_recommendations(&self) -> ApiResult<Vec<CatalogItem>>;
    async fn classify(&self, name: &str) -> ApiResult<SustainabilityAssessment>;
    async fn generate_random_recipes(&self) -> ApiResult<Vec<Recipe>>;
    async fn generate_recipes_for_cart(&self, ingredient_names: &[String])
        -> ApiResult<CartMeals>;
    async fn health(&self) -> ApiResult<HealthStatus>;
}

#[derive(Clone)]
pub struct HttpEcoApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpEcoApi {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("http client: {e}")))?;
        Ok(Self::with_client(config.base_url.clone(), client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let raw = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let url = Url::parse(&raw).map_err(|e| {
            warn!(url = %raw, error = %e, "cannot build endpoint");
            ApiError::InvalidRequest(format!("{raw}: {e}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidRequest(format!(
                "{raw}: unsupported scheme {}",
                url.scheme()
            )));
        }
        Ok(url)
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let url = self.endpoint(path)?;
        debug!(%method, path, "api request");
        Ok(self.client.request(method, url))
    }

    async fn send(&self, req: RequestBuilder, path: &str) -> ApiResult<Bytes> {
        let res = req.send().await.map_err(|e| {
            error!(path, error = %e, "transport failure");
            ApiError::Network(e)
        })?;
        let status = res.status();
        let status_err = res.error_for_status_ref().err();
        let body = res.bytes().await.map_err(|e| {
            error!(path, error = %e, "failed reading body");
            ApiError::Network(e)
        })?;
        if let Some(status_err) = status_err {
            if is_blank(&body) {
                error!(path, %status, "service returned error status");
                return Err(ApiError::Network(status_err));
            }
            // error bodies surface as contract mismatches
            let body = String::from_utf8_lossy(&body).into_owned();
            warn!(path, %status, body = %body, "service returned error status");
            return Err(ApiError::Decode {
                source: serde::de::Error::custom(format!("unexpected status {status}")),
                body,
            });
        }
        debug!(path, %status, bytes = body.len(), "api response");
        Ok(body)
    }
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

fn require_body(path: &str, body: Bytes) -> ApiResult<Bytes> {
    if is_blank(&body) {
        warn!(path, "empty response body");
        return Err(ApiError::EmptyResponse);
    }
    Ok(body)
}

fn decode<T: DeserializeOwned>(path: &str, body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|source| {
        let body = String::from_utf8_lossy(body).into_owned();
        warn!(path, error = %source, body = %body, "response does not match contract");
        ApiError::Decode { source, body }
    })
}

#[async_trait]
impl EcoApi for HttpEcoApi {
    #[instrument(skip(self))]
    async fn fetch_catalog(&self) -> ApiResult<Vec<CatalogItem>> {
        let req = self.request(Method::GET, paths::ALL_ITEMS)?;
        let body = self.send(req, paths::ALL_ITEMS).await?;
        decode(paths::ALL_ITEMS, &body)
    }

    #[instrument(skip(self))]
    async fn fetch_recommendations(&self) -> ApiResult<Vec<CatalogItem>> {
        let req = self.request(Method::GET, paths::RECOMMENDATIONS)?;
        let body = self.send(req, paths::RECOMMENDATIONS).await?;
        decode(paths::RECOMMENDATIONS, &body)
    }

    #[instrument(skip(self))]
    async fn classify(&self, name: &str) -> ApiResult<SustainabilityAssessment> {
        let req = self
            .request(Method::POST, paths::CLASSIFY)?
            .json(&ClassifyRequest { food_name: name });
        let body = require_body(paths::CLASSIFY, self.send(req, paths::CLASSIFY).await?)?;
        decode(paths::CLASSIFY, &body)
    }

    #[instrument(skip(self))]
    async fn generate_random_recipes(&self) -> ApiResult<Vec<Recipe>> {
        let req = self.request(Method::POST, paths::RANDOM_MEALS)?;
        let body = require_body(
            paths::RANDOM_MEALS,
            self.send(req, paths::RANDOM_MEALS).await?,
        )?;
        decode(paths::RANDOM_MEALS, &body)
    }

    #[instrument(skip(self), fields(count = ingredient_names.len()))]
    async fn generate_recipes_for_cart(
        &self,
        ingredient_names: &[String],
    ) -> ApiResult<CartMeals> {
        let req = self
            .request(Method::POST, paths::CART_MEALS)?
            .json(ingredient_names);
        let body = require_body(paths::CART_MEALS, self.send(req, paths::CART_MEALS).await?)?;
        decode(paths::CART_MEALS, &body)
    }

    #[instrument(skip(self))]
    async fn health(&self) -> ApiResult<HealthStatus> {
        let req = self.request(Method::GET, paths::HEALTH)?;
        let body = require_body(paths::HEALTH, self.send(req, paths::HEALTH).await?)?;
        decode(paths::HEALTH, &body)
    }
}
