//! Commerce backend API client.
//!
//! The backend owns persistence: catalog, coupons, shipping configuration
//! and order intake. The storefront talks to it over plain JSON REST with a
//! bearer token, and caches the read-mostly catalog and shipping responses
//! using `moka` (TTL from configuration, 5 minutes by default).

use std::sync::Arc;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use meltemi_core::{Collection, Coupon, Quote, Variant};

use crate::config::CommerceApiConfig;

/// Errors that can occur when talking to the commerce backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("Backend returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// A collection page payload: the collection plus all of its variants,
/// already validated by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionPage {
    pub collection: Collection,
    pub variants: Vec<Variant>,
}

/// Summary entry in the collection listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// The order payload handed to the backend on checkout.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSubmission {
    pub lines: Vec<meltemi_core::CartLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    pub delivery_method: meltemi_core::DeliveryMethod,
    pub payment_method: meltemi_core::PaymentMethod,
    pub customer: CustomerDetails,
    /// The storefront's own computation; the backend recomputes and rejects
    /// mismatches.
    pub quote: Quote,
    pub placed_at: chrono::DateTime<chrono::Utc>,
}

/// Checkout form values forwarded to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

/// What the backend answers on order submission.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderOutcome {
    #[serde(default)]
    pub order_id: Option<meltemi_core::OrderId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Set when an external payment flow must complete the order.
    #[serde(default)]
    pub redirect_url: Option<String>,
}

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Collections,
    Collection(String),
    Shipping,
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Collections(Vec<CollectionSummary>),
    Collection(Box<CollectionPage>),
    Shipping(meltemi_core::ShippingConfig),
}

/// Client for the commerce backend API.
///
/// Cheaply cloneable; catalog and shipping reads are cached, coupon lookup
/// and order submission always hit the backend.
#[derive(Clone)]
pub struct CommerceClient {
    inner: Arc<CommerceClientInner>,
}

struct CommerceClientInner {
    client: reqwest::Client,
    base_url: Url,
    token: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl CommerceClient {
    /// Create a new backend API client.
    #[must_use]
    pub fn new(config: &CommerceApiConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(CommerceClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                token: config.token.expose_secret().to_string(),
                cache,
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        format!("{base}/{path}")
    }

    /// GET a JSON resource from the backend.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .get(self.endpoint(path))
            .bearer_auth(&self.inner.token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Backend API returned non-success status"
            );
            return Err(ApiError::Status {
                status,
                body: body.chars().take(200).collect(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// List all collections (home page).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or answers garbage.
    #[instrument(skip(self))]
    pub async fn list_collections(&self) -> Result<Vec<CollectionSummary>, ApiError> {
        if let Some(CacheValue::Collections(collections)) =
            self.inner.cache.get(&CacheKey::Collections).await
        {
            debug!("Cache hit for collection listing");
            return Ok(collections);
        }

        let collections: Vec<CollectionSummary> = self.get_json("collections").await?;
        self.inner
            .cache
            .insert(
                CacheKey::Collections,
                CacheValue::Collections(collections.clone()),
            )
            .await;
        Ok(collections)
    }

    /// Get a collection and its variants by slug.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown slug.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_collection(&self, slug: &str) -> Result<CollectionPage, ApiError> {
        let key = CacheKey::Collection(slug.to_string());
        if let Some(CacheValue::Collection(page)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for collection");
            return Ok(*page);
        }

        let page: CollectionPage = self.get_json(&format!("collections/{slug}")).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Collection(Box::new(page.clone())))
            .await;
        Ok(page)
    }

    // =========================================================================
    // Shipping & Coupons
    // =========================================================================

    /// Fetch the shipping fee configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or answers garbage.
    #[instrument(skip(self))]
    pub async fn shipping_config(&self) -> Result<meltemi_core::ShippingConfig, ApiError> {
        if let Some(CacheValue::Shipping(config)) = self.inner.cache.get(&CacheKey::Shipping).await
        {
            debug!("Cache hit for shipping config");
            return Ok(config);
        }

        let config: meltemi_core::ShippingConfig = self.get_json("shipping").await?;
        self.inner
            .cache
            .insert(CacheKey::Shipping, CacheValue::Shipping(config.clone()))
            .await;
        Ok(config)
    }

    /// Look up a coupon by code.
    ///
    /// Returns `Ok(None)` for an unknown code. Callers treat lookup failure
    /// the same as no match, but the distinction is kept here so failures
    /// still reach the logs.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or answers garbage.
    #[instrument(skip(self), fields(code = %code))]
    pub async fn lookup_coupon(&self, code: &str) -> Result<Option<Coupon>, ApiError> {
        match self.get_json::<Coupon>(&format!("coupons/{code}")).await {
            Ok(coupon) => Ok(Some(coupon)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Submit a finished order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the order (including quote
    /// mismatches) or is unreachable.
    #[instrument(skip(self, order), fields(lines = order.lines.len()))]
    pub async fn submit_order(&self, order: &OrderSubmission) -> Result<OrderOutcome, ApiError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("orders"))
            .bearer_auth(&self.inner.token)
            .json(order)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Order submission rejected"
            );
            return Err(ApiError::Status {
                status,
                body: body.chars().take(200).collect(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
