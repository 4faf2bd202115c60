//! Product operations against one store.
//!
//! Every remote call goes through the matching retry profile and, once it
//! succeeds, through the rate limiter. Calls are strictly sequential: a
//! paginated fetch never requests page N+1 before page N and its pause are
//! done.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use url::Url;
use volusion_core::{Product, VolusionConfig};

use crate::delay::{FixedDelay, RateLimiter};
use crate::endpoints::Endpoints;
use crate::error::FetchError;
use crate::settings::FetchSettings;
use crate::transport::{HttpTransport, Transport};
use crate::xml::{decode_products, encode_products};

// ============================================================================
// Products Service
// ============================================================================

/// Fetches and updates catalog products.
///
/// Cheap to clone; clones share the transport and rate limiter.
#[derive(Clone)]
pub struct ProductsService {
    transport: Arc<dyn Transport>,
    rate_limiter: Arc<dyn RateLimiter>,
    endpoints: Endpoints,
    settings: FetchSettings,
}

impl ProductsService {
    /// Creates a service with the HTTP transport and a fixed post-call delay.
    pub fn new(config: &VolusionConfig) -> Result<Self, FetchError> {
        Self::builder(config).build()
    }

    /// Creates a builder for customizing the service.
    pub fn builder(config: &VolusionConfig) -> ProductsServiceBuilder {
        ProductsServiceBuilder::new(config)
    }

    /// Returns the service settings.
    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// Returns the request targets.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetches the public products listing in a single call.
    #[instrument(skip(self))]
    pub async fn get_public_products(&self) -> Result<Vec<Product>, FetchError> {
        let products = self
            .fetch_page("get_public_products", self.endpoints.public_products())
            .await?
            .unwrap_or_default();

        info!(count = products.len(), "Fetched public products");
        Ok(products)
    }

    /// Fetches the full catalog, page by page, until the store returns an
    /// empty page.
    ///
    /// The store tracks the cursor itself, so every request targets the same
    /// URL. Without a `max_pages` bound an endpoint that never returns an
    /// empty page keeps this looping. On any failure the pages collected so
    /// far are dropped.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, FetchError> {
        let url = self.endpoints.products();
        let mut products = Vec::new();
        let mut pages = 0usize;

        loop {
            let page = match self.fetch_page("get_products", url).await? {
                Some(page) if !page.is_empty() => page,
                _ => break,
            };

            pages += 1;
            if let Some(max_pages) = self.settings.max_pages.filter(|&max| pages > max) {
                warn!(max_pages, fetched = products.len(), "Page limit exceeded");
                return Err(FetchError::PaginationLimit { max_pages });
            }

            debug!(page = pages, count = page.len(), "Received page");
            products.extend(page);
        }

        info!(count = products.len(), pages, "Fetched products");
        Ok(products)
    }

    /// Submits a batch of product changes in one call.
    ///
    /// The store keys updates by SKU. Duplicate SKUs in one batch are sent
    /// as given. An empty batch is still submitted.
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub async fn update_products(&self, products: &[Product]) -> Result<(), FetchError> {
        let body = encode_products(products)?;
        let body = body.as_str();
        let url = self.endpoints.update_products();

        self.settings
            .submit_retry
            .execute("update_products", move || self.transport.post(url, body))
            .await?;
        self.rate_limiter.wait().await;

        info!(count = products.len(), "Updated products");
        Ok(())
    }

    /// One read through the get profile, followed by the API delay.
    async fn fetch_page(
        &self,
        operation: &str,
        url: &Url,
    ) -> Result<Option<Vec<Product>>, FetchError> {
        let page = self
            .settings
            .get_retry
            .execute(operation, move || self.get_decoded(url))
            .await?;
        self.rate_limiter.wait().await;
        Ok(page)
    }

    async fn get_decoded(&self, url: &Url) -> Result<Option<Vec<Product>>, FetchError> {
        match self.transport.get(url).await? {
            Some(body) => decode_products(&body),
            None => Ok(None),
        }
    }
}

impl fmt::Debug for ProductsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductsService")
            .field("endpoints", &self.endpoints)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Products Service Builder
// ============================================================================

/// Builder for constructing a `ProductsService`.
pub struct ProductsServiceBuilder {
    config: VolusionConfig,
    transport: Option<Arc<dyn Transport>>,
    rate_limiter: Option<Arc<dyn RateLimiter>>,
    settings: Option<FetchSettings>,
}

impl ProductsServiceBuilder {
    /// Creates a new builder.
    pub fn new(config: &VolusionConfig) -> Self {
        Self {
            config: config.clone(),
            transport: None,
            rate_limiter: None,
            settings: None,
        }
    }

    /// Sets the transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the post-call rate limiter.
    pub fn rate_limiter(mut self, rate_limiter: Arc<dyn RateLimiter>) -> Self {
        self.rate_limiter = Some(rate_limiter);
        self
    }

    /// Sets the settings, replacing those derived from the configuration.
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Builds the service.
    pub fn build(self) -> Result<ProductsService, FetchError> {
        self.config.validate()?;

        let settings = self
            .settings
            .unwrap_or_else(|| FetchSettings::from_config(&self.config));
        let endpoints = Endpoints::from_config(&self.config)?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::with_timeout(settings.timeout)?),
        };
        let rate_limiter: Arc<dyn RateLimiter> = match self.rate_limiter {
            Some(rate_limiter) => rate_limiter,
            None => Arc::new(FixedDelay::new(settings.api_delay)),
        };

        debug!(shop = %self.config.shop_domain, "Built products service");

        Ok(ProductsService {
            transport,
            rate_limiter,
            endpoints,
            settings,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
