//! Blocking facade over [`ProductsService`].
//!
//! Owns a current-thread tokio runtime and drives the async operations to
//! completion on the calling thread. Do not call these methods from inside
//! an async context; use [`ProductsService`] there instead.

use tokio::runtime::{Builder, Runtime};
use volusion_core::{Product, VolusionConfig};

use crate::error::FetchError;
use crate::service::ProductsService;

/// Synchronous product operations.
#[derive(Debug)]
pub struct BlockingProductsService {
    inner: ProductsService,
    runtime: Runtime,
}

impl BlockingProductsService {
    /// Creates a blocking service with the default transport and delay.
    pub fn new(config: &VolusionConfig) -> Result<Self, FetchError> {
        Self::from_service(ProductsService::new(config)?)
    }

    /// Wraps an already configured async service.
    pub fn from_service(inner: ProductsService) -> Result<Self, FetchError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { inner, runtime })
    }

    /// Returns the wrapped async service.
    pub fn inner(&self) -> &ProductsService {
        &self.inner
    }

    /// Blocking [`ProductsService::get_public_products`].
    pub fn get_public_products(&self) -> Result<Vec<Product>, FetchError> {
        self.runtime.block_on(self.inner.get_public_products())
    }

    /// Blocking [`ProductsService::get_products`].
    pub fn get_products(&self) -> Result<Vec<Product>, FetchError> {
        self.runtime.block_on(self.inner.get_products())
    }

    /// Blocking [`ProductsService::update_products`].
    pub fn update_products(&self, products: &[Product]) -> Result<(), FetchError> {
        self.runtime.block_on(self.inner.update_products(products))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{CountingLimiter, ScriptedTransport, empty_page, page};
    use crate::retry::RetryStrategy;
    use crate::settings::FetchSettings;
    use std::time::Duration;

    fn blocking(
        transport: &std::sync::Arc<ScriptedTransport>,
        limiter: &std::sync::Arc<CountingLimiter>,
    ) -> BlockingProductsService {
        let config = VolusionConfig::new("www.myshop.com", "admin", "secret").unwrap();
        let settings = FetchSettings::default()
            .with_get_retry(RetryStrategy::new(2).with_base_delay(Duration::ZERO))
            .with_submit_retry(RetryStrategy::new(2).with_base_delay(Duration::ZERO));
        let service = ProductsService::builder(&config)
            .transport(transport.clone())
            .rate_limiter(limiter.clone())
            .settings(settings)
            .build()
            .unwrap();
        BlockingProductsService::from_service(service).unwrap()
    }

    #[test]
    fn test_blocking_pagination() {
        let transport = ScriptedTransport::new()
            .with_get(page(&[("a", 1), ("b", 2)]))
            .with_get(page(&[("c", 3)]))
            .with_get(empty_page())
            .shared();
        let limiter = CountingLimiter::for_transport(&transport);

        let products = blocking(&transport, &limiter).get_products().unwrap();

        let skus: Vec<_> = products.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["a", "b", "c"]);
        assert_eq!(transport.get_calls(), 3);
        assert_eq!(limiter.waits(), 3);
    }

    #[test]
    fn test_blocking_public_products() {
        let transport = ScriptedTransport::new()
            .with_get(page(&[("p", 7)]))
            .shared();
        let limiter = CountingLimiter::for_transport(&transport);

        let products = blocking(&transport, &limiter).get_public_products().unwrap();
        assert_eq!(products, vec![Product::new("p", 7)]);
    }

    #[test]
    fn test_blocking_update_retries() {
        let transport = ScriptedTransport::new()
            .with_post(Err(FetchError::ServerError { status: 502 }))
            .shared();
        let limiter = CountingLimiter::for_transport(&transport);

        blocking(&transport, &limiter)
            .update_products(&[Product::new("x", 26)])
            .unwrap();

        assert_eq!(transport.post_calls(), 2);
        assert_eq!(limiter.waits(), 1);
    }
}
