// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Volusion Fetch
//!
//! Product catalog operations against the Volusion web service.
//!
//! Every remote call runs under a [`RetryStrategy`] and is followed by a
//! fixed pause from a [`RateLimiter`], so a store is never called faster
//! than its API allows.
//!
//! ## Operations
//!
//! - [`ProductsService::get_public_products`] - One-shot public listing
//! - [`ProductsService::get_products`] - Full catalog, paged until empty
//! - [`ProductsService::update_products`] - Batch update keyed by SKU
//!
//! [`BlockingProductsService`] offers the same operations for synchronous
//! callers.
//!
//! ## Seams
//!
//! - [`transport::Transport`] - Network calls ([`HttpTransport`] by default)
//! - [`delay::RateLimiter`] - Post-call pause ([`FixedDelay`] by default)
//! - [`xml`] - Product document codec
//! - [`endpoints`] - Request targets built from [`VolusionConfig`]
//!
//! ## Example
//!
//! ```ignore
//! use volusion_fetch::{ProductsService, VolusionConfig};
//!
//! let config = VolusionConfig::new("www.myshop.com", "admin@myshop.com", "ENCRYPTED")?;
//! let service = ProductsService::new(&config)?;
//!
//! let mut products = service.get_products().await?;
//! for product in &mut products {
//!     product.quantity += 1;
//! }
//! service.update_products(&products).await?;
//! ```

pub mod blocking;
pub mod delay;
pub mod endpoints;
pub mod error;
pub mod retry;
pub mod service;
pub mod settings;
pub mod transport;
pub mod xml;

#[cfg(test)]
mod mock;

// Re-export key types at crate root
pub use blocking::BlockingProductsService;
pub use delay::{FixedDelay, RateLimiter};
pub use endpoints::Endpoints;
pub use error::FetchError;
pub use retry::{Backoff, RetryStrategy};
pub use service::{ProductsService, ProductsServiceBuilder};
pub use settings::FetchSettings;
pub use transport::{HttpTransport, Transport};

pub use volusion_core::{CoreError, Product, VolusionConfig};
