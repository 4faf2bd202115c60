//! Domain models for the Volusion client.
//!
//! - [`product`] - Catalog product records keyed by SKU

mod product;

pub use product::Product;
