// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Volusion Core
//!
//! Core types, models, and configuration for the Volusion catalog client.
//!
//! This crate provides the foundational pieces shared by the fetch layer:
//!
//! - [`Product`] - Catalog product record keyed by SKU
//! - [`VolusionConfig`] - Store credentials, endpoint base, and call pacing
//! - [`CoreError`] - Configuration and model errors

pub mod config;
pub mod error;
pub mod models;

pub use config::VolusionConfig;
pub use error::CoreError;
pub use models::Product;
