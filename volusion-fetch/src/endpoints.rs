//! Request targets for the Volusion web service.
//!
//! Authenticated endpoints carry the login and encrypted password in the
//! query string, so URLs must go through [`redact`] before being logged.

use std::fmt;

use url::{Position, Url};
use volusion_core::VolusionConfig;

use crate::error::FetchError;

/// Web service path on every store.
const SERVICE_PATH: &str = "/net/WebService.aspx";

/// Generic products export.
const PRODUCTS_EXPORT: &str = "Generic\\Products";

/// Fully-qualified targets for the product operations.
#[derive(Clone)]
pub struct Endpoints {
    public_products: Url,
    products: Url,
    update_products: Url,
}

impl Endpoints {
    /// Builds every endpoint from the store configuration.
    pub fn from_config(config: &VolusionConfig) -> Result<Self, FetchError> {
        let service = config.base_url()?.join(SERVICE_PATH)?;

        let mut public_products = service.clone();
        public_products
            .query_pairs_mut()
            .append_pair("API_Name", PRODUCTS_EXPORT)
            .append_pair("SELECT_Columns", "*");

        let mut products = service.clone();
        products
            .query_pairs_mut()
            .append_pair("Login", &config.user_name)
            .append_pair("EncryptedPassword", &config.encrypted_password)
            .append_pair("EDI_Name", PRODUCTS_EXPORT)
            .append_pair("SELECT_Columns", "*");

        let mut update_products = service;
        update_products
            .query_pairs_mut()
            .append_pair("Login", &config.user_name)
            .append_pair("EncryptedPassword", &config.encrypted_password)
            .append_pair("Import", "Update");

        Ok(Self {
            public_products,
            products,
            update_products,
        })
    }

    /// Unauthenticated public products listing.
    pub fn public_products(&self) -> &Url {
        &self.public_products
    }

    /// Paged full catalog listing.
    pub fn products(&self) -> &Url {
        &self.products
    }

    /// Batch product update.
    pub fn update_products(&self) -> &Url {
        &self.update_products
    }
}

impl fmt::Debug for Endpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoints")
            .field("public_products", &redact(&self.public_products))
            .field("products", &redact(&self.products))
            .field("update_products", &redact(&self.update_products))
            .finish()
    }
}

/// Returns the URL without its query string.
pub fn redact(url: &Url) -> &str {
    &url[..Position::AfterPath]
}

// ============================================================================
// Tests
// ============================================================================
