//! XML codec for product payloads.
//!
//! Both directions use the generic products document: a `<xmldata>` root
//! with one `<Products>` element per record.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::{Deserialize, Serialize};
use volusion_core::Product;

use crate::error::FetchError;

const ROOT_ELEMENT: &str = "xmldata";
const DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

#[derive(Debug, Default, Deserialize)]
#[serde(rename = "xmldata")]
struct ProductsDocument {
    #[serde(rename = "Products", default)]
    products: Vec<Product>,
}

#[derive(Serialize)]
#[serde(rename = "xmldata")]
struct ProductsDocumentRef<'a> {
    #[serde(rename = "Products")]
    products: &'a [Product],
}

fn xml_error(err: impl std::fmt::Display) -> FetchError {
    FetchError::Xml(err.to_string())
}

/// Encodes a batch of products as an update document.
pub fn encode_products(products: &[Product]) -> Result<String, FetchError> {
    let body = quick_xml::se::to_string(&ProductsDocumentRef { products }).map_err(xml_error)?;
    Ok(format!("{DECLARATION}{body}"))
}

/// Decodes a products document.
///
/// Returns `None` when the body holds no document at all, which the store
/// uses to signal an absent page.
pub fn decode_products(body: &str) -> Result<Option<Vec<Product>>, FetchError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(None);
    }

    match root_element(body)? {
        None => Ok(None),
        Some(root) if root == ROOT_ELEMENT => {
            let document: ProductsDocument = quick_xml::de::from_str(body).map_err(xml_error)?;
            Ok(Some(document.products))
        }
        Some(root) => Err(FetchError::Xml(format!(
            "unexpected root element <{root}>"
        ))),
    }
}

fn root_element(body: &str) -> Result<Option<String>, FetchError> {
    let mut reader = Reader::from_str(body);

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) | Event::Empty(e) => {
                return Ok(Some(String::from_utf8_lossy(e.name().as_ref()).into_owned()));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
