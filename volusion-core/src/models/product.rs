//! Product records.
//!
//! Field names follow the Volusion generic products export, so the same
//! type serves both the XML wire format and JSON snapshots.

use serde::{Deserialize, Serialize};

// ============================================================================
// Product
// ============================================================================

/// A single catalog product.
///
/// The SKU (`ProductCode`) is the identity of a product. Update batches are
/// keyed by it on the remote side. Blank numeric fields in an export read as
/// zero stock or no value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Product {
    /// Remote numeric identifier.
    #[serde(
        rename = "ProductID",
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub product_id: Option<u64>,

    /// Stock-keeping unit.
    #[serde(rename = "ProductCode", default)]
    pub sku: String,

    /// Display name.
    #[serde(rename = "ProductName", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Units in stock.
    #[serde(rename = "StockStatus", default, deserialize_with = "lenient::quantity")]
    pub quantity: i64,

    /// Regular price.
    #[serde(
        rename = "ProductPrice",
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,

    /// Sale price, when the product is on sale.
    #[serde(
        rename = "SalePrice",
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub sale_price: Option<f64>,

    /// Shipping weight.
    #[serde(
        rename = "ProductWeight",
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<f64>,
}

impl Product {
    /// Creates a product with the given SKU and stock quantity.
    pub fn new(sku: impl Into<String>, quantity: i64) -> Self {
        Self {
            sku: sku.into(),
            quantity,
            ..Default::default()
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the regular price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the sale price.
    pub fn with_sale_price(mut self, price: f64) -> Self {
        self.sale_price = Some(price);
        self
    }

    /// Returns true if the product is on sale below its regular price.
    pub fn is_on_sale(&self) -> bool {
        match (self.sale_price, self.price) {
            (Some(sale), Some(regular)) => sale > 0.0 && sale < regular,
            _ => false,
        }
    }

    /// Returns true if at least one unit is in stock.
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

// ============================================================================
// Lenient Numbers
// ============================================================================

/// Numeric fields that accept native numbers, numeric text, or a blank value.
///
/// XML exports carry every field as element text and leave unset numbers
/// empty (`<ProductPrice/>`).
mod lenient {
    use std::fmt;
    use std::marker::PhantomData;
    use std::str::FromStr;

    use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Unexpected, Visitor};

    /// Key under which XML deserializers expose element text.
    const TEXT_KEY: &str = "$text";

    pub(super) trait Number: FromStr + Sized {
        fn from_i64(v: i64) -> Option<Self>;
        fn from_u64(v: u64) -> Option<Self>;
        fn from_f64(v: f64) -> Option<Self>;
    }

    impl Number for i64 {
        fn from_i64(v: i64) -> Option<Self> {
            Some(v)
        }
        fn from_u64(v: u64) -> Option<Self> {
            i64::try_from(v).ok()
        }
        fn from_f64(_: f64) -> Option<Self> {
            None
        }
    }

    impl Number for u64 {
        fn from_i64(v: i64) -> Option<Self> {
            u64::try_from(v).ok()
        }
        fn from_u64(v: u64) -> Option<Self> {
            Some(v)
        }
        fn from_f64(_: f64) -> Option<Self> {
            None
        }
    }

    #[allow(clippy::cast_precision_loss)]
    impl Number for f64 {
        fn from_i64(v: i64) -> Option<Self> {
            Some(v as f64)
        }
        fn from_u64(v: u64) -> Option<Self> {
            Some(v as f64)
        }
        fn from_f64(v: f64) -> Option<Self> {
            Some(v)
        }
    }

    /// Blank reads as zero.
    pub(super) fn quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(optional(deserializer)?.unwrap_or_default())
    }

    /// Blank reads as `None`.
    pub(super) fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Number,
    {
        deserializer.deserialize_any(NumberVisitor(PhantomData))
    }

    struct NumberVisitor<T>(PhantomData<T>);

    impl<'de, T: Number> Visitor<'de> for NumberVisitor<T> {
        type Value = Option<T>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or an empty value")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            T::from_i64(v)
                .map(Some)
                .ok_or_else(|| E::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            T::from_u64(v)
                .map(Some)
                .ok_or_else(|| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            T::from_f64(v)
                .map(Some)
                .ok_or_else(|| E::invalid_value(Unexpected::Float(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let v = v.trim();
            if v.is_empty() {
                return Ok(None);
            }
            v.parse()
                .map(Some)
                .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(self)
        }

        // An XML element arrives as a map; its text, if any, under `$text`.
        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut text = None;
            while let Some(key) = map.next_key::<String>()? {
                if key == TEXT_KEY {
                    text = Some(map.next_value::<String>()?);
                } else {
                    map.next_value::<IgnoredAny>()?;
                }
            }

            match text {
                Some(text) => self.visit_str(&text),
                None => Ok(None),
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product() {
        let product = Product::new("ah-chairbamboo", 26);
        assert_eq!(product.sku, "ah-chairbamboo");
        assert_eq!(product.quantity, 26);
        assert!(product.price.is_none());
        assert!(product.in_stock());
    }

    #[test]
    fn test_sale_detection() {
        let product = Product::new("a", 1).with_price(10.0).with_sale_price(7.5);
        assert!(product.is_on_sale());

        let no_discount = Product::new("b", 1).with_price(10.0).with_sale_price(12.0);
        assert!(!no_discount.is_on_sale());

        assert!(!Product::new("c", 0).is_on_sale());
    }

    #[test]
    fn test_wire_field_names() {
        let product = Product::new("sku-1", 3).with_name("Chair");
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["ProductCode"], "sku-1");
        assert_eq!(json["StockStatus"], 3);
        assert_eq!(json["ProductName"], "Chair");
        assert!(json.get("ProductPrice").is_none());
    }

    #[test]
    fn test_numeric_text_and_blanks() {
        let product: Product = serde_json::from_str(
            r#"{"ProductCode": "x", "StockStatus": " 12 ", "ProductPrice": "", "SalePrice": null, "ProductWeight": 2}"#,
        )
        .unwrap();
        assert_eq!(product.quantity, 12);
        assert!(product.price.is_none());
        assert!(product.sale_price.is_none());
        assert_eq!(product.weight, Some(2.0));

        let blank: Product =
            serde_json::from_str(r#"{"ProductCode": "y", "StockStatus": ""}"#).unwrap();
        assert_eq!(blank.quantity, 0);
    }

    #[test]
    fn test_non_numeric_quantity_rejected() {
        let result = serde_json::from_str::<Product>(r#"{"ProductCode": "x", "StockStatus": "many"}"#);
        assert!(result.is_err());

        let fractional = serde_json::from_str::<Product>(r#"{"ProductCode": "x", "StockStatus": 1.5}"#);
        assert!(fractional.is_err());
    }

    #[test]
    fn test_missing_quantity_defaults_to_zero() {
        let product: Product = serde_json::from_str(r#"{"ProductCode": "x"}"#).unwrap();
        assert_eq!(product.quantity, 0);
        assert!(!product.in_stock());
    }
}
