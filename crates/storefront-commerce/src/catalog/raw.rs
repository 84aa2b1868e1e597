//! Loosely-typed catalog records and their validation into [`Product`].
//!
//! Fields with the wrong type count as absent. Prices that do not parse
//! fall back to zero.

use crate::catalog::{CatalogLabels, Product, UNNAMED_PRODUCT};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde_json::{Map, Value};

const ID_KEYS: &[&str] = &["id"];
const NAME_KEYS: &[&str] = &["name"];
const CATEGORY_KEYS: &[&str] = &["category"];
const CURRENT_PRICE_KEYS: &[&str] = &["currentPrice", "current_price", "price"];
const ORIGINAL_PRICE_KEYS: &[&str] = &["originalPrice", "original_price"];
const IMAGE_KEYS: &[&str] = &["image", "imageUrl", "image_url"];
const DESCRIPTION_KEYS: &[&str] = &["description"];

/// A catalog record of unknown shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    fields: Map<String, Value>,
}

impl RawRecord {
    /// Wrap a JSON value. Only objects are records.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// The record's own id, rendered as text.
    ///
    /// Strings are trimmed; integral numbers render without a fractional part.
    pub fn raw_id(&self) -> Option<String> {
        ID_KEYS
            .iter()
            .filter_map(|key| self.fields.get(*key))
            .find_map(id_text)
    }

    /// The record's trimmed, non-empty name.
    pub fn name(&self) -> Option<String> {
        self.text(NAME_KEYS)
    }

    /// A record is kept when it has an id or a name.
    pub fn is_retained(&self) -> bool {
        self.raw_id().is_some() || self.name().is_some()
    }

    /// Build the strict product under the given id.
    pub(crate) fn into_product(
        self,
        id: ProductId,
        labels: &CatalogLabels,
        currency: Currency,
    ) -> Product {
        Product {
            id,
            name: self
                .name()
                .unwrap_or_else(|| UNNAMED_PRODUCT.to_string()),
            category: self
                .text(CATEGORY_KEYS)
                .unwrap_or_else(|| labels.uncategorized.clone()),
            current_price: Money::from_decimal(self.price(CURRENT_PRICE_KEYS), currency),
            original_price: Money::from_decimal(self.price(ORIGINAL_PRICE_KEYS), currency),
            image: self.text(IMAGE_KEYS),
            description: self.text(DESCRIPTION_KEYS),
        }
    }

    /// Build a product from an admin edit.
    ///
    /// Unlike merged records the raw id is used as-is; a record without an id
    /// gets a freshly generated one.
    pub fn into_admin_product(
        self,
        labels: &CatalogLabels,
        currency: Currency,
    ) -> Result<Product, CommerceError> {
        if !self.is_retained() {
            return Err(CommerceError::ValidationError(
                "product needs an id or a name".to_string(),
            ));
        }
        let id = self
            .raw_id()
            .map(ProductId::new)
            .unwrap_or_else(ProductId::generate);
        Ok(self.into_product(id, labels, currency))
    }

    fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.fields.get(*key))
            .find_map(|value| match value {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                _ => None,
            })
    }

    fn price(&self, keys: &[&str]) -> f64 {
        keys.iter()
            .find_map(|key| self.fields.get(*key))
            .map(parse_price)
            .unwrap_or(0.0)
    }
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().map(|f| {
                    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
                        (f as i64).to_string()
                    } else {
                        f.to_string()
                    }
                })
            }
        }
        _ => None,
    }
}

/// Coerce a JSON price into a non-negative decimal.
///
/// Numbers and numeric strings are accepted; anything else, and any negative
/// or non-finite result, becomes zero.
pub fn parse_price(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(p) if p.is_finite() && p >= 0.0 => p,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        RawRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_only_objects_are_records() {
        assert!(RawRecord::from_value(json!([1, 2])).is_none());
        assert!(RawRecord::from_value(json!("tea")).is_none());
        assert!(RawRecord::from_value(Value::Null).is_none());
    }

    #[test]
    fn test_raw_id_forms() {
        assert_eq!(record(json!({"id": " x7 "})).raw_id().as_deref(), Some("x7"));
        assert_eq!(record(json!({"id": 12})).raw_id().as_deref(), Some("12"));
        assert_eq!(record(json!({"id": 3.0})).raw_id().as_deref(), Some("3"));
        assert_eq!(record(json!({"id": 2.5})).raw_id().as_deref(), Some("2.5"));
        assert!(record(json!({"id": ""})).raw_id().is_none());
        assert!(record(json!({"id": true})).raw_id().is_none());
        assert!(record(json!({"id": null})).raw_id().is_none());
    }

    #[test]
    fn test_retention() {
        assert!(record(json!({"id": 1})).is_retained());
        assert!(record(json!({"name": "Tea"})).is_retained());
        assert!(!record(json!({"name": "   ", "category": "Drinks"})).is_retained());
        assert!(!record(json!({"currentPrice": 10})).is_retained());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(&json!(12.5)), 12.5);
        assert_eq!(parse_price(&json!(" 40 ")), 40.0);
        assert_eq!(parse_price(&json!("forty")), 0.0);
        assert_eq!(parse_price(&json!(-3)), 0.0);
        assert_eq!(parse_price(&json!(null)), 0.0);
        assert_eq!(parse_price(&json!({"amount": 3})), 0.0);
        assert_eq!(parse_price(&json!("NaN")), 0.0);
    }

    #[test]
    fn test_into_product_defaults() {
        let p = record(json!({"id": 5}))
            .into_product(ProductId::new("A-5"), &CatalogLabels::default(), Currency::EGP);
        assert_eq!(p.name, UNNAMED_PRODUCT);
        assert_eq!(p.category, "uncategorized");
        assert!(p.current_price.is_zero());
        assert!(p.original_price.is_zero());
        assert!(p.image.is_none());
    }

    #[test]
    fn test_into_product_fields() {
        let p = record(json!({
            "id": "9",
            "name": " Rice ",
            "category": "Pantry",
            "currentPrice": "35.5",
            "originalPrice": 40,
            "image": "https://img.example/rice.png",
            "description": "Egyptian rice"
        }))
        .into_product(ProductId::new("B-9"), &CatalogLabels::default(), Currency::EGP);

        assert_eq!(p.name, "Rice");
        assert_eq!(p.category, "Pantry");
        assert_eq!(p.current_price.amount_cents, 3550);
        assert_eq!(p.original_price.amount_cents, 4000);
        assert_eq!(p.image.as_deref(), Some("https://img.example/rice.png"));
        assert_eq!(p.description.as_deref(), Some("Egyptian rice"));
    }

    #[test]
    fn test_custom_uncategorized_label() {
        let labels = CatalogLabels {
            all: "\u{0627}\u{0644}\u{0643}\u{0644}".to_string(),
            uncategorized: "\u{0623}\u{062e}\u{0631}\u{0649}".to_string(),
        };
        let p = record(json!({"name": "Honey", "category": ""}))
            .into_product(ProductId::new("A-auto-0"), &labels, Currency::EGP);
        assert_eq!(p.category, labels.uncategorized);
    }

    #[test]
    fn test_admin_product_keeps_id() {
        let p = record(json!({"id": "A-1", "name": "Tea"}))
            .into_admin_product(&CatalogLabels::default(), Currency::EGP)
            .unwrap();
        assert_eq!(p.id.as_str(), "A-1");

        let generated = record(json!({"name": "New"}))
            .into_admin_product(&CatalogLabels::default(), Currency::EGP)
            .unwrap();
        assert!(generated.id.as_str().starts_with("local-"));

        assert!(record(json!({"category": "x"}))
            .into_admin_product(&CatalogLabels::default(), Currency::EGP)
            .is_err());
    }
}
