use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{
    amount_or_default, batch_size_or_default, default_amount, default_batch_size, default_name,
    name_or_default,
};

/// A purchasable product from the provider catalog.
///
/// `pack_price` is the price of one whole pack of `batch_size` units; users
/// always pay per pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default = "default_name", deserialize_with = "name_or_default")]
    pub name: String,

    #[serde(
        rename = "unitPriceInPack",
        default = "default_amount",
        deserialize_with = "amount_or_default"
    )]
    pub pack_price: f64,

    #[serde(default = "default_batch_size", deserialize_with = "batch_size_or_default")]
    pub batch_size: f64,

    #[serde(default)]
    pub unit: Option<String>,
}

impl Product {
    pub fn new(name: impl Into<String>, pack_price: f64, batch_size: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            pack_price,
            batch_size,
            unit: None,
        }
    }

    /// Batch size clamped to something a pack count can be divided by.
    #[inline]
    pub fn effective_batch_size(&self) -> f64 {
        if self.batch_size > 0.0 {
            self.batch_size
        } else {
            1.0
        }
    }
}

/// Products keyed by their exact (raw) name.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: HashMap<String, Product>,
}

impl ProductCatalog {
    /// Build a catalog; later duplicates replace earlier ones.
    pub fn new(products: Vec<Product>) -> Self {
        let products = products
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();
        Self { products }
    }

    pub fn get(&self, name: &str) -> Option<&Product> {
        self.products.get(name)
    }

    pub fn all(&self) -> Vec<&Product> {
        let mut all: Vec<&Product> = self.products.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_format() {
        let product: Product = serde_json::from_str(
            r#"{"id": "7", "name": "Eggs", "unitPriceInPack": 2.4, "batchSize": 12, "unit": "pc"}"#,
        )
        .unwrap();
        assert_eq!(product.name, "Eggs");
        assert_eq!(product.pack_price, 2.4);
        assert_eq!(product.batch_size, 12.0);
    }

    #[test]
    fn test_missing_batch_size_defaults_to_one() {
        let product: Product = serde_json::from_str(r#"{"name": "Carrot"}"#).unwrap();
        assert_eq!(product.batch_size, 1.0);
        assert_eq!(product.pack_price, 0.0);
    }

    #[test]
    fn test_null_fields_use_defaults() {
        let product: Product = serde_json::from_str(
            r#"{"id": null, "name": null, "unitPriceInPack": null, "batchSize": null, "unit": null}"#,
        )
        .unwrap();
        assert_eq!(product.name, "unnamed");
        assert_eq!(product.pack_price, 0.0);
        assert_eq!(product.batch_size, 1.0);
        assert!(product.id.is_none());
    }

    #[test]
    fn test_effective_batch_size() {
        let mut product = Product::new("Flour", 1.0, 0.0);
        assert_eq!(product.effective_batch_size(), 1.0);
        product.batch_size = 2.5;
        assert_eq!(product.effective_batch_size(), 2.5);
    }

    #[test]
    fn test_catalog_lookup_is_exact() {
        let catalog = ProductCatalog::new(vec![Product::new("Carrot", 0.17, 1.0)]);
        assert!(catalog.get("Carrot").is_some());
        assert!(catalog.get("carrot").is_none());
    }
}
