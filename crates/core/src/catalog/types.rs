use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::table::TableRow;

/// A stored product. Identity is the (category, name) pair: category is the
/// partition key, name the row key. Never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub category: String,
    pub name: String,
    pub description: String,
    pub unit_price: Decimal,
    pub units_in_stock: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Builds the stored entity from caller input, stamping the creation
    /// time.
    pub fn from_new(new: NewProduct, created_at: DateTime<Utc>) -> Self {
        Self {
            category: new.category,
            name: new.name,
            description: new.description,
            unit_price: new.unit_price,
            units_in_stock: new.units_in_stock,
            created_at,
        }
    }
}

impl TableRow for Product {
    const TABLE: &'static str = "Products";
    const ENTITY: &'static str = "Product";

    fn partition_key(&self) -> &str {
        &self.category
    }

    fn row_key(&self) -> &str {
        &self.name
    }
}

/// Caller input for adding a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub unit_price: Decimal,
    pub units_in_stock: Option<i32>,
}

/// Public projection of a product. List operations fill every field; the
/// point lookup deliberately carries only the identity pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListing {
    pub category: String,
    pub name: String,
    pub description: Option<String>,
    pub unit_price: Option<Decimal>,
    pub units_in_stock: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    #[test]
    fn test_product_table_row_keys() {
        let product = Product {
            category: "Fruit".to_string(),
            name: "Apple".to_string(),
            description: "Crisp".to_string(),
            unit_price: Decimal::from_f64(1.5).unwrap(),
            units_in_stock: Some(10),
            created_at: Utc::now(),
        };

        assert_eq!(product.partition_key(), "Fruit");
        assert_eq!(product.row_key(), "Apple");
        assert_eq!(Product::TABLE, "Products");
    }

    #[test]
    fn test_from_new_stamps_creation_time() {
        let now = Utc::now();
        let new = NewProduct {
            category: "Fruit".to_string(),
            name: "Apple".to_string(),
            description: String::new(),
            unit_price: Decimal::ONE,
            units_in_stock: None,
        };

        let product = Product::from_new(new, now);

        assert_eq!(product.created_at, now);
        assert_eq!(product.name, "Apple");
    }

    #[test]
    fn test_new_product_description_defaults_in_json() {
        let json = r#"{"category":"Fruit","name":"Apple","unit_price":"1.5"}"#;
        let new: NewProduct = serde_json::from_str(json).unwrap();

        assert_eq!(new.description, "");
        assert_eq!(new.units_in_stock, None);
    }
}
