//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! domain types. Testable in isolation without DynamoDB access. Entity
//! identity lives in the PK/SK attributes; everything else is a named data
//! attribute.

use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use storefront_core::catalog::Product;
use storefront_core::review::Review;
use storefront_core::table::{Result, TableError, TableRow};

/// A [`TableRow`] that knows its DynamoDB item encoding.
///
/// The store has exactly one implementation of the four primitive operations;
/// this trait is the per-entity part.
pub trait DynamoRecord: TableRow {
    fn to_item(&self) -> HashMap<String, AttributeValue>;
    fn from_item(item: &HashMap<String, AttributeValue>) -> Result<Self>;
}

impl DynamoRecord for Product {
    fn to_item(&self) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();

        item.insert(
            "PK".to_string(),
            AttributeValue::S(self.category.clone()),
        );
        item.insert("SK".to_string(), AttributeValue::S(self.name.clone()));

        item.insert(
            "description".to_string(),
            AttributeValue::S(self.description.clone()),
        );
        item.insert(
            "unitPrice".to_string(),
            AttributeValue::N(self.unit_price.to_string()),
        );
        if let Some(stock) = self.units_in_stock {
            item.insert(
                "unitsInStock".to_string(),
                AttributeValue::N(stock.to_string()),
            );
        }
        item.insert(
            "createdAt".to_string(),
            AttributeValue::S(self.created_at.to_rfc3339()),
        );

        item
    }

    fn from_item(item: &HashMap<String, AttributeValue>) -> Result<Self> {
        Ok(Product {
            category: get_string(item, "PK")?,
            name: get_string(item, "SK")?,
            description: get_string(item, "description")?,
            unit_price: get_decimal(item, "unitPrice")?,
            units_in_stock: get_optional_i32(item, "unitsInStock")?,
            created_at: get_datetime(item, "createdAt")?,
        })
    }
}

impl DynamoRecord for Review {
    fn to_item(&self) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();

        item.insert(
            "PK".to_string(),
            AttributeValue::S(self.product_name.clone()),
        );
        item.insert("SK".to_string(), AttributeValue::S(self.time_key.clone()));

        item.insert(
            "userName".to_string(),
            AttributeValue::S(self.user_name.clone()),
        );
        item.insert(
            "comment".to_string(),
            AttributeValue::S(self.comment.clone()),
        );
        item.insert(
            "createdAt".to_string(),
            AttributeValue::S(self.created_at.to_rfc3339()),
        );

        item
    }

    fn from_item(item: &HashMap<String, AttributeValue>) -> Result<Self> {
        Ok(Review {
            product_name: get_string(item, "PK")?,
            time_key: get_string(item, "SK")?,
            user_name: get_string(item, "userName")?,
            comment: get_string(item, "comment")?,
            created_at: get_datetime(item, "createdAt")?,
        })
    }
}

// ============================================================================
// Attribute helpers
// ============================================================================

fn get_string(item: &HashMap<String, AttributeValue>, name: &str) -> Result<String> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| TableError::Serialization(format!("missing string attribute '{name}'")))
}

fn get_decimal(item: &HashMap<String, AttributeValue>, name: &str) -> Result<Decimal> {
    let raw = item
        .get(name)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| TableError::Serialization(format!("missing number attribute '{name}'")))?;

    Decimal::from_str(raw)
        .map_err(|e| TableError::Serialization(format!("invalid decimal '{raw}': {e}")))
}

fn get_optional_i32(item: &HashMap<String, AttributeValue>, name: &str) -> Result<Option<i32>> {
    match item.get(name) {
        None => Ok(None),
        Some(value) => {
            let raw = value.as_n().map_err(|_| {
                TableError::Serialization(format!("attribute '{name}' is not a number"))
            })?;
            raw.parse::<i32>()
                .map(Some)
                .map_err(|e| TableError::Serialization(format!("invalid integer '{raw}': {e}")))
        }
    }
}

fn get_datetime(item: &HashMap<String, AttributeValue>, name: &str) -> Result<DateTime<Utc>> {
    let raw = get_string(item, name)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| TableError::Serialization(format!("invalid timestamp '{raw}': {e}")))
}
