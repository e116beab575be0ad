//! Product catalog service.

use std::sync::Arc;

use chrono::Utc;

use storefront_core::catalog::{
    project_key_only, sorted_listings, NewProduct, Product, ProductListing,
};
use storefront_core::response::ServiceResponse;
use storefront_core::table::{Result, RowFilter, TableStore};

/// CRUD and category-scoped listing for products.
pub struct ProductCatalog {
    store: Arc<dyn TableStore<Product>>,
}

impl ProductCatalog {
    pub fn new(store: Arc<dyn TableStore<Product>>) -> Self {
        Self { store }
    }

    /// Every product, sorted by (category, name), projected for callers.
    pub async fn list_all(&self) -> ServiceResponse<Vec<ProductListing>> {
        match self.store.scan_all(&RowFilter::All).await {
            Ok(products) if products.is_empty() => {
                ServiceResponse::fail("There are no products to show.")
            }
            Ok(products) => ServiceResponse::data(sorted_listings(products)),
            Err(error) => {
                tracing::error!(%error, "Product scan failed");
                ServiceResponse::fail("There was an error getting the products.")
            }
        }
    }

    /// One page of a single category.
    ///
    /// Reads exactly one segment: a category holding more rows than the
    /// store serves per page is silently truncated.
    pub async fn list_by_category(&self, category: &str) -> ServiceResponse<Vec<ProductListing>> {
        let filter = RowFilter::Partition(category.to_string());
        match self.store.query(&filter, None, None).await {
            Ok(page) if page.rows.is_empty() => ServiceResponse::fail(format!(
                "There are no products in '{category}' category."
            )),
            Ok(page) => ServiceResponse::data(sorted_listings(page.rows)),
            Err(error) => {
                tracing::error!(%error, category, "Category query failed");
                ServiceResponse::fail("There was an error getting the products.")
            }
        }
    }

    /// Point lookup. The success projection carries the identity pair only.
    pub async fn get(&self, category: &str, name: &str) -> ServiceResponse<ProductListing> {
        match self.store.get(category, name).await {
            Ok(Some(product)) => ServiceResponse::data(project_key_only(&product)),
            Ok(None) => ServiceResponse::fail("Product not found."),
            Err(error) => {
                tracing::error!(%error, category, name, "Product lookup failed");
                ServiceResponse::fail("There was an error getting the products.")
            }
        }
    }

    /// Insert after a uniqueness pre-check on the (category, name) pair.
    pub async fn add(&self, new: NewProduct) -> ServiceResponse<String> {
        match self.store.get(&new.category, &new.name).await {
            Ok(Some(_)) => return ServiceResponse::fail("Product already exists."),
            Ok(None) => {}
            Err(error) => {
                tracing::error!(%error, "Product pre-check failed");
                return ServiceResponse::fail("There was an error adding the product.");
            }
        }

        let product = Product::from_new(new, Utc::now());
        match self.store.insert(&product).await {
            Ok(()) => ServiceResponse::ok("Product added successfully."),
            Err(error) => {
                tracing::error!(%error, "Product insert failed");
                ServiceResponse::fail("There was an error adding the product.")
            }
        }
    }

    /// Delete by the (category, name) key.
    pub async fn delete(&self, category: &str, name: &str) -> ServiceResponse<String> {
        match self.store.delete(category, name).await {
            Ok(()) => ServiceResponse::ok("Product deleted successfully."),
            Err(error) => {
                tracing::error!(%error, category, name, "Product delete failed");
                ServiceResponse::fail("There was an error deleting the product.")
            }
        }
    }

    /// Global name probe: true when any category holds a product with this
    /// name. Walks every partition. Not exposed over HTTP.
    #[allow(dead_code)]
    pub async fn exists(&self, name: &str) -> Result<bool> {
        let rows = self
            .store
            .scan_all(&RowFilter::RowKey(name.to_string()))
            .await?;
        Ok(!rows.is_empty())
    }
}
