use super::types::{Product, ProductListing};

/// Full public projection of a product.
pub fn project(product: &Product) -> ProductListing {
    ProductListing {
        category: product.category.clone(),
        name: product.name.clone(),
        description: Some(product.description.clone()),
        unit_price: Some(product.unit_price),
        units_in_stock: product.units_in_stock,
    }
}

/// Identity-only projection used by the point lookup.
pub fn project_key_only(product: &Product) -> ProductListing {
    ProductListing {
        category: product.category.clone(),
        name: product.name.clone(),
        description: None,
        unit_price: None,
        units_in_stock: None,
    }
}

/// Sorts by (category, name) ascending and projects for the list operations.
pub fn sorted_listings(mut products: Vec<Product>) -> Vec<ProductListing> {
    products.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.name.cmp(&b.name))
    });
    products.iter().map(project).collect()
}
