//! Demo-data seeding for development environments.
//!
//! Seeds go through the catalog services, so they obey the same validation
//! as API writes. Each table is only seeded while it is empty.

use anyhow::{Context, Result};
use rust_decimal::Decimal;

use crate::application::services::{
    CategoryService, CreateCategoryDto, CreateProductDto, ProductService,
};

const DEMO_CATEGORIES: &[(&str, &str)] = &[
    ("Electronics", "Electronic gadgets and devices"),
    ("Books", "Wide variety of books"),
    ("Clothing", "Clothing and accessories"),
    ("Test Category", "This is a test category."),
];

/// (name, description, price in cents, category name)
const DEMO_PRODUCTS: &[(&str, &str, i64, &str)] = &[
    ("Smartphone", "Latest model with advanced features", 99999, "Electronics"),
    ("Laptop", "Powerful laptop for professionals", 150000, "Electronics"),
    ("Science Fiction Novel", "A captivating science fiction novel", 1599, "Books"),
    ("Test Product", "This is a test product.", 1999, "Test Category"),
];

/// What a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub products: usize,
}

/// Insert the demo catalog into empty tables.
pub async fn seed_demo_data(
    categories: &dyn CategoryService,
    products: &dyn ProductService,
) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    if categories.get_all().await?.is_empty() {
        for (name, description) in DEMO_CATEGORIES {
            categories
                .add(CreateCategoryDto {
                    id: None,
                    name: name.to_string(),
                    description: Some(description.to_string()),
                })
                .await
                .with_context(|| format!("seeding category {name}"))?;
            report.categories += 1;
        }
    }

    if products.get_all().await?.is_empty() {
        let existing = categories.get_all().await?;
        for (name, description, cents, category_name) in DEMO_PRODUCTS {
            // Skip products whose category was renamed or removed by hand.
            let Some(category) = existing.iter().find(|c| c.name == *category_name) else {
                tracing::warn!(product = name, category = category_name, "Demo category missing, skipping");
                continue;
            };

            products
                .add(CreateProductDto {
                    id: None,
                    name: name.to_string(),
                    description: Some(description.to_string()),
                    price: Decimal::new(*cents, 2),
                    category_id: category.id,
                })
                .await
                .with_context(|| format!("seeding product {name}"))?;
            report.products += 1;
        }
    }

    tracing::info!(
        categories = report.categories,
        products = report.products,
        "Demo data seeded"
    );
    Ok(report)
}
