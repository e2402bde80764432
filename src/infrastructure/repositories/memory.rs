//! In-memory catalog store.
//!
//! Both tables live behind one lock, so every call is atomic with respect
//! to every other call, and the same integrity rules as the PostgreSQL
//! schema are enforced: identity columns, primary-key uniqueness, non-blank
//! names, positive prices and `ON DELETE RESTRICT` on `products.category_id`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::domain::{
    Category, CategoryRepository, NewCategory, NewProduct, Product, ProductRepository,
};
use crate::shared::error::StoreError;
use crate::shared::validation::{has_price_scale, is_blank};

#[derive(Debug, Clone)]
struct CategoryRecord {
    name: String,
    description: Option<String>,
}

#[derive(Debug)]
struct Tables {
    categories: BTreeMap<i32, CategoryRecord>,
    products: BTreeMap<i32, Product>,
    next_category_id: i32,
    next_product_id: i32,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            categories: BTreeMap::new(),
            products: BTreeMap::new(),
            next_category_id: 1,
            next_product_id: 1,
        }
    }
}

impl Tables {
    fn category(&self, id: i32, include_products: bool) -> Option<Category> {
        let record = self.categories.get(&id)?;
        let products = if include_products {
            self.products
                .values()
                .filter(|p| p.belongs_to(id))
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        Some(Category {
            id,
            name: record.name.clone(),
            description: record.description.clone(),
            products,
        })
    }

    fn count_products(&self, category_id: i32) -> i64 {
        self.products
            .values()
            .filter(|p| p.belongs_to(category_id))
            .count() as i64
    }

    fn check_product(&self, name: &str, price: Decimal, category_id: i32) -> Result<(), StoreError> {
        if is_blank(name) {
            return Err(StoreError::CheckViolation("products_name_check".into()));
        }
        // NUMERIC(18, 2) would round the value before the check runs
        if price <= Decimal::ZERO || !has_price_scale(price) {
            return Err(StoreError::CheckViolation("products_price_check".into()));
        }
        if !self.categories.contains_key(&category_id) {
            return Err(StoreError::ForeignKeyViolation(format!(
                "category {} is not present in categories",
                category_id
            )));
        }
        Ok(())
    }
}

/// Assign the next identity, honouring an explicit id the way an
/// identity column plus a re-synced sequence would.
fn assign_id<V>(rows: &BTreeMap<i32, V>, next: &mut i32, explicit: Option<i32>) -> Result<i32, StoreError> {
    let id = match explicit {
        Some(id) => {
            if rows.contains_key(&id) {
                return Err(StoreError::UniqueViolation(format!("key (id)=({id}) already exists")));
            }
            id
        }
        None => {
            while rows.contains_key(&*next) {
                let current = *next;
                *next = current.checked_add(1).ok_or_else(|| {
                    StoreError::IdentityExhausted(format!("no id after {current}"))
                })?;
            }
            *next
        }
    };
    // Saturates at i32::MAX, which the loop above then reports as exhausted.
    *next = (*next).max(id.saturating_add(1));
    Ok(id)
}

/// Catalog store held entirely in process memory. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalogStore {
    async fn find_all(&self, include_products: bool) -> Result<Vec<Category>, StoreError> {
        let tables = self.tables.read();
        Ok(tables
            .categories
            .keys()
            .filter_map(|id| tables.category(*id, include_products))
            .collect())
    }

    async fn find_by_id(
        &self,
        id: i32,
        include_products: bool,
    ) -> Result<Option<Category>, StoreError> {
        Ok(self.tables.read().category(id, include_products))
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.tables.read().categories.contains_key(&id))
    }

    async fn insert(&self, category: &NewCategory) -> Result<Category, StoreError> {
        if is_blank(&category.name) {
            return Err(StoreError::CheckViolation("categories_name_check".into()));
        }

        let mut tables = self.tables.write();
        let Tables {
            categories,
            next_category_id,
            ..
        } = &mut *tables;
        let id = assign_id(categories, next_category_id, category.id)?;

        categories.insert(
            id,
            CategoryRecord {
                name: category.name.clone(),
                description: category.description.clone(),
            },
        );

        Ok(Category {
            id,
            name: category.name.clone(),
            description: category.description.clone(),
            products: Vec::new(),
        })
    }

    async fn update(&self, category: &Category) -> Result<Option<Category>, StoreError> {
        if is_blank(&category.name) {
            return Err(StoreError::CheckViolation("categories_name_check".into()));
        }

        let mut tables = self.tables.write();
        let Some(record) = tables.categories.get_mut(&category.id) else {
            return Ok(None);
        };
        record.name = category.name.clone();
        record.description = category.description.clone();

        Ok(tables.category(category.id, true))
    }

    async fn count_products(&self, id: i32) -> Result<i64, StoreError> {
        Ok(self.tables.read().count_products(id))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut tables = self.tables.write();
        if !tables.categories.contains_key(&id) {
            return Ok(false);
        }
        if tables.count_products(id) > 0 {
            return Err(StoreError::ForeignKeyViolation(format!(
                "category {id} is still referenced from products"
            )));
        }
        tables.categories.remove(&id);
        Ok(true)
    }

    async fn delete_with_products(&self, id: i32) -> Result<bool, StoreError> {
        let mut tables = self.tables.write();
        if tables.categories.remove(&id).is_none() {
            return Ok(false);
        }
        tables.products.retain(|_, p| !p.belongs_to(id));
        Ok(true)
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalogStore {
    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.tables.read().products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, StoreError> {
        Ok(self.tables.read().products.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.tables.read().products.contains_key(&id))
    }

    async fn insert(&self, product: &NewProduct) -> Result<Product, StoreError> {
        let mut tables = self.tables.write();
        tables.check_product(&product.name, product.price, product.category_id)?;

        let Tables {
            products,
            next_product_id,
            ..
        } = &mut *tables;
        let id = assign_id(products, next_product_id, product.id)?;

        let created = Product {
            id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category_id: product.category_id,
        };
        products.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, product: &Product) -> Result<Option<Product>, StoreError> {
        let mut tables = self.tables.write();
        if !tables.products.contains_key(&product.id) {
            return Ok(None);
        }
        tables.check_product(&product.name, product.price, product.category_id)?;

        tables.products.insert(product.id, product.clone());
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.tables.write().products.remove(&id).is_some())
    }
}
