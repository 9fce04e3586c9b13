use crate::domain::model::{Product, ProductId};
use crate::utils::error::{Result, ShopError};
use crate::utils::validation::{validate_unique_ids, Validate};
use rust_decimal::Decimal;
use std::sync::{Arc, PoisonError, RwLock};

/// Ordered product list shared between the loader, the shop actions and readers.
///
/// The list lives behind an `Arc` so `reload` is a pointer swap and `list`
/// hands out an immutable snapshot without copying.
#[derive(Debug, Default)]
pub struct CatalogStore {
    products: RwLock<Arc<Vec<Product>>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(items: Vec<Product>) -> Result<Self> {
        let store = Self::new();
        store.reload(items)?;
        Ok(store)
    }

    /// Replaces the whole catalog. Readers observe either the old or the new list.
    /// A batch with any invalid product is rejected as a whole.
    pub fn reload(&self, items: Vec<Product>) -> Result<()> {
        for item in &items {
            item.validate()?;
        }
        validate_unique_ids(items.iter().map(|p| p.id().0))?;

        let count = items.len();
        let next = Arc::new(items);
        let mut guard = self.products.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
        drop(guard);

        tracing::debug!("Catalog reloaded with {} products", count);
        Ok(())
    }

    /// Validates and appends a new product with id `max + 1`.
    pub fn add_product(&self, name: &str, price: Decimal) -> Result<Product> {
        Product::try_new(0, name.trim(), price)?;

        let mut guard = self.products.write().unwrap_or_else(PoisonError::into_inner);
        let next_id = guard
            .iter()
            .map(|p| p.id().0)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| ShopError::validation("id", "No product ids left to assign"))?;
        let product = Product::new(next_id, name.trim(), price);
        Arc::make_mut(&mut *guard).push(product.clone());
        drop(guard);

        tracing::debug!("Added product {} with id {}", product.name(), next_id);
        Ok(product)
    }

    pub fn list(&self) -> Arc<Vec<Product>> {
        let guard = self.products.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn find(&self, id: ProductId) -> Option<Product> {
        self.list().iter().find(|p| p.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}
