use crate::core::cart::CartStore;
use crate::core::catalog::CatalogStore;
use crate::core::loader::Loader;
use crate::core::render::{RenderEvent, RenderHandle};
use crate::domain::model::{CartSnapshot, LoadReport, Product, ProductId};
use crate::domain::ports::ProductSource;
use crate::utils::error::{Result, ShopError};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// The actions a presentation layer can trigger. Every action that changes
/// what the user sees ends by queueing a render event.
#[derive(Clone)]
pub struct Shop {
    catalog: Arc<CatalogStore>,
    cart: Arc<CartStore>,
    loader: Loader,
    render: RenderHandle,
}

impl Shop {
    pub fn new(source: Arc<dyn ProductSource>, render: RenderHandle) -> Self {
        Self::with_stores(
            source,
            Arc::new(CatalogStore::new()),
            Arc::new(CartStore::new()),
            render,
        )
    }

    pub fn with_stores(
        source: Arc<dyn ProductSource>,
        catalog: Arc<CatalogStore>,
        cart: Arc<CartStore>,
        render: RenderHandle,
    ) -> Self {
        let loader = Loader::new(source, Arc::clone(&catalog), render.clone());
        Self {
            catalog,
            cart,
            loader,
            render,
        }
    }

    pub fn catalog(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }

    pub fn cart(&self) -> &Arc<CartStore> {
        &self.cart
    }

    pub fn reload_products(&self) -> JoinHandle<Result<LoadReport>> {
        self.loader.spawn()
    }

    pub fn add_to_cart(&self, id: ProductId) -> JoinHandle<Result<CartSnapshot>> {
        let shop = self.clone();
        tokio::spawn(async move {
            let Some(product) = shop.catalog.find(id) else {
                return shop.reject(ShopError::ProductNotFound { id: id.0 });
            };
            shop.cart.add_item(&product);
            Ok(shop.publish_cart())
        })
    }

    /// Parses the raw form input and appends a new product to the catalog.
    pub fn add_product(&self, name: &str, price_text: &str) -> Result<Product> {
        let name = name.trim();
        let price_text = price_text.trim();
        if name.is_empty() || price_text.is_empty() {
            return self.reject(ShopError::validation("name", "Provide name and price."));
        }
        let price = match Decimal::from_str(price_text) {
            Ok(price) => price,
            Err(_) => return self.reject(ShopError::validation("price", "Invalid price format.")),
        };

        let product = match self.catalog.add_product(name, price) {
            Ok(product) => product,
            Err(e) => return self.reject(e),
        };
        tracing::info!("Added product {} (id {})", product.name(), product.id());
        self.publish(RenderEvent::CatalogUpdated(self.catalog.list()));
        Ok(product)
    }

    pub fn remove_from_cart(&self, id: ProductId) -> Result<CartSnapshot> {
        if !self.cart.remove_item(id) {
            tracing::debug!("Product {} was not in the cart", id);
        }
        Ok(self.publish_cart())
    }

    pub fn clear_cart(&self) -> Result<CartSnapshot> {
        self.cart.clear();
        tracing::info!("Cart cleared");
        Ok(self.publish_cart())
    }

    pub fn show_total(&self) -> Result<Decimal> {
        let total = self.cart.total();
        self.publish(RenderEvent::Total(total));
        Ok(total)
    }

    /// Queues the cart update while the cart is locked, so concurrent actions
    /// reach the render context in the order they changed the cart.
    fn publish_cart(&self) -> CartSnapshot {
        self.cart.with_snapshot(|snapshot, total| {
            self.publish(RenderEvent::CartUpdated {
                snapshot: snapshot.clone(),
                total,
            });
            snapshot
        })
    }

    /// Render updates are best effort: the action already happened.
    fn publish(&self, event: RenderEvent) {
        if let Err(e) = self.render.send(event) {
            tracing::warn!("Dropped render update: {}", e);
        }
    }

    fn reject<T>(&self, err: ShopError) -> Result<T> {
        tracing::warn!("{}", err);
        self.publish(RenderEvent::Notice(err.user_friendly_message()));
        Err(err)
    }
}
