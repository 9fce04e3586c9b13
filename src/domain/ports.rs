use crate::domain::model::{CartSnapshot, Product};
use crate::utils::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Where the loader gets its product batches from. May be slow.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Product>>;

    fn describe(&self) -> String {
        "product source".to_string()
    }
}

/// Presentation callbacks. Only ever invoked from the render context task.
pub trait Renderer: Send + 'static {
    fn on_catalog_updated(&mut self, items: &[Product]);

    fn on_cart_updated(&mut self, snapshot: &CartSnapshot, total: Decimal);

    fn on_total(&mut self, _total: Decimal) {}

    fn on_notice(&mut self, _message: &str) {}
}
