#![allow(dead_code)]

use async_trait::async_trait;
use rust_decimal::Decimal;
use small_cart::{CartSnapshot, Product, ProductSource, Renderer, Result, ShopError};
use std::time::Duration;
use tokio::task::JoinHandle;

pub fn shirt() -> Product {
    Product::new(1, "Shirt", Decimal::new(1999, 2))
}

pub fn mug() -> Product {
    Product::new(2, "Mug", Decimal::new(1275, 2))
}

#[derive(Debug, Clone, PartialEq)]
pub enum Seen {
    Catalog(Vec<String>),
    Cart(Vec<(String, u32)>, Decimal),
    Total(Decimal),
    Notice(String),
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub seen: Vec<Seen>,
}

impl Renderer for RecordingRenderer {
    fn on_catalog_updated(&mut self, items: &[Product]) {
        let names = items.iter().map(|p| p.name().to_string()).collect();
        self.seen.push(Seen::Catalog(names));
    }

    fn on_cart_updated(&mut self, snapshot: &CartSnapshot, total: Decimal) {
        self.seen.push(Seen::Cart(snapshot.summary(), total));
    }

    fn on_total(&mut self, total: Decimal) {
        self.seen.push(Seen::Total(total));
    }

    fn on_notice(&mut self, message: &str) {
        self.seen.push(Seen::Notice(message.to_string()));
    }
}

/// Waits for the render context to drain. Every handle must be dropped first.
pub async fn finish(task: JoinHandle<RecordingRenderer>) -> Vec<Seen> {
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("render context did not shut down")
        .expect("render task panicked")
        .seen
}

pub struct StaticSource(pub Vec<Product>);

#[async_trait]
impl ProductSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<Product>> {
        Ok(self.0.clone())
    }
}

pub struct FailingSource;

#[async_trait]
impl ProductSource for FailingSource {
    async fn fetch(&self) -> Result<Vec<Product>> {
        tokio::time::sleep(Duration::from_millis(10)).await;
        Err(ShopError::source_fetch("database unreachable"))
    }
}
