use crate::domain::model::Product;
use crate::domain::ports::ProductSource;
use crate::utils::error::{Result, ShopError};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(150);

/// Built-in demo catalog, served after a simulated I/O delay.
#[derive(Debug, Clone)]
pub struct SampleProductSource {
    delay: Duration,
}

impl SampleProductSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn sample_products() -> Vec<Product> {
        vec![
            Product::new(1, "Blue T-Shirt", Decimal::new(1999, 2)),
            Product::new(2, "Notebook", Decimal::new(650, 2)),
            Product::new(3, "Coffee Mug", Decimal::new(1275, 2)),
            Product::new(4, "Headphones", Decimal::new(4500, 2)),
        ]
    }
}

impl Default for SampleProductSource {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_DELAY)
    }
}

#[async_trait]
impl ProductSource for SampleProductSource {
    async fn fetch(&self) -> Result<Vec<Product>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Self::sample_products())
    }

    fn describe(&self) -> String {
        format!("sample catalog ({:?} delay)", self.delay)
    }
}

/// Reads a JSON array of `{id, name, price}` objects from disk on every fetch.
#[derive(Debug, Clone)]
pub struct FileProductSource {
    path: PathBuf,
}

impl FileProductSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProductSource for FileProductSource {
    async fn fetch(&self) -> Result<Vec<Product>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ShopError::source_fetch(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        let products: Vec<Product> = serde_json::from_str(&content)?;
        tracing::debug!(
            "Read {} products from {}",
            products.len(),
            self.path.display()
        );
        Ok(products)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Fetches the catalog from an HTTP endpoint returning a JSON array.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    endpoint: String,
    client: Client,
}

impl HttpProductSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch(&self) -> Result<Vec<Product>> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| ShopError::source_fetch(e.to_string()))?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            return Err(ShopError::source_fetch(format!(
                "{} returned {}",
                self.endpoint, status
            )));
        }

        let body = response.text().await?;
        let products: Vec<Product> = serde_json::from_str(&body)?;
        Ok(products)
    }

    fn describe(&self) -> String {
        format!("endpoint {}", self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_source_serves_the_demo_catalog() {
        let source = SampleProductSource::new(Duration::ZERO);
        let products = tokio_test::block_on(source.fetch()).unwrap();
        let names: Vec<&str> = products.iter().map(Product::name).collect();
        assert_eq!(names, ["Blue T-Shirt", "Notebook", "Coffee Mug", "Headphones"]);
    }
}
