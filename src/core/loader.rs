use crate::core::catalog::CatalogStore;
use crate::core::render::{RenderEvent, RenderHandle};
use crate::domain::model::LoadReport;
use crate::domain::ports::ProductSource;
use crate::utils::error::Result;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// One-shot catalog refresh: fetch, reload, then notify the render context.
#[derive(Clone)]
pub struct Loader {
    source: Arc<dyn ProductSource>,
    catalog: Arc<CatalogStore>,
    render: RenderHandle,
}

impl Loader {
    pub fn new(
        source: Arc<dyn ProductSource>,
        catalog: Arc<CatalogStore>,
        render: RenderHandle,
    ) -> Self {
        Self {
            source,
            catalog,
            render,
        }
    }

    pub async fn run(&self) -> Result<LoadReport> {
        let started = Instant::now();
        tracing::info!("Loading products from {}", self.source.describe());

        let batch = match self.source.fetch().await {
            Ok(batch) => batch,
            Err(e) => {
                tracing::error!("Product fetch failed, catalog left unchanged: {}", e);
                // The notice is best effort; the caller still gets the fetch error.
                let _ = self.render.notice(e.user_friendly_message());
                return Err(e);
            }
        };
        let fetch_duration = started.elapsed();

        let products_loaded = batch.len();
        if let Err(e) = self.catalog.reload(batch) {
            tracing::error!("Rejected product batch: {}", e);
            let _ = self.render.notice(e.user_friendly_message());
            return Err(e);
        }

        // Enqueued only after the reload is visible to readers.
        if let Err(e) = self
            .render
            .send(RenderEvent::CatalogUpdated(self.catalog.list()))
        {
            tracing::warn!("Catalog reloaded but not rendered: {}", e);
        }

        tracing::info!(
            "Loaded {} products in {:?}",
            products_loaded,
            fetch_duration
        );

        Ok(LoadReport {
            products_loaded,
            fetch_duration,
            completed_at: Utc::now(),
        })
    }

    /// Runs the loader on its own task.
    pub fn spawn(&self) -> JoinHandle<Result<LoadReport>> {
        let loader = self.clone();
        tokio::spawn(async move { loader.run().await })
    }
}
