use crate::domain::model::{CartSnapshot, Product};
use crate::domain::ports::Renderer;
use crate::utils::error::{Result, ShopError};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub enum RenderEvent {
    CatalogUpdated(Arc<Vec<Product>>),
    CartUpdated { snapshot: CartSnapshot, total: Decimal },
    Total(Decimal),
    Notice(String),
}

/// Sending half of the render queue. Clone freely across tasks.
#[derive(Debug, Clone)]
pub struct RenderHandle {
    tx: mpsc::UnboundedSender<RenderEvent>,
}

impl RenderHandle {
    pub fn send(&self, event: RenderEvent) -> Result<()> {
        self.tx.send(event).map_err(|_| ShopError::RenderClosed)
    }

    pub fn notice(&self, message: impl Into<String>) -> Result<()> {
        self.send(RenderEvent::Notice(message.into()))
    }
}

/// The single task that owns the renderer and applies events in order.
pub struct RenderContext;

impl RenderContext {
    /// Spawns the render task. It exits once every handle is dropped and
    /// gives the renderer back.
    pub fn start<R: Renderer>(renderer: R) -> (RenderHandle, JoinHandle<R>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(Self::run(renderer, rx));
        (RenderHandle { tx }, task)
    }

    async fn run<R: Renderer>(mut renderer: R, mut rx: mpsc::UnboundedReceiver<RenderEvent>) -> R {
        while let Some(event) = rx.recv().await {
            match event {
                RenderEvent::CatalogUpdated(items) => renderer.on_catalog_updated(&items),
                RenderEvent::CartUpdated { snapshot, total } => {
                    renderer.on_cart_updated(&snapshot, total)
                }
                RenderEvent::Total(total) => renderer.on_total(total),
                RenderEvent::Notice(message) => renderer.on_notice(&message),
            }
        }
        tracing::debug!("Render context shut down");
        renderer
    }
}
