use crate::domain::model::{CartSnapshot, Product};
use crate::domain::ports::Renderer;
use rust_decimal::Decimal;
use std::io::{self, Write};

/// Renders catalog and cart updates as plain text.
pub struct ConsoleRenderer<W: Write + Send + 'static> {
    out: W,
}

impl ConsoleRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + 'static> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write to console: {}", e);
        }
    }
}

pub fn format_catalog(items: &[Product]) -> String {
    let mut text = String::from("Products:\n");
    if items.is_empty() {
        text.push_str("  (none)\n");
    }
    for product in items {
        text.push_str(&format!("  [{}] {}\n", product.id(), product));
    }
    text
}

pub fn format_cart(snapshot: &CartSnapshot, total: Decimal) -> String {
    let mut text = String::from("Cart:\n");
    for line in snapshot.lines() {
        text.push_str(&format!("  {}\n", line));
    }
    text.push_str(&format!("\nTotal: ${:.2}\n", total));
    text
}

impl<W: Write + Send + 'static> Renderer for ConsoleRenderer<W> {
    fn on_catalog_updated(&mut self, items: &[Product]) {
        let text = format_catalog(items);
        self.emit(&text);
    }

    fn on_cart_updated(&mut self, snapshot: &CartSnapshot, total: Decimal) {
        let text = format_cart(snapshot, total);
        self.emit(&text);
    }

    fn on_total(&mut self, total: Decimal) {
        self.emit(&format!("Cart total: ${:.2}\n", total));
    }

    fn on_notice(&mut self, message: &str) {
        self.emit(&format!("! {}\n", message));
    }
}
