use crate::domain::model::{CartLine, CartSnapshot, Product, ProductId};
use rust_decimal::Decimal;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Product quantities keyed by product id, in insertion order.
///
/// One mutex guards the whole cart; every operation takes it exactly once.
#[derive(Debug, Default)]
pub struct CartStore {
    lines: Mutex<Vec<CartLine>>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CartLine>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_item(&self, product: &Product) {
        let mut lines = self.lock();
        match lines.iter_mut().find(|line| line.product.id() == product.id()) {
            Some(line) => line.quantity += 1,
            None => lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            }),
        }
        tracing::debug!("Cart: added {} ({} lines)", product.name(), lines.len());
    }

    /// Drops the entry entirely. Returns whether anything was removed.
    pub fn remove_item(&self, id: ProductId) -> bool {
        let mut lines = self.lock();
        let before = lines.len();
        lines.retain(|line| line.product.id() != id);
        before != lines.len()
    }

    pub fn total(&self) -> Decimal {
        self.lock().iter().map(CartLine::line_total).sum()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::new(self.lock().clone())
    }

    /// Snapshot and total taken under the same lock.
    pub fn snapshot_with_total(&self) -> (CartSnapshot, Decimal) {
        let lines = self.lock();
        let total = lines.iter().map(CartLine::line_total).sum();
        (CartSnapshot::new(lines.clone()), total)
    }

    /// Runs `f` on the snapshot and total while the cart is still locked, so
    /// whatever `f` publishes is ordered the same way as the mutations.
    pub fn with_snapshot<R>(&self, f: impl FnOnce(CartSnapshot, Decimal) -> R) -> R {
        let lines = self.lock();
        let total = lines.iter().map(CartLine::line_total).sum();
        f(CartSnapshot::new(lines.clone()), total)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}
