use crate::utils::error::Result;
use crate::utils::validation::{validate_price, validate_product_name, Validate};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry. Immutable once created; two products are the same cart
/// key when their ids match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Decimal,
}

impl Product {
    pub fn new(id: u32, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: ProductId(id),
            name: name.into(),
            price,
        }
    }

    /// Like `new`, but rejects an empty name or a negative price.
    pub fn try_new(id: u32, name: impl Into<String>, price: Decimal) -> Result<Self> {
        let product = Self::new(id, name, price);
        product.validate()?;
        Ok(product)
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }
}

impl Validate for Product {
    fn validate(&self) -> Result<()> {
        validate_product_name(&self.name)?;
        validate_price(self.price)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - ${:.2}", self.name, self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.product.price() * Decimal::from(self.quantity)
    }
}

impl fmt::Display for CartLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x{} = ${:.2}",
            self.product.name(),
            self.quantity,
            self.line_total()
        )
    }
}

/// Point-in-time copy of a cart, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    lines: Vec<CartLine>,
}

impl CartSnapshot {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn quantity_of(&self, id: ProductId) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.product.id() == id)
            .map(|line| line.quantity)
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// `(name, quantity)` pairs, handy for display and assertions.
    pub fn summary(&self) -> Vec<(String, u32)> {
        self.lines
            .iter()
            .map(|line| (line.product.name().to_string(), line.quantity))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub products_loaded: usize,
    pub fetch_duration: Duration,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_display_uses_two_decimals() {
        let product = Product::new(4, "Headphones", Decimal::new(45, 0));
        assert_eq!(product.to_string(), "Headphones - $45.00");
    }

    #[test]
    fn try_new_rejects_invalid_products() {
        assert!(Product::try_new(1, "Mug", Decimal::new(1275, 2)).is_ok());
        assert!(Product::try_new(1, "Free sample", Decimal::ZERO).is_ok());
        assert!(Product::try_new(1, "  ", Decimal::ONE).is_err());
        assert!(Product::try_new(1, "Mug", Decimal::NEGATIVE_ONE).is_err());
    }

    #[test]
    fn product_deserializes_from_json_numbers() {
        let product: Product =
            serde_json::from_str(r#"{"id": 3, "name": "Coffee Mug", "price": 12.75}"#).unwrap();
        assert_eq!(product.id(), ProductId(3));
        assert_eq!(product.price(), Decimal::new(1275, 2));
    }

    #[test]
    fn snapshot_total_sums_line_totals() {
        let snapshot = CartSnapshot::new(vec![
            CartLine {
                product: Product::new(1, "Shirt", Decimal::new(1999, 2)),
                quantity: 2,
            },
            CartLine {
                product: Product::new(2, "Mug", Decimal::new(1275, 2)),
                quantity: 1,
            },
        ]);
        assert_eq!(snapshot.total(), Decimal::new(5273, 2));
        assert_eq!(snapshot.lines()[0].to_string(), "Shirt x2 = $39.98");
        assert_eq!(snapshot.quantity_of(ProductId(2)), Some(1));
        assert_eq!(snapshot.quantity_of(ProductId(9)), None);
    }
}
