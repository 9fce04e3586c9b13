pub mod cart;
pub mod catalog;
pub mod loader;
pub mod render;
pub mod shop;

pub use crate::domain::model::{CartLine, CartSnapshot, LoadReport, Product, ProductId};
pub use crate::domain::ports::{ProductSource, Renderer};
pub use crate::utils::error::Result;
