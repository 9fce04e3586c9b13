pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{ConsoleRenderer, FileProductSource, HttpProductSource, SampleProductSource};
pub use config::ShopConfig;
pub use core::{
    cart::CartStore,
    catalog::CatalogStore,
    loader::Loader,
    render::{RenderContext, RenderEvent, RenderHandle},
    shop::Shop,
};
pub use domain::model::{CartLine, CartSnapshot, LoadReport, Product, ProductId};
pub use domain::ports::{ProductSource, Renderer};
pub use utils::error::{Result, ShopError};
