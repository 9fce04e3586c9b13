pub mod toml_config;

pub use toml_config::{LoaderConfig, ShopConfig, SourceConfig, SourceKind};

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::{ShopConfig, SourceKind};
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "small-cart")]
    #[command(about = "A small concurrent shopping cart with a console front end")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Where the loader fetches products from
        #[arg(long, value_enum)]
        pub source: Option<SourceKind>,

        /// JSON product file for the `file` source
        #[arg(long)]
        pub products_file: Option<String>,

        /// Endpoint for the `http` source
        #[arg(long)]
        pub endpoint: Option<String>,

        /// Simulated latency of the sample source
        #[arg(long)]
        pub load_delay_ms: Option<u64>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub log_json: bool,
    }

    impl CliConfig {
        /// Loads the config file (if any) and applies CLI overrides on top.
        pub fn resolve(&self) -> Result<ShopConfig> {
            let mut config = match &self.config {
                Some(path) => ShopConfig::from_file(path)?,
                None => ShopConfig::default(),
            };

            if let Some(kind) = self.source {
                config.source.r#type = kind;
            }
            if let Some(path) = &self.products_file {
                config.source.path = Some(path.clone());
                if self.source.is_none() {
                    config.source.r#type = SourceKind::File;
                }
            }
            if let Some(endpoint) = &self.endpoint {
                config.source.endpoint = Some(endpoint.clone());
                if self.source.is_none() {
                    config.source.r#type = SourceKind::Http;
                }
            }
            if let Some(delay) = self.load_delay_ms {
                config.loader.delay_ms = Some(delay);
            }

            config.validate()?;
            Ok(config)
        }
    }

}
