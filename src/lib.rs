pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::config::{secrets::PlainTextSecrets, toml_config::TomlConfig};
pub use crate::core::{
    carrier::{FreightCarrier, QuoteOutcome},
    client::QuoteClient,
    notifier::{DimensionNotifier, LogChannel},
};
pub use utils::error::{FreightError, Result, TransportError};
