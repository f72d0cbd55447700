pub mod secrets;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "freight-quote")]
#[command(about = "Quote shipping rates for a cart against the Intelipost API")]
pub struct CliConfig {
    /// Path to the carrier TOML configuration
    #[arg(short, long, default_value = "carrier.toml")]
    pub config: String,

    /// Path to a JSON shipment request (cart lines, destination, weight)
    #[arg(long)]
    pub cart: Option<String>,

    /// Print the allowed shipping methods and exit
    #[arg(long)]
    pub allowed_methods: bool,

    /// Print rates as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Emit JSON log lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
