use clap::Parser;
use freight_quote::core::{RateQuoteResult, ShipmentRequest};
use freight_quote::utils::error::ErrorSeverity;
use freight_quote::utils::{logger, validation::Validate};
use freight_quote::{
    CliConfig, FreightCarrier, FreightError, LogChannel, PlainTextSecrets, QuoteOutcome, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting freight-quote");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => fail(e),
    };

    let carrier = match FreightCarrier::with_http(config, PlainTextSecrets, LogChannel) {
        Ok(carrier) => carrier,
        Err(e) => fail(e),
    };

    if args.allowed_methods {
        for (code, name) in carrier.allowed_methods() {
            println!("{}\t{}", code, name);
        }
        return Ok(());
    }

    let Some(cart_path) = args.cart.as_deref() else {
        eprintln!("❌ --cart is required unless --allowed-methods is given");
        std::process::exit(1);
    };

    let request = match load_request(cart_path) {
        Ok(request) => request,
        Err(e) => fail(e),
    };

    match carrier.quote(&request).await {
        Ok(QuoteOutcome::Mapped(result)) => print_rates(&result, args.json)?,
        Ok(outcome) => {
            if let Some(reason) = outcome.decline_error() {
                report(&reason);
            }
            println!("No quote available");
            std::process::exit(2);
        }
        Err(e) => fail(e),
    }

    Ok(())
}

fn load_request(path: &str) -> freight_quote::Result<ShipmentRequest> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}


fn print_rates(result: &RateQuoteResult, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    if result.is_empty() {
        println!("Carrier quoted, but offered no delivery options");
        return Ok(());
    }

    for rate in &result.rates {
        println!(
            "{:<12} {:<30} price {:>9.2}  cost {:>9.2}",
            rate.carrier, rate.method_title, rate.price, rate.cost
        );
    }
    Ok(())
}

fn report(e: &FreightError) {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

fn fail(e: FreightError) -> ! {
    report(&e);
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 2,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
