use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_cli_logger(verbose: bool) {
    let filter = default_filter(verbose);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

fn default_filter(verbose: bool) -> EnvFilter {
    let directives = if verbose {
        "freight_quote=debug,info"
    } else {
        "freight_quote=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

/// JSON lines on stdout, for storefronts that ship logs to a collector.
/// Event fields such as `carrier` and `kind` sit at the top level of each line.
pub fn init_json_logger(verbose: bool) {
    let filter = default_filter(verbose);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(verbose)
                .json()
                .flatten_event(true)
                .with_current_span(false),
        )
        .init();
}
