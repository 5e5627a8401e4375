use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATES: [&str; 3] = ["xcodetocmake", "xcodetocmake_pbxproj", "xcodetocmake_cmake"];

fn default_directives(level: &str) -> String {
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}

/// Log to stderr so stdout only carries the result line. `RUST_LOG` wins
/// over `verbose`.
pub fn init_cli_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}
