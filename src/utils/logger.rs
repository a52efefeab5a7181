use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn build_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match (verbose, level) {
            (true, _) => "debug",
            (false, Some(level)) => level,
            (false, None) => "info",
        };
        EnvFilter::new(default_directives(level))
    })
}

/// Both binaries log under their own target as well as the library's.
fn default_directives(level: &str) -> String {
    format!("savings_estimator={0},batch_estimate={0},warn", level)
}

/// Installs the global subscriber. `level` comes from `[logging] level`,
/// `json` from `[logging] format = "json"`.
pub fn init_logger(verbose: bool, level: Option<&str>, json: bool) {
    let filter = build_filter(verbose, level);
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_cover_batch_binary() {
        let directives = default_directives("debug");
        assert!(directives.contains("savings_estimator=debug"));
        assert!(directives.contains("batch_estimate=debug"));
        assert!(directives.ends_with(",warn"));
    }
}
