use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr tracing subscriber.
///
/// An explicit `filter` wins; otherwise `verbose` selects DEBUG and the
/// default is WARN so that stdout stays clean for JSON output.
pub fn init(verbose: bool, filter: Option<&str>) {
    fmt()
        .with_env_filter(build_filter(verbose, filter))
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_target(true)
        .init();
}

fn build_filter(verbose: bool, filter: Option<&str>) -> EnvFilter {
    if let Some(spec) = filter {
        match EnvFilter::try_new(spec) {
            Ok(filter) => return filter,
            Err(e) => eprintln!("ignoring invalid PJSON_LOG filter {spec:?}: {e}"),
        }
    }
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    }
}
