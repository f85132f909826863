use tracing_chrome::{ChromeLayerBuilder, FlushGuard};
use tracing_subscriber::{filter::LevelFilter, prelude::*};

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Log to stderr, and with `trace` also to chrome://tracing or https://ui.perfetto.dev/
///
/// Make sure to store the guard in a variable in the scope to be instrumented, otherwise the trace
/// will be disabled immediately.
pub fn init(trace: bool, verbose: u8) -> Option<FlushGuard> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(level(verbose));

    if trace {
        let (chrome_layer, guard) = ChromeLayerBuilder::new().build();
        tracing_subscriber::registry()
            .with(fmt_layer)
            .with(chrome_layer)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry().with(fmt_layer).init();
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_verbosity_levels() {
        let tests = vec![
            (0, LevelFilter::WARN),
            (1, LevelFilter::INFO),
            (2, LevelFilter::DEBUG),
            (3, LevelFilter::TRACE),
            (9, LevelFilter::TRACE),
        ];

        for (verbose, expected) in tests {
            assert_eq!(level(verbose), expected);
        }
    }
}
