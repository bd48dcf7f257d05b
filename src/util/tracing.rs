use std::{env::var, io::stderr};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, filter::Directive, fmt, prelude::*};

// HTTP internals stay at info unless asked for by target in RUST_LOG
const QUIET_TARGETS: [&str; 6] = [
    "reqwest=info",
    "reqwest_retry=info",
    "rustls=info",
    "tower=info",
    "hyper=info",
    "h2=info",
];

fn env_filter() -> EnvFilter {
    QUIET_TARGETS
        .iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
            EnvFilter::add_directive,
        )
}

/*
    The Actions log viewer renders ANSI colors even though
    the runner's stderr is not a terminal.
*/
fn use_colors() -> bool {
    let in_actions = var("GITHUB_ACTIONS").is_ok_and(|v| v == "true");
    in_actions || console::colors_enabled_stderr()
}

/**
    Installs the global subscriber, writing to stderr.

    Output is a single line per event at the default `info` level. Raising
    the level through `RUST_LOG` also prints targets and source locations.
*/
pub fn init() {
    let filter = env_filter();
    let verbose = filter
        .max_level_hint()
        .is_some_and(|level| level > LevelFilter::INFO);

    let layer = fmt::layer()
        .with_writer(stderr)
        .with_ansi(use_colors())
        .with_target(verbose)
        .with_file(verbose)
        .with_line_number(verbose)
        .without_time();

    tracing_subscriber::registry().with(filter).with(layer).init();
}
