//! Tracing initialization, once per process. A scan engine with a
//! multi-stage pipeline benefits from span-level instrumentation the way
//! `tokf-server` sets it up, rather than the plain `eprintln!` a thinner
//! CLI gets away with.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codepathfinder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
