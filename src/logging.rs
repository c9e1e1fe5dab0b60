//! Tracing setup shared by the binary and embedding hosts.

use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding an `EnvFilter` directive such as `quickpick=debug`.
pub const LOG_ENV: &str = "QUICKPICK_LOG";

/// Install a stderr subscriber filtered by [`LOG_ENV`], falling back to
/// `default_directive`.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case nothing changes.
pub fn init(default_directive: &str) -> bool {
	let env_filter = EnvFilter::try_from_env(LOG_ENV)
		.unwrap_or_else(|_| EnvFilter::new(default_directive));

	let subscriber = tracing_subscriber::registry().with(env_filter).with(
		tracing_subscriber::fmt::layer()
			.with_writer(io::stderr)
			.with_ansi(false)
			.with_target(true),
	);

	if subscriber.try_init().is_err() {
		return false;
	}

	tracing::debug!(filter_env = LOG_ENV, "tracing initialized");
	true
}
