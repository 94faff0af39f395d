use clap::Args;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Logging goes to stderr so stdout only carries keys and tokens.
#[derive(Args, Clone, Debug)]
pub struct Log {
	/// The level to log at, unless overridden by RUST_LOG.
	#[arg(id = "log-level", long = "log-level", default_value = "info", env = "LINK_TOKEN_LOG", global = true)]
	pub level: tracing::Level,
}

impl Default for Log {
	fn default() -> Self {
		Self {
			level: tracing::Level::INFO,
		}
	}
}

impl Log {
	pub fn init(&self) {
		let filter = EnvFilter::builder()
			.with_default_directive(LevelFilter::from_level(self.level).into())
			.from_env_lossy();

		tracing_subscriber::fmt()
			.with_writer(std::io::stderr)
			.with_env_filter(filter)
			.init();
	}
}
