use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use link_token::{Algorithm, Key, Policy};
use serde::Deserialize;

/// Settings shared by every command.
///
/// Each can come from the command line, the environment, or the `--config` file, in that order.
#[derive(Args, Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
	/// A base64url encoded key.
	#[arg(long, env = "LINK_TOKEN_KEY", hide_env_values = true, global = true)]
	pub key: Option<String>,

	/// A file containing a base64url encoded key, as written by `generate`.
	#[arg(long, env = "LINK_TOKEN_KEY_FILE", global = true)]
	pub key_file: Option<PathBuf>,

	/// The algorithm used to sign new tokens.
	#[arg(long, env = "LINK_TOKEN_ALGORITHM", global = true)]
	pub algorithm: Option<String>,

	/// The algorithms permitted for signing, comma separated.
	#[arg(long = "permit", env = "LINK_TOKEN_PERMIT", value_delimiter = ',', global = true)]
	pub permitted: Option<Vec<Algorithm>>,

	/// Also reject tokens signed with an algorithm that is not permitted.
	///
	/// `--strict=false` overrides `strict = true` in the config file.
	#[arg(
		long,
		env = "LINK_TOKEN_STRICT",
		num_args = 0..=1,
		require_equals = true,
		default_missing_value = "true",
		global = true
	)]
	pub strict: Option<bool>,
}

impl Config {
	pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::Sha256;

	/// Read settings from a TOML file.
	pub fn load(path: &Path) -> anyhow::Result<Self> {
		let contents =
			std::fs::read_to_string(path).with_context(|| format!("failed to read config: {}", path.display()))?;
		let config = toml::from_str(&contents).with_context(|| format!("failed to parse config: {}", path.display()))?;
		Ok(config)
	}

	/// Fill in anything unset with the values from `fallback`.
	pub fn merge(self, fallback: Config) -> Config {
		Config {
			key: self.key.or(fallback.key),
			key_file: self.key_file.or(fallback.key_file),
			algorithm: self.algorithm.or(fallback.algorithm),
			permitted: self.permitted.or(fallback.permitted),
			strict: self.strict.or(fallback.strict),
		}
	}

	pub fn algorithm(&self) -> String {
		self.algorithm
			.clone()
			.unwrap_or_else(|| Self::DEFAULT_ALGORITHM.to_string())
	}

	pub fn policy(&self) -> Policy {
		let policy = match &self.permitted {
			Some(permitted) => Policy::new(permitted.iter().copied()),
			None => Policy::default(),
		};

		policy.strict(self.strict.unwrap_or(false))
	}

	pub fn key(&self) -> anyhow::Result<Key> {
		if let Some(key) = &self.key {
			return key.parse().context("failed to parse key");
		}

		if let Some(path) = &self.key_file {
			return Key::from_file(path).with_context(|| format!("failed to load key: {}", path.display()));
		}

		anyhow::bail!("no key configured, use --key-file or LINK_TOKEN_KEY_FILE")
	}
}
