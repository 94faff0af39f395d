mod config;
mod log;

use std::{
	path::{Path, PathBuf},
	time::Duration,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use link_token::{Codec, Key, clock};

use config::Config;
use log::Log;

#[derive(Parser, Clone, Debug)]
#[command(name = "link-token", version, about = "Issue and verify time-bound signed link tokens")]
struct Cli {
	/// Load settings from a TOML file. Flags and environment variables take precedence.
	#[arg(long, env = "LINK_TOKEN_CONFIG", global = true)]
	config: Option<PathBuf>,

	#[command(flatten)]
	log: Log,

	#[command(flatten)]
	settings: Config,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Clone, Debug)]
enum Command {
	/// Generate a random key and write it to a file.
	Generate {
		/// The number of random bytes.
		#[arg(long, default_value_t = Key::DEFAULT_LENGTH)]
		length: usize,

		/// Where to write the key.
		path: PathBuf,
	},

	/// Sign a payload and print the token.
	Sign {
		/// How long the token is valid for, ex. `20s` or `5m`.
		#[arg(long, default_value = "5m", value_parser = humantime::parse_duration)]
		ttl: Duration,

		/// The payload to sign. It must not contain `|`.
		payload: String,
	},

	/// Verify a token and print its payload and expiry.
	Verify {
		/// Print the claims as JSON instead.
		#[arg(long)]
		json: bool,

		token: String,
	},
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	cli.log.init();

	let config = match &cli.config {
		Some(path) => cli.settings.clone().merge(Config::load(path)?),
		None => cli.settings.clone(),
	};

	match cli.command {
		Command::Generate { length, path } => {
			generate(length, &path)?;
		}
		Command::Sign { ttl, payload } => {
			println!("{}", sign(&config, ttl, &payload)?);
		}
		Command::Verify { json, token } => {
			println!("{}", verify(&config, &token, json)?);
		}
	}

	Ok(())
}

fn generate(length: usize, path: &Path) -> anyhow::Result<()> {
	let key = Key::generate(length).context("failed to generate key")?;
	key.to_file(path)
		.with_context(|| format!("failed to write key: {}", path.display()))?;

	tracing::info!(path = %path.display(), length, "generated key");
	Ok(())
}

fn sign(config: &Config, ttl: Duration, payload: &str) -> anyhow::Result<String> {
	anyhow::ensure!(!payload.is_empty(), "payload must not be empty");

	let key = config.key()?;
	let codec = Codec::new(config.policy());

	let token = codec
		.encode(payload, ttl, &key, &config.algorithm())
		.inspect_err(|err| tracing::warn!(kind = err.kind(), %err, "failed to sign"))?;

	Ok(token)
}

fn verify(config: &Config, token: &str, json: bool) -> anyhow::Result<String> {
	let key = config.key()?;
	let codec = Codec::new(config.policy());

	let claims = codec
		.decode(token.trim(), &key)
		.inspect_err(|err| tracing::warn!(kind = err.kind(), %err, "rejected token"))?;

	if json {
		return Ok(serde_json::to_string_pretty(&claims)?);
	}

	Ok(format!("{}, {}", claims.payload, clock::display(claims.expiry)))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config() -> Config {
		Config {
			key: Some(Key::new(b"12345678".to_vec()).to_base64()),
			..Default::default()
		}
	}

	#[test]
	fn test_parse() {
		let args = ["link-token", "sign", "--ttl", "20s", "--algorithm", "sha512", "email=a@example.com"];
		let cli = Cli::try_parse_from(args).unwrap();
		assert_eq!(cli.settings.algorithm.as_deref(), Some("sha512"));
		match cli.command {
			Command::Sign { ttl, payload } => {
				assert_eq!(ttl, Duration::from_secs(20));
				assert_eq!(payload, "email=a@example.com");
			}
			other => panic!("unexpected command: {other:?}"),
		}
	}

	#[test]
	fn test_parse_permit() {
		let args = ["link-token", "verify", "--permit", "sha384,sha512", "--strict", "abc"];
		let cli = Cli::try_parse_from(args).unwrap();
		assert_eq!(
			cli.settings.permitted,
			Some(vec![link_token::Algorithm::Sha384, link_token::Algorithm::Sha512])
		);
		assert_eq!(cli.settings.strict, Some(true));
		match cli.command {
			Command::Verify { token, .. } => assert_eq!(token, "abc"),
			other => panic!("unexpected command: {other:?}"),
		}

		let args = ["link-token", "verify", "--strict=false", "abc"];
		let cli = Cli::try_parse_from(args).unwrap();
		assert_eq!(cli.settings.strict, Some(false));

		assert!(Cli::try_parse_from(["link-token", "verify", "--permit", "md5", "abc"]).is_err());
	}

	#[test]
	fn test_sign_verify() {
		let config = config();
		let token = sign(&config, Duration::from_secs(20), "email=a@example.com").unwrap();

		let output = verify(&config, &token, false).unwrap();
		assert!(output.starts_with("email=a@example.com, "));
		// The expiry is printed with a space between date and time.
		assert!(!output.contains('T'), "{output}");

		let output = verify(&config, &token, true).unwrap();
		let claims: link_token::Claims = serde_json::from_str(&output).unwrap();
		assert_eq!(claims.payload, "email=a@example.com");
		assert_eq!(claims.algorithm, link_token::Algorithm::Sha256);
	}

	#[test]
	fn test_sign_empty() {
		assert!(sign(&config(), Duration::from_secs(20), "").is_err());
	}

	#[test]
	fn test_sign_not_permitted() {
		let config = Config {
			algorithm: Some("sha1".to_string()),
			..config()
		};
		let err = sign(&config, Duration::from_secs(20), "a").unwrap_err();
		assert!(matches!(
			err.downcast_ref::<link_token::Error>(),
			Some(link_token::Error::PolicyViolation(_))
		));
	}

	#[test]
	fn test_verify_wrong_key() {
		let token = sign(&config(), Duration::from_secs(20), "a").unwrap();
		let other = Config {
			key: Some(Key::new(b"87654321".to_vec()).to_base64()),
			..Default::default()
		};
		let err = verify(&other, &token, false).unwrap_err();
		assert!(matches!(
			err.downcast_ref::<link_token::Error>(),
			Some(link_token::Error::InvalidSignature)
		));
	}

	#[test]
	fn test_generate() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("link.key");
		generate(Key::DEFAULT_LENGTH, &path).unwrap();

		let config = Config {
			key_file: Some(path),
			..Default::default()
		};
		let token = sign(&config, Duration::from_secs(20), "a").unwrap();
		assert!(verify(&config, &token, false).unwrap().starts_with("a, "));
	}
}
