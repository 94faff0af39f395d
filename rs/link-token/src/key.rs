use std::{fmt, path::Path, str::FromStr};

use aws_lc_rs::{
	hmac,
	rand::{SecureRandom, SystemRandom},
};
use base64::Engine;

use crate::{Algorithm, Error, Result, transport::BASE64};

/// The shared secret used to sign and verify tokens.
///
/// The secret is never printed; [`fmt::Debug`] only shows the length.
#[derive(Clone)]
pub struct Key {
	secret: Vec<u8>,
}

impl Key {
	/// The length of a generated key, the output size of SHA-256.
	pub const DEFAULT_LENGTH: usize = 32;

	pub fn new(secret: impl Into<Vec<u8>>) -> Self {
		Self { secret: secret.into() }
	}

	/// Generate a random key with the given number of bytes.
	pub fn generate(length: usize) -> Result<Self> {
		if length == 0 {
			return Err(Error::InvalidKey);
		}

		let mut secret = vec![0; length];
		SystemRandom::new().fill(&mut secret).map_err(|_| Error::InvalidKey)?;
		Ok(Self { secret })
	}

	/// Read a base64url encoded key from a file.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let contents = std::fs::read_to_string(path)?;
		contents.trim().parse()
	}

	/// Write the key as base64url to a file, readable only by the owner on unix.
	pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		use std::io::Write;

		let mut options = std::fs::OpenOptions::new();
		options.write(true).create(true).truncate(true);

		#[cfg(unix)]
		{
			use std::os::unix::fs::OpenOptionsExt;
			options.mode(0o600);
		}

		let mut file = options.open(path)?;
		writeln!(file, "{}", self.to_base64())?;
		Ok(())
	}

	pub fn to_base64(&self) -> String {
		BASE64.encode(&self.secret)
	}

	pub fn len(&self) -> usize {
		self.secret.len()
	}

	pub fn is_empty(&self) -> bool {
		self.secret.is_empty()
	}

	/// Compute the HMAC of `frame` with the given hash.
	///
	/// The result is always [`Algorithm::digest_size`] bytes.
	pub fn sign(&self, algorithm: Algorithm, frame: &[u8]) -> Vec<u8> {
		let key = hmac::Key::new(algorithm.hmac(), &self.secret);
		hmac::sign(&key, frame).as_ref().to_vec()
	}

	/// Check `mac` against the HMAC of `frame` in constant time.
	pub fn verify(&self, algorithm: Algorithm, frame: &[u8], mac: &[u8]) -> bool {
		let key = hmac::Key::new(algorithm.hmac(), &self.secret);
		hmac::verify(&key, frame, mac).is_ok()
	}
}

impl FromStr for Key {
	type Err = Error;

	/// Parse a base64url encoded key, with or without padding.
	fn from_str(s: &str) -> Result<Self> {
		let secret = BASE64.decode(s).map_err(|_| Error::InvalidKey)?;
		if secret.is_empty() {
			return Err(Error::InvalidKey);
		}

		Ok(Self { secret })
	}
}

impl From<&[u8]> for Key {
	fn from(secret: &[u8]) -> Self {
		Self::new(secret)
	}
}

impl fmt::Debug for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Key").field("len", &self.secret.len()).finish_non_exhaustive()
	}
}
