use std::{fmt, str::FromStr};

use aws_lc_rs::hmac;
use serde::{Deserialize, Serialize};

use crate::Error;

/// The hash function underneath the HMAC.
///
/// This is every hash the crypto backend can HMAC with, not every hash that may be used to issue a token.
/// See [`crate::Policy`] for the permitted subset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
	Sha1,
	Sha224,
	Sha256,
	Sha384,
	Sha512,
}

impl Algorithm {
	pub const ALL: [Algorithm; 5] = [
		Algorithm::Sha1,
		Algorithm::Sha224,
		Algorithm::Sha256,
		Algorithm::Sha384,
		Algorithm::Sha512,
	];

	/// The lowercase name written into the frame.
	pub const fn as_str(self) -> &'static str {
		match self {
			Algorithm::Sha1 => "sha1",
			Algorithm::Sha224 => "sha224",
			Algorithm::Sha256 => "sha256",
			Algorithm::Sha384 => "sha384",
			Algorithm::Sha512 => "sha512",
		}
	}

	/// The size of the MAC in bytes.
	///
	/// Used to split the MAC off the end of a decoded token.
	pub const fn digest_size(self) -> usize {
		match self {
			Algorithm::Sha1 => 20,
			Algorithm::Sha224 => 28,
			Algorithm::Sha256 => 32,
			Algorithm::Sha384 => 48,
			Algorithm::Sha512 => 64,
		}
	}

	pub(crate) fn hmac(self) -> hmac::Algorithm {
		match self {
			Algorithm::Sha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
			Algorithm::Sha224 => hmac::HMAC_SHA224,
			Algorithm::Sha256 => hmac::HMAC_SHA256,
			Algorithm::Sha384 => hmac::HMAC_SHA384,
			Algorithm::Sha512 => hmac::HMAC_SHA512,
		}
	}
}

impl FromStr for Algorithm {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Algorithm::ALL
			.into_iter()
			.find(|alg| alg.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| Error::UnsupportedAlgorithm(s.to_string()))
	}
}

impl fmt::Display for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_from_str() {
		assert_eq!("sha256".parse::<Algorithm>().unwrap(), Algorithm::Sha256);
		assert_eq!("SHA512".parse::<Algorithm>().unwrap(), Algorithm::Sha512);
		assert_eq!("Sha384".parse::<Algorithm>().unwrap(), Algorithm::Sha384);
	}

	#[test]
	fn test_from_str_unsupported() {
		for name in ["md5", "blake2b", "sha3_256", "", "sha-256"] {
			match name.parse::<Algorithm>() {
				Err(Error::UnsupportedAlgorithm(got)) => assert_eq!(got, name),
				other => panic!("expected unsupported for {name:?}, got {other:?}"),
			}
		}
	}

	#[test]
	fn test_display_roundtrip() {
		for alg in Algorithm::ALL {
			assert_eq!(alg.to_string().parse::<Algorithm>().unwrap(), alg);
		}
	}

	#[test]
	fn test_digest_size_matches_backend() {
		let key = b"12345678";
		for alg in Algorithm::ALL {
			let key = hmac::Key::new(alg.hmac(), key);
			let tag = hmac::sign(&key, b"frame");
			assert_eq!(tag.as_ref().len(), alg.digest_size(), "{alg}");
		}
	}

	#[test]
	fn test_serde_lowercase() {
		let json = serde_json::to_string(&Algorithm::Sha384).unwrap();
		assert_eq!(json, "\"sha384\"");
		let alg: Algorithm = serde_json::from_str("\"sha1\"").unwrap();
		assert_eq!(alg, Algorithm::Sha1);
	}
}
