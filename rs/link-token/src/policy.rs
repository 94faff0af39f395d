use crate::{Algorithm, Error, Result};

/// Which algorithms may be used to issue, and optionally to validate, a token.
///
/// The default permits SHA-256, SHA-384 and SHA-512 for issuing.
/// Validation only checks that the backend implements the algorithm, unless [`Policy::strict`] is set.
/// A non-strict policy will accept a valid token signed with `sha1`, for example, and log a warning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Policy {
	permitted: Vec<Algorithm>,
	strict: bool,
}

impl Policy {
	pub const DEFAULT_PERMITTED: [Algorithm; 3] = [Algorithm::Sha256, Algorithm::Sha384, Algorithm::Sha512];

	/// Create a policy that permits only the given algorithms.
	pub fn new(permitted: impl IntoIterator<Item = Algorithm>) -> Self {
		let mut list = Vec::new();
		for alg in permitted {
			if !list.contains(&alg) {
				list.push(alg);
			}
		}

		Self {
			permitted: list,
			strict: false,
		}
	}

	/// Enforce the permitted list when validating too, not just when issuing.
	pub fn strict(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}

	pub fn is_strict(&self) -> bool {
		self.strict
	}

	pub fn permitted(&self) -> &[Algorithm] {
		&self.permitted
	}

	pub fn is_permitted(&self, algorithm: Algorithm) -> bool {
		self.permitted.contains(&algorithm)
	}

	/// Returns true if the crypto backend implements the named hash.
	pub fn is_available(name: &str) -> bool {
		name.parse::<Algorithm>().is_ok()
	}

	/// Resolve an algorithm name for issuing a token.
	///
	/// Fails with [`Error::UnsupportedAlgorithm`] if the backend doesn't implement it,
	/// or [`Error::PolicyViolation`] if it's implemented but not permitted.
	pub fn check_encode(&self, name: &str) -> Result<Algorithm> {
		let algorithm: Algorithm = name.parse()?;
		if !self.is_permitted(algorithm) {
			return Err(Error::PolicyViolation(algorithm));
		}

		Ok(algorithm)
	}

	/// Resolve the algorithm tag of an incoming token.
	pub fn check_decode(&self, name: &str) -> Result<Algorithm> {
		let algorithm: Algorithm = name.parse()?;
		if self.is_permitted(algorithm) {
			return Ok(algorithm);
		}

		if self.strict {
			return Err(Error::PolicyViolation(algorithm));
		}

		tracing::warn!(%algorithm, "accepting token signed with an algorithm that is not permitted for issuing");
		Ok(algorithm)
	}
}

impl Default for Policy {
	fn default() -> Self {
		Self::new(Self::DEFAULT_PERMITTED)
	}
}
