use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::{Claims, Error, Key, Policy, Result, clock, frame, transport};

/// Issues and validates tokens according to a [`Policy`].
///
/// The codec holds no state besides the policy, so it can be shared freely between threads.
#[derive(Clone, Debug, Default)]
pub struct Codec {
	policy: Policy,
}

impl Codec {
	pub fn new(policy: Policy) -> Self {
		Self { policy }
	}

	pub fn policy(&self) -> &Policy {
		&self.policy
	}

	/// Sign `payload` with `key`, valid for `ttl` from now.
	pub fn encode(&self, payload: &str, ttl: Duration, key: &Key, algorithm: &str) -> Result<String> {
		self.encode_at(payload, ttl, key, algorithm, clock::now())
	}

	/// Same as [`Codec::encode`], but with an explicit current time.
	pub fn encode_at(
		&self,
		payload: &str,
		ttl: Duration,
		key: &Key,
		algorithm: &str,
		now: DateTime<Utc>,
	) -> Result<String> {
		let algorithm = self.policy.check_encode(algorithm)?;

		let claims = Claims {
			algorithm,
			expiry: clock::expires_at(now, ttl)?,
			payload: payload.to_string(),
		};

		let message = frame::encode(&claims)?;
		let mac = key.sign(algorithm, &message);

		tracing::debug!(%algorithm, expiry = %claims.expiry, "issued token");

		Ok(transport::encode(&message, &mac))
	}

	/// Authenticate `token` with `key` and return its claims if it has not expired.
	pub fn decode(&self, token: &str, key: &Key) -> Result<Claims> {
		self.decode_at(token, key, clock::now())
	}

	/// Same as [`Codec::decode`], but with an explicit current time.
	pub fn decode_at(&self, token: &str, key: &Key, now: DateTime<Utc>) -> Result<Claims> {
		let bytes = transport::decode(token)?;

		// The tag picks the hash, so it has to be read before anything is authenticated.
		let (tag, _) = frame::split_algorithm(&bytes);
		let tag = std::str::from_utf8(tag)
			.map_err(|_| Error::UnsupportedAlgorithm(String::from_utf8_lossy(tag).into_owned()))?;
		let algorithm = self.policy.check_decode(tag)?;

		let size = bytes
			.len()
			.checked_sub(algorithm.digest_size())
			.ok_or(Error::InvalidSignature)?;
		let (message, mac) = bytes.split_at(size);

		if !key.verify(algorithm, message, mac) {
			return Err(Error::InvalidSignature);
		}

		let claims = frame::decode(message)?;
		if claims.is_expired(now) {
			tracing::debug!(%algorithm, expiry = %claims.expiry, "rejected expired token");
			return Err(Error::Expired(claims.expiry));
		}

		tracing::debug!(%algorithm, expiry = %claims.expiry, "validated token");

		Ok(claims)
	}
}

/// Sign `payload` with the default [`Policy`].
pub fn encode(payload: &str, ttl: Duration, key: &Key, algorithm: &str) -> Result<String> {
	Codec::default().encode(payload, ttl, key, algorithm)
}

/// Validate `token` with the default [`Policy`].
pub fn decode(token: &str, key: &Key) -> Result<Claims> {
	Codec::default().decode(token, key)
}
