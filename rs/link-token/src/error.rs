use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::Algorithm;

pub type Result<T> = std::result::Result<T, Error>;

/// Every way that issuing or validating a token can fail.
///
/// All errors are terminal; retrying the same call will produce the same result.
/// The messages never contain the key or the MAC bytes.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
	#[error("unsupported algorithm: {0}")]
	UnsupportedAlgorithm(String),

	#[error("algorithm not permitted: {0}")]
	PolicyViolation(Algorithm),

	#[error("malformed token: {0}")]
	MalformedToken(#[from] base64::DecodeError),

	#[error("malformed frame: {0}")]
	MalformedFrame(&'static str),

	#[error("invalid signature")]
	InvalidSignature,

	#[error("expired at {0}")]
	Expired(DateTime<Utc>),

	#[error("invalid timestamp: {0}")]
	Clock(String),

	#[error("payload contains the frame delimiter")]
	InvalidPayload,

	#[error("invalid key")]
	InvalidKey,

	#[error("io error: {0}")]
	Io(Arc<std::io::Error>),
}

impl Error {
	/// A short, stable name for the failure, suitable for log fields and metric labels.
	pub fn kind(&self) -> &'static str {
		match self {
			Error::UnsupportedAlgorithm(_) => "unsupported_algorithm",
			Error::PolicyViolation(_) => "policy_violation",
			Error::MalformedToken(_) => "malformed_token",
			Error::MalformedFrame(_) => "malformed_frame",
			Error::InvalidSignature => "invalid_signature",
			Error::Expired(_) => "expired",
			Error::Clock(_) => "clock",
			Error::InvalidPayload => "invalid_payload",
			Error::InvalidKey => "invalid_key",
			Error::Io(_) => "io",
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Error::Io(Arc::new(err))
	}
}
