use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Algorithm;

/// The authenticated contents of a token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
	/// The hash used for the HMAC.
	pub algorithm: Algorithm,

	/// The token is rejected after this instant.
	pub expiry: DateTime<Utc>,

	/// The caller supplied payload, opaque to the codec.
	pub payload: String,
}

impl Claims {
	pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
		crate::clock::is_expired(self.expiry, now)
	}
}
