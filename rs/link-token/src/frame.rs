//! The signed portion of a token: `algorithm|expiry|payload`.
//!
//! There is no escaping; the payload must not contain the delimiter.

use crate::{Algorithm, Claims, Error, Result, clock};

pub const DELIMITER: u8 = b'|';

/// Serialize the claims into the bytes covered by the MAC.
///
/// Fails with [`Error::InvalidPayload`] if the payload contains the delimiter,
/// since the result could not be parsed back into the same claims.
pub fn encode(claims: &Claims) -> Result<Vec<u8>> {
	if claims.payload.as_bytes().contains(&DELIMITER) {
		return Err(Error::InvalidPayload);
	}

	let delimiter = DELIMITER as char;
	let frame = format!(
		"{}{delimiter}{}{delimiter}{}",
		claims.algorithm,
		clock::format(claims.expiry),
		claims.payload
	);

	Ok(frame.into_bytes())
}

/// Split the algorithm tag off the front of the bytes, at the first delimiter.
///
/// This runs before the MAC is checked, so the rest is untrusted.
/// If there's no delimiter, the entire input is returned as the tag.
pub fn split_algorithm(bytes: &[u8]) -> (&[u8], &[u8]) {
	match bytes.iter().position(|&b| b == DELIMITER) {
		Some(index) => (&bytes[..index], &bytes[index + 1..]),
		None => (bytes, &[]),
	}
}

/// Parse authenticated frame bytes back into claims.
pub fn decode(bytes: &[u8]) -> Result<Claims> {
	let frame = std::str::from_utf8(bytes).map_err(|_| Error::MalformedFrame("invalid utf-8"))?;

	let fields: Vec<&str> = frame.split(DELIMITER as char).collect();
	let [algorithm, expiry, payload] = fields[..] else {
		return Err(Error::MalformedFrame("expected exactly three fields"));
	};

	Ok(Claims {
		algorithm: algorithm.parse::<Algorithm>()?,
		expiry: clock::parse(expiry)?,
		payload: payload.to_string(),
	})
}
