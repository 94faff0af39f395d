//! The text form of a token: URL-safe base64 of `frame || mac`.

use base64::{
	Engine, alphabet,
	engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

use crate::Result;

/// URL-safe alphabet, padded output, and either padded or unpadded input.
pub(crate) const BASE64: GeneralPurpose = GeneralPurpose::new(
	&alphabet::URL_SAFE,
	GeneralPurposeConfig::new()
		.with_encode_padding(true)
		.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Concatenate the frame and MAC and encode them as a token.
pub fn encode(frame: &[u8], mac: &[u8]) -> String {
	let mut bytes = Vec::with_capacity(frame.len() + mac.len());
	bytes.extend_from_slice(frame);
	bytes.extend_from_slice(mac);
	BASE64.encode(bytes)
}

/// Decode a token back into `frame || mac`.
///
/// Fails with [`crate::Error::MalformedToken`] on invalid base64.
pub fn decode(token: &str) -> Result<Vec<u8>> {
	Ok(BASE64.decode(token)?)
}
