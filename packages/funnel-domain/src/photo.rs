use base64::{Engine, engine::general_purpose::STANDARD};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
	#[error("Photo payload is empty.")]
	Empty,
	#[error("Photo payload is not valid base64: {0}")]
	Base64(#[from] base64::DecodeError),
}

/// Decodes a browser data URL into raw bytes. Everything up to and including
/// the first comma is the media-type prefix and is discarded; payloads
/// without a prefix are decoded as-is.
pub fn decode_data_url(payload: &str) -> Result<Vec<u8>, DecodeError> {
	let encoded = match payload.split_once(',') {
		Some((_, rest)) => rest,
		None => payload,
	};
	let encoded = encoded.trim();

	if encoded.is_empty() {
		return Err(DecodeError::Empty);
	}

	Ok(STANDARD.decode(encoded)?)
}
