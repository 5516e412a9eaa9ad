pub mod contacts;
pub mod files;
pub mod notes;

use color_eyre::{Result, eyre};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName};
use serde_json::{Map, Value};

pub fn auth_headers(api_token: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(AUTHORIZATION, format!("Bearer {api_token}").parse()?);

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(eyre::eyre!("Default header values must be strings."));
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

/// Renders a credential for diagnostics without revealing it. At most the
/// first four and last two characters appear, alongside the length.
pub fn masked_token(token: &str) -> String {
	let chars = token.chars().collect::<Vec<_>>();

	if chars.len() < 8 {
		return format!("*** ({} chars)", chars.len());
	}

	let head = chars[..4].iter().collect::<String>();
	let tail = chars[chars.len() - 2..].iter().collect::<String>();

	format!("{head}...{tail} ({} chars)", chars.len())
}

pub(crate) fn parse_object_id(json: Value) -> Result<String> {
	let id = json.get("id").ok_or_else(|| eyre::eyre!("CRM response is missing an id."))?;

	if let Some(id) = id.as_str() {
		return Ok(id.to_string());
	}
	if let Some(id) = id.as_u64() {
		return Ok(id.to_string());
	}

	Err(eyre::eyre!("CRM response id is neither a string nor a number."))
}
