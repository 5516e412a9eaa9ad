/// Splits a free-text contact name into (given, family) on the first
/// whitespace. A single-word name becomes the given name with an empty
/// family name.
pub fn split_contact_name(full: &str) -> (String, String) {
	let trimmed = full.trim();

	match trimmed.split_once(char::is_whitespace) {
		Some((given, family)) => (given.to_string(), family.trim_start().to_string()),
		None => (trimmed.to_string(), String::new()),
	}
}
