use regex::Regex;

/// Pulls the pre-existing record id out of a uniqueness-conflict message.
///
/// The upstream CRM reports email conflicts as free text ("Contact already
/// exists. Existing ID: 12345"). Returns `None` when the pattern is missing
/// so callers decide how an unresolvable conflict is surfaced.
pub fn existing_contact_id(message: &str) -> Option<String> {
	let re = Regex::new(r"Existing ID: (\d+)").ok()?;
	let captures = re.captures(message)?;

	Some(captures.get(1)?.as_str().to_string())
}
