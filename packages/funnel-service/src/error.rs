pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("CRM API token is not configured.")]
	MissingCredential,
	#[error("Invalid submission: {}.", .fields.join(", "))]
	InvalidRequest { fields: Vec<String> },
	#[error("Uniqueness conflict without a recoverable contact id.")]
	ConflictUnresolved,
	#[error("CRM write failed: {message}")]
	Upstream { message: String },
}

impl From<color_eyre::Report> for Error {
	fn from(err: color_eyre::Report) -> Self {
		Self::Upstream { message: err.to_string() }
	}
}
