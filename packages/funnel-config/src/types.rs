use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub crm: CrmConfig,
	pub intake: Intake,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct CrmConfig {
	pub api_base: String,
	/// May be empty at load time. The service rejects submissions before any
	/// outbound call when no token is configured.
	pub api_token: String,
	pub timeout_ms: u64,
	pub contacts_path: String,
	pub files_path: String,
	pub notes_path: String,
	pub file_folder_path: String,
	pub note_association_category: String,
	/// Vendor-defined numeric code for the Note -> Contact association.
	pub note_association_type: u32,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Intake {
	pub attachment_prefix: String,
	pub note_body: String,
	#[serde(default)]
	pub deferred_confirm: DeferredConfirm,
}

/// Re-applies the contact properties once after a fixed delay, for CRMs whose
/// custom-property indexing lags the initial write. One-shot, never a loop.
#[derive(Debug, Deserialize)]
pub struct DeferredConfirm {
	pub enabled: bool,
	#[serde(default = "default_confirm_delay_ms")]
	pub delay_ms: u64,
}

impl Default for DeferredConfirm {
	fn default() -> Self {
		Self { enabled: false, delay_ms: default_confirm_delay_ms() }
	}
}

fn default_confirm_delay_ms() -> u64 {
	2_000
}
