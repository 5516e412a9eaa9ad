use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use funnel_config::CrmConfig;

/// The outbound contact payload. Every property is always serialized, empty
/// string included, so a later update can clear a previously set value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactProperties {
	pub firstname: String,
	pub lastname: String,
	pub email: String,
	pub phone: String,
	pub company: String,
	pub jobtitle: String,
	pub service_type: String,
	pub student_count: String,
	pub indicative_budget: String,
	pub age_group: String,
	pub planning_phase: String,
	pub additional_info: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreateOutcome {
	Created { id: String },
	/// The CRM refused the write over its unique-email constraint. The
	/// message may carry the pre-existing record id.
	Conflict { message: String },
}

pub async fn create(cfg: &CrmConfig, properties: &ContactProperties) -> Result<CreateOutcome> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.contacts_path);
	let body = serde_json::json!({ "properties": properties });
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_token, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let status = res.status();

	if status == StatusCode::CONFLICT {
		let text = res.text().await.unwrap_or_default();

		return Ok(CreateOutcome::Conflict { message: conflict_message(&text) });
	}
	if !status.is_success() {
		let text = res.text().await.unwrap_or_default();

		return Err(eyre::eyre!("Contact create failed with status {status}: {text}"));
	}

	let json: Value = res.json().await?;

	Ok(CreateOutcome::Created { id: crate::parse_object_id(json)? })
}

pub async fn update(
	cfg: &CrmConfig,
	contact_id: &str,
	properties: &ContactProperties,
) -> Result<()> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}/{contact_id}", cfg.api_base, cfg.contacts_path);
	let body = serde_json::json!({ "properties": properties });
	let res = client
		.patch(url)
		.headers(crate::auth_headers(&cfg.api_token, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let status = res.status();

	if !status.is_success() {
		let text = res.text().await.unwrap_or_default();

		return Err(eyre::eyre!("Contact update failed with status {status}: {text}"));
	}

	Ok(())
}

/// The CRM wraps conflict details in a JSON error envelope; fall back to the
/// raw body when the envelope is absent.
fn conflict_message(body: &str) -> String {
	serde_json::from_str::<Value>(body)
		.ok()
		.and_then(|json| json.get("message").and_then(|v| v.as_str()).map(str::to_string))
		.unwrap_or_else(|| body.to_string())
}
