use std::time::Duration;

use color_eyre::Result;
use reqwest::Client;
use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use funnel_config::CrmConfig;

/// Creates one note aggregating the uploaded file ids (already joined with
/// `;`) and associates it to the contact via the configured association
/// category and numeric type code.
pub async fn create(
	cfg: &CrmConfig,
	contact_id: &str,
	body: &str,
	attachment_ids: &str,
) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.notes_path);
	let timestamp = OffsetDateTime::now_utc().format(&Rfc3339)?;
	let payload = note_payload(cfg, contact_id, body, attachment_ids, &timestamp);
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_token, &cfg.default_headers)?)
		.json(&payload)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	crate::parse_object_id(json)
}

fn note_payload(
	cfg: &CrmConfig,
	contact_id: &str,
	body: &str,
	attachment_ids: &str,
	timestamp: &str,
) -> Value {
	serde_json::json!({
		"properties": {
			"hs_note_body": body,
			"hs_attachment_ids": attachment_ids,
			"hs_timestamp": timestamp,
		},
		"associations": [{
			"to": { "id": contact_id },
			"types": [{
				"associationCategory": cfg.note_association_category,
				"associationTypeId": cfg.note_association_type,
			}],
		}],
	})
}
