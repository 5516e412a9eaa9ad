use std::time::Duration;

use color_eyre::Result;
use reqwest::{
	Client,
	multipart::{Form, Part},
};
use serde_json::Value;

use funnel_config::CrmConfig;

/// Uploads one image to the CRM file store with private visibility and
/// returns the file object id.
pub async fn upload(cfg: &CrmConfig, filename: String, bytes: Vec<u8>) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.files_path);
	let options = serde_json::json!({ "access": "PRIVATE" }).to_string();
	let part = Part::bytes(bytes).file_name(filename).mime_str("image/jpeg")?;
	let form = Form::new()
		.part("file", part)
		.text("options", options)
		.text("folderPath", cfg.file_folder_path.clone());
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_token, &cfg.default_headers)?)
		.multipart(form)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	crate::parse_object_id(json)
}
