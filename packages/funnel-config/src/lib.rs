mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, CrmConfig, DeferredConfirm, Intake, Service};

use std::{fs, path::Path};

const MAX_CONFIRM_DELAY_MS: u64 = 30_000;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.crm.api_base.trim().is_empty() {
		return Err(Error::Validation { message: "crm.api_base must be non-empty.".to_string() });
	}
	if cfg.crm.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "crm.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (label, path) in [
		("crm.contacts_path", &cfg.crm.contacts_path),
		("crm.files_path", &cfg.crm.files_path),
		("crm.notes_path", &cfg.crm.notes_path),
	] {
		if !path.starts_with('/') {
			return Err(Error::Validation {
				message: format!("{label} must start with a slash."),
			});
		}
	}

	if cfg.crm.note_association_category.trim().is_empty() {
		return Err(Error::Validation {
			message: "crm.note_association_category must be non-empty.".to_string(),
		});
	}
	if cfg.crm.note_association_type == 0 {
		return Err(Error::Validation {
			message: "crm.note_association_type must be greater than zero.".to_string(),
		});
	}
	if cfg.intake.attachment_prefix.trim().is_empty() {
		return Err(Error::Validation {
			message: "intake.attachment_prefix must be non-empty.".to_string(),
		});
	}
	if cfg.intake.note_body.trim().is_empty() {
		return Err(Error::Validation {
			message: "intake.note_body must be non-empty.".to_string(),
		});
	}
	if cfg.intake.deferred_confirm.enabled {
		let delay_ms = cfg.intake.deferred_confirm.delay_ms;

		if delay_ms == 0 || delay_ms > MAX_CONFIRM_DELAY_MS {
			return Err(Error::Validation {
				message: format!(
					"intake.deferred_confirm.delay_ms must be in 1-{MAX_CONFIRM_DELAY_MS} when enabled."
				),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	while cfg.crm.api_base.ends_with('/') {
		cfg.crm.api_base.pop();
	}

	cfg.crm.api_token = cfg.crm.api_token.trim().to_string();
}
