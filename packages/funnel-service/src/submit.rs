use std::time::Duration;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, IntakeService, Result};
use funnel_crm::contacts::{ContactProperties, CreateOutcome};
use funnel_domain::{conflict, name, photo};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
	#[serde(default)]
	pub contact_name: String,
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub phone: String,
	#[serde(default)]
	pub service_name: String,
	#[serde(default)]
	pub position: String,
	#[serde(default)]
	pub service_type: String,
	#[serde(default)]
	pub student_count: String,
	#[serde(default)]
	pub indicative_budget: String,
	#[serde(default)]
	pub age_group: String,
	#[serde(default)]
	pub phase: Vec<String>,
	#[serde(default, rename = "additional-info")]
	pub additional_info: String,
	/// Base64 data URLs, one per photo.
	#[serde(default)]
	pub photos: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
	pub success: bool,
	pub contact_id: String,
	pub message: String,
}

impl IntakeService {
	pub async fn submit(&self, req: SubmitRequest) -> Result<SubmitResponse> {
		validate(&req)?;

		if self.cfg.crm.api_token.is_empty() {
			return Err(Error::MissingCredential);
		}

		let properties = contact_properties(&req);
		let contact_id = self.write_contact(&properties).await?;

		if self.cfg.intake.deferred_confirm.enabled {
			self.confirm_properties(&contact_id, &properties).await;
		}

		let attachment_ids = self.upload_photos(&req.photos).await;

		if !attachment_ids.is_empty() {
			self.attach_note(&contact_id, &attachment_ids).await;
		}

		Ok(SubmitResponse {
			success: true,
			contact_id,
			message: "Submission received.".to_string(),
		})
	}

	/// Create-or-update: one submission maps to exactly one contact. A 409
	/// carrying the pre-existing id turns into an update against that id;
	/// a 409 without one is unresolvable.
	async fn write_contact(&self, properties: &ContactProperties) -> Result<String> {
		match self.crm.contacts.create(&self.cfg.crm, properties).await? {
			CreateOutcome::Created { id } => {
				tracing::info!(contact_id = %id, "Contact created.");

				Ok(id)
			},
			CreateOutcome::Conflict { message } => {
				let Some(id) = conflict::existing_contact_id(&message) else {
					tracing::error!(%message, "Uniqueness conflict without a recoverable id.");

					return Err(Error::ConflictUnresolved);
				};

				self.crm.contacts.update(&self.cfg.crm, &id, properties).await?;
				tracing::info!(contact_id = %id, "Existing contact updated.");

				Ok(id)
			},
		}
	}

	/// One-shot delayed re-apply of the property set, for CRMs whose
	/// custom-property indexing lags the initial write. Blocks only this
	/// request; failure is logged and never surfaced.
	async fn confirm_properties(&self, contact_id: &str, properties: &ContactProperties) {
		tokio::time::sleep(Duration::from_millis(self.cfg.intake.deferred_confirm.delay_ms)).await;

		if let Err(err) = self.crm.contacts.update(&self.cfg.crm, contact_id, properties).await {
			tracing::warn!(%contact_id, error = %err, "Deferred property confirmation failed.");
		}
	}

	/// Uploads photos one by one. A failed decode or upload is logged and
	/// skipped; it never aborts the loop or fails the request.
	async fn upload_photos(&self, photos: &[String]) -> Vec<String> {
		let mut attachment_ids = Vec::new();
		let timestamp = OffsetDateTime::now_utc().unix_timestamp();

		for (index, payload) in photos.iter().enumerate() {
			let bytes = match photo::decode_data_url(payload) {
				Ok(bytes) => bytes,
				Err(err) => {
					tracing::warn!(index, error = %err, "Skipping undecodable photo payload.");

					continue;
				},
			};
			let filename =
				format!("{}-{timestamp}-{index}.jpg", self.cfg.intake.attachment_prefix);

			match self.crm.files.upload(&self.cfg.crm, filename, bytes).await {
				Ok(file_id) => attachment_ids.push(file_id),
				Err(err) => tracing::warn!(index, error = %err, "Photo upload failed; skipping."),
			}
		}

		attachment_ids
	}

	async fn attach_note(&self, contact_id: &str, attachment_ids: &[String]) {
		let joined = attachment_ids.join(";");

		match self
			.crm
			.notes
			.create(&self.cfg.crm, contact_id, &self.cfg.intake.note_body, &joined)
			.await
		{
			Ok(note_id) => {
				tracing::info!(%contact_id, %note_id, count = attachment_ids.len(), "Note attached.");
			},
			Err(err) => tracing::warn!(%contact_id, error = %err, "Note creation failed."),
		}
	}
}

fn validate(req: &SubmitRequest) -> Result<()> {
	let mut fields = Vec::new();

	if req.contact_name.trim().is_empty() {
		fields.push("contactName".to_string());
	}

	let email = req.email.trim();

	if email.is_empty() || !email.contains('@') {
		fields.push("email".to_string());
	}

	if fields.is_empty() { Ok(()) } else { Err(Error::InvalidRequest { fields }) }
}

fn contact_properties(req: &SubmitRequest) -> ContactProperties {
	let (firstname, lastname) = name::split_contact_name(&req.contact_name);

	ContactProperties {
		firstname,
		lastname,
		email: req.email.trim().to_string(),
		phone: req.phone.clone(),
		company: req.service_name.clone(),
		jobtitle: req.position.clone(),
		service_type: req.service_type.clone(),
		student_count: req.student_count.clone(),
		indicative_budget: req.indicative_budget.clone(),
		age_group: req.age_group.clone(),
		planning_phase: req.phase.join(";"),
		additional_info: req.additional_info.clone(),
	}
}
