use std::{
	collections::VecDeque,
	sync::{Arc, Mutex},
};

use color_eyre::eyre;
use serde_json::Map;

use funnel_config::{Config, CrmConfig, DeferredConfirm, Intake, Service};
use funnel_crm::contacts::{ContactProperties, CreateOutcome};
use funnel_service::{BoxFuture, ContactApi, Crm, FileApi, NoteApi};

pub fn test_config() -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		crm: CrmConfig {
			api_base: "http://127.0.0.1:1".to_string(),
			api_token: "test-token".to_string(),
			timeout_ms: 1_000,
			contacts_path: "/crm/v3/objects/contacts".to_string(),
			files_path: "/files/v3/files".to_string(),
			notes_path: "/crm/v3/objects/notes".to_string(),
			file_folder_path: "/discovery-call-photos".to_string(),
			note_association_category: "HUBSPOT_DEFINED".to_string(),
			note_association_type: 202,
			default_headers: Map::new(),
		},
		intake: Intake {
			attachment_prefix: "discovery-call".to_string(),
			note_body: "Photos attached from the discovery call form.".to_string(),
			deferred_confirm: DeferredConfirm::default(),
		},
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CrmCall {
	CreateContact { properties: ContactProperties },
	UpdateContact { contact_id: String, properties: ContactProperties },
	UploadFile { filename: String, byte_len: usize },
	CreateNote { contact_id: String, attachment_ids: String },
}

#[derive(Clone, Debug)]
pub enum ContactScript {
	Created { id: String },
	Conflict { message: String },
	Fail { message: String },
}

/// A scripted CRM double. Records every call it receives and answers from
/// the configured scripts; upload results are consumed in order.
pub struct RecordingCrm {
	calls: Mutex<Vec<CrmCall>>,
	contact_script: ContactScript,
	update_error: Option<String>,
	upload_scripts: Mutex<VecDeque<Result<String, String>>>,
	note_error: Option<String>,
}

impl RecordingCrm {
	pub fn created(id: &str) -> Self {
		Self::with_script(ContactScript::Created { id: id.to_string() })
	}

	pub fn conflicted(message: &str) -> Self {
		Self::with_script(ContactScript::Conflict { message: message.to_string() })
	}

	pub fn failing(message: &str) -> Self {
		Self::with_script(ContactScript::Fail { message: message.to_string() })
	}

	fn with_script(contact_script: ContactScript) -> Self {
		Self {
			calls: Mutex::new(Vec::new()),
			contact_script,
			update_error: None,
			upload_scripts: Mutex::new(VecDeque::new()),
			note_error: None,
		}
	}

	pub fn with_update_error(mut self, message: &str) -> Self {
		self.update_error = Some(message.to_string());

		self
	}

	pub fn with_upload(self, result: Result<&str, &str>) -> Self {
		self.upload_scripts
			.lock()
			.expect("Upload scripts lock poisoned.")
			.push_back(result.map(str::to_string).map_err(str::to_string));

		self
	}

	pub fn with_note_error(mut self, message: &str) -> Self {
		self.note_error = Some(message.to_string());

		self
	}

	/// Wraps the double in the `Crm` bundle while keeping a handle for call
	/// assertions.
	pub fn into_crm(self) -> (Arc<Self>, Crm) {
		let crm = Arc::new(self);

		(crm.clone(), Crm::new(crm.clone(), crm.clone(), crm))
	}

	pub fn calls(&self) -> Vec<CrmCall> {
		self.calls.lock().expect("Calls lock poisoned.").clone()
	}

	fn record(&self, call: CrmCall) {
		self.calls.lock().expect("Calls lock poisoned.").push(call);
	}
}

impl ContactApi for RecordingCrm {
	fn create<'a>(
		&'a self,
		_cfg: &'a CrmConfig,
		properties: &'a ContactProperties,
	) -> BoxFuture<'a, color_eyre::Result<CreateOutcome>> {
		self.record(CrmCall::CreateContact { properties: properties.clone() });

		let outcome = match &self.contact_script {
			ContactScript::Created { id } => Ok(CreateOutcome::Created { id: id.clone() }),
			ContactScript::Conflict { message } => {
				Ok(CreateOutcome::Conflict { message: message.clone() })
			},
			ContactScript::Fail { message } => Err(eyre::eyre!("{message}")),
		};

		Box::pin(async move { outcome })
	}

	fn update<'a>(
		&'a self,
		_cfg: &'a CrmConfig,
		contact_id: &'a str,
		properties: &'a ContactProperties,
	) -> BoxFuture<'a, color_eyre::Result<()>> {
		self.record(CrmCall::UpdateContact {
			contact_id: contact_id.to_string(),
			properties: properties.clone(),
		});

		let result = match &self.update_error {
			Some(message) => Err(eyre::eyre!("{message}")),
			None => Ok(()),
		};

		Box::pin(async move { result })
	}
}

impl FileApi for RecordingCrm {
	fn upload<'a>(
		&'a self,
		_cfg: &'a CrmConfig,
		filename: String,
		bytes: Vec<u8>,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		self.record(CrmCall::UploadFile { filename, byte_len: bytes.len() });

		let result = match self
			.upload_scripts
			.lock()
			.expect("Upload scripts lock poisoned.")
			.pop_front()
		{
			Some(Ok(file_id)) => Ok(file_id),
			Some(Err(message)) => Err(eyre::eyre!("{message}")),
			None => Err(eyre::eyre!("Upload result not scripted.")),
		};

		Box::pin(async move { result })
	}
}

impl NoteApi for RecordingCrm {
	fn create<'a>(
		&'a self,
		_cfg: &'a CrmConfig,
		contact_id: &'a str,
		_body: &'a str,
		attachment_ids: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		self.record(CrmCall::CreateNote {
			contact_id: contact_id.to_string(),
			attachment_ids: attachment_ids.to_string(),
		});

		let result = match &self.note_error {
			Some(message) => Err(eyre::eyre!("{message}")),
			None => Ok("note-1".to_string()),
		};

		Box::pin(async move { result })
	}
}
