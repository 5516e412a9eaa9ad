pub mod submit;

mod error;

pub use error::{Error, Result};
pub use submit::{SubmitRequest, SubmitResponse};

use std::{future::Future, pin::Pin, sync::Arc};

use funnel_config::{Config, CrmConfig};
use funnel_crm::{
	contacts::{self, ContactProperties, CreateOutcome},
	files, notes,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait ContactApi
where
	Self: Send + Sync,
{
	fn create<'a>(
		&'a self,
		cfg: &'a CrmConfig,
		properties: &'a ContactProperties,
	) -> BoxFuture<'a, color_eyre::Result<CreateOutcome>>;

	fn update<'a>(
		&'a self,
		cfg: &'a CrmConfig,
		contact_id: &'a str,
		properties: &'a ContactProperties,
	) -> BoxFuture<'a, color_eyre::Result<()>>;
}

pub trait FileApi
where
	Self: Send + Sync,
{
	fn upload<'a>(
		&'a self,
		cfg: &'a CrmConfig,
		filename: String,
		bytes: Vec<u8>,
	) -> BoxFuture<'a, color_eyre::Result<String>>;
}

pub trait NoteApi
where
	Self: Send + Sync,
{
	fn create<'a>(
		&'a self,
		cfg: &'a CrmConfig,
		contact_id: &'a str,
		body: &'a str,
		attachment_ids: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>>;
}

#[derive(Clone)]
pub struct Crm {
	pub contacts: Arc<dyn ContactApi>,
	pub files: Arc<dyn FileApi>,
	pub notes: Arc<dyn NoteApi>,
}

struct DefaultCrm;

impl ContactApi for DefaultCrm {
	fn create<'a>(
		&'a self,
		cfg: &'a CrmConfig,
		properties: &'a ContactProperties,
	) -> BoxFuture<'a, color_eyre::Result<CreateOutcome>> {
		Box::pin(contacts::create(cfg, properties))
	}

	fn update<'a>(
		&'a self,
		cfg: &'a CrmConfig,
		contact_id: &'a str,
		properties: &'a ContactProperties,
	) -> BoxFuture<'a, color_eyre::Result<()>> {
		Box::pin(contacts::update(cfg, contact_id, properties))
	}
}

impl FileApi for DefaultCrm {
	fn upload<'a>(
		&'a self,
		cfg: &'a CrmConfig,
		filename: String,
		bytes: Vec<u8>,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(files::upload(cfg, filename, bytes))
	}
}

impl NoteApi for DefaultCrm {
	fn create<'a>(
		&'a self,
		cfg: &'a CrmConfig,
		contact_id: &'a str,
		body: &'a str,
		attachment_ids: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<String>> {
		Box::pin(notes::create(cfg, contact_id, body, attachment_ids))
	}
}

impl Crm {
	pub fn new(
		contacts: Arc<dyn ContactApi>,
		files: Arc<dyn FileApi>,
		notes: Arc<dyn NoteApi>,
	) -> Self {
		Self { contacts, files, notes }
	}
}

impl Default for Crm {
	fn default() -> Self {
		let crm = Arc::new(DefaultCrm);

		Self { contacts: crm.clone(), files: crm.clone(), notes: crm }
	}
}

pub struct IntakeService {
	pub cfg: Config,
	pub crm: Crm,
}

impl IntakeService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, crm: Crm::default() }
	}

	pub fn with_crm(cfg: Config, crm: Crm) -> Self {
		Self { cfg, crm }
	}
}
