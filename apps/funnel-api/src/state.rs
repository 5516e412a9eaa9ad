use std::sync::Arc;

use funnel_service::IntakeService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<IntakeService>,
}
impl AppState {
	pub fn new(config: funnel_config::Config) -> Self {
		Self { service: Arc::new(IntakeService::new(config)) }
	}
}
