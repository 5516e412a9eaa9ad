use funnel_config::DeferredConfirm;
use funnel_service::{Error, IntakeService};
use funnel_testkit::{CrmCall, RecordingCrm, test_config};

use super::{sample_request, service_with};

#[tokio::test]
async fn new_email_issues_one_create_and_no_update() {
	let (crm, bundle) = RecordingCrm::created("1001").into_crm();
	let service = service_with(bundle);
	let response = service.submit(sample_request()).await.expect("Submit failed.");

	assert!(response.success);
	assert_eq!(response.contact_id, "1001");

	let calls = crm.calls();

	assert_eq!(calls.len(), 1);
	assert!(matches!(calls[0], CrmCall::CreateContact { .. }));
}

#[tokio::test]
async fn existing_email_updates_the_conflicting_contact() {
	let (crm, bundle) =
		RecordingCrm::conflicted("Contact already exists. Existing ID: 123").into_crm();
	let service = service_with(bundle);
	let response = service.submit(sample_request()).await.expect("Submit failed.");

	assert_eq!(response.contact_id, "123");

	let calls = crm.calls();

	assert_eq!(calls.len(), 2);
	assert!(matches!(calls[0], CrmCall::CreateContact { .. }));
	assert!(matches!(
		&calls[1],
		CrmCall::UpdateContact { contact_id, .. } if contact_id == "123"
	));
}

#[tokio::test]
async fn conflict_without_id_is_unresolvable() {
	let (crm, bundle) = RecordingCrm::conflicted("Contact already exists.").into_crm();
	let service = service_with(bundle);
	let err = service.submit(sample_request()).await.expect_err("Submit should fail.");

	assert!(matches!(err, Error::ConflictUnresolved));

	let calls = crm.calls();

	assert_eq!(calls.len(), 1);
	assert!(matches!(calls[0], CrmCall::CreateContact { .. }));
}

#[tokio::test]
async fn upstream_write_failure_propagates() {
	let (_crm, bundle) = RecordingCrm::failing("status 503").into_crm();
	let service = service_with(bundle);
	let err = service.submit(sample_request()).await.expect_err("Submit should fail.");

	assert!(matches!(err, Error::Upstream { .. }));
}

#[tokio::test]
async fn update_failure_after_conflict_propagates() {
	let (_crm, bundle) = RecordingCrm::conflicted("Existing ID: 9")
		.with_update_error("status 500")
		.into_crm();
	let service = service_with(bundle);
	let err = service.submit(sample_request()).await.expect_err("Submit should fail.");

	assert!(matches!(err, Error::Upstream { .. }));
}

#[tokio::test]
async fn missing_token_short_circuits_before_any_outbound_call() {
	let (crm, bundle) = RecordingCrm::created("1001").into_crm();
	let mut cfg = test_config();

	cfg.crm.api_token = String::new();

	let service = IntakeService::with_crm(cfg, bundle);
	let err = service.submit(sample_request()).await.expect_err("Submit should fail.");

	assert!(matches!(err, Error::MissingCredential));
	assert!(crm.calls().is_empty());
}

#[tokio::test]
async fn invalid_submission_is_rejected_before_any_outbound_call() {
	let (crm, bundle) = RecordingCrm::created("1001").into_crm();
	let service = service_with(bundle);
	let mut req = sample_request();

	req.email = String::new();

	let err = service.submit(req).await.expect_err("Submit should fail.");

	assert!(matches!(err, Error::InvalidRequest { .. }));
	assert!(crm.calls().is_empty());
}

#[tokio::test]
async fn phases_join_with_semicolons_in_the_outbound_payload() {
	let (crm, bundle) = RecordingCrm::created("1001").into_crm();
	let service = service_with(bundle);
	let mut req = sample_request();

	req.phase = vec!["exploring".to_string(), "preparing-next-budget".to_string()];

	service.submit(req).await.expect("Submit failed.");

	let calls = crm.calls();
	let CrmCall::CreateContact { properties } = &calls[0] else {
		panic!("Expected a create call.");
	};

	assert_eq!(properties.planning_phase, "exploring;preparing-next-budget");
	assert_eq!(properties.firstname, "John");
	assert_eq!(properties.lastname, "Smith");
}

#[tokio::test]
async fn deferred_confirm_issues_exactly_one_extra_update() {
	let (crm, bundle) = RecordingCrm::created("1001").into_crm();
	let mut cfg = test_config();

	cfg.intake.deferred_confirm = DeferredConfirm { enabled: true, delay_ms: 10 };

	let service = IntakeService::with_crm(cfg, bundle);
	let response = service.submit(sample_request()).await.expect("Submit failed.");

	assert!(response.success);

	let calls = crm.calls();

	assert_eq!(calls.len(), 2);
	assert!(matches!(
		&calls[1],
		CrmCall::UpdateContact { contact_id, .. } if contact_id == "1001"
	));
}
