use funnel_testkit::{CrmCall, RecordingCrm};

use super::{sample_request, service_with};

// "YWJj" is base64 for "abc".
const PHOTO: &str = "data:image/jpeg;base64,YWJj";

#[tokio::test]
async fn failed_upload_is_skipped_and_the_rest_are_attached() {
	let (crm, bundle) = RecordingCrm::created("1001")
		.with_upload(Ok("f1"))
		.with_upload(Err("status 500"))
		.with_upload(Ok("f3"))
		.into_crm();
	let service = service_with(bundle);
	let mut req = sample_request();

	req.photos = vec![PHOTO.to_string(), PHOTO.to_string(), PHOTO.to_string()];

	let response = service.submit(req).await.expect("Submit failed.");

	assert!(response.success);

	let calls = crm.calls();
	let uploads = calls
		.iter()
		.filter(|call| matches!(call, CrmCall::UploadFile { .. }))
		.count();
	let notes = calls
		.iter()
		.filter_map(|call| match call {
			CrmCall::CreateNote { contact_id, attachment_ids } => {
				Some((contact_id.clone(), attachment_ids.clone()))
			},
			_ => None,
		})
		.collect::<Vec<_>>();

	assert_eq!(uploads, 3);
	assert_eq!(notes, vec![("1001".to_string(), "f1;f3".to_string())]);
}

#[tokio::test]
async fn no_photos_means_no_upload_and_no_note() {
	let (crm, bundle) = RecordingCrm::created("1001").into_crm();
	let service = service_with(bundle);
	let response = service.submit(sample_request()).await.expect("Submit failed.");

	assert!(response.success);
	assert!(crm.calls().iter().all(|call| matches!(call, CrmCall::CreateContact { .. })));
}

#[tokio::test]
async fn all_uploads_failing_means_no_note() {
	let (crm, bundle) = RecordingCrm::created("1001")
		.with_upload(Err("status 500"))
		.with_upload(Err("status 500"))
		.into_crm();
	let service = service_with(bundle);
	let mut req = sample_request();

	req.photos = vec![PHOTO.to_string(), PHOTO.to_string()];

	let response = service.submit(req).await.expect("Submit failed.");

	assert!(response.success);
	assert!(!crm.calls().iter().any(|call| matches!(call, CrmCall::CreateNote { .. })));
}

#[tokio::test]
async fn undecodable_photo_is_skipped_without_an_upload() {
	let (crm, bundle) = RecordingCrm::created("1001").with_upload(Ok("f1")).into_crm();
	let service = service_with(bundle);
	let mut req = sample_request();

	req.photos = vec!["data:image/jpeg;base64,!!!".to_string(), PHOTO.to_string()];

	let response = service.submit(req).await.expect("Submit failed.");

	assert!(response.success);

	let calls = crm.calls();
	let uploads = calls
		.iter()
		.filter(|call| matches!(call, CrmCall::UploadFile { .. }))
		.count();

	assert_eq!(uploads, 1);
}

#[tokio::test]
async fn note_failure_does_not_fail_the_request() {
	let (crm, bundle) = RecordingCrm::created("1001")
		.with_upload(Ok("f1"))
		.with_note_error("status 500")
		.into_crm();
	let service = service_with(bundle);
	let mut req = sample_request();

	req.photos = vec![PHOTO.to_string()];

	let response = service.submit(req).await.expect("Submit failed.");

	assert!(response.success);
	assert_eq!(response.contact_id, "1001");
	assert!(crm.calls().iter().any(|call| matches!(call, CrmCall::CreateNote { .. })));
}

#[tokio::test]
async fn upload_filenames_carry_prefix_and_index() {
	let (crm, bundle) = RecordingCrm::created("1001")
		.with_upload(Ok("f1"))
		.with_upload(Ok("f2"))
		.into_crm();
	let service = service_with(bundle);
	let mut req = sample_request();

	req.photos = vec![PHOTO.to_string(), PHOTO.to_string()];

	service.submit(req).await.expect("Submit failed.");

	let filenames = crm
		.calls()
		.into_iter()
		.filter_map(|call| match call {
			CrmCall::UploadFile { filename, byte_len } => {
				assert_eq!(byte_len, 3);

				Some(filename)
			},
			_ => None,
		})
		.collect::<Vec<_>>();

	assert_eq!(filenames.len(), 2);
	assert!(filenames[0].starts_with("discovery-call-"));
	assert!(filenames[0].ends_with("-0.jpg"));
	assert!(filenames[1].ends_with("-1.jpg"));
}
