use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;
use funnel_service::{SubmitRequest, SubmitResponse};

const GENERIC_FAILURE: &str =
	"Something went wrong while submitting the form. Please try again later.";

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/discovery-call", post(submit).fallback(method_not_allowed))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn submit(
	State(state): State<AppState>,
	Json(payload): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
	let response = state.service.submit(payload).await?;

	Ok(Json(response))
}

async fn method_not_allowed() -> ApiError {
	ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	success: bool,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
}

impl ApiError {
	fn new(status: StatusCode, message: impl Into<String>) -> Self {
		Self { status, message: message.into() }
	}
}

impl From<funnel_service::Error> for ApiError {
	fn from(err: funnel_service::Error) -> Self {
		match err {
			funnel_service::Error::InvalidRequest { ref fields } => ApiError::new(
				StatusCode::BAD_REQUEST,
				format!("Missing or invalid fields: {}.", fields.join(", ")),
			),
			other => {
				// Internal detail stays server-side; the caller gets one
				// stable message.
				tracing::error!(error = %other, "Submission failed.");

				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { success: false, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
