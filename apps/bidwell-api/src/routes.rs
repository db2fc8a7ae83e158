use axum::{
	Json, Router,
	extract::{Path, State, rejection::JsonRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{delete, get, post},
};
use serde::Serialize;

use bidwell_domain::models::ParticipationCondition;
use bidwell_service::{
	CreateConditionRequest, Error, ListLinksResponse, MatchReport, SearchRequest, SearchResponse,
	UnlinkResponse,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/conditions", post(create_condition))
		.route("/v1/conditions/{condition_id}/match", post(rematch_condition))
		.route("/v1/tenders/{tender_id}/links", get(list_links))
		.route("/v1/links/{link_id}", delete(unlink))
		.route("/v1/search", post(search))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn create_condition(
	State(state): State<AppState>,
	payload: Result<Json<CreateConditionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ParticipationCondition>), ApiError> {
	let Json(payload) = payload?;
	let condition = state.service.create_condition(payload).await?;

	Ok((StatusCode::CREATED, Json(condition)))
}

async fn rematch_condition(
	State(state): State<AppState>,
	Path(condition_id): Path<String>,
) -> Result<Json<MatchReport>, ApiError> {
	let report = state.service.rematch_condition(&condition_id).await?;

	Ok(Json(report))
}

async fn list_links(
	State(state): State<AppState>,
	Path(tender_id): Path<String>,
) -> Result<Json<ListLinksResponse>, ApiError> {
	let response = state.service.list_links(&tender_id).await?;

	Ok(Json(response))
}

async fn unlink(
	State(state): State<AppState>,
	Path(link_id): Path<String>,
) -> Result<Json<UnlinkResponse>, ApiError> {
	let response = state.service.unlink(&link_id).await?;

	Ok(Json(response))
}

async fn search(
	State(state): State<AppState>,
	payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
	let Json(payload) = payload?;
	let response = state.service.search(payload).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } =>
				Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message, None),
			Error::InvalidFilter { path, message } => Self::new(
				StatusCode::BAD_REQUEST,
				"INVALID_REQUEST",
				format!("{path}: {message}"),
				Some(vec![path]),
			),
			Error::NotFound { message } =>
				Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message, None),
			Error::Conflict { message } =>
				Self::new(StatusCode::CONFLICT, "CONFLICT", message, None),
			Error::Storage { message } => {
				tracing::error!(error = %message, "Storage failure while serving request.");

				Self::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"STORAGE_ERROR",
					"Internal storage error.",
					None,
				)
			},
			Error::Timeout { message } =>
				Self::new(StatusCode::GATEWAY_TIMEOUT, "TIMEOUT", message, None),
		}
	}
}

impl From<JsonRejection> for ApiError {
	fn from(err: JsonRejection) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", err.body_text(), None)
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}
