use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use time::OffsetDateTime;
use uuid::Uuid;

use bidwell_domain::{
	models::{ExperienceYears, ParticipationCondition},
	normalize,
};

use crate::{BidwellService, Error, MatchReport, Result};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreateConditionRequest {
	#[serde(default)]
	pub tender_id: String,
	#[serde(default)]
	pub condition_type_id: String,
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub requirements: Option<String>,
	/// Raw criteria object. Normalized before it is parsed into [`ConditionCriteriaInput`].
	#[serde(default)]
	pub criteria: Value,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConditionCriteriaInput {
	pub experience: ExperienceYears,
	#[serde(alias = "certificates")]
	pub certificate_ids: Vec<String>,
	#[serde(alias = "industry_sectors")]
	pub industry_sector_ids: Vec<String>,
	pub academic_degrees: Vec<String>,
	pub executive_position_required: bool,
	pub volume_target: Option<f64>,
	pub duration_days: Option<i64>,
	pub criterion_type: Option<String>,
}

impl BidwellService {
	/// Validates and stores a condition, then links matching candidates.
	///
	/// Matching runs before returning but its failures never fail the call.
	pub async fn create_condition(
		&self,
		req: CreateConditionRequest,
	) -> Result<ParticipationCondition> {
		let tender_id = req.tender_id.trim();
		let condition_type_id = req.condition_type_id.trim();
		let title = req.title.trim();

		if tender_id.is_empty() || condition_type_id.is_empty() || title.is_empty() {
			return Err(Error::InvalidRequest {
				message: "tender_id, condition_type_id, and title are required.".to_string(),
			});
		}

		let criteria = normalize::normalize(&req.criteria);

		if !criteria.is_object() {
			return Err(Error::InvalidRequest {
				message: "criteria must be an object.".to_string(),
			});
		}

		let input: ConditionCriteriaInput = serde_json::from_value(criteria.clone())
			.map_err(|err| Error::InvalidRequest { message: format!("criteria: {err}") })?;

		validate_criteria(&input)?;

		if !self.store.condition_type_exists(condition_type_id).await? {
			return Err(Error::NotFound {
				message: format!("Condition type {condition_type_id} not found."),
			});
		}
		if !self.store.tender_exists(tender_id).await? {
			return Err(Error::NotFound { message: format!("Tender {tender_id} not found.") });
		}

		let requirements = req
			.requirements
			.as_deref()
			.map(str::trim)
			.filter(|requirements| !requirements.is_empty())
			.map(str::to_string);
		let search_index = self.indexer.generate(&normalize::normalize(&json!({
			"title": title,
			"requirements": requirements,
			"criteria": criteria,
		})));
		let condition = ParticipationCondition {
			condition_id: Uuid::new_v4().to_string(),
			tender_id: tender_id.to_string(),
			condition_type_id: condition_type_id.to_string(),
			title: title.to_string(),
			requirements,
			experience: input.experience,
			certificate_ids: input.certificate_ids,
			industry_sector_ids: input.industry_sector_ids,
			academic_degrees: input.academic_degrees,
			executive_position_required: input.executive_position_required,
			volume_target: input.volume_target,
			duration_days: input.duration_days,
			criterion_type: input
				.criterion_type
				.map(|value| value.trim().to_string())
				.filter(|value| !value.is_empty()),
			search_index,
			created_at: OffsetDateTime::now_utc(),
		};

		self.store.insert_condition(&condition, &criteria).await?;

		tracing::info!(
			condition_id = %condition.condition_id,
			tender_id = %condition.tender_id,
			"Participation condition created."
		);

		let report = self.matcher.match_condition(&condition).await;

		log_report(&report);

		Ok(condition)
	}

	/// Runs matching again for a stored condition. Candidates already linked are skipped.
	pub async fn rematch_condition(&self, condition_id: &str) -> Result<MatchReport> {
		let condition_id = condition_id.trim();

		if condition_id.is_empty() {
			return Err(Error::InvalidRequest { message: "condition_id is required.".to_string() });
		}

		let condition = self.store.fetch_condition(condition_id).await?.ok_or_else(|| {
			Error::NotFound { message: format!("Condition {condition_id} not found.") }
		})?;
		let report = self.matcher.match_condition(&condition).await;

		log_report(&report);

		Ok(report)
	}
}

fn validate_criteria(input: &ConditionCriteriaInput) -> Result<()> {
	if let Some(volume) = input.volume_target
		&& (!volume.is_finite() || volume < 0.0)
	{
		return Err(Error::InvalidRequest {
			message: "volume_target must be a non-negative number.".to_string(),
		});
	}
	if let Some(days) = input.duration_days
		&& days <= 0
	{
		return Err(Error::InvalidRequest {
			message: "duration_days must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn log_report(report: &MatchReport) {
	tracing::info!(
		condition_id = %report.condition_id,
		tender_id = %report.tender_id,
		personnel = report.personnel_matched,
		engagements = report.engagements_matched,
		artifacts = report.artifacts_matched,
		links_created = report.links_created,
		failures = report.failures.len(),
		"Matching finished."
	);
}
