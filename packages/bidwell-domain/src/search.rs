//! Search vocabulary: the closed set of searchable models, their typed filter schemas, the plan
//! handed to the store, and the result items it returns.

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::models::ExperienceAxis;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterError {
	pub path: String,
	pub message: String,
}
impl FilterError {
	fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
		Self { path: path.into(), message: message.into() }
	}
}
impl Display for FilterError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.path, self.message)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchModel {
	Personnel,
	Organisations,
	Engagements,
	Tenders,
	Tasks,
	OrganisationContacts,
}
impl SearchModel {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Personnel => "personnel",
			Self::Organisations => "organisations",
			Self::Engagements => "engagements",
			Self::Tenders => "tenders",
			Self::Tasks => "tasks",
			Self::OrganisationContacts => "organisation_contacts",
		}
	}
}
impl FromStr for SearchModel {
	type Err = FilterError;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"personnel" => Ok(Self::Personnel),
			"organisations" => Ok(Self::Organisations),
			"engagements" | "projects" => Ok(Self::Engagements),
			"tenders" => Ok(Self::Tenders),
			"tasks" => Ok(Self::Tasks),
			"organisation_contacts" | "organisation-contacts" => Ok(Self::OrganisationContacts),
			other => Err(FilterError::new(
				"$.model",
				format!(
					"model '{other}' is not one of personnel, organisations, engagements, tenders, tasks, organisation_contacts."
				),
			)),
		}
	}
}
impl Display for SearchModel {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
	/// Store-defined relevance. Results come back in stable id order.
	#[default]
	Relevance,
	RecencyAsc,
	RecencyDesc,
	NameAsc,
	NameDesc,
}
impl FromStr for SortOrder {
	type Err = FilterError;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"" | "relevance" => Ok(Self::Relevance),
			"recency_asc" => Ok(Self::RecencyAsc),
			"recency_desc" => Ok(Self::RecencyDesc),
			"name_asc" => Ok(Self::NameAsc),
			"name_desc" => Ok(Self::NameDesc),
			other => Err(FilterError::new(
				"$.sort_by",
				format!(
					"sort_by '{other}' is not one of relevance, recency_asc, recency_desc, name_asc, name_desc."
				),
			)),
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NumberRange {
	pub min: Option<f64>,
	pub max: Option<f64>,
}
impl NumberRange {
	pub fn validate(&self, path: &str) -> Result<(), FilterError> {
		for bound in [self.min, self.max].into_iter().flatten() {
			if !bound.is_finite() {
				return Err(FilterError::new(path, "range bounds must be finite numbers."));
			}
		}

		if let (Some(min), Some(max)) = (self.min, self.max)
			&& min > max
		{
			return Err(FilterError::new(path, "range min must not exceed max."));
		}

		Ok(())
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DateRange {
	#[serde(with = "time::serde::rfc3339::option")]
	pub from: Option<OffsetDateTime>,
	#[serde(with = "time::serde::rfc3339::option")]
	pub to: Option<OffsetDateTime>,
}
impl DateRange {
	pub fn validate(&self, path: &str) -> Result<(), FilterError> {
		if let (Some(from), Some(to)) = (self.from, self.to)
			&& from > to
		{
			return Err(FilterError::new(path, "date range from must not be after to."));
		}

		Ok(())
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperienceRanges {
	pub it: Option<NumberRange>,
	pub consulting: Option<NumberRange>,
	pub project_management: Option<NumberRange>,
	pub leadership: Option<NumberRange>,
	pub industry: Option<NumberRange>,
}
impl ExperienceRanges {
	pub fn get(&self, axis: ExperienceAxis) -> Option<&NumberRange> {
		match axis {
			ExperienceAxis::It => self.it.as_ref(),
			ExperienceAxis::Consulting => self.consulting.as_ref(),
			ExperienceAxis::ProjectManagement => self.project_management.as_ref(),
			ExperienceAxis::Leadership => self.leadership.as_ref(),
			ExperienceAxis::Industry => self.industry.as_ref(),
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VolumeRanges {
	pub currency: Option<NumberRange>,
	pub person_days: Option<NumberRange>,
	pub hours: Option<NumberRange>,
}
impl VolumeRanges {
	fn validate(&self, path: &str) -> Result<(), FilterError> {
		for (label, range) in
			[("currency", &self.currency), ("person_days", &self.person_days), ("hours", &self.hours)]
		{
			if let Some(range) = range {
				range.validate(&format!("{path}.{label}"))?;
			}
		}

		Ok(())
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PersonnelFilters {
	pub ranks: Vec<String>,
	pub locations: Vec<String>,
	pub skills: Vec<String>,
	pub certificates: Vec<String>,
	pub experience: Option<ExperienceRanges>,
	pub divisions: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrganisationFilters {
	pub industry_sectors: Vec<String>,
	pub locations: Vec<String>,
	pub employee_count: Option<NumberRange>,
	pub annual_revenue: Option<NumberRange>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngagementFilters {
	pub types: Vec<String>,
	pub statuses: Vec<String>,
	pub period: Option<DateRange>,
	pub volume: Option<VolumeRanges>,
	pub keywords: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TenderFilters {
	pub types: Vec<String>,
	pub statuses: Vec<String>,
	pub submission_deadline: Option<DateRange>,
	pub binding_deadline: Option<DateRange>,
	pub volume: Option<VolumeRanges>,
	pub success_chance: Option<NumberRange>,
	pub keywords: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaskFilters {
	pub types: Vec<String>,
	pub statuses: Vec<String>,
	pub due_date: Option<DateRange>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrganisationContactFilters {}

#[derive(Clone, Debug, PartialEq)]
pub enum ModelFilters {
	Personnel(PersonnelFilters),
	Organisations(OrganisationFilters),
	Engagements(EngagementFilters),
	Tenders(TenderFilters),
	Tasks(TaskFilters),
	OrganisationContacts(OrganisationContactFilters),
}
impl ModelFilters {
	/// Deserializes an already-normalized filter object into the schema of `model`.
	pub fn parse(model: SearchModel, normalized: Value) -> Result<Self, FilterError> {
		if !normalized.is_object() {
			return Err(FilterError::new("$.filters", "filters must be an object."));
		}

		let parsed = match model {
			SearchModel::Personnel => from_filters(normalized).map(Self::Personnel),
			SearchModel::Organisations => from_filters(normalized).map(Self::Organisations),
			SearchModel::Engagements => from_filters(normalized).map(Self::Engagements),
			SearchModel::Tenders => from_filters(normalized).map(Self::Tenders),
			SearchModel::Tasks => from_filters(normalized).map(Self::Tasks),
			SearchModel::OrganisationContacts =>
				from_filters(normalized).map(Self::OrganisationContacts),
		}?;

		parsed.validate()?;

		Ok(parsed)
	}

	pub fn model(&self) -> SearchModel {
		match self {
			Self::Personnel(_) => SearchModel::Personnel,
			Self::Organisations(_) => SearchModel::Organisations,
			Self::Engagements(_) => SearchModel::Engagements,
			Self::Tenders(_) => SearchModel::Tenders,
			Self::Tasks(_) => SearchModel::Tasks,
			Self::OrganisationContacts(_) => SearchModel::OrganisationContacts,
		}
	}

	pub fn validate(&self) -> Result<(), FilterError> {
		match self {
			Self::Personnel(filters) =>
				if let Some(experience) = filters.experience.as_ref() {
					for axis in ExperienceAxis::ALL {
						if let Some(range) = experience.get(axis) {
							range.validate(&format!("$.filters.experience.{}", axis.as_str()))?;
						}
					}
				},
			Self::Organisations(filters) => {
				if let Some(range) = filters.employee_count.as_ref() {
					range.validate("$.filters.employee_count")?;
				}
				if let Some(range) = filters.annual_revenue.as_ref() {
					range.validate("$.filters.annual_revenue")?;
				}
			},
			Self::Engagements(filters) => {
				if let Some(period) = filters.period.as_ref() {
					period.validate("$.filters.period")?;
				}
				if let Some(volume) = filters.volume.as_ref() {
					volume.validate("$.filters.volume")?;
				}
			},
			Self::Tenders(filters) => {
				if let Some(range) = filters.submission_deadline.as_ref() {
					range.validate("$.filters.submission_deadline")?;
				}
				if let Some(range) = filters.binding_deadline.as_ref() {
					range.validate("$.filters.binding_deadline")?;
				}
				if let Some(volume) = filters.volume.as_ref() {
					volume.validate("$.filters.volume")?;
				}
				if let Some(range) = filters.success_chance.as_ref() {
					range.validate("$.filters.success_chance")?;

					for bound in [range.min, range.max].into_iter().flatten() {
						if !(0.0..=100.0).contains(&bound) {
							return Err(FilterError::new(
								"$.filters.success_chance",
								"success chance bounds must be within 0-100.",
							));
						}
					}
				}
			},
			Self::Tasks(filters) =>
				if let Some(range) = filters.due_date.as_ref() {
					range.validate("$.filters.due_date")?;
				},
			Self::OrganisationContacts(_) => {},
		}

		Ok(())
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchPlan {
	pub filters: ModelFilters,
	/// Trimmed free-text query. Plans with an empty query are never sent to a store.
	pub query: String,
	pub sort: SortOrder,
	/// One-based page number.
	pub page: u32,
	pub limit: u32,
}
impl SearchPlan {
	pub fn model(&self) -> SearchModel {
		self.filters.model()
	}

	pub fn offset(&self) -> u64 {
		u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Volume {
	pub currency: Option<f64>,
	pub person_days: Option<f64>,
	pub hours: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersonnelHit {
	pub id: String,
	pub name: String,
	pub description: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	pub rank: Option<String>,
	pub location: Option<String>,
	pub division: Option<String>,
	pub skills: Vec<String>,
	pub certificates: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrganisationHit {
	pub id: String,
	pub name: String,
	pub description: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	pub industry_sectors: Vec<String>,
	pub location: Option<String>,
	pub employee_count: Option<i64>,
	pub annual_revenue: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngagementHit {
	pub id: String,
	pub title: String,
	pub description: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	#[serde(rename = "type")]
	pub engagement_type: Option<String>,
	pub status: Option<String>,
	#[serde(with = "time::serde::rfc3339::option")]
	pub start_date: Option<OffsetDateTime>,
	#[serde(with = "time::serde::rfc3339::option")]
	pub end_date: Option<OffsetDateTime>,
	pub volume: Volume,
	pub keywords: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TenderHit {
	pub id: String,
	pub title: String,
	pub description: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	#[serde(rename = "type")]
	pub tender_type: Option<String>,
	pub status: Option<String>,
	#[serde(with = "time::serde::rfc3339::option")]
	pub submission_deadline: Option<OffsetDateTime>,
	#[serde(with = "time::serde::rfc3339::option")]
	pub binding_deadline: Option<OffsetDateTime>,
	pub volume: Volume,
	pub success_chance: Option<f64>,
	pub keywords: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskHit {
	pub id: String,
	pub title: String,
	pub description: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
	#[serde(rename = "type")]
	pub task_type: Option<String>,
	pub status: Option<String>,
	#[serde(with = "time::serde::rfc3339::option")]
	pub due_date: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrganisationContactHit {
	pub id: String,
	pub name: String,
	pub email: Option<String>,
	pub position: Option<String>,
	pub organisation_id: Option<String>,
	pub organisation_name: Option<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum SearchItem {
	Personnel(PersonnelHit),
	Organisations(OrganisationHit),
	Engagements(EngagementHit),
	Tenders(TenderHit),
	Tasks(TaskHit),
	OrganisationContacts(OrganisationContactHit),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchPage {
	pub items: Vec<SearchItem>,
	pub total: u64,
}

fn from_filters<T>(normalized: Value) -> Result<T, FilterError>
where
	T: serde::de::DeserializeOwned,
{
	serde_json::from_value(normalized).map_err(|err| FilterError::new("$.filters", err.to_string()))
}
