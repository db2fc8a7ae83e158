use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExperienceAxis {
	It,
	Consulting,
	ProjectManagement,
	Leadership,
	Industry,
}
impl ExperienceAxis {
	pub const ALL: [Self; 5] =
		[Self::It, Self::Consulting, Self::ProjectManagement, Self::Leadership, Self::Industry];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::It => "it",
			Self::Consulting => "consulting",
			Self::ProjectManagement => "project_management",
			Self::Leadership => "leadership",
			Self::Industry => "industry",
		}
	}
}

/// Years of experience per axis. Used both for a condition's minimums and a person's counters;
/// `None` means "not specified" on a condition and "unknown" on a person.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperienceYears {
	pub it: Option<u32>,
	pub consulting: Option<u32>,
	pub project_management: Option<u32>,
	pub leadership: Option<u32>,
	pub industry: Option<u32>,
}
impl ExperienceYears {
	pub fn get(&self, axis: ExperienceAxis) -> Option<u32> {
		match axis {
			ExperienceAxis::It => self.it,
			ExperienceAxis::Consulting => self.consulting,
			ExperienceAxis::ProjectManagement => self.project_management,
			ExperienceAxis::Leadership => self.leadership,
			ExperienceAxis::Industry => self.industry,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticipationCondition {
	pub condition_id: String,
	pub tender_id: String,
	pub condition_type_id: String,
	pub title: String,
	pub requirements: Option<String>,
	pub experience: ExperienceYears,
	pub certificate_ids: Vec<String>,
	pub industry_sector_ids: Vec<String>,
	pub academic_degrees: Vec<String>,
	pub executive_position_required: bool,
	pub volume_target: Option<f64>,
	pub duration_days: Option<i64>,
	pub criterion_type: Option<String>,
	pub search_index: String,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PersonnelProfile {
	pub personnel_id: String,
	pub experience: ExperienceYears,
	pub certificate_ids: Vec<String>,
	/// Industry sectors of the client organisations of the person's past engagements.
	pub engagement_sector_ids: Vec<String>,
	pub academic_degrees: Vec<String>,
	pub executive_history: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngagementProfile {
	pub engagement_id: String,
	pub keywords: Vec<String>,
	pub volume: Option<f64>,
	pub organisation_sector_ids: Vec<String>,
	pub contract_end: Option<OffsetDateTime>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArtifactProfile {
	pub artifact_id: String,
	pub title: String,
	pub description: Option<String>,
	pub artifact_type: Option<String>,
	pub keywords: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Population {
	Personnel,
	Engagements,
	Artifacts,
}
impl Population {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Personnel => "personnel",
			Self::Engagements => "engagements",
			Self::Artifacts => "artifacts",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"personnel" => Some(Self::Personnel),
			"engagements" => Some(Self::Engagements),
			"artifacts" => Some(Self::Artifacts),
			_ => None,
		}
	}

	/// Personnel and engagement links carry a team role; artifact links do not.
	pub fn takes_role(self) -> bool {
		matches!(self, Self::Personnel | Self::Engagements)
	}
}
impl Display for Population {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchLink {
	pub link_id: String,
	pub tender_id: String,
	pub condition_id: Option<String>,
	pub population: Population,
	pub candidate_id: String,
	pub role_id: Option<String>,
	pub description: String,
	pub auto_selected: bool,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}
