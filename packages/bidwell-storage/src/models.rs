//! Row shapes read from Postgres and their conversions into domain values.

use time::OffsetDateTime;

use bidwell_domain::{
	models::{
		ArtifactProfile, EngagementProfile, ExperienceYears, MatchLink, ParticipationCondition,
		PersonnelProfile, Population,
	},
	search::{
		EngagementHit, OrganisationContactHit, OrganisationHit, PersonnelHit, SearchItem, TaskHit,
		TenderHit, Volume,
	},
};

use crate::Error;

#[derive(Debug, sqlx::FromRow)]
pub struct ConditionRow {
	pub condition_id: String,
	pub tender_id: String,
	pub condition_type_id: String,
	pub title: String,
	pub requirements: Option<String>,
	pub experience_it: Option<i32>,
	pub experience_consulting: Option<i32>,
	pub experience_project_management: Option<i32>,
	pub experience_leadership: Option<i32>,
	pub experience_industry: Option<i32>,
	pub certificate_ids: Vec<String>,
	pub industry_sector_ids: Vec<String>,
	pub academic_degrees: Vec<String>,
	pub executive_position_required: bool,
	pub volume_target: Option<f64>,
	pub duration_days: Option<i64>,
	pub criterion_type: Option<String>,
	pub search_index: String,
	pub created_at: OffsetDateTime,
}
impl From<ConditionRow> for ParticipationCondition {
	fn from(row: ConditionRow) -> Self {
		Self {
			condition_id: row.condition_id,
			tender_id: row.tender_id,
			condition_type_id: row.condition_type_id,
			title: row.title,
			requirements: row.requirements,
			experience: ExperienceYears {
				it: years(row.experience_it),
				consulting: years(row.experience_consulting),
				project_management: years(row.experience_project_management),
				leadership: years(row.experience_leadership),
				industry: years(row.experience_industry),
			},
			certificate_ids: row.certificate_ids,
			industry_sector_ids: row.industry_sector_ids,
			academic_degrees: row.academic_degrees,
			executive_position_required: row.executive_position_required,
			volume_target: row.volume_target,
			duration_days: row.duration_days,
			criterion_type: row.criterion_type,
			search_index: row.search_index,
			created_at: row.created_at,
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct PersonnelProfileRow {
	pub personnel_id: String,
	pub experience_it: Option<i32>,
	pub experience_consulting: Option<i32>,
	pub experience_project_management: Option<i32>,
	pub experience_leadership: Option<i32>,
	pub experience_industry: Option<i32>,
	pub certificate_ids: Vec<String>,
	pub engagement_sector_ids: Vec<String>,
	pub academic_degrees: Vec<String>,
	pub executive_history: bool,
}
impl From<PersonnelProfileRow> for PersonnelProfile {
	fn from(row: PersonnelProfileRow) -> Self {
		Self {
			personnel_id: row.personnel_id,
			experience: ExperienceYears {
				it: years(row.experience_it),
				consulting: years(row.experience_consulting),
				project_management: years(row.experience_project_management),
				leadership: years(row.experience_leadership),
				industry: years(row.experience_industry),
			},
			certificate_ids: row.certificate_ids,
			engagement_sector_ids: row.engagement_sector_ids,
			academic_degrees: row.academic_degrees,
			executive_history: row.executive_history,
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct EngagementProfileRow {
	pub project_id: String,
	pub keywords: Vec<String>,
	pub volume_currency: Option<f64>,
	pub organisation_sector_ids: Vec<String>,
	pub end_date: Option<OffsetDateTime>,
}
impl From<EngagementProfileRow> for EngagementProfile {
	fn from(row: EngagementProfileRow) -> Self {
		Self {
			engagement_id: row.project_id,
			keywords: row.keywords,
			volume: row.volume_currency,
			organisation_sector_ids: row.organisation_sector_ids,
			contract_end: row.end_date,
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct ArtifactProfileRow {
	pub artifact_id: String,
	pub title: String,
	pub description: Option<String>,
	pub artifact_type: Option<String>,
	pub keywords: Vec<String>,
}
impl From<ArtifactProfileRow> for ArtifactProfile {
	fn from(row: ArtifactProfileRow) -> Self {
		Self {
			artifact_id: row.artifact_id,
			title: row.title,
			description: row.description,
			artifact_type: row.artifact_type,
			keywords: row.keywords,
		}
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct MatchLinkRow {
	pub link_id: String,
	pub tender_id: String,
	pub condition_id: Option<String>,
	pub population: String,
	pub candidate_id: String,
	pub role_id: Option<String>,
	pub description: String,
	pub auto_selected: bool,
	pub created_at: OffsetDateTime,
}
impl TryFrom<MatchLinkRow> for MatchLink {
	type Error = Error;

	fn try_from(row: MatchLinkRow) -> Result<Self, Self::Error> {
		let population = Population::parse(&row.population).ok_or_else(|| {
			Error::InvalidArgument(format!(
				"Link {} has unknown population {}.",
				row.link_id, row.population
			))
		})?;

		Ok(Self {
			link_id: row.link_id,
			tender_id: row.tender_id,
			condition_id: row.condition_id,
			population,
			candidate_id: row.candidate_id,
			role_id: row.role_id,
			description: row.description,
			auto_selected: row.auto_selected,
			created_at: row.created_at,
		})
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct PersonnelHitRow {
	pub id: String,
	pub name: String,
	pub description: Option<String>,
	pub created_at: OffsetDateTime,
	pub rank: Option<String>,
	pub location: Option<String>,
	pub division: Option<String>,
	pub skills: Vec<String>,
	pub certificates: Vec<String>,
}
impl From<PersonnelHitRow> for SearchItem {
	fn from(row: PersonnelHitRow) -> Self {
		Self::Personnel(PersonnelHit {
			id: row.id,
			name: row.name,
			description: row.description,
			created_at: row.created_at,
			rank: row.rank,
			location: row.location,
			division: row.division,
			skills: row.skills,
			certificates: row.certificates,
		})
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct OrganisationHitRow {
	pub id: String,
	pub name: String,
	pub description: Option<String>,
	pub created_at: OffsetDateTime,
	pub industry_sectors: Vec<String>,
	pub location: Option<String>,
	pub employee_count: Option<i64>,
	pub annual_revenue: Option<f64>,
}
impl From<OrganisationHitRow> for SearchItem {
	fn from(row: OrganisationHitRow) -> Self {
		Self::Organisations(OrganisationHit {
			id: row.id,
			name: row.name,
			description: row.description,
			created_at: row.created_at,
			industry_sectors: row.industry_sectors,
			location: row.location,
			employee_count: row.employee_count,
			annual_revenue: row.annual_revenue,
		})
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct EngagementHitRow {
	pub id: String,
	pub title: String,
	pub description: Option<String>,
	pub created_at: OffsetDateTime,
	pub project_type: Option<String>,
	pub status: Option<String>,
	pub start_date: Option<OffsetDateTime>,
	pub end_date: Option<OffsetDateTime>,
	pub volume_currency: Option<f64>,
	pub volume_person_days: Option<f64>,
	pub volume_hours: Option<f64>,
	pub keywords: Vec<String>,
}
impl From<EngagementHitRow> for SearchItem {
	fn from(row: EngagementHitRow) -> Self {
		Self::Engagements(EngagementHit {
			id: row.id,
			title: row.title,
			description: row.description,
			created_at: row.created_at,
			engagement_type: row.project_type,
			status: row.status,
			start_date: row.start_date,
			end_date: row.end_date,
			volume: Volume {
				currency: row.volume_currency,
				person_days: row.volume_person_days,
				hours: row.volume_hours,
			},
			keywords: row.keywords,
		})
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct TenderHitRow {
	pub id: String,
	pub title: String,
	pub description: Option<String>,
	pub created_at: OffsetDateTime,
	pub tender_type: Option<String>,
	pub status: Option<String>,
	pub submission_deadline: Option<OffsetDateTime>,
	pub binding_deadline: Option<OffsetDateTime>,
	pub volume_currency: Option<f64>,
	pub volume_person_days: Option<f64>,
	pub volume_hours: Option<f64>,
	pub success_chance: Option<f64>,
	pub keywords: Vec<String>,
}
impl From<TenderHitRow> for SearchItem {
	fn from(row: TenderHitRow) -> Self {
		Self::Tenders(TenderHit {
			id: row.id,
			title: row.title,
			description: row.description,
			created_at: row.created_at,
			tender_type: row.tender_type,
			status: row.status,
			submission_deadline: row.submission_deadline,
			binding_deadline: row.binding_deadline,
			volume: Volume {
				currency: row.volume_currency,
				person_days: row.volume_person_days,
				hours: row.volume_hours,
			},
			success_chance: row.success_chance,
			keywords: row.keywords,
		})
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct TaskHitRow {
	pub id: String,
	pub title: String,
	pub description: Option<String>,
	pub created_at: OffsetDateTime,
	pub task_type: Option<String>,
	pub status: Option<String>,
	pub due_date: Option<OffsetDateTime>,
}
impl From<TaskHitRow> for SearchItem {
	fn from(row: TaskHitRow) -> Self {
		Self::Tasks(TaskHit {
			id: row.id,
			title: row.title,
			description: row.description,
			created_at: row.created_at,
			task_type: row.task_type,
			status: row.status,
			due_date: row.due_date,
		})
	}
}

#[derive(Debug, sqlx::FromRow)]
pub struct OrganisationContactHitRow {
	pub id: String,
	pub name: String,
	pub email: Option<String>,
	pub position: Option<String>,
	pub organisation_id: Option<String>,
	pub organisation_name: Option<String>,
	pub created_at: OffsetDateTime,
}
impl From<OrganisationContactHitRow> for SearchItem {
	fn from(row: OrganisationContactHitRow) -> Self {
		Self::OrganisationContacts(OrganisationContactHit {
			id: row.id,
			name: row.name,
			email: row.email,
			position: row.position,
			organisation_id: row.organisation_id,
			organisation_name: row.organisation_name,
			created_at: row.created_at,
		})
	}
}

/// Negative counters are treated as unknown.
fn years(raw: Option<i32>) -> Option<u32> {
	raw.and_then(|value| u32::try_from(value).ok())
}
