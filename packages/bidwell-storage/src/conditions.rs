use serde_json::Value;
use sqlx::PgExecutor;

use bidwell_domain::models::ParticipationCondition;

use crate::{Result, models::ConditionRow};

pub async fn condition_type_exists<'e, E>(executor: E, condition_type_id: &str) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let exists = sqlx::query_scalar::<_, bool>(
		"SELECT EXISTS (SELECT 1 FROM condition_types WHERE condition_type_id = $1)",
	)
	.bind(condition_type_id)
	.fetch_one(executor)
	.await?;

	Ok(exists)
}

pub async fn tender_exists<'e, E>(executor: E, tender_id: &str) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let exists =
		sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM tenders WHERE tender_id = $1)")
			.bind(tender_id)
			.fetch_one(executor)
			.await?;

	Ok(exists)
}

/// Persists a condition together with the normalized criteria object it was derived from.
pub async fn insert_condition<'e, E>(
	executor: E,
	condition: &ParticipationCondition,
	criteria: &Value,
) -> Result<()>
where
	E: PgExecutor<'e>,
{
	let experience = &condition.experience;

	sqlx::query(
		"\
INSERT INTO participation_conditions (
	condition_id,
	tender_id,
	condition_type_id,
	title,
	requirements,
	experience_it,
	experience_consulting,
	experience_project_management,
	experience_leadership,
	experience_industry,
	certificate_ids,
	industry_sector_ids,
	academic_degrees,
	executive_position_required,
	volume_target,
	duration_days,
	criterion_type,
	criteria,
	search_index,
	created_at
)
VALUES (
	$1,
	$2,
	$3,
	$4,
	$5,
	$6,
	$7,
	$8,
	$9,
	$10,
	$11,
	$12,
	$13,
	$14,
	$15,
	$16,
	$17,
	$18,
	$19,
	$20
)",
	)
	.bind(condition.condition_id.as_str())
	.bind(condition.tender_id.as_str())
	.bind(condition.condition_type_id.as_str())
	.bind(condition.title.as_str())
	.bind(condition.requirements.as_deref())
	.bind(counter(experience.it))
	.bind(counter(experience.consulting))
	.bind(counter(experience.project_management))
	.bind(counter(experience.leadership))
	.bind(counter(experience.industry))
	.bind(&condition.certificate_ids)
	.bind(&condition.industry_sector_ids)
	.bind(&condition.academic_degrees)
	.bind(condition.executive_position_required)
	.bind(condition.volume_target)
	.bind(condition.duration_days)
	.bind(condition.criterion_type.as_deref())
	.bind(criteria)
	.bind(condition.search_index.as_str())
	.bind(condition.created_at)
	.execute(executor)
	.await?;

	Ok(())
}

pub async fn fetch_condition<'e, E>(
	executor: E,
	condition_id: &str,
) -> Result<Option<ParticipationCondition>>
where
	E: PgExecutor<'e>,
{
	let row = sqlx::query_as::<_, ConditionRow>(
		"\
SELECT
	condition_id,
	tender_id,
	condition_type_id,
	title,
	requirements,
	experience_it,
	experience_consulting,
	experience_project_management,
	experience_leadership,
	experience_industry,
	certificate_ids,
	industry_sector_ids,
	academic_degrees,
	executive_position_required,
	volume_target,
	duration_days,
	criterion_type,
	search_index,
	created_at
FROM participation_conditions
WHERE condition_id = $1",
	)
	.bind(condition_id)
	.fetch_optional(executor)
	.await?;

	Ok(row.map(ParticipationCondition::from))
}

fn counter(years: Option<u32>) -> Option<i32> {
	years.map(|value| i32::try_from(value).unwrap_or(i32::MAX))
}
