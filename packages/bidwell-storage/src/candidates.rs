//! Full scans of the three candidate populations.

use sqlx::PgExecutor;

use bidwell_domain::models::{ArtifactProfile, EngagementProfile, PersonnelProfile};

use crate::{
	Result,
	models::{ArtifactProfileRow, EngagementProfileRow, PersonnelProfileRow},
};

pub async fn personnel_profiles<'e, E>(executor: E) -> Result<Vec<PersonnelProfile>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, PersonnelProfileRow>(
		"\
SELECT
	p.personnel_id,
	p.experience_it,
	p.experience_consulting,
	p.experience_project_management,
	p.experience_leadership,
	p.experience_industry,
	ARRAY(
		SELECT pc.certificate_id
		FROM personnel_certificates pc
		WHERE pc.personnel_id = p.personnel_id
		ORDER BY pc.certificate_id
	) AS certificate_ids,
	ARRAY(
		SELECT DISTINCT sector
		FROM personnel_engagements pe
		JOIN projects pr ON pr.project_id = pe.project_id
		JOIN organisations o ON o.organisation_id = pr.organisation_id
		CROSS JOIN LATERAL unnest(o.industry_sector_ids) AS sector
		WHERE pe.personnel_id = p.personnel_id
	) AS engagement_sector_ids,
	p.academic_degrees,
	EXISTS (
		SELECT 1
		FROM personnel_positions pp
		WHERE pp.personnel_id = p.personnel_id AND pp.executive
	) AS executive_history
FROM personnel p
ORDER BY p.personnel_id",
	)
	.fetch_all(executor)
	.await?;

	Ok(rows.into_iter().map(PersonnelProfile::from).collect())
}

pub async fn engagement_profiles<'e, E>(executor: E) -> Result<Vec<EngagementProfile>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, EngagementProfileRow>(
		"\
SELECT
	pr.project_id,
	pr.keywords,
	pr.volume_currency,
	COALESCE(o.industry_sector_ids, '{}'::text[]) AS organisation_sector_ids,
	pr.end_date
FROM projects pr
LEFT JOIN organisations o ON o.organisation_id = pr.organisation_id
ORDER BY pr.project_id",
	)
	.fetch_all(executor)
	.await?;

	Ok(rows.into_iter().map(EngagementProfile::from).collect())
}

pub async fn artifact_profiles<'e, E>(executor: E) -> Result<Vec<ArtifactProfile>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, ArtifactProfileRow>(
		"\
SELECT artifact_id, title, description, artifact_type, keywords
FROM artifacts
ORDER BY artifact_id",
	)
	.fetch_all(executor)
	.await?;

	Ok(rows.into_iter().map(ArtifactProfile::from).collect())
}
