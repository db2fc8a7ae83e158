use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use bidwell_domain::models::MatchLink;

use crate::{Result, models::MatchLinkRow};

/// Returns the id of the role called `name`, creating it on first use.
pub async fn resolve_role(pool: &PgPool, name: &str) -> Result<String> {
	sqlx::query("INSERT INTO roles (role_id, name) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING")
		.bind(Uuid::new_v4().to_string())
		.bind(name)
		.execute(pool)
		.await?;

	let role_id = sqlx::query_scalar::<_, String>("SELECT role_id FROM roles WHERE name = $1")
		.bind(name)
		.fetch_one(pool)
		.await?;

	Ok(role_id)
}

/// Inserts links, skipping candidates already linked to the same tender and population.
///
/// Writers for the same tender are serialized by a transaction-scoped advisory lock. Returns the
/// number of rows actually inserted.
pub async fn insert_links(pool: &PgPool, links: &[MatchLink]) -> Result<u64> {
	if links.is_empty() {
		return Ok(0);
	}

	let mut tender_ids: Vec<&str> = links.iter().map(|link| link.tender_id.as_str()).collect();

	tender_ids.sort_unstable();
	tender_ids.dedup();

	let mut tx = pool.begin().await?;

	for tender_id in tender_ids {
		sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
			.bind(format!("match_links:{tender_id}"))
			.execute(&mut *tx)
			.await?;
	}

	let mut inserted = 0;

	for link in links {
		let result = sqlx::query(
			"\
INSERT INTO match_links (
	link_id,
	tender_id,
	condition_id,
	population,
	candidate_id,
	role_id,
	description,
	auto_selected,
	created_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
ON CONFLICT (tender_id, population, candidate_id) DO NOTHING",
		)
		.bind(link.link_id.as_str())
		.bind(link.tender_id.as_str())
		.bind(link.condition_id.as_deref())
		.bind(link.population.as_str())
		.bind(link.candidate_id.as_str())
		.bind(link.role_id.as_deref())
		.bind(link.description.as_str())
		.bind(link.auto_selected)
		.bind(link.created_at)
		.execute(&mut *tx)
		.await?;

		inserted += result.rows_affected();
	}

	tx.commit().await?;

	Ok(inserted)
}

pub async fn list_links<'e, E>(executor: E, tender_id: &str) -> Result<Vec<MatchLink>>
where
	E: PgExecutor<'e>,
{
	let rows = sqlx::query_as::<_, MatchLinkRow>(
		"\
SELECT
	link_id,
	tender_id,
	condition_id,
	population,
	candidate_id,
	role_id,
	description,
	auto_selected,
	created_at
FROM match_links
WHERE tender_id = $1
ORDER BY created_at ASC, link_id ASC",
	)
	.bind(tender_id)
	.fetch_all(executor)
	.await?;

	rows.into_iter().map(MatchLink::try_from).collect()
}

pub async fn delete_link<'e, E>(executor: E, link_id: &str) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let result = sqlx::query("DELETE FROM match_links WHERE link_id = $1")
		.bind(link_id)
		.execute(executor)
		.await?;

	Ok(result.rows_affected() > 0)
}
