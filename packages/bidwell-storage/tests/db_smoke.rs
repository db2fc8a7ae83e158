use time::OffsetDateTime;

use bidwell_config::Postgres;
use bidwell_domain::{
	models::{MatchLink, Population},
	search::{ModelFilters, SearchItem, SearchPlan, SortOrder, TaskFilters},
};
use bidwell_storage::{Store, db::Db};
use bidwell_testkit::TestDatabase;

async fn bootstrap(test_db: &TestDatabase) -> Db {
	let cfg = Postgres {
		dsn: test_db.dsn().to_string(),
		pool_max_conns: 2,
		statement_timeout_ms: 5_000,
	};
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	db
}

fn link(link_id: &str, candidate_id: &str) -> MatchLink {
	MatchLink {
		link_id: link_id.to_string(),
		tender_id: "T1".to_string(),
		condition_id: None,
		population: Population::Personnel,
		candidate_id: candidate_id.to_string(),
		role_id: None,
		description: "Auto-selected: experience".to_string(),
		auto_selected: true,
		created_at: OffsetDateTime::now_utc(),
	}
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set BIDWELL_PG_DSN to run."]
async fn db_connects_and_bootstraps_twice() {
	let Some(base_dsn) = bidwell_testkit::env_dsn() else {
		eprintln!("Skipping db_connects_and_bootstraps_twice; set BIDWELL_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrap(&test_db).await;

	db.ensure_schema().await.expect("Schema bootstrap should be repeatable.");

	let count: i64 = sqlx::query_scalar(
		"SELECT count(*) FROM information_schema.tables WHERE table_name = 'match_links'",
	)
	.fetch_one(&db.pool)
	.await
	.expect("Failed to query schema tables.");

	assert_eq!(count, 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set BIDWELL_PG_DSN to run."]
async fn link_inserts_skip_existing_candidates() {
	let Some(base_dsn) = bidwell_testkit::env_dsn() else {
		eprintln!("Skipping link_inserts_skip_existing_candidates; set BIDWELL_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrap(&test_db).await;

	sqlx::query("INSERT INTO tenders (tender_id, title) VALUES ('T1', 'Data center migration')")
		.execute(&db.pool)
		.await
		.expect("Failed to seed tender.");

	let first = db
		.insert_links(&[link("l-1", "p-1"), link("l-2", "p-2")])
		.await
		.expect("Failed to insert links.");
	let second = db
		.insert_links(&[link("l-3", "p-1"), link("l-4", "p-3")])
		.await
		.expect("Failed to insert links.");

	assert_eq!(first, 2);
	assert_eq!(second, 1);

	let links = db.list_links("T1").await.expect("Failed to list links.");

	assert_eq!(links.len(), 3);
	assert!(db.delete_link("l-1").await.expect("Failed to delete link."));
	assert!(!db.delete_link("l-1").await.expect("Failed to delete link."));

	let role = db.resolve_role("Project Team Member").await.expect("Failed to resolve role.");
	let again = db.resolve_role("Project Team Member").await.expect("Failed to resolve role.");

	assert_eq!(role, again);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set BIDWELL_PG_DSN to run."]
async fn faceted_search_filters_tasks() {
	let Some(base_dsn) = bidwell_testkit::env_dsn() else {
		eprintln!("Skipping faceted_search_filters_tasks; set BIDWELL_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrap(&test_db).await;

	sqlx::query(
		"\
INSERT INTO tasks (task_id, title, status)
VALUES
	('tk-1', 'Prepare cloud offer', 'OPEN'),
	('tk-2', 'Review cloud offer', 'DONE'),
	('tk-3', 'Book travel', 'OPEN')",
	)
	.execute(&db.pool)
	.await
	.expect("Failed to seed tasks.");

	let plan = SearchPlan {
		filters: ModelFilters::Tasks(TaskFilters {
			statuses: vec!["OPEN".to_string()],
			..Default::default()
		}),
		query: "CLOUD".to_string(),
		sort: SortOrder::Relevance,
		page: 1,
		limit: 10,
	};
	let page = db.search(&plan).await.expect("Search failed.");

	assert_eq!(page.total, 1);
	assert!(matches!(page.items.as_slice(), [SearchItem::Tasks(task)] if task.id == "tk-1"));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
