use std::{sync::Arc, time::Duration};

use serde_json::json;
use time::OffsetDateTime;

use bidwell_config::{Config, Matching, Postgres, Search, Service, Storage};
use bidwell_domain::{
	models::{
		ArtifactProfile, EngagementProfile, ExperienceYears, PersonnelProfile, Population,
	},
	search::{SearchItem, SearchModel, SearchPage, TaskHit},
};
use bidwell_service::{BidwellService, CreateConditionRequest, Error, SearchRequest};
use bidwell_testkit::MemoryStore;

fn test_config() -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage {
			postgres: Postgres {
				dsn: "postgres://unused".to_string(),
				pool_max_conns: 1,
				statement_timeout_ms: 1_000,
			},
		},
		matching: Matching::default(),
		search: Search { default_limit: 20, max_limit: 100, timeout_ms: 1_000 },
	}
}

fn seeded_store() -> MemoryStore {
	MemoryStore::new().with_condition_type("ct-experience").with_tender("T1")
}

fn person(id: &str, it_years: u32) -> PersonnelProfile {
	PersonnelProfile {
		personnel_id: id.to_string(),
		experience: ExperienceYears { it: Some(it_years), ..Default::default() },
		..Default::default()
	}
}

fn engagement(id: &str, volume: f64) -> EngagementProfile {
	EngagementProfile { engagement_id: id.to_string(), volume: Some(volume), ..Default::default() }
}

fn experience_request() -> CreateConditionRequest {
	CreateConditionRequest {
		tender_id: "T1".to_string(),
		condition_type_id: "ct-experience".to_string(),
		title: "Must have 5y IT exp".to_string(),
		requirements: None,
		criteria: json!({
			"experience": { "it": 5 },
			"certificate_ids": [],
			"industry_sector_ids": [],
			"academic_degrees": [],
		}),
	}
}

fn task_hit(id: &str) -> SearchItem {
	SearchItem::Tasks(TaskHit {
		id: id.to_string(),
		title: format!("Task {id}"),
		description: None,
		created_at: OffsetDateTime::now_utc(),
		task_type: None,
		status: Some("OPEN".to_string()),
		due_date: None,
	})
}

#[tokio::test]
async fn experience_condition_links_only_the_qualified_person() {
	let store = Arc::new(seeded_store().with_personnel(person("p-6", 6)).with_personnel(person("p-3", 3)));
	let service = BidwellService::new(test_config(), store.clone());
	let condition =
		service.create_condition(experience_request()).await.expect("Failed to create condition.");
	let links = store.links();

	assert_eq!(links.len(), 1);
	assert_eq!(links[0].candidate_id, "p-6");
	assert_eq!(links[0].population, Population::Personnel);
	assert_eq!(links[0].condition_id.as_deref(), Some(condition.condition_id.as_str()));
	assert_eq!(links[0].description, "Auto-selected: experience");
	assert!(links[0].auto_selected);
	assert!(links[0].role_id.is_some());
	assert_eq!(store.role_resolutions(), 1);
	assert_eq!(condition.experience.it, Some(5));
	assert!(condition.search_index.contains("must have 5y it exp"));
}

#[tokio::test]
async fn volume_target_links_engagements_within_band() {
	let store = Arc::new(
		seeded_store()
			.with_engagement(engagement("e-100k", 100_000.0))
			.with_engagement(engagement("e-200k", 200_000.0)),
	);
	let service = BidwellService::new(test_config(), store.clone());
	let mut req = experience_request();

	req.title = "Comparable engagement volume".to_string();
	req.criteria = json!({ "volume_target": 110_000.0 });

	service.create_condition(req).await.expect("Failed to create condition.");

	let links = store.links();

	assert_eq!(links.len(), 1);
	assert_eq!(links[0].candidate_id, "e-100k");
	assert_eq!(links[0].population, Population::Engagements);
	assert_eq!(links[0].description, "Auto-selected: volume");
	assert!(links[0].role_id.is_some());
}

#[tokio::test]
async fn rematching_creates_no_duplicate_links() {
	let store = Arc::new(seeded_store().with_personnel(person("p-6", 6)));
	let service = BidwellService::new(test_config(), store.clone());
	let condition =
		service.create_condition(experience_request()).await.expect("Failed to create condition.");
	let report = service
		.rematch_condition(&condition.condition_id)
		.await
		.expect("Failed to rematch condition.");

	assert_eq!(report.personnel_matched, 1);
	assert_eq!(report.links_created, 0);
	assert!(report.failures.is_empty());
	assert_eq!(store.links().len(), 1);
}

#[tokio::test]
async fn failing_population_does_not_stop_the_others() {
	let store = Arc::new(
		seeded_store()
			.with_personnel(person("p-6", 6))
			.with_engagement(engagement("e-100k", 100_000.0))
			.with_artifact(ArtifactProfile {
				artifact_id: "a-1".to_string(),
				title: "Reference: data center migration".to_string(),
				..Default::default()
			})
			.failing(Population::Personnel),
	);
	let service = BidwellService::new(test_config(), store.clone());
	let mut req = experience_request();

	req.requirements = Some("data center migration".to_string());
	req.criteria = json!({ "experience": { "it": 5 }, "volume_target": 100_000 });

	let condition = service.create_condition(req).await.expect("Matching failures must not fail creation.");
	let report = service
		.rematch_condition(&condition.condition_id)
		.await
		.expect("Failed to rematch condition.");

	assert_eq!(report.failures.len(), 1);
	assert_eq!(report.failures[0].population, Population::Personnel);
	assert_eq!(report.engagements_matched, 1);
	assert_eq!(report.artifacts_matched, 1);

	let mut linked = store.links().into_iter().map(|link| link.candidate_id).collect::<Vec<_>>();

	linked.sort();

	assert_eq!(linked, vec!["a-1", "e-100k"]);
}

#[tokio::test]
async fn missing_required_fields_are_rejected_before_any_write() {
	let store = Arc::new(seeded_store().with_personnel(person("p-6", 6)));
	let service = BidwellService::new(test_config(), store.clone());
	let mut req = experience_request();

	req.title = "   ".to_string();

	let err = service.create_condition(req).await.expect_err("Expected missing title to fail.");

	assert!(matches!(err, Error::InvalidRequest { .. }), "Unexpected error: {err:?}");
	assert!(store.conditions().is_empty());
	assert!(store.links().is_empty());
}

#[tokio::test]
async fn invalid_volume_and_duration_are_rejected() {
	let service = BidwellService::new(test_config(), Arc::new(seeded_store()));
	let mut req = experience_request();

	req.criteria = json!({ "volume_target": -1 });

	assert!(matches!(service.create_condition(req).await, Err(Error::InvalidRequest { .. })));

	let mut req = experience_request();

	req.criteria = json!({ "duration_days": 0 });

	assert!(matches!(service.create_condition(req).await, Err(Error::InvalidRequest { .. })));

	let mut req = experience_request();

	req.criteria = json!({ "experience": { "it": 5 }, "favourite_colour": "blue" });

	assert!(matches!(service.create_condition(req).await, Err(Error::InvalidRequest { .. })));
}

#[tokio::test]
async fn unknown_tender_or_condition_type_is_not_found() {
	let service = BidwellService::new(test_config(), Arc::new(seeded_store()));
	let mut req = experience_request();

	req.tender_id = "T404".to_string();

	assert!(matches!(service.create_condition(req).await, Err(Error::NotFound { .. })));

	let mut req = experience_request();

	req.condition_type_id = "ct-404".to_string();

	assert!(matches!(service.create_condition(req).await, Err(Error::NotFound { .. })));
	assert!(matches!(service.rematch_condition("c-404").await, Err(Error::NotFound { .. })));
}

#[tokio::test]
async fn links_can_be_listed_and_removed() {
	let store = Arc::new(seeded_store().with_personnel(person("p-6", 6)));
	let service = BidwellService::new(test_config(), store.clone());

	service.create_condition(experience_request()).await.expect("Failed to create condition.");

	let listed = service.list_links("T1").await.expect("Failed to list links.");

	assert_eq!(listed.links.len(), 1);

	let link_id = listed.links[0].link_id.clone();
	let removed = service.unlink(&link_id).await.expect("Failed to unlink.");

	assert!(removed.deleted);
	assert!(store.links().is_empty());
	assert!(matches!(service.unlink(&link_id).await, Err(Error::NotFound { .. })));
	assert!(matches!(service.list_links("T404").await, Err(Error::NotFound { .. })));
}

#[tokio::test]
async fn empty_query_search_skips_the_store() {
	let store = Arc::new(
		MemoryStore::new().with_search_page(
			SearchModel::Tasks,
			SearchPage { items: vec![task_hit("tk-1")], total: 1 },
		),
	);
	let service = BidwellService::new(test_config(), store.clone());
	let response = service
		.search(SearchRequest {
			model: "tasks".to_string(),
			query: "   ".to_string(),
			filters: json!({ "statuses": ["OPEN"] }),
			..Default::default()
		})
		.await
		.expect("Search failed.");

	assert!(response.items.is_empty());
	assert_eq!(response.total, 0);
	assert!(!response.has_more);
	assert!(store.search_calls().is_empty());
}

#[tokio::test]
async fn empty_personnel_query_with_filters_skips_the_store() {
	let store = Arc::new(MemoryStore::new());
	let service = BidwellService::new(test_config(), store.clone());
	let response = service
		.search(SearchRequest {
			model: "personnel".to_string(),
			query: String::new(),
			filters: json!({
				"ranks": ["Senior"],
				"skills": ["rust", "sql"],
				"experience": { "it": { "min": 5 } },
			}),
			page: Some(2),
			..Default::default()
		})
		.await
		.expect("Search failed.");

	assert!(response.items.is_empty());
	assert_eq!(response.total, 0);
	assert_eq!(response.page, 2);
	assert!(store.search_calls().is_empty());
}

#[tokio::test]
async fn unknown_model_is_rejected_without_store_access() {
	let store = Arc::new(MemoryStore::new());
	let service = BidwellService::new(test_config(), store.clone());
	let err = service
		.search(SearchRequest {
			model: "invoices".to_string(),
			query: "cloud".to_string(),
			..Default::default()
		})
		.await
		.expect_err("Expected unknown model to fail.");

	assert!(matches!(err, Error::InvalidFilter { .. }), "Unexpected error: {err:?}");
	assert!(store.search_calls().is_empty());
}

#[tokio::test]
async fn search_forwards_normalized_filters_and_reports_more_pages() {
	let store = Arc::new(MemoryStore::new().with_search_page(
		SearchModel::Tasks,
		SearchPage { items: vec![task_hit("tk-1"), task_hit("tk-2")], total: 5 },
	));
	let service = BidwellService::new(test_config(), store.clone());
	let response = service
		.search(SearchRequest {
			model: "tasks".to_string(),
			query: "offer".to_string(),
			filters: json!({ "statuses": ["OPEN"], "types": [], "due_date": { "from": null } }),
			sort_by: Some("recency_desc".to_string()),
			page: Some(1),
			limit: Some(2),
		})
		.await
		.expect("Search failed.");

	assert_eq!(response.items.len(), 2);
	assert_eq!(response.total, 5);
	assert_eq!(response.limit, 2);
	assert!(response.has_more);

	let calls = store.search_calls();

	assert_eq!(calls.len(), 1);
	assert_eq!(calls[0].query, "offer");

	let bidwell_domain::search::ModelFilters::Tasks(filters) = &calls[0].filters else {
		panic!("Expected task filters.");
	};

	assert_eq!(filters.statuses, vec!["OPEN"]);
	assert!(filters.due_date.is_none());
}

#[tokio::test]
async fn slow_search_times_out() {
	let store = Arc::new(MemoryStore::new().with_search_delay(Duration::from_millis(500)));
	let mut cfg = test_config();

	cfg.search.timeout_ms = 20;

	let service = BidwellService::new(cfg, store);
	let err = service
		.search(SearchRequest {
			model: "organisations".to_string(),
			query: "acme".to_string(),
			..Default::default()
		})
		.await
		.expect_err("Expected the search to time out.");

	assert!(matches!(err, Error::Timeout { .. }), "Unexpected error: {err:?}");
}
