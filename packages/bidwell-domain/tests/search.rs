use serde_json::json;

use bidwell_domain::{
	normalize::normalize,
	search::{ModelFilters, SearchModel, SortOrder},
};

#[test]
fn model_names_accept_aliases() {
	assert_eq!("projects".parse::<SearchModel>(), Ok(SearchModel::Engagements));
	assert_eq!(
		"organisation-contacts".parse::<SearchModel>(),
		Ok(SearchModel::OrganisationContacts)
	);
	assert_eq!(" Tenders ".parse::<SearchModel>(), Ok(SearchModel::Tenders));

	let err = "invoices".parse::<SearchModel>().expect_err("Expected unknown model to fail.");

	assert_eq!(err.path, "$.model");
}

#[test]
fn sort_order_defaults_to_relevance() {
	assert_eq!("".parse::<SortOrder>(), Ok(SortOrder::Relevance));
	assert_eq!("recency_desc".parse::<SortOrder>(), Ok(SortOrder::RecencyDesc));
	assert!("newest".parse::<SortOrder>().is_err());
}

#[test]
fn parses_typed_filters_per_model() {
	let raw = json!({
		"ranks": ["Senior"],
		"experience": { "it": { "min": 3 } },
		"skills": [],
	});
	let parsed = ModelFilters::parse(SearchModel::Personnel, normalize(&raw))
		.expect("Expected personnel filters to parse.");
	let ModelFilters::Personnel(filters) = parsed else { panic!("Expected personnel filters.") };

	assert_eq!(filters.ranks, vec!["Senior"]);
	assert!(filters.skills.is_empty());
	assert_eq!(filters.experience.and_then(|experience| experience.it).and_then(|it| it.min), Some(3.0));
}

#[test]
fn rejects_axes_from_another_model() {
	let err = ModelFilters::parse(SearchModel::Tasks, json!({ "ranks": ["Senior"] }))
		.expect_err("Expected a personnel axis to be rejected for tasks.");

	assert_eq!(err.path, "$.filters");
	assert!(err.message.contains("ranks"), "Unexpected message: {}", err.message);
}

#[test]
fn rejects_inverted_ranges() {
	let err = ModelFilters::parse(
		SearchModel::Organisations,
		json!({ "employee_count": { "min": 500, "max": 10 } }),
	)
	.expect_err("Expected inverted range to fail.");

	assert_eq!(err.path, "$.filters.employee_count");

	let err = ModelFilters::parse(
		SearchModel::Tasks,
		json!({ "due_date": { "from": "2026-05-01T00:00:00Z", "to": "2026-04-01T00:00:00Z" } }),
	)
	.expect_err("Expected inverted date range to fail.");

	assert_eq!(err.path, "$.filters.due_date");
}

#[test]
fn success_chance_is_a_percentage() {
	assert!(
		ModelFilters::parse(SearchModel::Tenders, json!({ "success_chance": { "min": 0, "max": 100 } }))
			.is_ok()
	);

	let err =
		ModelFilters::parse(SearchModel::Tenders, json!({ "success_chance": { "max": 120 } }))
			.expect_err("Expected out-of-range success chance to fail.");

	assert_eq!(err.path, "$.filters.success_chance");
}

#[test]
fn contacts_accept_only_free_text() {
	assert_eq!(
		ModelFilters::parse(SearchModel::OrganisationContacts, json!({})),
		Ok(ModelFilters::OrganisationContacts(Default::default()))
	);
	assert!(
		ModelFilters::parse(SearchModel::OrganisationContacts, json!({ "statuses": ["x"] }))
			.is_err()
	);
	assert!(ModelFilters::parse(SearchModel::Tasks, json!(["OPEN"])).is_err());
}
