pub mod conditions;
pub mod links;
pub mod matching;
pub mod search;

mod error;

pub use conditions::{ConditionCriteriaInput, CreateConditionRequest};
pub use error::{Error, Result};
pub use links::{ListLinksResponse, UnlinkResponse};
pub use matching::{CriteriaMatcher, MatchReport, PopulationFailure};
pub use search::{SearchGateway, SearchRequest, SearchResponse};

use std::{collections::HashSet, sync::Arc};

use serde_json::Value;

use bidwell_config::Config;
use bidwell_storage::Store;

/// Derives the free-text search index stored with a condition.
pub trait SearchIndexer
where
	Self: Send + Sync,
{
	fn generate(&self, criteria: &Value) -> String;
}

/// Collects every string, and every scalar inside an array, lowercased and de-duplicated in
/// first-seen order.
pub struct DefaultSearchIndexer;
impl SearchIndexer for DefaultSearchIndexer {
	fn generate(&self, criteria: &Value) -> String {
		let mut seen = HashSet::new();
		let mut terms = Vec::new();

		collect_terms(criteria, false, &mut seen, &mut terms);

		terms.join(" ")
	}
}

pub struct BidwellService {
	pub cfg: Config,
	pub store: Arc<dyn Store>,
	pub matcher: CriteriaMatcher,
	pub gateway: SearchGateway,
	pub indexer: Arc<dyn SearchIndexer>,
}
impl BidwellService {
	pub fn new(cfg: Config, store: Arc<dyn Store>) -> Self {
		Self::with_indexer(cfg, store, Arc::new(DefaultSearchIndexer))
	}

	pub fn with_indexer(cfg: Config, store: Arc<dyn Store>, indexer: Arc<dyn SearchIndexer>) -> Self {
		let matcher = CriteriaMatcher::new(store.clone(), cfg.matching.clone());
		let gateway = SearchGateway::new(store.clone(), cfg.search.clone());

		Self { cfg, store, matcher, gateway, indexer }
	}

	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		self.gateway.search(req).await
	}
}

fn collect_terms(value: &Value, in_array: bool, seen: &mut HashSet<String>, terms: &mut Vec<String>) {
	let term = match value {
		Value::String(text) => text.trim().to_lowercase(),
		Value::Number(number) if in_array => number.to_string(),
		Value::Bool(flag) if in_array => flag.to_string(),
		Value::Array(items) => {
			for item in items {
				collect_terms(item, true, seen, terms);
			}

			return;
		},
		Value::Object(map) => {
			for item in map.values() {
				collect_terms(item, false, seen, terms);
			}

			return;
		},
		_ => return,
	};

	if !term.is_empty() && seen.insert(term.clone()) {
		terms.push(term);
	}
}
