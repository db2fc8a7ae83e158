pub mod builder;

use std::{sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use bidwell_domain::search::SearchItem;
use bidwell_storage::Store;

use crate::{Error, Result};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchRequest {
	pub model: String,
	#[serde(default)]
	pub query: String,
	#[serde(default)]
	pub filters: Value,
	#[serde(default)]
	pub sort_by: Option<String>,
	#[serde(default)]
	pub page: Option<u32>,
	#[serde(default)]
	pub limit: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
	pub items: Vec<SearchItem>,
	pub total: u64,
	pub page: u32,
	pub limit: u32,
	pub has_more: bool,
}

pub struct SearchGateway {
	store: Arc<dyn Store>,
	cfg: bidwell_config::Search,
}
impl SearchGateway {
	pub fn new(store: Arc<dyn Store>, cfg: bidwell_config::Search) -> Self {
		Self { store, cfg }
	}

	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let plan = builder::build_plan(&req, &self.cfg)?;

		if plan.query.is_empty() {
			tracing::debug!(model = %plan.model(), "Empty query. Skipping store.");

			return Ok(SearchResponse {
				items: Vec::new(),
				total: 0,
				page: plan.page,
				limit: plan.limit,
				has_more: false,
			});
		}

		let budget = Duration::from_millis(self.cfg.timeout_ms);
		let page = tokio::time::timeout(budget, self.store.search(&plan)).await.map_err(|_| {
			tracing::warn!(
				model = %plan.model(),
				timeout_ms = self.cfg.timeout_ms,
				"Search exceeded its time budget."
			);

			Error::Timeout {
				message: format!("Search did not finish within {} ms.", self.cfg.timeout_ms),
			}
		})??;
		let returned = page.items.len() as u64;
		let has_more = plan.offset().saturating_add(returned) < page.total;

		Ok(SearchResponse {
			items: page.items,
			total: page.total,
			page: plan.page,
			limit: plan.limit,
			has_more,
		})
	}
}
