//! Turns a raw search request into a validated [`SearchPlan`].
//!
//! Validation order matters to callers: an unknown model is rejected before anything else so no
//! store access happens for it.

use bidwell_domain::{
	normalize,
	search::{ModelFilters, SearchModel, SearchPlan, SortOrder},
};

use crate::{Error, Result, search::SearchRequest};

pub const MAX_QUERY_CHARS: usize = 256;

pub fn build_plan(req: &SearchRequest, cfg: &bidwell_config::Search) -> Result<SearchPlan> {
	let model: SearchModel = req.model.parse()?;
	let page = req.page.unwrap_or(1);

	if page == 0 {
		return Err(Error::InvalidRequest { message: "page must be at least 1.".to_string() });
	}

	let max_limit = cfg.max_limit.min(bidwell_config::SEARCH_LIMIT_CEILING);
	let limit = match req.limit {
		Some(0) =>
			return Err(Error::InvalidRequest { message: "limit must be at least 1.".to_string() }),
		Some(limit) => limit.min(max_limit),
		None => cfg.default_limit.min(max_limit),
	};
	let sort = match req.sort_by.as_deref() {
		Some(raw) => raw.parse::<SortOrder>()?,
		None => SortOrder::default(),
	};
	let filters = ModelFilters::parse(model, normalize::normalize(&req.filters))?;
	let query = req.query.trim();

	if query.chars().count() > MAX_QUERY_CHARS {
		return Err(Error::InvalidRequest {
			message: format!("query must be at most {MAX_QUERY_CHARS} characters."),
		});
	}

	Ok(SearchPlan { filters, query: query.to_string(), sort, page, limit })
}
