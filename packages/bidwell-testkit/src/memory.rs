//! An in-process [`Store`] for service and HTTP tests.
//!
//! Candidate populations and search pages are seeded up front. Every call that matters to a test
//! (search plans, role resolutions, inserted links) is recorded for later inspection, and single
//! populations can be made to fail.

use std::{
	collections::{HashMap, HashSet},
	sync::{Mutex, MutexGuard},
	time::Duration,
};

use serde_json::Value;
use uuid::Uuid;

use bidwell_domain::{
	models::{
		ArtifactProfile, EngagementProfile, MatchLink, ParticipationCondition, PersonnelProfile,
		Population,
	},
	search::{SearchModel, SearchPage, SearchPlan},
};
use bidwell_storage::{BoxFuture, Error, Result, Store};

#[derive(Default)]
pub struct MemoryStore {
	state: Mutex<State>,
}

#[derive(Default)]
struct State {
	condition_types: HashSet<String>,
	tenders: HashSet<String>,
	conditions: Vec<(ParticipationCondition, Value)>,
	personnel: Vec<PersonnelProfile>,
	engagements: Vec<EngagementProfile>,
	artifacts: Vec<ArtifactProfile>,
	roles: HashMap<String, String>,
	role_resolutions: usize,
	links: Vec<MatchLink>,
	failing: HashSet<Population>,
	search_pages: HashMap<SearchModel, SearchPage>,
	search_calls: Vec<SearchPlan>,
	search_delay: Option<Duration>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_condition_type(self, condition_type_id: &str) -> Self {
		self.state().condition_types.insert(condition_type_id.to_string());

		self
	}

	pub fn with_tender(self, tender_id: &str) -> Self {
		self.state().tenders.insert(tender_id.to_string());

		self
	}

	pub fn with_personnel(self, profile: PersonnelProfile) -> Self {
		self.state().personnel.push(profile);

		self
	}

	pub fn with_engagement(self, profile: EngagementProfile) -> Self {
		self.state().engagements.push(profile);

		self
	}

	pub fn with_artifact(self, profile: ArtifactProfile) -> Self {
		self.state().artifacts.push(profile);

		self
	}

	pub fn with_search_page(self, model: SearchModel, page: SearchPage) -> Self {
		self.state().search_pages.insert(model, page);

		self
	}

	pub fn with_search_delay(self, delay: Duration) -> Self {
		self.state().search_delay = Some(delay);

		self
	}

	/// Makes every scan of `population` fail.
	pub fn failing(self, population: Population) -> Self {
		self.state().failing.insert(population);

		self
	}

	pub fn links(&self) -> Vec<MatchLink> {
		self.state().links.clone()
	}

	pub fn conditions(&self) -> Vec<(ParticipationCondition, Value)> {
		self.state().conditions.clone()
	}

	pub fn search_calls(&self) -> Vec<SearchPlan> {
		self.state().search_calls.clone()
	}

	pub fn role_resolutions(&self) -> usize {
		self.state().role_resolutions
	}

	fn state(&self) -> MutexGuard<'_, State> {
		self.state.lock().unwrap_or_else(|err| err.into_inner())
	}

	fn scan<T>(&self, population: Population, select: impl FnOnce(&State) -> Vec<T>) -> Result<Vec<T>> {
		let state = self.state();

		if state.failing.contains(&population) {
			return Err(Error::InvalidArgument(format!("{population} scan failed.")));
		}

		Ok(select(&state))
	}
}

impl Store for MemoryStore {
	fn condition_type_exists<'a>(&'a self, condition_type_id: &'a str) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move { Ok(self.state().condition_types.contains(condition_type_id)) })
	}

	fn tender_exists<'a>(&'a self, tender_id: &'a str) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move { Ok(self.state().tenders.contains(tender_id)) })
	}

	fn insert_condition<'a>(
		&'a self,
		condition: &'a ParticipationCondition,
		criteria: &'a Value,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let mut state = self.state();

			if state.conditions.iter().any(|(existing, _)| existing.condition_id == condition.condition_id)
			{
				return Err(Error::Conflict(format!(
					"Condition {} already exists.",
					condition.condition_id
				)));
			}

			state.conditions.push((condition.clone(), criteria.clone()));

			Ok(())
		})
	}

	fn fetch_condition<'a>(
		&'a self,
		condition_id: &'a str,
	) -> BoxFuture<'a, Result<Option<ParticipationCondition>>> {
		Box::pin(async move {
			Ok(self
				.state()
				.conditions
				.iter()
				.find(|(condition, _)| condition.condition_id == condition_id)
				.map(|(condition, _)| condition.clone()))
		})
	}

	fn personnel_profiles(&self) -> BoxFuture<'_, Result<Vec<PersonnelProfile>>> {
		Box::pin(async move { self.scan(Population::Personnel, |state| state.personnel.clone()) })
	}

	fn engagement_profiles(&self) -> BoxFuture<'_, Result<Vec<EngagementProfile>>> {
		Box::pin(async move { self.scan(Population::Engagements, |state| state.engagements.clone()) })
	}

	fn artifact_profiles(&self) -> BoxFuture<'_, Result<Vec<ArtifactProfile>>> {
		Box::pin(async move { self.scan(Population::Artifacts, |state| state.artifacts.clone()) })
	}

	fn resolve_role<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<String>> {
		Box::pin(async move {
			let mut state = self.state();

			state.role_resolutions += 1;

			let role_id = state
				.roles
				.entry(name.to_string())
				.or_insert_with(|| Uuid::new_v4().to_string())
				.clone();

			Ok(role_id)
		})
	}

	fn insert_links<'a>(&'a self, links: &'a [MatchLink]) -> BoxFuture<'a, Result<u64>> {
		Box::pin(async move {
			let mut state = self.state();
			let mut inserted = 0;

			for link in links {
				let exists = state.links.iter().any(|existing| {
					existing.tender_id == link.tender_id
						&& existing.population == link.population
						&& existing.candidate_id == link.candidate_id
				});

				if exists {
					continue;
				}

				state.links.push(link.clone());

				inserted += 1;
			}

			Ok(inserted)
		})
	}

	fn list_links<'a>(&'a self, tender_id: &'a str) -> BoxFuture<'a, Result<Vec<MatchLink>>> {
		Box::pin(async move {
			Ok(self.state().links.iter().filter(|link| link.tender_id == tender_id).cloned().collect())
		})
	}

	fn delete_link<'a>(&'a self, link_id: &'a str) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move {
			let mut state = self.state();
			let before = state.links.len();

			state.links.retain(|link| link.link_id != link_id);

			Ok(state.links.len() != before)
		})
	}

	fn search<'a>(&'a self, plan: &'a SearchPlan) -> BoxFuture<'a, Result<SearchPage>> {
		Box::pin(async move {
			let (page, delay) = {
				let mut state = self.state();

				state.search_calls.push(plan.clone());

				(state.search_pages.get(&plan.model()).cloned().unwrap_or_default(), state.search_delay)
			};

			if let Some(delay) = delay {
				tokio::time::sleep(delay).await;
			}

			Ok(page)
		})
	}
}
