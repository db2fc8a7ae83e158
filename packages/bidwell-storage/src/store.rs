use std::{future::Future, pin::Pin};

use serde_json::Value;

use bidwell_domain::{
	models::{
		ArtifactProfile, EngagementProfile, MatchLink, ParticipationCondition, PersonnelProfile,
	},
	search::{SearchPage, SearchPlan},
};

use crate::{Result, candidates, conditions, db::Db, faceted, links};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Relational store behind condition creation, matching and faceted search.
///
/// The host builds one store and hands the same handle to every component.
pub trait Store
where
	Self: Send + Sync,
{
	fn condition_type_exists<'a>(&'a self, condition_type_id: &'a str) -> BoxFuture<'a, Result<bool>>;

	fn tender_exists<'a>(&'a self, tender_id: &'a str) -> BoxFuture<'a, Result<bool>>;

	fn insert_condition<'a>(
		&'a self,
		condition: &'a ParticipationCondition,
		criteria: &'a Value,
	) -> BoxFuture<'a, Result<()>>;

	fn fetch_condition<'a>(
		&'a self,
		condition_id: &'a str,
	) -> BoxFuture<'a, Result<Option<ParticipationCondition>>>;

	fn personnel_profiles(&self) -> BoxFuture<'_, Result<Vec<PersonnelProfile>>>;

	fn engagement_profiles(&self) -> BoxFuture<'_, Result<Vec<EngagementProfile>>>;

	fn artifact_profiles(&self) -> BoxFuture<'_, Result<Vec<ArtifactProfile>>>;

	fn resolve_role<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<String>>;

	/// Returns how many links were inserted. Candidates already linked are skipped.
	fn insert_links<'a>(&'a self, links: &'a [MatchLink]) -> BoxFuture<'a, Result<u64>>;

	fn list_links<'a>(&'a self, tender_id: &'a str) -> BoxFuture<'a, Result<Vec<MatchLink>>>;

	fn delete_link<'a>(&'a self, link_id: &'a str) -> BoxFuture<'a, Result<bool>>;

	fn search<'a>(&'a self, plan: &'a SearchPlan) -> BoxFuture<'a, Result<SearchPage>>;
}

impl Store for Db {
	fn condition_type_exists<'a>(&'a self, condition_type_id: &'a str) -> BoxFuture<'a, Result<bool>> {
		Box::pin(conditions::condition_type_exists(&self.pool, condition_type_id))
	}

	fn tender_exists<'a>(&'a self, tender_id: &'a str) -> BoxFuture<'a, Result<bool>> {
		Box::pin(conditions::tender_exists(&self.pool, tender_id))
	}

	fn insert_condition<'a>(
		&'a self,
		condition: &'a ParticipationCondition,
		criteria: &'a Value,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(conditions::insert_condition(&self.pool, condition, criteria))
	}

	fn fetch_condition<'a>(
		&'a self,
		condition_id: &'a str,
	) -> BoxFuture<'a, Result<Option<ParticipationCondition>>> {
		Box::pin(conditions::fetch_condition(&self.pool, condition_id))
	}

	fn personnel_profiles(&self) -> BoxFuture<'_, Result<Vec<PersonnelProfile>>> {
		Box::pin(candidates::personnel_profiles(&self.pool))
	}

	fn engagement_profiles(&self) -> BoxFuture<'_, Result<Vec<EngagementProfile>>> {
		Box::pin(candidates::engagement_profiles(&self.pool))
	}

	fn artifact_profiles(&self) -> BoxFuture<'_, Result<Vec<ArtifactProfile>>> {
		Box::pin(candidates::artifact_profiles(&self.pool))
	}

	fn resolve_role<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<String>> {
		Box::pin(links::resolve_role(&self.pool, name))
	}

	fn insert_links<'a>(&'a self, links: &'a [MatchLink]) -> BoxFuture<'a, Result<u64>> {
		Box::pin(crate::links::insert_links(&self.pool, links))
	}

	fn list_links<'a>(&'a self, tender_id: &'a str) -> BoxFuture<'a, Result<Vec<MatchLink>>> {
		Box::pin(links::list_links(&self.pool, tender_id))
	}

	fn delete_link<'a>(&'a self, link_id: &'a str) -> BoxFuture<'a, Result<bool>> {
		Box::pin(links::delete_link(&self.pool, link_id))
	}

	fn search<'a>(&'a self, plan: &'a SearchPlan) -> BoxFuture<'a, Result<SearchPage>> {
		Box::pin(faceted::search(&self.pool, plan))
	}
}
