//! Scans the candidate populations for one condition and writes auto-selected links.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use bidwell_domain::{
	criteria::{
		ConditionCriteria, MatchPolicy, Verdict, evaluate_artifact, evaluate_engagement,
		evaluate_personnel,
	},
	models::{MatchLink, ParticipationCondition, Population},
};
use bidwell_storage::Store;

use crate::Result;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
	pub condition_id: String,
	pub tender_id: String,
	pub personnel_matched: u64,
	pub engagements_matched: u64,
	pub artifacts_matched: u64,
	/// Links written by this run. Candidates already linked to the tender are not counted.
	pub links_created: u64,
	pub failures: Vec<PopulationFailure>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationFailure {
	pub population: Population,
	pub message: String,
}

struct PopulationOutcome {
	matched: u64,
	inserted: u64,
}

pub struct CriteriaMatcher {
	store: Arc<dyn Store>,
	cfg: bidwell_config::Matching,
}
impl CriteriaMatcher {
	pub fn new(store: Arc<dyn Store>, cfg: bidwell_config::Matching) -> Self {
		Self { store, cfg }
	}

	/// Never fails as a whole. A population that cannot be scanned or written is logged and
	/// reported in [`MatchReport::failures`] while the others complete.
	pub async fn match_condition(&self, condition: &ParticipationCondition) -> MatchReport {
		let policy = MatchPolicy::from_config(&self.cfg, OffsetDateTime::now_utc());
		let criteria = ConditionCriteria::new(condition, policy);
		let (personnel, engagements, artifacts) = tokio::join!(
			self.match_population(&criteria, Population::Personnel),
			self.match_population(&criteria, Population::Engagements),
			self.match_population(&criteria, Population::Artifacts),
		);
		let mut report = MatchReport {
			condition_id: condition.condition_id.clone(),
			tender_id: condition.tender_id.clone(),
			..Default::default()
		};

		for (population, outcome) in [
			(Population::Personnel, personnel),
			(Population::Engagements, engagements),
			(Population::Artifacts, artifacts),
		] {
			match outcome {
				Ok(outcome) => {
					match population {
						Population::Personnel => report.personnel_matched = outcome.matched,
						Population::Engagements => report.engagements_matched = outcome.matched,
						Population::Artifacts => report.artifacts_matched = outcome.matched,
					}

					report.links_created += outcome.inserted;
				},
				Err(err) => {
					tracing::error!(
						error = %err,
						population = %population,
						condition_id = %condition.condition_id,
						tender_id = %condition.tender_id,
						"Population matching failed."
					);

					report.failures.push(PopulationFailure { population, message: err.to_string() });
				},
			}
		}

		report
	}

	async fn match_population(
		&self,
		criteria: &ConditionCriteria<'_>,
		population: Population,
	) -> Result<PopulationOutcome> {
		let matched: Vec<(String, Verdict)> = match population {
			Population::Personnel => self
				.store
				.personnel_profiles()
				.await?
				.into_iter()
				.filter_map(|profile| {
					let verdict = evaluate_personnel(criteria, &profile);

					verdict.is_match().then_some((profile.personnel_id, verdict))
				})
				.collect(),
			Population::Engagements => self
				.store
				.engagement_profiles()
				.await?
				.into_iter()
				.filter_map(|profile| {
					let verdict = evaluate_engagement(criteria, &profile);

					verdict.is_match().then_some((profile.engagement_id, verdict))
				})
				.collect(),
			Population::Artifacts => self
				.store
				.artifact_profiles()
				.await?
				.into_iter()
				.filter_map(|profile| {
					let verdict = evaluate_artifact(criteria, &profile);

					verdict.is_match().then_some((profile.artifact_id, verdict))
				})
				.collect(),
		};

		if matched.is_empty() {
			tracing::debug!(population = %population, "No candidates matched.");

			return Ok(PopulationOutcome { matched: 0, inserted: 0 });
		}

		let role_id = if population.takes_role() {
			Some(self.store.resolve_role(&self.cfg.default_role).await?)
		} else {
			None
		};
		let links = build_links(criteria, population, role_id, matched);
		let inserted = self.store.insert_links(&links).await?;

		tracing::info!(
			population = %population,
			condition_id = %criteria.condition.condition_id,
			matched = links.len(),
			inserted,
			"Linked matching candidates."
		);

		Ok(PopulationOutcome { matched: links.len() as u64, inserted })
	}
}

fn build_links(
	criteria: &ConditionCriteria<'_>,
	population: Population,
	role_id: Option<String>,
	matched: Vec<(String, Verdict)>,
) -> Vec<MatchLink> {
	let condition = criteria.condition;
	let now = criteria.policy.now;

	matched
		.into_iter()
		.map(|(candidate_id, verdict)| MatchLink {
			link_id: Uuid::new_v4().to_string(),
			tender_id: condition.tender_id.clone(),
			condition_id: Some(condition.condition_id.clone()),
			population,
			candidate_id,
			role_id: role_id.clone(),
			description: verdict.describe(),
			auto_selected: true,
			created_at: now,
		})
		.collect()
}
