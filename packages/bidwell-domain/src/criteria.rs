//! Eligibility predicates for the three candidate populations.
//!
//! Every population is matched by a list of named branches. A branch returns
//! [`BranchOutcome::NotApplicable`] when the condition does not ask for it, so an empty
//! requirement set never matches everyone. A candidate matches when any applicable branch
//! passes.

use std::collections::HashSet;

use time::OffsetDateTime;

use crate::{
	keywords,
	models::{
		ArtifactProfile, EngagementProfile, ExperienceAxis, ParticipationCondition,
		PersonnelProfile,
	},
};

const BAND_EPSILON: f64 = 1e-9;

pub const PERSONNEL_BRANCHES: [Branch<PersonnelProfile>; 5] = [
	("experience", personnel_experience),
	("certificates", personnel_certificates),
	("industry_sectors", personnel_industry_sectors),
	("academic_degrees", personnel_academic_degrees),
	("executive_position", personnel_executive_position),
];
pub const ENGAGEMENT_BRANCHES: [Branch<EngagementProfile>; 4] = [
	("keywords", engagement_keywords),
	("industry_sectors", engagement_industry_sectors),
	("volume", engagement_volume),
	("duration", engagement_duration),
];
pub const ARTIFACT_BRANCHES: [Branch<ArtifactProfile>; 3] = [
	("requirements_text", artifact_requirements_text),
	("keywords", artifact_keywords),
	("criterion_type", artifact_criterion_type),
];

pub type Branch<P> = (&'static str, fn(&ConditionCriteria<'_>, &P) -> BranchOutcome);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchOutcome {
	NotApplicable,
	Pass,
	Fail,
}
impl BranchOutcome {
	fn from_bool(passed: bool) -> Self {
		if passed { Self::Pass } else { Self::Fail }
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExperienceAxes {
	/// Unset minimums count as zero on every axis the candidate has a counter for.
	All,
	/// Only axes with an explicit minimum are compared.
	Requested,
}
impl ExperienceAxes {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"all" => Some(Self::All),
			"requested" => Some(Self::Requested),
			_ => None,
		}
	}
}

#[derive(Clone, Copy, Debug)]
pub struct MatchPolicy {
	pub volume_tolerance: f64,
	pub duration_tolerance: f64,
	pub min_keyword_chars: usize,
	pub experience_axes: ExperienceAxes,
	pub now: OffsetDateTime,
}
impl MatchPolicy {
	pub fn from_config(cfg: &bidwell_config::Matching, now: OffsetDateTime) -> Self {
		Self {
			volume_tolerance: cfg.volume_tolerance,
			duration_tolerance: cfg.duration_tolerance,
			min_keyword_chars: cfg.min_keyword_chars,
			experience_axes: ExperienceAxes::parse(&cfg.experience_axes)
				.unwrap_or(ExperienceAxes::All),
			now,
		}
	}
}

/// A condition prepared once for evaluation against many candidates.
pub struct ConditionCriteria<'a> {
	pub condition: &'a ParticipationCondition,
	pub policy: MatchPolicy,
	requirement_tokens: Vec<String>,
	requirements_folded: Option<String>,
	certificate_ids: HashSet<&'a str>,
	industry_sector_ids: HashSet<&'a str>,
	academic_degrees: HashSet<String>,
	criterion_type: Option<&'a str>,
}
impl<'a> ConditionCriteria<'a> {
	pub fn new(condition: &'a ParticipationCondition, policy: MatchPolicy) -> Self {
		let requirements = condition
			.requirements
			.as_deref()
			.map(str::trim)
			.filter(|requirements| !requirements.is_empty());

		Self {
			condition,
			policy,
			requirement_tokens: requirements
				.map(|text| keywords::extract_keywords(text, policy.min_keyword_chars))
				.unwrap_or_default(),
			requirements_folded: requirements.map(keywords::fold),
			certificate_ids: condition.certificate_ids.iter().map(String::as_str).collect(),
			industry_sector_ids: condition.industry_sector_ids.iter().map(String::as_str).collect(),
			academic_degrees: condition
				.academic_degrees
				.iter()
				.map(String::as_str)
				.map(keywords::fold)
				.collect(),
			criterion_type: condition
				.criterion_type
				.as_deref()
				.map(str::trim)
				.filter(|value| !value.is_empty()),
		}
	}

	pub fn requirement_tokens(&self) -> &[String] {
		&self.requirement_tokens
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Verdict {
	pub passed: Vec<&'static str>,
	pub applicable: usize,
}
impl Verdict {
	pub fn is_match(&self) -> bool {
		!self.passed.is_empty()
	}

	pub fn describe(&self) -> String {
		format!("Auto-selected: {}", self.passed.join(", "))
	}
}

pub fn evaluate<P>(
	criteria: &ConditionCriteria<'_>,
	branches: &[Branch<P>],
	candidate: &P,
) -> Verdict {
	let mut verdict = Verdict::default();

	for (name, branch) in branches {
		match branch(criteria, candidate) {
			BranchOutcome::NotApplicable => {},
			BranchOutcome::Pass => {
				verdict.applicable += 1;
				verdict.passed.push(*name);
			},
			BranchOutcome::Fail => verdict.applicable += 1,
		}
	}

	verdict
}

pub fn evaluate_personnel(
	criteria: &ConditionCriteria<'_>,
	profile: &PersonnelProfile,
) -> Verdict {
	evaluate(criteria, &PERSONNEL_BRANCHES, profile)
}

pub fn evaluate_engagement(
	criteria: &ConditionCriteria<'_>,
	profile: &EngagementProfile,
) -> Verdict {
	evaluate(criteria, &ENGAGEMENT_BRANCHES, profile)
}

pub fn evaluate_artifact(criteria: &ConditionCriteria<'_>, profile: &ArtifactProfile) -> Verdict {
	evaluate(criteria, &ARTIFACT_BRANCHES, profile)
}

/// Whether `value` lies within `target * (1 +- tolerance)`, boundaries included.
pub fn within_band(value: f64, target: f64, tolerance: f64) -> bool {
	if !value.is_finite() || !target.is_finite() || target <= 0.0 {
		return false;
	}

	(value - target).abs() / target <= tolerance + BAND_EPSILON
}

fn personnel_experience(
	criteria: &ConditionCriteria<'_>,
	profile: &PersonnelProfile,
) -> BranchOutcome {
	let minimums = &criteria.condition.experience;
	let mut applicable = false;

	for axis in ExperienceAxis::ALL {
		let minimum = match (minimums.get(axis), criteria.policy.experience_axes) {
			(Some(minimum), _) => minimum,
			(None, ExperienceAxes::All) => 0,
			(None, ExperienceAxes::Requested) => continue,
		};
		let Some(years) = profile.experience.get(axis) else { continue };

		applicable = true;

		if years >= minimum {
			return BranchOutcome::Pass;
		}
	}

	if applicable { BranchOutcome::Fail } else { BranchOutcome::NotApplicable }
}

fn personnel_certificates(
	criteria: &ConditionCriteria<'_>,
	profile: &PersonnelProfile,
) -> BranchOutcome {
	if criteria.certificate_ids.is_empty() {
		return BranchOutcome::NotApplicable;
	}

	BranchOutcome::from_bool(
		profile.certificate_ids.iter().any(|id| criteria.certificate_ids.contains(id.as_str())),
	)
}

fn personnel_industry_sectors(
	criteria: &ConditionCriteria<'_>,
	profile: &PersonnelProfile,
) -> BranchOutcome {
	if criteria.industry_sector_ids.is_empty() {
		return BranchOutcome::NotApplicable;
	}

	BranchOutcome::from_bool(
		profile
			.engagement_sector_ids
			.iter()
			.any(|id| criteria.industry_sector_ids.contains(id.as_str())),
	)
}

fn personnel_academic_degrees(
	criteria: &ConditionCriteria<'_>,
	profile: &PersonnelProfile,
) -> BranchOutcome {
	if criteria.academic_degrees.is_empty() {
		return BranchOutcome::NotApplicable;
	}

	BranchOutcome::from_bool(
		profile
			.academic_degrees
			.iter()
			.any(|degree| criteria.academic_degrees.contains(&keywords::fold(degree))),
	)
}

fn personnel_executive_position(
	criteria: &ConditionCriteria<'_>,
	profile: &PersonnelProfile,
) -> BranchOutcome {
	if !criteria.condition.executive_position_required {
		return BranchOutcome::NotApplicable;
	}

	BranchOutcome::from_bool(profile.executive_history)
}

fn engagement_keywords(
	criteria: &ConditionCriteria<'_>,
	profile: &EngagementProfile,
) -> BranchOutcome {
	if criteria.requirement_tokens.is_empty() {
		return BranchOutcome::NotApplicable;
	}

	BranchOutcome::from_bool(keywords::overlaps(&profile.keywords, &criteria.requirement_tokens))
}

fn engagement_industry_sectors(
	criteria: &ConditionCriteria<'_>,
	profile: &EngagementProfile,
) -> BranchOutcome {
	if criteria.industry_sector_ids.is_empty() {
		return BranchOutcome::NotApplicable;
	}

	BranchOutcome::from_bool(
		profile
			.organisation_sector_ids
			.iter()
			.any(|id| criteria.industry_sector_ids.contains(id.as_str())),
	)
}

fn engagement_volume(
	criteria: &ConditionCriteria<'_>,
	profile: &EngagementProfile,
) -> BranchOutcome {
	let Some(target) = criteria.condition.volume_target else {
		return BranchOutcome::NotApplicable;
	};
	let Some(volume) = profile.volume else { return BranchOutcome::Fail };

	BranchOutcome::from_bool(within_band(volume, target, criteria.policy.volume_tolerance))
}

fn engagement_duration(
	criteria: &ConditionCriteria<'_>,
	profile: &EngagementProfile,
) -> BranchOutcome {
	let Some(target_days) = criteria.condition.duration_days else {
		return BranchOutcome::NotApplicable;
	};
	let Some(contract_end) = profile.contract_end else { return BranchOutcome::Fail };
	let remaining_days = (contract_end - criteria.policy.now).whole_days();

	BranchOutcome::from_bool(within_band(
		remaining_days as f64,
		target_days as f64,
		criteria.policy.duration_tolerance,
	))
}

fn artifact_requirements_text(
	criteria: &ConditionCriteria<'_>,
	profile: &ArtifactProfile,
) -> BranchOutcome {
	let Some(requirements) = criteria.requirements_folded.as_deref() else {
		return BranchOutcome::NotApplicable;
	};
	let in_title = keywords::fold(&profile.title).contains(requirements);
	let in_description = profile
		.description
		.as_deref()
		.map(|description| keywords::fold(description).contains(requirements))
		.unwrap_or(false);

	BranchOutcome::from_bool(in_title || in_description)
}

fn artifact_keywords(
	criteria: &ConditionCriteria<'_>,
	profile: &ArtifactProfile,
) -> BranchOutcome {
	if criteria.requirement_tokens.is_empty() {
		return BranchOutcome::NotApplicable;
	}

	BranchOutcome::from_bool(keywords::overlaps(&profile.keywords, &criteria.requirement_tokens))
}

fn artifact_criterion_type(
	criteria: &ConditionCriteria<'_>,
	profile: &ArtifactProfile,
) -> BranchOutcome {
	let Some(expected) = criteria.criterion_type else { return BranchOutcome::NotApplicable };

	BranchOutcome::from_bool(profile.artifact_type.as_deref().map(str::trim) == Some(expected))
}
