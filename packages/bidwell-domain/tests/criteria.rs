use time::{Duration, OffsetDateTime, macros::datetime};

use bidwell_domain::{
	criteria::{
		self, ConditionCriteria, ExperienceAxes, MatchPolicy, evaluate_artifact,
		evaluate_engagement, evaluate_personnel,
	},
	models::{
		ArtifactProfile, EngagementProfile, ExperienceYears, ParticipationCondition,
		PersonnelProfile,
	},
};

const NOW: OffsetDateTime = datetime!(2026-03-01 12:00 UTC);

fn policy(experience_axes: ExperienceAxes) -> MatchPolicy {
	MatchPolicy {
		volume_tolerance: 0.2,
		duration_tolerance: 0.2,
		min_keyword_chars: 4,
		experience_axes,
		now: NOW,
	}
}

fn condition() -> ParticipationCondition {
	ParticipationCondition {
		condition_id: "c-1".to_string(),
		tender_id: "T1".to_string(),
		condition_type_id: "ct-1".to_string(),
		title: "Must have 5y IT exp".to_string(),
		requirements: None,
		experience: ExperienceYears::default(),
		certificate_ids: Vec::new(),
		industry_sector_ids: Vec::new(),
		academic_degrees: Vec::new(),
		executive_position_required: false,
		volume_target: None,
		duration_days: None,
		criterion_type: None,
		search_index: String::new(),
		created_at: NOW,
	}
}

fn person(id: &str, experience: ExperienceYears) -> PersonnelProfile {
	PersonnelProfile { personnel_id: id.to_string(), experience, ..Default::default() }
}

#[test]
fn experience_minimum_selects_only_qualified_people() {
	let mut condition = condition();

	condition.experience.it = Some(5);

	let criteria = ConditionCriteria::new(&condition, policy(ExperienceAxes::All));
	let senior = person("p-6", ExperienceYears { it: Some(6), ..Default::default() });
	let junior = person("p-3", ExperienceYears { it: Some(3), ..Default::default() });

	let verdict = evaluate_personnel(&criteria, &senior);

	assert!(verdict.is_match());
	assert_eq!(verdict.passed, vec!["experience"]);
	assert_eq!(verdict.describe(), "Auto-selected: experience");
	assert!(!evaluate_personnel(&criteria, &junior).is_match());
}

#[test]
fn unset_minimum_counts_as_zero_under_all_axes() {
	let mut condition = condition();

	condition.experience.it = Some(10);

	let candidate = person("p-1", ExperienceYears { consulting: Some(0), ..Default::default() });
	let all = ConditionCriteria::new(&condition, policy(ExperienceAxes::All));
	let requested = ConditionCriteria::new(&condition, policy(ExperienceAxes::Requested));

	assert!(evaluate_personnel(&all, &candidate).is_match());
	assert!(!evaluate_personnel(&requested, &candidate).is_match());
}

#[test]
fn requested_axes_ignore_people_without_counters() {
	let condition = condition();
	let criteria = ConditionCriteria::new(&condition, policy(ExperienceAxes::Requested));
	let verdict =
		evaluate_personnel(&criteria, &person("p-1", ExperienceYears { it: Some(20), ..Default::default() }));

	assert!(!verdict.is_match());
	assert_eq!(verdict.applicable, 0);
}

#[test]
fn empty_requirement_sets_never_match() {
	let condition = condition();
	let criteria = ConditionCriteria::new(&condition, policy(ExperienceAxes::Requested));
	let candidate = PersonnelProfile {
		personnel_id: "p-1".to_string(),
		certificate_ids: vec!["cert-1".to_string()],
		engagement_sector_ids: vec!["sector-1".to_string()],
		academic_degrees: vec!["MSc".to_string()],
		executive_history: true,
		..Default::default()
	};

	let verdict = evaluate_personnel(&criteria, &candidate);

	assert!(!verdict.is_match());
	assert_eq!(verdict.applicable, 0);
}

#[test]
fn set_branches_match_on_any_overlap() {
	let mut condition = condition();

	condition.certificate_ids = vec!["cert-1".to_string(), "cert-2".to_string()];
	condition.academic_degrees = vec!["Master of Science".to_string()];

	let criteria = ConditionCriteria::new(&condition, policy(ExperienceAxes::Requested));
	let certified = PersonnelProfile {
		personnel_id: "p-1".to_string(),
		certificate_ids: vec!["cert-2".to_string()],
		..Default::default()
	};
	let graduate = PersonnelProfile {
		personnel_id: "p-2".to_string(),
		academic_degrees: vec!["  master of science ".to_string()],
		..Default::default()
	};
	let neither = PersonnelProfile {
		personnel_id: "p-3".to_string(),
		certificate_ids: vec!["cert-9".to_string()],
		..Default::default()
	};

	assert_eq!(evaluate_personnel(&criteria, &certified).passed, vec!["certificates"]);
	assert_eq!(evaluate_personnel(&criteria, &graduate).passed, vec!["academic_degrees"]);

	let verdict = evaluate_personnel(&criteria, &neither);

	assert!(!verdict.is_match());
	assert_eq!(verdict.applicable, 2);
}

#[test]
fn executive_branch_applies_only_when_required() {
	let mut condition = condition();
	let executive = PersonnelProfile {
		personnel_id: "p-1".to_string(),
		executive_history: true,
		..Default::default()
	};

	{
		let criteria = ConditionCriteria::new(&condition, policy(ExperienceAxes::Requested));

		assert!(!evaluate_personnel(&criteria, &executive).is_match());
	}

	condition.executive_position_required = true;

	let criteria = ConditionCriteria::new(&condition, policy(ExperienceAxes::Requested));

	assert_eq!(evaluate_personnel(&criteria, &executive).passed, vec!["executive_position"]);
}

#[test]
fn volume_band_is_inclusive_at_twenty_percent() {
	assert!(criteria::within_band(120_000.0, 100_000.0, 0.2));
	assert!(criteria::within_band(80_000.0, 100_000.0, 0.2));
	assert!(!criteria::within_band(121_000.0, 100_000.0, 0.2));
	assert!(!criteria::within_band(79_000.0, 100_000.0, 0.2));
	assert!(!criteria::within_band(f64::NAN, 100_000.0, 0.2));
	assert!(!criteria::within_band(10.0, 0.0, 0.2));
}

#[test]
fn engagement_volume_matches_within_band() {
	let mut condition = condition();

	condition.volume_target = Some(110_000.0);

	let criteria = ConditionCriteria::new(&condition, policy(ExperienceAxes::All));
	let small = EngagementProfile {
		engagement_id: "e-100k".to_string(),
		volume: Some(100_000.0),
		..Default::default()
	};
	let large = EngagementProfile {
		engagement_id: "e-200k".to_string(),
		volume: Some(200_000.0),
		..Default::default()
	};
	let unknown = EngagementProfile { engagement_id: "e-none".to_string(), ..Default::default() };

	assert_eq!(evaluate_engagement(&criteria, &small).passed, vec!["volume"]);
	assert!(!evaluate_engagement(&criteria, &large).is_match());
	assert!(!evaluate_engagement(&criteria, &unknown).is_match());
}

#[test]
fn engagement_duration_counts_days_until_contract_end() {
	let mut condition = condition();

	condition.duration_days = Some(100);

	let criteria = ConditionCriteria::new(&condition, policy(ExperienceAxes::All));
	let inside = EngagementProfile {
		engagement_id: "e-1".to_string(),
		contract_end: Some(NOW + Duration::days(115)),
		..Default::default()
	};
	let outside = EngagementProfile {
		engagement_id: "e-2".to_string(),
		contract_end: Some(NOW + Duration::days(130)),
		..Default::default()
	};
	let open_ended = EngagementProfile { engagement_id: "e-3".to_string(), ..Default::default() };

	assert_eq!(evaluate_engagement(&criteria, &inside).passed, vec!["duration"]);
	assert!(!evaluate_engagement(&criteria, &outside).is_match());
	assert!(!evaluate_engagement(&criteria, &open_ended).is_match());
}

#[test]
fn engagement_keywords_and_sectors() {
	let mut condition = condition();

	condition.requirements = Some("Cloud migration of an ERP landscape".to_string());
	condition.industry_sector_ids = vec!["energy".to_string()];

	let criteria = ConditionCriteria::new(&condition, policy(ExperienceAxes::All));

	assert_eq!(criteria.requirement_tokens(), ["cloud", "migration", "landscape"]);

	let keyworded = EngagementProfile {
		engagement_id: "e-1".to_string(),
		keywords: vec!["Migration".to_string(), "ERP".to_string()],
		..Default::default()
	};
	let sector = EngagementProfile {
		engagement_id: "e-2".to_string(),
		organisation_sector_ids: vec!["energy".to_string()],
		..Default::default()
	};
	let both = EngagementProfile {
		engagement_id: "e-3".to_string(),
		keywords: vec!["cloud".to_string()],
		organisation_sector_ids: vec!["energy".to_string()],
		..Default::default()
	};

	assert_eq!(evaluate_engagement(&criteria, &keyworded).passed, vec!["keywords"]);
	assert_eq!(evaluate_engagement(&criteria, &sector).passed, vec!["industry_sectors"]);
	assert_eq!(
		evaluate_engagement(&criteria, &both).describe(),
		"Auto-selected: keywords, industry_sectors"
	);
}

#[test]
fn artifacts_match_on_text_keywords_or_type() {
	let mut condition = condition();

	condition.requirements = Some("ISO 27001".to_string());
	condition.criterion_type = Some("reference".to_string());

	let criteria = ConditionCriteria::new(&condition, policy(ExperienceAxes::All));
	let by_text = ArtifactProfile {
		artifact_id: "a-1".to_string(),
		title: "Security concept".to_string(),
		description: Some("Certified under iso 27001 since 2019".to_string()),
		..Default::default()
	};
	let by_keyword = ArtifactProfile {
		artifact_id: "a-2".to_string(),
		title: "Audit report".to_string(),
		keywords: vec!["27001".to_string()],
		..Default::default()
	};
	let by_type = ArtifactProfile {
		artifact_id: "a-3".to_string(),
		title: "Customer letter".to_string(),
		artifact_type: Some("reference".to_string()),
		..Default::default()
	};
	let unrelated = ArtifactProfile {
		artifact_id: "a-4".to_string(),
		title: "Brochure".to_string(),
		artifact_type: Some("marketing".to_string()),
		..Default::default()
	};

	assert_eq!(evaluate_artifact(&criteria, &by_text).passed, vec!["requirements_text"]);
	assert_eq!(evaluate_artifact(&criteria, &by_keyword).passed, vec!["keywords"]);
	assert_eq!(evaluate_artifact(&criteria, &by_type).passed, vec!["criterion_type"]);
	assert!(!evaluate_artifact(&criteria, &unrelated).is_match());
}
