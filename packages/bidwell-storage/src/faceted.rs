//! Renders a [`SearchPlan`] into one count query and one page query for the plan's model.

use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, postgres::PgRow};

use bidwell_domain::{
	models::ExperienceAxis,
	search::{
		DateRange, EngagementFilters, ModelFilters, NumberRange, OrganisationFilters,
		PersonnelFilters, SearchItem, SearchModel, SearchPage, SearchPlan, SortOrder,
		TaskFilters, TenderFilters, VolumeRanges,
	},
};

use crate::{
	Result,
	models::{
		EngagementHitRow, OrganisationContactHitRow, OrganisationHitRow, PersonnelHitRow,
		TaskHitRow, TenderHitRow,
	},
};

struct ModelSource {
	from: &'static str,
	columns: &'static str,
	id: &'static str,
	created_at: &'static str,
	name: &'static str,
	text: &'static str,
}
impl ModelSource {
	fn of(model: SearchModel) -> Self {
		match model {
			SearchModel::Personnel => Self {
				from: "personnel p LEFT JOIN ranks r ON r.rank_id = p.rank_id",
				columns: "\
p.personnel_id AS id, \
(p.first_name || ' ' || p.last_name) AS name, \
p.description, \
p.created_at, \
r.name AS rank, \
p.location, \
p.division, \
p.skills, \
ARRAY(\
SELECT c.name FROM personnel_certificates pc \
JOIN certificates c ON c.certificate_id = pc.certificate_id \
WHERE pc.personnel_id = p.personnel_id ORDER BY c.name\
) AS certificates",
				id: "p.personnel_id",
				created_at: "p.created_at",
				name: "lower(p.last_name || ' ' || p.first_name)",
				text: "concat_ws(' ', p.first_name, p.last_name, p.description, \
array_to_string(p.skills, ' '))",
			},
			SearchModel::Organisations => Self {
				from: "organisations o",
				columns: "\
o.organisation_id AS id, \
o.name, \
o.description, \
o.created_at, \
o.industry_sector_ids AS industry_sectors, \
o.location, \
o.employee_count, \
o.annual_revenue",
				id: "o.organisation_id",
				created_at: "o.created_at",
				name: "lower(o.name)",
				text: "concat_ws(' ', o.name, o.description, o.location)",
			},
			SearchModel::Engagements => Self {
				from: "projects pr",
				columns: "\
pr.project_id AS id, \
pr.title, \
pr.description, \
pr.created_at, \
pr.project_type, \
pr.status, \
pr.start_date, \
pr.end_date, \
pr.volume_currency, \
pr.volume_person_days, \
pr.volume_hours, \
pr.keywords",
				id: "pr.project_id",
				created_at: "pr.created_at",
				name: "lower(pr.title)",
				text: "concat_ws(' ', pr.title, pr.description, array_to_string(pr.keywords, ' '))",
			},
			SearchModel::Tenders => Self {
				from: "tenders t",
				columns: "\
t.tender_id AS id, \
t.title, \
t.description, \
t.created_at, \
t.tender_type, \
t.status, \
t.submission_deadline, \
t.binding_deadline, \
t.volume_currency, \
t.volume_person_days, \
t.volume_hours, \
t.success_chance, \
t.keywords",
				id: "t.tender_id",
				created_at: "t.created_at",
				name: "lower(t.title)",
				text: "concat_ws(' ', t.title, t.description, array_to_string(t.keywords, ' '))",
			},
			SearchModel::Tasks => Self {
				from: "tasks tk",
				columns: "\
tk.task_id AS id, \
tk.title, \
tk.description, \
tk.created_at, \
tk.task_type, \
tk.status, \
tk.due_date",
				id: "tk.task_id",
				created_at: "tk.created_at",
				name: "lower(tk.title)",
				text: "concat_ws(' ', tk.title, tk.description)",
			},
			SearchModel::OrganisationContacts => Self {
				from: "organisation_contacts c \
LEFT JOIN organisations o ON o.organisation_id = c.organisation_id",
				columns: "\
c.contact_id AS id, \
c.name, \
c.email, \
c.position, \
c.organisation_id, \
o.name AS organisation_name, \
c.created_at",
				id: "c.contact_id",
				created_at: "c.created_at",
				name: "lower(c.name)",
				text: "concat_ws(' ', c.name, c.email, c.position, o.name)",
			},
		}
	}
}

pub async fn search(pool: &PgPool, plan: &SearchPlan) -> Result<SearchPage> {
	let total = count_query(plan).build_query_scalar::<i64>().fetch_one(pool).await?;
	let items = match plan.model() {
		SearchModel::Personnel => fetch_page::<PersonnelHitRow>(pool, plan).await?,
		SearchModel::Organisations => fetch_page::<OrganisationHitRow>(pool, plan).await?,
		SearchModel::Engagements => fetch_page::<EngagementHitRow>(pool, plan).await?,
		SearchModel::Tenders => fetch_page::<TenderHitRow>(pool, plan).await?,
		SearchModel::Tasks => fetch_page::<TaskHitRow>(pool, plan).await?,
		SearchModel::OrganisationContacts =>
			fetch_page::<OrganisationContactHitRow>(pool, plan).await?,
	};

	tracing::debug!(
		model = %plan.model(),
		total,
		returned = items.len(),
		"Faceted search executed."
	);

	Ok(SearchPage { items, total: u64::try_from(total).unwrap_or_default() })
}

pub fn count_query(plan: &SearchPlan) -> QueryBuilder<'static, Postgres> {
	let source = ModelSource::of(plan.model());
	let mut builder = QueryBuilder::new("SELECT count(*) FROM ");

	builder.push(source.from);
	push_where(&mut builder, &source, plan);

	builder
}

pub fn page_query(plan: &SearchPlan) -> QueryBuilder<'static, Postgres> {
	let source = ModelSource::of(plan.model());
	let mut builder = QueryBuilder::new("SELECT ");

	builder.push(source.columns).push(" FROM ").push(source.from);
	push_where(&mut builder, &source, plan);
	push_order(&mut builder, &source, plan.sort);
	builder
		.push(" LIMIT ")
		.push_bind(i64::from(plan.limit))
		.push(" OFFSET ")
		.push_bind(i64::try_from(plan.offset()).unwrap_or(i64::MAX));

	builder
}

/// Escapes `LIKE` wildcards so user text only matches literally.
pub fn like_pattern(query: &str) -> String {
	let mut escaped = String::with_capacity(query.len() + 2);

	escaped.push('%');

	for ch in query.chars() {
		if matches!(ch, '\\' | '%' | '_') {
			escaped.push('\\');
		}

		escaped.push(ch);
	}

	escaped.push('%');

	escaped
}

async fn fetch_page<R>(pool: &PgPool, plan: &SearchPlan) -> Result<Vec<SearchItem>>
where
	R: for<'r> FromRow<'r, PgRow> + Send + Unpin + Into<SearchItem>,
{
	let rows = page_query(plan).build_query_as::<R>().fetch_all(pool).await?;

	Ok(rows.into_iter().map(Into::into).collect())
}

fn push_where(builder: &mut QueryBuilder<'static, Postgres>, source: &ModelSource, plan: &SearchPlan) {
	builder.push(" WHERE ").push(source.text).push(" ILIKE ").push_bind(like_pattern(&plan.query));

	match &plan.filters {
		ModelFilters::Personnel(filters) => push_personnel(builder, filters),
		ModelFilters::Organisations(filters) => push_organisations(builder, filters),
		ModelFilters::Engagements(filters) => push_engagements(builder, filters),
		ModelFilters::Tenders(filters) => push_tenders(builder, filters),
		ModelFilters::Tasks(filters) => push_tasks(builder, filters),
		ModelFilters::OrganisationContacts(_) => {},
	}
}

fn push_order(builder: &mut QueryBuilder<'static, Postgres>, source: &ModelSource, sort: SortOrder) {
	builder.push(" ORDER BY ");

	match sort {
		SortOrder::Relevance => builder.push(source.id).push(" ASC"),
		SortOrder::RecencyAsc => {
			builder.push(source.created_at).push(" ASC, ").push(source.id).push(" ASC")
		},
		SortOrder::RecencyDesc => {
			builder.push(source.created_at).push(" DESC, ").push(source.id).push(" ASC")
		},
		SortOrder::NameAsc => builder.push(source.name).push(" ASC, ").push(source.id).push(" ASC"),
		SortOrder::NameDesc =>
			builder.push(source.name).push(" DESC, ").push(source.id).push(" ASC"),
	};
}

fn push_personnel(builder: &mut QueryBuilder<'static, Postgres>, filters: &PersonnelFilters) {
	push_any(builder, "p.rank_id", &filters.ranks);
	push_any(builder, "p.location", &filters.locations);
	push_overlap(builder, "p.skills", &filters.skills);
	push_any(builder, "p.division", &filters.divisions);

	if !filters.certificates.is_empty() {
		builder
			.push(
				" AND EXISTS (SELECT 1 FROM personnel_certificates pc \
WHERE pc.personnel_id = p.personnel_id AND pc.certificate_id = ANY(",
			)
			.push_bind(filters.certificates.clone())
			.push("))");
	}

	if let Some(experience) = filters.experience.as_ref() {
		for axis in ExperienceAxis::ALL {
			let column = match axis {
				ExperienceAxis::It => "p.experience_it",
				ExperienceAxis::Consulting => "p.experience_consulting",
				ExperienceAxis::ProjectManagement => "p.experience_project_management",
				ExperienceAxis::Leadership => "p.experience_leadership",
				ExperienceAxis::Industry => "p.experience_industry",
			};

			push_number_range(builder, column, experience.get(axis));
		}
	}
}

fn push_organisations(builder: &mut QueryBuilder<'static, Postgres>, filters: &OrganisationFilters) {
	push_overlap(builder, "o.industry_sector_ids", &filters.industry_sectors);
	push_any(builder, "o.location", &filters.locations);
	push_number_range(builder, "o.employee_count", filters.employee_count.as_ref());
	push_number_range(builder, "o.annual_revenue", filters.annual_revenue.as_ref());
}

fn push_engagements(builder: &mut QueryBuilder<'static, Postgres>, filters: &EngagementFilters) {
	push_any(builder, "pr.project_type", &filters.types);
	push_any(builder, "pr.status", &filters.statuses);
	push_overlap(builder, "pr.keywords", &filters.keywords);
	push_volume(builder, "pr", filters.volume.as_ref());

	// Period filters select engagements whose run overlaps the requested window.
	if let Some(period) = filters.period.as_ref() {
		if let Some(from) = period.from {
			builder.push(" AND (pr.end_date IS NULL OR pr.end_date >= ").push_bind(from).push(")");
		}
		if let Some(to) = period.to {
			builder
				.push(" AND (pr.start_date IS NULL OR pr.start_date <= ")
				.push_bind(to)
				.push(")");
		}
	}
}

fn push_tenders(builder: &mut QueryBuilder<'static, Postgres>, filters: &TenderFilters) {
	push_any(builder, "t.tender_type", &filters.types);
	push_any(builder, "t.status", &filters.statuses);
	push_overlap(builder, "t.keywords", &filters.keywords);
	push_date_range(builder, "t.submission_deadline", filters.submission_deadline.as_ref());
	push_date_range(builder, "t.binding_deadline", filters.binding_deadline.as_ref());
	push_volume(builder, "t", filters.volume.as_ref());
	push_number_range(builder, "t.success_chance", filters.success_chance.as_ref());
}

fn push_tasks(builder: &mut QueryBuilder<'static, Postgres>, filters: &TaskFilters) {
	push_any(builder, "tk.task_type", &filters.types);
	push_any(builder, "tk.status", &filters.statuses);
	push_date_range(builder, "tk.due_date", filters.due_date.as_ref());
}

fn push_any(builder: &mut QueryBuilder<'static, Postgres>, column: &str, values: &[String]) {
	if values.is_empty() {
		return;
	}

	builder.push(" AND ").push(column).push(" = ANY(").push_bind(values.to_vec()).push(")");
}

fn push_overlap(builder: &mut QueryBuilder<'static, Postgres>, column: &str, values: &[String]) {
	if values.is_empty() {
		return;
	}

	builder.push(" AND ").push(column).push(" && ").push_bind(values.to_vec());
}

fn push_number_range(
	builder: &mut QueryBuilder<'static, Postgres>,
	column: &str,
	range: Option<&NumberRange>,
) {
	let Some(range) = range else { return };

	if let Some(min) = range.min {
		builder.push(" AND ").push(column).push(" >= ").push_bind(min);
	}
	if let Some(max) = range.max {
		builder.push(" AND ").push(column).push(" <= ").push_bind(max);
	}
}

fn push_date_range(
	builder: &mut QueryBuilder<'static, Postgres>,
	column: &str,
	range: Option<&DateRange>,
) {
	let Some(range) = range else { return };

	if let Some(from) = range.from {
		builder.push(" AND ").push(column).push(" >= ").push_bind(from);
	}
	if let Some(to) = range.to {
		builder.push(" AND ").push(column).push(" <= ").push_bind(to);
	}
}

fn push_volume(
	builder: &mut QueryBuilder<'static, Postgres>,
	alias: &str,
	volume: Option<&VolumeRanges>,
) {
	let Some(volume) = volume else { return };

	push_number_range(builder, &format!("{alias}.volume_currency"), volume.currency.as_ref());
	push_number_range(builder, &format!("{alias}.volume_person_days"), volume.person_days.as_ref());
	push_number_range(builder, &format!("{alias}.volume_hours"), volume.hours.as_ref());
}
