pub fn render_schema() -> String {
	expand_includes(include_str!("../../../sql/init.sql"))
}

/// Splits a rendered schema into executable statements, skipping blank fragments.
pub fn statements(sql: &str) -> impl Iterator<Item = &str> {
	sql.split(';').map(str::trim).filter(|statement| !statement.is_empty())
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_condition_types.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_condition_types.sql")),
				"tables/002_tenders.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_tenders.sql")),
				"tables/003_organisations.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_organisations.sql")),
				"tables/004_organisation_contacts.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_organisation_contacts.sql")),
				"tables/005_projects.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_projects.sql")),
				"tables/006_ranks.sql" =>
					out.push_str(include_str!("../../../sql/tables/006_ranks.sql")),
				"tables/007_personnel.sql" =>
					out.push_str(include_str!("../../../sql/tables/007_personnel.sql")),
				"tables/008_certificates.sql" =>
					out.push_str(include_str!("../../../sql/tables/008_certificates.sql")),
				"tables/009_personnel_certificates.sql" => out
					.push_str(include_str!("../../../sql/tables/009_personnel_certificates.sql")),
				"tables/010_personnel_engagements.sql" =>
					out.push_str(include_str!("../../../sql/tables/010_personnel_engagements.sql")),
				"tables/011_personnel_positions.sql" =>
					out.push_str(include_str!("../../../sql/tables/011_personnel_positions.sql")),
				"tables/012_artifacts.sql" =>
					out.push_str(include_str!("../../../sql/tables/012_artifacts.sql")),
				"tables/013_tasks.sql" =>
					out.push_str(include_str!("../../../sql/tables/013_tasks.sql")),
				"tables/014_roles.sql" =>
					out.push_str(include_str!("../../../sql/tables/014_roles.sql")),
				"tables/015_participation_conditions.sql" => out
					.push_str(include_str!("../../../sql/tables/015_participation_conditions.sql")),
				"tables/016_match_links.sql" =>
					out.push_str(include_str!("../../../sql/tables/016_match_links.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}
