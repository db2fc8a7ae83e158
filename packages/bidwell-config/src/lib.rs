mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Matching, Postgres, Search, Service, Storage};

use std::{fs, path::Path};

/// Upper bound for any page size the search gateway will accept.
pub const SEARCH_LIMIT_CEILING: u32 = 100;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.postgres.statement_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.statement_timeout_ms must be greater than zero."
				.to_string(),
		});
	}
	if cfg.matching.default_role.is_empty() {
		return Err(Error::Validation {
			message: "matching.default_role must be non-empty.".to_string(),
		});
	}

	for (label, tolerance) in [
		("matching.volume_tolerance", cfg.matching.volume_tolerance),
		("matching.duration_tolerance", cfg.matching.duration_tolerance),
	] {
		if !tolerance.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
		if !(0.0..1.0).contains(&tolerance) {
			return Err(Error::Validation {
				message: format!("{label} must be in the range 0.0-1.0 (exclusive)."),
			});
		}
	}

	if cfg.matching.min_keyword_chars == 0 {
		return Err(Error::Validation {
			message: "matching.min_keyword_chars must be greater than zero.".to_string(),
		});
	}
	if !matches!(cfg.matching.experience_axes.as_str(), "all" | "requested") {
		return Err(Error::Validation {
			message: "matching.experience_axes must be one of all or requested.".to_string(),
		});
	}
	if cfg.search.max_limit == 0 || cfg.search.max_limit > SEARCH_LIMIT_CEILING {
		return Err(Error::Validation {
			message: format!("search.max_limit must be in the range 1-{SEARCH_LIMIT_CEILING}."),
		});
	}
	if cfg.search.default_limit == 0 || cfg.search.default_limit > cfg.search.max_limit {
		return Err(Error::Validation {
			message: "search.default_limit must be in the range 1-search.max_limit.".to_string(),
		});
	}
	if cfg.search.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.matching.default_role = cfg.matching.default_role.trim().to_string();
	cfg.matching.experience_axes = cfg.matching.experience_axes.trim().to_ascii_lowercase();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
