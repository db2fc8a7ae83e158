use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub matching: Matching,
	pub search: Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
	/// Applied to every pooled connection as the session `statement_timeout`.
	#[serde(default = "default_statement_timeout_ms")]
	pub statement_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Matching {
	/// Role attached to auto-selected personnel and engagement links.
	#[serde(default = "default_role")]
	pub default_role: String,
	/// Relative band around the condition's volume target, e.g. 0.2 for +-20%.
	#[serde(default = "default_tolerance")]
	pub volume_tolerance: f64,
	#[serde(default = "default_tolerance")]
	pub duration_tolerance: f64,
	/// Requirement tokens shorter than this are ignored during keyword overlap.
	#[serde(default = "default_min_keyword_chars")]
	pub min_keyword_chars: usize,
	/// One of "all" or "requested".
	///
	/// "all" treats an unset experience minimum as zero. "requested" only compares the axes the
	/// condition sets a minimum for.
	#[serde(default = "default_experience_axes")]
	pub experience_axes: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	pub default_limit: u32,
	pub max_limit: u32,
	pub timeout_ms: u64,
}

impl Default for Matching {
	fn default() -> Self {
		Self {
			default_role: default_role(),
			volume_tolerance: default_tolerance(),
			duration_tolerance: default_tolerance(),
			min_keyword_chars: default_min_keyword_chars(),
			experience_axes: default_experience_axes(),
		}
	}
}

impl Default for Search {
	fn default() -> Self {
		Self { default_limit: 20, max_limit: 100, timeout_ms: 5_000 }
	}
}

fn default_statement_timeout_ms() -> u64 {
	5_000
}

fn default_role() -> String {
	"Project Team Member".to_string()
}

fn default_tolerance() -> f64 {
	0.2
}

fn default_min_keyword_chars() -> usize {
	4
}

fn default_experience_axes() -> String {
	"all".to_string()
}
