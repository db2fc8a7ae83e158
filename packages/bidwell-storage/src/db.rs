use std::str::FromStr;

use sqlx::{
	PgPool,
	postgres::{PgConnectOptions, PgPoolOptions},
};

use crate::{Result, schema};

const SCHEMA_LOCK_ID: i64 = 4_201_337;

pub struct Db {
	pub pool: PgPool,
}
impl Db {
	pub async fn connect(cfg: &bidwell_config::Postgres) -> Result<Self> {
		let options = PgConnectOptions::from_str(&cfg.dsn)?
			.options([("statement_timeout", format!("{}ms", cfg.statement_timeout_ms))]);
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect_with(options).await?;

		tracing::debug!(
			pool_max_conns = cfg.pool_max_conns,
			statement_timeout_ms = cfg.statement_timeout_ms,
			"Connected to Postgres."
		);

		Ok(Self { pool })
	}

	pub async fn ensure_schema(&self) -> Result<()> {
		let sql = schema::render_schema();
		// Advisory locks are held per connection. A single transaction keeps the lock on one
		// connection and releases it on commit.
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)")
			.bind(SCHEMA_LOCK_ID)
			.execute(&mut *tx)
			.await?;

		for statement in schema::statements(&sql) {
			sqlx::query(statement).execute(&mut *tx).await?;
		}

		tx.commit().await?;

		Ok(())
	}
}
