use std::sync::Arc;

use bidwell_service::BidwellService;
use bidwell_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<BidwellService>,
}
impl AppState {
	/// Connects to Postgres, applies the schema, and builds the service around that store.
	pub async fn new(config: bidwell_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = BidwellService::new(config, Arc::new(db));

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: BidwellService) -> Self {
		Self { service: Arc::new(service) }
	}
}
