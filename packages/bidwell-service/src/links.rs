use serde::{Deserialize, Serialize};

use bidwell_domain::models::MatchLink;

use crate::{BidwellService, Error, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListLinksResponse {
	pub links: Vec<MatchLink>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnlinkResponse {
	pub link_id: String,
	pub deleted: bool,
}

impl BidwellService {
	pub async fn list_links(&self, tender_id: &str) -> Result<ListLinksResponse> {
		let tender_id = tender_id.trim();

		if tender_id.is_empty() {
			return Err(Error::InvalidRequest { message: "tender_id is required.".to_string() });
		}
		if !self.store.tender_exists(tender_id).await? {
			return Err(Error::NotFound { message: format!("Tender {tender_id} not found.") });
		}

		let links = self.store.list_links(tender_id).await?;

		Ok(ListLinksResponse { links })
	}

	/// Removes one link. This is the only path that deletes links.
	pub async fn unlink(&self, link_id: &str) -> Result<UnlinkResponse> {
		let link_id = link_id.trim();

		if link_id.is_empty() {
			return Err(Error::InvalidRequest { message: "link_id is required.".to_string() });
		}
		if !self.store.delete_link(link_id).await? {
			return Err(Error::NotFound { message: format!("Link {link_id} not found.") });
		}

		tracing::info!(link_id, "Link removed.");

		Ok(UnlinkResponse { link_id: link_id.to_string(), deleted: true })
	}
}
