//! Mock document source standing in for the search backend.

use super::error::GraphError;
use super::types::Document;

const DOCUMENTS_JSON: &str = include_str!("../../../assets/documents.json");

/// Returns the bundled documents in catalog order.
pub fn load_documents() -> Result<Vec<Document>, GraphError> {
	Ok(serde_json::from_str(DOCUMENTS_JSON)?)
}
