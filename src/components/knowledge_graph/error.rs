use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while setting up the graph. None of them are shown to the user;
/// callers log them and try again once the surface exists.
#[derive(Error, Debug)]
pub enum GraphError {
	/// No browser window, e.g. when running outside a page.
	#[error("no window available")]
	NoWindow,

	/// The canvas refused to hand out a 2D context.
	#[error("canvas has no 2d context")]
	NoContext,

	/// A DOM call threw.
	#[error("dom error: {0}")]
	Dom(String),

	/// The embedded document catalog is malformed.
	#[error("invalid document catalog: {0}")]
	Catalog(#[from] serde_json::Error),
}

impl From<JsValue> for GraphError {
	fn from(value: JsValue) -> Self {
		GraphError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
