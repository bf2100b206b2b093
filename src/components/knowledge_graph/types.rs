use serde::Deserialize;

/// A searchable document as supplied by the search collaborator. Read-only here.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
	pub id: String,
	pub title: String,
	pub snippet: String,
	pub score: f64,
	pub category: String,
	pub file_type: String,
	pub date: String,
	pub tags: Vec<String>,
	pub is_semantic_match: bool,
}

impl Document {
	/// True if any tag appears in both documents.
	pub fn shares_tag_with(&self, other: &Document) -> bool {
		self.tags.iter().any(|tag| other.tags.contains(tag))
	}
}

/// Index of a node in the graph arena. Stable for the lifetime of a session.
pub type NodeIdx = usize;

/// A document placed in world space.
#[derive(Clone, Debug)]
pub struct Node {
	pub doc: Document,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
}

impl Node {
	pub fn new(doc: Document, x: f64, y: f64) -> Self {
		Self {
			doc,
			x,
			y,
			vx: 0.0,
			vy: 0.0,
		}
	}

	pub fn id(&self) -> &str {
		&self.doc.id
	}
}

/// Undirected relation between two nodes, referenced by document id.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub source: String,
	pub target: String,
	pub strength: f64,
}

#[cfg(test)]
impl Edge {
	pub fn connects(&self, a: &str, b: &str) -> bool {
		(self.source == a && self.target == b) || (self.source == b && self.target == a)
	}
}

/// A point in either world or screen space; which one is up to the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

#[cfg(test)]
pub(crate) fn doc(id: &str, category: &str, tags: &[&str]) -> Document {
	Document {
		id: id.into(),
		title: format!("Document {id}"),
		snippet: String::new(),
		score: 0.5,
		category: category.into(),
		file_type: "PDF".into(),
		date: "2025-01-01".into(),
		tags: tags.iter().map(|t| t.to_string()).collect(),
		is_semantic_match: false,
	}
}
