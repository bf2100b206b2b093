//! Builds the node/edge model from a document collection.

use std::collections::HashSet;
use std::f64::consts::PI;

use log::{info, warn};
use rand::Rng;

use super::config::LayoutConfig;
use super::types::{Document, Edge, Node, Point};

#[derive(Clone, Debug, Default)]
pub struct GraphModel {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
}

/// Creates one node per document, scattered in a disk around `center`, and
/// links every pair that shares a category or at least one tag.
///
/// Pairs of the same category get `category_strength` even if they also share
/// tags; all other linked pairs get `tag_strength`. Documents whose id was
/// already seen are dropped.
pub fn build_graph<R: Rng>(
	docs: &[Document],
	center: Point,
	layout: &LayoutConfig,
	rng: &mut R,
) -> GraphModel {
	let mut seen = HashSet::new();
	let nodes: Vec<Node> = docs
		.iter()
		.filter(|doc| {
			let fresh = seen.insert(doc.id.as_str());
			if !fresh {
				warn!("duplicate document id {:?}, keeping the first", doc.id);
			}
			fresh
		})
		.map(|doc| {
			let (x, y) = scatter(center, layout.spread, rng);
			Node::new(doc.clone(), x, y)
		})
		.collect();

	let mut edges = Vec::new();
	for (i, a) in nodes.iter().enumerate() {
		for b in &nodes[i + 1..] {
			let same_category = a.doc.category == b.doc.category;
			if !same_category && !a.doc.shares_tag_with(&b.doc) {
				continue;
			}
			edges.push(Edge {
				source: a.doc.id.clone(),
				target: b.doc.id.clone(),
				strength: if same_category {
					layout.category_strength
				} else {
					layout.tag_strength
				},
			});
		}
	}

	info!("built graph: {} nodes, {} edges", nodes.len(), edges.len());
	GraphModel { nodes, edges }
}

/// Uniform sample inside a disk of the given radius.
fn scatter<R: Rng>(center: Point, radius: f64, rng: &mut R) -> (f64, f64) {
	let r = radius * rng.gen_range(0.0..=1.0f64).sqrt();
	let angle = rng.gen_range(0.0..2.0 * PI);
	(center.x + r * angle.cos(), center.y + r * angle.sin())
}
