//! Knowledge-graph view: documents as nodes, shared categories/tags as edges,
//! laid out by a force simulation on a pannable, zoomable canvas.

mod catalog;
mod component;
mod config;
mod error;
mod interaction;
mod model;
mod physics;
mod render;
mod scheduler;
mod state;
mod types;
mod viewport;

pub use catalog::load_documents;
pub use component::{GraphSignals, KnowledgeGraph};
pub use config::{GraphConfig, PhysicsConfig, UpdatePolicy};
pub use types::Document;
