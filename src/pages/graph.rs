use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::knowledge_graph::{
	Document, GraphConfig, GraphSignals, KnowledgeGraph, PhysicsConfig, UpdatePolicy,
	load_documents,
};

/// Side panel describing the selected document.
#[component]
fn DetailsPanel(selected: RwSignal<Option<Document>>) -> impl IntoView {
	view! {
		<aside class="details-panel">
			{move || match selected.get() {
				Some(doc) => {
					view! {
						<div class="details-header">
							<span class="details-category">{doc.category.clone()}</span>
							<span class="details-file-type">{doc.file_type.clone()}</span>
						</div>
						<h3>{doc.title.clone()}</h3>
						<p class="details-snippet" inner_html=doc.snippet.clone()></p>
						<div class="details-meta">
							<span>{doc.date.clone()}</span>
							<span>{format!("{:.0}% match", doc.score * 100.0)}</span>
							{doc
								.is_semantic_match
								.then(|| view! { <span class="semantic-badge">"Semantic"</span> })}
						</div>
						<div class="details-tags">
							{doc
								.tags
								.iter()
								.map(|tag| view! { <span class="tag">{format!("#{tag}")}</span> })
								.collect_view()}
						</div>
					}
						.into_any()
				}
				None => view! { <p class="details-empty">"Select a node to view details"</p> }.into_any(),
			}}
		</aside>
	}
}

/// Knowledge graph page over the bundled document catalog.
///
/// `?ordering=sequential` switches the physics to node-by-node updates.
#[component]
pub fn Graph() -> impl IntoView {
	let signals = GraphSignals::new();
	let documents = load_documents();
	let update_policy = use_query_map()
		.with_untracked(|query| query.get("ordering"))
		.and_then(|name| UpdatePolicy::from_name(&name))
		.unwrap_or_default();
	let config = GraphConfig {
		physics: PhysicsConfig {
			update_policy,
			..PhysicsConfig::default()
		},
		..GraphConfig::default()
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<div class="graph-page">
				<header class="graph-page-header">
					<h2>"Knowledge Graph"</h2>
					<p class="subtitle">
						{move || match signals.hovered.get() {
							Some(doc) => doc.title,
							None => "Visualize relationships between printing entities.".to_string(),
						}}
					</p>
				</header>
				<div class="graph-layout">
					{documents
						.map(|docs| {
							view! {
								<KnowledgeGraph
									documents=Signal::derive(move || docs.clone())
									signals=signals
									config=config
								/>
							}
						})}
					<DetailsPanel selected=signals.selected />
				</div>
			</div>
		</ErrorBoundary>
	}
}
