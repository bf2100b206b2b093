use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::config::{CATEGORY_COLORS, GraphConfig};
use super::error::GraphError;
use super::interaction::Cursor;
use super::physics::Bounds;
use super::render;
use super::scheduler::{AnimationLoop, BrowserFrames, ResizeWatch};
use super::state::{GraphState, ViewSnapshot};
use super::types::{Document, Point};
use super::viewport::Command;

type SharedState = Rc<RefCell<Option<GraphState>>>;

/// A running interactive session. Dropping it stops the loop, then the observer.
struct Session {
	_frames: AnimationLoop<BrowserFrames>,
	_resize: ResizeWatch,
}

/// Host-facing view of the graph: what the details panel and zoom controls read.
#[derive(Clone, Copy)]
pub struct GraphSignals {
	/// Document under the pointer.
	pub hovered: RwSignal<Option<Document>>,
	/// Last clicked document; kept until another node is clicked.
	pub selected: RwSignal<Option<Document>>,
	/// Current zoom factor.
	pub scale: RwSignal<f64>,
	/// Current pan offset in screen pixels.
	pub offset: RwSignal<Point>,
	/// Cursor hint for the canvas.
	pub cursor: RwSignal<Cursor>,
}

impl GraphSignals {
	/// Signals for a graph that is not running yet.
	pub fn new() -> Self {
		let idle = ViewSnapshot::default();
		Self {
			hovered: RwSignal::new(idle.hovered),
			selected: RwSignal::new(idle.selected),
			scale: RwSignal::new(idle.scale),
			offset: RwSignal::new(idle.offset),
			cursor: RwSignal::new(idle.cursor),
		}
	}

	/// Runs `f` against the live graph (if any) and publishes what changed.
	fn update(&self, state: &SharedState, f: impl FnOnce(&mut GraphState)) {
		let snapshot = {
			let mut guard = state.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			f(&mut *s);
			s.snapshot()
		};
		self.publish(snapshot);
	}

	fn publish(&self, snap: ViewSnapshot) {
		if self.hovered.with_untracked(|cur| *cur != snap.hovered) {
			self.hovered.set(snap.hovered);
		}
		if self.selected.with_untracked(|cur| *cur != snap.selected) {
			self.selected.set(snap.selected);
		}
		if self.scale.get_untracked() != snap.scale {
			self.scale.set(snap.scale);
		}
		if self.offset.get_untracked() != snap.offset {
			self.offset.set(snap.offset);
		}
		if self.cursor.get_untracked() != snap.cursor {
			self.cursor.set(snap.cursor);
		}
	}

	fn clear(&self) {
		self.publish(ViewSnapshot::default());
	}
}

impl Default for GraphSignals {
	fn default() -> Self {
		Self::new()
	}
}

fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Keeps the live graph's bounds in step with the canvas. Layout is kept.
fn resize_session(state: &SharedState, width: f64, height: f64) {
	if let Some(ref mut s) = *state.borrow_mut() {
		s.resize(width, height);
	}
}

fn start_session(
	container: &Element,
	canvas: HtmlCanvasElement,
	docs: &[Document],
	config: &GraphConfig,
	state: SharedState,
) -> Result<Session, GraphError> {
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or(GraphError::NoContext)?
		.dyn_into()
		.map_err(|_| GraphError::NoContext)?;
	let frames = BrowserFrames::new()?;

	let (w, h) = (container.client_width() as f64, container.client_height() as f64);
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	let mut rng = StdRng::seed_from_u64(js_sys::Date::now() as u64);
	let bounds = Bounds {
		width: w,
		height: h,
	};
	*state.borrow_mut() = Some(GraphState::new(docs, bounds, config.clone(), &mut rng));
	info!("entered interactive mode ({w}x{h})");

	let (state_resize, canvas_resize) = (state.clone(), canvas.clone());
	let resize = ResizeWatch::observe(container, move |nw, nh| {
		canvas_resize.set_width(nw as u32);
		canvas_resize.set_height(nh as u32);
		resize_session(&state_resize, nw, nh);
		debug!("canvas resized to {nw}x{nh}");
	})?;

	let frames = AnimationLoop::start(frames, move || {
		if let Some(ref mut s) = *state.borrow_mut() {
			s.tick();
			render::render(s, &ctx);
		}
	});

	Ok(Session {
		_frames: frames,
		_resize: resize,
	})
}

/// Category legend shown in the corner of the canvas.
#[component]
fn Legend() -> impl IntoView {
	view! {
		<div class="graph-legend">
			{CATEGORY_COLORS
				.iter()
				.map(|(name, color)| {
					view! {
						<div class="legend-item">
							<span class="legend-dot" style:background-color=*color></span>
							<span>{*name}</span>
						</div>
					}
				})
				.collect_view()}
		</div>
	}
}

/// Force-directed knowledge graph over `documents`.
///
/// Starts as a static preview; the simulation only runs after the user enters
/// interactive mode. Hover, selection, zoom and pan are published through `signals`.
#[component]
pub fn KnowledgeGraph(
	#[prop(into)] documents: Signal<Vec<Document>>,
	signals: GraphSignals,
	#[prop(default = GraphConfig::default())] config: GraphConfig,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let interactive = RwSignal::new(false);
	let state: SharedState = Rc::new(RefCell::new(None));
	let session: Rc<RefCell<Option<Session>>> = Rc::new(RefCell::new(None));

	let (state_fx, session_fx) = (state.clone(), session.clone());
	Effect::new(move |_| {
		if !interactive.get() {
			if session_fx.borrow_mut().take().is_some() {
				*state_fx.borrow_mut() = None;
				signals.clear();
				info!("left interactive mode");
			}
			return;
		}
		let (Some(container), Some(canvas)) = (container_ref.get(), canvas_ref.get()) else {
			debug!("graph surface not mounted yet, deferring start");
			return;
		};
		// Runs again whenever the document set changes.
		let docs = documents.get();
		session_fx.borrow_mut().take();
		match start_session(&container, canvas, &docs, &config, state_fx.clone()) {
			Ok(s) => *session_fx.borrow_mut() = Some(s),
			Err(err) => {
				*state_fx.borrow_mut() = None;
				warn!("cannot start knowledge graph: {err}");
			}
		}
		signals.update(&state_fx, |_| {});
	});

	let teardown = SendWrapper::new(session.clone());
	on_cleanup(move || {
		teardown.take().borrow_mut().take();
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let p = canvas_point(&canvas, &ev);
		signals.update(&state_mm, |s| s.pointer_move(p));
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let p = canvas_point(&canvas, &ev);
		signals.update(&state_md, |s| s.pointer_down(p));
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let p = canvas_point(&canvas, &ev);
		signals.update(&state_mu, |s| s.pointer_up(p));
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		signals.update(&state_ml, |s| s.pointer_leave());
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let command = if ev.delta_y() > 0.0 {
			Command::ZoomOut
		} else {
			Command::ZoomIn
		};
		signals.update(&state_wh, |s| s.command(command));
	};

	let (state_zi, state_zo, state_rs) = (state.clone(), state.clone(), state.clone());
	let shown = move |on: bool| if interactive.get() == on { "flex" } else { "none" };

	view! {
		<div class="graph-container" node_ref=container_ref>
			<div class="graph-toolbar" style:display=move || shown(true)>
				<button
					class="graph-button"
					on:click=move |_| signals.update(&state_rs, |s| s.command(Command::ResetView))
				>
					"Reset View"
				</button>
				<button class="graph-button" on:click=move |_| interactive.set(false)>
					"Exit Interactive Mode"
				</button>
			</div>

			<div class="graph-preview" style:display=move || shown(false)>
				<h3>"Interactive Graph Visualization"</h3>
				<p>
					"Explore relationships between documents through shared categories and tags."
				</p>
				<button class="graph-button primary" on:click=move |_| interactive.set(true)>
					"Enter Interactive Mode"
				</button>
			</div>

			<canvas
				node_ref=canvas_ref
				class="graph-canvas"
				style:display=move || if interactive.get() { "block" } else { "none" }
				style:cursor=move || signals.cursor.get().as_css()
				on:mousemove=on_mousemove
				on:mousedown=on_mousedown
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
			/>

			<div class="zoom-controls" style:display=move || shown(true)>
				<button
					class="graph-button"
					on:click=move |_| signals.update(&state_zi, |s| s.command(Command::ZoomIn))
				>
					"+"
				</button>
				<span
					class="zoom-level"
					title=move || {
						let offset = signals.offset.get();
						format!("pan {:.0}, {:.0}", offset.x, offset.y)
					}
				>
					{move || format!("{:.0}%", signals.scale.get() * 100.0)}
				</span>
				<button
					class="graph-button"
					on:click=move |_| signals.update(&state_zo, |s| s.command(Command::ZoomOut))
				>
					"-"
				</button>
			</div>

			<div style:display=move || shown(true)>
				<Legend />
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::knowledge_graph::types::doc;

	fn shared(docs: &[Document]) -> SharedState {
		let bounds = Bounds {
			width: 800.0,
			height: 600.0,
		};
		let state = GraphState::new(docs, bounds, GraphConfig::default(), &mut StdRng::seed_from_u64(5));
		Rc::new(RefCell::new(Some(state)))
	}

	#[test]
	fn every_resize_reaches_the_live_graph() {
		let state = shared(&[doc("a", "Material", &[]), doc("b", "Material", &[])]);
		let before: Vec<_> = state
			.borrow()
			.iter()
			.flat_map(|s| s.nodes.iter().map(|n| (n.x, n.y)))
			.collect();
		for (w, h) in [(640.0, 480.0), (1024.0, 768.0), (300.0, 200.0)] {
			resize_session(&state, w, h);
			let bounds = state.borrow().as_ref().map(|s| s.bounds);
			assert_eq!(bounds, Some(Bounds { width: w, height: h }));
		}
		let after: Vec<_> = state
			.borrow()
			.iter()
			.flat_map(|s| s.nodes.iter().map(|n| (n.x, n.y)))
			.collect();
		assert_eq!(before, after);
	}

	#[test]
	fn resize_without_a_session_is_a_no_op() {
		let state: SharedState = Rc::new(RefCell::new(None));
		resize_session(&state, 640.0, 480.0);
		assert!(state.borrow().is_none());
	}
}
