//! Per-frame tick loop and container resize tracking.
//!
//! Both are owned handles: dropping an [`AnimationLoop`] cancels the pending
//! frame, dropping a [`ResizeWatch`] disconnects the observer. A frame that
//! still fires after `stop` does nothing.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Element, ResizeObserver, ResizeObserverEntry, Window};

use super::error::GraphError;

/// Something that can call back once on the next display refresh.
pub trait FrameSource: 'static {
	type FrameId: Copy + 'static;

	/// Queues `callback` for the next frame. `None` if the request failed.
	fn request(&self, callback: Box<dyn FnOnce()>) -> Option<Self::FrameId>;

	fn cancel(&self, id: Self::FrameId);
}

/// `requestAnimationFrame` on the page's window.
pub struct BrowserFrames {
	window: Window,
}

impl BrowserFrames {
	pub fn new() -> Result<Self, GraphError> {
		web_sys::window()
			.map(|window| Self { window })
			.ok_or(GraphError::NoWindow)
	}
}

impl FrameSource for BrowserFrames {
	type FrameId = i32;

	fn request(&self, callback: Box<dyn FnOnce()>) -> Option<i32> {
		let callback = Closure::once_into_js(move || callback());
		self.window
			.request_animation_frame(callback.unchecked_ref())
			.ok()
	}

	fn cancel(&self, id: i32) {
		let _ = self.window.cancel_animation_frame(id);
	}
}

struct LoopInner<S: FrameSource> {
	source: S,
	running: Cell<bool>,
	pending: Cell<Option<S::FrameId>>,
	tick: RefCell<Box<dyn FnMut()>>,
}

/// Runs `tick` once per frame until stopped or dropped.
pub struct AnimationLoop<S: FrameSource> {
	inner: Rc<LoopInner<S>>,
}

impl<S: FrameSource> AnimationLoop<S> {
	pub fn start(source: S, tick: impl FnMut() + 'static) -> Self {
		let inner = Rc::new(LoopInner {
			source,
			running: Cell::new(true),
			pending: Cell::new(None),
			tick: RefCell::new(Box::new(tick)),
		});
		schedule(&inner);
		Self { inner }
	}

	#[cfg(test)]
	pub fn is_running(&self) -> bool {
		self.inner.running.get()
	}

	pub fn stop(&self) {
		self.inner.running.set(false);
		if let Some(id) = self.inner.pending.take() {
			self.inner.source.cancel(id);
		}
	}
}

impl<S: FrameSource> Drop for AnimationLoop<S> {
	fn drop(&mut self) {
		self.stop();
	}
}

fn schedule<S: FrameSource>(inner: &Rc<LoopInner<S>>) {
	let weak: Weak<LoopInner<S>> = Rc::downgrade(inner);
	let id = inner.source.request(Box::new(move || {
		let Some(inner) = weak.upgrade() else {
			return;
		};
		inner.pending.set(None);
		if !inner.running.get() {
			return;
		}
		{
			let mut tick = inner.tick.borrow_mut();
			(*tick)();
		}
		if inner.running.get() {
			schedule(&inner);
		}
	}));
	if id.is_none() {
		warn!("frame request failed, animation loop stopped");
		inner.running.set(false);
	}
	inner.pending.set(id);
}

/// Reports the content size of an element whenever it changes.
pub struct ResizeWatch {
	observer: ResizeObserver,
	_callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl ResizeWatch {
	pub fn observe(
		target: &Element,
		mut on_resize: impl FnMut(f64, f64) + 'static,
	) -> Result<Self, GraphError> {
		let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
			for entry in entries.iter() {
				let rect = entry.unchecked_into::<ResizeObserverEntry>().content_rect();
				on_resize(rect.width(), rect.height());
			}
		});
		let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
		observer.observe(target);
		Ok(Self {
			observer,
			_callback: callback,
		})
	}
}

impl Drop for ResizeWatch {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Frames that only fire when the test says so.
	#[derive(Default)]
	struct ManualFrames {
		queue: RefCell<Vec<(u32, Box<dyn FnOnce()>)>>,
		next_id: Cell<u32>,
		cancelled: RefCell<Vec<u32>>,
		ignore_cancel: bool,
	}

	impl ManualFrames {
		fn fire(&self) -> usize {
			let due = std::mem::take(&mut *self.queue.borrow_mut());
			let fired = due.len();
			for (_, callback) in due {
				callback();
			}
			fired
		}

		fn pending(&self) -> usize {
			self.queue.borrow().len()
		}
	}

	impl FrameSource for Rc<ManualFrames> {
		type FrameId = u32;

		fn request(&self, callback: Box<dyn FnOnce()>) -> Option<u32> {
			let id = self.next_id.get();
			self.next_id.set(id + 1);
			self.queue.borrow_mut().push((id, callback));
			Some(id)
		}

		fn cancel(&self, id: u32) {
			self.cancelled.borrow_mut().push(id);
			if !self.ignore_cancel {
				self.queue.borrow_mut().retain(|(queued, _)| *queued != id);
			}
		}
	}

	fn counting_loop(frames: &Rc<ManualFrames>) -> (AnimationLoop<Rc<ManualFrames>>, Rc<Cell<u32>>) {
		let ticks = Rc::new(Cell::new(0));
		let counter = ticks.clone();
		let handle = AnimationLoop::start(frames.clone(), move || counter.set(counter.get() + 1));
		(handle, ticks)
	}

	#[test]
	fn ticks_once_per_frame() {
		let frames = Rc::new(ManualFrames::default());
		let (handle, ticks) = counting_loop(&frames);
		assert_eq!(ticks.get(), 0);
		for _ in 0..3 {
			assert_eq!(frames.fire(), 1);
		}
		assert_eq!(ticks.get(), 3);
		assert_eq!(frames.pending(), 1);
		assert!(handle.is_running());
	}

	#[test]
	fn stop_cancels_the_pending_frame() {
		let frames = Rc::new(ManualFrames::default());
		let (handle, ticks) = counting_loop(&frames);
		frames.fire();
		handle.stop();
		assert!(!handle.is_running());
		assert_eq!(*frames.cancelled.borrow(), vec![1]);
		assert_eq!(frames.fire(), 0);
		assert_eq!(ticks.get(), 1);
	}

	#[test]
	fn stale_frame_after_stop_does_not_tick() {
		let frames = Rc::new(ManualFrames {
			ignore_cancel: true,
			..ManualFrames::default()
		});
		let (handle, ticks) = counting_loop(&frames);
		handle.stop();
		assert_eq!(frames.fire(), 1);
		assert_eq!(ticks.get(), 0);
		assert_eq!(frames.pending(), 0);
	}

	#[test]
	fn dropping_the_handle_stops_the_loop() {
		let frames = Rc::new(ManualFrames {
			ignore_cancel: true,
			..ManualFrames::default()
		});
		let (handle, ticks) = counting_loop(&frames);
		frames.fire();
		drop(handle);
		frames.fire();
		assert_eq!(ticks.get(), 1);
		assert_eq!(frames.pending(), 0);
	}
}
