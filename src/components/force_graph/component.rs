use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use super::render;
use super::state::{Gesture, GraphRenderer};
use super::types::{GraphData, GraphOptions};

type SharedRenderer = Rc<RefCell<Option<GraphRenderer>>>;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Client coordinates to canvas pixel coordinates.
fn canvas_point(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	client_x: f64,
	client_y: f64,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((client_x - rect.left(), client_y - rect.top()))
}

/// Runs `f` for every touch point that changed in `ev`.
fn for_each_changed_touch(ev: &TouchEvent, mut f: impl FnMut(i32, f64, f64)) {
	let touches = ev.changed_touches();
	for i in 0..touches.length() {
		if let Some(touch) = touches.get(i) {
			f(
				touch.identifier(),
				touch.client_x() as f64,
				touch.client_y() as f64,
			);
		}
	}
}

#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = GraphOptions::default())] options: GraphOptions,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedRenderer = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = match window_size(&window) {
			Some(size) if fullscreen => size,
			_ => (
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			),
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("canvas has no 2d context; graph not rendered");
			return;
		};
		*state_init.borrow_mut() = Some(GraphRenderer::new(&data.get(), &options, w, h));
		info!("force graph mounted at {}x{}", w, h);

		// Later runs only swap the renderer; the frame loop and listeners stay.
		if animate_init.borrow().is_some() {
			return;
		}

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, ev.client_x() as f64, ev.client_y() as f64)
		else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at_position(x, y) {
				s.drag_start(Gesture::Mouse, idx);
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, ev.client_x() as f64, ev.client_y() as f64)
		else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.drag_move(Gesture::Mouse, x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.drag_end(Gesture::Mouse);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag_end(Gesture::Mouse);
		}
	};

	let state_ts = state.clone();
	let on_touchstart = move |ev: TouchEvent| {
		let mut grabbed = false;
		if let Some(ref mut s) = *state_ts.borrow_mut() {
			for_each_changed_touch(&ev, |id, cx, cy| {
				let Some((x, y)) = canvas_point(canvas_ref, cx, cy) else {
					return;
				};
				if let Some(idx) = s.node_at_position(x, y) {
					s.drag_start(Gesture::Touch(id), idx);
					grabbed = true;
				}
			});
		}
		// Only swallow the touch when it landed on a node, so the page can still scroll.
		if grabbed {
			ev.prevent_default();
		}
	};

	let state_tm = state.clone();
	let on_touchmove = move |ev: TouchEvent| {
		if let Some(ref mut s) = *state_tm.borrow_mut() {
			if !s.drag.dragging {
				return;
			}
			ev.prevent_default();
			for_each_changed_touch(&ev, |id, cx, cy| {
				if let Some((x, y)) = canvas_point(canvas_ref, cx, cy) {
					s.drag_move(Gesture::Touch(id), x, y);
				}
			});
		}
	};

	let state_te = state.clone();
	let on_touchend = move |ev: TouchEvent| {
		if let Some(ref mut s) = *state_te.borrow_mut() {
			for_each_changed_touch(&ev, |id, _, _| s.drag_end(Gesture::Touch(id)));
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:touchstart=on_touchstart
			on:touchmove=on_touchmove
			on:touchend=on_touchend.clone()
			on:touchcancel=on_touchend
			style="display: block; cursor: grab;"
		/>
	}
}
