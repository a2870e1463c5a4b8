use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::render;
use super::state::StarfieldState;
use crate::message::Theme;

fn viewport(window: &Window) -> (f64, f64, f64) {
	let dim = |v: Result<JsValue, JsValue>, fallback: f64| v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback);
	(
		dim(window.inner_width(), 800.0),
		dim(window.inner_height(), 600.0),
		window.device_pixel_ratio(),
	)
}

fn size_canvas(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d, (w, h, dpr): (f64, f64, f64)) {
	canvas.set_width((w * dpr) as u32);
	canvas.set_height((h * dpr) as u32);
	let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
}

/// Full-viewport animated sky. Independent of any constellation.
#[component]
pub fn StarfieldCanvas(#[prop(into)] theme: Signal<Theme>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<StarfieldState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) = (state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("no 2d context available for starfield");
			return;
		};

		let dims = viewport(&window);
		size_canvas(&canvas, &ctx, dims);
		let seed = (js_sys::Math::random() * f64::from(u32::MAX)) as u32;
		*state_init.borrow_mut() = Some(StarfieldState::new(dims.0, dims.1, seed));
		debug!("starfield ready: {}x{} @{}x", dims.0, dims.1, dims.2);

		let (state_resize, canvas_resize, ctx_resize) = (state_init.clone(), canvas.clone(), ctx.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let dims = viewport(&win);
			size_canvas(&canvas_resize, &ctx_resize, dims);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(dims.0, dims.1);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick();
				render::render(s, &theme.get_untracked().palette(), &ctx);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="starfield-canvas"
			style="position: fixed; inset: 0; width: 100vw; height: 100vh; z-index: 0; pointer-events: none;"
		/>
	}
}
