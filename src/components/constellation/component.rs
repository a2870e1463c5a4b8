use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, PointerEvent};

use super::render;
use super::state::{ConstellationState, InteractionMode, SceneEvent, SceneOptions};
use super::types::Constellation;
use crate::message::Theme;

const FRAME_MS: f64 = 1000.0 / 60.0;

/// How stars appear when a constellation is attached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealPolicy {
	/// One star per `delay_ms`, then a reveal-complete callback.
	Sequenced { delay_ms: f64 },
	/// All stars at once; each still fades in.
	Immediate,
}

/// Handles shared by the frame loop, the pointer handlers and cleanup.
#[derive(Clone, Default)]
struct Scene {
	state: Rc<RefCell<Option<ConstellationState>>>,
	animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
	frame_id: Rc<Cell<Option<i32>>>,
	dpr: Rc<Cell<f64>>,
}

impl Scene {
	fn request_frame(&self) {
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(ref cb) = *self.animate.borrow() {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				self.frame_id.set(Some(id));
			}
		}
	}

	fn stop(&self) {
		if let Some(ref mut s) = *self.state.borrow_mut() {
			s.stop();
		}
		if let Some(id) = self.frame_id.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
		// Dropping the closure also breaks its reference cycle with `animate`.
		self.animate.borrow_mut().take();
	}
}

fn attach(state: &mut ConstellationState, constellation: Constellation, reveal: RevealPolicy) {
	let n = constellation.len();
	state.set_constellation(constellation);
	match reveal {
		RevealPolicy::Sequenced { delay_ms } => state.start_reveal(delay_ms),
		RevealPolicy::Immediate => state.set_revealed_count_immediate(n),
	}
}

fn device_pixel_ratio() -> f64 {
	web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

/// CSS size the canvas should occupy.
fn measure(canvas: &HtmlCanvasElement, fullscreen: bool) -> (f64, f64) {
	if fullscreen {
		let window = web_sys::window();
		let dim = |v: Option<Result<JsValue, JsValue>>, fallback: f64| {
			v.and_then(Result::ok).and_then(|v| v.as_f64()).unwrap_or(fallback)
		};
		(
			dim(window.as_ref().map(|w| w.inner_width()), 800.0),
			dim(window.as_ref().map(|w| w.inner_height()), 600.0),
		)
	} else {
		canvas
			.parent_element()
			.map(|p| (p.client_width() as f64, p.client_height() as f64))
			.unwrap_or((800.0, 600.0))
	}
}

/// Match the backing store to the current CSS size and pixel density.
fn fit_canvas(
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	state: &mut ConstellationState,
	fullscreen: bool,
	dpr_cell: &Cell<f64>,
) {
	let (w, h) = measure(canvas, fullscreen);
	let dpr = device_pixel_ratio();
	if (w, h) == state.size() && dpr == dpr_cell.get() {
		return;
	}
	dpr_cell.set(dpr);
	canvas.set_width((w * dpr) as u32);
	canvas.set_height((h * dpr) as u32);
	let style = HtmlElement::style(canvas);
	let _ = style.set_property("width", &format!("{}px", w));
	let _ = style.set_property("height", &format!("{}px", h));
	let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
	state.resize(w, h);
}

fn cursor_for(state: &ConstellationState) -> &'static str {
	match (state.mode(), state.dragged(), state.hovered()) {
		(_, Some(_), _) => "grabbing",
		(InteractionMode::Drag, None, Some(_)) => "grab",
		(InteractionMode::Reading, None, Some(idx)) if state.is_active(idx) => "pointer",
		(InteractionMode::Passive, None, Some(_)) => "pointer",
		_ => "default",
	}
}

#[component]
pub fn ConstellationCanvas(
	#[prop(into)] constellation: Signal<Constellation>,
	#[prop(into)] theme: Signal<Theme>,
	#[prop(default = InteractionMode::Passive)] mode: InteractionMode,
	#[prop(default = RevealPolicy::Sequenced { delay_ms: 800.0 })] reveal: RevealPolicy,
	#[prop(optional, into)] drag_enabled: MaybeProp<bool>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(optional)] on_reveal_complete: Option<Callback<()>>,
	#[prop(optional)] on_all_read: Option<Callback<()>>,
	#[prop(optional)] on_positions_change: Option<Callback<Vec<(f64, f64)>>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let scene = Scene::default();

	let dispatch = move |events: Vec<SceneEvent>| {
		for event in events {
			match event {
				SceneEvent::RevealComplete => {
					if let Some(cb) = on_reveal_complete {
						cb.run(());
					}
				}
				SceneEvent::AllRead => {
					if let Some(cb) = on_all_read {
						cb.run(());
					}
				}
				SceneEvent::PositionsChanged(positions) => {
					if let Some(cb) = on_positions_change {
						cb.run(positions);
					}
				}
			}
		}
	};

	let scene_init = scene.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if scene_init.state.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("canvas context is not 2d");
					return;
				}
			},
			_ => {
				warn!("no 2d context available for constellation canvas");
				return;
			}
		};

		let options = SceneOptions {
			mode,
			..SceneOptions::default()
		};
		let mut state = ConstellationState::new(Constellation::default(), options, 0.0, 0.0);
		if drag_enabled.get_untracked().unwrap_or(false) && !state.enable_drag() {
			warn!("drag requested on a reading constellation; ignoring");
		}
		attach(&mut state, constellation.get_untracked(), reveal);
		*scene_init.state.borrow_mut() = Some(state);
		debug!("constellation canvas ready ({:?})", mode);

		let scene_anim = scene_init.clone();
		let mut last_ts: Option<f64> = None;
		*scene_init.animate.borrow_mut() = Some(Closure::new(move |ts: f64| {
			let delta = last_ts.map_or(FRAME_MS, |prev| ts - prev);
			last_ts = Some(ts);
			let events = {
				let mut guard = scene_anim.state.borrow_mut();
				let Some(s) = guard.as_mut() else {
					return;
				};
				if s.is_stopped() {
					return;
				}
				fit_canvas(&canvas, &ctx, s, fullscreen, &scene_anim.dpr);
				let events = s.tick(delta);
				render::render(s, &theme.get_untracked().palette(), &ctx);
				events
			};
			dispatch(events);
			scene_anim.request_frame();
		}));
		scene_init.request_frame();
	});

	let scene_data = scene.clone();
	Effect::new(move |_| {
		let next = constellation.get();
		if let Some(ref mut s) = *scene_data.state.borrow_mut() {
			attach(s, next, reveal);
		}
	});

	let scene_drag = scene.clone();
	Effect::new(move |_| {
		let enabled = drag_enabled.get().unwrap_or(false);
		if let Some(ref mut s) = *scene_drag.state.borrow_mut() {
			if !enabled {
				s.disable_drag();
			} else if !s.enable_drag() {
				warn!("drag requested on a reading constellation; ignoring");
			}
		}
	});

	let scene_cleanup = StoredValue::new_local(scene.clone());
	on_cleanup(move || {
		if scene_cleanup.try_with_value(Scene::stop).is_none() {
			warn!("constellation scene disposed before cleanup; frame loop left running");
		} else {
			debug!("constellation canvas torn down");
		}
	});

	let local_point = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let set_cursor = move |cursor: &str| {
		if let Some(canvas) = canvas_ref.get() {
			let canvas: HtmlCanvasElement = canvas.into();
			let _ = HtmlElement::style(&canvas).set_property("cursor", cursor);
		}
	};

	let scene_pd = scene.clone();
	let on_pointerdown = move |ev: PointerEvent| {
		let Some((x, y)) = local_point(&ev) else {
			return;
		};
		if let Some(ref mut s) = *scene_pd.state.borrow_mut() {
			if s.pointer_down(x, y) {
				ev.prevent_default();
			}
			set_cursor(cursor_for(s));
		}
	};

	let scene_pm = scene.clone();
	let on_pointermove = move |ev: PointerEvent| {
		let Some((x, y)) = local_point(&ev) else {
			return;
		};
		let event = {
			let mut guard = scene_pm.state.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			let event = s.pointer_move(x, y);
			set_cursor(cursor_for(s));
			event
		};
		dispatch(event.into_iter().collect());
	};

	let scene_pu = scene.clone();
	let on_pointerup = move |_: PointerEvent| {
		if let Some(ref mut s) = *scene_pu.state.borrow_mut() {
			s.pointer_up();
			set_cursor(cursor_for(s));
		}
	};

	let scene_pl = scene.clone();
	let on_pointerleave = move |_: PointerEvent| {
		if let Some(ref mut s) = *scene_pl.state.borrow_mut() {
			s.pointer_leave();
			set_cursor(cursor_for(s));
		}
	};

	let scene_click = scene.clone();
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(&ev) else {
			return;
		};
		let event = match *scene_click.state.borrow_mut() {
			Some(ref mut s) => s.activate(x, y),
			None => None,
		};
		dispatch(event.into_iter().collect());
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="constellation-canvas"
			on:pointerdown=on_pointerdown
			on:pointermove=on_pointermove
			on:pointerup=on_pointerup
			on:pointerleave=on_pointerleave
			on:click=on_click
			style="display: block; touch-action: none;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::constellation::types::Star;

	#[test]
	fn scene_stop_halts_state_without_a_frame_loop() {
		let scene = Scene::default();
		*scene.state.borrow_mut() = Some(ConstellationState::new(
			Constellation::default(),
			SceneOptions::default(),
			0.0,
			0.0,
		));
		scene.stop();
		scene.stop();
		assert!(scene.state.borrow().as_ref().is_some_and(ConstellationState::is_stopped));
		assert!(scene.animate.borrow().is_none());
		assert_eq!(scene.frame_id.get(), None);
	}

	#[test]
	fn attach_honours_reveal_policy() {
		let mut state = ConstellationState::new(Constellation::default(), SceneOptions::default(), 0.0, 0.0);
		let constellation = Constellation {
			stars: vec![Star {
				x: 0.5,
				y: 0.5,
				size: 1.0,
				sentence: "Hi.".to_owned(),
			}],
			connections: Vec::new(),
		};
		attach(&mut state, constellation.clone(), RevealPolicy::Immediate);
		assert_eq!(state.revealed_count(), 1);
		attach(&mut state, constellation, RevealPolicy::Sequenced { delay_ms: 500.0 });
		assert_eq!(state.revealed_count(), 0);
		assert_eq!(state.tick(500.0), Vec::new());
		assert_eq!(state.revealed_count(), 1);
	}
}
