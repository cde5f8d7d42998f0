use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Event, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent,
	Window,
};

use super::playback;
use super::render;
use super::state::{FRAME_STEP, Session, SharedSession};
use super::types::{Algorithm, Mode};

const TOAST_DURATION_MS: u32 = 3000;

/// Reactive mirror of the parts of the session shown outside the canvas.
#[derive(Clone, Copy)]
struct UiSignals {
	log: RwSignal<Vec<String>>,
	labels: RwSignal<Vec<String>>,
	start: RwSignal<Option<usize>>,
	mode: RwSignal<Mode>,
	running: RwSignal<bool>,
	naming: RwSignal<bool>,
	name_input: RwSignal<String>,
	toast: RwSignal<Option<(u64, String)>>,
	toast_seq: RwSignal<u64>,
}

impl UiSignals {
	fn new() -> Self {
		Self {
			log: RwSignal::new(Vec::new()),
			labels: RwSignal::new(Vec::new()),
			start: RwSignal::new(None),
			mode: RwSignal::new(Mode::default()),
			running: RwSignal::new(false),
			naming: RwSignal::new(false),
			name_input: RwSignal::new(String::new()),
			toast: RwSignal::new(None),
			toast_seq: RwSignal::new(0),
		}
	}

	fn sync(&self, s: &mut Session) {
		if self.log.with_untracked(|log| log.len()) != s.log().len() {
			self.log.set(s.log().to_vec());
		}
		let labels = s.labels();
		if self.labels.with_untracked(|current| *current != labels) {
			self.labels.set(labels);
		}
		if self.start.get_untracked() != s.start_node() {
			self.start.set(s.start_node());
		}
		if self.mode.get_untracked() != s.mode() {
			self.mode.set(s.mode());
		}
		if self.running.get_untracked() != s.is_running() {
			self.running.set(s.is_running());
		}
		let naming = s.placement().is_some();
		if naming && !self.naming.get_untracked() {
			self.name_input.set(s.suggested_label());
		}
		if self.naming.get_untracked() != naming {
			self.naming.set(naming);
		}
		for notice in s.take_notices() {
			self.show_toast(notice);
		}
	}

	fn show_toast(&self, message: String) {
		let id = self.toast_seq.get_untracked() + 1;
		self.toast_seq.set(id);
		self.toast.set(Some((id, message)));
		let toast = self.toast;
		Timeout::new(TOAST_DURATION_MS, move || {
			let _ = toast.try_update(|t| {
				if t.as_ref().is_some_and(|(shown, _)| *shown == id) {
					*t = None;
				}
			});
		})
		.forget();
	}
}

fn with_session(state: &SharedSession, ui: UiSignals, f: impl FnOnce(&mut Session)) {
	if let Some(ref mut s) = *state.borrow_mut() {
		f(s);
		ui.sync(s);
	}
}

fn start_run(state: &SharedSession, ui: UiSignals, algorithm: Algorithm) {
	let mut started = false;
	with_session(state, ui, |s| started = s.start_traversal(algorithm).is_ok());
	if started {
		spawn_local(playback::play(state.clone(), move |s| ui.sync(s)));
	}
}

fn confirm_naming(state: &SharedSession, ui: UiSignals) {
	let label = ui.name_input.get_untracked();
	with_session(state, ui, |s| {
		let _ = s.confirm_node(&label);
	});
}

fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn viewport_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|w| w.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|h| h.as_f64())
			.unwrap_or(600.0),
	)
}

/// Canvas graph editor with its toolbar, start-node selector, naming dialog,
/// toast and event log.
#[component]
pub fn GraphEditor(
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedSession = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let ui = UiSignals::new();
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

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

		let (w, h) = if fullscreen {
			viewport_size(&window)
		} else {
			(
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
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::error!("2d canvas context unavailable");
			return;
		};
		let mut session = Session::with_demo(w, h);
		session.reset_view();
		ui.sync(&mut session);
		*state_init.borrow_mut() = Some(session);

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = viewport_size(&win);
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
				s.tick(FRAME_STEP);
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
		if ev.button() != 0 {
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		with_session(&state_md, ui, |s| {
			s.pointer_down(x, y);
		});
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pointer_up();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_up();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.wheel(x, y, ev.delta_y());
		}
	};

	let mode_buttons = Mode::ALL
		.into_iter()
		.map(|mode| {
			let state = state.clone();
			view! {
				<button
					class="tool-btn"
					class:active=move || ui.mode.get() == mode
					prop:disabled=move || ui.running.get()
					on:click=move |_| with_session(&state, ui, |s| {
						let _ = s.set_mode(mode);
					})
				>
					{mode.title()}
				</button>
			}
		})
		.collect_view();

	let (state_bfs, state_dfs) = (state.clone(), state.clone());
	let (state_reset, state_clear, state_sel) = (state.clone(), state.clone(), state.clone());
	let (state_zin, state_zout, state_zfit) = (state.clone(), state.clone(), state.clone());
	let (state_ok, state_key, state_cancel) = (state.clone(), state.clone(), state.clone());

	let on_select = move |ev: Event| {
		let idx = event_target_value(&ev).parse::<usize>().ok();
		with_session(&state_sel, ui, |s| s.select_start(idx));
	};

	let on_name_key = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" {
			confirm_naming(&state_key, ui);
		}
	};

	let cursor = move || {
		if ui.running.get() {
			return "wait";
		}
		match ui.mode.get() {
			Mode::Pan => "grab",
			Mode::Delete => "not-allowed",
			Mode::PlaceNode | Mode::ConnectEdge => "crosshair",
		}
	};

	let toast_display = move || if ui.toast.get().is_some() { "block" } else { "none" };
	let modal_display = move || if ui.naming.get() { "flex" } else { "none" };

	view! {
		<div class="graph-editor">
			<canvas
				node_ref=canvas_ref
				class="graph-editor-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block;"
				style:cursor=cursor
			/>

			<div class="instructions">{move || ui.mode.get().instructions()}</div>

			<div class="glass-panel">
				<div class="tool-row">{mode_buttons}</div>

				<select
					class="start-select"
					on:change=on_select
					prop:value=move || ui.start.get().map(|i| i.to_string()).unwrap_or_default()
				>
					<option value="">"Select Start Node..."</option>
					{move || {
						ui.labels
							.get()
							.into_iter()
							.enumerate()
							.map(|(i, label)| view! { <option value=i.to_string()>{label}</option> })
							.collect_view()
					}}
				</select>

				<div class="tool-row">
					<button
						prop:disabled=move || ui.running.get()
						on:click=move |_| start_run(&state_bfs, ui, Algorithm::Bfs)
					>
						"Run BFS"
					</button>
					<button
						prop:disabled=move || ui.running.get()
						on:click=move |_| start_run(&state_dfs, ui, Algorithm::Dfs)
					>
						"Run DFS"
					</button>
				</div>
				<div class="tool-row">
					<button on:click=move |_| with_session(&state_reset, ui, |s| {
						let _ = s.reset_colors();
					})>"Reset Colors"</button>
					<button on:click=move |_| with_session(&state_clear, ui, |s| {
						let _ = s.clear_map();
					})>"Clear Map"</button>
				</div>

				<div class="log-box">
					{move || {
						ui.log
							.get()
							.into_iter()
							.map(|entry| view! { <div class="log-entry">{entry}</div> })
							.collect_view()
					}}
				</div>
			</div>

			<div class="zoom-controls">
				<button on:click=move |_| with_session(&state_zin, ui, |s| s.zoom_step(1.0))>"+"</button>
				<button on:click=move |_| with_session(&state_zout, ui, |s| s.zoom_step(-1.0))>"-"</button>
				<button on:click=move |_| with_session(&state_zfit, ui, |s| s.reset_view())>"Fit"</button>
			</div>

			<div
				class="toast"
				style:display=toast_display
			>
				{move || ui.toast.get().map(|(_, message)| message).unwrap_or_default()}
			</div>

			<div
				class="modal-overlay"
				style:display=modal_display
			>
				<div class="modal">
					<h3>"Name this node"</h3>
					<input
						type="text"
						prop:value=move || ui.name_input.get()
						on:input=move |ev| ui.name_input.set(event_target_value(&ev))
						on:keydown=on_name_key
					/>
					<div class="tool-row">
						<button on:click=move |_| confirm_naming(&state_ok, ui)>"Add"</button>
						<button on:click=move |_| with_session(&state_cancel, ui, |s| s.cancel_node())>
							"Cancel"
						</button>
					</div>
				</div>
			</div>
		</div>
	}
}
