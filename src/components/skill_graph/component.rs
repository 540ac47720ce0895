//! Leptos component wrapping the skill graph canvas.
//!
//! The component creates an HTML canvas element and wires pointer and wheel
//! handlers for hover, selection, orbit and zoom. An animation loop runs via
//! `requestAnimationFrame`, advancing the camera spring and particle field and
//! repainting each frame. The loop tears itself down once the canvas leaves
//! the document.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, PointerEvent, WheelEvent, Window};

use super::camera::{CameraConfig, CameraHandle, CameraRig};
use super::drag::DragState;
use super::layout::{LayoutConfig, Viewport};
use super::nodes::NodeKind;
use super::particles::ParticleField;
use super::render::{self, DrawList, Frame};
use super::scene::{GraphLayout, SelectionChange};
use super::theme::Theme;
use super::types::SkillCategory;

/// Zoom step per wheel notch.
const WHEEL_ZOOM: f64 = 1.1;
/// Longest frame step fed to the camera, seconds. Keeps a backgrounded tab
/// from producing one huge step on return.
const MAX_FRAME_DT: f64 = 0.1;

/// Scene state plus per-frame bookkeeping owned by the mounted canvas.
struct SkillGraphContext {
	layout: GraphLayout,
	theme: Theme,
	particles: Option<ParticleField>,
	draw_list: DrawList,
	drag: DragState,
	started_at: Option<f64>,
	last_frame: Option<f64>,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
type ResizeCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	let w = window.inner_width().ok()?.as_f64()?;
	let h = window.inner_height().ok()?.as_f64()?;
	Some((w, h))
}

fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Node under a canvas point for the camera's current pose.
fn pick(ctx: &SkillGraphContext, camera: &CameraHandle, x: f64, y: f64) -> Option<NodeKind> {
	let view = camera.with_rig(|rig| rig.view(ctx.layout.viewport()))?;
	ctx.layout.pick(&view, x, y)
}

/// Moves the camera for a selection change and mirrors it to the callback.
/// A reset also sends the camera home when the selection was already empty.
fn apply_change(
	change: SelectionChange,
	camera: &CameraHandle,
	on_selected: Option<Callback<Option<String>>>,
	reset: bool,
) {
	let name = match change {
		SelectionChange::Focused { name, position } => {
			camera.with_rig(|rig| rig.focus_default(position));
			Some(name)
		}
		SelectionChange::Cleared => {
			camera.with_rig(CameraRig::reset_default);
			None
		}
		SelectionChange::Unchanged => {
			if reset {
				camera.with_rig(CameraRig::reset_default);
			}
			return;
		}
	};
	debug!("skill-graph: selected category {name:?}");
	if let Some(cb) = on_selected {
		cb.run(name);
	}
}

/// Renders the interactive radial skill graph on a canvas element.
///
/// Pass the dataset via the reactive `skills` signal; it is read once when the
/// canvas mounts. The component sizes itself to its parent container by
/// default; set `fullscreen = true` to fill the viewport and follow window
/// resizes. Explicit `width`/`height` override automatic sizing.
///
/// Supply a [`CameraHandle`] to drive the camera from outside, and
/// `on_category_selected` to mirror the selected category name. Each change
/// of `reset` clears the selection and sends the camera home. `mobile`
/// replaces the width breakpoint with the host page's own classification.
#[component]
pub fn SkillGraphCanvas(
	#[prop(into)] skills: Signal<Vec<SkillCategory>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] layout_config: LayoutConfig,
	#[prop(optional)] camera_config: CameraConfig,
	#[prop(optional)] theme: Theme,
	#[prop(optional)] camera: Option<CameraHandle>,
	#[prop(optional, into)] on_category_selected: Option<Callback<Option<String>>>,
	#[prop(optional, into)] reset: Option<Signal<u64>>,
	#[prop(default = None)] mobile: Option<bool>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let camera = camera.unwrap_or_default();
	let context: Rc<RefCell<Option<SkillGraphContext>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: ResizeCallback = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init, camera_init) = (
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		camera.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("skill-graph: no window, not mounting");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
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

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				warn!("skill-graph: canvas has no 2d context, not mounting");
				return;
			}
		};

		let viewport = Viewport::new(w, h, &layout_config).with_mobile(mobile);
		let categories = skills.get_untracked();
		let leaf_count: usize = categories.iter().map(|c| c.skills.len()).sum();
		info!(
			"skill-graph: mounted {} categories, {} skills, {}x{} (mobile: {})",
			categories.len(),
			leaf_count,
			w,
			h,
			viewport.mobile
		);

		let theme = theme.clone();
		let particles = match theme.particle_count(viewport.mobile) {
			0 => None,
			count => Some(ParticleField::new(count, &theme.particles, js_sys::Math::random)),
		};
		camera_init.attach(CameraRig::new(camera_config.clone(), viewport.mobile));

		*context_init.borrow_mut() = Some(SkillGraphContext {
			layout: GraphLayout::new(categories, viewport, layout_config.clone()),
			theme,
			particles,
			draw_list: DrawList::default(),
			drag: DragState::default(),
			started_at: None,
			last_frame: None,
		});

		if fullscreen {
			let (context_resize, canvas_resize, config_resize, camera_resize) = (
				context_init.clone(),
				canvas.clone(),
				layout_config.clone(),
				camera_init.clone(),
			);
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					let viewport = Viewport::new(nw, nh, &config_resize).with_mobile(mobile);
					if let Some(point) = c.layout.resize(viewport) {
						camera_resize.with_rig(|rig| rig.focus_default(point));
					}
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner, resize_anim, camera_anim) = (
			context_init.clone(),
			animate_init.clone(),
			resize_cb_init.clone(),
			camera_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move |now_ms: f64| {
			let Some(window) = web_sys::window() else {
				return;
			};

			if !canvas.is_connected() {
				context_anim.borrow_mut().take();
				camera_anim.detach();
				if let Some(cb) = resize_anim.borrow_mut().take() {
					let _ = window
						.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
				// The running closure cannot drop itself; release it on the next task.
				if let Some(cb) = animate_inner.borrow_mut().take() {
					let release = Closure::once_into_js(move || drop(cb));
					let _ = window.set_timeout_with_callback(release.unchecked_ref());
				}
				info!("skill-graph: canvas detached, frame loop stopped");
				return;
			}

			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let now = now_ms / 1000.0;
				let started = *c.started_at.get_or_insert(now);
				let dt = c
					.last_frame
					.map_or(0.0, |last| (now - last).clamp(0.0, MAX_FRAME_DT));
				c.last_frame = Some(now);
				let elapsed = now - started;

				let view = camera_anim.with_rig(|rig| {
					rig.tick(dt);
					rig.view(c.layout.viewport())
				});
				if let Some(ref mut field) = c.particles {
					field.update(elapsed);
				}
				if let Some(view) = view {
					let frame = Frame {
						layout: &c.layout,
						view: &view,
						theme: &c.theme,
						particles: c.particles.as_ref(),
						elapsed,
					};
					render::render(&ctx, &frame, &mut c.draw_list);
				}
			}

			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_pd = context.clone();
	let on_pointerdown = move |ev: PointerEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		let _ = canvas.set_pointer_capture(ev.pointer_id());
		if let Some(ref mut c) = *context_pd.borrow_mut() {
			c.drag.press(x, y);
		}
	};

	let (context_pm, camera_pm) = (context.clone(), camera.clone());
	let on_pointermove = move |ev: PointerEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		if let Some(ref mut c) = *context_pm.borrow_mut() {
			if let Some((dx, dy)) = c.drag.motion(x, y) {
				camera_pm.with_rig(|rig| rig.orbit(dx, dy));
				return;
			}
			if c.drag.active {
				return;
			}
			let hovered = pick(c, &camera_pm, x, y);
			c.layout.hover_node(hovered);
			let cursor = if hovered.is_some() { "pointer" } else { "grab" };
			let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
		}
	};

	let context_pu = context.clone();
	let on_pointerup = move |ev: PointerEvent| {
		if let Some(canvas) = canvas_ref.get_untracked() {
			let _ = canvas.release_pointer_capture(ev.pointer_id());
		}
		if let Some(ref mut c) = *context_pu.borrow_mut() {
			c.drag.release();
		}
	};

	let context_pl = context.clone();
	let on_pointerleave = move |_: PointerEvent| {
		if let Some(ref mut c) = *context_pl.borrow_mut() {
			c.drag.cancel();
			c.layout.clear_hover();
		}
	};
	let on_pointercancel = on_pointerleave.clone();

	let (context_cl, camera_cl) = (context.clone(), camera.clone());
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);

		let change = {
			let mut guard = context_cl.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			if !c.drag.take_click() {
				return;
			}
			let hit = pick(c, &camera_cl, x, y);
			c.layout.click(hit)
		};
		apply_change(change, &camera_cl, on_category_selected, false);
	};

	if let Some(reset) = reset {
		let (context_rs, camera_rs) = (context.clone(), camera.clone());
		Effect::new(move |previous: Option<u64>| {
			let generation = reset.get();
			if previous.is_some_and(|p| p != generation) {
				let change = match *context_rs.borrow_mut() {
					Some(ref mut c) => c.layout.reset_selection(),
					None => SelectionChange::Unchanged,
				};
				debug!("skill-graph: reset requested");
				apply_change(change, &camera_rs, on_category_selected, true);
			}
			generation
		});
	}

	let camera_wh = camera.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let factor = if ev.delta_y() > 0.0 {
			WHEEL_ZOOM
		} else {
			1.0 / WHEEL_ZOOM
		};
		camera_wh.with_rig(|rig| rig.zoom(factor));
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="skill-graph-canvas"
			on:pointerdown=on_pointerdown
			on:pointermove=on_pointermove
			on:pointerup=on_pointerup
			on:pointerleave=on_pointerleave
			on:pointercancel=on_pointercancel
			on:click=on_click
			on:wheel=on_wheel
			style="display: block; cursor: grab; touch-action: none;"
		/>
	}
}
