//! Camera rig: spring-animated focus/reset, orbit controls and projection.
//!
//! The rig is a tiny state machine, `Idle → Animating → Idle`. A new
//! `focus_on` or `reset` while animating simply retargets the in-flight
//! springs, keeping their current position and velocity, so motion stays
//! continuous and nothing is queued.
//!
//! Springs are critically damped by default. Their stiffness is derived from
//! the requested duration: with natural frequency `ω = settle_periods / T`, a
//! critically damped spring has decayed to well under 1% of its initial offset
//! after `T` seconds.

use std::cell::RefCell;
use std::f64::consts::FRAC_PI_2;
use std::rc::Rc;

use glam::{DMat4, DVec3};
use log::debug;

use super::layout::Viewport;

/// Spring parameters shared by the eye and look-target springs.
#[derive(Clone, Debug)]
pub struct SpringConfig {
	/// Spring mass.
	pub mass: f64,
	/// Damping ratio; 1.0 is critical damping (no overshoot).
	pub damping_ratio: f64,
	/// Natural periods (`ω·T`) that fit into the requested duration.
	pub settle_periods: f64,
}

impl Default for SpringConfig {
	fn default() -> Self {
		Self {
			mass: 1.0,
			damping_ratio: 1.0,
			settle_periods: 6.6,
		}
	}
}

/// Camera placement, lens and interaction tuning.
#[derive(Clone, Debug)]
pub struct CameraConfig {
	/// Home eye position on wide viewports.
	pub home_eye: DVec3,
	/// Home eye position on mobile viewports.
	pub mobile_home_eye: DVec3,
	/// Fixed look target; focus offsets are measured away from it.
	pub look_target: DVec3,
	/// Vertical field of view in degrees.
	pub fov_y_degrees: f64,
	/// Near clip distance.
	pub near: f64,
	/// Far clip distance.
	pub far: f64,
	/// Distance kept from a focused point.
	pub focus_distance: f64,
	/// Duration of a focus animation in milliseconds.
	pub focus_duration_ms: f64,
	/// Duration of a reset animation in milliseconds.
	pub reset_duration_ms: f64,
	/// Shorter durations are stretched to this to keep the integration stable.
	pub min_duration_ms: f64,
	/// Position/velocity magnitude below which a spring counts as settled.
	pub rest_epsilon: f64,
	/// Closest the eye may zoom towards the look target.
	pub min_distance: f64,
	/// Farthest the eye may zoom away from the look target.
	pub max_distance: f64,
	/// Orbit rotation in radians per dragged pixel.
	pub orbit_sensitivity: f64,
	/// Pitch limit for orbiting, radians from the horizon.
	pub max_pitch: f64,
	/// Spring tuning.
	pub spring: SpringConfig,
}

impl Default for CameraConfig {
	fn default() -> Self {
		Self {
			home_eye: DVec3::new(0.0, 7.0, 24.0),
			mobile_home_eye: DVec3::new(0.0, 8.0, 26.0),
			look_target: DVec3::ZERO,
			fov_y_degrees: 50.0,
			near: 0.1,
			far: 200.0,
			focus_distance: 3.0,
			focus_duration_ms: 800.0,
			reset_duration_ms: 600.0,
			min_duration_ms: 16.0,
			rest_epsilon: 1e-3,
			min_distance: 4.0,
			max_distance: 60.0,
			orbit_sensitivity: 0.005,
			max_pitch: FRAC_PI_2 - 0.05,
			spring: SpringConfig::default(),
		}
	}
}

#[derive(Clone, Debug)]
struct Spring {
	position: DVec3,
	velocity: DVec3,
	target: DVec3,
}

impl Spring {
	fn at_rest(position: DVec3) -> Self {
		Self {
			position,
			velocity: DVec3::ZERO,
			target: position,
		}
	}

	/// One semi-implicit Euler step.
	fn step(&mut self, h: f64, stiffness: f64, damping: f64, mass: f64) {
		let force = (self.target - self.position) * stiffness - self.velocity * damping;
		self.velocity += force / mass * h;
		self.position += self.velocity * h;
	}

	fn settled(&self, epsilon: f64) -> bool {
		self.position.distance(self.target) < epsilon && self.velocity.length() < epsilon
	}

	fn snap(&mut self) {
		self.position = self.target;
		self.velocity = DVec3::ZERO;
	}

	fn halt(&mut self) {
		self.target = self.position;
		self.velocity = DVec3::ZERO;
	}
}

/// What the rig is doing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraMotion {
	/// At rest.
	Idle,
	/// Springing towards these destinations.
	Animating {
		/// Destination eye position.
		eye: DVec3,
		/// Destination look point.
		look: DVec3,
	},
}

/// Spring-driven camera controller.
#[derive(Clone, Debug)]
pub struct CameraRig {
	config: CameraConfig,
	home_eye: DVec3,
	eye: Spring,
	look: Spring,
	omega: f64,
	motion: CameraMotion,
}

impl CameraRig {
	/// Rig resting at the home position for the viewport class.
	pub fn new(config: CameraConfig, mobile: bool) -> Self {
		let home_eye = if mobile {
			config.mobile_home_eye
		} else {
			config.home_eye
		};
		let look = config.look_target;
		Self {
			config,
			home_eye,
			eye: Spring::at_rest(home_eye),
			look: Spring::at_rest(look),
			omega: 0.0,
			motion: CameraMotion::Idle,
		}
	}

	/// Animates towards a point `distance` beyond `point`, on the ray from the
	/// fixed look target through `point`, and turns to look at `point`.
	pub fn focus_on(&mut self, point: DVec3, distance: f64, duration_ms: f64) {
		let anchor = self.config.look_target;
		let dir = (point - anchor)
			.try_normalize()
			.or_else(|| (self.home_eye - anchor).try_normalize())
			.unwrap_or(DVec3::Z);
		let eye = point + dir * distance;
		debug!("camera: focus on {point:?} from {eye:?} over {duration_ms}ms");
		self.animate_to(eye, point, duration_ms);
	}

	/// Animates back to the home position, looking at the look target.
	pub fn reset(&mut self, duration_ms: f64) {
		debug!("camera: reset over {duration_ms}ms");
		self.animate_to(self.home_eye, self.config.look_target, duration_ms);
	}

	/// [`CameraRig::focus_on`] with the configured distance and duration.
	pub fn focus_default(&mut self, point: DVec3) {
		self.focus_on(point, self.config.focus_distance, self.config.focus_duration_ms);
	}

	/// [`CameraRig::reset`] with the configured duration.
	pub fn reset_default(&mut self) {
		self.reset(self.config.reset_duration_ms);
	}

	fn animate_to(&mut self, eye: DVec3, look: DVec3, duration_ms: f64) {
		self.eye.target = eye;
		self.look.target = look;

		// Also catches NaN.
		if !(duration_ms > 0.0) {
			self.eye.snap();
			self.look.snap();
			self.motion = CameraMotion::Idle;
			return;
		}

		let seconds = duration_ms.max(self.config.min_duration_ms) / 1000.0;
		self.omega = self.config.spring.settle_periods / seconds;
		self.motion = CameraMotion::Animating { eye, look };
	}

	/// Advances the springs by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		if self.motion == CameraMotion::Idle || !(dt > 0.0) {
			return;
		}

		let SpringConfig {
			mass,
			damping_ratio,
			..
		} = self.config.spring;
		let mass = mass.max(1e-6);
		let stiffness = mass * self.omega * self.omega;
		let damping = 2.0 * damping_ratio * mass * self.omega;

		// Keep ω·h small for a stable explicit integration.
		let substeps = ((dt * self.omega) / 0.25).ceil().clamp(1.0, 256.0);
		let h = dt / substeps;
		for _ in 0..substeps as usize {
			self.eye.step(h, stiffness, damping, mass);
			self.look.step(h, stiffness, damping, mass);
		}

		let eps = self.config.rest_epsilon;
		if self.eye.settled(eps) && self.look.settled(eps) {
			self.eye.snap();
			self.look.snap();
			self.motion = CameraMotion::Idle;
		}
	}

	/// Rotates the eye around the look point; stops any animation.
	pub fn orbit(&mut self, dx_px: f64, dy_px: f64) {
		let offset = self.eye.position - self.look.position;
		let radius = offset.length();
		if radius < 1e-9 {
			return;
		}
		let yaw = offset.x.atan2(offset.z) - dx_px * self.config.orbit_sensitivity;
		let pitch = ((offset.y / radius).clamp(-1.0, 1.0).asin()
			+ dy_px * self.config.orbit_sensitivity)
			.clamp(-self.config.max_pitch, self.config.max_pitch);
		let (sin_yaw, cos_yaw) = yaw.sin_cos();
		let (sin_pitch, cos_pitch) = pitch.sin_cos();
		let offset = DVec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch) * radius;
		self.eye.position = self.look.position + offset;
		self.halt();
	}

	/// Scales the eye distance from the look point by `factor`; stops any animation.
	pub fn zoom(&mut self, factor: f64) {
		let offset = self.eye.position - self.look.position;
		let Some(dir) = offset.try_normalize() else {
			return;
		};
		let distance = (offset.length() * factor)
			.clamp(self.config.min_distance, self.config.max_distance);
		self.eye.position = self.look.position + dir * distance;
		self.halt();
	}

	fn halt(&mut self) {
		self.eye.halt();
		self.look.halt();
		self.motion = CameraMotion::Idle;
	}

	/// Current eye position.
	pub fn eye(&self) -> DVec3 {
		self.eye.position
	}

	/// Point the camera currently looks at.
	pub fn look_at(&self) -> DVec3 {
		self.look.position
	}

	/// Current state.
	pub fn motion(&self) -> CameraMotion {
		self.motion
	}

	/// Whether a spring animation is in flight.
	pub fn is_animating(&self) -> bool {
		matches!(self.motion, CameraMotion::Animating { .. })
	}

	/// Projection for the current pose.
	pub fn view(&self, viewport: &Viewport) -> CameraView {
		CameraView::new(
			self.eye.position,
			self.look.position,
			self.config.fov_y_degrees.to_radians(),
			self.config.near,
			self.config.far,
			viewport.width,
			viewport.height,
		)
	}
}

/// A world point mapped to the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	/// Canvas x in pixels.
	pub x: f64,
	/// Canvas y in pixels.
	pub y: f64,
	/// Distance along the view direction.
	pub depth: f64,
	/// Pixels per world unit at this depth.
	pub scale: f64,
}

/// Perspective projection for one frame.
#[derive(Clone, Debug)]
pub struct CameraView {
	view_proj: DMat4,
	width: f64,
	height: f64,
	near: f64,
	focal: f64,
}

impl CameraView {
	/// Builds a right-handed look-at perspective projection.
	pub fn new(
		eye: DVec3,
		target: DVec3,
		fov_y: f64,
		near: f64,
		far: f64,
		width: f64,
		height: f64,
	) -> Self {
		let target = if eye.distance_squared(target) < 1e-18 {
			eye - DVec3::Z
		} else {
			target
		};
		let forward = (target - eye).normalize();
		let up = if forward.cross(DVec3::Y).length_squared() < 1e-12 {
			DVec3::NEG_Z
		} else {
			DVec3::Y
		};
		let height = height.max(1.0);
		let width = width.max(1.0);
		let view = DMat4::look_at_rh(eye, target, up);
		let proj = DMat4::perspective_rh_gl(fov_y, width / height, near, far);
		Self {
			view_proj: proj * view,
			width,
			height,
			near,
			focal: height * 0.5 / (fov_y * 0.5).tan(),
		}
	}

	/// Projects `point`; `None` when it lies behind the near plane.
	pub fn project(&self, point: DVec3) -> Option<Projected> {
		let clip = self.view_proj * point.extend(1.0);
		if clip.w <= self.near {
			return None;
		}
		let ndc = clip.truncate() / clip.w;
		Some(Projected {
			x: (ndc.x * 0.5 + 0.5) * self.width,
			y: (0.5 - ndc.y * 0.5) * self.height,
			depth: clip.w,
			scale: self.focal / clip.w,
		})
	}
}

/// Capability handed to whoever may drive the camera.
///
/// Cloning shares the same rig. Calls made before the rig is attached, after
/// it is detached, or while the rig is borrowed by the frame loop are no-ops.
#[derive(Clone, Debug, Default)]
pub struct CameraHandle {
	rig: Rc<RefCell<Option<CameraRig>>>,
}

impl CameraHandle {
	/// A handle with no rig attached yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Installs the rig driven by a mounted view.
	pub fn attach(&self, rig: CameraRig) {
		if let Ok(mut slot) = self.rig.try_borrow_mut() {
			*slot = Some(rig);
		}
	}

	/// Removes the rig on teardown.
	pub fn detach(&self) -> Option<CameraRig> {
		self.rig.try_borrow_mut().ok().and_then(|mut slot| slot.take())
	}

	/// Whether a mounted view owns a rig.
	pub fn is_attached(&self) -> bool {
		self.rig.try_borrow().map(|slot| slot.is_some()).unwrap_or(false)
	}

	/// Runs `f` against the rig if one is attached and not busy.
	pub fn with_rig<R>(&self, f: impl FnOnce(&mut CameraRig) -> R) -> Option<R> {
		let mut slot = self.rig.try_borrow_mut().ok()?;
		slot.as_mut().map(f)
	}

	/// See [`CameraRig::focus_on`]. Returns whether a rig received the call.
	pub fn focus_on(&self, point: DVec3, distance: f64, duration_ms: f64) -> bool {
		self.with_rig(|rig| rig.focus_on(point, distance, duration_ms))
			.is_some()
	}

	/// See [`CameraRig::reset`]. Returns whether a rig received the call.
	pub fn reset(&self, duration_ms: f64) -> bool {
		self.with_rig(|rig| rig.reset(duration_ms)).is_some()
	}

	/// See [`CameraRig::reset_default`].
	pub fn reset_default(&self) -> bool {
		self.with_rig(CameraRig::reset_default).is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const FRAME: f64 = 1.0 / 60.0;

	fn run(rig: &mut CameraRig, seconds: f64) {
		let frames = (seconds / FRAME).ceil() as usize;
		for _ in 0..frames {
			rig.tick(FRAME);
		}
	}

	#[test]
	fn focus_settles_at_offset_point_and_looks_at_it() {
		let mut rig = CameraRig::new(CameraConfig::default(), false);
		let p = DVec3::new(12.0, 0.0, 0.0);
		rig.focus_on(p, 3.0, 800.0);
		assert!(rig.is_animating());
		run(&mut rig, 4.0);
		assert_eq!(rig.motion(), CameraMotion::Idle);
		assert!(rig.eye().distance(DVec3::new(15.0, 0.0, 0.0)) < 1e-9);
		assert!(rig.look_at().distance(p) < 1e-9);
	}

	#[test]
	fn critically_damped_focus_does_not_overshoot() {
		let mut rig = CameraRig::new(CameraConfig::default(), false);
		let start = rig.eye();
		let dest = DVec3::new(0.0, 0.0, -15.0);
		rig.focus_on(DVec3::new(0.0, 0.0, -12.0), 3.0, 800.0);
		let total = start.distance(dest);
		let axis = (dest - start) / total;
		for _ in 0..120 {
			rig.tick(FRAME);
			let travelled = (rig.eye() - start).dot(axis);
			assert!(travelled <= total + 1e-6, "overshoot: {travelled} > {total}");
		}
	}

	#[test]
	fn retargeting_mid_flight_lands_on_latest_target() {
		let mut rig = CameraRig::new(CameraConfig::default(), false);
		let p = DVec3::new(12.0, 0.0, 0.0);
		let q = DVec3::new(0.0, 0.0, -12.0);
		rig.focus_on(p, 3.0, 800.0);
		run(&mut rig, 0.1);
		rig.focus_on(q, 3.0, 800.0);
		assert_eq!(
			rig.motion(),
			CameraMotion::Animating {
				eye: DVec3::new(0.0, 0.0, -15.0),
				look: q
			}
		);
		run(&mut rig, 4.0);
		assert!(rig.eye().distance(DVec3::new(0.0, 0.0, -15.0)) < 1e-9);
		assert!(rig.look_at().distance(q) < 1e-9);
	}

	#[test]
	fn reset_returns_home() {
		let config = CameraConfig::default();
		let home = config.home_eye;
		let mut rig = CameraRig::new(config, false);
		rig.focus_on(DVec3::new(8.0, 0.0, 0.0), 3.0, 800.0);
		run(&mut rig, 0.3);
		rig.reset(600.0);
		run(&mut rig, 4.0);
		assert!(rig.eye().distance(home) < 1e-9);
		assert!(rig.look_at().distance(DVec3::ZERO) < 1e-9);
	}

	#[test]
	fn zero_duration_snaps_and_origin_focus_is_finite() {
		let mut rig = CameraRig::new(CameraConfig::default(), false);
		rig.focus_on(DVec3::ZERO, 3.0, 0.0);
		assert_eq!(rig.motion(), CameraMotion::Idle);
		assert!(rig.eye().is_finite());
		assert!((rig.eye().length() - 3.0).abs() < 1e-9);
	}

	#[test]
	fn orbit_and_zoom_keep_distance_rules_and_stop_animation() {
		let mut rig = CameraRig::new(CameraConfig::default(), false);
		let before = rig.eye().distance(rig.look_at());
		rig.focus_on(DVec3::X * 10.0, 3.0, 800.0);
		rig.orbit(120.0, -40.0);
		assert_eq!(rig.motion(), CameraMotion::Idle);
		let after = rig.eye().distance(rig.look_at());
		assert!(after > 0.0);

		rig.zoom(1000.0);
		assert!((rig.eye().distance(rig.look_at()) - 60.0).abs() < 1e-9);
		rig.zoom(0.0001);
		assert!((rig.eye().distance(rig.look_at()) - 4.0).abs() < 1e-9);
		assert!(before > 0.0);
	}

	#[test]
	fn handle_is_a_noop_without_a_rig() {
		let handle = CameraHandle::new();
		assert!(!handle.focus_on(DVec3::X, 3.0, 800.0));
		assert!(!handle.reset(600.0));

		handle.attach(CameraRig::new(CameraConfig::default(), false));
		assert!(handle.is_attached());
		assert!(handle.clone().focus_on(DVec3::X * 8.0, 3.0, 800.0));
		assert_eq!(handle.with_rig(|rig| rig.is_animating()), Some(true));

		assert!(handle.detach().is_some());
		assert!(!handle.is_attached());
		assert!(!handle.focus_on(DVec3::X, 3.0, 800.0));
	}

	#[test]
	fn projection_centers_look_target_and_culls_behind() {
		let view = CameraView::new(
			DVec3::new(0.0, 0.0, 10.0),
			DVec3::ZERO,
			50f64.to_radians(),
			0.1,
			100.0,
			800.0,
			600.0,
		);
		let center = view.project(DVec3::ZERO).unwrap();
		assert!((center.x - 400.0).abs() < 1e-9);
		assert!((center.y - 300.0).abs() < 1e-9);
		assert!((center.depth - 10.0).abs() < 1e-9);

		let above = view.project(DVec3::Y).unwrap();
		assert!(above.y < center.y);
		assert!((300.0 - above.y - center.scale).abs() < 1e-6);

		assert!(view.project(DVec3::new(0.0, 0.0, 20.0)).is_none());
	}

	#[test]
	fn top_down_view_is_well_defined() {
		let view = CameraView::new(
			DVec3::new(0.0, 10.0, 0.0),
			DVec3::ZERO,
			1.0,
			0.1,
			100.0,
			400.0,
			400.0,
		);
		let p = view.project(DVec3::ZERO).unwrap();
		assert!(p.x.is_finite() && p.y.is_finite());
	}
}
