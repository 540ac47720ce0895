//! Connection edges drawn as thin oriented cylinders.

use glam::{DMat4, DQuat, DVec3};

/// Emissive intensity of an idle edge.
pub const IDLE_INTENSITY: f64 = 0.2;
/// Emissive floor of an active edge.
pub const ACTIVE_BASE_INTENSITY: f64 = 0.8;
/// Pulse amplitude added on top of [`ACTIVE_BASE_INTENSITY`].
pub const ACTIVE_PULSE_AMPLITUDE: f64 = 0.6;
/// Angular speed of the pulse (radians per second, before `abs`).
pub const PULSE_SPEED: f64 = 4.0;

/// A directed edge between two world-space points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectionEdge {
	/// Tail of the edge.
	pub start: DVec3,
	/// Head of the edge.
	pub end: DVec3,
	/// Whether the edge pulses.
	pub active: bool,
}

impl ConnectionEdge {
	/// Edge from `start` to `end`.
	pub fn new(start: DVec3, end: DVec3, active: bool) -> Self {
		Self { start, end, active }
	}

	/// Center of the cylinder.
	pub fn midpoint(&self) -> DVec3 {
		self.start.lerp(self.end, 0.5)
	}

	/// Cylinder length, `|end - start|`.
	pub fn length(&self) -> f64 {
		self.start.distance(self.end)
	}

	/// Rotation taking the unit cylinder's long axis (+Y) onto `end - start`.
	/// Degenerate edges keep the identity rotation.
	pub fn orientation(&self) -> DQuat {
		match (self.end - self.start).try_normalize() {
			Some(dir) => DQuat::from_rotation_arc(DVec3::Y, dir),
			None => DQuat::IDENTITY,
		}
	}

	/// Model matrix for a unit-height cylinder centered on the origin.
	pub fn transform(&self) -> DMat4 {
		DMat4::from_scale_rotation_translation(
			DVec3::new(1.0, self.length(), 1.0),
			self.orientation(),
			self.midpoint(),
		)
	}

	/// Emissive intensity at elapsed time `t` (seconds).
	pub fn emissive_intensity(&self, t: f64) -> f64 {
		if self.active {
			ACTIVE_BASE_INTENSITY + (t * PULSE_SPEED).sin().abs() * ACTIVE_PULSE_AMPLITUDE
		} else {
			IDLE_INTENSITY
		}
	}

	/// Both cylinder caps recovered from [`ConnectionEdge::transform`].
	pub fn caps(&self) -> (DVec3, DVec3) {
		let m = self.transform();
		(
			m.transform_point3(DVec3::new(0.0, -0.5, 0.0)),
			m.transform_point3(DVec3::new(0.0, 0.5, 0.0)),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const EPS: f64 = 1e-9;

	#[test]
	fn orientation_aligns_axis_with_direction() {
		let cases = [
			(DVec3::ZERO, DVec3::new(12.0, 0.0, 0.0)),
			(DVec3::new(1.0, 2.0, 3.0), DVec3::new(-4.0, 0.5, 7.0)),
			(DVec3::ZERO, DVec3::new(0.0, -5.0, 0.0)),
			(DVec3::ZERO, DVec3::new(0.0, 3.0, 0.0)),
		];
		for (start, end) in cases {
			let edge = ConnectionEdge::new(start, end, false);
			let axis = edge.orientation() * DVec3::Y;
			let dir = (end - start).normalize();
			assert!(axis.distance(dir) < 1e-9, "{axis:?} vs {dir:?}");
			assert!((edge.length() - start.distance(end)).abs() < EPS);
			assert!(edge.midpoint().distance((start + end) / 2.0) < EPS);
		}
	}

	#[test]
	fn caps_land_on_endpoints() {
		let edge = ConnectionEdge::new(DVec3::new(0.0, 1.0, 0.0), DVec3::new(3.0, -2.0, 4.0), true);
		let (a, b) = edge.caps();
		assert!(a.distance(edge.start) < 1e-9);
		assert!(b.distance(edge.end) < 1e-9);
	}

	#[test]
	fn degenerate_edge_is_harmless() {
		let edge = ConnectionEdge::new(DVec3::ONE, DVec3::ONE, true);
		assert_eq!(edge.length(), 0.0);
		assert_eq!(edge.orientation(), DQuat::IDENTITY);
		assert!(edge.transform().is_finite());
	}

	#[test]
	fn active_edges_pulse_within_bounds_idle_edges_hold() {
		let active = ConnectionEdge::new(DVec3::ZERO, DVec3::X, true);
		let idle = ConnectionEdge { active: false, ..active };
		for step in 0..200 {
			let t = step as f64 * 0.013;
			let i = active.emissive_intensity(t);
			assert!((0.8 - EPS..=1.4 + EPS).contains(&i));
			assert_eq!(idle.emissive_intensity(t), IDLE_INTENSITY);
		}
		assert!((active.emissive_intensity(0.0) - 0.8).abs() < EPS);
		let peak = std::f64::consts::FRAC_PI_2 / PULSE_SPEED;
		assert!((active.emissive_intensity(peak) - 1.4).abs() < EPS);
	}
}
