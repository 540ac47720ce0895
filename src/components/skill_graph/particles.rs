//! Ambient particle field for background atmosphere.
//!
//! Points are sampled once when the field is created and never reallocated;
//! per frame only the rotation angle around the vertical axis changes.

use glam::{DQuat, DVec3};

use super::theme::ParticleStyle;

/// A fixed cloud of points slowly spinning around the y axis.
pub struct ParticleField {
	points: Vec<DVec3>,
	spin_rate: f64,
	angle: f64,
}

impl ParticleField {
	/// Samples `count` points uniformly inside the style's bounds.
	///
	/// `sample` must yield values in `[0, 1)`; the component passes
	/// `Math.random`, tests pass a deterministic sequence.
	pub fn new(count: usize, style: &ParticleStyle, mut sample: impl FnMut() -> f64) -> Self {
		let (hx, hy, hz) = style.bounds;
		let mut points = Vec::with_capacity(count);
		for _ in 0..count {
			let x = (sample() - 0.5) * 2.0 * hx;
			let y = (sample() - 0.5) * 2.0 * hy;
			let z = (sample() - 0.5) * 2.0 * hz;
			points.push(DVec3::new(x, y, z));
		}
		Self {
			points,
			spin_rate: style.spin_rate,
			angle: 0.0,
		}
	}

	/// Sets the rotation from total elapsed time in seconds.
	pub fn update(&mut self, elapsed: f64) {
		self.angle = elapsed * self.spin_rate;
	}

	/// Current rotation around the y axis, radians.
	pub fn angle(&self) -> f64 {
		self.angle
	}

	/// Number of points.
	pub fn len(&self) -> usize {
		self.points.len()
	}

	/// Whether the field is empty.
	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	/// Points in their mount-time (unrotated) positions.
	pub fn local_points(&self) -> &[DVec3] {
		&self.points
	}

	/// Points with the current rotation applied.
	pub fn world_points(&self) -> impl Iterator<Item = DVec3> + '_ {
		let rotation = DQuat::from_rotation_y(self.angle);
		self.points.iter().map(move |&p| rotation * p)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::skill_graph::theme::Theme;

	/// Linear congruential sequence in `[0, 1)`.
	fn lcg(seed: u64) -> impl FnMut() -> f64 {
		let mut state = seed;
		move || {
			state = state
				.wrapping_mul(6364136223846793005)
				.wrapping_add(1442695040888963407);
			(state >> 11) as f64 / (1u64 << 53) as f64
		}
	}

	#[test]
	fn points_stay_inside_bounds() {
		let style = Theme::gold().particles;
		let field = ParticleField::new(500, &style, lcg(7));
		assert_eq!(field.len(), 500);
		for p in field.local_points() {
			assert!(p.x.abs() <= 40.0 && p.y.abs() <= 20.0 && p.z.abs() <= 40.0);
		}
	}

	#[test]
	fn update_rotates_without_touching_the_buffer() {
		let style = Theme::gold().particles;
		let mut field = ParticleField::new(64, &style, lcg(3));
		let before: Vec<DVec3> = field.local_points().to_vec();
		let ptr = field.local_points().as_ptr();

		field.update(100.0);
		assert!((field.angle() - 1.0).abs() < 1e-12);
		assert_eq!(field.local_points(), before.as_slice());
		assert_eq!(field.local_points().as_ptr(), ptr);

		for (world, local) in field.world_points().zip(&before) {
			assert!((world.y - local.y).abs() < 1e-9);
			assert!((world.length() - local.length()).abs() < 1e-9);
		}
	}

	#[test]
	fn empty_field_is_fine() {
		let style = Theme::gold().particles;
		let mut field = ParticleField::new(0, &style, lcg(1));
		field.update(5.0);
		assert!(field.is_empty());
		assert_eq!(field.world_points().count(), 0);
	}
}
