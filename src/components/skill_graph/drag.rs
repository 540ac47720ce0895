//! Pointer drag tracking for camera orbit.

/// Travel in pixels after which a press becomes an orbit drag.
pub const DRAG_THRESHOLD: f64 = 4.0;

/// Tracks an in-progress orbit drag.
///
/// A press that travels less than [`DRAG_THRESHOLD`] before release stays a
/// click; once the threshold is crossed the following `click` is swallowed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
	/// A pointer is pressed on the canvas.
	pub active: bool,
	/// Press position.
	pub start_x: f64,
	/// Press position.
	pub start_y: f64,
	/// Position of the previous move.
	pub last_x: f64,
	/// Position of the previous move.
	pub last_y: f64,
	/// The press travelled past the threshold.
	pub dragged: bool,
}

impl DragState {
	/// Pointer pressed at `(x, y)`.
	pub fn press(&mut self, x: f64, y: f64) {
		*self = Self {
			active: true,
			start_x: x,
			start_y: y,
			last_x: x,
			last_y: y,
			dragged: false,
		};
	}

	/// Pointer moved to `(x, y)`. Returns the delta to orbit by once the
	/// press has become a drag.
	pub fn motion(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
		if !self.active {
			return None;
		}
		let (dx, dy) = (x - self.last_x, y - self.last_y);
		self.last_x = x;
		self.last_y = y;
		if !self.dragged {
			let (tx, ty) = (x - self.start_x, y - self.start_y);
			if tx * tx + ty * ty < DRAG_THRESHOLD * DRAG_THRESHOLD {
				return None;
			}
			self.dragged = true;
		}
		Some((dx, dy))
	}

	/// Pointer released. The drag flag survives until the click is consumed.
	pub fn release(&mut self) {
		self.active = false;
	}

	/// Pointer left or was cancelled.
	pub fn cancel(&mut self) {
		*self = Self::default();
	}

	/// Consumes the click that ends a press. Returns `false` when the press
	/// was a drag and the click must be ignored.
	pub fn take_click(&mut self) -> bool {
		let was_drag = self.dragged;
		self.dragged = false;
		!was_drag
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn small_jitter_stays_a_click() {
		let mut drag = DragState::default();
		drag.press(100.0, 100.0);
		assert_eq!(drag.motion(101.0, 102.0), None);
		drag.release();
		assert!(drag.take_click());
	}

	#[test]
	fn crossing_the_threshold_orbits_and_swallows_the_click() {
		let mut drag = DragState::default();
		drag.press(100.0, 100.0);
		assert_eq!(drag.motion(102.0, 100.0), None);
		assert_eq!(drag.motion(110.0, 100.0), Some((8.0, 0.0)));
		assert_eq!(drag.motion(110.0, 95.0), Some((0.0, -5.0)));
		drag.release();
		assert_eq!(drag.motion(200.0, 200.0), None);
		assert!(!drag.take_click());
		// The next click is a fresh one.
		assert!(drag.take_click());
	}

	#[test]
	fn cancel_forgets_everything() {
		let mut drag = DragState::default();
		drag.press(0.0, 0.0);
		drag.motion(50.0, 0.0);
		drag.cancel();
		assert_eq!(drag, DragState::default());
		assert!(drag.take_click());
	}
}
