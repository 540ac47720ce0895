//! Deterministic radial placement of category and leaf nodes.
//!
//! Categories sit on a ring around the hub whose radius follows the viewport
//! width; leaves sit on a smaller ring around their parent category. Both rings
//! use the same even angular spacing: node `i` of `n` is placed at
//! `θ = i / n · 2π`, measured in the horizontal (x, z) plane.

use std::f64::consts::TAU;

use glam::DVec3;

/// Tuning constants for the responsive layout.
#[derive(Clone, Debug)]
pub struct LayoutConfig {
	/// Viewport width (px) per world unit of category radius.
	pub radius_divisor: f64,
	/// Category ring radius bounds on wide viewports.
	pub min_radius: f64,
	/// See [`LayoutConfig::min_radius`].
	pub max_radius: f64,
	/// Multiplier applied to the width-derived radius on mobile viewports.
	pub mobile_radius_factor: f64,
	/// Category ring radius bounds on mobile viewports.
	pub mobile_min_radius: f64,
	/// See [`LayoutConfig::mobile_min_radius`].
	pub mobile_max_radius: f64,
	/// Viewports narrower than this (px) are treated as mobile.
	pub mobile_breakpoint: f64,
	/// Vertical offset of ring nodes as a fraction of the ring radius
	/// (`y = sin θ · r · tilt`). Zero keeps every node in the y = 0 plane.
	pub vertical_tilt: f64,
	/// Leaf ring radius around a category opened by click.
	pub leaf_radius_open: f64,
	/// Leaf ring radius around a category that is only hovered. The scene
	/// never places leaves closer than the emphasised category sphere plus a
	/// leaf hit disc, whatever this is set to.
	pub leaf_radius_hovered: f64,
	/// Mobile counterpart of [`LayoutConfig::leaf_radius_open`].
	pub mobile_leaf_radius_open: f64,
	/// Mobile counterpart of [`LayoutConfig::leaf_radius_hovered`].
	pub mobile_leaf_radius_hovered: f64,
	/// Vertical drop applied to every odd leaf, staggering neighbouring labels.
	pub leaf_stagger: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			radius_divisor: 90.0,
			min_radius: 8.0,
			max_radius: 12.0,
			mobile_radius_factor: 0.6,
			mobile_min_radius: 4.0,
			mobile_max_radius: 7.2,
			mobile_breakpoint: 768.0,
			vertical_tilt: 0.0,
			leaf_radius_open: 3.6,
			leaf_radius_hovered: 3.2,
			mobile_leaf_radius_open: 2.6,
			mobile_leaf_radius_hovered: 2.3,
			leaf_stagger: 0.0,
		}
	}
}

/// Size of the drawing surface plus the host page's mobile classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
	/// Whether the page considers this a mobile viewport.
	pub mobile: bool,
}

impl Viewport {
	/// Classifies the viewport as mobile using the configured breakpoint.
	pub fn new(width: f64, height: f64, config: &LayoutConfig) -> Self {
		Self {
			width,
			height,
			mobile: width < config.mobile_breakpoint,
		}
	}

	/// Replaces the breakpoint classification with the host page's own, when
	/// it has one.
	pub fn with_mobile(self, mobile: Option<bool>) -> Self {
		Self {
			mobile: mobile.unwrap_or(self.mobile),
			..self
		}
	}
}

/// How far a category's leaves fan out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeafSpread {
	/// The category is selected by click.
	Open,
	/// The category is only hovered.
	Hovered,
}

/// Category ring radius for a viewport: `clamp(width / divisor, min, max)`,
/// with the mobile factor and bounds applied on mobile viewports.
pub fn category_radius(viewport: &Viewport, config: &LayoutConfig) -> f64 {
	let spread = (viewport.width / config.radius_divisor).max(0.0);
	if viewport.mobile {
		(spread * config.mobile_radius_factor)
			.clamp(config.mobile_min_radius, config.mobile_max_radius)
	} else {
		spread.clamp(config.min_radius, config.max_radius)
	}
}

/// Evenly spaced points on a horizontal ring around `center`.
///
/// Returns an empty vector for `count == 0`.
pub fn ring_positions(center: DVec3, count: usize, radius: f64, tilt: f64) -> Vec<DVec3> {
	(0..count)
		.map(|i| {
			let angle = (i as f64 / count as f64) * TAU;
			let (sin, cos) = angle.sin_cos();
			center + DVec3::new(cos * radius, sin * radius * tilt, sin * radius)
		})
		.collect()
}

/// Category positions around the hub at the origin.
pub fn compute_positions(
	category_count: usize,
	viewport: &Viewport,
	config: &LayoutConfig,
) -> Vec<DVec3> {
	let radius = category_radius(viewport, config);
	ring_positions(DVec3::ZERO, category_count, radius, config.vertical_tilt)
}

/// Leaf ring radius for a category in the given spread state.
pub fn leaf_radius(spread: LeafSpread, mobile: bool, config: &LayoutConfig) -> f64 {
	match (spread, mobile) {
		(LeafSpread::Open, false) => config.leaf_radius_open,
		(LeafSpread::Hovered, false) => config.leaf_radius_hovered,
		(LeafSpread::Open, true) => config.mobile_leaf_radius_open,
		(LeafSpread::Hovered, true) => config.mobile_leaf_radius_hovered,
	}
}

/// Leaf positions on a ring of `radius` around a category at `parent`.
pub fn leaf_positions(
	parent: DVec3,
	skill_count: usize,
	radius: f64,
	config: &LayoutConfig,
) -> Vec<DVec3> {
	let mut positions = ring_positions(parent, skill_count, radius, 0.0);
	if config.leaf_stagger != 0.0 {
		for (i, p) in positions.iter_mut().enumerate() {
			p.y -= (i % 2) as f64 * config.leaf_stagger;
		}
	}
	positions
}
