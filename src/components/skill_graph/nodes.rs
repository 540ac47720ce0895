//! Hub, category and leaf nodes as one closed set of graph node variants.
//!
//! Each variant carries its position and label; the visual parameters
//! (radius, opacity, emissive intensity, label offset) are derived from the
//! interaction flags the orchestrator passes in.

use glam::DVec3;

use super::selection::LeafRef;

/// Which part of the hierarchy a node belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	/// The central hub.
	Hub,
	/// A category by index.
	Category(usize),
	/// A leaf skill.
	Leaf(LeafRef),
}

/// One spherical shell of the hub.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shell {
	/// Radius in world units.
	pub radius: f64,
	/// Material opacity.
	pub opacity: f64,
}

/// The always-visible root node: wireframe, metallic core and additive glow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HubNode {
	/// Outer depth-cue wireframe.
	pub wireframe: Shell,
	/// Solid metallic core.
	pub core: Shell,
	/// Translucent glow layered just outside the core.
	pub glow: Shell,
}

impl HubNode {
	/// Shell sizes for the viewport class.
	pub fn new(mobile: bool) -> Self {
		let (wire, core, glow) = if mobile { (1.6, 1.2, 1.3) } else { (2.6, 2.0, 2.1) };
		Self {
			wireframe: Shell {
				radius: wire,
				opacity: 0.06,
			},
			core: Shell {
				radius: core,
				opacity: 1.0,
			},
			glow: Shell {
				radius: glow,
				opacity: 0.12,
			},
		}
	}

	/// Radius used for hit testing.
	pub fn hit_radius(&self) -> f64 {
		self.core.radius
	}
}

/// Derived appearance of a category node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryVisual {
	/// Sphere radius.
	pub radius: f64,
	/// Material opacity.
	pub opacity: f64,
	/// Emissive intensity.
	pub emissive: f64,
	/// Height of the label above the node center.
	pub label_offset: f64,
}

/// Gap kept between an emphasised category sphere and its leaves' hit discs.
const LEAF_GAP: f64 = 0.05;

impl CategoryVisual {
	/// Emphasis when selected or hovered wins over dimming.
	pub fn new(selected: bool, hovered: bool, dimmed: bool, mobile: bool) -> Self {
		let base = if mobile { 1.4 } else { 2.2 };
		if selected || hovered {
			let radius = base * 1.15;
			Self {
				radius,
				opacity: 0.95,
				emissive: 1.2,
				label_offset: radius + 0.6,
			}
		} else if dimmed {
			Self {
				radius: base,
				opacity: 0.25,
				emissive: 0.05,
				label_offset: base + 1.1,
			}
		} else {
			Self {
				radius: base,
				opacity: 0.6,
				emissive: 0.35,
				label_offset: base + 0.6,
			}
		}
	}
}

/// Smallest leaf ring radius that keeps every leaf's hit disc outside its
/// open parent category.
pub fn leaf_clearance(mobile: bool) -> f64 {
	CategoryVisual::new(true, false, false, mobile).radius
		+ LeafVisual::new(true).hit_radius()
		+ LEAF_GAP
}

/// Derived appearance of a leaf node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafVisual {
	/// Sphere radius.
	pub radius: f64,
	/// Emissive intensity.
	pub emissive: f64,
}

impl LeafVisual {
	/// Hovered leaves grow slightly and brighten.
	pub fn new(hovered: bool) -> Self {
		if hovered {
			Self {
				radius: 0.28 * 1.08,
				emissive: 1.2,
			}
		} else {
			Self {
				radius: 0.28,
				emissive: 0.6,
			}
		}
	}

	/// Leaves are tiny; picking uses a more forgiving disc.
	pub fn hit_radius(&self) -> f64 {
		self.radius * 2.0
	}
}

/// Per-variant payload of a [`GraphNode`].
#[derive(Clone, Debug, PartialEq)]
pub enum NodeShape {
	/// Hub shells.
	Hub(HubNode),
	/// Category sphere with its color token.
	Category {
		/// Appearance.
		visual: CategoryVisual,
		/// CSS color token from the dataset.
		color: String,
	},
	/// Leaf sphere with its info panel text.
	Leaf {
		/// Appearance.
		visual: LeafVisual,
		/// Info panel body.
		description: String,
	},
}

/// A renderable node: position, label and variant-specific shape.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Identity within the hierarchy.
	pub kind: NodeKind,
	/// World-space center.
	pub position: DVec3,
	/// Display label.
	pub label: String,
	/// Variant payload.
	pub shape: NodeShape,
}

impl GraphNode {
	/// Radius used for picking.
	pub fn hit_radius(&self) -> f64 {
		match &self.shape {
			NodeShape::Hub(hub) => hub.hit_radius(),
			NodeShape::Category { visual, .. } => visual.radius,
			NodeShape::Leaf { visual, .. } => visual.hit_radius(),
		}
	}
}
