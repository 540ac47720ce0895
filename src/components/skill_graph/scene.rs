//! Graph orchestration: positions, interaction state, node and edge lists.
//!
//! [`GraphLayout`] owns the dataset, the current viewport and the single
//! [`InteractionState`]. Every mutation that changes what is visible rebuilds
//! the node and edge lists in place (reusing their buffers), so the render
//! loop only ever reads them.

use glam::DVec3;
use log::debug;

use super::camera::CameraView;
use super::edge::ConnectionEdge;
use super::layout::{
	LayoutConfig, LeafSpread, Viewport, compute_positions, leaf_positions, leaf_radius,
};
use super::nodes::{
	CategoryVisual, GraphNode, HubNode, LeafVisual, NodeKind, NodeShape, leaf_clearance,
};
use super::selection::{InteractionState, LeafRef, SelectionState};
use super::types::SkillCategory;

/// What a click or reset did to the selection, for the camera and the
/// selection callback to follow.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionChange {
	/// A category is now selected.
	Focused {
		/// Category name.
		name: String,
		/// Category center.
		position: DVec3,
	},
	/// The previous selection was cleared.
	Cleared,
	/// Selection is as it was.
	Unchanged,
}

/// The hub → category → leaf composition.
pub struct GraphLayout {
	categories: Vec<SkillCategory>,
	config: LayoutConfig,
	viewport: Viewport,
	category_positions: Vec<DVec3>,
	interaction: InteractionState,
	nodes: Vec<GraphNode>,
	edges: Vec<ConnectionEdge>,
}

impl GraphLayout {
	/// Lays out `categories` for `viewport` with nothing selected or hovered.
	pub fn new(categories: Vec<SkillCategory>, viewport: Viewport, config: LayoutConfig) -> Self {
		let category_positions = compute_positions(categories.len(), &viewport, &config);
		let mut layout = Self {
			categories,
			config,
			viewport,
			category_positions,
			interaction: InteractionState::default(),
			nodes: Vec::new(),
			edges: Vec::new(),
		};
		layout.rebuild();
		layout
	}

	/// Recomputes positions for a new viewport. Returns the selected
	/// category's new center when positions changed, so the camera can follow.
	pub fn resize(&mut self, viewport: Viewport) -> Option<DVec3> {
		if viewport == self.viewport {
			return None;
		}
		self.viewport = viewport;
		self.category_positions =
			compute_positions(self.categories.len(), &self.viewport, &self.config);
		self.rebuild();
		self.selected_position()
	}

	/// The dataset.
	pub fn categories(&self) -> &[SkillCategory] {
		&self.categories
	}

	/// The viewport positions were computed for.
	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	/// Current selection and hover flags.
	pub fn interaction(&self) -> &InteractionState {
		&self.interaction
	}

	/// Category centers, index-aligned with [`GraphLayout::categories`].
	pub fn category_positions(&self) -> &[DVec3] {
		&self.category_positions
	}

	/// Click on a category. Out-of-range indices leave the state untouched.
	pub fn toggle_category(&mut self, index: usize) -> SelectionState {
		if index >= self.categories.len() {
			return self.interaction.selection();
		}
		let selection = self.interaction.toggle_category(index);
		debug!("skill-graph: selection -> {selection:?}");
		self.rebuild();
		selection
	}

	/// Click on the hub or on empty space.
	pub fn clear_selection(&mut self) -> bool {
		let changed = self.interaction.clear_selection();
		if changed {
			debug!("skill-graph: selection cleared");
			self.rebuild();
		}
		changed
	}

	/// Applies a click on `hit`: categories toggle, the hub and empty space
	/// clear the selection, leaves do nothing.
	pub fn click(&mut self, hit: Option<NodeKind>) -> SelectionChange {
		match hit {
			Some(NodeKind::Category(i)) if i < self.categories.len() => {
				match self.toggle_category(i) {
					SelectionState::CategorySelected(_) => self.focused(),
					SelectionState::NoneSelected => SelectionChange::Cleared,
				}
			}
			Some(NodeKind::Category(_)) | Some(NodeKind::Leaf(_)) => SelectionChange::Unchanged,
			Some(NodeKind::Hub) | None => self.reset_selection(),
		}
	}

	/// Clears the selection, reporting whether there was one.
	pub fn reset_selection(&mut self) -> SelectionChange {
		if self.clear_selection() {
			SelectionChange::Cleared
		} else {
			SelectionChange::Unchanged
		}
	}

	fn focused(&self) -> SelectionChange {
		match (self.selected_category_name(), self.selected_position()) {
			(Some(name), Some(position)) => SelectionChange::Focused {
				name: name.to_string(),
				position,
			},
			_ => SelectionChange::Unchanged,
		}
	}

	/// Pointer enter/leave on a category.
	pub fn set_category_hover(&mut self, index: usize, hovered: bool) -> bool {
		let changed = self.interaction.set_category_hover(index, hovered);
		if changed {
			self.rebuild();
		}
		changed
	}

	/// Pointer enter/leave on a leaf.
	pub fn set_leaf_hover(&mut self, leaf: LeafRef, hovered: bool) -> bool {
		let changed = self.interaction.set_leaf_hover(leaf, hovered);
		if changed {
			self.rebuild();
		}
		changed
	}

	/// Pointer left the surface or was cancelled.
	pub fn clear_hover(&mut self) -> bool {
		let changed = self.interaction.clear_hover();
		if changed {
			self.rebuild();
		}
		changed
	}

	/// Moves hover to whatever node is now under the pointer, emitting the
	/// leave for the previous node and the enter for the new one. Hovering a
	/// leaf keeps its parent category hovered so the leaf stays visible.
	pub fn hover_node(&mut self, node: Option<NodeKind>) -> bool {
		let (category, leaf) = match node {
			Some(NodeKind::Category(i)) => (Some(i), None),
			Some(NodeKind::Leaf(leaf)) => (Some(leaf.category), Some(leaf)),
			Some(NodeKind::Hub) | None => (None, None),
		};

		let mut changed = false;
		if let Some(previous) = self.interaction.hovered_category() {
			if Some(previous) != category {
				changed |= self.interaction.set_category_hover(previous, false);
			}
		}
		if let Some(i) = category {
			changed |= self.interaction.set_category_hover(i, true);
		}
		if let Some(previous) = self.interaction.hovered_leaf() {
			if Some(previous) != leaf {
				changed |= self.interaction.set_leaf_hover(previous, false);
			}
		}
		if let Some(l) = leaf {
			changed |= self.interaction.set_leaf_hover(l, true);
		}

		if changed {
			self.rebuild();
		}
		changed
	}

	/// Name of the selected category.
	pub fn selected_category_name(&self) -> Option<&str> {
		self.interaction
			.selection()
			.selected()
			.and_then(|i| self.categories.get(i))
			.map(|c| c.name.as_str())
	}

	/// Center of the selected category.
	pub fn selected_position(&self) -> Option<DVec3> {
		self.interaction
			.selection()
			.selected()
			.and_then(|i| self.category_positions.get(i).copied())
	}

	/// Leaf positions of `index` for its current spread (open vs hovered).
	/// The ring never comes closer than the emphasised parent sphere plus a
	/// leaf hit disc, so every leaf stays clickable.
	pub fn leaf_positions(&self, index: usize) -> Vec<DVec3> {
		let (Some(category), Some(&center)) =
			(self.categories.get(index), self.category_positions.get(index))
		else {
			return Vec::new();
		};
		let spread = if self.interaction.is_selected(index) {
			LeafSpread::Open
		} else {
			LeafSpread::Hovered
		};
		let mobile = self.viewport.mobile;
		let radius = leaf_radius(spread, mobile, &self.config).max(leaf_clearance(mobile));
		leaf_positions(center, category.skills.len(), radius, &self.config)
	}

	/// Hub, every category, and the leaves of open categories.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// Hub edges for every category plus leaf edges of open categories.
	pub fn edges(&self) -> &[ConnectionEdge] {
		&self.edges
	}

	fn rebuild(&mut self) {
		let mobile = self.viewport.mobile;
		let mut nodes = std::mem::take(&mut self.nodes);
		let mut edges = std::mem::take(&mut self.edges);
		nodes.clear();
		edges.clear();

		nodes.push(GraphNode {
			kind: NodeKind::Hub,
			position: DVec3::ZERO,
			label: String::new(),
			shape: NodeShape::Hub(HubNode::new(mobile)),
		});

		let state = &self.interaction;
		for (i, (category, &center)) in self
			.categories
			.iter()
			.zip(&self.category_positions)
			.enumerate()
		{
			nodes.push(GraphNode {
				kind: NodeKind::Category(i),
				position: center,
				label: category.name.clone(),
				shape: NodeShape::Category {
					visual: CategoryVisual::new(
						state.is_selected(i),
						state.is_hovered(i),
						state.is_dimmed(i),
						mobile,
					),
					color: category.color.clone(),
				},
			});
			edges.push(ConnectionEdge::new(
				DVec3::ZERO,
				center,
				state.hub_edge_active(i),
			));

			if !state.leaves_visible(i) {
				continue;
			}
			for (j, (skill, position)) in category
				.skills
				.iter()
				.zip(self.leaf_positions(i))
				.enumerate()
			{
				let leaf = LeafRef {
					category: i,
					skill: j,
				};
				nodes.push(GraphNode {
					kind: NodeKind::Leaf(leaf),
					position,
					label: skill.name.clone(),
					shape: NodeShape::Leaf {
						visual: LeafVisual::new(state.is_leaf_hovered(leaf)),
						description: skill.description.clone(),
					},
				});
				edges.push(ConnectionEdge::new(
					center,
					position,
					state.leaf_edge_active(leaf),
				));
			}
		}

		self.nodes = nodes;
		self.edges = edges;
	}

	/// Node whose projected disc contains the canvas point. Leaves win over
	/// categories and categories over the hub; within a tier the front-most
	/// node wins.
	pub fn pick(&self, view: &CameraView, x: f64, y: f64) -> Option<NodeKind> {
		let mut best: Option<(u8, f64, NodeKind)> = None;
		for node in &self.nodes {
			let Some(p) = view.project(node.position) else {
				continue;
			};
			let radius = node.hit_radius() * p.scale;
			let (dx, dy) = (p.x - x, p.y - y);
			if dx * dx + dy * dy > radius * radius {
				continue;
			}
			let tier = match node.kind {
				NodeKind::Hub => 0,
				NodeKind::Category(_) => 1,
				NodeKind::Leaf(_) => 2,
			};
			let better = best.is_none_or(|(best_tier, depth, _)| {
				tier > best_tier || (tier == best_tier && p.depth < depth)
			});
			if better {
				best = Some((tier, p.depth, node.kind));
			}
		}
		best.map(|(_, _, kind)| kind)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::skill_graph::camera::{CameraConfig, CameraRig};
	use crate::components::skill_graph::types::SkillEntry;

	fn category(name: &str, skills: usize) -> SkillCategory {
		SkillCategory {
			name: name.into(),
			color: "#d4af76".into(),
			skills: (0..skills)
				.map(|i| SkillEntry {
					name: format!("{name}-{i}"),
					description: format!("about {name}-{i}"),
				})
				.collect(),
		}
	}

	fn four() -> GraphLayout {
		let config = LayoutConfig::default();
		let viewport = Viewport::new(1200.0, 800.0, &config);
		GraphLayout::new(
			vec![
				category("AI/ML", 8),
				category("IoT", 4),
				category("Languages", 5),
				category("Tools", 5),
			],
			viewport,
			config,
		)
	}

	fn layout_for(width: f64, height: f64, sizes: &[usize]) -> GraphLayout {
		let config = LayoutConfig::default();
		let viewport = Viewport::new(width, height, &config);
		let categories = sizes
			.iter()
			.enumerate()
			.map(|(i, &n)| category(&format!("c{i}"), n))
			.collect();
		GraphLayout::new(categories, viewport, config)
	}

	/// Asserts each visible leaf is picked when clicked at its own center.
	fn assert_leaves_pick_themselves(layout: &GraphLayout, view: &CameraView) {
		let mut seen = 0;
		for node in layout.nodes() {
			let NodeKind::Leaf(leaf) = node.kind else {
				continue;
			};
			let Some(p) = view.project(node.position) else {
				continue;
			};
			seen += 1;
			assert_eq!(
				layout.pick(view, p.x, p.y),
				Some(NodeKind::Leaf(leaf)),
				"leaf {leaf:?} is hidden behind another target"
			);
		}
		assert!(seen > 0);
	}

	fn visible_leaf_categories(layout: &GraphLayout) -> Vec<usize> {
		let mut cats: Vec<usize> = layout
			.nodes()
			.iter()
			.filter_map(|n| match n.kind {
				NodeKind::Leaf(l) => Some(l.category),
				_ => None,
			})
			.collect();
		cats.dedup();
		cats
	}

	#[test]
	fn initial_scene_has_hub_categories_and_idle_edges() {
		let layout = four();
		assert_eq!(layout.nodes().len(), 5);
		assert_eq!(layout.nodes()[0].kind, NodeKind::Hub);
		assert_eq!(layout.edges().len(), 4);
		assert!(layout.edges().iter().all(|e| !e.active));
	}

	#[test]
	fn clicking_a_category_reveals_its_leaves_only() {
		let mut layout = four();
		assert_eq!(layout.toggle_category(2), SelectionState::CategorySelected(2));
		assert_eq!(visible_leaf_categories(&layout), vec![2]);
		assert_eq!(layout.nodes().len(), 5 + 5);
		assert_eq!(layout.edges().len(), 4 + 5);
		assert!(layout.edges()[2].active);
		assert_eq!(layout.selected_category_name(), Some("Languages"));

		assert_eq!(layout.toggle_category(2), SelectionState::NoneSelected);
		assert!(visible_leaf_categories(&layout).is_empty());
		assert_eq!(layout.selected_category_name(), None);
	}

	#[test]
	fn hover_adds_a_second_open_category() {
		let mut layout = four();
		layout.toggle_category(2);
		layout.hover_node(Some(NodeKind::Category(0)));
		assert_eq!(visible_leaf_categories(&layout), vec![0, 2]);
		assert!(layout.edges()[0].active && layout.edges()[2].active);

		layout.hover_node(None);
		assert_eq!(visible_leaf_categories(&layout), vec![2]);
		assert!(!layout.edges()[0].active);
	}

	#[test]
	fn open_leaves_spread_wider_than_hovered_ones() {
		let mut layout = four();
		let center = layout.category_positions()[1];
		layout.set_category_hover(1, true);
		let hovered = layout.leaf_positions(1)[0].distance(center);
		layout.toggle_category(1);
		let open = layout.leaf_positions(1)[0].distance(center);
		assert!(open > hovered);
	}

	#[test]
	fn hovering_a_leaf_keeps_its_category_open() {
		let mut layout = four();
		let leaf = LeafRef {
			category: 3,
			skill: 1,
		};
		layout.hover_node(Some(NodeKind::Category(3)));
		layout.hover_node(Some(NodeKind::Leaf(leaf)));
		assert!(layout.interaction().is_hovered(3));
		assert!(layout.interaction().is_leaf_hovered(leaf));
		let hovered_leaf = layout
			.nodes()
			.iter()
			.find(|n| n.kind == NodeKind::Leaf(leaf))
			.unwrap();
		assert!(matches!(
			hovered_leaf.shape,
			NodeShape::Leaf { visual, .. } if visual == LeafVisual::new(true)
		));

		layout.hover_node(Some(NodeKind::Hub));
		assert!(layout.interaction().hovered_category().is_none());
		assert!(layout.interaction().hovered_leaf().is_none());
	}

	#[test]
	fn empty_dataset_and_empty_categories_are_safe() {
		let config = LayoutConfig::default();
		let viewport = Viewport::new(1200.0, 800.0, &config);
		let mut empty = GraphLayout::new(Vec::new(), viewport, config.clone());
		assert_eq!(empty.nodes().len(), 1);
		assert!(empty.edges().is_empty());
		assert_eq!(empty.toggle_category(0), SelectionState::NoneSelected);

		let mut bare = GraphLayout::new(vec![category("Nothing", 0)], viewport, config);
		bare.toggle_category(0);
		assert!(bare.leaf_positions(0).is_empty());
		assert_eq!(bare.nodes().len(), 2);
		assert_eq!(bare.edges().len(), 1);
	}

	#[test]
	fn rapid_toggles_leave_a_defined_state() {
		let mut layout = four();
		for _ in 0..101 {
			layout.toggle_category(1);
		}
		assert_eq!(
			layout.interaction().selection(),
			SelectionState::CategorySelected(1)
		);
		assert!(layout.clear_selection());
		assert!(!layout.clear_selection());
	}

	#[test]
	fn resize_recomputes_positions() {
		let mut layout = four();
		let wide = layout.category_positions()[0];
		let config = LayoutConfig::default();
		layout.resize(Viewport::new(375.0, 700.0, &config));
		let narrow = layout.category_positions()[0];
		assert!(narrow.length() < wide.length());
		assert!(matches!(
			layout.nodes()[0].shape,
			NodeShape::Hub(hub) if hub == HubNode::new(true)
		));
	}

	#[test]
	fn pick_finds_projected_nodes() {
		let layout = four();
		let view = CameraView::new(
			DVec3::new(0.0, 30.0, 0.1),
			DVec3::ZERO,
			50f64.to_radians(),
			0.1,
			200.0,
			1000.0,
			800.0,
		);
		let hub = view.project(DVec3::ZERO).unwrap();
		assert_eq!(layout.pick(&view, hub.x, hub.y), Some(NodeKind::Hub));

		let cat = view.project(layout.category_positions()[2]).unwrap();
		assert_eq!(layout.pick(&view, cat.x, cat.y), Some(NodeKind::Category(2)));

		assert_eq!(layout.pick(&view, 2.0, 2.0), None);
	}

	#[test]
	fn every_visible_leaf_is_pickable_at_its_center() {
		for (width, height, mobile) in [(1200.0, 800.0, false), (375.0, 700.0, true)] {
			let mut layout = layout_for(width, height, &[8, 4, 5, 5]);
			assert_eq!(layout.viewport().mobile, mobile);
			let view = CameraRig::new(CameraConfig::default(), mobile).view(layout.viewport());
			for i in 0..4 {
				layout.hover_node(Some(NodeKind::Category(i)));
				assert_leaves_pick_themselves(&layout, &view);
				layout.hover_node(None);

				layout.toggle_category(i);
				assert_leaves_pick_themselves(&layout, &view);
				layout.clear_selection();
			}
		}
	}

	#[test]
	fn leaves_clear_the_emphasised_parent_sphere() {
		let mut layout = four();
		layout.hover_node(Some(NodeKind::Category(0)));
		let center = layout.category_positions()[0];
		let parent = layout
			.nodes()
			.iter()
			.find(|n| n.kind == NodeKind::Category(0))
			.map(GraphNode::hit_radius)
			.unwrap();
		for p in layout.leaf_positions(0) {
			assert!(p.distance(center) > parent + LeafVisual::new(true).hit_radius());
		}
	}

	#[test]
	fn leaf_wins_over_an_overlapping_category() {
		let mut layout = four();
		layout.toggle_category(0);
		// Leaf 4 sits between the hub and its category on the x axis, so
		// looking along +x stacks all three on the same pixel.
		let leaf = layout.leaf_positions(0)[4];
		let view = CameraView::new(
			leaf - DVec3::X * 20.0,
			leaf,
			50f64.to_radians(),
			0.1,
			200.0,
			1000.0,
			800.0,
		);
		let p = view.project(leaf).unwrap();
		assert_eq!(
			layout.pick(&view, p.x, p.y),
			Some(NodeKind::Leaf(LeafRef {
				category: 0,
				skill: 4
			}))
		);
	}

	#[test]
	fn click_outcomes_drive_focus_and_reset() {
		let mut layout = four();
		assert_eq!(
			layout.click(Some(NodeKind::Category(1))),
			SelectionChange::Focused {
				name: "IoT".into(),
				position: layout.category_positions()[1],
			}
		);
		let leaf = LeafRef {
			category: 1,
			skill: 0,
		};
		assert_eq!(layout.click(Some(NodeKind::Leaf(leaf))), SelectionChange::Unchanged);
		assert_eq!(layout.click(Some(NodeKind::Category(9))), SelectionChange::Unchanged);
		assert_eq!(layout.click(Some(NodeKind::Category(1))), SelectionChange::Cleared);
		assert_eq!(layout.click(None), SelectionChange::Unchanged);

		layout.click(Some(NodeKind::Category(2)));
		assert_eq!(layout.click(Some(NodeKind::Hub)), SelectionChange::Cleared);
	}

	#[test]
	fn reset_clears_selection_and_leaves() {
		let mut layout = four();
		layout.click(Some(NodeKind::Category(3)));
		assert_eq!(layout.reset_selection(), SelectionChange::Cleared);
		assert_eq!(layout.selected_category_name(), None);
		assert!(visible_leaf_categories(&layout).is_empty());
		assert!(layout.edges().iter().all(|e| !e.active));
		assert_eq!(layout.reset_selection(), SelectionChange::Unchanged);
	}

	#[test]
	fn resize_reports_the_moved_selection() {
		let mut layout = four();
		let config = LayoutConfig::default();
		assert_eq!(layout.resize(Viewport::new(900.0, 800.0, &config)), None);

		layout.toggle_category(0);
		let before = layout.selected_position().unwrap();
		let moved = layout.resize(Viewport::new(375.0, 700.0, &config)).unwrap();
		assert!(moved.distance(before) > 1.0);
		assert_eq!(Some(moved), layout.selected_position());
		assert_eq!(layout.resize(Viewport::new(375.0, 700.0, &config)), None);
	}
}
