//! Flat three-column skill network drawn with SVG.
//!
//! Hub on the left, categories in the middle, the leaves of open categories on
//! the right. Hover and click follow the same [`InteractionState`] rules as the
//! 3D graph: a category is open while hovered or selected, hub lines of open
//! categories are emphasised, and category → leaf lines exist only for open
//! categories.

use leptos::prelude::*;
use log::debug;

use super::skill_graph::{InteractionState, LeafRef, SkillCategory};

/// SVG user-space width.
pub const VIEW_WIDTH: f64 = 1200.0;
/// SVG user-space height.
pub const VIEW_HEIGHT: f64 = 600.0;

const HUB_X: f64 = 100.0;
const HUB_Y: f64 = 280.0;
const HUB_RADIUS: f64 = 64.0;
const CATEGORY_DOT_X: f64 = 555.0;
const CATEGORY_RIGHT_X: f64 = 700.0;
const CATEGORY_FIRST_Y: f64 = 100.0;
const CATEGORY_SPACING: f64 = 120.0;
const CATEGORY_LAST_Y: f64 = 560.0;
const LEAF_DOT_X: f64 = 903.0;
const LEAF_SPACING: f64 = 55.0;
const LEAF_CENTER_Y: f64 = 300.0;

/// A category row.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkCategory {
	/// Dataset index.
	pub index: usize,
	/// Display name.
	pub name: String,
	/// Color token.
	pub color: String,
	/// Row center.
	pub y: f64,
	/// Hovered or selected.
	pub open: bool,
	/// Selected by click.
	pub selected: bool,
}

/// A leaf row in the right column.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkLeaf {
	/// Which skill this is.
	pub leaf: LeafRef,
	/// Display name.
	pub name: String,
	/// Tooltip text.
	pub description: String,
	/// Row center.
	pub y: f64,
	/// Under the pointer.
	pub hovered: bool,
}

/// A connector line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetworkLink {
	/// Start x.
	pub x1: f64,
	/// Start y.
	pub y1: f64,
	/// End x.
	pub x2: f64,
	/// End y.
	pub y2: f64,
	/// Stroke width.
	pub width: f64,
	/// Stroke opacity.
	pub opacity: f64,
}

/// Everything the SVG needs for one interaction state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkGeometry {
	/// Category rows.
	pub categories: Vec<NetworkCategory>,
	/// Leaves of open categories, grouped by category in dataset order.
	pub leaves: Vec<NetworkLeaf>,
	/// Hub lines first, then category → leaf lines.
	pub links: Vec<NetworkLink>,
}

/// Lays the network out in the fixed `VIEW_WIDTH × VIEW_HEIGHT` user space.
pub fn network_geometry(categories: &[SkillCategory], state: &InteractionState) -> NetworkGeometry {
	let spacing = if categories.len() > 1 {
		CATEGORY_SPACING.min((CATEGORY_LAST_Y - CATEGORY_FIRST_Y) / (categories.len() - 1) as f64)
	} else {
		CATEGORY_SPACING
	};

	let mut geometry = NetworkGeometry::default();
	for (i, category) in categories.iter().enumerate() {
		let y = CATEGORY_FIRST_Y + i as f64 * spacing;
		let open = state.is_open(i);
		geometry.categories.push(NetworkCategory {
			index: i,
			name: category.name.clone(),
			color: category.color.clone(),
			y,
			open,
			selected: state.is_selected(i),
		});
		geometry.links.push(NetworkLink {
			x1: HUB_X + HUB_RADIUS,
			y1: HUB_Y,
			x2: CATEGORY_DOT_X,
			y2: y,
			width: if open { 4.0 } else { 2.0 },
			opacity: if open { 1.0 } else { 0.4 },
		});
	}

	let total: usize = state
		.open_categories(categories.len())
		.map(|i| categories[i].skills.len())
		.sum();
	let mut y = LEAF_CENTER_Y - (total as f64 * LEAF_SPACING) / 2.0 + LEAF_SPACING / 2.0;
	for i in state.open_categories(categories.len()) {
		let category_y = geometry.categories[i].y;
		for (j, skill) in categories[i].skills.iter().enumerate() {
			let leaf = LeafRef {
				category: i,
				skill: j,
			};
			geometry.leaves.push(NetworkLeaf {
				leaf,
				name: skill.name.clone(),
				description: skill.description.clone(),
				y,
				hovered: state.is_leaf_hovered(leaf),
			});
			geometry.links.push(NetworkLink {
				x1: CATEGORY_RIGHT_X,
				y1: category_y,
				x2: LEAF_DOT_X,
				y2: y,
				width: 3.0,
				opacity: 0.95,
			});
			y += LEAF_SPACING;
		}
	}
	geometry
}

/// Flat "hub → category → leaf" view sharing the 3D graph's interaction rules.
#[component]
pub fn SkillNetwork(#[prop(into)] skills: Signal<Vec<SkillCategory>>) -> impl IntoView {
	let state = RwSignal::new(InteractionState::default());
	let geometry = Memo::new(move |_| skills.with(|cats| state.with(|s| network_geometry(cats, s))));

	let links = move || {
		geometry
			.get()
			.links
			.into_iter()
			.map(|l| {
				view! {
					<line
						x1=l.x1
						y1=l.y1
						x2=l.x2
						y2=l.y2
						stroke-width=l.width
						opacity=l.opacity
						class="skill-network-link"
					/>
				}
			})
			.collect_view()
	};

	let categories = move || {
		geometry
			.get()
			.categories
			.into_iter()
			.map(|c| {
				let i = c.index;
				view! {
					<g
						class="skill-network-category"
						class:open=c.open
						class:selected=c.selected
						on:mouseenter=move |_| state.update(|s| {
							s.set_category_hover(i, true);
						})
						on:mouseleave=move |_| state.update(|s| {
							s.set_category_hover(i, false);
						})
						on:click=move |_| {
							let selection = state.try_update(|s| s.toggle_category(i));
							debug!("skill-network: selection -> {selection:?}");
						}
					>
						<circle cx=CATEGORY_DOT_X cy=c.y r=6 fill={c.color.clone()} />
						<text x={CATEGORY_DOT_X + 16.0} y={c.y + 5.0}>{c.name}</text>
					</g>
				}
			})
			.collect_view()
	};

	let leaves = move || {
		geometry
			.get()
			.leaves
			.into_iter()
			.map(|l| {
				let leaf = l.leaf;
				view! {
					<g
						class="skill-network-leaf"
						class:hovered=l.hovered
						on:mouseenter=move |_| state.update(|s| {
							s.set_category_hover(leaf.category, true);
							s.set_leaf_hover(leaf, true);
						})
						on:mouseleave=move |_| state.update(|s| {
							s.set_leaf_hover(leaf, false);
							s.set_category_hover(leaf.category, false);
						})
					>
						<title>{l.description}</title>
						<circle cx=LEAF_DOT_X cy=l.y r=5 />
						<text x={LEAF_DOT_X + 14.0} y={l.y + 4.0}>{l.name}</text>
					</g>
				}
			})
			.collect_view()
	};

	view! {
		<svg
			class="skill-network"
			viewBox={format!("0 0 {VIEW_WIDTH} {VIEW_HEIGHT}")}
			preserveAspectRatio="xMidYMid meet"
			on:mouseleave=move |_| state.update(|s| {
				s.clear_hover();
			})
		>
			<g class="skill-network-links">{links}</g>
			<g class="skill-network-hub">
				<circle cx=HUB_X cy=HUB_Y r=HUB_RADIUS />
				<text x=HUB_X y={HUB_Y + 8.0} text-anchor="middle">"SKILLS"</text>
			</g>
			{categories}
			{leaves}
		</svg>
	}
}
