//! Selection and hover state shared by every node of the graph.
//!
//! [`SelectionState`] is the only persistent piece of interaction state: at
//! most one category is open by click at a time. Hover is ephemeral and kept
//! separately; a category counts as "open" while it is hovered OR selected,
//! and that single predicate drives leaf visibility and hub edge activity.

/// Which category, if any, is persistently expanded by click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
	/// Nothing is expanded.
	#[default]
	NoneSelected,
	/// The category at this index is expanded.
	CategorySelected(usize),
}

impl SelectionState {
	/// Toggle semantics: selecting the current selection clears it, anything
	/// else replaces it.
	pub fn toggle(self, index: usize) -> Self {
		match self {
			Self::CategorySelected(current) if current == index => Self::NoneSelected,
			_ => Self::CategorySelected(index),
		}
	}

	/// Index of the selected category, if any.
	pub fn selected(self) -> Option<usize> {
		match self {
			Self::NoneSelected => None,
			Self::CategorySelected(index) => Some(index),
		}
	}

	/// Whether `index` is the selected category.
	pub fn is_selected(self, index: usize) -> bool {
		self.selected() == Some(index)
	}
}

/// Address of a leaf node: category index plus skill index within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LeafRef {
	/// Parent category index.
	pub category: usize,
	/// Skill index within the category.
	pub skill: usize,
}

/// Selection plus per-node hover flags.
///
/// Hover flags follow pointer enter/leave pairs: a leave for a node that is no
/// longer the hovered one is ignored, so out-of-order leave events cannot clear
/// a newer hover.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
	selection: SelectionState,
	hovered_category: Option<usize>,
	hovered_leaf: Option<LeafRef>,
}

impl InteractionState {
	/// Current selection.
	pub fn selection(&self) -> SelectionState {
		self.selection
	}

	/// Applies click toggle semantics to `index` and returns the new selection.
	pub fn toggle_category(&mut self, index: usize) -> SelectionState {
		self.selection = self.selection.toggle(index);
		self.selection
	}

	/// Clears the selection. Returns whether anything changed.
	pub fn clear_selection(&mut self) -> bool {
		let changed = self.selection != SelectionState::NoneSelected;
		self.selection = SelectionState::NoneSelected;
		changed
	}

	/// Pointer enter (`true`) or leave/cancel (`false`) on a category node.
	/// Returns whether the hover state changed.
	pub fn set_category_hover(&mut self, index: usize, hovered: bool) -> bool {
		let next = match (hovered, self.hovered_category) {
			(true, _) => Some(index),
			(false, Some(current)) if current == index => None,
			(false, current) => current,
		};
		let changed = next != self.hovered_category;
		self.hovered_category = next;
		changed
	}

	/// Pointer enter (`true`) or leave/cancel (`false`) on a leaf node.
	/// Returns whether the hover state changed.
	pub fn set_leaf_hover(&mut self, leaf: LeafRef, hovered: bool) -> bool {
		let next = match (hovered, self.hovered_leaf) {
			(true, _) => Some(leaf),
			(false, Some(current)) if current == leaf => None,
			(false, current) => current,
		};
		let changed = next != self.hovered_leaf;
		self.hovered_leaf = next;
		changed
	}

	/// Drops every hover flag (pointer left the surface). Returns whether
	/// anything changed.
	pub fn clear_hover(&mut self) -> bool {
		let changed = self.hovered_category.is_some() || self.hovered_leaf.is_some();
		self.hovered_category = None;
		self.hovered_leaf = None;
		changed
	}

	/// Currently hovered category.
	pub fn hovered_category(&self) -> Option<usize> {
		self.hovered_category
	}

	/// Currently hovered leaf.
	pub fn hovered_leaf(&self) -> Option<LeafRef> {
		self.hovered_leaf
	}

	/// Whether `index` is the selected category.
	pub fn is_selected(&self, index: usize) -> bool {
		self.selection.is_selected(index)
	}

	/// Whether `index` is the hovered category.
	pub fn is_hovered(&self, index: usize) -> bool {
		self.hovered_category == Some(index)
	}

	/// Hovered OR selected. Governs leaf visibility and hub edge activity.
	pub fn is_open(&self, index: usize) -> bool {
		self.is_hovered(index) || self.is_selected(index)
	}

	/// Leaves (and their edges) of `index` are shown.
	pub fn leaves_visible(&self, index: usize) -> bool {
		self.is_open(index)
	}

	/// The hub → category edge for `index` pulses.
	pub fn hub_edge_active(&self, index: usize) -> bool {
		self.is_open(index)
	}

	/// Category → leaf edges pulse uniformly while they are shown.
	pub fn leaf_edge_active(&self, leaf: LeafRef) -> bool {
		self.leaves_visible(leaf.category)
	}

	/// A different category than `index` is selected.
	pub fn is_dimmed(&self, index: usize) -> bool {
		matches!(self.selection, SelectionState::CategorySelected(other) if other != index)
	}

	/// Whether this specific leaf is under the pointer.
	pub fn is_leaf_hovered(&self, leaf: LeafRef) -> bool {
		self.hovered_leaf == Some(leaf)
	}

	/// Indices among `0..count` that are currently open, in ascending order.
	pub fn open_categories(&self, count: usize) -> impl Iterator<Item = usize> + '_ {
		(0..count).filter(move |&i| self.is_open(i))
	}
}
