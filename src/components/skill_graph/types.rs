//! Skill dataset structures consumed by the graph and network views.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single skill shown as a leaf node.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SkillEntry {
	/// Display name of the skill.
	pub name: String,
	/// Short description shown in the leaf info panel.
	pub description: String,
}

/// A named group of skills shown as a category node around the hub.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SkillCategory {
	/// Unique category name. Used as the node label.
	pub name: String,
	/// CSS color token (e.g. "#8B5CF6"). Falls back to the theme accent if unparsable.
	#[serde(alias = "colorToken")]
	pub color: String,
	/// Ordered skills; order determines angular placement of the leaves.
	#[serde(default)]
	pub skills: Vec<SkillEntry>,
}

/// Reasons a dataset supplied by the host page is rejected.
#[derive(Debug, Error)]
pub enum DatasetError {
	/// The payload is not a JSON array of categories.
	#[error("failed to parse skills json: {0}")]
	Parse(#[from] serde_json::Error),

	/// The category at this index has a blank name.
	#[error("category {0} has an empty name")]
	EmptyCategoryName(usize),

	/// Two categories share a name.
	#[error("duplicate category name: {0}")]
	DuplicateCategory(String),

	/// A skill inside a category has a blank name.
	#[error("skill {skill} in category {category:?} has an empty name")]
	EmptySkillName {
		/// Owning category name.
		category: String,
		/// Index of the offending skill.
		skill: usize,
	},
}

/// Checks the invariants the graph relies on: non-empty, unique category names
/// and named skills.
pub fn validate_skills(categories: &[SkillCategory]) -> Result<(), DatasetError> {
	let mut seen = HashSet::new();
	for (i, category) in categories.iter().enumerate() {
		if category.name.trim().is_empty() {
			return Err(DatasetError::EmptyCategoryName(i));
		}
		if !seen.insert(category.name.as_str()) {
			return Err(DatasetError::DuplicateCategory(category.name.clone()));
		}
		if let Some(skill) = category.skills.iter().position(|s| s.name.trim().is_empty()) {
			return Err(DatasetError::EmptySkillName {
				category: category.name.clone(),
				skill,
			});
		}
	}
	Ok(())
}

/// Parses and validates a JSON array of categories.
pub fn parse_skills(json: &str) -> Result<Vec<SkillCategory>, DatasetError> {
	let categories: Vec<SkillCategory> = serde_json::from_str(json)?;
	validate_skills(&categories)?;
	Ok(categories)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_color_token_alias_and_missing_skills() {
		let json = r##"[
			{ "name": "AI/ML", "colorToken": "#8B5CF6", "skills": [
				{ "name": "PyTorch", "description": "Deep learning" }
			] },
			{ "name": "Empty", "color": "#10B981" }
		]"##;
		let categories = parse_skills(json).unwrap();
		assert_eq!(categories.len(), 2);
		assert_eq!(categories[0].color, "#8B5CF6");
		assert_eq!(categories[0].skills[0].name, "PyTorch");
		assert!(categories[1].skills.is_empty());
	}

	#[test]
	fn rejects_duplicate_category_names() {
		let json = r##"[
			{ "name": "Tools", "color": "#fff" },
			{ "name": "Tools", "color": "#000" }
		]"##;
		match parse_skills(json) {
			Err(DatasetError::DuplicateCategory(name)) => assert_eq!(name, "Tools"),
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn rejects_blank_names() {
		let blank_category = vec![SkillCategory {
			name: "  ".into(),
			color: "#fff".into(),
			skills: vec![],
		}];
		assert!(matches!(
			validate_skills(&blank_category),
			Err(DatasetError::EmptyCategoryName(0))
		));

		let blank_skill = vec![SkillCategory {
			name: "Langs".into(),
			color: "#fff".into(),
			skills: vec![
				SkillEntry {
					name: "Rust".into(),
					description: String::new(),
				},
				SkillEntry {
					name: String::new(),
					description: "?".into(),
				},
			],
		}];
		assert!(matches!(
			validate_skills(&blank_skill),
			Err(DatasetError::EmptySkillName { skill: 1, .. })
		));
	}

	#[test]
	fn malformed_json_is_a_parse_error() {
		assert!(matches!(parse_skills("{"), Err(DatasetError::Parse(_))));
	}

	#[test]
	fn empty_dataset_is_valid() {
		assert!(parse_skills("[]").unwrap().is_empty());
	}
}
