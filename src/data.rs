//! Built-in dataset used when the page does not supply one.

use crate::components::skill_graph::{SkillCategory, SkillEntry};

fn category(name: &str, color: &str, skills: &[(&str, &str)]) -> SkillCategory {
	SkillCategory {
		name: name.to_string(),
		color: color.to_string(),
		skills: skills
			.iter()
			.map(|(name, description)| SkillEntry {
				name: name.to_string(),
				description: description.to_string(),
			})
			.collect(),
	}
}

/// The default portfolio skills.
pub fn default_skills() -> Vec<SkillCategory> {
	vec![
		category(
			"AI/ML",
			"#8B5CF6",
			&[
				("PyTorch", "Deep learning framework for neural networks"),
				("Scikit-learn", "Classic ML library for models and pipelines"),
				("LangChain", "Framework for building RAG-based intelligent LLM applications"),
				("NLP", "Natural Language Processing techniques and tools"),
				("Deep Learning", "Neural networks and representation learning"),
				("OpenCV", "Computer vision library for image processing"),
				("CNN", "Convolutional Neural Networks for image recognition"),
				("YOLO", "Real-time object detection algorithm"),
			],
		),
		category(
			"IoT & Hardware",
			"#F59E0B",
			&[
				("Raspberry Pi", "Single-board computer for IoT projects"),
				("Sensors", "Environmental and motion sensing devices"),
				("Arduino", "Microcontroller platform for hardware projects"),
				("Embedded Systems", "Specialized computing systems in devices"),
			],
		),
		category(
			"Programming Languages",
			"#3B82F6",
			&[
				("Python", "Versatile language for AI, data science, and automation"),
				("C", "System programming and embedded development"),
				("Java", "Enterprise applications and cross-platform development"),
				("R", "Statistical computing and data analysis"),
				("SQL", "Database query language for data management"),
			],
		),
		category(
			"Tools & Platforms",
			"#10B981",
			&[
				("FastAPI", "Modern Python web framework for APIs"),
				("GitHub", "Version control and collaboration platform"),
				("Docling", "Document processing and analysis tool"),
				("LanceDB", "Vector database for AI applications"),
				("Blender", "3D modeling and animation software"),
			],
		),
	]
}
