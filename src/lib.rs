//! skill-graph: Interactive radial skill graph for a portfolio page.
//!
//! This crate provides a WASM-based visualization that arranges skill
//! categories around a central hub in 3D, reveals each category's skills on
//! hover or click, and glides the camera towards the selection.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
mod data;

pub use components::skill_graph::{
	CameraConfig, CameraHandle, DatasetError, LayoutConfig, SkillCategory, SkillEntry,
	SkillGraphCanvas, Theme, parse_skills, validate_skills,
};
pub use components::skill_network::SkillNetwork;
pub use data::default_skills;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("skill-graph: logging initialized");
}

/// Load skills from a script element with id="skills-data".
/// Expected format: JSON array of `{ name, color, skills: [{ name, description }] }`.
fn load_skills() -> Option<Vec<SkillCategory>> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("skills-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match parse_skills(&json_text) {
		Ok(skills) => {
			info!(
				"skill-graph: loaded {} categories, {} skills",
				skills.len(),
				skills.iter().map(|c| c.skills.len()).sum::<usize>()
			);
			Some(skills)
		}
		Err(e) => {
			warn!("skill-graph: failed to load skills data, using built-in set: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads skills from the DOM and renders the 3D graph with the flat network beside it.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let skills = load_skills().unwrap_or_else(default_skills);
	let skills_signal = Signal::derive(move || skills.clone());

	let camera = CameraHandle::new();
	let (reset_count, set_reset_count) = signal(0u64);
	let (selected, set_selected) = signal(None::<String>);
	let on_selected = Callback::new(move |name: Option<String>| set_selected.set(name));

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Skill Network" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<SkillGraphCanvas
				skills=skills_signal
				fullscreen=true
				camera=camera
				on_category_selected=on_selected
				reset=reset_count
			/>
			<div class="graph-overlay">
				<h1>"Skill Network"</h1>
				<p class="subtitle">
					{move || match selected.get() {
						Some(name) => name,
						None => "Hover a category to preview it. Click to focus. Drag to orbit.".to_string(),
					}}
				</p>
				<button class="reset-view" on:click=move |_| {
					set_reset_count.update(|n| *n += 1);
				}>"Reset view"</button>
			</div>
		</div>
		<section class="skill-network-panel">
			<SkillNetwork skills=skills_signal />
		</section>
	}
}
