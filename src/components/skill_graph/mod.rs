//! Radial skill graph visualization component.
//!
//! Renders a hub → category → leaf hierarchy in perspective on an HTML canvas:
//! - Categories on a ring around a central hub, sized to the viewport
//! - Hover previews a category's leaves, click selects it
//! - A spring-damped camera that follows the selection
//! - Orbit drag, wheel zoom and a slowly spinning particle field
//!
//! # Example
//!
//! ```ignore
//! use skill_graph::{CameraHandle, SkillGraphCanvas, default_skills};
//!
//! let camera = CameraHandle::new();
//! view! { <SkillGraphCanvas skills=default_skills() fullscreen=true camera=camera /> }
//! ```

pub mod camera;
mod component;
mod drag;
pub mod edge;
pub mod layout;
pub mod nodes;
pub mod particles;
pub mod render;
pub mod scene;
pub mod selection;
pub mod theme;
mod types;

pub use camera::{CameraConfig, CameraHandle};
pub use component::SkillGraphCanvas;
pub use layout::LayoutConfig;
pub use selection::{InteractionState, LeafRef, SelectionState};
pub use theme::Theme;
pub use types::{DatasetError, SkillCategory, SkillEntry, parse_skills, validate_skills};
