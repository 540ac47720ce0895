//! Canvas rendering for the skill graph.
//!
//! World-space geometry is projected through the camera and painted
//! back-to-front. Passes:
//! 1. Background and particles (screen space)
//! 2. Edges and nodes, sorted by view depth
//! 3. Labels and leaf info panels on top
//! 4. Vignette

use std::cmp::Ordering;
use std::f64::consts::PI;

use glam::DVec3;
use web_sys::CanvasRenderingContext2d;

use super::camera::{CameraView, Projected};
use super::edge::{ACTIVE_BASE_INTENSITY, ACTIVE_PULSE_AMPLITUDE, ConnectionEdge};
use super::nodes::{GraphNode, HubNode, NodeShape};
use super::particles::ParticleField;
use super::scene::GraphLayout;
use super::theme::{Color, Theme};

/// Widest info panel, pixels.
const PANEL_MAX_WIDTH: f64 = 220.0;
/// Line height inside info panels, pixels.
const PANEL_LINE_HEIGHT: f64 = 14.0;

/// One depth-sorted primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawItem {
	/// Index into [`GraphLayout::edges`].
	Edge(usize),
	/// Index into [`GraphLayout::nodes`].
	Node(usize),
}

/// Back-to-front draw order, rebuilt every frame into the same buffer.
#[derive(Default)]
pub struct DrawList {
	items: Vec<(f64, DrawItem)>,
}

impl DrawList {
	/// Collects every visible primitive and sorts farthest first.
	pub fn rebuild(&mut self, layout: &GraphLayout, view: &CameraView) {
		self.items.clear();
		for (i, edge) in layout.edges().iter().enumerate() {
			if let Some(p) = view.project(edge.midpoint()) {
				self.items.push((p.depth, DrawItem::Edge(i)));
			}
		}
		for (i, node) in layout.nodes().iter().enumerate() {
			if let Some(p) = view.project(node.position) {
				self.items.push((p.depth, DrawItem::Node(i)));
			}
		}
		self.items
			.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
	}

	/// Items in paint order.
	pub fn iter(&self) -> impl Iterator<Item = DrawItem> + '_ {
		self.items.iter().map(|&(_, item)| item)
	}

	/// Number of queued primitives.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether nothing is in front of the camera.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

/// Everything one frame needs besides the canvas.
pub struct Frame<'a> {
	/// Scene to draw.
	pub layout: &'a GraphLayout,
	/// Camera projection for this frame.
	pub view: &'a CameraView,
	/// Colors and fonts.
	pub theme: &'a Theme,
	/// Ambient points, if enabled.
	pub particles: Option<&'a ParticleField>,
	/// Seconds since mount; drives the edge pulse.
	pub elapsed: f64,
}

/// Renders the complete scene to the canvas.
pub fn render(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>, draw_list: &mut DrawList) {
	let viewport = frame.layout.viewport();
	let (width, height) = (viewport.width, viewport.height);

	draw_background(ctx, frame.theme, width, height);

	if let Some(field) = frame.particles {
		draw_particles(ctx, frame.view, frame.theme, field);
	}

	draw_list.rebuild(frame.layout, frame.view);
	for item in draw_list.iter() {
		match item {
			DrawItem::Edge(i) => {
				if let Some(edge) = frame.layout.edges().get(i) {
					draw_edge(ctx, frame, edge);
				}
			}
			DrawItem::Node(i) => {
				if let Some(node) = frame.layout.nodes().get(i) {
					draw_node(ctx, frame, node);
				}
			}
		}
	}

	draw_labels(ctx, frame);

	if frame.theme.background.vignette > 0.0 {
		draw_vignette(ctx, frame.theme, width, height);
	}
}

fn draw_background(ctx: &CanvasRenderingContext2d, theme: &Theme, width: f64, height: f64) {
	match ctx.create_radial_gradient(
		width / 2.0,
		height / 2.0,
		0.0,
		width / 2.0,
		height / 2.0,
		width.max(height) * 0.8,
	) {
		Ok(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		Err(_) => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}
	ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_vignette(ctx: &CanvasRenderingContext2d, theme: &Theme, width: f64, height: f64) {
	let Ok(gradient) = ctx.create_radial_gradient(
		width / 2.0,
		height / 2.0,
		width.min(height) * 0.3,
		width / 2.0,
		height / 2.0,
		width.max(height) * 0.7,
	) else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
	let _ = gradient.add_color_stop(
		1.0,
		&Color::rgba(0, 0, 0, theme.background.vignette).to_css(),
	);

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_particles(
	ctx: &CanvasRenderingContext2d,
	view: &CameraView,
	theme: &Theme,
	field: &ParticleField,
) {
	let style = &theme.particles;
	ctx.set_fill_style_str(&style.color.with_alpha(0.6).to_css());
	for point in field.world_points() {
		let Some(p) = view.project(point) else {
			continue;
		};
		let size = (style.size * p.scale).max(0.5);
		ctx.fill_rect(p.x - size / 2.0, p.y - size / 2.0, size, size);
	}
}

/// Maps an emissive intensity onto `0..=1` for alpha and glow strength.
fn emissive_strength(intensity: f64) -> f64 {
	(intensity / (ACTIVE_BASE_INTENSITY + ACTIVE_PULSE_AMPLITUDE)).clamp(0.0, 1.0)
}

fn draw_edge(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>, edge: &ConnectionEdge) {
	let (a, b) = edge.caps();
	let (Some(pa), Some(pb)) = (frame.view.project(a), frame.view.project(b)) else {
		return;
	};
	let style = &frame.theme.edge;
	let strength = emissive_strength(edge.emissive_intensity(frame.elapsed));
	let width = (style.radius * 2.0 * (pa.scale + pb.scale) / 2.0).max(style.min_width);
	let color = style.color.with_alpha(style.opacity * (0.3 + 0.7 * strength));

	ctx.save();
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(width);
	ctx.set_line_cap("round");
	if edge.active {
		ctx.set_shadow_color(&style.color.to_css());
		ctx.set_shadow_blur(style.glow_blur * strength);
	}
	ctx.begin_path();
	ctx.move_to(pa.x, pa.y);
	ctx.line_to(pb.x, pb.y);
	ctx.stroke();
	ctx.restore();
}

fn draw_node(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>, node: &GraphNode) {
	let Some(p) = frame.view.project(node.position) else {
		return;
	};
	let theme = frame.theme;
	match &node.shape {
		NodeShape::Hub(hub) => draw_hub(ctx, theme, hub, &p),
		NodeShape::Category { visual, color, .. } => {
			let base = theme.category_color(color);
			draw_sphere(
				ctx,
				&p,
				visual.radius * p.scale,
				base,
				visual.opacity,
				visual.emissive,
				theme.node.glow_blur,
			);
		}
		NodeShape::Leaf { visual, .. } => {
			draw_sphere(
				ctx,
				&p,
				visual.radius * p.scale,
				theme.node.leaf_color,
				1.0,
				visual.emissive,
				theme.node.glow_blur,
			);
		}
	}
}

/// Shaded disc with an emissive halo.
fn draw_sphere(
	ctx: &CanvasRenderingContext2d,
	p: &Projected,
	radius: f64,
	base: Color,
	opacity: f64,
	emissive: f64,
	glow_blur: f64,
) {
	if radius < 0.1 {
		return;
	}
	let strength = emissive.clamp(0.0, 1.0);

	ctx.save();
	ctx.set_global_alpha(opacity.clamp(0.0, 1.0));
	ctx.set_shadow_color(&base.with_alpha(strength).to_css());
	ctx.set_shadow_blur(glow_blur * emissive);

	match ctx.create_radial_gradient(
		p.x - radius * 0.3,
		p.y - radius * 0.3,
		0.0,
		p.x,
		p.y,
		radius,
	) {
		Ok(gradient) => {
			let _ = gradient.add_color_stop(0.0, &base.lighten(0.3 + 0.3 * strength).to_css());
			let _ = gradient.add_color_stop(0.7, &base.to_css());
			let _ = gradient.add_color_stop(1.0, &base.darken(0.3).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		Err(_) => ctx.set_fill_style_str(&base.to_css()),
	}

	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
	ctx.fill();
	ctx.restore();
}

fn draw_hub(ctx: &CanvasRenderingContext2d, theme: &Theme, hub: &HubNode, p: &Projected) {
	let style = &theme.hub;

	// Wireframe: outline plus a few meridians.
	let wire = hub.wireframe.radius * p.scale;
	ctx.save();
	ctx.set_stroke_style_str(&style.wire_color.with_alpha(hub.wireframe.opacity).to_css());
	ctx.set_line_width(1.0);
	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, wire, 0.0, 2.0 * PI);
	ctx.stroke();
	for k in 1..4 {
		let squash = (k as f64 * PI / 8.0).cos();
		ctx.begin_path();
		let _ = ctx.ellipse(p.x, p.y, wire * squash, wire, 0.0, 0.0, 2.0 * PI);
		ctx.stroke();
		ctx.begin_path();
		let _ = ctx.ellipse(p.x, p.y, wire, wire * squash, 0.0, 0.0, 2.0 * PI);
		ctx.stroke();
	}
	ctx.restore();

	// Metallic core: sharper highlight as metalness grows.
	let core = hub.core.radius * p.scale;
	let base = style.core_color;
	ctx.save();
	ctx.set_global_alpha(hub.core.opacity);
	match ctx.create_radial_gradient(
		p.x - core * 0.35,
		p.y - core * 0.35,
		0.0,
		p.x,
		p.y,
		core,
	) {
		Ok(gradient) => {
			let _ = gradient.add_color_stop(0.0, &base.lighten(0.7).to_css());
			let _ = gradient.add_color_stop(
				(0.45 * (1.0 - style.metalness * 0.5)).clamp(0.05, 0.95) as f32,
				&base.to_css(),
			);
			let _ = gradient.add_color_stop(1.0, &base.darken(0.5 * style.metalness).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		Err(_) => ctx.set_fill_style_str(&base.to_css()),
	}
	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, core, 0.0, 2.0 * PI);
	ctx.fill();
	ctx.restore();

	// Additive glow shell.
	let glow = hub.glow.radius * p.scale;
	ctx.save();
	let _ = ctx.set_global_composite_operation("lighter");
	if let Ok(gradient) = ctx.create_radial_gradient(p.x, p.y, core * 0.8, p.x, p.y, glow * 1.4) {
		let _ = gradient.add_color_stop(0.0, &style.glow_color.with_alpha(hub.glow.opacity).to_css());
		let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, glow * 1.4, 0.0, 2.0 * PI);
		ctx.fill();
	}
	ctx.restore();
}

fn draw_labels(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>) {
	let theme = frame.theme;
	let labels = &theme.label;

	ctx.save();
	ctx.set_text_align("center");
	ctx.set_text_baseline("bottom");

	for node in frame.layout.nodes() {
		match &node.shape {
			NodeShape::Hub(hub) => {
				let anchor = node.position + DVec3::Y * (hub.wireframe.radius + 0.4);
				let Some(p) = frame.view.project(anchor) else {
					continue;
				};
				ctx.set_font(labels.hub_font);
				ctx.set_fill_style_str(&theme.accent.to_css());
				let _ = ctx.fill_text(theme.hub.label, p.x, p.y);
			}
			NodeShape::Category { visual, color, .. } => {
				let anchor = node.position + DVec3::Y * visual.label_offset;
				let Some(p) = frame.view.project(anchor) else {
					continue;
				};
				ctx.set_font(labels.category_font);
				ctx.set_global_alpha(visual.opacity.max(0.35));
				ctx.set_fill_style_str(&theme.category_color(color).lighten(0.2).to_css());
				let _ = ctx.fill_text(&node.label, p.x, p.y);
				ctx.set_global_alpha(1.0);
			}
			NodeShape::Leaf { description, .. } => {
				let anchor = node.position + DVec3::Y * labels.panel_offset;
				if let Some(p) = frame.view.project(anchor) {
					draw_info_panel(ctx, theme, &node.label, description, p.x, p.y);
				}
			}
		}
	}

	ctx.restore();
}

fn draw_info_panel(
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	title: &str,
	body: &str,
	x: f64,
	y: f64,
) {
	let style = &theme.label;
	let pad = style.panel_padding;
	let measure = |text: &str| ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0);

	ctx.set_font(style.panel_title_font);
	let title_width = measure(title);
	ctx.set_font(style.panel_body_font);
	let lines = wrap_words(body, PANEL_MAX_WIDTH, &measure);
	let body_width = lines.iter().map(|l| measure(l)).fold(0.0, f64::max);

	let width = title_width.max(body_width).min(PANEL_MAX_WIDTH) + pad * 2.0;
	let height = PANEL_LINE_HEIGHT * (1 + lines.len()) as f64 + pad * 2.0;
	let (left, top) = (x - width / 2.0, y - height);

	ctx.set_fill_style_str(&style.panel_background.to_css());
	ctx.fill_rect(left, top, width, height);
	ctx.set_stroke_style_str(&theme.accent.with_alpha(0.4).to_css());
	ctx.set_line_width(1.0);
	ctx.stroke_rect(left, top, width, height);

	ctx.set_fill_style_str(&style.panel_text.to_css());
	ctx.set_font(style.panel_title_font);
	let mut baseline = top + pad + PANEL_LINE_HEIGHT;
	let _ = ctx.fill_text(title, x, baseline);
	ctx.set_font(style.panel_body_font);
	ctx.set_fill_style_str(&style.panel_text.lighten(0.5).to_css());
	for line in &lines {
		baseline += PANEL_LINE_HEIGHT;
		let _ = ctx.fill_text(line, x, baseline);
	}
}

/// Greedy word wrap. A single word wider than `max_width` gets its own line.
pub fn wrap_words(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
	let mut lines = Vec::new();
	let mut current = String::new();
	for word in text.split_whitespace() {
		if current.is_empty() {
			current.push_str(word);
			continue;
		}
		let candidate = format!("{current} {word}");
		if measure(&candidate) <= max_width {
			current = candidate;
		} else {
			lines.push(std::mem::replace(&mut current, word.to_string()));
		}
	}
	if !current.is_empty() {
		lines.push(current);
	}
	lines
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::skill_graph::layout::{LayoutConfig, Viewport};
	use crate::components::skill_graph::types::{SkillCategory, SkillEntry};

	#[test]
	fn wrap_respects_width() {
		let measure = |s: &str| s.len() as f64;
		assert_eq!(
			wrap_words("aa bb cc dd", 5.0, measure),
			vec!["aa bb".to_string(), "cc dd".to_string()]
		);
		assert_eq!(wrap_words("   ", 5.0, measure), Vec::<String>::new());
		assert_eq!(
			wrap_words("enormousword x", 5.0, measure),
			vec!["enormousword".to_string(), "x".to_string()]
		);
	}

	#[test]
	fn draw_list_paints_far_things_first() {
		let config = LayoutConfig::default();
		let mut layout = GraphLayout::new(
			vec![SkillCategory {
				name: "Only".into(),
				color: "#3B82F6".into(),
				skills: vec![SkillEntry {
					name: "Rust".into(),
					description: "Systems".into(),
				}],
			}],
			Viewport::new(1200.0, 800.0, &config),
			config,
		);
		layout.toggle_category(0);

		// Looking down -z: the category at +x is level with the hub.
		let view = CameraView::new(
			DVec3::new(0.0, 0.0, 30.0),
			DVec3::ZERO,
			50f64.to_radians(),
			0.1,
			200.0,
			1200.0,
			800.0,
		);
		let mut list = DrawList::default();
		list.rebuild(&layout, &view);
		assert_eq!(list.len(), layout.nodes().len() + layout.edges().len());

		let depths: Vec<f64> = list
			.iter()
			.map(|item| {
				let point = match item {
					DrawItem::Edge(i) => layout.edges()[i].midpoint(),
					DrawItem::Node(i) => layout.nodes()[i].position,
				};
				view.project(point).unwrap().depth
			})
			.collect();
		assert!(depths.windows(2).all(|w| w[0] >= w[1]));

		// The buffer is reused, not appended to.
		list.rebuild(&layout, &view);
		assert_eq!(list.len(), layout.nodes().len() + layout.edges().len());
	}

	#[test]
	fn emissive_strength_saturates() {
		assert_eq!(emissive_strength(0.0), 0.0);
		assert_eq!(emissive_strength(1.4), 1.0);
		assert_eq!(emissive_strength(5.0), 1.0);
	}
}
