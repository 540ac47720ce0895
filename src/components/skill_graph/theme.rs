//! Visual theming for the skill graph.
//!
//! Provides colors, shell/node/edge styles, label styling and the particle
//! configuration. Sizes are in world units unless noted as pixels.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with a replaced alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// CSS representation; hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses `#RRGGBB`, `#RGB` and `rgb()`/`rgba()` notation.
	pub fn parse(color_str: &str) -> Option<Color> {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#') {
			let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
			return match hex.len() {
				6 => Some(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
				3 => {
					let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
					Some(Color::rgb(short(0)?, short(1)?, short(2)?))
				}
				_ => None,
			};
		}
		if s.starts_with("rgb") {
			let nums: Vec<&str> = s
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let r = nums.first()?.trim().parse().ok()?;
			let g = nums.get(1)?.trim().parse().ok()?;
			let b = nums.get(2)?.trim().parse().ok()?;
			let a = nums
				.get(3)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(1.0);
			return Some(Color::rgba(r, g, b, a));
		}
		None
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Edge color of the radial gradient
	pub color: Color,
	/// Center color of the radial gradient
	pub color_secondary: Color,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// The three concentric shells of the hub.
#[derive(Clone, Debug)]
pub struct HubStyle {
	/// Near-invisible wireframe shell used for depth cueing.
	pub wire_color: Color,
	/// Metallic core base color.
	pub core_color: Color,
	/// How strongly the core specular highlight is lightened (0..1).
	pub metalness: f64,
	/// Additive glow shell color (alpha is the shell opacity).
	pub glow_color: Color,
	/// Label drawn at the hub center.
	pub label: &'static str,
}

/// Category and leaf node styling.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Use each category's own color token instead of the accent.
	pub use_category_colors: bool,
	/// Leaf sphere color.
	pub leaf_color: Color,
	/// Screen-space glow blur in pixels at emissive intensity 1.0.
	pub glow_blur: f64,
}

/// Connection edge styling.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Cylinder color.
	pub color: Color,
	/// Cylinder radius in world units.
	pub radius: f64,
	/// Minimum drawn line width in pixels.
	pub min_width: f64,
	/// Base opacity of the cylinder material.
	pub opacity: f64,
	/// Screen-space glow blur in pixels at emissive intensity 1.0.
	pub glow_blur: f64,
}

/// Label and info panel styling.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	/// Hub label font (CSS).
	pub hub_font: &'static str,
	/// Category label font (CSS).
	pub category_font: &'static str,
	/// Info panel title font (CSS).
	pub panel_title_font: &'static str,
	/// Info panel body font (CSS).
	pub panel_body_font: &'static str,
	/// Info panel background.
	pub panel_background: Color,
	/// Info panel text color.
	pub panel_text: Color,
	/// Info panel padding in pixels.
	pub panel_padding: f64,
	/// Info panel offset above the leaf, in world units.
	pub panel_offset: f64,
}

/// Ambient particle field configuration.
#[derive(Clone, Debug)]
pub struct ParticleStyle {
	/// Whether the field is drawn at all
	pub enabled: bool,
	/// Number of points on wide viewports
	pub count: usize,
	/// Number of points on mobile viewports
	pub mobile_count: usize,
	/// Point color
	pub color: Color,
	/// Point size in world units (attenuated by depth)
	pub size: f64,
	/// Half extents of the spawn volume (x, y, z)
	pub bounds: (f64, f64, f64),
	/// Rotation around the vertical axis, radians per second of elapsed time
	pub spin_rate: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Accent used for the hub, edges and untinted nodes.
	pub accent: Color,
	/// Background fill.
	pub background: BackgroundStyle,
	/// Hub shells.
	pub hub: HubStyle,
	/// Category and leaf nodes.
	pub node: NodeStyle,
	/// Connection edges.
	pub edge: EdgeStyle,
	/// Labels and info panels.
	pub label: LabelStyle,
	/// Ambient particles.
	pub particles: ParticleStyle,
}

/// Warm gold on black.
const GOLD: Color = Color::rgb(212, 175, 118);

impl Theme {
	/// Gold-on-black theme (default)
	pub fn gold() -> Self {
		Self {
			accent: GOLD,
			background: BackgroundStyle {
				color: Color::rgb(0, 0, 0),
				color_secondary: Color::rgb(14, 12, 10),
				vignette: 0.25,
			},
			hub: HubStyle {
				wire_color: Color::rgba(255, 255, 255, 0.06),
				core_color: GOLD,
				metalness: 0.95,
				glow_color: GOLD.with_alpha(0.12),
				label: "Skills",
			},
			node: NodeStyle {
				use_category_colors: true,
				leaf_color: GOLD,
				glow_blur: 18.0,
			},
			edge: EdgeStyle {
				color: GOLD,
				radius: 0.02,
				min_width: 1.0,
				opacity: 0.9,
				glow_blur: 12.0,
			},
			label: LabelStyle {
				hub_font: "bold 20px sans-serif",
				category_font: "bold 14px sans-serif",
				panel_title_font: "bold 12px sans-serif",
				panel_body_font: "11px sans-serif",
				panel_background: Color::rgba(0, 0, 0, 0.7),
				panel_text: GOLD,
				panel_padding: 8.0,
				panel_offset: 0.6,
			},
			particles: ParticleStyle {
				enabled: true,
				count: 500,
				mobile_count: 250,
				color: GOLD,
				size: 0.04,
				bounds: (40.0, 20.0, 40.0),
				spin_rate: 0.01,
			},
		}
	}

	/// Resolves the color used for a category node.
	pub fn category_color(&self, token: &str) -> Color {
		if self.node.use_category_colors {
			Color::parse(token).unwrap_or(self.accent)
		} else {
			self.accent
		}
	}

	/// Particle count for the current viewport class.
	pub fn particle_count(&self, mobile: bool) -> usize {
		if !self.particles.enabled {
			0
		} else if mobile {
			self.particles.mobile_count
		} else {
			self.particles.count
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::gold()
	}
}
