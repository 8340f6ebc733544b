//! Aurora mesh configuration and its effective (clamped) parameters.

use serde::{Deserialize, Serialize};

use crate::color::{ACCENT, Rgb};

/// Environment variable consulted when [`Motion::Auto`] is in effect.
pub const REDUCED_MOTION_ENV: &str = "FOLIO_REDUCED_MOTION";

/// Requested motion level for animations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Motion {
    /// Follow the environment preference.
    #[default]
    Auto,
    /// Always animate.
    Full,
    /// Render a single static frame.
    Reduced,
}

impl Motion {
    /// Resolve to `true` when reduced motion is requested.
    ///
    /// `env_value` is the raw value of [`REDUCED_MOTION_ENV`], if set.
    pub fn is_reduced(self, env_value: Option<&str>) -> bool {
        match self {
            Motion::Full => false,
            Motion::Reduced => true,
            Motion::Auto => env_value.is_some_and(|v| {
                matches!(
                    v.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on" | "reduce"
                )
            }),
        }
    }
}

/// Raw, caller-supplied aurora configuration.
///
/// Values are stored exactly as given; see [`AuroraConfig::effective`] for
/// the ranges they are clamped to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuroraConfig {
    pub speed: f32,
    pub blob_count: i64,
    /// Base blob radius in layout pixels.
    pub blob_radius: f32,
    pub intensity: f32,
    pub colors: Vec<String>,
    /// Pointer attraction strength.
    pub interact: f32,
    /// Fraction of the height over which the top edge fades in.
    pub top_fade: f32,
    pub max_fps: f32,
    pub mesh_opacity: f32,
    /// Mesh grid spacing in layout pixels.
    pub mesh_step: f32,
    /// Glow blur radius in layout pixels.
    pub blur_px: f32,
    /// Device pixels per layout pixel.
    pub pixel_ratio: f32,
    pub motion: Motion,
}

impl Default for AuroraConfig {
    fn default() -> Self {
        Self {
            speed: 0.35,
            blob_count: 6,
            blob_radius: 160.0,
            intensity: 0.9,
            colors: vec![
                "#ff6a00".to_string(),
                "#ffb45c".to_string(),
                "#ffffff".to_string(),
            ],
            interact: 0.65,
            top_fade: 0.55,
            max_fps: 55.0,
            mesh_opacity: 0.18,
            mesh_step: 44.0,
            blur_px: 10.0,
            pixel_ratio: 1.0,
            motion: Motion::Auto,
        }
    }
}

/// Configuration after defaults and clamping have been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveParams {
    pub speed: f32,
    pub blob_count: usize,
    pub blob_radius: f32,
    pub intensity: f32,
    /// Parsed palette; invalid entries are dropped.
    pub palette: Vec<Rgb>,
    pub interact: f32,
    pub top_fade: f32,
    pub max_fps: f32,
    /// Minimum wall-clock spacing of drawn frames.
    pub min_frame_ms: f64,
    pub mesh_opacity: f32,
    pub mesh_step: f32,
    pub blur_px: f32,
    pub scale: f32,
    pub motion: Motion,
}

impl EffectiveParams {
    /// First palette entry, or the fixed accent when the palette is empty.
    pub fn accent(&self) -> Rgb {
        self.palette.first().copied().unwrap_or(ACCENT)
    }

    /// Palette color for the blob at `index`, cycling through the palette.
    pub fn blob_color(&self, index: usize) -> Rgb {
        if self.palette.is_empty() {
            ACCENT
        } else {
            self.palette[index % self.palette.len()]
        }
    }
}

fn clamp_or(value: f32, default: f32, min: f32, max: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        default.clamp(min, max)
    }
}

impl AuroraConfig {
    pub const SPEED_RANGE: (f32, f32) = (0.0, 5.0);
    pub const BLOB_COUNT_MAX: i64 = 64;
    pub const BLOB_RADIUS_RANGE: (f32, f32) = (1.0, 4000.0);
    pub const FPS_RANGE: (f32, f32) = (15.0, 120.0);
    pub const MESH_STEP_RANGE: (f32, f32) = (26.0, 90.0);
    pub const BLUR_RANGE: (f32, f32) = (0.0, 24.0);
    pub const SCALE_RANGE: (f32, f32) = (1.0, 2.0);

    /// Apply defaults and clamp every numeric field to its supported range.
    pub fn effective(&self) -> EffectiveParams {
        let d = AuroraConfig::default();
        let max_fps = clamp_or(self.max_fps, d.max_fps, Self::FPS_RANGE.0, Self::FPS_RANGE.1);

        EffectiveParams {
            speed: clamp_or(self.speed, d.speed, Self::SPEED_RANGE.0, Self::SPEED_RANGE.1),
            blob_count: self.blob_count.clamp(0, Self::BLOB_COUNT_MAX) as usize,
            blob_radius: clamp_or(
                self.blob_radius,
                d.blob_radius,
                Self::BLOB_RADIUS_RANGE.0,
                Self::BLOB_RADIUS_RANGE.1,
            ),
            intensity: clamp_or(self.intensity, d.intensity, 0.0, 1.0),
            palette: self
                .colors
                .iter()
                .filter_map(|c| Rgb::parse_hex(c).ok())
                .collect(),
            interact: clamp_or(self.interact, d.interact, 0.0, 1.0),
            top_fade: clamp_or(self.top_fade, d.top_fade, 0.0, 1.0),
            max_fps,
            min_frame_ms: 1000.0 / max_fps as f64,
            mesh_opacity: clamp_or(self.mesh_opacity, d.mesh_opacity, 0.0, 1.0),
            mesh_step: clamp_or(
                self.mesh_step,
                d.mesh_step,
                Self::MESH_STEP_RANGE.0,
                Self::MESH_STEP_RANGE.1,
            ),
            blur_px: clamp_or(self.blur_px, d.blur_px, Self::BLUR_RANGE.0, Self::BLUR_RANGE.1),
            scale: clamp_or(
                self.pixel_ratio,
                d.pixel_ratio,
                Self::SCALE_RANGE.0,
                Self::SCALE_RANGE.1,
            ),
            motion: self.motion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_through() {
        let p = AuroraConfig::default().effective();
        assert_eq!(p.blob_count, 6);
        assert_eq!(p.palette.len(), 3);
        assert_eq!(p.accent(), ACCENT);
        assert!((p.min_frame_ms - 1000.0 / 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let cfg = AuroraConfig {
            speed: -3.0,
            blob_count: -4,
            intensity: 7.0,
            max_fps: 1000.0,
            mesh_step: 2.0,
            blur_px: 99.0,
            pixel_ratio: 3.5,
            top_fade: -1.0,
            ..Default::default()
        };
        let p = cfg.effective();
        assert_eq!(p.speed, 0.0);
        assert_eq!(p.blob_count, 0);
        assert_eq!(p.intensity, 1.0);
        assert_eq!(p.max_fps, 120.0);
        assert_eq!(p.mesh_step, 26.0);
        assert_eq!(p.blur_px, 24.0);
        assert_eq!(p.scale, 2.0);
        assert_eq!(p.top_fade, 0.0);

        let slow = AuroraConfig {
            max_fps: 1.0,
            mesh_step: 500.0,
            pixel_ratio: 0.5,
            ..Default::default()
        }
        .effective();
        assert_eq!(slow.max_fps, 15.0);
        assert_eq!(slow.mesh_step, 90.0);
        assert_eq!(slow.scale, 1.0);
    }

    #[test]
    fn test_non_finite_values_fall_back_to_defaults() {
        let cfg = AuroraConfig {
            speed: f32::NAN,
            blob_radius: f32::INFINITY,
            ..Default::default()
        };
        let p = cfg.effective();
        assert_eq!(p.speed, 0.35);
        assert_eq!(p.blob_radius, 160.0);
    }

    #[test]
    fn test_palette_drops_invalid_entries() {
        let cfg = AuroraConfig {
            colors: vec!["nope".into(), "#00ff00".into()],
            ..Default::default()
        };
        let p = cfg.effective();
        assert_eq!(p.palette, vec![Rgb::new(0, 255, 0)]);
        assert_eq!(p.blob_color(5), Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_empty_palette_uses_accent() {
        let cfg = AuroraConfig {
            colors: Vec::new(),
            ..Default::default()
        };
        let p = cfg.effective();
        assert_eq!(p.accent(), ACCENT);
        assert_eq!(p.blob_color(3), ACCENT);
    }

    #[test]
    fn test_motion_resolution() {
        assert!(!Motion::Full.is_reduced(Some("1")));
        assert!(Motion::Reduced.is_reduced(None));
        assert!(!Motion::Auto.is_reduced(None));
        assert!(Motion::Auto.is_reduced(Some("true")));
        assert!(Motion::Auto.is_reduced(Some(" Reduce ")));
        assert!(!Motion::Auto.is_reduced(Some("0")));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let cfg: AuroraConfig = toml::from_str("blob_count = 5\nmax_fps = 55\nmotion = \"reduced\"")
            .expect("valid toml");
        assert_eq!(cfg.blob_count, 5);
        assert_eq!(cfg.motion, Motion::Reduced);
        assert_eq!(cfg.speed, 0.35);
    }
}
