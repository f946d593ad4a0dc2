use bevy_math::curve::{Curve, EaseFunction};
use error_stack::Report;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{PlaneError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Resting color of every vertex.
    pub const BASE: Self = Self::rgb(0.0, 0.0, 0.4);
    /// Color written to a face when the pointer is over it.
    pub const HOVER: Self = Self::rgb(0.1, 0.5, 1.0);

    /// Component-wise linear blend, `t = 0` is `self` and `t = 1` is `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    fn is_finite(self) -> bool {
        self.to_array().iter().all(|c| c.is_finite())
    }
}

impl From<Color> for bevy::prelude::Color {
    #[inline]
    fn from(c: Color) -> Self {
        bevy::prelude::Color::linear_rgba(c.r, c.g, c.b, c.a)
    }
}

/// Dimensions and resolution of the plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    /// Upper bound (exclusive) of the random Z offset added to each vertex.
    pub noise_amplitude: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 20.0,
            width_segments: 30,
            height_segments: 30,
            noise_amplitude: 1.0,
        }
    }
}

/// A grid field exposed on the debug panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridField {
    Width,
    Height,
    WidthSegments,
    HeightSegments,
}

impl GridField {
    pub const ALL: [Self; 4] = [
        Self::Width,
        Self::Height,
        Self::WidthSegments,
        Self::HeightSegments,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::WidthSegments => "widthSegment",
            Self::HeightSegments => "heightSegment",
        }
    }

    pub const fn is_segments(self) -> bool {
        matches!(self, Self::WidthSegments | Self::HeightSegments)
    }

    /// Settings path of the field, used in validation errors.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Width => "grid.width",
            Self::Height => "grid.height",
            Self::WidthSegments => "grid.width_segments",
            Self::HeightSegments => "grid.height_segments",
        }
    }
}

impl GridConfig {
    pub fn value(&self, field: GridField) -> f32 {
        match field {
            GridField::Width => self.width,
            GridField::Height => self.height,
            GridField::WidthSegments => self.width_segments as f32,
            GridField::HeightSegments => self.height_segments as f32,
        }
    }

    /// Moves `field` by `steps` whole units, clamped to `limits`.
    /// Returns whether the value changed.
    pub fn step(&mut self, field: GridField, steps: i32, limits: &GridLimits) -> bool {
        let range = limits.range(field);
        let current = self.value(field);
        let mut next = (current + steps as f32).clamp(range.min, range.max);
        if field.is_segments() {
            next = next.floor().max(1.0);
        }
        if next == current {
            return false;
        }
        match field {
            GridField::Width => self.width = next,
            GridField::Height => self.height = next,
            GridField::WidthSegments => self.width_segments = next as u32,
            GridField::HeightSegments => self.height_segments = next as u32,
        }
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldRange {
    pub min: f32,
    pub max: f32,
}

impl FieldRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Largest vertex count the segment limits may allow.
pub const MAX_GRID_VERTICES: u32 = 1 << 20;

/// Min/max bounds enforced by the debug panel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLimits {
    pub width: FieldRange,
    pub height: FieldRange,
    pub width_segments: FieldRange,
    pub height_segments: FieldRange,
}

impl Default for GridLimits {
    fn default() -> Self {
        Self {
            width: FieldRange::new(1.0, 20.0),
            height: FieldRange::new(1.0, 20.0),
            width_segments: FieldRange::new(1.0, 30.0),
            height_segments: FieldRange::new(1.0, 30.0),
        }
    }
}

impl GridLimits {
    pub fn range(&self, field: GridField) -> FieldRange {
        match field {
            GridField::Width => self.width,
            GridField::Height => self.height,
            GridField::WidthSegments => self.width_segments,
            GridField::HeightSegments => self.height_segments,
        }
    }
}

/// Easing curve applied to the hover fade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeEase {
    Linear,
    #[default]
    QuadraticOut,
    CubicOut,
    SineInOut,
}

impl FadeEase {
    /// Eased progress for linear progress `t`, clamped to `[0, 1]`.
    pub fn sample(self, t: f32) -> f32 {
        let function = match self {
            Self::Linear => EaseFunction::Linear,
            Self::QuadraticOut => EaseFunction::QuadraticOut,
            Self::CubicOut => EaseFunction::CubicOut,
            Self::SineInOut => EaseFunction::SineInOut,
        };
        function.sample_clamped(t)
    }
}

/// What happens when a new fade targets vertices another fade still owns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeOverlap {
    /// The newer fade takes the shared vertices over from older ones.
    #[default]
    Replace,
    /// Fades stack; the most recently started one writes last.
    Layered,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeSettings {
    pub duration_secs: f32,
    pub ease: FadeEase,
    pub overlap: FadeOverlap,
}

impl Default for FadeSettings {
    fn default() -> Self {
        Self {
            duration_secs: 0.5,
            ease: FadeEase::default(),
            overlap: FadeOverlap::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [1.0, 0.0, 5.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Everything needed to start the demo. Every field is optional in JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneSettings {
    pub grid: GridConfig,
    pub limits: GridLimits,
    pub base_color: Color,
    pub hover_color: Color,
    pub fade: FadeSettings,
    pub camera: CameraSettings,
    pub background: Color,
    /// Fixed seed for the vertex noise. Taken from the clock when absent.
    pub seed: Option<u64>,
}

impl Default for PlaneSettings {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            limits: GridLimits::default(),
            base_color: Color::BASE,
            hover_color: Color::HOVER,
            fade: FadeSettings::default(),
            camera: CameraSettings::default(),
            background: Color::BLACK,
            seed: None,
        }
    }
}

/// Names the setting that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidSetting {
    pub field: &'static str,
    pub reason: &'static str,
}

impl fmt::Display for InvalidSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` {}", self.field, self.reason)
    }
}

impl std::error::Error for InvalidSetting {}

fn invalid(field: &'static str, reason: &'static str) -> Report<PlaneError> {
    Report::new(InvalidSetting { field, reason }).change_context(PlaneError::InvalidConfig)
}

impl PlaneSettings {
    /// Parses and validates settings from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| Report::new(e).change_context(PlaneError::Parse))?;
        settings.validate()?;
        Ok(settings)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Report::new(e).change_context(PlaneError::Io))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        let grid = &self.grid;
        if !(grid.width.is_finite() && grid.width > 0.0) {
            return Err(invalid("grid.width", "must be a positive number"));
        }
        if !(grid.height.is_finite() && grid.height > 0.0) {
            return Err(invalid("grid.height", "must be a positive number"));
        }
        if grid.width_segments == 0 {
            return Err(invalid("grid.width_segments", "must be at least 1"));
        }
        if grid.height_segments == 0 {
            return Err(invalid("grid.height_segments", "must be at least 1"));
        }
        if !(grid.noise_amplitude.is_finite() && grid.noise_amplitude >= 0.0) {
            return Err(invalid("grid.noise_amplitude", "must be zero or positive"));
        }

        for field in GridField::ALL {
            let range = self.limits.range(field);
            if !(range.min.is_finite() && range.max.is_finite() && range.min <= range.max) {
                return Err(invalid("limits", "min must not exceed max"));
            }
            // The panel can walk a value down to its min
            let usable = if field.is_segments() {
                range.min >= 1.0
            } else {
                range.min > 0.0
            };
            if !usable {
                return Err(invalid(
                    "limits",
                    "min must be positive, and at least 1 for segments",
                ));
            }
            if !range.contains(grid.value(field)) {
                return Err(invalid(field.key(), "is outside its panel limits"));
            }
        }

        let most_vertices = (self.limits.width_segments.max.floor() as f64 + 1.0)
            * (self.limits.height_segments.max.floor() as f64 + 1.0);
        if most_vertices > MAX_GRID_VERTICES as f64 {
            return Err(invalid("limits", "allow too many segments"));
        }

        if !(self.base_color.is_finite()
            && self.hover_color.is_finite()
            && self.background.is_finite())
        {
            return Err(invalid("colors", "must be finite"));
        }

        let fade = &self.fade;
        if !(fade.duration_secs.is_finite() && fade.duration_secs >= 0.0) {
            return Err(invalid("fade.duration_secs", "must be zero or positive"));
        }

        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(invalid("camera.fov_degrees", "must be between 0 and 180"));
        }
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(invalid("camera.near", "must be positive and below camera.far"));
        }
        if camera.position == camera.target {
            return Err(invalid("camera.position", "must differ from camera.target"));
        }

        Ok(())
    }
}
