use std::path::Path;

use anyhow::Context;

use crate::animation::ease::Ease;
use crate::assets::color::Color;
use crate::foundation::error::{MorphError, MorphResult};
use crate::render::polyline::PaintStyle;

pub const DEFAULT_SAMPLE_STEPS: usize = 200;
pub const DEFAULT_DURATION_MS: f64 = 500.0;

/// Settings captured once when a morph is constructed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MorphConfig {
    #[serde(default)]
    pub canvas_id: String,
    #[serde(default)]
    pub from_path_id: String,
    #[serde(default)]
    pub to_path_id: String,
    #[serde(default)]
    pub fill: bool,
    #[serde(default, rename = "loop")]
    pub looping: bool,
    #[serde(default)]
    pub color: Color,
    #[serde(default = "default_sample_steps")]
    pub sample_steps: usize,
    /// Milliseconds for one directional transition.
    #[serde(default = "default_duration_ms", rename = "duration")]
    pub duration_ms: f64,
    #[serde(default)]
    pub ease: Ease,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default = "Color::transparent")]
    pub background: Color,
}

fn default_sample_steps() -> usize {
    DEFAULT_SAMPLE_STEPS
}

fn default_duration_ms() -> f64 {
    DEFAULT_DURATION_MS
}

fn default_stroke_width() -> f64 {
    1.0
}

/// Top-level keys of `value` that no config option reads.
fn unknown_keys(value: &serde_json::Value) -> Vec<String> {
    let Some(obj) = value.as_object() else {
        return Vec::new();
    };
    let known = match serde_json::to_value(MorphConfig::default()) {
        Ok(serde_json::Value::Object(known)) => known,
        _ => return Vec::new(),
    };
    obj.keys()
        .filter(|k| !known.contains_key(k.as_str()))
        .cloned()
        .collect()
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            canvas_id: String::new(),
            from_path_id: String::new(),
            to_path_id: String::new(),
            fill: false,
            looping: false,
            color: Color::default(),
            sample_steps: DEFAULT_SAMPLE_STEPS,
            duration_ms: DEFAULT_DURATION_MS,
            ease: Ease::default(),
            stroke_width: default_stroke_width(),
            background: Color::transparent(),
        }
    }
}

impl MorphConfig {
    pub fn new(
        canvas_id: impl Into<String>,
        from_path_id: impl Into<String>,
        to_path_id: impl Into<String>,
    ) -> Self {
        Self {
            canvas_id: canvas_id.into(),
            from_path_id: from_path_id.into(),
            to_path_id: to_path_id.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config. Unknown keys are ignored with a warning.
    pub fn from_json_str(s: &str) -> MorphResult<Self> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        for key in unknown_keys(&value) {
            tracing::warn!(key = %key, "ignoring unknown morph config key");
        }
        let cfg: Self = serde_json::from_value(value)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> MorphResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read morph config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Reject values no morph can run with. Missing identifiers are not checked here; see
    /// [`MorphConfig::diagnostics`].
    pub fn validate(&self) -> MorphResult<()> {
        if self.sample_steps == 0 {
            return Err(MorphError::configuration("sampleSteps must be > 0"));
        }
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            return Err(MorphError::configuration(format!(
                "duration must be a non-negative number of milliseconds, got {}",
                self.duration_ms
            )));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(MorphError::configuration(format!(
                "strokeWidth must be > 0, got {}",
                self.stroke_width
            )));
        }
        Ok(())
    }

    /// Log every missing identifier at error level. Missing ids are not fatal by themselves;
    /// the lookup that follows reports the typed error.
    pub fn log_diagnostics(&self) {
        for diag in self.diagnostics() {
            tracing::error!("{diag}");
        }
    }

    /// Human-readable notes about missing identifiers.
    pub fn diagnostics(&self) -> Vec<String> {
        [
            ("canvasId", &self.canvas_id),
            ("fromPathId", &self.from_path_id),
            ("toPathId", &self.to_path_id),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| format!("morph config is missing `{k}`"))
        .collect()
    }

    pub fn paint_style(&self) -> PaintStyle {
        PaintStyle {
            fill: self.fill,
            color: self.color,
            stroke_width: self.stroke_width,
        }
    }
}
