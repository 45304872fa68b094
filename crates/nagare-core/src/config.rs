use serde::{Deserialize, Serialize};

use crate::error::{NagareError, Result};
use crate::interpolate::ViewportRange;
use crate::scale::{ScaleConfig, ScaleStep, TokenKind};
use crate::units::{CssUnit, RootUnit};

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Everything the dashboard needs to generate all three scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub root_font_size: RootUnit,
    #[serde(default)]
    pub unit: CssUnit,
    pub viewport: ViewportConfig,
    pub typography: ScaleSettings,
    pub spacing: ScaleSettings,
    pub gap: ScaleSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub min: f64,
    pub max: f64,
}

/// Base sizes and ratios for one scale. `steps: None` uses the kind's preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleSettings {
    pub base_min: f64,
    pub base_max: f64,
    pub ratio_min: f64,
    pub ratio_max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<ScaleStep>>,
}

/// Partial mirror of [`TokenConfig`] used to overlay user files on the defaults.
#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    viewport: Option<PartialViewport>,
    root_font_size: Option<RootUnit>,
    unit: Option<CssUnit>,
    typography: Option<PartialScale>,
    spacing: Option<PartialScale>,
    gap: Option<PartialScale>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialViewport {
    min: Option<f64>,
    max: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct PartialScale {
    base_min: Option<f64>,
    base_max: Option<f64>,
    ratio_min: Option<f64>,
    ratio_max: Option<f64>,
    /// Shorthand for equal `ratio_min` and `ratio_max`.
    ratio: Option<f64>,
    steps: Option<Vec<ScaleStep>>,
}

impl TokenConfig {
    /// Parse a TOML document; omitted fields keep their built-in defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let partial: PartialConfig =
            toml::from_str(source).map_err(|e| NagareError::Config(e.to_string()))?;
        let mut config = Self::builtin()?;

        if let Some(viewport) = partial.viewport {
            config.viewport.min = viewport.min.unwrap_or(config.viewport.min);
            config.viewport.max = viewport.max.unwrap_or(config.viewport.max);
        }
        if let Some(root) = partial.root_font_size {
            config.root_font_size = root;
        }
        if let Some(unit) = partial.unit {
            config.unit = unit;
        }
        for (kind, overlay) in [
            (TokenKind::Typography, partial.typography),
            (TokenKind::Spacing, partial.spacing),
            (TokenKind::Gap, partial.gap),
        ] {
            if let Some(overlay) = overlay {
                overlay.apply(config.settings_mut(kind));
            }
        }

        tracing::debug!(viewport = ?config.viewport, root = %config.root_font_size, "parsed token config");
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| NagareError::Config(e.to_string()))
    }

    fn builtin() -> Result<Self> {
        toml::from_str(DEFAULT_CONFIG).map_err(|e| NagareError::Config(e.to_string()))
    }

    pub fn settings(&self, kind: TokenKind) -> &ScaleSettings {
        match kind {
            TokenKind::Typography => &self.typography,
            TokenKind::Spacing => &self.spacing,
            TokenKind::Gap => &self.gap,
        }
    }

    pub fn settings_mut(&mut self, kind: TokenKind) -> &mut ScaleSettings {
        match kind {
            TokenKind::Typography => &mut self.typography,
            TokenKind::Spacing => &mut self.spacing,
            TokenKind::Gap => &mut self.gap,
        }
    }

    /// Validated viewport range.
    pub fn viewport_range(&self) -> Result<ViewportRange> {
        ViewportRange::new(self.viewport.min, self.viewport.max)
    }

    /// Scale generator input for one kind.
    pub fn scale_config(&self, kind: TokenKind) -> ScaleConfig {
        let settings = self.settings(kind);
        ScaleConfig {
            base_min: settings.base_min,
            base_max: settings.base_max,
            ratio_min: settings.ratio_min,
            ratio_max: settings.ratio_max,
            steps: settings.steps.clone().unwrap_or_else(|| kind.steps()),
        }
    }
}

impl PartialScale {
    fn apply(self, settings: &mut ScaleSettings) {
        if let Some(ratio) = self.ratio {
            settings.ratio_min = ratio;
            settings.ratio_max = ratio;
        }
        settings.base_min = self.base_min.unwrap_or(settings.base_min);
        settings.base_max = self.base_max.unwrap_or(settings.base_max);
        settings.ratio_min = self.ratio_min.unwrap_or(settings.ratio_min);
        settings.ratio_max = self.ratio_max.unwrap_or(settings.ratio_max);
        if self.steps.is_some() {
            settings.steps = self.steps;
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self::builtin().expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = TokenConfig::default();
        assert_eq!(config.viewport.min, 320.0);
        assert_eq!(config.viewport.max, 1440.0);
        assert_eq!(config.root_font_size, RootUnit::Percent100);
        assert_eq!(config.unit, CssUnit::Rem);
        assert_eq!(config.typography.base_min, 1.4);
        assert_eq!(config.typography.ratio_max, 1.2);
        assert_eq!(config.spacing.ratio_min, 1.333);
        assert_eq!(config.gap.base_max, 1.5);
        assert!(config.typography.steps.is_none());
    }

    #[test]
    fn test_partial_overlay_keeps_defaults() {
        let config = TokenConfig::from_toml_str(
            r#"
            root_font_size = 10

            [viewport]
            max = 1280

            [spacing]
            ratio = 1.5
            "#,
        )
        .unwrap();
        assert_eq!(config.viewport.min, 320.0);
        assert_eq!(config.viewport.max, 1280.0);
        assert_eq!(config.root_font_size, RootUnit::Percent62_5);
        assert_eq!(config.spacing.ratio_min, 1.5);
        assert_eq!(config.spacing.ratio_max, 1.5);
        assert_eq!(config.spacing.base_min, 0.5);
        assert_eq!(config.typography, TokenConfig::default().typography);
    }

    #[test]
    fn test_custom_steps_override_preset() {
        let config = TokenConfig::from_toml_str(
            r#"
            [gap]
            steps = [{ name = "gutter", exponent = 2 }]
            "#,
        )
        .unwrap();
        let scale = config.scale_config(TokenKind::Gap);
        assert_eq!(scale.steps, vec![ScaleStep::new("gutter", 2)]);
        assert_eq!(config.scale_config(TokenKind::Spacing).steps.len(), 5);
    }

    #[test]
    fn test_invalid_root_is_config_error() {
        let err = TokenConfig::from_toml_str("root_font_size = 12").unwrap_err();
        assert!(matches!(err, NagareError::Config(_)));
    }

    #[test]
    fn test_roundtrip() {
        let config = TokenConfig::default();
        let serialized = config.to_toml_string().unwrap();
        let deserialized = TokenConfig::from_toml_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }
}
