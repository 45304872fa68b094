//! Scale generation, interpolation and rendering composed into one call.

use serde::Serialize;

use crate::config::TokenConfig;
use crate::error::Result;
use crate::format::{format_declaration, format_stylesheet, merge_stylesheets};
use crate::interpolate::{evaluate_clamped, solve, LinearCoefficients, ViewportRange};
use crate::scale::{generate, ScaleConfig, StepRange, TokenKind};
use crate::units::{CssUnit, RootUnit};

/// One step with its interpolation line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FluidToken {
    pub range: StepRange,
    pub coefficients: LinearCoefficients,
}

impl FluidToken {
    pub fn name(&self) -> &str {
        &self.range.name
    }

    /// Value at viewport width `x`, never outside the step's bounds.
    pub fn value_at(&self, x: f64) -> f64 {
        evaluate_clamped(&self.range, &self.coefficients, x)
    }

    pub fn declaration(&self, unit: CssUnit) -> String {
        format_declaration(&self.range, &self.coefficients, unit)
    }
}

/// A rendered scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedScale {
    pub viewport: ViewportRange,
    pub unit: CssUnit,
    pub tokens: Vec<FluidToken>,
    pub css: String,
}

impl GeneratedScale {
    pub fn names(&self) -> Vec<&str> {
        self.tokens.iter().map(FluidToken::name).collect()
    }

    pub fn min_values(&self) -> Vec<f64> {
        self.tokens.iter().map(|t| t.range.min).collect()
    }

    pub fn max_values(&self) -> Vec<f64> {
        self.tokens.iter().map(|t| t.range.max).collect()
    }

    pub fn token(&self, name: &str) -> Option<&FluidToken> {
        self.tokens.iter().find(|t| t.name() == name)
    }

    pub fn range(&self, name: &str) -> Option<&StepRange> {
        self.token(name).map(|t| &t.range)
    }
}

/// Generate, solve and render one scale.
///
/// The viewport is checked before any step is computed so a degenerate
/// range fails the same way whatever the step values are.
pub fn build_scale(
    scale: &ScaleConfig,
    viewport: &ViewportRange,
    unit: CssUnit,
    root: Option<RootUnit>,
) -> Result<GeneratedScale> {
    viewport.validate()?;

    let tokens = generate(scale)?
        .into_iter()
        .map(|range| {
            let coefficients = solve(&range, viewport)?;
            Ok(FluidToken {
                range,
                coefficients,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let css = format_stylesheet(
        tokens.iter().map(|t| (&t.range, &t.coefficients)),
        unit,
        root,
    );

    tracing::debug!(
        steps = tokens.len(),
        viewport_min = viewport.min,
        viewport_max = viewport.max,
        "generated fluid scale"
    );

    Ok(GeneratedScale {
        viewport: *viewport,
        unit,
        tokens,
        css,
    })
}

/// Generate one of the dashboard scales from the full configuration.
pub fn generate_scale(config: &TokenConfig, kind: TokenKind) -> Result<GeneratedScale> {
    let viewport = config.viewport_range()?;
    build_scale(
        &config.scale_config(kind),
        &viewport,
        config.unit,
        Some(config.root_font_size),
    )
    .inspect_err(|e| tracing::debug!(%kind, error = %e, "scale generation failed"))
}

/// All three dashboard scales.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenSet {
    pub root_font_size: RootUnit,
    pub typography: GeneratedScale,
    pub spacing: GeneratedScale,
    pub gap: GeneratedScale,
}

impl TokenSet {
    pub fn get(&self, kind: TokenKind) -> &GeneratedScale {
        match kind {
            TokenKind::Typography => &self.typography,
            TokenKind::Spacing => &self.spacing,
            TokenKind::Gap => &self.gap,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenKind, &GeneratedScale)> {
        TokenKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// The three sheets merged into a single `:root` block.
    pub fn live_stylesheet(&self) -> String {
        let sheets: Vec<&str> = self.iter().map(|(_, scale)| scale.css.as_str()).collect();
        merge_stylesheets(&sheets)
    }
}

pub fn generate_all(config: &TokenConfig) -> Result<TokenSet> {
    Ok(TokenSet {
        root_font_size: config.root_font_size,
        typography: generate_scale(config, TokenKind::Typography)?,
        spacing: generate_scale(config, TokenKind::Spacing)?,
        gap: generate_scale(config, TokenKind::Gap)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NagareError;

    #[test]
    fn default_typography_matches_reference_lines() {
        let scale = generate_scale(&TokenConfig::default(), TokenKind::Typography).unwrap();
        assert_eq!(scale.tokens.len(), 11);
        assert!(scale
            .css
            .contains("    --body-m: clamp(1.400rem, 0.018vw + 1.343rem, 1.600rem);\n"));
        assert!(scale.css.contains("    --body-xs: clamp(1.106rem, "));
        assert!(scale.css.starts_with("/* Root font-size: 100% (16px) */\n\n:root {\n"));
    }

    #[test]
    fn default_spacing_lines() {
        let scale = generate_scale(&TokenConfig::default(), TokenKind::Spacing).unwrap();
        assert_eq!(
            scale.names(),
            vec!["space-xs", "space-s", "space-m", "space-l", "space-xl"]
        );
        assert!(scale
            .css
            .contains("    --space-s: clamp(0.500rem, 0.045vw + 0.357rem, 1.000rem);\n"));
    }

    #[test]
    fn degenerate_viewport_wins_over_bad_steps() {
        let mut config = TokenConfig::default();
        config.viewport.min = 500.0;
        config.viewport.max = 500.0;
        config.typography.base_min = -1.0;
        assert_eq!(
            generate_scale(&config, TokenKind::Typography).unwrap_err(),
            NagareError::DegenerateViewport { width: 500.0 }
        );
    }

    #[test]
    fn invalid_base_is_reported() {
        let mut config = TokenConfig::default();
        config.gap.ratio_max = 0.0;
        assert!(matches!(
            generate_all(&config),
            Err(NagareError::InvalidConfig(_))
        ));
    }

    #[test]
    fn accessors_follow_step_order() {
        let scale = generate_scale(&TokenConfig::default(), TokenKind::Gap).unwrap();
        assert_eq!(scale.min_values()[1], 0.75);
        assert_eq!(scale.max_values()[1], 1.5);
        assert_eq!(scale.range("gap-s").unwrap().min, 0.75);
        assert!(scale.range("gap-xxl").is_none());
    }

    #[test]
    fn value_at_hits_bounds() {
        let scale = generate_scale(&TokenConfig::default(), TokenKind::Typography).unwrap();
        let token = scale.token("title-1").unwrap();
        assert!((token.value_at(320.0) - token.range.min).abs() < 1e-9);
        assert!((token.value_at(1440.0) - token.range.max).abs() < 1e-9);
        assert_eq!(token.value_at(100.0), token.range.min);
    }

    #[test]
    fn live_stylesheet_merges_all_kinds() {
        let mut config = TokenConfig::default();
        config.root_font_size = RootUnit::Percent62_5;
        let set = generate_all(&config).unwrap();
        let live = set.live_stylesheet();
        assert_eq!(live.matches(":root {").count(), 1);
        assert_eq!(live.matches("html { font-size: 62.5%; }").count(), 1);
        assert_eq!(live.matches("    --").count(), 21);
        assert!(live.find("--body-xs").unwrap() < live.find("--space-xs").unwrap());
        assert!(live.find("--space-xl").unwrap() < live.find("--gap-xs").unwrap());
        assert!(live.ends_with(";\n}"));
    }

    #[test]
    fn generation_is_deterministic() {
        let config = TokenConfig::default();
        let a = generate_all(&config).unwrap();
        let b = generate_all(&config).unwrap();
        assert_eq!(a.live_stylesheet(), b.live_stylesheet());
        for kind in TokenKind::ALL {
            assert_eq!(a.get(kind).css, b.get(kind).css);
        }
    }
}
