//! Point evaluation for "actual size" previews.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::engine::{FluidToken, GeneratedScale};
use crate::format::{css_number, format_px};
use crate::units::RootUnit;

/// Device widths offered by the preview toggle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviewViewport {
    Mobile,
    Tablet,
    Desktop,
    Custom(f64),
}

impl PreviewViewport {
    pub fn width(self) -> f64 {
        match self {
            PreviewViewport::Mobile => 320.0,
            PreviewViewport::Tablet => 768.0,
            PreviewViewport::Desktop => 1440.0,
            PreviewViewport::Custom(px) => px,
        }
    }
}

impl fmt::Display for PreviewViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewViewport::Mobile => f.write_str("mobile (320px)"),
            PreviewViewport::Tablet => f.write_str("tablet (768px)"),
            PreviewViewport::Desktop => f.write_str("desktop (1440px)"),
            PreviewViewport::Custom(px) => write!(f, "{px}px"),
        }
    }
}

impl FromStr for PreviewViewport {
    type Err = String;

    /// Accepts a preset name or a width in px (`"768"`, `"768px"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "mobile" => Ok(PreviewViewport::Mobile),
            "tablet" => Ok(PreviewViewport::Tablet),
            "desktop" => Ok(PreviewViewport::Desktop),
            other => {
                let number = other.strip_suffix("px").unwrap_or(other);
                match number.parse::<f64>() {
                    Ok(px) if px.is_finite() && px >= 0.0 => Ok(PreviewViewport::Custom(px)),
                    _ => Err(format!(
                        "`{s}` is not a viewport (mobile, tablet, desktop or a width in px)"
                    )),
                }
            }
        }
    }
}

/// Clamped value of `token` at width `x`, converted to pixels.
pub fn actual_size_px(token: &FluidToken, x: f64, root: RootUnit) -> f64 {
    token.value_at(x) * root.px_per_unit()
}

/// One line of a preview listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewRow {
    pub name: String,
    /// Pixels with two decimals.
    pub actual_px: String,
    /// Relative units with three decimals.
    pub min: String,
    pub max: String,
}

pub fn preview_rows(scale: &GeneratedScale, x: f64, root: RootUnit) -> Vec<PreviewRow> {
    scale
        .tokens
        .iter()
        .map(|token| PreviewRow {
            name: token.name().to_string(),
            actual_px: format_px(actual_size_px(token, x, root)),
            min: css_number(token.range.min),
            max: css_number(token.range.max),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TokenConfig;
    use crate::engine::generate_scale;
    use crate::scale::TokenKind;

    #[test]
    fn parses_presets_and_widths() {
        assert_eq!("Tablet".parse::<PreviewViewport>(), Ok(PreviewViewport::Tablet));
        assert_eq!("1024px".parse::<PreviewViewport>(), Ok(PreviewViewport::Custom(1024.0)));
        assert_eq!("600".parse::<PreviewViewport>().unwrap().width(), 600.0);
        assert!("huge".parse::<PreviewViewport>().is_err());
        assert!("-5".parse::<PreviewViewport>().is_err());
    }

    #[test]
    fn body_m_on_mobile_and_desktop() {
        let scale = generate_scale(&TokenConfig::default(), TokenKind::Typography).unwrap();
        let token = scale.token("body-m").unwrap();
        assert_eq!(
            format_px(actual_size_px(token, PreviewViewport::Mobile.width(), RootUnit::Percent100)),
            "22.40"
        );
        assert_eq!(
            format_px(actual_size_px(token, PreviewViewport::Desktop.width(), RootUnit::Percent100)),
            "25.60"
        );
        assert_eq!(
            format_px(actual_size_px(token, PreviewViewport::Desktop.width(), RootUnit::Percent62_5)),
            "16.00"
        );
    }

    #[test]
    fn tablet_is_interpolated() {
        let scale = generate_scale(&TokenConfig::default(), TokenKind::Typography).unwrap();
        let token = scale.token("body-m").unwrap();
        // 1.4 + 0.2 * (768 - 320) / 1120 = 1.48rem
        let px = actual_size_px(token, 768.0, RootUnit::Percent100);
        assert!((px - 23.68).abs() < 1e-9);
    }

    #[test]
    fn rows_follow_scale_order() {
        let scale = generate_scale(&TokenConfig::default(), TokenKind::Spacing).unwrap();
        let rows = preview_rows(&scale, 320.0, RootUnit::Percent100);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[1].name, "space-s");
        assert_eq!(rows[1].actual_px, "8.00");
        assert_eq!(rows[1].min, "0.500");
        assert_eq!(rows[1].max, "1.000");
    }
}
