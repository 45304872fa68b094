//! Browser bindings: JSON in, JSON out.

use nagare_core::{
    evaluate_clamped, format::format_px, generate_all, solve, GeneratedScale, RootUnit,
    StepRange, TokenConfig, TokenSet, ViewportRange,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct ScaleDto<'a> {
    css: &'a str,
    tokens: Vec<&'a str>,
    min_values: Vec<f64>,
    max_values: Vec<f64>,
}

#[derive(Serialize)]
struct TokenSetDto<'a> {
    typography: ScaleDto<'a>,
    spacing: ScaleDto<'a>,
    gap: ScaleDto<'a>,
    live_css: String,
}

impl<'a> From<&'a GeneratedScale> for ScaleDto<'a> {
    fn from(scale: &'a GeneratedScale) -> Self {
        Self {
            css: &scale.css,
            tokens: scale.names(),
            min_values: scale.min_values(),
            max_values: scale.max_values(),
        }
    }
}

impl<'a> From<&'a TokenSet> for TokenSetDto<'a> {
    fn from(set: &'a TokenSet) -> Self {
        Self {
            typography: (&set.typography).into(),
            spacing: (&set.spacing).into(),
            gap: (&set.gap).into(),
            live_css: set.live_stylesheet(),
        }
    }
}

fn error_json(message: impl ToString) -> String {
    serde_json::json!({ "error": message.to_string() }).to_string()
}

/// Generate all three scales from a JSON `TokenConfig`.
///
/// An empty string uses the built-in defaults. Failures come back as
/// `{"error": "..."}`.
#[wasm_bindgen]
pub fn generate_tokens(config_json: &str) -> String {
    let config = if config_json.trim().is_empty() {
        TokenConfig::default()
    } else {
        match serde_json::from_str::<TokenConfig>(config_json) {
            Ok(config) => config,
            Err(e) => return error_json(format!("config error: {e}")),
        }
    };

    match generate_all(&config) {
        Ok(set) => serde_json::to_string(&TokenSetDto::from(&set)).unwrap_or_else(error_json),
        Err(e) => error_json(e),
    }
}

/// Actual pixel size of one step at `current` viewport width, two decimals.
///
/// Returns an empty string for an invalid viewport or root size.
#[wasm_bindgen]
pub fn actual_size(
    min_value: f64,
    max_value: f64,
    viewport_min: f64,
    viewport_max: f64,
    current: f64,
    root_font_size: u8,
) -> String {
    let Some(root) = RootUnit::from_px(root_font_size) else {
        return String::new();
    };
    let range = StepRange::new("step", min_value, max_value);
    let Ok(viewport) = ViewportRange::new(viewport_min, viewport_max) else {
        return String::new();
    };
    match solve(&range, &viewport) {
        Ok(coeffs) => format_px(evaluate_clamped(&range, &coeffs, current) * root.px_per_unit()),
        Err(_) => String::new(),
    }
}

/// Built-in defaults as JSON, for populating the form.
#[wasm_bindgen]
pub fn default_config() -> String {
    serde_json::to_string(&TokenConfig::default()).unwrap_or_else(error_json)
}
