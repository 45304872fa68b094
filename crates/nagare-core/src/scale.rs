//! Geometric scale generation.
//!
//! Every step sits at an integer exponent relative to the base value
//! (exponent 0 is the base itself). The minimum and maximum of each step are
//! computed independently from their own base and ratio.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NagareError, Result};

/// A named position in a geometric progression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScaleStep {
    pub name: String,
    pub exponent: i32,
}

impl ScaleStep {
    pub fn new(name: impl Into<String>, exponent: i32) -> Self {
        Self {
            name: name.into(),
            exponent,
        }
    }
}

/// Input to [`generate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleConfig {
    pub base_min: f64,
    pub base_max: f64,
    pub ratio_min: f64,
    pub ratio_max: f64,
    pub steps: Vec<ScaleStep>,
}

/// Minimum and maximum value of one step.
///
/// No ordering between `min` and `max` is enforced here; a config with
/// `base_min > base_max` yields `min > max` for every step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRange {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl StepRange {
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }

    /// Lower edge of the envelope regardless of direction.
    pub fn low(&self) -> f64 {
        self.min.min(self.max)
    }

    /// Upper edge of the envelope regardless of direction.
    pub fn high(&self) -> f64 {
        self.min.max(self.max)
    }
}

/// `base * ratio^exponent`.
///
/// Negative exponents divide by the positive power so that exponent `-n`
/// equals `base / ratio^n` exactly.
pub fn step_value(base: f64, ratio: f64, exponent: i32) -> f64 {
    let power = ratio.powf(f64::from(exponent.unsigned_abs()));
    if exponent < 0 {
        base / power
    } else {
        base * power
    }
}

/// Compute the `(min, max)` pair of every step, in input order.
pub fn generate(config: &ScaleConfig) -> Result<Vec<StepRange>> {
    validate(config)?;

    config
        .steps
        .iter()
        .map(|step| {
            let min = step_value(config.base_min, config.ratio_min, step.exponent);
            let max = step_value(config.base_max, config.ratio_max, step.exponent);
            if !min.is_finite() || !max.is_finite() || min == 0.0 || max == 0.0 {
                return Err(NagareError::InvalidConfig(format!(
                    "step `{}` (exponent {}) is out of representable range",
                    step.name, step.exponent
                )));
            }
            Ok(StepRange::new(step.name.clone(), min, max))
        })
        .collect()
}

fn validate(config: &ScaleConfig) -> Result<()> {
    for (field, value) in [
        ("base_min", config.base_min),
        ("base_max", config.base_max),
        ("ratio_min", config.ratio_min),
        ("ratio_max", config.ratio_max),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(NagareError::InvalidConfig(format!(
                "{field} must be a positive number, got {value}"
            )));
        }
    }

    let mut seen = HashSet::with_capacity(config.steps.len());
    for step in &config.steps {
        if step.name.trim().is_empty() {
            return Err(NagareError::InvalidConfig("step name is empty".into()));
        }
        if !is_css_ident(&step.name) {
            return Err(NagareError::InvalidConfig(format!(
                "step name `{}` may only contain ASCII letters, digits, `-` and `_`",
                step.name
            )));
        }
        if !seen.insert(step.name.as_str()) {
            return Err(NagareError::InvalidConfig(format!(
                "duplicate step name `{}`",
                step.name
            )));
        }
    }
    Ok(())
}

/// Names become `--{name}` custom properties, so anything outside this set
/// would break the declaration.
fn is_css_ident(name: &str) -> bool {
    name.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// The scales shipped with the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Typography,
    Spacing,
    Gap,
}

const TYPOGRAPHY_STEPS: &[(&str, i32)] = &[
    ("body-xs", -2),
    ("body-s", -1),
    ("body-m", 0),
    ("body-l", 1),
    ("body-xl", 2),
    ("title-6", 3),
    ("title-5", 4),
    ("title-4", 5),
    ("title-3", 6),
    ("title-2", 7),
    ("title-1", 8),
];

const SPACING_STEPS: &[(&str, i32)] = &[
    ("space-xs", -1),
    ("space-s", 0),
    ("space-m", 1),
    ("space-l", 2),
    ("space-xl", 3),
];

const GAP_STEPS: &[(&str, i32)] = &[
    ("gap-xs", -1),
    ("gap-s", 0),
    ("gap-m", 1),
    ("gap-l", 2),
    ("gap-xl", 3),
];

impl TokenKind {
    pub const ALL: [TokenKind; 3] = [TokenKind::Typography, TokenKind::Spacing, TokenKind::Gap];

    /// Preset steps for this kind, smallest first.
    pub fn steps(self) -> Vec<ScaleStep> {
        let table = match self {
            TokenKind::Typography => TYPOGRAPHY_STEPS,
            TokenKind::Spacing => SPACING_STEPS,
            TokenKind::Gap => GAP_STEPS,
        };
        table
            .iter()
            .map(|&(name, exponent)| ScaleStep::new(name, exponent))
            .collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            TokenKind::Typography => "typography",
            TokenKind::Spacing => "spacing",
            TokenKind::Gap => "gap",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
