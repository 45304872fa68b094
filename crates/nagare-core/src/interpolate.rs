//! Linear interpolation between two viewport widths.

use serde::{Deserialize, Serialize};

use crate::error::{NagareError, Result};
use crate::scale::StepRange;

/// Viewport widths (in px) at which a step reaches its min and max.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRange {
    pub min: f64,
    pub max: f64,
}

impl ViewportRange {
    /// Build a validated range. Equal bounds are a [`NagareError::DegenerateViewport`].
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(NagareError::InvalidConfig(format!(
                "viewport bounds must be finite, got {}..{}",
                self.min, self.max
            )));
        }
        if self.min == self.max {
            return Err(NagareError::DegenerateViewport { width: self.min });
        }
        if self.min > self.max {
            return Err(NagareError::InvalidConfig(format!(
                "viewport min ({}) must be below viewport max ({})",
                self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

/// `f(x) = slope * x + intercept`, with `x` the viewport width in px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearCoefficients {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearCoefficients {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Slope expressed per `vw` (1vw is 1% of the viewport).
    pub fn vw(&self) -> f64 {
        self.slope * 100.0
    }
}

/// Solve the line through `(viewport.min, range.min)` and `(viewport.max, range.max)`.
///
/// A range with `max < min` gives a negative slope; that is accepted.
pub fn solve(range: &StepRange, viewport: &ViewportRange) -> Result<LinearCoefficients> {
    viewport.validate()?;

    let slope = (range.max - range.min) / viewport.width();
    let intercept = range.min - slope * viewport.min;
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(NagareError::InvalidConfig(format!(
            "step `{}` has no finite interpolation",
            range.name
        )));
    }
    Ok(LinearCoefficients { slope, intercept })
}

/// Value of the line at `x`, bounded to the step's `[low, high]` envelope.
///
/// `x` may lie outside the viewport range; the result never leaves the
/// declared bounds whatever the sign of the slope.
pub fn evaluate_clamped(range: &StepRange, coeffs: &LinearCoefficients, x: f64) -> f64 {
    coeffs.at(x).max(range.low()).min(range.high())
}
