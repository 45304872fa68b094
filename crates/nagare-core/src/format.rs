//! Render fluid tokens as CSS.
//!
//! All lengths are printed in fixed-point with three decimals, rounding
//! half away from zero on the exact binary value. Output is deterministic:
//! the same input always produces byte-identical text.

use std::fmt::Write as _;

use crate::interpolate::LinearCoefficients;
use crate::scale::StepRange;
use crate::units::{CssUnit, RootUnit};

/// Decimals used for every length in generated CSS.
pub const CSS_PRECISION: usize = 3;

/// Decimals used for pixel figures in previews.
pub const PX_PRECISION: usize = 2;

const ROOT_SELECTOR: &str = ":root {";

/// Fixed-point rendering with `digits` decimals, ties rounded away from zero.
///
/// Never uses exponent notation and never prints a negative zero.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rendered = if is_exact_tie(value, digits) {
        round_tie_away(value, digits)
    } else {
        format!("{value:.digits$}")
    };

    match rendered.strip_prefix('-') {
        Some(magnitude) if magnitude.bytes().all(|b| b == b'0' || b == b'.') => {
            magnitude.to_string()
        }
        _ => rendered,
    }
}

/// True when `value` sits exactly halfway between two `digits`-decimal numbers.
///
/// That only happens when `value * 2^(digits + 1)` is an odd integer; the
/// multiplication is by a power of two and therefore exact.
fn is_exact_tie(value: f64, digits: usize) -> bool {
    let Ok(exp) = i32::try_from(digits + 1) else {
        return false;
    };
    let doubled = value * 2f64.powi(exp);
    doubled.is_finite() && doubled.fract() == 0.0 && doubled % 2.0 != 0.0
}

fn round_tie_away(value: f64, digits: usize) -> String {
    let scale = 10f64.powi(digits as i32);
    let units = format!("{:.0}", (value.abs() * scale).ceil());
    let padded = format!("{units:0>width$}", width = digits + 1);
    let (whole, frac) = padded.split_at(padded.len() - digits);
    let sign = if value < 0.0 { "-" } else { "" };
    if digits == 0 {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{frac}")
    }
}

/// `to_fixed` with the CSS precision.
pub fn css_number(value: f64) -> String {
    to_fixed(value, CSS_PRECISION)
}

/// Pixel figure with two decimals, as shown next to previews.
pub fn format_px(value: f64) -> String {
    to_fixed(value, PX_PRECISION)
}

/// `clamp(<min>, <vw>vw ± <offset>, <max>)` for one step.
///
/// The offset is always a non-negative magnitude behind an explicit sign,
/// chosen after rounding so `0.000` is never written as `- 0.000`.
pub fn format_clamp_expression(
    range: &StepRange,
    coeffs: &LinearCoefficients,
    unit: CssUnit,
) -> String {
    let offset = css_number(coeffs.intercept.abs());
    let negative = coeffs.intercept < 0.0 && offset.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let sign = if negative { '-' } else { '+' };

    format!(
        "clamp({min}{unit}, {vw}vw {sign} {offset}{unit}, {max}{unit})",
        min = css_number(range.min),
        max = css_number(range.max),
        vw = css_number(coeffs.vw()),
    )
}

/// One custom-property declaration, without indentation or newline.
pub fn format_declaration(range: &StepRange, coeffs: &LinearCoefficients, unit: CssUnit) -> String {
    format!(
        "--{}: {};",
        range.name,
        format_clamp_expression(range, coeffs, unit)
    )
}

/// A `:root` block with one declaration per step, in input order.
///
/// With a root unit, the block is preceded by a comment describing it (and
/// the `html` font-size override for the 62.5% preset).
pub fn format_stylesheet<'a, I>(tokens: I, unit: CssUnit, root: Option<RootUnit>) -> String
where
    I: IntoIterator<Item = (&'a StepRange, &'a LinearCoefficients)>,
{
    let mut css = root.map(RootUnit::preamble).unwrap_or_default();
    css.push_str(ROOT_SELECTOR);
    css.push('\n');
    for (range, coeffs) in tokens {
        // Writing into a String cannot fail.
        let _ = writeln!(css, "    {}", format_declaration(range, coeffs, unit));
    }
    css.push('}');
    css
}

/// Merge generated stylesheets into a single `:root` block.
///
/// Keeps the preamble of the first sheet only and concatenates every
/// declaration body. Purely textual: each sheet is expected to have the shape
/// produced by [`format_stylesheet`]. A sheet without a `:root {` wrapper is
/// taken to be bare declarations.
pub fn merge_stylesheets<S: AsRef<str>>(sheets: &[S]) -> String {
    let mut preamble = "";
    let mut body = String::new();

    for (i, sheet) in sheets.iter().enumerate() {
        let (pre, declarations) = split_sheet(sheet.as_ref());
        if i == 0 {
            preamble = pre;
        }
        if !declarations.is_empty() {
            body.push_str(declarations);
            body.push('\n');
        }
    }

    let mut css = String::with_capacity(preamble.len() + body.len() + 16);
    css.push_str(preamble);
    css.push_str(ROOT_SELECTOR);
    css.push('\n');
    css.push_str(&body);
    css.push('}');
    css
}

/// Split a sheet into `(preamble, declarations)`, with the wrapper removed.
fn split_sheet(sheet: &str) -> (&str, &str) {
    match sheet.find(ROOT_SELECTOR) {
        Some(idx) => {
            let inner = &sheet[idx + ROOT_SELECTOR.len()..];
            let inner = inner.trim_end();
            let inner = inner.strip_suffix('}').unwrap_or(inner);
            (&sheet[..idx], inner.trim_matches('\n').trim_end())
        }
        None => ("", sheet.trim_matches('\n').trim_end()),
    }
}
