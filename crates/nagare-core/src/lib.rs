//! Fluid `clamp()` scales for typography, spacing and gap tokens.
//!
//! A scale is a geometric progression between a small-screen and a
//! large-screen base size. Each step is interpolated linearly across a
//! viewport range and rendered as a CSS custom property:
//!
//! ```text
//! --body-m: clamp(1.400rem, 0.018vw + 1.343rem, 1.600rem);
//! ```
//!
//! Everything here is pure: no I/O, no shared state.

pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod interpolate;
pub mod preview;
pub mod scale;
pub mod units;

pub use config::{ScaleSettings, TokenConfig, ViewportConfig};
pub use engine::{build_scale, generate_all, generate_scale, FluidToken, GeneratedScale, TokenSet};
pub use error::NagareError;
pub use format::{format_clamp_expression, format_stylesheet, merge_stylesheets};
pub use interpolate::{evaluate_clamped, solve, LinearCoefficients, ViewportRange};
pub use preview::{actual_size_px, preview_rows, PreviewRow, PreviewViewport};
pub use scale::{generate, ScaleConfig, ScaleStep, StepRange, TokenKind};
pub use units::{CssUnit, RootUnit};
