//! Root font-size presets and the relative unit written into declarations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How many absolute pixels one relative unit stands for.
///
/// Only affects pixel figures shown in previews and the optional base-size
/// rule in front of a stylesheet. Generated `rem` values are unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RootUnit {
    /// `html { font-size: 100% }`, 1rem = 16px.
    #[default]
    Percent100,
    /// `html { font-size: 62.5% }`, 1rem = 10px.
    Percent62_5,
}

impl RootUnit {
    pub const ALL: [RootUnit; 2] = [RootUnit::Percent100, RootUnit::Percent62_5];

    pub fn px_per_unit(self) -> f64 {
        f64::from(self.as_px())
    }

    pub fn as_px(self) -> u8 {
        match self {
            RootUnit::Percent100 => 16,
            RootUnit::Percent62_5 => 10,
        }
    }

    pub fn from_px(px: u8) -> Option<Self> {
        match px {
            16 => Some(RootUnit::Percent100),
            10 => Some(RootUnit::Percent62_5),
            _ => None,
        }
    }

    pub fn percentage(self) -> &'static str {
        match self {
            RootUnit::Percent100 => "100%",
            RootUnit::Percent62_5 => "62.5%",
        }
    }

    /// Global rule overriding the document font size, if this preset needs one.
    pub fn base_rule(self) -> Option<&'static str> {
        match self {
            RootUnit::Percent100 => None,
            RootUnit::Percent62_5 => Some("html { font-size: 62.5%; }"),
        }
    }

    /// Comment (and rule, when needed) emitted before a generated `:root` block.
    pub fn preamble(self) -> String {
        let mut out = format!(
            "/* Root font-size: {} ({}px) */\n",
            self.percentage(),
            self.as_px()
        );
        if let Some(rule) = self.base_rule() {
            out.push_str(rule);
            out.push('\n');
        }
        out.push('\n');
        out
    }
}

impl From<RootUnit> for u8 {
    fn from(unit: RootUnit) -> Self {
        unit.as_px()
    }
}

impl TryFrom<u8> for RootUnit {
    type Error = String;

    fn try_from(px: u8) -> Result<Self, Self::Error> {
        RootUnit::from_px(px).ok_or_else(|| format!("unsupported root font size {px}px (expected 16 or 10)"))
    }
}

impl fmt::Display for RootUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}px)", self.percentage(), self.as_px())
    }
}

/// Relative unit appended to every emitted length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssUnit {
    #[default]
    Rem,
    Em,
    Px,
}

impl CssUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            CssUnit::Rem => "rem",
            CssUnit::Em => "em",
            CssUnit::Px => "px",
        }
    }
}

impl fmt::Display for CssUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CssUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rem" => Ok(CssUnit::Rem),
            "em" => Ok(CssUnit::Em),
            "px" => Ok(CssUnit::Px),
            other => Err(format!("unknown unit `{other}`")),
        }
    }
}
