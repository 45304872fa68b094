//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use nagare_core::{CssUnit, PreviewViewport, RootUnit, TokenConfig, TokenKind};

use crate::theme::ThemeMode;

#[derive(Parser)]
#[command(
    name = "nagare",
    version,
    about = "Fluid clamp() design tokens for typography, spacing and gaps"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More log output (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Read the configuration from a TOML file instead of the remembered one.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Neither read nor write remembered settings.
    #[arg(long, global = true)]
    pub no_save: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the generated CSS.
    Generate(GenerateArgs),

    /// Show the actual size of every token at a viewport width.
    Preview(PreviewArgs),

    /// Forget the remembered configuration and print the default CSS.
    Reset,

    /// Print the effective configuration as TOML.
    Config(ConfigArgs),

    /// Show or change the dark-mode preference.
    Theme {
        #[arg(value_enum)]
        mode: Option<ThemeMode>,
    },
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Which scale to print.
    #[arg(long, value_enum, default_value = "all")]
    pub kind: KindArg,

    /// Print one merged `:root` block instead of separate sheets.
    #[arg(long, conflicts_with = "kind")]
    pub live: bool,

    /// Also copy the output to the clipboard.
    #[arg(long)]
    pub copy: bool,

    #[command(flatten)]
    pub overrides: Overrides,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// mobile, tablet, desktop or a width in px.
    #[arg(long, default_value = "mobile")]
    pub viewport: PreviewViewport,

    #[arg(long, value_enum, default_value = "all")]
    pub kind: KindArg,

    #[command(flatten)]
    pub overrides: Overrides,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub overrides: Overrides,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Typography,
    Spacing,
    Gap,
    All,
}

impl KindArg {
    pub fn kinds(self) -> Vec<TokenKind> {
        match self {
            KindArg::Typography => vec![TokenKind::Typography],
            KindArg::Spacing => vec![TokenKind::Spacing],
            KindArg::Gap => vec![TokenKind::Gap],
            KindArg::All => TokenKind::ALL.to_vec(),
        }
    }
}

/// Per-value overrides applied on top of the loaded configuration.
#[derive(Args)]
pub struct Overrides {
    #[arg(long, value_name = "PX")]
    pub viewport_min: Option<f64>,
    #[arg(long, value_name = "PX")]
    pub viewport_max: Option<f64>,

    /// Root font size in px: 16 (100%) or 10 (62.5%).
    #[arg(long, value_name = "PX", value_parser = parse_root)]
    pub root: Option<RootUnit>,
    /// Unit for generated lengths.
    #[arg(long)]
    pub unit: Option<CssUnit>,

    #[arg(long, value_name = "SIZE")]
    pub type_base_min: Option<f64>,
    #[arg(long, value_name = "SIZE")]
    pub type_base_max: Option<f64>,
    /// Typography ratio at the smallest viewport.
    #[arg(long, value_name = "RATIO")]
    pub type_ratio_min: Option<f64>,
    /// Typography ratio at the largest viewport.
    #[arg(long, value_name = "RATIO")]
    pub type_ratio_max: Option<f64>,

    #[arg(long, value_name = "SIZE")]
    pub space_base_min: Option<f64>,
    #[arg(long, value_name = "SIZE")]
    pub space_base_max: Option<f64>,
    #[arg(long, value_name = "RATIO")]
    pub space_ratio: Option<f64>,

    #[arg(long, value_name = "SIZE")]
    pub gap_base_min: Option<f64>,
    #[arg(long, value_name = "SIZE")]
    pub gap_base_max: Option<f64>,
    #[arg(long, value_name = "RATIO")]
    pub gap_ratio: Option<f64>,
}

impl Overrides {
    pub fn apply(&self, config: &mut TokenConfig) {
        set(&mut config.viewport.min, self.viewport_min);
        set(&mut config.viewport.max, self.viewport_max);
        if let Some(root) = self.root {
            config.root_font_size = root;
        }
        if let Some(unit) = self.unit {
            config.unit = unit;
        }

        set(&mut config.typography.base_min, self.type_base_min);
        set(&mut config.typography.base_max, self.type_base_max);
        set(&mut config.typography.ratio_min, self.type_ratio_min);
        set(&mut config.typography.ratio_max, self.type_ratio_max);

        set(&mut config.spacing.base_min, self.space_base_min);
        set(&mut config.spacing.base_max, self.space_base_max);
        set(&mut config.spacing.ratio_min, self.space_ratio);
        set(&mut config.spacing.ratio_max, self.space_ratio);

        set(&mut config.gap.base_min, self.gap_base_min);
        set(&mut config.gap.base_max, self.gap_base_max);
        set(&mut config.gap.ratio_min, self.gap_ratio);
        set(&mut config.gap.ratio_max, self.gap_ratio);
    }
}

fn set(slot: &mut f64, value: Option<f64>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn parse_root(s: &str) -> Result<RootUnit, String> {
    let px: u8 = s
        .trim()
        .trim_end_matches("px")
        .parse()
        .map_err(|_| format!("`{s}` is not a pixel size"))?;
    RootUnit::try_from(px)
}
