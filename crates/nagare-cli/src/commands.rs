use std::path::Path;

use nagare_core::{generate_all, generate_scale, preview_rows, TokenConfig, TokenKind};

use crate::cli::{GenerateArgs, Overrides, PreviewArgs};
use crate::error::CliError;
use crate::prefs::Preferences;
use crate::store::KeyValueStore;
use crate::theme::{self, ThemeMode};

/// Config file if given, otherwise the remembered config, otherwise defaults;
/// command-line overrides win over all of them.
pub fn resolve_config<S: KeyValueStore>(
    prefs: &Preferences<S>,
    config_file: Option<&Path>,
    overrides: &Overrides,
) -> Result<TokenConfig, CliError> {
    let mut config = match config_file {
        Some(path) => {
            let source = std::fs::read_to_string(path)?;
            tracing::debug!(path = %path.display(), "Loading config file");
            TokenConfig::from_toml_str(&source)?
        }
        None => prefs.load_config().unwrap_or_default(),
    };
    overrides.apply(&mut config);
    Ok(config)
}

pub fn run_generate<S: KeyValueStore>(
    prefs: &mut Preferences<S>,
    config_file: Option<&Path>,
    args: &GenerateArgs,
) -> Result<String, CliError> {
    let config = resolve_config(prefs, config_file, &args.overrides)?;

    let css = if args.live {
        generate_all(&config)?.live_stylesheet()
    } else {
        let sheets = args
            .kind
            .kinds()
            .into_iter()
            .map(|kind| generate_scale(&config, kind).map(|scale| scale.css))
            .collect::<Result<Vec<_>, _>>()?;
        sheets.join("\n\n")
    };

    prefs.save_config(&config);
    tracing::info!("Generated tokens");

    if args.copy {
        copy_to_clipboard(&css)?;
    }
    Ok(css)
}

pub fn run_preview<S: KeyValueStore>(
    prefs: &Preferences<S>,
    config_file: Option<&Path>,
    args: &PreviewArgs,
) -> Result<String, CliError> {
    let config = resolve_config(prefs, config_file, &args.overrides)?;
    let width = args.viewport.width();
    let root = config.root_font_size;
    let unit = config.unit;

    let mut out = String::new();
    for (i, kind) in args.kind.kinds().into_iter().enumerate() {
        let scale = generate_scale(&config, kind)?;
        let rows = preview_rows(&scale, width, root);
        let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0).max(4);

        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{kind} @ {}, 1{unit} = {}px\n", args.viewport, root.as_px()));
        out.push_str(&table_row(name_width, ["name", "actual", "min", "max"]));
        for row in rows {
            out.push_str(&table_row(
                name_width,
                [
                    row.name.as_str(),
                    format!("{}px", row.actual_px).as_str(),
                    format!("{}{unit}", row.min).as_str(),
                    format!("{}{unit}", row.max).as_str(),
                ],
            ));
        }
    }
    Ok(out.trim_end().to_string())
}

/// One indented preview line: name left-aligned, values right-aligned.
fn table_row(name_width: usize, [name, actual, min, max]: [&str; 4]) -> String {
    format!("  {name:<name_width$}  {actual:>10}  {min:>10}  {max:>10}\n")
}

/// Forget the remembered configuration and regenerate from defaults.
pub fn run_reset<S: KeyValueStore>(prefs: &mut Preferences<S>) -> Result<String, CliError> {
    prefs.clear_config();
    tracing::info!("Configuration reset to defaults");

    let set = generate_all(&TokenConfig::default())?;
    let sheets: Vec<&str> = TokenKind::ALL
        .iter()
        .map(|&kind| set.get(kind).css.as_str())
        .collect();
    Ok(sheets.join("\n\n"))
}

pub fn run_config<S: KeyValueStore>(
    prefs: &Preferences<S>,
    config_file: Option<&Path>,
    overrides: &Overrides,
) -> Result<String, CliError> {
    let config = resolve_config(prefs, config_file, overrides)?;
    Ok(config.to_toml_string()?)
}

pub fn run_theme<S: KeyValueStore>(prefs: &mut Preferences<S>, mode: Option<ThemeMode>) -> String {
    let dark = theme::apply(prefs, mode, theme::system_is_dark);
    format!("{} mode", theme::describe(dark))
}

fn copy_to_clipboard(text: &str) -> Result<(), CliError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| CliError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_owned())
        .map_err(|e| CliError::Clipboard(e.to_string()))?;
    tracing::info!(bytes = text.len(), "Copied CSS to clipboard");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Command};
    use crate::store::MemoryStore;

    fn parse(args: &[&str]) -> Command {
        let mut argv = vec!["nagare"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    fn generate_args(args: &[&str]) -> GenerateArgs {
        let mut argv = vec!["generate"];
        argv.extend_from_slice(args);
        match parse(&argv) {
            Command::Generate(args) => args,
            _ => unreachable!(),
        }
    }

    fn preview_args(args: &[&str]) -> PreviewArgs {
        let mut argv = vec!["preview"];
        argv.extend_from_slice(args);
        match parse(&argv) {
            Command::Preview(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn generate_prints_all_sheets_and_remembers_config() {
        let mut prefs = Preferences::new(MemoryStore::default());
        let css = run_generate(&mut prefs, None, &generate_args(&["--viewport-max", "1280"])).unwrap();

        assert_eq!(css.matches(":root {").count(), 3);
        assert!(css.contains("--body-m: clamp(1.400rem, "));
        assert!(css.contains("--gap-xl: clamp("));
        assert_eq!(prefs.load_config().unwrap().viewport.max, 1280.0);
    }

    #[test]
    fn remembered_config_is_reused() {
        let mut prefs = Preferences::new(MemoryStore::default());
        run_generate(&mut prefs, None, &generate_args(&["--root", "10"])).unwrap();

        let css = run_generate(&mut prefs, None, &generate_args(&["--kind", "spacing"])).unwrap();
        assert!(css.starts_with("/* Root font-size: 62.5% (10px) */\nhtml { font-size: 62.5%; }"));
        assert!(!css.contains("--body-m"));
    }

    #[test]
    fn live_output_is_one_block() {
        let mut prefs = Preferences::new(MemoryStore::default());
        let css = run_generate(&mut prefs, None, &generate_args(&["--live"])).unwrap();
        assert_eq!(css.matches(":root {").count(), 1);
        assert_eq!(css.matches("    --").count(), 21);
    }

    #[test]
    fn invalid_input_is_an_error_and_not_saved() {
        let mut prefs = Preferences::new(MemoryStore::default());
        let err = run_generate(
            &mut prefs,
            None,
            &generate_args(&["--viewport-min", "800", "--viewport-max", "800"]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("degenerate viewport"));
        assert!(prefs.load_config().is_none());
    }

    #[test]
    fn config_file_takes_precedence_over_remembered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.toml");
        std::fs::write(&path, "[viewport]\nmin = 400\n").unwrap();

        let mut prefs = Preferences::new(MemoryStore::default());
        run_generate(&mut prefs, None, &generate_args(&["--viewport-min", "360"])).unwrap();

        let overrides = match parse(&["config"]) {
            Command::Config(args) => args.overrides,
            _ => unreachable!(),
        };
        let config = resolve_config(&prefs, Some(&path), &overrides).unwrap();
        assert_eq!(config.viewport.min, 400.0);

        let toml = run_config(&prefs, None, &overrides).unwrap();
        assert!(toml.contains("min = 360.0"));
    }

    #[test]
    fn preview_lists_actual_sizes() {
        let prefs = Preferences::new(MemoryStore::default());
        let out = run_preview(&prefs, None, &preview_args(&["--kind", "typography"])).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "typography @ mobile (320px), 1rem = 16px");
        assert_eq!(lines.len(), 2 + 11);
        let body_m = lines.iter().find(|l| l.contains("body-m")).unwrap();
        assert!(body_m.contains("22.40px"));
        assert!(body_m.contains("1.400rem"));
        assert!(body_m.contains("1.600rem"));
    }

    #[test]
    fn table_rows_align_columns() {
        assert_eq!(
            table_row(6, ["body-m", "22.40px", "1.400rem", "1.600rem"]),
            "  body-m     22.40px    1.400rem    1.600rem\n"
        );
        assert_eq!(table_row(6, ["gap-s", "", "", ""]).len(), 2 + 6 + 3 * 12 + 1);
    }

    #[test]
    fn preview_on_desktop_uses_max() {
        let prefs = Preferences::new(MemoryStore::default());
        let out = run_preview(
            &prefs,
            None,
            &preview_args(&["--viewport", "desktop", "--kind", "gap"]),
        )
        .unwrap();
        let gap_s = out.lines().find(|l| l.contains("gap-s ")).unwrap();
        assert!(gap_s.contains("24.00px"));
    }

    #[test]
    fn reset_forgets_config() {
        let mut prefs = Preferences::new(MemoryStore::default());
        run_generate(&mut prefs, None, &generate_args(&["--type-base-min", "2"])).unwrap();
        let css = run_reset(&mut prefs).unwrap();
        assert!(prefs.load_config().is_none());
        assert!(css.contains("--body-m: clamp(1.400rem, 0.018vw + 1.343rem, 1.600rem);"));
    }
}
