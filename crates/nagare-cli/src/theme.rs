//! Dark-mode preference for the dashboard.

use crate::prefs::Preferences;
use crate::store::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ThemeMode {
    Dark,
    Light,
    /// Follow the operating system.
    System,
    /// Flip the remembered mode.
    Toggle,
}

/// Resolve `System` to a concrete mode; the OS answer falls back to light.
pub fn system_is_dark() -> bool {
    match dark_light::detect() {
        Ok(dark_light::Mode::Dark) => true,
        Ok(_) => false,
        Err(e) => {
            tracing::debug!("Could not detect system theme: {e}");
            false
        }
    }
}

/// Apply `mode` (or just report when `None`) and return whether dark mode is on.
pub fn apply<S: KeyValueStore>(
    prefs: &mut Preferences<S>,
    mode: Option<ThemeMode>,
    detect_system: impl Fn() -> bool,
) -> bool {
    let dark = match mode {
        None if prefs.has_dark_mode() => return prefs.load_dark_mode(),
        None => return detect_system(),
        Some(ThemeMode::Dark) => true,
        Some(ThemeMode::Light) => false,
        Some(ThemeMode::System) => detect_system(),
        Some(ThemeMode::Toggle) => !prefs.load_dark_mode(),
    };
    prefs.save_dark_mode(dark);
    tracing::info!(dark, "Dark mode preference saved");
    dark
}

pub fn describe(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}
