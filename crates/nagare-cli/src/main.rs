mod cli;
mod commands;
mod error;
mod prefs;
mod store;
mod theme;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::prefs::Preferences;
use crate::store::{FileStore, KeyValueStore, MemoryStore};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    let store: Box<dyn KeyValueStore> = if cli.no_save {
        Box::new(MemoryStore::default())
    } else {
        let store = FileStore::open_default();
        tracing::debug!(path = %store.path().display(), "Using settings store");
        Box::new(store)
    };
    let mut prefs = Preferences::new(store);
    let config_file = cli.config.as_deref();

    match cli.command {
        Command::Generate(args) => commands::run_generate(&mut prefs, config_file, &args),
        Command::Preview(args) => commands::run_preview(&prefs, config_file, &args),
        Command::Reset => commands::run_reset(&mut prefs),
        Command::Config(args) => commands::run_config(&prefs, config_file, &args.overrides),
        Command::Theme { mode } => Ok(commands::run_theme(&mut prefs, mode)),
    }
}

/// Log to stderr so generated CSS on stdout stays clean.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "nagare=warn,nagare_core=warn",
        1 => "nagare=debug,nagare_core=debug",
        _ => "nagare=trace,nagare_core=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
