mod commands;
mod config;
mod help;

#[cfg(test)]
mod tests;

use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::anyhow;
use clap::ArgMatches;
use config::{load_config_from_file, Config};
use crossterm::tty::IsTty;
use log::debug;
use yansi::Color::Red;
use yansi::Paint;

use crate::commands::cli;

const APP_HELP_TEMPLATE: &str = r#"rdfa {version}, whole-string matching with DFAs.

{before-help}{usage-heading}
  {usage}

{all-args}{after-help}
"#;

const EXIT_ERROR: i32 = 1;
const CONFIG_FILE: &str = ".rdfa.toml";

fn main() -> anyhow::Result<()> {
    // Enable support for ANSI escape codes in Windows. In other platforms
    // this is a no-op.
    if let Err(err) = enable_ansi_support::enable_ansi_support() {
        println!("could not enable ANSI support: {}", err)
    }

    env_logger::init();

    // If stdout is not a tty (for example, because it was redirected to a
    // file) turn off colors.
    if !io::stdout().is_tty() {
        yansi::disable();
    }

    let args = cli().get_matches();

    let result = load_config(&args).and_then(|config| {
        match args.subcommand() {
            Some(("match", args)) => commands::exec_match(args, config.match_),
            Some(("dump", args)) => commands::exec_dump(args, config.dump),
            _ => unreachable!(),
        }
    });

    if let Err(err) = result {
        if let Some(source) = err.source() {
            eprintln!("{} {}: {}", "error:".paint(Red).bold(), err, source);
        } else {
            eprintln!("{} {}", "error:".paint(Red).bold(), err);
        }
        process::exit(EXIT_ERROR);
    }

    Ok(())
}

/// Loads the config file given with `--config`, or the one in the home
/// directory.
///
/// An explicit config file must be valid. The one in the home directory is
/// optional, if missing or invalid the default config is used.
fn load_config(args: &ArgMatches) -> anyhow::Result<Config> {
    if let Some(path) = args.get_one::<PathBuf>("config") {
        debug!("loading config from {}", path.display());
        return load_config_from_file(path).map_err(|err| {
            anyhow!("invalid config file `{}`: {}", path.display(), err)
        });
    }

    let config = match home::home_dir() {
        Some(home_path) if !home_path.as_os_str().is_empty() => {
            load_config_from_file(&home_path.join(CONFIG_FILE))
                .unwrap_or_default()
        }
        _ => Config::default(),
    };

    Ok(config)
}
