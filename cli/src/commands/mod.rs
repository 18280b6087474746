mod dump;
mod matching;

pub use dump::*;
pub use matching::*;

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{arg, command, ArgMatches, Command};

use crate::{commands, help, APP_HELP_TEMPLATE};
use regex_dfa::Automaton;

pub fn command(name: &'static str) -> Command {
    Command::new(name).help_template(
        r#"{about-with-newline}
{usage-heading}
  {usage}

{all-args}
"#,
    )
}

pub fn cli() -> Command {
    command!()
        .name("rdfa")
        .arg_required_else_help(true)
        .arg(
            arg!(-C --config <CONFIG_FILE> "Config file")
                .value_parser(existing_path_parser)
                .long_help(help::CONFIG_FILE),
        )
        .help_template(APP_HELP_TEMPLATE)
        .subcommand_required(true)
        .subcommands(vec![commands::matching(), commands::dump()])
}

/// Returns the `<PATTERN>` argument shared by all commands.
fn pattern_arg() -> clap::Arg {
    arg!(<PATTERN>).help("Pattern to compile").long_help(help::PATTERN_HELP)
}

/// Compiles the `<PATTERN>` argument.
fn compile_pattern(args: &ArgMatches) -> anyhow::Result<Automaton> {
    let pattern = args
        .get_one::<String>("PATTERN")
        .ok_or(anyhow!("missing pattern"))?;

    regex_dfa::compile(pattern)
        .with_context(|| format!("can not compile `{}`", pattern))
}

/// Parses a path and makes sure that it exists.
fn existing_path_parser(input: &str) -> Result<PathBuf, anyhow::Error> {
    let path = PathBuf::from(input);
    if path.try_exists()? {
        Ok(path)
    } else {
        Err(anyhow!("file not found"))
    }
}
