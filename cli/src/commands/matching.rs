use std::io::{stdin, stdout, BufRead, Write};
use std::process;

use anyhow::Context;
use clap::{arg, ArgAction, ArgMatches, Command};
use log::debug;
use yansi::Color::{Green, Red};
use yansi::Paint;

use regex_dfa::Automaton;

use crate::commands::{compile_pattern, pattern_arg};
use crate::config::MatchConfig;
use crate::help;

/// Exit code used when none of the inputs matched.
const EXIT_NO_MATCH: i32 = 1;

pub fn matching() -> Command {
    super::command("match")
        .about("Match strings against a pattern")
        .long_about(help::MATCH_LONG_HELP)
        .arg(pattern_arg())
        .arg(
            arg!([INPUT])
                .help("Strings to match, read from stdin if none given")
                .action(ArgAction::Append),
        )
}

pub fn exec_match(
    args: &ArgMatches,
    config: MatchConfig,
) -> anyhow::Result<()> {
    let automaton = compile_pattern(args)?;

    debug!(
        "pattern compiled into {} states and {} rules",
        automaton.num_states(),
        automaton.rules().len()
    );

    let mut out = stdout().lock();
    let mut matched = false;

    match args.get_many::<String>("INPUT") {
        Some(inputs) => {
            for input in inputs {
                matched |= report(&mut out, &automaton, input, &config)?;
            }
        }
        None => {
            for line in stdin().lock().lines() {
                let line = line.context("can not read from stdin")?;
                matched |= report(&mut out, &automaton, &line, &config)?;
            }
        }
    }

    out.flush()?;

    if !matched {
        process::exit(EXIT_NO_MATCH)
    }

    Ok(())
}

/// Matches `input` and prints the result. Returns true if it matched.
fn report<W: Write>(
    out: &mut W,
    automaton: &Automaton,
    input: &str,
    config: &MatchConfig,
) -> anyhow::Result<bool> {
    let is_match = automaton.is_match(input);

    if is_match {
        writeln!(out, "{}: {}", input, "match".paint(Green).bold())?;
    } else if config.print_non_matching {
        writeln!(out, "{}: {}", input, "no match".paint(Red).bold())?;
    }

    Ok(is_match)
}
