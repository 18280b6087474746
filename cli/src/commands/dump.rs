use std::io::{stdout, Write};

use clap::{ArgMatches, Command};
use yansi::Color::{Cyan, Yellow};
use yansi::Paint;

use regex_dfa::Automaton;

use crate::commands::{compile_pattern, pattern_arg};
use crate::config::DumpConfig;
use crate::help;

pub fn dump() -> Command {
    super::command("dump")
        .about("Show the DFA produced for a pattern")
        .long_about(help::DUMP_LONG_HELP)
        .arg(pattern_arg())
}

pub fn exec_dump(
    args: &ArgMatches,
    config: DumpConfig,
) -> anyhow::Result<()> {
    let automaton = compile_pattern(args)?;
    let mut out = stdout().lock();

    write_table(&mut out, &automaton, &config)?;
    out.flush()?;

    Ok(())
}

/// Writes the transition table of `automaton`.
///
/// ```text
/// start: 0
/// 0
///   'a' -> 1
/// 1 *
/// ```
fn write_table<W: Write>(
    out: &mut W,
    automaton: &Automaton,
    config: &DumpConfig,
) -> anyhow::Result<()> {
    writeln!(out, "start: {}", automaton.start())?;

    let mut rules = automaton.rules().to_vec();
    rules.sort_by_key(|rule| (rule.source, rule.symbol));

    let mut rules = rules.iter().peekable();

    for state in 0..automaton.num_states() {
        let id = state.to_string();
        if config.mark_accepting && automaton.is_accepting(state) {
            writeln!(out, "{} {}", id.paint(Cyan), "*".paint(Yellow))?;
        } else {
            writeln!(out, "{}", id.paint(Cyan))?;
        }
        while let Some(rule) = rules.next_if(|rule| rule.source == state) {
            writeln!(
                out,
                "  '{}' -> {}",
                std::ascii::escape_default(rule.symbol),
                rule.target
            )?;
        }
    }

    if !config.mark_accepting {
        let accepting: Vec<String> =
            automaton.accepting().iter().map(|s| s.to_string()).collect();
        writeln!(out, "accepting: {}", accepting.join(", "))?;
    }

    Ok(())
}
