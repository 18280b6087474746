pub const MATCH_LONG_HELP: &str = r#"Match one or more strings against a pattern

Matches are anchored at both ends: a string matches only if the pattern
accepts the whole string. If no <INPUT> is given, the strings are read from
the standard input, one per line.

The exit code is 0 if at least one string matched, and 1 otherwise.

Examples:

rdfa match 'b(a|b)*b' bab abba
printf '0\n11\n101\n' | rdfa match '(1(01*0)*1|0)*'"#;

pub const PATTERN_HELP: &str = r#"Pattern to compile

The syntax supports literals, concatenation, alternation (|), Kleene
star (*), and grouping with parentheses. There's no escape mechanism, so
the metacharacters ( ) | * can't be used as literals."#;

pub const DUMP_LONG_HELP: &str = r#"Show the DFA produced for a pattern

Prints the start state, and then every state followed by its transitions.
Accepting states are marked with an asterisk, unless `mark_accepting` is
set to false in the `[dump]` section of the config file, in which case they
are listed in a separate line."#;

pub const CONFIG_FILE: &str = r#"Config file for rdfa

Specifies a config file which controls the behavior of rdfa. If no config
file is specified, ${HOME}/.rdfa.toml is used. If it does not exist the
default options are applied.

Supported options:

[match]
print_non_matching = true

[dump]
mark_accepting = true"#;
