/*! A regular expression engine based on deterministic finite automata.

Patterns are compiled into an [`Automaton`], a DFA that decides whether an
input matches the pattern in a single pass, reading each byte exactly once
and without backtracking. Compilation follows the textbook route: every
literal becomes a tiny automaton, and the operators in the pattern combine
automata using [Thompson's construction][1] followed by the subset
construction, which turns the intermediate NFA back into a DFA.

The pattern syntax is deliberately small: literals, concatenation,
alternation (`|`), Kleene star (`*`) and grouping with parentheses. Matches
are anchored at both ends, the whole input must be accepted by the pattern.

# Example

```rust
// Multiples of 3 written in binary.
let automaton = regex_dfa::compile("(1(01*0)*1|0)*").unwrap();

assert!(automaton.is_match("110"));
assert!(!automaton.is_match("111"));

// Compilation errors tell where the problem is.
let err = regex_dfa::compile("(ab").unwrap_err();

assert_eq!(
    err.to_string(),
    "missing right parenthesis ')' for '(' at position 0"
);
```

Compiled automata are immutable and can be shared among threads, each
thread running its own [`Matcher`].

[1]: https://en.wikipedia.org/wiki/Thompson%27s_construction
*/

#![deny(missing_docs)]

pub use automaton::epsilon_closure;
pub use automaton::Automaton;
pub use automaton::Nfa;
pub use automaton::Symbol;
pub use automaton::TransitionRule;
pub use automaton::EPSILON;

pub use compiler::Compiler;
pub use compiler::Error;
pub use compiler::Operator;

pub use matcher::Matcher;

pub use stateset::Iter;
pub use stateset::StateId;
pub use stateset::StateSet;

mod automaton;
mod compiler;
mod matcher;
mod stateset;

#[cfg(test)]
mod tests;

/// Compiles a pattern into an [`Automaton`].
///
/// This is a shortcut for [`Compiler::compile`].
pub fn compile(pattern: &str) -> Result<Automaton, Error> {
    compile_bytes(pattern.as_bytes())
}

/// Same as [`compile`], but the pattern can contain arbitrary bytes.
pub fn compile_bytes(pattern: &[u8]) -> Result<Automaton, Error> {
    Compiler::new().compile(pattern)
}

/// Returns true if `pattern` matches the whole `input`.
///
/// The pattern is compiled every time this function is called. When the
/// same pattern is matched against many inputs, compile it once with
/// [`compile`] and use [`Automaton::is_match`] instead.
///
/// ```
/// assert_eq!(regex_dfa::is_match("b(a|b)*b", "bab"), Ok(true));
/// assert_eq!(regex_dfa::is_match("b(a|b)*b", "ba"), Ok(false));
/// assert!(regex_dfa::is_match("a|", "a").is_err());
/// ```
pub fn is_match<I: AsRef<[u8]>>(
    pattern: &str,
    input: I,
) -> Result<bool, Error> {
    Ok(compile(pattern)?.is_match(input))
}
