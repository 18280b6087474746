/*! End-to-end tests. */
use pretty_assertions::assert_eq;

use crate::{Automaton, Error, Operator, StateSet};

macro_rules! test_match {
    ($pattern:literal, $input:expr, $expected_result:expr) => {{
        let result = crate::is_match($pattern, $input)
            .expect("pattern should compile");

        assert_eq!(
            result, $expected_result,
            "\n\n`{}` matching {:?} should be {}, but it is {}",
            $pattern, $input, $expected_result, !$expected_result
        );
    }};
}

macro_rules! match_true {
    ($pattern:literal, $input:expr) => {{
        test_match!($pattern, $input, true);
    }};
}

macro_rules! match_false {
    ($pattern:literal, $input:expr) => {{
        test_match!($pattern, $input, false);
    }};
}

#[test]
fn literals() {
    match_true!("a", "a");
    match_true!("hello", "hello");
    match_true!("hello world", "hello world");
    match_false!("hello", "hell");
    match_false!("hello", "helloo");
    match_false!("hello", "Hello");
    match_false!("a", "");
}

#[test]
fn alternation() {
    match_true!("cat|dog", "cat");
    match_true!("cat|dog", "dog");
    match_false!("cat|dog", "catdog");
    match_false!("cat|dog", "ca");
    match_true!("a(b|c|d)e", "ace");
    match_false!("a(b|c|d)e", "ae");
    match_true!("(a|b)|(c|d)", "d");
}

#[test]
fn repetition() {
    match_true!("a*", "");
    match_true!("a*", "aaaaaaaaaaaaaaaa");
    match_false!("a*", "aaaaaaaab");
    match_true!("(a|b)*", "abbabbbaaab");
    match_false!("(a|b)*", "abbabcbaaab");
    match_true!("(ab*c)*", "acabbbcac");
    match_false!("(ab*c)*", "acabbbca");
    match_true!("x(yz)*", "xyzyz");
    match_false!("x(yz)*", "xyzy");
}

#[test]
fn anchored() {
    // Matches must cover the whole input, not just a part of it.
    match_false!("foo", "foobar");
    match_false!("bar", "foobar");
    match_false!("oba", "foobar");
    match_true!("foo(bar)*", "foobar");
}

#[test]
fn bytes() {
    let automaton = crate::compile_bytes(b"\xca\xfe(\xba\xbe)*").unwrap();

    assert!(automaton.is_match(b"\xca\xfe"));
    assert!(automaton.is_match(b"\xca\xfe\xba\xbe\xba\xbe"));
    assert!(!automaton.is_match(b"\xca\xfe\xba"));

    // Multi-byte characters are sequences of literals, they must be
    // grouped before applying the star.
    match_true!("(ñ)*", "ññ");
    match_false!("ñ*", "ññ");
    match_true!("ñ*", b"\xc3\xb1\xb1");
}

#[test]
fn multiples_of_three() {
    let automaton = crate::compile("(1(01*0)*1|0)*").unwrap();

    for i in 0..100_u32 {
        assert_eq!(
            automaton.is_match(format!("{:032b}", i)),
            i % 3 == 0,
            "{}",
            i
        );
        // Without leading zeros the result is the same.
        assert_eq!(
            automaton.is_match(format!("{:b}", i)),
            i % 3 == 0,
            "{}",
            i
        );
    }
}

#[test]
fn errors() {
    assert_eq!(
        crate::compile("(abc").unwrap_err(),
        Error::MissingRightParen { position: 0 }
    );
    assert_eq!(
        crate::compile("abc)").unwrap_err(),
        Error::MissingLeftParen { position: 3 }
    );
    assert_eq!(
        crate::compile("abc|*").unwrap_err(),
        Error::MissingOperand { operator: Operator::KleeneStar, position: 4 }
    );
    assert_eq!(
        crate::is_match("a|", "a"),
        Err(Error::MissingOperand {
            operator: Operator::Alternation,
            position: 1
        })
    );
}

#[test]
fn matcher_step_by_step() {
    let automaton = crate::compile("ab|ac").unwrap();
    let mut matcher = automaton.matcher();

    matcher.advance(b'a');
    assert!(!matcher.is_dead());
    assert!(!matcher.is_accepting());

    matcher.advance(b'c');
    assert!(matcher.is_accepting());

    matcher.advance(b'c');
    assert!(matcher.is_dead());
    assert!(!matcher.is_accepting());
}

#[test]
fn determinism() {
    // Both alternatives start with `a`, so there's a single state after
    // reading it.
    let automaton = crate::compile("ab|ac").unwrap();
    let after_a = automaton.transition(automaton.start(), b'a').unwrap();

    assert!(automaton.transition(after_a, b'b').is_some());
    assert!(automaton.transition(after_a, b'c').is_some());
    assert_eq!(automaton.transition(after_a, b'a'), None);
    assert_eq!(automaton.transition(automaton.start(), b'b'), None);
}

#[test]
fn shared_between_threads() {
    let automaton = crate::compile("(1(01*0)*1|0)*").unwrap();

    std::thread::scope(|s| {
        for t in 0..4_u32 {
            let automaton = &automaton;
            s.spawn(move || {
                for i in (t * 100)..(t * 100 + 100) {
                    assert_eq!(
                        automaton.is_match(format!("{:b}", i)),
                        i % 3 == 0
                    );
                }
            });
        }
    });
}

#[test]
fn explicit_states() {
    // Automaton that accepts strings with an even number of `a`s.
    let automaton = Automaton::from_nfa(
        0,
        StateSet::singleton(0),
        vec![
            crate::TransitionRule::new(0, b'a', 1),
            crate::TransitionRule::new(1, b'a', 0),
        ],
    );

    assert!(automaton.is_match(""));
    assert!(automaton.is_match("aa"));
    assert!(!automaton.is_match("aaa"));

    let twice = automaton.concatenate(&automaton);

    assert!(twice.is_match("aaaa"));
    assert!(!twice.is_match("a"));
}
