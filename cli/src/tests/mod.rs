use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;


#[test]
fn cli_match_arguments() {
    Command::cargo_bin("rdfa")
        .unwrap()
        .arg("match")
        .arg("b(a|b)*b")
        .arg("bab")
        .arg("ba")
        .arg("bababbaab")
        .assert()
        .success()
        .stdout("bab: match\nba: no match\nbababbaab: match\n");
}

#[test]
fn cli_match_stdin() {
    Command::cargo_bin("rdfa")
        .unwrap()
        .arg("match")
        .arg("(1(01*0)*1|0)*")
        .write_stdin("0\n11\n101\n110\n")
        .assert()
        .success()
        .stdout("0: match\n11: match\n101: no match\n110: match\n");
}

#[test]
fn cli_match_empty_input() {
    Command::cargo_bin("rdfa")
        .unwrap()
        .arg("match")
        .arg("a*")
        .arg("")
        .assert()
        .success()
        .stdout(": match\n");
}

#[test]
fn cli_no_match() {
    Command::cargo_bin("rdfa")
        .unwrap()
        .arg("match")
        .arg("abc")
        .arg("ab")
        .arg("abcd")
        .assert()
        .code(1)
        .stdout("ab: no match\nabcd: no match\n");
}

#[test]
fn cli_compile_error() {
    Command::cargo_bin("rdfa")
        .unwrap()
        .arg("match")
        .arg("(ab")
        .arg("ab")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains(
            "can not compile `(ab`: missing right parenthesis ')' for '(' \
             at position 0",
        ));

    Command::cargo_bin("rdfa")
        .unwrap()
        .arg("dump")
        .arg("a||b")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "missing operand for operator '|' at position 2",
        ));
}

#[test]
fn cli_config_print_non_matching() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.child("config.toml");

    config_file
        .write_str(
            r#"
            [match]
            print_non_matching = false
            "#,
        )
        .unwrap();

    Command::cargo_bin("rdfa")
        .unwrap()
        .arg("--config")
        .arg(config_file.path())
        .arg("match")
        .arg("a|b")
        .arg("a")
        .arg("c")
        .arg("b")
        .assert()
        .success()
        .stdout("a: match\nb: match\n");
}

#[test]
fn cli_config_invalid() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.child("config.toml");

    config_file
        .write_str(
            r#"
            [match]
            print_everything = true
            "#,
        )
        .unwrap();

    Command::cargo_bin("rdfa")
        .unwrap()
        .arg("--config")
        .arg(config_file.path())
        .arg("match")
        .arg("a")
        .arg("a")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid config file"));
}

#[test]
fn cli_config_missing() {
    Command::cargo_bin("rdfa")
        .unwrap()
        .arg("--config")
        .arg("src/tests/testdata/does-not-exist.toml")
        .arg("match")
        .arg("a")
        .arg("a")
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}
