use std::{
    fs,
    process::{Command, Output},
    time::{SystemTime, UNIX_EPOCH},
};

fn persat(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_persat"))
        .args(args)
        .env_remove("PERSAT_TIMEOUT_MS")
        .env_remove("PERSAT_DROP_TAUTOLOGIES")
        .output()
        .unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    assert!(output.status.success(), "{:?}", output);
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn competition_sat() {
    for solver in &["recursive", "stack"] {
        let lines = stdout_lines(&persat(&[
            solver,
            "competition",
            "testcases/basic/simple_v3_c2.cnf",
        ]));

        assert!(lines[0].starts_with("c solved in "));
        assert_eq!(&lines[1..], &["s SATISFIABLE", "v 1 2", "v 0"]);
    }
}

#[test]
fn competition_unsat() {
    let lines = stdout_lines(&persat(&[
        "stack",
        "competition",
        "testcases/basic/unit_conflict.cnf",
    ]));

    assert!(lines[0].starts_with("c "));
    assert_eq!(&lines[1..], &["s UNSATISFIABLE"]);
}

#[test]
fn check_prints_model() {
    let lines = stdout_lines(&persat(&["stack", "check", "testcases/basic/unit.cnf"]));

    assert!(lines[0].starts_with("Time: "));
    assert_eq!(&lines[1..], &["SAT Model with 1 variables", "  x1: false"]);
}

#[test]
fn solve_writes_assignment() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("persat_cli_{}.txt", nanos));
    let path_str = path.to_str().unwrap();

    let lines = stdout_lines(&persat(&[
        "recursive",
        "solve",
        "testcases/basic/simple_v3_c2.cnf",
        path_str,
    ]));
    assert_eq!(lines[1], "satisfiable");

    let written = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(written, "1:TRUE\n3:UNBOUND\n2:TRUE\n");
}

#[test]
fn unknown_command_fails() {
    let output = persat(&["stack", "frobnicate", "testcases/basic/unit.cnf"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown command 'frobnicate'"));
}
