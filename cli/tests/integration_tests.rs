use std::process::{Command, Output};

fn demo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_argflags-demo"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run argflags-demo")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// Successful parses
// ---------------------------------------------------------------------------

#[test]
fn prints_flags_and_positionals() {
    let out = demo(&["--size=5", "-v", "a", "b"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "verbose = true\nsize = 5\nargs = a b\n");
}

#[test]
fn squashed_boolean_with_trailing_value() {
    let out = demo(&["-vs", "3"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "verbose = true\nsize = 3\n");
}

#[test]
fn terminator_passes_flags_through() {
    let out = demo(&["-s", "1", "--", "--verbose", "-x"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "verbose = false\nsize = 1\nargs = --verbose -x\n");
}

// ---------------------------------------------------------------------------
// Failures exit with status 1
// ---------------------------------------------------------------------------

#[test]
fn missing_required_flag_exits_1() {
    let out = demo(&["-v"]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("error: missing required flag -s"), "stderr: {err}");
    assert!(err.contains("Usage: argflags-demo"), "stderr: {err}");
    assert!(stdout(&out).is_empty());
}

#[test]
fn invalid_int_exits_1() {
    let out = demo(&["--size", "big"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("invalid value \"big\" for flag -s"));
}

#[test]
fn unknown_flag_exits_1() {
    let out = demo(&["-s", "1", "--colour"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown flag: --colour"));
}

#[cfg(unix)]
#[test]
fn non_unicode_argument_exits_1() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let out = Command::new(env!("CARGO_BIN_EXE_argflags-demo"))
        .args([OsStr::new("-s"), OsStr::new("1"), OsStr::from_bytes(b"caf\xe9")])
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run argflags-demo");
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("error: argument is not valid UTF-8"), "stderr: {err}");
    assert!(stdout(&out).is_empty());
}

// ---------------------------------------------------------------------------
// Help
// ---------------------------------------------------------------------------

#[test]
fn help_prints_usage_and_exits_0() {
    for flag in ["--help", "-h"] {
        let out = demo(&[flag]);
        assert_eq!(out.status.code(), Some(0), "{flag}");
        let text = stdout(&out);
        assert!(text.starts_with("Usage: argflags-demo [FLAGS] [--] [ARGS...]"));
        assert!(text.contains("-s, --size <INT>  (required, int)"));
        assert!(text.contains("-v, --verbose  (optional, bool)"));
        assert!(text.contains("Enable verbose logging"));
    }
}

#[test]
fn help_ignores_missing_required_flags_and_later_errors() {
    let out = demo(&["--help", "--size", "nope"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("Usage:"));
}
