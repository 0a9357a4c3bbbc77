//! End-to-end tests for the constgen binary.

use constgen_core::{GeneratorConfig, generate};
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const HEADER: &str = "\
enum drgn_architecture {
	DRGN_ARCH_UNKNOWN,
	DRGN_ARCH_X86_64,
};
enum drgn_qualifiers {
	DRGN_QUALIFIER_CONST = (1 << 0),
};
";

/// Runs constgen from `dir` with `stdin` piped in, isolated from any
/// constgen.toml or RUST_LOG in the caller's environment.
fn run_constgen(dir: &TempDir, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_constgen"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("CONSTGEN_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn constgen");
    // The child may exit before reading stdin (e.g. on a bad config).
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
    child.wait_with_output().unwrap()
}

#[test]
fn test_stdin_to_stdout() {
    let dir = TempDir::new().unwrap();
    let output = run_constgen(&dir, &[], HEADER);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.starts_with("/* Generated by constgen. */\n\n#include \"drgnpy.h\"\n"));
    assert!(stdout.contains("item = Py_BuildValue(\"sK\", \"X86_64\", (unsigned long long)DRGN_ARCH_X86_64);"));
    assert!(stdout.contains("\ttmp = PyList_New(2);\n"));
    assert!(stdout.contains("int add_module_constants(PyObject *m)\n"));
}

#[test]
fn test_stdout_matches_library_output() {
    let dir = TempDir::new().unwrap();
    let output = run_constgen(&dir, &[], HEADER);
    let expected = generate(HEADER, &GeneratorConfig::default()).unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
}

#[test]
fn test_macro_call_value_survives_to_output() {
    let dir = TempDir::new().unwrap();
    let header = "\tDRGN_ARCH_X86_64 = MAKE_ARCH(1, 2),\n\tDRGN_QUALIFIER_CONST = -8 >> 1,\n";
    let output = run_constgen(&dir, &[], header);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("\"X86_64\", (unsigned long long)(MAKE_ARCH(1, 2)));"));
    assert!(stdout.contains("\"CONST\", (unsigned long long)(-8 >> 1));"));
}

#[test]
fn test_output_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let first = run_constgen(&dir, &[], HEADER);
    let second = run_constgen(&dir, &[], HEADER);
    assert_eq!(
        String::from_utf8_lossy(&first.stdout),
        String::from_utf8_lossy(&second.stdout)
    );
}

#[test]
fn test_file_input_and_output() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("drgn.h"), HEADER).unwrap();

    let output = run_constgen(&dir, &["-i", "drgn.h", "-o", "constants.c"], "");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());

    let generated = fs::read_to_string(dir.path().join("constants.c")).unwrap();
    assert!(generated.contains("static int add_Qualifiers(PyObject *m, PyObject *enum_module)"));
}

#[test]
fn test_strict_mode_fails_on_partial_header() {
    let dir = TempDir::new().unwrap();
    let output = run_constgen(&dir, &["--strict", "-o", "constants.c"], HEADER);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("FindObjectFlags"));
    assert!(!dir.path().join("constants.c").exists());
}

#[test]
fn test_config_file_is_discovered() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("constgen.toml"),
        "include = \"mypy.h\"\ndoc_prefix = \"my\"\n",
    )
    .unwrap();

    let output = run_constgen(&dir, &[], HEADER);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("#include \"mypy.h\"\n"));
    assert!(stdout.contains("PyUnicode_FromString(my_Architecture_DOC)"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.toml"), "dispatcher = \"not valid\"\n").unwrap();

    let output = run_constgen(&dir, &["--config", "bad.toml"], HEADER);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_list_classes() {
    let dir = TempDir::new().unwrap();
    let output = run_constgen(&dir, &["--list"], "");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert_eq!(stdout.lines().count(), 9);
    assert!(stdout.lines().next().unwrap().starts_with("Architecture\tEnum\t"));
    assert!(stdout.contains("PlatformFlags\tFlag\tDRGN_PLATFORM_([a-zA-Z0-9_]+)\texclude=DRGN_PLATFORM_DEFAULT_FLAGS\tseeded=0"));
    assert!(stdout.contains("Qualifiers\tFlag\tDRGN_QUALIFIER_([a-zA-Z0-9_]+)\texclude=-\tseeded=1"));
}
