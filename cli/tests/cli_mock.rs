//! Runs the `weft` binary against the offline `mock` provider.

use std::process::{Command, Output};

fn run_weft(args: &[&str]) -> Output {
    let dir = tempfile::tempdir().expect("temp dir");
    Command::new(env!("CARGO_BIN_EXE_weft"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("LOG_FILE")
        .env_remove("WEFT_PROVIDER")
        .env("XDG_CONFIG_HOME", dir.path())
        .output()
        .expect("failed to run weft binary")
}

#[test]
fn cli_help_succeeds() {
    let out = run_weft(&["--help"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Weft"));
    assert!(stdout.contains("--provider"));
}

#[test]
fn cli_graph_text_lists_branches() {
    let out = run_weft(&["--graph", "text"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("router -?-> answer_quiz [answer_quiz]"));
    assert!(stdout.contains("answer_direct -> END"));
}

#[test]
fn cli_mock_quiz_question_gets_skeleton() {
    let out = run_weft(&["--provider", "mock", "Make a quiz about recursion"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Quiz on \"Make a quiz about recursion\" (stub)"));
}

#[test]
fn cli_mock_json_reports_route() {
    let out = run_weft(&["--provider", "mock", "--json", "-m", "Explain company policy X"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("one json line");
    assert_eq!(v["state"]["route"], "direct");
    assert_eq!(v["state"]["question"], "Explain company policy X");
    assert!(v["answer"]
        .as_str()
        .unwrap()
        .contains("Question: Explain company policy X"));
}

#[test]
fn cli_mock_demo_answers_three_questions() {
    let out = run_weft(&["--provider", "mock", "--demo"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.matches("Q: ").count(), 3);
}

#[test]
fn cli_without_question_fails() {
    let out = run_weft(&["--provider", "mock"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("provide a question"));
}

#[test]
fn cli_missing_api_key_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let out = Command::new(env!("CARGO_BIN_EXE_weft"))
        .args(["--provider", "mistral", "hello"])
        .current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("WEFT_PROVIDER")
        .env("MISTRAL_API_KEY", "")
        .output()
        .expect("failed to run weft binary");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("MISTRAL_API_KEY"));
}

#[test]
fn cli_failure_is_written_to_log_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let log = dir.path().join("weft.log");
    let out = Command::new(env!("CARGO_BIN_EXE_weft"))
        .args(["--provider", "mistral", "hello"])
        .current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env("LOG_FILE", &log)
        .env("RUST_LOG", "info")
        .env_remove("WEFT_PROVIDER")
        .env("MISTRAL_API_KEY", "")
        .output()
        .expect("failed to run weft binary");
    assert!(!out.status.success());
    let contents = std::fs::read_to_string(&log).expect("log file written");
    assert!(!contents.is_empty());
    assert!(contents.contains("MISTRAL_API_KEY"), "{}", contents);
}

#[test]
fn cli_malformed_config_warns_and_still_answers() {
    let dir = tempfile::tempdir().expect("temp dir");
    let app_dir = dir.path().join("weft");
    std::fs::create_dir_all(&app_dir).expect("config dir");
    std::fs::write(app_dir.join("config.toml"), "not valid toml [[[\n").expect("write config");
    let out = Command::new(env!("CARGO_BIN_EXE_weft"))
        .args(["--provider", "mock", "What is Rust?"])
        .current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("LOG_FILE")
        .env_remove("WEFT_PROVIDER")
        .output()
        .expect("failed to run weft binary");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("config: parse xdg toml"), "{}", stderr);
    assert!(!out.stdout.is_empty());
}

#[test]
fn cli_unknown_provider_in_env_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let out = Command::new(env!("CARGO_BIN_EXE_weft"))
        .args(["hello"])
        .current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("LOG_FILE")
        .env("WEFT_PROVIDER", "anthropic")
        .output()
        .expect("failed to run weft binary");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("config: unknown provider: anthropic"), "{}", stderr);
}
