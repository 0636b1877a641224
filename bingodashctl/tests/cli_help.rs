use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn help_text(args: &[&str]) -> String {
    let mut cmd = cargo_bin_cmd!("bingodashctl");
    let output = cmd
        .args(args)
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8_lossy(&output).into_owned()
}

#[test]
fn top_level_help_lists_every_area() {
    let text = help_text(&[]);
    let commands = [
        "login",
        "logout",
        "whoami",
        "users",
        "promo",
        "cards",
        "challenges",
        "revenue",
    ];
    for command in commands {
        assert!(text.contains(command), "help missing '{command}'");
    }
}

#[test]
fn list_commands_share_query_flags() {
    for area in ["users", "promo", "cards", "challenges"] {
        let text = help_text(&[area, "list"]);
        let flags =
            ["--search", "--page", "--page-size", "--sort", "--sort-clicks"];
        for flag in flags {
            assert!(text.contains(flag), "{area} list help missing {flag}");
        }
    }
}

#[test]
fn domain_filters_are_documented() {
    assert!(help_text(&["cards", "list"]).contains("--category"));
    assert!(help_text(&["challenges", "list"]).contains("--status"));
    assert!(help_text(&["revenue", "range"]).contains("--from"));
}

#[test]
fn promo_subcommands_present() {
    let text = help_text(&["promo"]);
    for sub in ["create", "update", "delete", "toggle", "stats"] {
        assert!(text.contains(sub), "promo help missing {sub}");
    }
}

fn offline_cmd(state: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("bingodashctl");
    cmd.arg("--no-env-file")
        .env("BINGODASH_API_URL", "http://127.0.0.1:9")
        .env("BINGODASH_STATE_DIR", state.path())
        .env_remove("BINGODASH_CONFIG")
        .env_remove("RUST_LOG")
        .current_dir(state.path());
    cmd
}

#[test]
fn whoami_without_session_reports_signed_out() {
    let state = TempDir::new().unwrap();
    offline_cmd(&state)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("not signed in"));
}

#[test]
fn lists_require_a_session() {
    let state = TempDir::new().unwrap();
    offline_cmd(&state)
        .args(["users", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bingodashctl login"));
}

#[test]
fn missing_base_url_fails_before_any_command() {
    let state = TempDir::new().unwrap();
    let config = state.path().join("empty.toml");
    std::fs::write(&config, "").unwrap();

    let mut cmd = cargo_bin_cmd!("bingodashctl");
    cmd.arg("--no-env-file")
        .arg("--config")
        .arg(&config)
        .env_remove("BINGODASH_API_URL")
        .env_remove("RUST_LOG")
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("API base URL is not configured"));
}
