use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "dungeon-radar"])
        .status()
        .expect("failed to invoke cargo check for dungeon-radar CLI binary");

    assert!(status.success(), "cargo check --bin dungeon-radar should succeed");
}

#[test]
fn help_lists_session_options() {
    let output = Command::new(env!("CARGO_BIN_EXE_dungeon-radar"))
        .arg("--help")
        .output()
        .expect("failed to run dungeon-radar --help");

    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for option in ["--seed", "--log-file", "--hide-minimap"] {
        assert!(help.contains(option), "help text is missing {option}");
    }
}
