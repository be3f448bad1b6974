use std::process::Command;

fn vacay() -> Command {
    Command::new(env!("CARGO_BIN_EXE_vacay"))
}

#[test]
fn test_help_lists_commands() {
    let output = vacay().arg("--help").output().expect("Failed to run vacay");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["serve", "chat", "status"] {
        assert!(stdout.contains(command), "missing {command} in:\n{stdout}");
    }
}

#[test]
fn test_status_masks_api_key() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"provider": {"endpoint": "https://example.openai.azure.com", "api_key": "sk-very-secret", "deployment": "gpt-4o"}}"#,
    )
    .unwrap();

    let output = vacay()
        .arg("--config-dir")
        .arg(dir.path())
        .arg("status")
        .env_remove("AZURE_API_KEY")
        .output()
        .expect("Failed to run vacay");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "status failed:\n{stdout}");
    assert!(stdout.contains("Deployment: gpt-4o"));
    assert!(stdout.contains("API key: set"));
    assert!(!stdout.contains("sk-very-secret"));
}
