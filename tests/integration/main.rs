//! Integration tests for Hercules

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// Nothing listens on the discard port
    const DEAD_BACKEND: &str = "http://127.0.0.1:9";

    /// A `hercules` command isolated from the user's config and token
    fn hercules(home: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("hercules");
        cmd.env("HERCULES_STATE_DIR", home.path().join("state"))
            .env("HERCULES_CONFIG", home.path().join("config.toml"))
            .env("CI", "1")
            .env_remove("HERCULES_API_URL")
            .env_remove("HERCULES_PASSWORD");
        cmd
    }

    #[test]
    fn help_displays() {
        let home = TempDir::new().unwrap();
        hercules(&home)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("session client"));
    }

    #[test]
    fn version_displays() {
        let home = TempDir::new().unwrap();
        hercules(&home)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("hercules"));
    }

    #[test]
    fn config_path() {
        let home = TempDir::new().unwrap();
        hercules(&home)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let home = TempDir::new().unwrap();
        hercules(&home)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[api]"))
            .stdout(predicate::str::contains("http://localhost:8000"));
    }

    #[test]
    fn config_set_persists() {
        let home = TempDir::new().unwrap();
        hercules(&home)
            .args(["config", "set", "api.base_url", "https://scan.example.com/"])
            .assert()
            .success();

        hercules(&home)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("https://scan.example.com"));
    }

    #[test]
    fn config_set_unknown_key() {
        let home = TempDir::new().unwrap();
        hercules(&home)
            .args(["config", "set", "vm.name", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn logout_without_session() {
        let home = TempDir::new().unwrap();
        hercules(&home)
            .args(["logout", "--api-url", DEAD_BACKEND])
            .assert()
            .success()
            .stdout(predicate::str::contains("Signed out"));
    }

    #[test]
    fn whoami_requires_session() {
        let home = TempDir::new().unwrap();
        hercules(&home)
            .arg("whoami")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not signed in"))
            .stderr(predicate::str::contains("hercules login"));
    }

    #[test]
    fn dashboard_requires_session() {
        let home = TempDir::new().unwrap();
        hercules(&home)
            .arg("dashboard")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not signed in"));
    }

    #[test]
    fn login_backend_unreachable() {
        let home = TempDir::new().unwrap();
        hercules(&home)
            .args([
                "login",
                "--email",
                "ann@example.com",
                "--password",
                "hunter22",
                "--api-url",
                DEAD_BACKEND,
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Network error"));

        assert!(!home.path().join("state").join("auth_token.json").exists());
    }

    #[test]
    fn login_needs_email_when_not_interactive() {
        let home = TempDir::new().unwrap();
        hercules(&home)
            .arg("login")
            .assert()
            .failure()
            .stderr(predicate::str::contains("--email"));
    }

    #[test]
    fn invalid_api_url_rejected() {
        let home = TempDir::new().unwrap();
        hercules(&home)
            .args([
                "login",
                "--email",
                "ann@example.com",
                "--password",
                "hunter22",
                "--api-url",
                "ftp://scan.example.com",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid API base URL"));
    }

    #[test]
    fn completions_bash() {
        let home = TempDir::new().unwrap();
        hercules(&home)
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("hercules"));
    }
}
