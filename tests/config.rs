use menuhub::{initialize, Config, MenuhubError};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

#[test]
fn file_values_override_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
api_base_url = "https://api.example.com/v2/"
trace_level = "menuhub=debug"
trace_file = "/tmp/menuhub-spans.jsonl"
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.api_base_url, "https://api.example.com/v2/");
    assert_eq!(config.trace_level.as_deref(), Some("menuhub=debug"));
    assert_eq!(config.trace_file, Some(PathBuf::from("/tmp/menuhub-spans.jsonl")));
    assert_eq!(config.auth_token, None);
    assert!(config.user_agent.starts_with("menuhub/"));
}

#[test]
fn unknown_keys_are_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "api_base_uri = \"https://typo.example\"").unwrap();

    assert!(matches!(Config::from_file(file.path()), Err(MenuhubError::Config(_))));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::from_file(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(MenuhubError::Io(_))));
}

#[test]
fn environment_overlays_file() {
    let mut vars = BTreeMap::new();
    vars.insert("MENUHUB_AUTH_TOKEN".to_string(), "tok".to_string());
    vars.insert("MENUHUB_TRACE_FILE".to_string(), "/var/tmp/spans.jsonl".to_string());
    vars.insert("UNRELATED".to_string(), "x".to_string());

    let config = Config::default().apply_env(&vars);
    assert_eq!(config.auth_token.as_deref(), Some("tok"));
    assert_eq!(config.trace_file, Some(PathBuf::from("/var/tmp/spans.jsonl")));
    assert_eq!(config.api_base_url, menuhub::DEFAULT_API_BASE_URL);
}

#[test]
fn base_url_must_be_http() {
    let config = Config {
        api_base_url: "ftp://files.example.com".into(),
        ..Config::default()
    };
    assert!(matches!(config.base_url(), Err(MenuhubError::Config(_))));

    let config = Config {
        api_base_url: "not a url".into(),
        ..Config::default()
    };
    assert!(matches!(initialize(&config), Err(MenuhubError::Config(_))));
}
