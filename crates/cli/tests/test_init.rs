use vibewall_cli::commands::init;
use vibewall_core::config::CONFIG_FILENAME;
use vibewall_core::VibewallConfig;

#[test]
fn test_init_writes_default_config() {
    let dir = tempfile::tempdir().unwrap();
    init::run(Some(dir.path())).unwrap();

    let path = dir.path().join(CONFIG_FILENAME);
    assert!(path.exists());
    let config = VibewallConfig::from_file(&path).unwrap();
    assert_eq!(config.output.format, "terminal");
    assert!(config.scenarios.is_empty());
}

#[test]
fn test_init_keeps_existing_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILENAME);
    std::fs::write(&path, "[output]\nformat = \"json\"\n").unwrap();

    init::run(Some(dir.path())).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "[output]\nformat = \"json\"\n");
}
