use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use roundtable::config::BackendConfig;
use roundtable::transport::HttpBackend;

/// HTTP backend pointed at `{server_uri}/api`
#[allow(dead_code)]
pub fn backend_for(server_uri: &str) -> HttpBackend {
    HttpBackend::new(&BackendConfig {
        base_url: format!("{}/api", server_uri),
        timeout_seconds: 5,
        ..BackendConfig::default()
    })
    .expect("valid backend config")
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("roundtable.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
