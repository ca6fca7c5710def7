//! Failures that stop a sweep before any model is loaded.

use depthsweep::cli::run_sweep;
use std::io::Write;

#[tokio::test]
async fn test_missing_explicit_config_fails() {
    let result = run_sweep(Some(std::path::Path::new("/nonexistent/depthsweep.toml"))).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_missing_dataset_fails() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[dataset]\npath = \"/nonexistent/study_stories.csv\"\n\n[server]\nbinary = \"/nonexistent/llama-server\""
    )
    .unwrap();

    let result = run_sweep(Some(file.path())).await;
    let message = result.unwrap_err().to_string();
    assert!(message.contains("study_stories.csv"), "{}", message);
}
