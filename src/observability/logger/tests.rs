use super::*;
use serde_json::json;
use std::collections::HashMap;
use tempfile::tempdir;

#[test]
fn test_logger_creation() {
    let temp_dir = tempdir().unwrap();
    let log_path = temp_dir.path().join("transcript.md");

    let logger = Logger::new(&log_path).unwrap();
    assert_eq!(logger.log_file(), log_path.as_path());
}

#[test]
fn test_log_file_creation() {
    let temp_dir = tempdir().unwrap();
    let log_path = temp_dir.path().join("logs").join("nested").join("transcript.md");

    let _logger = Logger::new(&log_path).unwrap();
    assert!(log_path.exists());

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("# NZBN MCP Transcript"));
    assert!(content.contains("Log started:"));
}

#[test]
fn test_existing_file_is_appended_not_truncated() {
    let temp_dir = tempdir().unwrap();
    let log_path = temp_dir.path().join("transcript.md");
    std::fs::write(&log_path, "previous session\n").unwrap();

    let logger = Logger::new(&log_path).unwrap();
    logger.log_completion("eof").unwrap();

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.starts_with("previous session\n"));
    assert!(!content.contains("# NZBN MCP Transcript"));
    assert!(content.contains("**Reason:** eof"));
}

#[test]
fn test_log_operations() {
    let temp_dir = tempdir().unwrap();
    let log_path = temp_dir.path().join("transcript.md");
    let logger = Logger::new(&log_path).unwrap();

    let mut config = HashMap::new();
    config.insert("base_url".to_string(), json!("http://localhost:8080"));
    assert!(logger.log_session_start("nzbn_mcp 0.1.0", &config).is_ok());

    let ok = ToolCallResult::text("{\n  \"name\": \"Example Co\"\n}");
    assert!(logger
        .log_tool_call("get_entity", &json!({"nzbn": "9429041864373"}), &ok)
        .is_ok());

    let failed = ToolCallResult::error("Request timed out. Try again.");
    assert!(logger
        .log_tool_call("get_entity", &json!({"nzbn": "9429041864373"}), &failed)
        .is_ok());

    assert!(logger.log_error("Unknown method: foo").is_ok());
    assert!(logger.log_completion("stdin closed").is_ok());

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("## Session Started"));
    assert!(content.contains("**Server:** nzbn_mcp 0.1.0"));
    assert!(content.contains("http://localhost:8080"));
    assert!(content.contains("### Tool Call"));
    assert!(content.contains(r#"**Args:** `{"nzbn":"9429041864373"}`"#));
    assert!(content.contains("**Result:**"));
    assert!(content.contains("Example Co"));
    assert!(content.contains("**Error:**\n```\nRequest timed out. Try again."));
    assert!(content.contains("Unknown method: foo"));
    assert!(content.contains("### Session Completed"));
}
