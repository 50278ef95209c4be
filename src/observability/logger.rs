//! Markdown transcript of server sessions.

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::server::protocol::ToolCallResult;

/// Transcript writer for MCP sessions.
///
/// Each session appends markdown sections to one file: a start header, one
/// section per tool call, and a completion marker. Nothing is written to
/// stdout, which carries the protocol.
#[derive(Debug)]
pub struct Logger {
    log_file: PathBuf,
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Logger {
    /// Open (or create) a transcript file.
    ///
    /// Parent directories are created as needed. A new file gets a header;
    /// an existing one is appended to.
    pub fn new(log_file: &Path) -> Result<Self> {
        match log_file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create transcript directory: {}", dir.display()))?,
            _ => {}
        }

        match OpenOptions::new().write(true).create_new(true).open(log_file) {
            Ok(mut file) => {
                let header = format!("# NZBN MCP Transcript\n\nLog started: {}\n\n---\n\n", timestamp());
                file.write_all(header.as_bytes())
                    .with_context(|| format!("Failed to write transcript header: {}", log_file.display()))?;
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to create transcript: {}", log_file.display())
                })
            }
        }

        Ok(Self {
            log_file: log_file.to_path_buf(),
        })
    }

    /// Append one `heading - timestamp` section followed by `body`.
    fn section(&self, heading: &str, body: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.log_file)
            .with_context(|| format!("Failed to open transcript: {}", self.log_file.display()))?;

        write!(file, "{} - {}\n\n{}\n", heading, timestamp(), body)
            .with_context(|| format!("Failed to append to transcript: {}", self.log_file.display()))
    }

    /// Record the server identity and the non-secret settings in effect.
    pub fn log_session_start(&self, server: &str, config: &HashMap<String, Value>) -> Result<()> {
        let settings = serde_json::to_string_pretty(config).context("Failed to render settings")?;
        self.section(
            "## Session Started",
            &format!("**Server:** {}\n**Config:** {}\n", server, settings),
        )
    }

    /// Record one tool call with its arguments and the text it returned.
    pub fn log_tool_call(
        &self,
        tool_name: &str,
        arguments: &Value,
        result: &ToolCallResult,
    ) -> Result<()> {
        let label = if result.is_error { "Error" } else { "Result" };
        self.section(
            "### Tool Call",
            &format!(
                "**Tool:** {}\n**Args:** `{}`\n**{}:**\n```\n{}\n```\n",
                tool_name,
                arguments,
                label,
                result.text_content()
            ),
        )
    }

    /// Record a protocol-level error.
    pub fn log_error(&self, error: &str) -> Result<()> {
        self.section("### Error", &format!("**Error:** {}\n", error))
    }

    /// Close the session with the reason it ended.
    pub fn log_completion(&self, reason: &str) -> Result<()> {
        self.section(
            "### Session Completed",
            &format!("**Reason:** {}\n\n---\n", reason),
        )
    }

    /// Path of the transcript file.
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}

#[cfg(test)]
mod tests;
